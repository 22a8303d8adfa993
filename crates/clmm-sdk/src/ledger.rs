//! Ledger reader boundary
//!
//! The SDK never talks to a node itself. Callers inject a [`LedgerReader`]
//! that resolves object reads against whatever client they use.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SdkResult;

/// Key of a dynamic field stored under a parent object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicFieldName {
    /// Move type of the key
    #[serde(rename = "type")]
    pub type_: String,
    /// Key value in the ledger's JSON encoding
    pub value: Value,
}

impl DynamicFieldName {
    /// Key for a tick index: an `I32` wrapper holding the two's-complement bits
    pub fn tick_index(i32_type: &str, index: i32) -> Self {
        Self {
            type_: i32_type.to_string(),
            value: serde_json::json!({ "bits": (index as u32).to_string() }),
        }
    }
}

/// Read-only access to ledger objects
#[async_trait]
pub trait LedgerReader: Send + Sync {
    /// Fetch a dynamic field object. `Ok(None)` means the field does not exist;
    /// transport failures are errors.
    async fn get_dynamic_field_object(
        &self,
        parent_id: &str,
        name: &DynamicFieldName,
    ) -> SdkResult<Option<Value>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_index_key_uses_twos_complement() {
        let name = DynamicFieldName::tick_index("0x1::i32::I32", -60);
        assert_eq!(name.value["bits"], "4294967236");

        let name = DynamicFieldName::tick_index("0x1::i32::I32", 60);
        assert_eq!(name.value["bits"], "60");
    }

    #[test]
    fn test_serializes_type_field() {
        let name = DynamicFieldName::tick_index("0x1::i32::I32", 0);
        let json = serde_json::to_value(&name).unwrap();
        assert_eq!(json["type"], "0x1::i32::I32");
    }
}
