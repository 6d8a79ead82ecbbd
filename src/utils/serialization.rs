// src/utils/serialization.rs
//! Serialization utilities for the issuer registry.
//!
//! JSON helpers shared by the outbound transport and tests. Wire payloads
//! arriving through Axum are deserialized by the framework; these helpers
//! cover the paths where the registry serializes on its own.

use serde::{Deserialize, Serialize};

/// Serializes a value to a JSON string.
///
/// # Arguments
/// * `data` - The value to serialize (must implement `Serialize`)
///
/// # Returns
/// - `Ok(String)` with JSON representation on success
/// - `Err(serde_json::Error)` if serialization fails
pub fn serialize<T: Serialize>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(data)
}

/// Deserializes a value from a JSON string.
///
/// # Arguments
/// * `data` - JSON string to deserialize
///
/// # Returns
/// - `Ok(T)` with deserialized value on success
/// - `Err(serde_json::Error)` if deserialization fails
///
/// # Note
/// The lifetime parameter allows the deserialized value to borrow from the
/// input string.
pub fn deserialize<'a, T: Deserialize<'a>>(data: &'a str) -> Result<T, serde_json::Error> {
    serde_json::from_str(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::schema::SchemaRecord;

    #[test]
    fn test_json_round_trip() {
        let schema = SchemaRecord {
            id: 7,
            name: "cred-a".to_string(),
            version: "1.0".to_string(),
            origin_did: "did:sov:issuer-1".to_string(),
        };

        let encoded = serialize(&schema).unwrap();
        let decoded: SchemaRecord = deserialize(&encoded).unwrap();
        assert_eq!(decoded, schema);
    }
}
