// src/services/validator.rs
//! Registration payload validation.
//!
//! Turns an untyped JSON payload into a typed
//! [`IssuerRegistrationMessage`], or fails with a validation error naming
//! the first offending field path. Checks are purely structural: required
//! fields, field types, and the shape of nested mapping rules. Whether a
//! declared schema actually exists is the reconciler's concern, not the
//! validator's.

use crate::error::RegistryError;
use crate::models::registration::{
    CredentialSpec, CredentialTypeDef, IssuerRegistrationMessage, MappingEntry, TopicDef,
};
use serde_json::Value;

/// Validates and deserializes a raw registration payload.
///
/// # Arguments
/// * `raw` - Untyped JSON payload as received on the wire
///
/// # Returns
/// - `Ok(IssuerRegistrationMessage)` for well-formed payloads
/// - `Err(RegistryError::Validation)` naming the first offending field
///
/// # Required fields
/// `connection_id`, `issuer_registration`, `issuer.did`, `issuer.name`, and
/// per credential type definition `schema`, `version`, `credential_def_id`
/// and a non-empty `topic` list.
pub fn validate_registration(raw: &Value) -> Result<IssuerRegistrationMessage, RegistryError> {
    let message: IssuerRegistrationMessage =
        serde_json::from_value(raw.clone()).map_err(|err| field_error(&err))?;

    let registration = &message.issuer_registration;
    if registration.issuer.did.trim().is_empty() {
        return Err(RegistryError::validation("did"));
    }
    if registration.issuer.name.trim().is_empty() {
        return Err(RegistryError::validation("name"));
    }

    if let Some(defs) = &registration.credential_types {
        for def in defs {
            validate_credential_type(def)?;
        }
    }

    Ok(message)
}

/// Structural checks on one credential type definition.
fn validate_credential_type(def: &CredentialTypeDef) -> Result<(), RegistryError> {
    if def.schema.trim().is_empty() {
        return Err(RegistryError::validation("schema"));
    }
    if def.version.trim().is_empty() {
        return Err(RegistryError::validation("version"));
    }
    if def.credential_def_id.trim().is_empty() {
        return Err(RegistryError::validation("credential_def_id"));
    }
    if def.topic.is_empty() {
        return Err(RegistryError::validation("topic"));
    }

    // The rule bodies stay raw JSON in the definition (they are copied
    // verbatim into the processor configuration), so their shape is checked
    // here against the typed rule structs instead of at deserialization.
    for entry in &def.topic {
        check_shape::<TopicDef>(entry)?;
    }
    if let Some(credential) = &def.credential {
        check_shape::<CredentialSpec>(credential)?;
    }
    for rules in [&def.mapping, &def.mappings].into_iter().flatten() {
        check_shape::<Vec<MappingEntry>>(rules)?;
    }

    Ok(())
}

/// Checks that `value` deserializes as `T`, mapping failures to a
/// validation error.
fn check_shape<T: serde::de::DeserializeOwned>(value: &Value) -> Result<(), RegistryError> {
    serde_json::from_value::<T>(value.clone())
        .map(|_| ())
        .map_err(|err| field_error(&err))
}

/// Extracts the offending field name from a serde error.
///
/// serde reports missing and unknown fields as ``missing field `name` `` /
/// ``unknown field `name`, …``; the backtick-quoted name is the field path
/// the caller wants. Errors without one (e.g. type mismatches) surface
/// their full message instead.
fn field_error(err: &serde_json::Error) -> RegistryError {
    let message = err.to_string();
    let field = message
        .split('`')
        .nth(1)
        .map(str::to_string)
        .unwrap_or(message);
    RegistryError::Validation { field }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_payload() -> Value {
        json!({
            "connection_id": "conn-1",
            "issuer_registration": {
                "issuer": {
                    "did": "did:sov:issuer-1",
                    "name": "Acme Registrar",
                    "abbreviation": "acme",
                    "email": "ops@acme.example",
                    "url": "https://acme.example",
                    "endpoint": "https://agent.acme.example",
                    "logo_b64": "aWNvbg=="
                },
                "credential_types": [
                    {
                        "schema": "cred-a",
                        "version": "1.0",
                        "name": "Registration credential",
                        "credential_def_id": "cd-1",
                        "topic": [
                            {
                                "source_id": {"from": "claim", "input": "registration_id"},
                                "type": {"from": "value", "input": "registration"}
                            }
                        ],
                        "mappings": [
                            {
                                "model": "attribute",
                                "fields": {
                                    "type": {"from": "value", "input": "entity_status"},
                                    "value": {"from": "claim", "input": "entity_status"}
                                }
                            }
                        ]
                    }
                ]
            }
        })
    }

    #[test]
    fn test_valid_payload_deserializes() {
        let message = validate_registration(&test_payload()).unwrap();

        assert_eq!(message.connection_id, "conn-1");
        let registration = message.issuer_registration;
        assert_eq!(registration.issuer.did, "did:sov:issuer-1");
        let defs = registration.credential_types.unwrap();
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].credential_def_id, "cd-1");
    }

    #[test]
    fn test_missing_issuer_registration() {
        let payload = json!({ "connection_id": "conn-1" });

        let err = validate_registration(&payload).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Validation { ref field } if field == "issuer_registration"
        ));
    }

    #[test]
    fn test_missing_did() {
        let mut payload = test_payload();
        payload["issuer_registration"]["issuer"]
            .as_object_mut()
            .unwrap()
            .remove("did");

        let err = validate_registration(&payload).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Validation { ref field } if field == "did"
        ));
    }

    #[test]
    fn test_missing_credential_def_id() {
        let mut payload = test_payload();
        payload["issuer_registration"]["credential_types"][0]
            .as_object_mut()
            .unwrap()
            .remove("credential_def_id");

        let err = validate_registration(&payload).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Validation { ref field } if field == "credential_def_id"
        ));
    }

    #[test]
    fn test_empty_topic_list() {
        let mut payload = test_payload();
        payload["issuer_registration"]["credential_types"][0]["topic"] = json!([]);

        let err = validate_registration(&payload).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Validation { ref field } if field == "topic"
        ));
    }

    #[test]
    fn test_mapping_rule_requires_from_and_input() {
        let mut payload = test_payload();
        payload["issuer_registration"]["credential_types"][0]["topic"] =
            json!([{ "source_id": {"from": "claim"} }]);

        let err = validate_registration(&payload).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Validation { ref field } if field == "input"
        ));
    }

    #[test]
    fn test_mapping_rule_rejects_extra_fields() {
        let mut payload = test_payload();
        payload["issuer_registration"]["credential_types"][0]["topic"] = json!([
            { "source_id": {"from": "claim", "input": "registration_id", "output": "x"} }
        ]);

        let err = validate_registration(&payload).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Validation { ref field } if field == "output"
        ));
    }

    #[test]
    fn test_issuer_only_payload_is_valid() {
        let payload = json!({
            "connection_id": "conn-1",
            "issuer_registration": {
                "issuer": { "did": "did:sov:issuer-1", "name": "Acme Registrar" }
            }
        });

        let message = validate_registration(&payload).unwrap();
        assert!(message.issuer_registration.credential_types.is_none());
    }
}
