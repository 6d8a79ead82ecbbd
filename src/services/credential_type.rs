// src/services/credential_type.rs
//! Credential type reconciliation.
//!
//! Manages the creation and updating of credential type records from
//! registration definitions:
//! - matching each definition to a previously registered schema,
//! - normalizing the legacy/current processor configuration fields,
//! - get-or-create upserts keyed on the `(schema, issuer)` pair.
//!
//! Reconciliation is a plain synchronous loop over the definitions; any
//! concurrency control across registration messages belongs to the caller.

use crate::error::RegistryError;
use crate::models::credential_type::{CredentialTypeRecord, ProcessorConfig};
use crate::models::issuer::Issuer;
use crate::models::registration::CredentialTypeDef;
use crate::models::schema::SchemaRecord;
use crate::storage::CredentialTypeStore;
use serde_json::Value;
use std::sync::Arc;

/// Credential format whose configuration omits the deprecated keys.
const VC_DI_FORMAT: &str = "vc_di";

/// Finds the schema a credential type definition binds to.
///
/// Scans the supplied candidate set and returns the first schema whose
/// `(name, version, origin_did)` exactly equals the definition's declared
/// `(schema, version)` and the issuer's DID. No fuzzy matching, no
/// case-folding. Duplicate triples in the candidate set indicate an
/// upstream integrity issue; first match wins.
///
/// # Returns
/// - `Some(schema)` on an exact match
/// - `None` when no candidate matches
pub fn find_matching_schema<'a>(
    issuer_did: &str,
    schemas: &'a [SchemaRecord],
    def: &CredentialTypeDef,
) -> Option<&'a SchemaRecord> {
    schemas.iter().find(|schema| {
        schema.name == def.schema && schema.version == def.version && schema.origin_did == issuer_did
    })
}

/// Builds the normalized processor configuration for a definition.
///
/// Pure function. Copies the configuration fields forward verbatim,
/// preserving absence as null, then applies the format-conditional
/// suppression: for the "vc_di" format the deprecated `cardinality_fields`
/// and `mapping` keys are dropped entirely when they carry no value. Older
/// formats keep both keys present (null if unset) because downstream
/// consumers branch on key presence.
pub fn build_processor_config(def: &CredentialTypeDef) -> ProcessorConfig {
    let mut config = ProcessorConfig {
        cardinality_fields: Some(def.cardinality_fields.clone().unwrap_or(Value::Null)),
        cardinality: def.cardinality.clone().unwrap_or(Value::Null),
        credential: def.credential.clone().unwrap_or(Value::Null),
        mapping: Some(def.mapping.clone().unwrap_or(Value::Null)),
        mappings: def.mappings.clone().unwrap_or(Value::Null),
        topic: Value::Array(def.topic.clone()),
    };

    if def.format.as_deref() == Some(VC_DI_FORMAT) {
        if config.cardinality_fields.as_ref().is_some_and(is_empty_value) {
            config.cardinality_fields = None;
        }
        if config.mapping.as_ref().is_some_and(is_empty_value) {
            config.mapping = None;
        }
    }

    config
}

/// Whether a JSON value counts as "no value" for deprecated-key suppression.
///
/// Null, empty strings, empty collections, `false` and `0` are all empty,
/// matching the truthiness rules legacy producers relied on.
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(entries) => entries.is_empty(),
    }
}

/// Manages credential type records for registered issuers.
pub struct CredentialTypeManager {
    /// Store the records are upserted through
    store: Arc<dyn CredentialTypeStore>,
}

impl CredentialTypeManager {
    /// Creates a manager persisting through the given store.
    pub fn new(store: Arc<dyn CredentialTypeStore>) -> Self {
        CredentialTypeManager { store }
    }

    /// Reconciles the declared credential types of one registration.
    ///
    /// For each definition, in input order: resolve the matching schema
    /// (nullable), get-or-create the record for the `(schema, issuer)`
    /// pair, overwrite every denormalized field and the processor
    /// configuration, persist.
    ///
    /// # Guarantees
    /// The result has exactly one record per input definition, in input
    /// order. Two definitions resolving to the same pair update the same
    /// stored record sequentially; the second one wins.
    ///
    /// # Errors
    /// Storage failures propagate immediately; no partial-commit guarantee
    /// is made for the batch.
    pub fn update_credential_types(
        &self,
        issuer: &Issuer,
        schemas: &[SchemaRecord],
        defs: &[CredentialTypeDef],
    ) -> Result<Vec<CredentialTypeRecord>, RegistryError> {
        let mut credential_types = Vec::with_capacity(defs.len());

        for def in defs {
            let schema = find_matching_schema(&issuer.did, schemas, def);
            if schema.is_none() {
                log::warn!(
                    "no registered schema matches {}/{} for issuer {}; storing orphaned credential type",
                    def.schema,
                    def.version,
                    issuer.did
                );
            }

            let mut record = self
                .store
                .get_or_create(schema.map(|schema| schema.id), issuer.id)?;

            record.processor_config = build_processor_config(def);
            record.credential_title = def.credential_title.clone();
            record.description = def.name.clone();
            record.schema_label = def.labels.clone();
            record.category_labels = def.category_labels.clone();
            record.claim_labels = def.claim_labels.clone();
            record.claim_descriptions = def.claim_descriptions.clone();
            record.logo_b64 = def.logo_b64.clone();
            record.url = def.endpoint.clone();
            record.credential_def_id = def.credential_def_id.clone();
            record.highlighted_attributes = def.highlighted_attributes.clone();
            record.format = def.format.clone();
            record.raw_data = def.raw_data.clone();

            let record = self.store.persist(record)?;
            credential_types.push(record);
        }

        Ok(credential_types)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryRegistry;
    use serde_json::json;

    /// Builds a definition from a JSON literal, as the wire would.
    fn def_from(value: Value) -> CredentialTypeDef {
        serde_json::from_value(value).unwrap()
    }

    fn test_def(format: Option<&str>) -> CredentialTypeDef {
        let mut value = json!({
            "schema": "cred-a",
            "version": "1.0",
            "name": "Registration credential",
            "credential_title": "Registration",
            "labels": {"en": "Registration"},
            "credential_def_id": "cd-1",
            "endpoint": "https://acme.example/cred-a",
            "topic": [
                {"source_id": {"from": "claim", "input": "registration_id"}}
            ],
            "mappings": [
                {
                    "model": "attribute",
                    "fields": {
                        "value": {"from": "claim", "input": "entity_status"}
                    }
                }
            ]
        });
        if let Some(format) = format {
            value["format"] = json!(format);
        }
        def_from(value)
    }

    fn test_issuer() -> Issuer {
        let mut issuer = Issuer::new(1, "did:sov:issuer-1".to_string());
        issuer.name = "Acme Registrar".to_string();
        issuer
    }

    fn test_schema(id: u64) -> SchemaRecord {
        SchemaRecord {
            id,
            name: "cred-a".to_string(),
            version: "1.0".to_string(),
            origin_did: "did:sov:issuer-1".to_string(),
        }
    }

    #[test]
    fn test_find_matching_schema_exact_triple() {
        let schemas = vec![test_schema(7)];
        let def = test_def(None);

        let matched = find_matching_schema("did:sov:issuer-1", &schemas, &def);
        assert_eq!(matched.map(|schema| schema.id), Some(7));
    }

    #[test]
    fn test_find_matching_schema_wrong_issuer() {
        let schemas = vec![test_schema(7)];
        let def = test_def(None);

        assert!(find_matching_schema("did:sov:issuer-2", &schemas, &def).is_none());
    }

    #[test]
    fn test_find_matching_schema_wrong_version() {
        let mut schema = test_schema(7);
        schema.version = "2.0".to_string();
        let def = test_def(None);

        assert!(find_matching_schema("did:sov:issuer-1", &[schema], &def).is_none());
    }

    #[test]
    fn test_build_processor_config_is_idempotent() {
        let def = test_def(Some("vc_di"));

        assert_eq!(build_processor_config(&def), build_processor_config(&def));
    }

    #[test]
    fn test_legacy_format_keeps_deprecated_keys_as_null() {
        let config = build_processor_config(&test_def(Some("anoncreds")));

        let serialized = serde_json::to_value(&config).unwrap();
        let keys = serialized.as_object().unwrap();
        assert_eq!(keys["cardinality_fields"], Value::Null);
        assert_eq!(keys["mapping"], Value::Null);
        assert!(keys.contains_key("mappings"));
        assert!(keys.contains_key("topic"));
    }

    #[test]
    fn test_vc_di_suppresses_empty_deprecated_keys() {
        let mut def = test_def(Some("vc_di"));
        def.cardinality_fields = None;
        def.mapping = Some(json!([]));

        let serialized = serde_json::to_value(build_processor_config(&def)).unwrap();
        let keys = serialized.as_object().unwrap();
        assert!(!keys.contains_key("cardinality_fields"));
        assert!(!keys.contains_key("mapping"));
        assert!(keys.contains_key("cardinality"));
        assert!(keys.contains_key("credential"));
        assert!(keys.contains_key("mappings"));
        assert!(keys.contains_key("topic"));
    }

    #[test]
    fn test_vc_di_keeps_populated_deprecated_keys() {
        let mut def = test_def(Some("vc_di"));
        def.cardinality_fields = Some(json!(["registration_id"]));
        def.mapping = Some(json!([
            {
                "model": "attribute",
                "fields": {"value": {"from": "claim", "input": "entity_status"}}
            }
        ]));

        let config = build_processor_config(&def);
        assert_eq!(config.cardinality_fields, Some(json!(["registration_id"])));
        assert!(config.mapping.is_some());
    }

    #[test]
    fn test_update_credential_types_creates_record() {
        let store = Arc::new(MemoryRegistry::new());
        let manager = CredentialTypeManager::new(store);
        let issuer = test_issuer();
        let schemas = vec![test_schema(7)];

        let records = manager
            .update_credential_types(&issuer, &schemas, &[test_def(None)])
            .unwrap();

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.schema_id, Some(7));
        assert_eq!(record.issuer_id, issuer.id);
        assert_eq!(record.credential_def_id, "cd-1");
        assert_eq!(record.description.as_deref(), Some("Registration credential"));
        assert_eq!(record.credential_title.as_deref(), Some("Registration"));
        assert_eq!(record.schema_label, Some(json!({"en": "Registration"})));
        assert_eq!(record.url.as_deref(), Some("https://acme.example/cred-a"));
    }

    #[test]
    fn test_update_credential_types_upserts_same_pair() {
        let store = Arc::new(MemoryRegistry::new());
        let manager = CredentialTypeManager::new(store);
        let issuer = test_issuer();
        let schemas = vec![test_schema(7)];

        let first = manager
            .update_credential_types(&issuer, &schemas, &[test_def(None)])
            .unwrap();

        let mut updated = test_def(None);
        updated.credential_def_id = "cd-2".to_string();
        updated.credential_title = Some("Registration v2".to_string());
        let second = manager
            .update_credential_types(&issuer, &schemas, &[updated])
            .unwrap();

        // Same stored record, second registration's values win.
        assert_eq!(first[0].id, second[0].id);
        assert_eq!(second[0].credential_def_id, "cd-2");
        assert_eq!(second[0].credential_title.as_deref(), Some("Registration v2"));
    }

    #[test]
    fn test_update_credential_types_orphan_on_schema_miss() {
        let store = Arc::new(MemoryRegistry::new());
        let manager = CredentialTypeManager::new(store);
        let issuer = test_issuer();

        let records = manager
            .update_credential_types(&issuer, &[], &[test_def(None)])
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].schema_id, None);
    }

    #[test]
    fn test_one_record_per_definition_in_input_order() {
        let store = Arc::new(MemoryRegistry::new());
        let manager = CredentialTypeManager::new(store);
        let issuer = test_issuer();
        let schemas = vec![test_schema(7)];

        let mut second_def = test_def(None);
        second_def.schema = "cred-b".to_string();
        second_def.credential_def_id = "cd-2".to_string();

        let records = manager
            .update_credential_types(&issuer, &schemas, &[test_def(None), second_def])
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].credential_def_id, "cd-1");
        assert_eq!(records[1].credential_def_id, "cd-2");
        assert_eq!(records[1].schema_id, None);
    }
}
