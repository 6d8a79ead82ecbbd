// src/models/credential_type.rs
//! Credential type record and processor configuration data models.
//!
//! A credential type is an issuer-specific binding of a schema to
//! presentation and processing metadata. At most one record exists per
//! `(schema, issuer)` pair; every registration message referencing the pair
//! overwrites the record in full (last write wins, no merge).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Normalized processing configuration embedded in a credential type record.
///
/// Consumed by the downstream credential-processing pipeline; stored as an
/// opaque, forward-compatible blob and never validated here.
///
/// `cardinality_fields` and `mapping` are deprecated in favor of
/// `cardinality` and `mappings`. For the "vc_di" format the deprecated keys
/// are omitted from the serialized configuration when they carry no value;
/// for every older format they stay present (null if unset) because
/// downstream consumers still branch on key presence. Presence is therefore
/// modelled explicitly: `None` on the optional fields means "key absent",
/// `Some(Value::Null)` means "key present with null".
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ProcessorConfig {
    /// Deprecated cardinality descriptor; `None` omits the key entirely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cardinality_fields: Option<Value>,

    /// Current cardinality descriptor, null when the definition omits it
    #[serde(default)]
    pub cardinality: Value,

    /// Nested credential block (e.g. effective date extraction rule)
    #[serde(default)]
    pub credential: Value,

    /// Deprecated field-transform rules; `None` omits the key entirely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapping: Option<Value>,

    /// Current field-transform rules, null when the definition omits them
    #[serde(default)]
    pub mappings: Value,

    /// Topic-binding rules
    #[serde(default)]
    pub topic: Value,
}

/// A stored credential type record.
///
/// # Keying
/// Keyed by `(schema_id, issuer_id)`. The schema association is nullable:
/// a definition whose schema has not been registered yet is stored as an
/// orphan and becomes resolvable once the schema arrives.
///
/// # Lifecycle
/// Created on first sighting of a `(schema, issuer)` pair, updated (never
/// deleted) on every subsequent registration referencing that pair.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CredentialTypeRecord {
    /// Store-assigned record identifier
    pub id: u64,

    /// Matched schema record, if any
    pub schema_id: Option<u64>,

    /// Owning issuer record
    pub issuer_id: u64,

    /// Normalized configuration for the credential-processing pipeline
    pub processor_config: ProcessorConfig,

    /// Display title of the credential type
    pub credential_title: Option<String>,

    /// Description (the definition's declared name)
    pub description: Option<String>,

    /// Schema display label(s)
    pub schema_label: Option<Value>,

    /// Category labels keyed by locale
    pub category_labels: Option<Value>,

    /// Claim labels keyed by locale
    pub claim_labels: Option<Value>,

    /// Claim descriptions keyed by locale
    pub claim_descriptions: Option<Value>,

    /// Credential type logo as base64-encoded text
    pub logo_b64: Option<String>,

    /// Informational URL (the definition's declared endpoint)
    pub url: Option<String>,

    /// Stable external identifier of the credential definition
    pub credential_def_id: String,

    /// Attributes to highlight when presenting credentials of this type
    pub highlighted_attributes: Option<Value>,

    /// Credential format
    /// Example: "vc_di"
    pub format: Option<String>,

    /// Raw definition payload retained for audit/debugging
    pub raw_data: Option<Value>,
}

impl CredentialTypeRecord {
    /// Creates an empty record associated to the given `(schema, issuer)`
    /// pair.
    ///
    /// All denormalized fields start unset; the reconciler overwrites them
    /// from the registration definition before the record is persisted.
    pub fn new(id: u64, schema_id: Option<u64>, issuer_id: u64) -> Self {
        CredentialTypeRecord {
            id,
            schema_id,
            issuer_id,
            processor_config: ProcessorConfig::default(),
            credential_title: None,
            description: None,
            schema_label: None,
            category_labels: None,
            claim_labels: None,
            claim_descriptions: None,
            logo_b64: None,
            url: None,
            credential_def_id: String::new(),
            highlighted_attributes: None,
            format: None,
            raw_data: None,
        }
    }
}
