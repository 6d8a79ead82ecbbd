// src/models/registration.rs
//! Wire payload types for issuer registration messages.
//!
//! Mirrors the JSON shape of an inbound registration. Regions the
//! downstream pipeline treats as opaque (labels, cardinality descriptors,
//! raw data, topic/mapping rule bodies) stay as `serde_json::Value` so they
//! are carried verbatim into the processor configuration. The structured
//! shapes the validator enforces on those regions (`CredentialMapping`,
//! `MappingEntry`, `TopicDef`, `CredentialSpec`) are defined alongside.
//!
//! The wire names `from` and `type` are reserved words in Rust, so the
//! corresponding struct fields are aliased with serde rename attributes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top-level registration message envelope.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct IssuerRegistrationMessage {
    /// Registration body
    pub issuer_registration: IssuerRegistration,

    /// Identifier of the connection the registration is sent over
    pub connection_id: String,
}

/// Registration body: issuer identity plus declared credential types.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct IssuerRegistration {
    /// Issuer identity sub-message
    pub issuer: IssuerDef,

    /// Declared credential types; absent for issuer-metadata-only updates
    #[serde(default)]
    pub credential_types: Option<Vec<CredentialTypeDef>>,
}

/// Issuer identity sub-message.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct IssuerDef {
    /// Decentralized identifier of the issuer
    pub did: String,

    /// Human-readable issuer name
    pub name: String,

    /// Short display abbreviation
    #[serde(default)]
    pub abbreviation: Option<String>,

    /// Contact email address
    #[serde(default)]
    pub email: Option<String>,

    /// Informational website URL
    #[serde(default)]
    pub url: Option<String>,

    /// Agent endpoint used for message delivery
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Issuer logo as base64-encoded text
    #[serde(default)]
    pub logo_b64: Option<String>,
}

/// One declared credential type.
///
/// Carries both legacy (`mapping`, `cardinality_fields`) and current
/// (`mappings`, `cardinality`) field names; the processor config builder
/// normalizes between them. The rule bodies are kept as raw JSON so the
/// stored configuration preserves them byte-for-byte, including fields this
/// service does not know about.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CredentialTypeDef {
    /// Name of the schema the credential type binds to
    pub schema: String,

    /// Version of the schema the credential type binds to
    pub version: String,

    /// Declared name, stored as the record's description
    #[serde(default)]
    pub name: Option<String>,

    /// Free-form description text
    #[serde(default)]
    pub description: Option<String>,

    /// Display title of the credential type
    #[serde(default)]
    pub credential_title: Option<String>,

    /// Schema display label(s)
    #[serde(default)]
    pub labels: Option<Value>,

    /// Credential format, e.g. "vc_di"
    #[serde(default)]
    pub format: Option<String>,

    /// Nested credential block (validated against [`CredentialSpec`])
    #[serde(default)]
    pub credential: Option<Value>,

    /// Deprecated field-transform rules (superseded by `mappings`)
    #[serde(default)]
    pub mapping: Option<Value>,

    /// Current field-transform rules
    #[serde(default)]
    pub mappings: Option<Value>,

    /// Deprecated cardinality descriptor (superseded by `cardinality`)
    #[serde(default)]
    pub cardinality_fields: Option<Value>,

    /// Current cardinality descriptor
    #[serde(default)]
    pub cardinality: Option<Value>,

    /// Topic-binding rules; at least one is required
    pub topic: Vec<Value>,

    /// Category labels keyed by locale
    #[serde(default)]
    pub category_labels: Option<Value>,

    /// Claim labels keyed by locale
    #[serde(default)]
    pub claim_labels: Option<Value>,

    /// Claim descriptions keyed by locale
    #[serde(default)]
    pub claim_descriptions: Option<Value>,

    /// Credential type logo as base64-encoded text
    #[serde(default)]
    pub logo_b64: Option<String>,

    /// Stable external identifier of the credential definition
    pub credential_def_id: String,

    /// Informational endpoint, stored as the record's URL
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Attributes to highlight when presenting credentials of this type
    #[serde(default)]
    pub highlighted_attributes: Option<Value>,

    /// Raw definition payload retained for audit/debugging
    #[serde(default)]
    pub raw_data: Option<Value>,
}

/// A claim extraction rule: which source field feeds which processor input.
///
/// Exactly two string fields. The wire names are `from` and `input`; `from`
/// is a Rust keyword, hence the internal alias.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CredentialMapping {
    /// Source claim the value is taken from
    #[serde(rename = "from")]
    pub source: String,

    /// Processor input the value feeds
    pub input: String,
}

/// Nested credential block: extraction rules for credential-level fields.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CredentialSpec {
    /// Rule extracting the credential's effective date
    pub effective_date: CredentialMapping,
}

/// One field-transform rule of a `mapping`/`mappings` list.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MappingEntry {
    /// Per-field extraction rules
    pub fields: MappingFields,

    /// Target model the transformed fields populate
    pub model: String,
}

/// Extraction rules for the fields of a mapping entry.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MappingFields {
    /// Rule extracting the field format
    #[serde(default)]
    pub format: Option<CredentialMapping>,

    /// Rule extracting the field type; wire name `type` is a Rust keyword
    #[serde(default, rename = "type")]
    pub field_type: Option<CredentialMapping>,

    /// Rule extracting the field value
    #[serde(default)]
    pub value: Option<CredentialMapping>,
}

/// One topic-binding rule: how credentials of this type attach to topics.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TopicDef {
    /// Rule extracting the topic source identifier
    #[serde(default)]
    pub source_id: Option<CredentialMapping>,

    /// Rule extracting the topic type; wire name `type` is a Rust keyword
    #[serde(default, rename = "type")]
    pub topic_type: Option<CredentialMapping>,

    /// Rule extracting the topic display name
    #[serde(default)]
    pub name: Option<CredentialMapping>,

    /// Rule extracting a related topic's source identifier
    #[serde(default)]
    pub related_source_id: Option<CredentialMapping>,

    /// Rule extracting a related topic's type
    #[serde(default)]
    pub related_type: Option<CredentialMapping>,

    /// Rule extracting a related topic's display name
    #[serde(default)]
    pub related_name: Option<CredentialMapping>,
}
