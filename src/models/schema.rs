// src/models/schema.rs
//! Credential schema record data model.
//!
//! A schema is a named, versioned description of a credential's claims,
//! scoped to the DID of the authority that originated it. Schema records are
//! created by the schema-ingestion flow before credential types referencing
//! them are reconciled; the reconciliation core only reads them.

use serde::{Deserialize, Serialize};

/// A previously registered credential schema.
///
/// Uniquely identified by the triple `(name, version, origin_did)`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SchemaRecord {
    /// Store-assigned record identifier
    pub id: u64,

    /// Schema name
    /// Example: "registration.registries.ca"
    pub name: String,

    /// Schema version
    /// Example: "1.0.42"
    pub version: String,

    /// DID of the authority that originated the schema
    pub origin_did: String,
}
