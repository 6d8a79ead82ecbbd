// src/storage/mod.rs
//! Storage layer for the issuer registry.
//!
//! Defines the collaborator interfaces the reconciliation core persists
//! through, plus in-memory implementations. The interfaces are what a
//! database-backed deployment would implement; the core itself never touches
//! a storage engine directly.

pub mod connections; // Connection records and activity bookkeeping
pub mod memory;      // HashMap-backed record store

use crate::error::RegistryError;
use crate::models::credential_type::CredentialTypeRecord;
use crate::models::issuer::Issuer;
use crate::models::schema::SchemaRecord;

/// Store of issuer records, keyed by DID.
pub trait IssuerStore: Send + Sync {
    /// Returns the issuer registered under `did`, creating an empty record
    /// when the DID is seen for the first time.
    fn get_or_create(&self, did: &str) -> Result<Issuer, RegistryError>;

    /// Persists updated scalar fields of an existing issuer record.
    fn update(&self, issuer: &Issuer) -> Result<Issuer, RegistryError>;
}

/// Store of credential schema records.
pub trait SchemaStore: Send + Sync {
    /// Creates a schema record for the `(name, version, origin_did)` triple.
    ///
    /// Duplicate triples indicate an upstream data integrity issue and are
    /// not guarded against here.
    fn create(
        &self,
        name: &str,
        version: &str,
        origin_did: &str,
    ) -> Result<SchemaRecord, RegistryError>;

    /// Lists the known schemas originated by `origin_did`, used as the
    /// candidate set for schema matching.
    fn find_by_origin(&self, origin_did: &str) -> Result<Vec<SchemaRecord>, RegistryError>;
}

/// Store of credential type records, keyed by `(schema_id, issuer_id)`.
pub trait CredentialTypeStore: Send + Sync {
    /// Returns the record for the `(schema, issuer)` pair, creating an empty
    /// one when absent. Implementations must keep at most one record per
    /// pair.
    fn get_or_create(
        &self,
        schema_id: Option<u64>,
        issuer_id: u64,
    ) -> Result<CredentialTypeRecord, RegistryError>;

    /// Persists a record previously obtained from `get_or_create`,
    /// overwriting the stored copy in full.
    fn persist(&self, record: CredentialTypeRecord) -> Result<CredentialTypeRecord, RegistryError>;
}
