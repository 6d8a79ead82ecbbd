// src/storage/memory.rs
//! In-memory registry store.
//!
//! HashMap-backed implementation of the issuer, schema and credential type
//! store interfaces. Interior mutability through a single mutex keeps the
//! store shareable across request handlers via `Arc`, and makes the
//! credential type get-or-create atomic, so concurrent registrations cannot
//! create duplicate records for one `(schema, issuer)` pair.
//!
//! # Note
//! For production use, back the store interfaces with a database and enforce
//! uniqueness of `(schema_id, issuer_id)` with a unique constraint.

use crate::error::RegistryError;
use crate::models::credential_type::CredentialTypeRecord;
use crate::models::issuer::Issuer;
use crate::models::schema::SchemaRecord;
use crate::storage::{CredentialTypeStore, IssuerStore, SchemaStore};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// In-memory record store backing all three registry store interfaces.
pub struct MemoryRegistry {
    inner: Mutex<RegistryData>,
}

/// Mutable store state behind the mutex.
#[derive(Default)]
struct RegistryData {
    next_id: u64,
    /// Issuer records keyed by DID
    issuers: HashMap<String, Issuer>,
    /// Schema records in creation order
    schemas: Vec<SchemaRecord>,
    /// Credential type records keyed by (schema_id, issuer_id)
    credential_types: HashMap<(Option<u64>, u64), CredentialTypeRecord>,
}

impl RegistryData {
    /// Hands out the next record identifier (shared across record kinds).
    fn assign_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl MemoryRegistry {
    /// Creates a new empty registry store.
    pub fn new() -> Self {
        MemoryRegistry {
            inner: Mutex::new(RegistryData::default()),
        }
    }

    /// Acquires the store mutex, converting poisoning into a storage error.
    fn lock(&self) -> Result<MutexGuard<'_, RegistryData>, RegistryError> {
        self.inner
            .lock()
            .map_err(|_| RegistryError::storage("registry store mutex poisoned"))
    }
}

impl Default for MemoryRegistry {
    fn default() -> Self {
        MemoryRegistry::new()
    }
}

impl IssuerStore for MemoryRegistry {
    fn get_or_create(&self, did: &str) -> Result<Issuer, RegistryError> {
        let mut data = self.lock()?;
        if let Some(issuer) = data.issuers.get(did) {
            return Ok(issuer.clone());
        }
        let id = data.assign_id();
        let issuer = Issuer::new(id, did.to_string());
        data.issuers.insert(did.to_string(), issuer.clone());
        Ok(issuer)
    }

    fn update(&self, issuer: &Issuer) -> Result<Issuer, RegistryError> {
        let mut data = self.lock()?;
        match data.issuers.get_mut(&issuer.did) {
            Some(stored) => {
                *stored = issuer.clone();
                Ok(stored.clone())
            }
            None => Err(RegistryError::storage(format!(
                "no issuer record for did `{}`",
                issuer.did
            ))),
        }
    }
}

impl SchemaStore for MemoryRegistry {
    fn create(
        &self,
        name: &str,
        version: &str,
        origin_did: &str,
    ) -> Result<SchemaRecord, RegistryError> {
        let mut data = self.lock()?;
        let id = data.assign_id();
        let schema = SchemaRecord {
            id,
            name: name.to_string(),
            version: version.to_string(),
            origin_did: origin_did.to_string(),
        };
        data.schemas.push(schema.clone());
        Ok(schema)
    }

    fn find_by_origin(&self, origin_did: &str) -> Result<Vec<SchemaRecord>, RegistryError> {
        let data = self.lock()?;
        Ok(data
            .schemas
            .iter()
            .filter(|schema| schema.origin_did == origin_did)
            .cloned()
            .collect())
    }
}

impl CredentialTypeStore for MemoryRegistry {
    fn get_or_create(
        &self,
        schema_id: Option<u64>,
        issuer_id: u64,
    ) -> Result<CredentialTypeRecord, RegistryError> {
        let mut data = self.lock()?;
        if let Some(record) = data.credential_types.get(&(schema_id, issuer_id)) {
            return Ok(record.clone());
        }
        let id = data.assign_id();
        let record = CredentialTypeRecord::new(id, schema_id, issuer_id);
        data.credential_types
            .insert((schema_id, issuer_id), record.clone());
        Ok(record)
    }

    fn persist(&self, record: CredentialTypeRecord) -> Result<CredentialTypeRecord, RegistryError> {
        let mut data = self.lock()?;
        data.credential_types
            .insert((record.schema_id, record.issuer_id), record.clone());
        Ok(record)
    }
}
