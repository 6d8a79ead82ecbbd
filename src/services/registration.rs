// src/services/registration.rs
//! Issuer registration ingress.
//!
//! Thin boundary between the raw registration payload and the
//! reconciliation core: validates the payload, upserts the issuer record,
//! and — when the message declares credential types — runs the credential
//! type reconciliation against the issuer's known schemas. Messages that
//! carry only issuer identity are metadata updates and skip reconciliation
//! entirely.

use crate::error::RegistryError;
use crate::models::credential_type::CredentialTypeRecord;
use crate::models::issuer::Issuer;
use crate::models::registration::IssuerDef;
use crate::models::schema::SchemaRecord;
use crate::services::credential_type::CredentialTypeManager;
use crate::services::validator::validate_registration;
use crate::storage::{CredentialTypeStore, IssuerStore, SchemaStore};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Outcome of one issuer registration message.
///
/// `schemas` and `credential_types` are null for issuer-metadata-only
/// updates; otherwise they carry the issuer's known schemas and the
/// reconciled records, one per declared definition, in input order.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct IssuerRegistrationResult {
    /// The upserted issuer record
    pub issuer: Issuer,

    /// Known schemas of the issuer, when credential types were declared
    pub schemas: Option<Vec<SchemaRecord>>,

    /// Reconciled credential type records, when declared
    pub credential_types: Option<Vec<CredentialTypeRecord>>,
}

/// Service processing inbound issuer registration messages.
pub struct IssuerRegistrationService {
    /// Issuer records, keyed by DID
    issuers: Arc<dyn IssuerStore>,

    /// Schema records, the candidate set for matching
    schemas: Arc<dyn SchemaStore>,

    /// Credential type reconciliation
    credential_types: CredentialTypeManager,
}

impl IssuerRegistrationService {
    /// Creates the service on top of the given collaborator stores.
    pub fn new(
        issuers: Arc<dyn IssuerStore>,
        schemas: Arc<dyn SchemaStore>,
        credential_type_store: Arc<dyn CredentialTypeStore>,
    ) -> Self {
        IssuerRegistrationService {
            issuers,
            schemas,
            credential_types: CredentialTypeManager::new(credential_type_store),
        }
    }

    /// Processes one raw registration message.
    ///
    /// # Process Flow
    /// 1. Validate and deserialize the payload
    /// 2. Upsert the issuer and its denormalized metadata
    /// 3. Without declared credential types, return an issuer-only result
    /// 4. Otherwise reconcile each definition against the issuer's known
    ///    schemas and return the full result
    ///
    /// # Errors
    /// Validation and storage errors propagate unmodified; nothing is
    /// translated or swallowed at this boundary.
    pub fn handle_issuer(&self, raw: &Value) -> Result<IssuerRegistrationResult, RegistryError> {
        let message = validate_registration(raw)?;
        let registration = message.issuer_registration;

        let issuer = self.register_issuer(&registration.issuer)?;

        let defs = match registration.credential_types {
            Some(defs) => defs,
            None => {
                log::info!("issuer-only registration for {}", issuer.did);
                return Ok(IssuerRegistrationResult {
                    issuer,
                    schemas: None,
                    credential_types: None,
                });
            }
        };

        let known_schemas = self.schemas.find_by_origin(&issuer.did)?;
        log::info!(
            "reconciling {} credential type(s) for {} against {} known schema(s)",
            defs.len(),
            issuer.did,
            known_schemas.len()
        );
        let credential_types =
            self.credential_types
                .update_credential_types(&issuer, &known_schemas, &defs)?;

        Ok(IssuerRegistrationResult {
            issuer,
            schemas: Some(known_schemas),
            credential_types: Some(credential_types),
        })
    }

    /// Get-or-creates the issuer and overwrites its denormalized fields.
    fn register_issuer(&self, def: &IssuerDef) -> Result<Issuer, RegistryError> {
        let mut issuer = self.issuers.get_or_create(&def.did)?;
        issuer.name = def.name.clone();
        issuer.abbreviation = def.abbreviation.clone();
        issuer.email = def.email.clone();
        issuer.url = def.url.clone();
        issuer.endpoint = def.endpoint.clone();
        issuer.logo_b64 = def.logo_b64.clone();
        self.issuers.update(&issuer)
    }
}
