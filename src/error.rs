// src/error.rs
//! Error types for the issuer registry service.
//!
//! Collects the failure modes of the registration pipeline into a single
//! enum so that services and route handlers can branch on them:
//! - `Validation`: malformed or incomplete registration payloads
//! - `Storage`: persistence failures from the record stores
//! - `ConnectionNotFound`: unknown connection identifiers at the API boundary
//!
//! A missed schema match is deliberately NOT an error: the reconciler keeps
//! the credential type with a null schema association until the schema is
//! registered.

use thiserror::Error;

/// Errors produced by the issuer registry services.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The registration payload failed schema validation.
    ///
    /// `field` names the first offending field path, e.g. "did",
    /// "issuer_registration" or "credential_def_id".
    #[error("validation failed on field `{field}`")]
    Validation {
        /// First offending field path in the payload
        field: String,
    },

    /// A record store failed a read or write.
    ///
    /// Fatal for the current message's batch; no partial rollback is
    /// attempted at this layer.
    #[error("storage failure: {reason}")]
    Storage {
        /// Store-supplied failure description
        reason: String,
    },

    /// No connection record exists for the given identifier.
    #[error("connection `{0}` not found")]
    ConnectionNotFound(String),
}

impl RegistryError {
    /// Builds a validation error naming the offending field path.
    pub fn validation(field: impl Into<String>) -> Self {
        RegistryError::Validation {
            field: field.into(),
        }
    }

    /// Builds a storage error from a displayable reason.
    pub fn storage(reason: impl Into<String>) -> Self {
        RegistryError::Storage {
            reason: reason.into(),
        }
    }
}
