// src/models/mod.rs
//! Data structures for the issuer registry.

pub mod credential_type; // Credential type records and processor configuration
pub mod issuer;          // Issuer records
pub mod registration;    // Wire payload types for registration messages
pub mod schema;          // Credential schema records
