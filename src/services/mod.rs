// src/services/mod.rs
//! Business logic and API surface of the issuer registry.

pub mod api_server;      // Axum routes
pub mod credential_type; // Credential type reconciliation
pub mod outbound;        // Fire-and-forget result delivery
pub mod registration;    // Registration ingress
pub mod validator;       // Payload schema validation
