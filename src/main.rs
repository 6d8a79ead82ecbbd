// src/main.rs

//! # Issuer Registry - Main Entry Point
//!
//! This module serves as the main entry point for the verifiable-credential
//! issuer registry. It initializes all core components and starts the API
//! server.
//!
//! ## Architecture Overview
//! 1. **Services Layer**: Registration validation, credential type
//!    reconciliation, outbound delivery, and API endpoints
//! 2. **Storage Layer**: Record stores for issuers, schemas and credential
//!    types, plus connection bookkeeping
//! 3. **Models Layer**: Wire payload types and stored records
//!
//! ## Environment Variables
//! - `REGISTRY_BIND`: (Optional) Socket address to listen on
//!   (default: 127.0.0.1:3000)
//! - `RUST_LOG`: (Optional) Log filter consumed by env_logger

use crate::services::api_server::ApiServer;
use crate::services::outbound::OutboundSender;
use crate::services::registration::IssuerRegistrationService;
use crate::storage::connections::ConnectionRegistry;
use crate::storage::memory::MemoryRegistry;
use dotenv::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;

// Module declarations (organized by functional domain)
mod error;    // Failure taxonomy
mod models;   // Data structures
mod services; // Business logic and API
mod storage;  // Record stores and connection bookkeeping
mod utils;    // Helper functions

/// Main application entry point
///
/// # Initialization Sequence
/// 1. Load environment configuration
/// 2. Initialize logging
/// 3. Wire up stores and service components
/// 4. Start API server
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();
    env_logger::init();

    let bind = std::env::var("REGISTRY_BIND").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    let addr: SocketAddr = bind.parse()?;

    // One in-memory store backs all three registry store interfaces
    let store = Arc::new(MemoryRegistry::new());

    let registration = IssuerRegistrationService::new(store.clone(), store.clone(), store.clone());

    // Initialize API Server with all dependencies
    let api_server = ApiServer::new(
        registration,
        store,
        ConnectionRegistry::new(),
        OutboundSender::new(),
    );

    // Start the HTTP server
    println!("API server running at http://{}", addr);
    println!("Available endpoints:");
    println!("- POST /issuer_registration/send");
    println!("- POST /connections");
    println!("- POST /schemas");

    api_server.run(addr).await
}
