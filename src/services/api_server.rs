// src/services/api_server.rs
//! API Server for the issuer registry.
//!
//! This module provides the REST interface in front of the registration
//! reconciliation core. The API is built using Axum and includes endpoints
//! for:
//! - Sending an issuer registration over a connection
//! - Registering connection records
//! - Registering credential schemas (stand-in for the schema-ingestion flow)
//!
//! The routes stay thin: payload validation and reconciliation live in the
//! services, status-code mapping and connection bookkeeping live here.

use crate::error::RegistryError;
use crate::services::outbound::OutboundSender;
use crate::services::registration::IssuerRegistrationService;
use crate::storage::connections::{ConnectionRecord, ConnectionRegistry, DIRECTION_SENT};
use crate::storage::SchemaStore;
use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;

// API request and response structures

/// Request payload for registering a connection
#[derive(Serialize, Deserialize)]
struct RegisterConnectionRequest {
    connection_id: String,
    their_label: Option<String>,
    endpoint: Option<String>,
    #[serde(default = "active_by_default")]
    is_active: bool,
}

fn active_by_default() -> bool {
    true
}

/// Response for connection registration
#[derive(Serialize, Deserialize)]
struct RegisterConnectionResponse {
    connection_id: String,
}

/// Request payload for registering a credential schema
#[derive(Serialize, Deserialize)]
struct RegisterSchemaRequest {
    name: String,
    version: String,
    origin_did: String,
}

/// API server state containing all service dependencies
pub struct ApiServer {
    /// Registration ingress service (validation + reconciliation)
    registration: Arc<IssuerRegistrationService>,

    /// Schema store behind the schema registration endpoint
    schemas: Arc<dyn SchemaStore>,

    /// Connection records and activity bookkeeping
    connections: Arc<ConnectionRegistry>,

    /// Fire-and-forget delivery of registration results
    outbound: Arc<OutboundSender>,
}

impl ApiServer {
    /// Creates a new instance of the API server
    ///
    /// # Arguments
    /// * `registration` - Service for registration processing
    /// * `schemas` - Store for schema records
    /// * `connections` - Registry of connection records
    /// * `outbound` - Sender for outbound result delivery
    pub fn new(
        registration: IssuerRegistrationService,
        schemas: Arc<dyn SchemaStore>,
        connections: ConnectionRegistry,
        outbound: OutboundSender,
    ) -> Self {
        ApiServer {
            registration: Arc::new(registration),
            schemas,
            connections: Arc::new(connections),
            outbound: Arc::new(outbound),
        }
    }

    /// Starts the API server and begins listening for requests
    ///
    /// # Arguments
    /// * `addr` - Socket address to bind to (e.g., "127.0.0.1:3000")
    pub async fn run(&self, addr: SocketAddr) -> anyhow::Result<()> {
        // Configure all API routes
        let app = Router::new()
            .route(
                "/issuer_registration/send",
                post(Self::send_registration_handler),
            )
            .route("/connections", post(Self::register_connection_handler))
            .route("/schemas", post(Self::register_schema_handler))
            .with_state(Arc::new(self.clone()));

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;
        Ok(())
    }

    // =====================
    // Registration Handlers
    // =====================

    /// Sends an issuer registration over a connection
    ///
    /// # Endpoint
    /// POST /issuer_registration/send
    ///
    /// # Request Body
    /// Registration message envelope (issuer_registration + connection_id)
    ///
    /// # Responses
    /// - 200 OK: echoes the serialized registration result
    /// - 400 Bad Request: payload failed validation (offending field named)
    /// - 404 Not Found: unknown connection
    /// - 503 Service Unavailable: connection is not active
    /// - 500 Internal Server Error: storage failure
    async fn send_registration_handler(
        State(state): State<Arc<ApiServer>>,
        Json(body): Json<Value>,
    ) -> impl IntoResponse {
        log::info!("issuer registration received: {}", body);

        let connection_id = body
            .get("connection_id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        // Resolve the connection first; without one the result has
        // nowhere to go.
        let connection = match state.connections.retrieve_by_id(&connection_id) {
            Ok(connection) => connection,
            Err(err) => {
                return (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": err.to_string() })),
                )
            }
        };
        if !connection.is_active {
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "error": format!("connection `{}` is not active", connection_id) })),
            );
        }

        match state.registration.handle_issuer(&body) {
            Ok(result) => {
                if let Some(endpoint) = &connection.endpoint {
                    state.outbound.send(endpoint, &connection_id, &result);
                }
                if let Err(err) = state.connections.log_activity(
                    &connection_id,
                    "issuer_registration",
                    DIRECTION_SENT,
                ) {
                    log::warn!("could not log activity for {}: {}", connection_id, err);
                }
                match serde_json::to_value(&result) {
                    Ok(serialized) => (StatusCode::OK, Json(serialized)),
                    Err(err) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({ "error": err.to_string() })),
                    ),
                }
            }
            Err(err @ RegistryError::Validation { .. }) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": err.to_string() })),
            ),
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": err.to_string() })),
            ),
        }
    }

    // =====================
    // Bookkeeping Handlers
    // =====================

    /// Registers a connection record
    ///
    /// # Endpoint
    /// POST /connections
    ///
    /// # Responses
    /// - 200 OK: returns the registered connection id
    /// - 500 Internal Server Error: registry failure
    async fn register_connection_handler(
        State(state): State<Arc<ApiServer>>,
        Json(payload): Json<RegisterConnectionRequest>,
    ) -> impl IntoResponse {
        let record = ConnectionRecord {
            connection_id: payload.connection_id.clone(),
            their_label: payload.their_label,
            endpoint: payload.endpoint,
            is_active: payload.is_active,
            activity: Vec::new(),
        };

        match state.connections.register(record) {
            Ok(()) => (
                StatusCode::OK,
                Json(RegisterConnectionResponse {
                    connection_id: payload.connection_id,
                }),
            ),
            Err(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(RegisterConnectionResponse {
                    connection_id: format!("Error: {}", e),
                }),
            ),
        }
    }

    /// Registers a credential schema record
    ///
    /// # Endpoint
    /// POST /schemas
    ///
    /// # Responses
    /// - 200 OK: returns the created schema record
    /// - 500 Internal Server Error: store failure
    async fn register_schema_handler(
        State(state): State<Arc<ApiServer>>,
        Json(payload): Json<RegisterSchemaRequest>,
    ) -> impl IntoResponse {
        match state
            .schemas
            .create(&payload.name, &payload.version, &payload.origin_did)
        {
            Ok(schema) => match serde_json::to_value(&schema) {
                Ok(serialized) => (StatusCode::OK, Json(serialized)),
                Err(err) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": err.to_string() })),
                ),
            },
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": err.to_string() })),
            ),
        }
    }
}

// Implement Clone for ApiServer to use with Axum's State
impl Clone for ApiServer {
    fn clone(&self) -> Self {
        ApiServer {
            registration: Arc::clone(&self.registration),
            schemas: Arc::clone(&self.schemas),
            connections: Arc::clone(&self.connections),
            outbound: Arc::clone(&self.outbound),
        }
    }
}
