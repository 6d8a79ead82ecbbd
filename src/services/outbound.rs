// src/services/outbound.rs
//! Outbound delivery of registration results.
//!
//! Posts the serialized registration result to a connection's endpoint.
//! Delivery is fire-and-forget from the registry's perspective: it runs on
//! a spawned task, and failures are logged rather than surfaced to the
//! route that triggered the send.

use crate::services::registration::IssuerRegistrationResult;
use crate::utils::serialization::serialize;
use std::sync::Arc;

/// Fire-and-forget sender for registration results.
#[derive(Clone)]
pub struct OutboundSender {
    /// Shared HTTP client (connection pooling across sends)
    client: Arc<reqwest::Client>,
}

impl OutboundSender {
    /// Creates a sender with a default HTTP client.
    pub fn new() -> Self {
        OutboundSender {
            client: Arc::new(reqwest::Client::new()),
        }
    }

    /// Delivers a registration result to a connection endpoint.
    ///
    /// # Arguments
    /// * `endpoint` - HTTP endpoint registered for the connection
    /// * `connection_id` - Connection the result belongs to (for logging)
    /// * `result` - Registration result to serialize and post
    ///
    /// Returns immediately; the POST happens on a background task.
    pub fn send(&self, endpoint: &str, connection_id: &str, result: &IssuerRegistrationResult) {
        let payload = match serialize(result) {
            Ok(payload) => payload,
            Err(err) => {
                log::error!(
                    "failed to serialize registration result for connection {}: {}",
                    connection_id,
                    err
                );
                return;
            }
        };

        let client = self.client.clone();
        let endpoint = endpoint.to_string();
        let connection_id = connection_id.to_string();
        tokio::spawn(async move {
            let response = client
                .post(&endpoint)
                .header("content-type", "application/json")
                .body(payload)
                .send()
                .await;
            match response {
                Ok(response) => log::debug!(
                    "delivered registration result for connection {} to {} ({})",
                    connection_id,
                    endpoint,
                    response.status()
                ),
                Err(err) => log::warn!(
                    "delivery of registration result for connection {} to {} failed: {}",
                    connection_id,
                    endpoint,
                    err
                ),
            }
        });
    }
}

impl Default for OutboundSender {
    fn default() -> Self {
        OutboundSender::new()
    }
}
