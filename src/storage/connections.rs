// src/storage/connections.rs
//! Connection record bookkeeping.
//!
//! Registrations are sent over previously established connections. This
//! module keeps the connection records the API boundary needs: an optional
//! delivery endpoint, an active flag, and a log of message activity. The
//! reconciliation core never reads these records.

use crate::error::RegistryError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Activity direction for messages sent over a connection.
pub const DIRECTION_SENT: &str = "sent";

/// One logged message activity on a connection.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ActivityRecord {
    /// Kind of message, e.g. "issuer_registration"
    pub activity_type: String,

    /// Message direction, e.g. [`DIRECTION_SENT`]
    pub direction: String,

    /// When the activity was logged
    pub at: DateTime<Utc>,
}

/// A registered connection to a remote agent.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ConnectionRecord {
    /// Unique connection identifier
    pub connection_id: String,

    /// Display label the remote agent announced
    pub their_label: Option<String>,

    /// HTTP endpoint registration results are delivered to
    pub endpoint: Option<String>,

    /// Whether the connection is currently usable for sending
    pub is_active: bool,

    /// Logged message activity, oldest first
    pub activity: Vec<ActivityRecord>,
}

/// In-memory registry of connection records.
pub struct ConnectionRegistry {
    connections: Mutex<HashMap<String, ConnectionRecord>>,
}

impl ConnectionRegistry {
    /// Creates a new empty connection registry.
    pub fn new() -> Self {
        ConnectionRegistry {
            connections: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, ConnectionRecord>>, RegistryError> {
        self.connections
            .lock()
            .map_err(|_| RegistryError::storage("connection registry mutex poisoned"))
    }

    /// Registers a connection, overwriting any record with the same id.
    pub fn register(&self, record: ConnectionRecord) -> Result<(), RegistryError> {
        let mut connections = self.lock()?;
        connections.insert(record.connection_id.clone(), record);
        Ok(())
    }

    /// Retrieves a connection record by its identifier.
    ///
    /// # Errors
    /// `RegistryError::ConnectionNotFound` when no record exists.
    pub fn retrieve_by_id(&self, connection_id: &str) -> Result<ConnectionRecord, RegistryError> {
        let connections = self.lock()?;
        connections
            .get(connection_id)
            .cloned()
            .ok_or_else(|| RegistryError::ConnectionNotFound(connection_id.to_string()))
    }

    /// Appends an activity entry to a connection's log.
    pub fn log_activity(
        &self,
        connection_id: &str,
        activity_type: &str,
        direction: &str,
    ) -> Result<(), RegistryError> {
        let mut connections = self.lock()?;
        let record = connections
            .get_mut(connection_id)
            .ok_or_else(|| RegistryError::ConnectionNotFound(connection_id.to_string()))?;
        record.activity.push(ActivityRecord {
            activity_type: activity_type.to_string(),
            direction: direction.to_string(),
            at: Utc::now(),
        });
        Ok(())
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        ConnectionRegistry::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_connection(id: &str) -> ConnectionRecord {
        ConnectionRecord {
            connection_id: id.to_string(),
            their_label: Some("remote agent".to_string()),
            endpoint: None,
            is_active: true,
            activity: Vec::new(),
        }
    }

    #[test]
    fn test_register_and_retrieve() {
        let registry = ConnectionRegistry::new();
        registry.register(test_connection("conn-1")).unwrap();

        let record = registry.retrieve_by_id("conn-1").unwrap();
        assert!(record.is_active);
        assert_eq!(record.their_label.as_deref(), Some("remote agent"));
    }

    #[test]
    fn test_retrieve_unknown_connection() {
        let registry = ConnectionRegistry::new();

        let err = registry.retrieve_by_id("missing").unwrap_err();
        assert!(matches!(err, RegistryError::ConnectionNotFound(_)));
    }

    #[test]
    fn test_log_activity_appends_in_order() {
        let registry = ConnectionRegistry::new();
        registry.register(test_connection("conn-1")).unwrap();

        registry
            .log_activity("conn-1", "issuer_registration", DIRECTION_SENT)
            .unwrap();
        registry
            .log_activity("conn-1", "issuer_registration", DIRECTION_SENT)
            .unwrap();

        let record = registry.retrieve_by_id("conn-1").unwrap();
        assert_eq!(record.activity.len(), 2);
        assert_eq!(record.activity[0].activity_type, "issuer_registration");
        assert_eq!(record.activity[1].direction, DIRECTION_SENT);
    }
}
