//! Ports for injected capabilities
//!
//! Domain crates declare the capabilities they consume (for example the
//! stock batch lookup used by dispensing) as traits extending
//! [`DomainPort`]. Adapters implement them: an in-memory fixture in tests,
//! an HTTP client or a database query in the host application.
//!
//! ```text
//!   domain_pharmacy ──uses──▶ BatchCatalog (port)
//!                                   ▲
//!                 ┌─────────────────┴─────────────────┐
//!         InMemoryBatchCatalog                 inventory service
//!          (fixtures, tests)                (host application adapter)
//! ```

use std::fmt;
use thiserror::Error;

/// Error type for port operations
///
/// Every adapter reports failures through this type so callers can treat an
/// in-memory catalog and a remote inventory service the same way.
#[derive(Debug, Error)]
pub enum PortError {
    /// The requested entity was not found
    #[error("Not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: String,
        id: String,
    },

    /// Connection to the underlying system failed
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PortError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// Creates a Connection error
    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true if re-fetching may succeed
    ///
    /// Nothing in the domain retries on its own; this only tells the caller
    /// whether asking the adapter again is worthwhile.
    pub fn is_transient(&self) -> bool {
        matches!(self, PortError::Connection { .. })
    }

    /// Returns true if this error indicates the entity was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }
}

/// Marker trait for all domain ports
pub trait DomainPort: Send + Sync + 'static {}
