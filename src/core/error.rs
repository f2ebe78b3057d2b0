//! Typed error handling for the collection pipeline
//!
//! Remote failures are caught at the fetcher/dispatcher boundary and turned
//! into typed values; they never propagate into the rendering layer as
//! unhandled failures. The categories:
//!
//! - [`ServiceError`]: a remote collection call failed (HTTP status, network,
//!   undecodable payload)
//! - [`PersistError`]: the view-state persistence port failed
//!
//! Partial bulk failure is deliberately *not* an error — it is the
//! [`BulkOutcome`](crate::source::service::BulkOutcome) value. Invalid filter
//! predicates are also not errors; the filter engine skips them.

use std::fmt;

/// The top-level error type for pipeline operations
#[derive(Debug)]
pub enum ListwiseError {
    /// Remote collection service errors
    Service(ServiceError),

    /// View-state persistence errors
    Persist(PersistError),

    /// Internal errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for ListwiseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListwiseError::Service(e) => write!(f, "{}", e),
            ListwiseError::Persist(e) => write!(f, "{}", e),
            ListwiseError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ListwiseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ListwiseError::Service(e) => Some(e),
            ListwiseError::Persist(e) => Some(e),
            ListwiseError::Internal(_) => None,
        }
    }
}

impl ListwiseError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ListwiseError::Service(e) => e.error_code(),
            ListwiseError::Persist(e) => e.error_code(),
            ListwiseError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<ServiceError> for ListwiseError {
    fn from(err: ServiceError) -> Self {
        ListwiseError::Service(err)
    }
}

impl From<PersistError> for ListwiseError {
    fn from(err: PersistError) -> Self {
        ListwiseError::Persist(err)
    }
}

// =============================================================================
// Service Errors
// =============================================================================

/// Errors from the remote collection service
///
/// The error channel preserves the HTTP status code and the backend's
/// message; presentation maps them to user-facing text with
/// [`user_message`](ServiceError::user_message).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The backend answered with a non-success status
    Http { status: u16, message: String },

    /// The request never produced a response
    Network { message: String },

    /// The response body could not be decoded
    Decode { message: String },
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Http { status, message } => {
                write!(f, "Request failed with status {}: {}", status, message)
            }
            ServiceError::Network { message } => {
                write!(f, "Network error: {}", message)
            }
            ServiceError::Decode { message } => {
                write!(f, "Failed to decode response: {}", message)
            }
        }
    }
}

impl std::error::Error for ServiceError {}

impl ServiceError {
    /// The HTTP status code, when the backend produced one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ServiceError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::Http { .. } => "HTTP_ERROR",
            ServiceError::Network { .. } => "NETWORK_ERROR",
            ServiceError::Decode { .. } => "DECODE_ERROR",
        }
    }

    /// The user-facing message for this error
    ///
    /// A structured backend message takes priority; the status-code fallback
    /// text is used only when the backend sent nothing usable.
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::Http { status, message } => {
                let message = message.trim();
                if message.is_empty() {
                    status_fallback(*status).to_string()
                } else {
                    message.to_string()
                }
            }
            ServiceError::Network { .. } => {
                "Could not reach the server. Check your connection and try again.".to_string()
            }
            ServiceError::Decode { .. } => {
                "The server returned an unexpected response.".to_string()
            }
        }
    }

    /// Recover the typed service error from an `anyhow` boundary error
    ///
    /// Anything that is not a [`ServiceError`] is folded into a network-level
    /// error carrying the original message.
    pub fn from_boundary(err: anyhow::Error) -> ServiceError {
        match err.downcast::<ServiceError>() {
            Ok(service) => service,
            Err(other) => ServiceError::Network {
                message: other.to_string(),
            },
        }
    }
}

fn status_fallback(status: u16) -> &'static str {
    match status {
        400 => "The request was invalid.",
        401 => "Your session has expired. Sign in again.",
        403 => "You do not have permission to perform this action.",
        404 => "The requested item no longer exists.",
        409 => "The operation conflicts with related data.",
        500 => "The server encountered an internal error.",
        503 => "The service is temporarily unavailable. Try again shortly.",
        _ => "The request failed.",
    }
}

// =============================================================================
// Persistence Errors
// =============================================================================

/// Errors from the view-state persistence port
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistError {
    /// Reading or writing the underlying store failed
    Io { message: String },

    /// The stored payload could not be parsed
    Corrupt { message: String },
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistError::Io { message } => write!(f, "Persistence IO error: {}", message),
            PersistError::Corrupt { message } => {
                write!(f, "Persisted view state is corrupt: {}", message)
            }
        }
    }
}

impl std::error::Error for PersistError {}

impl PersistError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            PersistError::Io { .. } => "PERSIST_IO_ERROR",
            PersistError::Corrupt { .. } => "PERSIST_CORRUPT",
        }
    }
}

impl From<std::io::Error> for PersistError {
    fn from(err: std::io::Error) -> Self {
        PersistError::Io {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(err: serde_json::Error) -> Self {
        PersistError::Corrupt {
            message: err.to_string(),
        }
    }
}
