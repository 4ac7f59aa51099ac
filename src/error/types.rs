//! Core error types

use thiserror::Error;

use crate::registry::Capability;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, DeliveryError>;

/// Errors raised while configuring or assembling a delivery client.
///
/// Configuration errors are raised synchronously at the offending call and are
/// meant to be treated as unrecoverable: no partially configured client is ever
/// returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    /// A required argument was empty or not supplied.
    #[error("The {field} parameter is not specified")]
    ArgumentMissing { field: &'static str },

    /// A value failed a format check.
    #[error("Invalid format of {field}: {message}")]
    InvalidFormat {
        field: &'static str,
        message: String,
    },

    /// A flag implies a companion value that is absent.
    #[error("Inconsistent configuration of {field}: {message}")]
    ConfigurationInconsistent {
        field: &'static str,
        message: String,
    },

    /// A capability from the default set was not bound at assembly time.
    #[error("Capability {0} is not bound")]
    MissingCapability(Capability),

    /// Transport-level failure reported by an HTTP operation.
    #[error("HTTP error{}: {message}", format_status(.status))]
    Http {
        status: Option<u16>,
        message: String,
    },

    /// The connection could not be established or was dropped.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The request did not complete in time.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Malformed JSON handed to a collaborator.
    #[error("JSON error: {0}")]
    Json(String),
}

fn format_status(status: &Option<u16>) -> String {
    status.map(|code| format!(" {code}")).unwrap_or_default()
}

impl DeliveryError {
    /// Create an `ArgumentMissing` error for `field`.
    pub const fn argument_missing(field: &'static str) -> Self {
        Self::ArgumentMissing { field }
    }

    /// Create an `InvalidFormat` error for `field`.
    pub fn invalid_format(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            field,
            message: message.into(),
        }
    }

    /// Create a `ConfigurationInconsistent` error for `field`.
    pub fn configuration_inconsistent(field: &'static str, message: impl Into<String>) -> Self {
        Self::ConfigurationInconsistent {
            field,
            message: message.into(),
        }
    }

    /// Create an `Http` error.
    pub fn http(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Name of the offending options field, for configuration errors.
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::ArgumentMissing { field }
            | Self::InvalidFormat { field, .. }
            | Self::ConfigurationInconsistent { field, .. } => Some(*field),
            _ => None,
        }
    }

    /// Whether this error is one of the configuration kinds.
    pub const fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::ArgumentMissing { .. }
                | Self::InvalidFormat { .. }
                | Self::ConfigurationInconsistent { .. }
        )
    }

    /// Whether an operation failing with this error may succeed when retried.
    ///
    /// Only transport errors qualify: connection failures, timeouts,
    /// throttling and server errors. HTTP errors without a status (invalid
    /// requests, redirect loops, undecodable bodies) are not retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Connection(_) | Self::Timeout(_) => true,
            Self::Http {
                status: Some(code), ..
            } => *code == 408 || *code == 429 || (500..600).contains(code),
            _ => false,
        }
    }
}
