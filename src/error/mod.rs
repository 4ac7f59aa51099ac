//! Error Handling Module
//!
//! This module provides the error type shared by the options builder, the
//! staged client builder and the default collaborators:
//! - Core error type (`DeliveryError`)
//! - Type conversions from common error types
//!
//! # Example
//!
//! ```rust,ignore
//! use delivery_client::error::DeliveryError;
//!
//! let error = DeliveryError::argument_missing("preview_endpoint");
//! assert_eq!(error.field(), Some("preview_endpoint"));
//! assert!(!error.is_retryable());
//! ```

// Module declarations
mod conversions;
pub mod types;

// Re-exports for public API
pub use types::*;
