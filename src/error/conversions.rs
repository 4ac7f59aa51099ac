//! Type Conversions for DeliveryError
//!
//! This module contains From trait implementations for converting
//! common error types into DeliveryError.

use super::types::DeliveryError;

impl From<reqwest::Error> for DeliveryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::Timeout(err.to_string());
        }
        if err.is_connect() {
            return Self::Connection(err.to_string());
        }
        Self::Http {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for DeliveryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}
