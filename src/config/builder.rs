//! Delivery options builder
//!
//! Setters validate their own argument immediately and return an error for
//! empty or malformed values. Cross-field rules (a flag requiring a key) are
//! only checked by [`DeliveryOptionsBuilder::build`].
//!
//! # Example
//! ```rust,no_run
//! use delivery_client::config::DeliveryOptionsBuilder;
//!
//! # fn main() -> Result<(), delivery_client::DeliveryError> {
//! let options = DeliveryOptionsBuilder::new()
//!     .with_project_id("e5629811-ddaa-4c2b-80d2-fa91e16bb264")?
//!     .with_preview_api_key("preview-key")?
//!     .use_preview_api()
//!     .build()?;
//! assert!(options.use_preview_api());
//! # Ok(())
//! # }
//! ```

use secrecy::{ExposeSecret, SecretString};

use super::validation::{
    validate_not_empty, validate_options, validate_preview_api_key, validate_project_id,
};
use super::{DeliveryOptions, DeliveryOptionsConfig};
use crate::error::Result;

/// Fluent builder producing validated [`DeliveryOptions`].
#[derive(Clone, Debug)]
pub struct DeliveryOptionsBuilder {
    options: DeliveryOptions,
}

impl Default for DeliveryOptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DeliveryOptionsBuilder {
    /// Start from default endpoints, no keys and all flags off.
    pub fn new() -> Self {
        Self {
            options: DeliveryOptions::unvalidated(),
        }
    }

    /// Seed a builder from deserialized configuration.
    ///
    /// Every present value goes through the same setter as a fluent call
    /// would, so malformed values are rejected here.
    pub fn from_config(config: DeliveryOptionsConfig) -> Result<Self> {
        let mut builder = Self::new();

        if let Some(project_id) = config.project_id {
            builder = builder.with_project_id(project_id)?;
        }
        if let Some(endpoint) = config.production_endpoint {
            builder = builder.with_production_endpoint(endpoint)?;
        }
        if let Some(endpoint) = config.preview_endpoint {
            builder = builder.with_preview_endpoint(endpoint)?;
        }
        if let Some(key) = config.preview_api_key {
            builder = builder.with_preview_api_key(key.expose_secret())?;
        }
        if let Some(key) = config.secured_production_api_key {
            builder = builder.with_secured_production_api_key(key.expose_secret())?;
        }
        if config.use_preview_api == Some(true) {
            builder = builder.use_preview_api();
        }
        if config.use_secured_production_api == Some(true) {
            builder = builder.use_secured_production_api();
        }
        if config.wait_for_loading_new_content == Some(true) {
            builder = builder.wait_for_loading_new_content();
        }
        if config.enable_resilience_logic == Some(true) {
            builder = builder.enable_resilience_logic();
        }
        if let Some(attempts) = config.max_retry_attempts {
            builder = builder.with_max_retry_attempts(attempts);
        }

        Ok(builder)
    }

    // ========================================================================
    // Endpoints and identity
    // ========================================================================

    /// Set the project identifier; must be a UUID.
    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Result<Self> {
        let project_id = project_id.into();
        validate_project_id(&project_id)?;
        self.options.project_id = project_id;
        Ok(self)
    }

    /// Set the production endpoint.
    pub fn with_production_endpoint(mut self, endpoint: impl Into<String>) -> Result<Self> {
        let endpoint = endpoint.into();
        validate_not_empty(&endpoint, "production_endpoint")?;
        self.options.production_endpoint = endpoint;
        Ok(self)
    }

    /// Set the preview endpoint.
    pub fn with_preview_endpoint(mut self, endpoint: impl Into<String>) -> Result<Self> {
        let endpoint = endpoint.into();
        validate_not_empty(&endpoint, "preview_endpoint")?;
        self.options.preview_endpoint = endpoint;
        Ok(self)
    }

    // ========================================================================
    // Keys
    // ========================================================================

    /// Set the preview API key. Does not enable preview mode by itself.
    pub fn with_preview_api_key(mut self, key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        validate_preview_api_key(&key)?;
        self.options.preview_api_key = Some(SecretString::from(key));
        Ok(self)
    }

    /// Set the secured production API key.
    pub fn with_secured_production_api_key(mut self, key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        validate_not_empty(&key, "secured_production_api_key")?;
        self.options.secured_production_api_key = Some(SecretString::from(key));
        Ok(self)
    }

    // ========================================================================
    // Flags
    // ========================================================================

    pub fn use_preview_api(mut self) -> Self {
        self.options.use_preview_api = true;
        self
    }

    pub fn use_secured_production_api(mut self) -> Self {
        self.options.use_secured_production_api = true;
        self
    }

    pub fn wait_for_loading_new_content(mut self) -> Self {
        self.options.wait_for_loading_new_content = true;
        self
    }

    pub fn enable_resilience_logic(mut self) -> Self {
        self.options.enable_resilience_logic = true;
        self
    }

    /// Set the retry attempts for the resilience policy. Not range checked.
    pub fn with_max_retry_attempts(mut self, attempts: i32) -> Self {
        self.options.max_retry_attempts = attempts;
        self
    }

    /// Validate and produce the options.
    pub fn build(self) -> Result<DeliveryOptions> {
        validate_options(&self.options)?;
        Ok(self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_MAX_RETRY_ATTEMPTS, DEFAULT_PRODUCTION_ENDPOINT};
    use crate::error::DeliveryError;

    const PROJECT_ID: &str = "e5629811-ddaa-4c2b-80d2-fa91e16bb264";

    #[test]
    fn defaults_are_kept_when_only_project_id_is_set() {
        let options = DeliveryOptionsBuilder::new()
            .with_project_id(PROJECT_ID)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(options.project_id(), PROJECT_ID);
        assert_eq!(options.production_endpoint(), DEFAULT_PRODUCTION_ENDPOINT);
        assert_eq!(options.max_retry_attempts(), DEFAULT_MAX_RETRY_ATTEMPTS);
        assert!(!options.use_preview_api());
        assert!(!options.enable_resilience_logic());
    }

    #[test]
    fn setters_reject_empty_values_immediately() {
        let err = DeliveryOptionsBuilder::new()
            .with_preview_endpoint("")
            .unwrap_err();
        assert_eq!(err, DeliveryError::argument_missing("preview_endpoint"));

        let err = DeliveryOptionsBuilder::new()
            .with_production_endpoint("")
            .unwrap_err();
        assert_eq!(err, DeliveryError::argument_missing("production_endpoint"));

        let err = DeliveryOptionsBuilder::new()
            .with_secured_production_api_key("")
            .unwrap_err();
        assert_eq!(
            err,
            DeliveryError::argument_missing("secured_production_api_key")
        );
    }

    #[test]
    fn project_id_setter_checks_format() {
        let err = DeliveryOptionsBuilder::new()
            .with_project_id("not-a-guid")
            .unwrap_err();
        assert!(matches!(err, DeliveryError::InvalidFormat { .. }));
    }

    #[test]
    fn build_without_project_id_fails() {
        let err = DeliveryOptionsBuilder::new().build().unwrap_err();
        assert_eq!(err, DeliveryError::argument_missing("project_id"));
    }

    #[test]
    fn secured_mode_requires_key() {
        let err = DeliveryOptionsBuilder::new()
            .with_project_id(PROJECT_ID)
            .unwrap()
            .use_secured_production_api()
            .build()
            .unwrap_err();
        assert_eq!(err.field(), Some("secured_production_api_key"));

        let options = DeliveryOptionsBuilder::new()
            .with_project_id(PROJECT_ID)
            .unwrap()
            .with_secured_production_api_key("secured")
            .unwrap()
            .use_secured_production_api()
            .build()
            .unwrap();
        assert_eq!(options.active_api_key(), Some("secured"));
    }

    #[test]
    fn retry_attempts_are_passed_through() {
        let options = DeliveryOptionsBuilder::new()
            .with_project_id(PROJECT_ID)
            .unwrap()
            .enable_resilience_logic()
            .with_max_retry_attempts(-3)
            .build()
            .unwrap();
        assert_eq!(options.max_retry_attempts(), -3);
        assert!(options.enable_resilience_logic());
    }

    #[test]
    fn preview_key_is_kept_secret() {
        let options = DeliveryOptionsBuilder::new()
            .with_project_id(PROJECT_ID)
            .unwrap()
            .with_preview_api_key("top-secret")
            .unwrap()
            .use_preview_api()
            .build()
            .unwrap();

        assert_eq!(
            options.preview_api_key().map(|k| k.expose_secret()),
            Some("top-secret")
        );
        assert!(!format!("{options:?}").contains("top-secret"));
    }
}
