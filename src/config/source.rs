//! Options loaded from configuration files or the environment
//!
//! Environment variables:
//! - `DELIVERY_PROJECT_ID`
//! - `DELIVERY_PRODUCTION_ENDPOINT`
//! - `DELIVERY_PREVIEW_ENDPOINT`
//! - `DELIVERY_PREVIEW_API_KEY`
//! - `DELIVERY_SECURED_PRODUCTION_API_KEY`
//! - `DELIVERY_USE_PREVIEW_API` (bool)
//! - `DELIVERY_USE_SECURED_PRODUCTION_API` (bool)
//! - `DELIVERY_WAIT_FOR_LOADING_NEW_CONTENT` (bool)
//! - `DELIVERY_ENABLE_RESILIENCE_LOGIC` (bool)
//! - `DELIVERY_MAX_RETRY_ATTEMPTS` (integer)

use std::str::FromStr;

use secrecy::SecretString;
use serde::Deserialize;

use super::{DeliveryOptions, DeliveryOptionsBuilder};
use crate::error::{DeliveryError, Result};

/// Raw, unvalidated options as they appear in a configuration source.
///
/// Keys are camelCase, every field is optional. API keys are held as secrets
/// and redacted in `Debug` output.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryOptionsConfig {
    pub project_id: Option<String>,
    pub production_endpoint: Option<String>,
    pub preview_endpoint: Option<String>,
    pub preview_api_key: Option<SecretString>,
    pub secured_production_api_key: Option<SecretString>,
    pub use_preview_api: Option<bool>,
    pub use_secured_production_api: Option<bool>,
    pub wait_for_loading_new_content: Option<bool>,
    pub enable_resilience_logic: Option<bool>,
    pub max_retry_attempts: Option<i32>,
}

impl DeliveryOptionsConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            project_id: lookup("DELIVERY_PROJECT_ID"),
            production_endpoint: lookup("DELIVERY_PRODUCTION_ENDPOINT"),
            preview_endpoint: lookup("DELIVERY_PREVIEW_ENDPOINT"),
            preview_api_key: lookup("DELIVERY_PREVIEW_API_KEY").map(SecretString::from),
            secured_production_api_key: lookup("DELIVERY_SECURED_PRODUCTION_API_KEY")
                .map(SecretString::from),
            use_preview_api: parse_var(&lookup, "DELIVERY_USE_PREVIEW_API", "use_preview_api")?,
            use_secured_production_api: parse_var(
                &lookup,
                "DELIVERY_USE_SECURED_PRODUCTION_API",
                "use_secured_production_api",
            )?,
            wait_for_loading_new_content: parse_var(
                &lookup,
                "DELIVERY_WAIT_FOR_LOADING_NEW_CONTENT",
                "wait_for_loading_new_content",
            )?,
            enable_resilience_logic: parse_var(
                &lookup,
                "DELIVERY_ENABLE_RESILIENCE_LOGIC",
                "enable_resilience_logic",
            )?,
            max_retry_attempts: parse_var(
                &lookup,
                "DELIVERY_MAX_RETRY_ATTEMPTS",
                "max_retry_attempts",
            )?,
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, field: &'static str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| DeliveryError::invalid_format(field, format!("{key}={raw} cannot be parsed"))),
    }
}

impl DeliveryOptions {
    /// Build validated options from process environment variables.
    pub fn from_env() -> Result<Self> {
        DeliveryOptionsBuilder::from_config(DeliveryOptionsConfig::from_env()?)?.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    const PROJECT_ID: &str = "e5629811-ddaa-4c2b-80d2-fa91e16bb264";

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn deserializes_camel_case_keys() {
        let config: DeliveryOptionsConfig = serde_json::from_str(
            r#"{
                "projectId": "e5629811-ddaa-4c2b-80d2-fa91e16bb264",
                "previewEndpoint": "https://preview-deliver.test.com/",
                "previewApiKey": "preview-key",
                "usePreviewApi": true,
                "maxRetryAttempts": 2
            }"#,
        )
        .unwrap();

        let options = DeliveryOptionsBuilder::from_config(config)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(options.project_id(), PROJECT_ID);
        assert_eq!(options.preview_endpoint(), "https://preview-deliver.test.com/");
        assert!(options.use_preview_api());
        assert_eq!(options.max_retry_attempts(), 2);
    }

    #[test]
    fn config_values_go_through_setter_validation() {
        let config = DeliveryOptionsConfig {
            project_id: Some(PROJECT_ID.to_string()),
            production_endpoint: Some(String::new()),
            ..Default::default()
        };
        let err = DeliveryOptionsBuilder::from_config(config).unwrap_err();
        assert_eq!(err, DeliveryError::argument_missing("production_endpoint"));
    }

    #[test]
    fn reads_environment_style_lookup() {
        let config = DeliveryOptionsConfig::from_lookup(lookup(&[
            ("DELIVERY_PROJECT_ID", PROJECT_ID),
            ("DELIVERY_ENABLE_RESILIENCE_LOGIC", "true"),
            ("DELIVERY_MAX_RETRY_ATTEMPTS", " 7 "),
        ]))
        .unwrap();

        assert_eq!(config.project_id.as_deref(), Some(PROJECT_ID));
        assert_eq!(config.enable_resilience_logic, Some(true));
        assert_eq!(config.max_retry_attempts, Some(7));
        assert_eq!(config.use_preview_api, None);
    }

    #[test]
    fn api_keys_are_redacted_in_debug() {
        let config: DeliveryOptionsConfig = serde_json::from_str(
            r#"{ "previewApiKey": "preview-secret", "securedProductionApiKey": "secured-secret" }"#,
        )
        .unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("preview-secret"));
        assert!(!debug.contains("secured-secret"));

        let config = DeliveryOptionsConfig::from_lookup(lookup(&[(
            "DELIVERY_PREVIEW_API_KEY",
            "env-secret",
        )]))
        .unwrap();
        assert!(!format!("{config:?}").contains("env-secret"));
        assert_eq!(
            config.preview_api_key.as_ref().map(|k| k.expose_secret()),
            Some("env-secret")
        );
    }

    #[test]
    fn unparseable_environment_values_fail() {
        let err = DeliveryOptionsConfig::from_lookup(lookup(&[(
            "DELIVERY_USE_PREVIEW_API",
            "sometimes",
        )]))
        .err()
        .unwrap();
        assert_eq!(err.field(), Some("use_preview_api"));
    }
}
