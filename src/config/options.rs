//! Delivery options value
//!
//! `DeliveryOptions` is produced only by [`DeliveryOptionsBuilder::build`],
//! so every value a caller can hold has passed validation.
//!
//! [`DeliveryOptionsBuilder::build`]: super::DeliveryOptionsBuilder::build

use secrecy::{ExposeSecret, SecretString};
use uuid::Uuid;

/// Default production endpoint. `{0}` is replaced with the project identifier.
pub const DEFAULT_PRODUCTION_ENDPOINT: &str = "https://deliver.kenticocloud.com/{0}";

/// Default preview endpoint. `{0}` is replaced with the project identifier.
pub const DEFAULT_PREVIEW_ENDPOINT: &str = "https://preview-deliver.kenticocloud.com/{0}";

/// Default number of retry attempts used by the resilience policy.
pub const DEFAULT_MAX_RETRY_ATTEMPTS: i32 = 5;

/// Validated configuration of a delivery client.
#[derive(Clone, Debug)]
pub struct DeliveryOptions {
    pub(crate) project_id: String,
    pub(crate) production_endpoint: String,
    pub(crate) preview_endpoint: String,
    pub(crate) preview_api_key: Option<SecretString>,
    pub(crate) secured_production_api_key: Option<SecretString>,
    pub(crate) use_preview_api: bool,
    pub(crate) wait_for_loading_new_content: bool,
    pub(crate) use_secured_production_api: bool,
    pub(crate) enable_resilience_logic: bool,
    pub(crate) max_retry_attempts: i32,
}

impl DeliveryOptions {
    /// Options with every field at its default and no project identifier.
    ///
    /// Only the options builder starts from this value.
    pub(crate) fn unvalidated() -> Self {
        Self {
            project_id: String::new(),
            production_endpoint: DEFAULT_PRODUCTION_ENDPOINT.to_string(),
            preview_endpoint: DEFAULT_PREVIEW_ENDPOINT.to_string(),
            preview_api_key: None,
            secured_production_api_key: None,
            use_preview_api: false,
            wait_for_loading_new_content: false,
            use_secured_production_api: false,
            enable_resilience_logic: false,
            max_retry_attempts: DEFAULT_MAX_RETRY_ATTEMPTS,
        }
    }

    /// Store a preview API key and switch the client to the preview endpoint.
    pub(crate) fn enable_preview(&mut self, preview_api_key: SecretString) {
        self.preview_api_key = Some(preview_api_key);
        self.use_preview_api = true;
    }

    /// Project identifier exactly as supplied.
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Project identifier parsed as a UUID.
    pub fn project_uuid(&self) -> Uuid {
        // Validated on construction.
        Uuid::parse_str(&self.project_id).unwrap_or_default()
    }

    pub fn production_endpoint(&self) -> &str {
        &self.production_endpoint
    }

    pub fn preview_endpoint(&self) -> &str {
        &self.preview_endpoint
    }

    pub fn preview_api_key(&self) -> Option<&SecretString> {
        self.preview_api_key.as_ref()
    }

    pub fn secured_production_api_key(&self) -> Option<&SecretString> {
        self.secured_production_api_key.as_ref()
    }

    pub const fn use_preview_api(&self) -> bool {
        self.use_preview_api
    }

    pub const fn wait_for_loading_new_content(&self) -> bool {
        self.wait_for_loading_new_content
    }

    pub const fn use_secured_production_api(&self) -> bool {
        self.use_secured_production_api
    }

    pub const fn enable_resilience_logic(&self) -> bool {
        self.enable_resilience_logic
    }

    /// Retry attempts handed to the resilience policy, unbounded.
    pub const fn max_retry_attempts(&self) -> i32 {
        self.max_retry_attempts
    }

    /// Endpoint selected by the preview flag.
    pub fn active_endpoint(&self) -> &str {
        if self.use_preview_api {
            &self.preview_endpoint
        } else {
            &self.production_endpoint
        }
    }

    /// API key sent with requests, if the active mode needs one.
    ///
    /// Preview mode wins over secured production mode.
    pub fn active_api_key(&self) -> Option<&str> {
        if self.use_preview_api {
            self.preview_api_key.as_ref().map(|k| k.expose_secret())
        } else if self.use_secured_production_api {
            self.secured_production_api_key
                .as_ref()
                .map(|k| k.expose_secret())
        } else {
            None
        }
    }
}
