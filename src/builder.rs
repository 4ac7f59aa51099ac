//! Staged Delivery Client Builder
//!
//! Construction happens in two stages. The [`Mandatory`] stage only accepts
//! the project identity; once it is supplied the builder moves to the
//! [`Optional`] stage where collaborators can be overridden in any order.
//! [`DeliveryClientBuilder::build`] is only available in the optional stage.
//!
//! Capability setters take `impl Into<Option<Arc<dyn Trait>>>`. Passing `None`
//! leaves the capability to its default; the first supplied instance wins.
//!
//! # Example
//! ```rust,no_run
//! use delivery_client::DeliveryClientBuilder;
//!
//! # fn main() -> Result<(), delivery_client::DeliveryError> {
//! let client = DeliveryClientBuilder::new()
//!     .with_project_id("e5629811-ddaa-4c2b-80d2-fa91e16bb264")?
//!     .with_preview_api_key("preview-key")?
//!     .build()?;
//! assert!(client.options().use_preview_api());
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use secrecy::SecretString;

use crate::client::{DeliveryClient, assemble};
use crate::config::validation::validate_preview_api_key;
use crate::config::{DeliveryOptions, DeliveryOptionsBuilder};
use crate::error::Result;
use crate::registry::{Bindable, Registry};
use crate::traits::{
    ContentLinkUrlResolver, InlineContentItemsProcessor, InlineContentItemsResolver,
    ModelProvider, PropertyMapper, ResiliencePolicyProvider, TypeProvider, UnknownContentItem,
    UnretrievedContentItem,
};

/// Stage before any options are known.
#[derive(Debug, Default)]
pub struct Mandatory;

/// Stage after options are known; collaborators may be overridden.
#[derive(Debug)]
pub struct Optional {
    options: DeliveryOptions,
    http_client: Option<reqwest::Client>,
}

/// Builder for [`DeliveryClient`].
#[derive(Debug)]
pub struct DeliveryClientBuilder<Stage = Mandatory> {
    stage: Stage,
    registry: Registry,
}

impl Default for DeliveryClientBuilder<Mandatory> {
    fn default() -> Self {
        Self::new()
    }
}

impl DeliveryClientBuilder<Mandatory> {
    pub fn new() -> Self {
        Self {
            stage: Mandatory,
            registry: Registry::new(),
        }
    }

    /// Use default options for the given project.
    pub fn with_project_id(
        self,
        project_id: impl Into<String>,
    ) -> Result<DeliveryClientBuilder<Optional>> {
        let options = DeliveryOptionsBuilder::new()
            .with_project_id(project_id)?
            .build()?;
        Ok(self.with_options(options))
    }

    /// Configure options through an options builder.
    ///
    /// ```rust,no_run
    /// # use delivery_client::DeliveryClientBuilder;
    /// # fn main() -> Result<(), delivery_client::DeliveryError> {
    /// let builder = DeliveryClientBuilder::new().with_delivery_options(|options| {
    ///     options
    ///         .with_project_id("e5629811-ddaa-4c2b-80d2-fa91e16bb264")?
    ///         .with_preview_endpoint("https://preview.example.com/{0}")
    /// })?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_delivery_options<F>(self, configure: F) -> Result<DeliveryClientBuilder<Optional>>
    where
        F: FnOnce(DeliveryOptionsBuilder) -> Result<DeliveryOptionsBuilder>,
    {
        let options = configure(DeliveryOptionsBuilder::new())?.build()?;
        Ok(self.with_options(options))
    }

    /// Use already validated options.
    pub fn with_options(self, options: DeliveryOptions) -> DeliveryClientBuilder<Optional> {
        DeliveryClientBuilder {
            stage: Optional {
                options,
                http_client: None,
            },
            registry: self.registry,
        }
    }
}

impl DeliveryClientBuilder<Optional> {
    /// Options the client will be built with.
    pub fn options(&self) -> &DeliveryOptions {
        &self.stage.options
    }

    /// Switch to the preview API using `preview_api_key`.
    pub fn with_preview_api_key(mut self, preview_api_key: impl Into<String>) -> Result<Self> {
        let preview_api_key = preview_api_key.into();
        validate_preview_api_key(&preview_api_key)?;
        self.stage
            .options
            .enable_preview(SecretString::from(preview_api_key));
        Ok(self)
    }

    /// Transport used by the client. Replaces a previously set client.
    pub fn with_http_client(mut self, http_client: reqwest::Client) -> Self {
        self.stage.http_client = Some(http_client);
        self
    }

    fn bind<T: Bindable>(mut self, instance: impl Into<Option<T>>) -> Self {
        self.registry.try_add(instance);
        self
    }

    pub fn with_content_link_url_resolver(
        self,
        resolver: impl Into<Option<Arc<dyn ContentLinkUrlResolver>>>,
    ) -> Self {
        self.bind(resolver)
    }

    pub fn with_inline_content_items_processor(
        self,
        processor: impl Into<Option<Arc<dyn InlineContentItemsProcessor>>>,
    ) -> Self {
        self.bind(processor)
    }

    pub fn with_model_provider(
        self,
        provider: impl Into<Option<Arc<dyn ModelProvider>>>,
    ) -> Self {
        self.bind(provider)
    }

    pub fn with_type_provider(self, provider: impl Into<Option<Arc<dyn TypeProvider>>>) -> Self {
        self.bind(provider)
    }

    pub fn with_resilience_policy_provider(
        self,
        provider: impl Into<Option<Arc<dyn ResiliencePolicyProvider>>>,
    ) -> Self {
        self.bind(provider)
    }

    pub fn with_property_mapper(self, mapper: impl Into<Option<Arc<dyn PropertyMapper>>>) -> Self {
        self.bind(mapper)
    }

    /// Resolver for inline items whose content type has no registered resolver.
    pub fn with_unknown_item_resolver(
        self,
        resolver: impl Into<Option<Arc<dyn InlineContentItemsResolver<UnknownContentItem>>>>,
    ) -> Self {
        self.bind(resolver)
    }

    /// Resolver for inline items missing from the response.
    pub fn with_unretrieved_item_resolver(
        self,
        resolver: impl Into<Option<Arc<dyn InlineContentItemsResolver<UnretrievedContentItem>>>>,
    ) -> Self {
        self.bind(resolver)
    }

    /// Fill every capability left unset with its default and assemble the
    /// client.
    pub fn build(self) -> Result<DeliveryClient> {
        let Self {
            stage: Optional {
                options,
                http_client,
            },
            mut registry,
        } = self;

        registry.try_add(Arc::new(options.clone()));
        registry.register_defaults(&options);

        tracing::debug!(
            project_id = options.project_id(),
            bound = ?registry.capabilities().collect::<Vec<_>>(),
            "Assembling delivery client"
        );
        assemble(&registry, http_client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DeliveryError;
    use crate::retry::RetryPolicy;

    const PROJECT_ID: &str = "e5629811-ddaa-4c2b-80d2-fa91e16bb264";

    struct FixedPolicy;

    impl ResiliencePolicyProvider for FixedPolicy {
        fn policy(&self) -> RetryPolicy {
            RetryPolicy::new().with_max_retry_attempts(9)
        }
    }

    #[test]
    fn preview_key_enables_preview_mode() {
        let builder = DeliveryClientBuilder::new()
            .with_project_id(PROJECT_ID)
            .unwrap()
            .with_preview_api_key("preview")
            .unwrap();

        assert!(builder.options().use_preview_api());
        assert_eq!(builder.options().active_api_key(), Some("preview"));
    }

    #[test]
    fn empty_preview_key_is_rejected() {
        let err = DeliveryClientBuilder::new()
            .with_project_id(PROJECT_ID)
            .unwrap()
            .with_preview_api_key("")
            .unwrap_err();
        assert_eq!(err, DeliveryError::argument_missing("preview_api_key"));
    }

    #[test]
    fn absent_override_keeps_default() {
        let client = DeliveryClientBuilder::new()
            .with_project_id(PROJECT_ID)
            .unwrap()
            .with_resilience_policy_provider(None)
            .build()
            .unwrap();
        assert_eq!(
            client.resilience_policy_provider().policy().max_retry_attempts,
            crate::config::DEFAULT_MAX_RETRY_ATTEMPTS
        );
    }

    #[test]
    fn first_override_wins() {
        let first: Arc<dyn ResiliencePolicyProvider> = Arc::new(FixedPolicy);
        let second: Arc<dyn ResiliencePolicyProvider> =
            Arc::new(crate::defaults::DefaultResiliencePolicyProvider::new(1));

        let client = DeliveryClientBuilder::new()
            .with_project_id(PROJECT_ID)
            .unwrap()
            .with_resilience_policy_provider(first.clone())
            .with_resilience_policy_provider(second)
            .build()
            .unwrap();
        assert!(Arc::ptr_eq(client.resilience_policy_provider(), &first));
    }

    #[test]
    fn options_setter_errors_propagate() {
        let err = DeliveryClientBuilder::new()
            .with_delivery_options(|options| options.with_project_id("nope"))
            .unwrap_err();
        assert_eq!(err.field(), Some("project_id"));
    }
}
