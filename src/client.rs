//! Delivery Client
//!
//! The composed client value and the factory that assembles it from a
//! [`Registry`]. A client is immutable, cheap to clone and safe to share
//! between threads.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};

use crate::builder::DeliveryClientBuilder;
use crate::config::DeliveryOptions;
use crate::error::{DeliveryError, Result};
use crate::registry::{Bindable, Registry};
use crate::traits::{
    ContentLinkUrlResolver, InlineContentItemsProcessor, InlineContentItemsResolver,
    ModelProvider, PropertyMapper, ResiliencePolicyProvider, TypeProvider, UnknownContentItem,
    UnretrievedContentItem,
};

/// Header asking the API to wait until freshly published content is available.
pub const WAIT_FOR_LOADING_NEW_CONTENT_HEADER: &str = "x-kc-wait-for-loading-new-content";

/// A fully configured Delivery API client.
#[derive(Clone)]
pub struct DeliveryClient {
    options: Arc<DeliveryOptions>,
    content_link_url_resolver: Option<Arc<dyn ContentLinkUrlResolver>>,
    type_provider: Option<Arc<dyn TypeProvider>>,
    unknown_item_resolver: Arc<dyn InlineContentItemsResolver<UnknownContentItem>>,
    unretrieved_item_resolver: Arc<dyn InlineContentItemsResolver<UnretrievedContentItem>>,
    inline_content_items_processor: Arc<dyn InlineContentItemsProcessor>,
    property_mapper: Arc<dyn PropertyMapper>,
    model_provider: Arc<dyn ModelProvider>,
    resilience_policy_provider: Arc<dyn ResiliencePolicyProvider>,
    http_client: Option<reqwest::Client>,
}

impl DeliveryClient {
    /// Start building a client.
    pub fn builder() -> DeliveryClientBuilder {
        DeliveryClientBuilder::new()
    }

    pub fn options(&self) -> &Arc<DeliveryOptions> {
        &self.options
    }

    pub fn content_link_url_resolver(&self) -> Option<&Arc<dyn ContentLinkUrlResolver>> {
        self.content_link_url_resolver.as_ref()
    }

    pub fn type_provider(&self) -> Option<&Arc<dyn TypeProvider>> {
        self.type_provider.as_ref()
    }

    pub fn unknown_item_resolver(&self) -> &Arc<dyn InlineContentItemsResolver<UnknownContentItem>> {
        &self.unknown_item_resolver
    }

    pub fn unretrieved_item_resolver(
        &self,
    ) -> &Arc<dyn InlineContentItemsResolver<UnretrievedContentItem>> {
        &self.unretrieved_item_resolver
    }

    pub fn inline_content_items_processor(&self) -> &Arc<dyn InlineContentItemsProcessor> {
        &self.inline_content_items_processor
    }

    pub fn property_mapper(&self) -> &Arc<dyn PropertyMapper> {
        &self.property_mapper
    }

    pub fn model_provider(&self) -> &Arc<dyn ModelProvider> {
        &self.model_provider
    }

    pub fn resilience_policy_provider(&self) -> &Arc<dyn ResiliencePolicyProvider> {
        &self.resilience_policy_provider
    }

    /// Transport supplied by the caller, if any.
    pub fn http_client(&self) -> Option<&reqwest::Client> {
        self.http_client.as_ref()
    }

    /// Base URL of the active endpoint with the project identifier applied.
    ///
    /// A `{0}` placeholder is replaced with the project identifier; an endpoint
    /// without one gets the identifier appended as a path segment.
    pub fn base_url(&self) -> String {
        let endpoint = self.options.active_endpoint();
        let project_id = self.options.project_id();
        if endpoint.contains("{0}") {
            endpoint.replace("{0}", project_id)
        } else {
            format!("{}/{}", endpoint.trim_end_matches('/'), project_id)
        }
    }

    /// Headers sent with every request.
    pub fn request_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        if let Some(key) = self.options.active_api_key() {
            let mut value = HeaderValue::from_str(&format!("Bearer {key}")).map_err(|_| {
                DeliveryError::invalid_format("api_key", "API key is not a valid header value")
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        if self.options.wait_for_loading_new_content() {
            headers.insert(
                HeaderName::from_static(WAIT_FOR_LOADING_NEW_CONTENT_HEADER),
                HeaderValue::from_static("true"),
            );
        }

        Ok(headers)
    }

    /// Transport for requests: the caller's client or a default one.
    pub fn transport(&self) -> Result<reqwest::Client> {
        match &self.http_client {
            Some(client) => Ok(client.clone()),
            None => Ok(reqwest::Client::builder().build()?),
        }
    }

    /// Run a request, retrying through the resilience policy when resilience
    /// logic is enabled.
    pub async fn execute_with_resilience<F, Fut, T>(&self, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if self.options.enable_resilience_logic() {
            self.resilience_policy_provider
                .policy()
                .execute(operation)
                .await
        } else {
            operation().await
        }
    }
}

impl fmt::Debug for DeliveryClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeliveryClient")
            .field("options", &self.options)
            .field(
                "has_content_link_url_resolver",
                &self.content_link_url_resolver.is_some(),
            )
            .field("has_type_provider", &self.type_provider.is_some())
            .field("has_http_client", &self.http_client.is_some())
            .finish_non_exhaustive()
    }
}

fn required<T: Bindable>(registry: &Registry) -> Result<T> {
    registry
        .get()
        .ok_or(DeliveryError::MissingCapability(T::CAPABILITY))
}

/// Construct a client from the capabilities bound in `registry`.
///
/// The content link resolver and the type provider may be absent; every other
/// capability must be bound.
pub fn assemble(registry: &Registry, http_client: Option<reqwest::Client>) -> Result<DeliveryClient> {
    Ok(DeliveryClient {
        options: required(registry)?,
        content_link_url_resolver: registry.get(),
        type_provider: registry.get(),
        unknown_item_resolver: required(registry)?,
        unretrieved_item_resolver: required(registry)?,
        inline_content_items_processor: required(registry)?,
        property_mapper: required(registry)?,
        model_provider: required(registry)?,
        resilience_policy_provider: required(registry)?,
        http_client,
    })
}
