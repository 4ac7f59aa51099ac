//! Shared test doubles for integration tests.

#![allow(dead_code)]

use std::any::TypeId;
use std::collections::BTreeMap;

use delivery_client::prelude::*;
use serde_json::Value;

pub const PROJECT_ID: &str = "e5629811-ddaa-4c2b-80d2-fa91e16bb264";

pub struct Article;

/// Link resolver producing `/articles/{url_slug}` URLs.
pub struct SlugLinkResolver;

impl ContentLinkUrlResolver for SlugLinkResolver {
    fn resolve_link_url(&self, link: &ContentLink) -> Option<String> {
        Some(format!("/articles/{}", link.url_slug))
    }

    fn resolve_broken_link_url(&self) -> Option<String> {
        Some("/404".to_string())
    }
}

/// Type provider that knows only the `article` content type.
pub struct ArticleTypeProvider;

impl TypeProvider for ArticleTypeProvider {
    fn type_for(&self, content_type: &str) -> Option<TypeId> {
        (content_type == "article").then(TypeId::of::<Article>)
    }
}

pub struct UpperCaseMapper;

impl PropertyMapper for UpperCaseMapper {
    fn property_name(&self, field_codename: &str) -> String {
        field_codename.to_uppercase()
    }
}

/// Model provider returning an empty model for every item.
pub struct EmptyModelProvider;

impl ModelProvider for EmptyModelProvider {
    fn content_item_model(&self, _item: &Value, _linked_items: &Value) -> Result<ContentItemModel> {
        Ok(ContentItemModel {
            codename: String::new(),
            content_type: String::new(),
            model_type: None,
            properties: BTreeMap::new(),
        })
    }
}

/// Resilience provider with a fixed retry count.
pub struct FixedRetries(pub i32);

impl ResiliencePolicyProvider for FixedRetries {
    fn policy(&self) -> RetryPolicy {
        RetryPolicy::new().with_max_retry_attempts(self.0)
    }
}

/// Processor that removes every inline item.
pub struct StrippingProcessor;

impl InlineContentItemsProcessor for StrippingProcessor {
    fn process(&self, content: &str, _context: &ResolutionContext<'_>) -> String {
        self.remove_all(content)
    }

    fn remove_all(&self, _content: &str) -> String {
        String::new()
    }
}

pub struct QuietUnknownResolver;

impl InlineContentItemsResolver<UnknownContentItem> for QuietUnknownResolver {
    fn resolve(&self, item: &UnknownContentItem) -> String {
        format!("<!-- {} -->", item.codename)
    }
}
