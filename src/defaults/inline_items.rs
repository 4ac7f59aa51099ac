//! Default inline content item handling
//!
//! The two fallback resolvers never drop an item silently: they replace it
//! with a visible warning and log the condition.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::traits::{
    InlineContentItem, InlineContentItemsProcessor, InlineContentItemsResolver,
    ResolutionContext, UnknownContentItem, UnretrievedContentItem,
};

static INLINE_ITEM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?s)<object\s[^>]*type="application/kenticocloud"[^>]*data-codename="([^"]*)"[^>]*>\s*</object>"#,
    )
    .expect("inline item pattern is valid")
});

/// Fallback for items whose content type has no registered resolver.
#[derive(Debug, Clone, Copy, Default)]
pub struct WarnAboutRegistrationResolver;

impl InlineContentItemsResolver<UnknownContentItem> for WarnAboutRegistrationResolver {
    fn resolve(&self, item: &UnknownContentItem) -> String {
        tracing::warn!(
            codename = %item.codename,
            content_type = %item.content_type,
            "No resolver registered for inline content item type"
        );
        format!(
            "[Inline content item '{}' of type '{}' has no registered resolver. \
             Register a resolver for this content type with the inline content items processor.]",
            item.codename, item.content_type
        )
    }
}

/// Fallback for items that were not part of the response.
#[derive(Debug, Clone, Copy, Default)]
pub struct WarnAboutUnretrievedItemResolver;

impl InlineContentItemsResolver<UnretrievedContentItem> for WarnAboutUnretrievedItemResolver {
    fn resolve(&self, item: &UnretrievedContentItem) -> String {
        tracing::warn!(codename = %item.codename, "Inline content item was not retrieved");
        format!(
            "[Inline content item '{}' could not be retrieved. \
             It may exceed the depth or response size limits of the request.]",
            item.codename
        )
    }
}

/// Processor that picks a resolver per inline item.
#[derive(Clone)]
pub struct DefaultInlineContentItemsProcessor {
    unknown_item_resolver: Arc<dyn InlineContentItemsResolver<UnknownContentItem>>,
    unretrieved_item_resolver: Arc<dyn InlineContentItemsResolver<UnretrievedContentItem>>,
    type_resolvers: HashMap<String, Arc<dyn InlineContentItemsResolver<InlineContentItem>>>,
}

impl DefaultInlineContentItemsProcessor {
    pub fn new(
        unknown_item_resolver: Arc<dyn InlineContentItemsResolver<UnknownContentItem>>,
        unretrieved_item_resolver: Arc<dyn InlineContentItemsResolver<UnretrievedContentItem>>,
    ) -> Self {
        Self {
            unknown_item_resolver,
            unretrieved_item_resolver,
            type_resolvers: HashMap::new(),
        }
    }

    /// Register a resolver for items of `content_type`. A later registration
    /// for the same type replaces the earlier one.
    pub fn with_type_resolver(
        mut self,
        content_type: impl Into<String>,
        resolver: Arc<dyn InlineContentItemsResolver<InlineContentItem>>,
    ) -> Self {
        self.type_resolvers.insert(content_type.into(), resolver);
        self
    }

    fn resolve_item(&self, codename: &str, context: &ResolutionContext<'_>) -> String {
        let Some(item) = context.content_item(codename) else {
            return self.unretrieved_item_resolver.resolve(&UnretrievedContentItem {
                codename: codename.to_string(),
            });
        };

        match self.type_resolvers.get(&item.content_type) {
            Some(resolver) => resolver.resolve(&item),
            None => self.unknown_item_resolver.resolve(&UnknownContentItem {
                codename: item.codename,
                content_type: item.content_type,
            }),
        }
    }
}

impl std::fmt::Debug for DefaultInlineContentItemsProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut types: Vec<&String> = self.type_resolvers.keys().collect();
        types.sort();
        f.debug_struct("DefaultInlineContentItemsProcessor")
            .field("type_resolvers", &types)
            .finish_non_exhaustive()
    }
}

impl InlineContentItemsProcessor for DefaultInlineContentItemsProcessor {
    fn process(&self, content: &str, context: &ResolutionContext<'_>) -> String {
        INLINE_ITEM
            .replace_all(content, |caps: &Captures<'_>| {
                self.resolve_item(&caps[1], context)
            })
            .into_owned()
    }

    fn remove_all(&self, content: &str) -> String {
        INLINE_ITEM.replace_all(content, "").into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tracing_test::traced_test;

    struct TweetResolver;

    impl InlineContentItemsResolver<InlineContentItem> for TweetResolver {
        fn resolve(&self, item: &InlineContentItem) -> String {
            let url = item
                .elements
                .pointer("/url/value")
                .and_then(|v| v.as_str())
                .unwrap_or_default();
            format!("<blockquote>{url}</blockquote>")
        }
    }

    fn inline(codename: &str) -> String {
        format!(
            r#"<object type="application/kenticocloud" data-type="item" data-codename="{codename}"></object>"#
        )
    }

    fn processor() -> DefaultInlineContentItemsProcessor {
        DefaultInlineContentItemsProcessor::new(
            Arc::new(WarnAboutRegistrationResolver),
            Arc::new(WarnAboutUnretrievedItemResolver),
        )
    }

    fn linked_items() -> serde_json::Value {
        json!({
            "tweet_1": {
                "system": { "codename": "tweet_1", "type": "tweet" },
                "elements": { "url": { "type": "text", "value": "https://t.example/1" } }
            },
            "video_1": {
                "system": { "codename": "video_1", "type": "hosted_video" },
                "elements": {}
            }
        })
    }

    #[test]
    fn registered_type_resolver_is_used() {
        let processor = processor().with_type_resolver("tweet", Arc::new(TweetResolver));
        let linked = linked_items();
        let content = format!("<p>Before</p>{}<p>After</p>", inline("tweet_1"));

        let output = processor.process(&content, &ResolutionContext::new(&linked));
        assert_eq!(
            output,
            "<p>Before</p><blockquote>https://t.example/1</blockquote><p>After</p>"
        );
    }

    #[test]
    #[traced_test]
    fn unregistered_type_gets_warning() {
        let linked = linked_items();
        let output = processor().process(&inline("video_1"), &ResolutionContext::new(&linked));

        assert!(output.contains("video_1"));
        assert!(output.contains("hosted_video"));
        assert!(logs_contain("No resolver registered"));
    }

    #[test]
    #[traced_test]
    fn missing_item_gets_unretrieved_warning() {
        let linked = linked_items();
        let output = processor().process(&inline("gone"), &ResolutionContext::new(&linked));

        assert!(output.contains("'gone' could not be retrieved"));
        assert!(logs_contain("was not retrieved"));
    }

    #[test]
    fn remove_all_strips_inline_items() {
        let content = format!("<p>A</p>{}<p>B</p>{}", inline("x"), inline("y"));
        assert_eq!(processor().remove_all(&content), "<p>A</p><p>B</p>");
    }

    #[test]
    fn content_without_items_is_unchanged() {
        let linked = json!({});
        let content = "<p>Plain <strong>text</strong></p>";
        assert_eq!(
            processor().process(content, &ResolutionContext::new(&linked)),
            content
        );
    }
}
