//! Inline content item traits
//!
//! Rich text can embed other content items. A processor replaces each
//! embedded item with the output of a resolver picked by the item's state:
//! a type-specific resolver, the unknown-type fallback, or the unretrieved
//! fallback.

use serde_json::Value;

/// An inline item that was returned with the response.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineContentItem {
    pub codename: String,
    pub content_type: String,
    /// Raw `elements` object of the item.
    pub elements: Value,
}

/// An inline item whose content type has no registered resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownContentItem {
    pub codename: String,
    pub content_type: String,
}

/// An inline item that was not returned, typically because of depth or
/// response size limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnretrievedContentItem {
    pub codename: String,
}

/// Produces the replacement text for one inline item.
pub trait InlineContentItemsResolver<T>: Send + Sync {
    fn resolve(&self, item: &T) -> String;
}

/// Lookup of linked items available while processing one response.
#[derive(Debug, Clone, Copy)]
pub struct ResolutionContext<'a> {
    linked_items: &'a Value,
}

impl<'a> ResolutionContext<'a> {
    /// Wrap the linked items object of a response (`modular_content`).
    pub const fn new(linked_items: &'a Value) -> Self {
        Self { linked_items }
    }

    /// Raw JSON of a linked item.
    pub fn item(&self, codename: &str) -> Option<&'a Value> {
        self.linked_items.get(codename)
    }

    /// Linked item as an [`InlineContentItem`], if it was retrieved.
    pub fn content_item(&self, codename: &str) -> Option<InlineContentItem> {
        let item = self.item(codename)?;
        let content_type = item
            .pointer("/system/type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        Some(InlineContentItem {
            codename: codename.to_string(),
            content_type,
            elements: item.get("elements").cloned().unwrap_or(Value::Null),
        })
    }
}

/// Replaces inline content items in rich text.
pub trait InlineContentItemsProcessor: Send + Sync {
    /// Replace every inline item in `content` using the linked items in `context`.
    fn process(&self, content: &str, context: &ResolutionContext<'_>) -> String;

    /// Strip every inline item from `content`.
    fn remove_all(&self, content: &str) -> String;
}
