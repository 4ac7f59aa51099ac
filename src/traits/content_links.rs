//! Content link resolution trait

use serde::Deserialize;

/// A link to another content item found in rich text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContentLink {
    /// Identifier of the linked item.
    #[serde(default)]
    pub id: String,
    /// Codename of the linked item.
    pub codename: String,
    /// Content type of the linked item.
    #[serde(rename = "type")]
    pub content_type: String,
    /// URL slug of the linked item.
    #[serde(default)]
    pub url_slug: String,
}

/// Resolves links between content items to URLs.
///
/// A client without a resolver leaves links untouched.
pub trait ContentLinkUrlResolver: Send + Sync {
    /// URL for a link whose target was returned with the item.
    ///
    /// Returning `None` leaves the link as is.
    fn resolve_link_url(&self, link: &ContentLink) -> Option<String>;

    /// URL for a link whose target is not available (unpublished or deleted).
    fn resolve_broken_link_url(&self) -> Option<String>;
}
