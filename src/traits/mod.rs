//! Capability traits
//!
//! Each trait is one collaborator role of [`DeliveryClient`](crate::DeliveryClient).
//! All of them require `Send + Sync` so an assembled client can be shared
//! across threads.

pub mod content_links;
pub mod inline_items;
pub mod model;
pub mod resilience;

pub use content_links::{ContentLink, ContentLinkUrlResolver};
pub use inline_items::{
    InlineContentItem, InlineContentItemsProcessor, InlineContentItemsResolver,
    ResolutionContext, UnknownContentItem, UnretrievedContentItem,
};
pub use model::{ContentItemModel, ModelProvider, PropertyMapper, TypeProvider};
pub use resilience::ResiliencePolicyProvider;
