//! Default Collaborators
//!
//! Implementations bound by [`Registry::register_defaults`](crate::registry::Registry::register_defaults)
//! for every capability the caller leaves unset. The content link resolver and
//! the type provider have no default.

pub mod inline_items;
pub mod model;
pub mod resilience;

pub use inline_items::{
    DefaultInlineContentItemsProcessor, WarnAboutRegistrationResolver,
    WarnAboutUnretrievedItemResolver,
};
pub use model::{DefaultModelProvider, DefaultPropertyMapper};
pub use resilience::DefaultResiliencePolicyProvider;
