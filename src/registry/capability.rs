//! Capability identifiers and bindings
//!
//! The set of capabilities is closed: every role the client can be wired with
//! is a [`Capability`] variant, and only the handle types listed here can be
//! stored in a [`Registry`](super::Registry).

use std::fmt;
use std::sync::Arc;

use crate::config::DeliveryOptions;
use crate::traits::{
    ContentLinkUrlResolver, InlineContentItemsProcessor, InlineContentItemsResolver,
    ModelProvider, PropertyMapper, ResiliencePolicyProvider, TypeProvider, UnknownContentItem,
    UnretrievedContentItem,
};

/// Collaborator role bound in a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Capability {
    Options,
    ContentLinkUrlResolver,
    TypeProvider,
    UnknownItemResolver,
    UnretrievedItemResolver,
    InlineContentItemsProcessor,
    PropertyMapper,
    ModelProvider,
    ResiliencePolicyProvider,
}

impl Capability {
    /// Every capability, in declaration order.
    pub const ALL: [Self; 9] = [
        Self::Options,
        Self::ContentLinkUrlResolver,
        Self::TypeProvider,
        Self::UnknownItemResolver,
        Self::UnretrievedItemResolver,
        Self::InlineContentItemsProcessor,
        Self::PropertyMapper,
        Self::ModelProvider,
        Self::ResiliencePolicyProvider,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Options => "options",
            Self::ContentLinkUrlResolver => "content_link_url_resolver",
            Self::TypeProvider => "type_provider",
            Self::UnknownItemResolver => "unknown_item_resolver",
            Self::UnretrievedItemResolver => "unretrieved_item_resolver",
            Self::InlineContentItemsProcessor => "inline_content_items_processor",
            Self::PropertyMapper => "property_mapper",
            Self::ModelProvider => "model_provider",
            Self::ResiliencePolicyProvider => "resilience_policy_provider",
        }
    }

    /// Whether a client may legitimately be assembled without this capability.
    pub const fn is_optional(self) -> bool {
        matches!(self, Self::ContentLinkUrlResolver | Self::TypeProvider)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A shared instance bound to one capability.
#[derive(Clone)]
pub enum Binding {
    Options(Arc<DeliveryOptions>),
    ContentLinkUrlResolver(Arc<dyn ContentLinkUrlResolver>),
    TypeProvider(Arc<dyn TypeProvider>),
    UnknownItemResolver(Arc<dyn InlineContentItemsResolver<UnknownContentItem>>),
    UnretrievedItemResolver(Arc<dyn InlineContentItemsResolver<UnretrievedContentItem>>),
    InlineContentItemsProcessor(Arc<dyn InlineContentItemsProcessor>),
    PropertyMapper(Arc<dyn PropertyMapper>),
    ModelProvider(Arc<dyn ModelProvider>),
    ResiliencePolicyProvider(Arc<dyn ResiliencePolicyProvider>),
}

impl Binding {
    pub const fn capability(&self) -> Capability {
        match self {
            Self::Options(_) => Capability::Options,
            Self::ContentLinkUrlResolver(_) => Capability::ContentLinkUrlResolver,
            Self::TypeProvider(_) => Capability::TypeProvider,
            Self::UnknownItemResolver(_) => Capability::UnknownItemResolver,
            Self::UnretrievedItemResolver(_) => Capability::UnretrievedItemResolver,
            Self::InlineContentItemsProcessor(_) => Capability::InlineContentItemsProcessor,
            Self::PropertyMapper(_) => Capability::PropertyMapper,
            Self::ModelProvider(_) => Capability::ModelProvider,
            Self::ResiliencePolicyProvider(_) => Capability::ResiliencePolicyProvider,
        }
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Binding").field(&self.capability()).finish()
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Handle types that can be stored in a registry.
///
/// Sealed; implemented for `Arc<DeliveryOptions>` and `Arc<dyn Trait>` of
/// every capability trait.
pub trait Bindable: Clone + sealed::Sealed + 'static {
    const CAPABILITY: Capability;

    fn into_binding(self) -> Binding;

    fn from_binding(binding: &Binding) -> Option<Self>;
}

macro_rules! impl_bindable {
    ($($variant:ident => $ty:ty),+ $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Bindable for $ty {
                const CAPABILITY: Capability = Capability::$variant;

                fn into_binding(self) -> Binding {
                    Binding::$variant(self)
                }

                fn from_binding(binding: &Binding) -> Option<Self> {
                    match binding {
                        Binding::$variant(instance) => Some(instance.clone()),
                        _ => None,
                    }
                }
            }
        )+
    };
}

impl_bindable! {
    Options => Arc<DeliveryOptions>,
    ContentLinkUrlResolver => Arc<dyn ContentLinkUrlResolver>,
    TypeProvider => Arc<dyn TypeProvider>,
    UnknownItemResolver => Arc<dyn InlineContentItemsResolver<UnknownContentItem>>,
    UnretrievedItemResolver => Arc<dyn InlineContentItemsResolver<UnretrievedContentItem>>,
    InlineContentItemsProcessor => Arc<dyn InlineContentItemsProcessor>,
    PropertyMapper => Arc<dyn PropertyMapper>,
    ModelProvider => Arc<dyn ModelProvider>,
    ResiliencePolicyProvider => Arc<dyn ResiliencePolicyProvider>,
}
