//! Default code-first model collaborators

use std::collections::BTreeMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::{Map, Value};

use crate::error::{DeliveryError, Result};
use crate::traits::{
    ContentItemModel, ContentLink, ContentLinkUrlResolver, InlineContentItemsProcessor,
    ModelProvider, PropertyMapper, ResolutionContext, TypeProvider,
};

static CONTENT_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<a data-item-id="([^"]*)" href="">"#).expect("content link pattern is valid")
});

/// Maps `snake_case` field codenames to `PascalCase` property names.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPropertyMapper;

impl PropertyMapper for DefaultPropertyMapper {
    fn property_name(&self, field_codename: &str) -> String {
        field_codename
            .split('_')
            .filter(|part| !part.is_empty())
            .map(|part| {
                let mut chars = part.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect()
    }
}

/// Model provider assembled from the other capabilities.
///
/// The content link resolver and the type provider are optional; without
/// them links are left as returned and models carry no strong type.
#[derive(Clone)]
pub struct DefaultModelProvider {
    content_link_url_resolver: Option<Arc<dyn ContentLinkUrlResolver>>,
    inline_content_items_processor: Arc<dyn InlineContentItemsProcessor>,
    type_provider: Option<Arc<dyn TypeProvider>>,
    property_mapper: Arc<dyn PropertyMapper>,
}

impl DefaultModelProvider {
    pub fn new(
        content_link_url_resolver: Option<Arc<dyn ContentLinkUrlResolver>>,
        inline_content_items_processor: Arc<dyn InlineContentItemsProcessor>,
        type_provider: Option<Arc<dyn TypeProvider>>,
        property_mapper: Arc<dyn PropertyMapper>,
    ) -> Self {
        Self {
            content_link_url_resolver,
            inline_content_items_processor,
            type_provider,
            property_mapper,
        }
    }

    pub fn content_link_url_resolver(&self) -> Option<&Arc<dyn ContentLinkUrlResolver>> {
        self.content_link_url_resolver.as_ref()
    }

    pub fn inline_content_items_processor(&self) -> &Arc<dyn InlineContentItemsProcessor> {
        &self.inline_content_items_processor
    }

    pub fn type_provider(&self) -> Option<&Arc<dyn TypeProvider>> {
        self.type_provider.as_ref()
    }

    pub fn property_mapper(&self) -> &Arc<dyn PropertyMapper> {
        &self.property_mapper
    }

    fn resolve_links(&self, html: &str, links: Option<&Map<String, Value>>) -> String {
        let Some(resolver) = &self.content_link_url_resolver else {
            return html.to_string();
        };

        CONTENT_LINK
            .replace_all(html, |caps: &Captures<'_>| {
                let id = &caps[1];
                let link = links
                    .and_then(|links| links.get(id))
                    .and_then(|raw| serde_json::from_value::<ContentLink>(raw.clone()).ok())
                    .map(|mut link| {
                        link.id = id.to_string();
                        link
                    });

                let url = match link {
                    Some(link) => resolver.resolve_link_url(&link),
                    None => resolver.resolve_broken_link_url(),
                };

                match url {
                    Some(url) => format!(
                        r#"<a data-item-id="{id}" href="{}">"#,
                        url.replace('"', "&quot;")
                    ),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }

    fn element_value(&self, element: &Value, context: &ResolutionContext<'_>) -> Value {
        let value = element.get("value").cloned().unwrap_or(Value::Null);
        let is_rich_text = element.get("type").and_then(Value::as_str) == Some("rich_text");

        match value {
            Value::String(html) if is_rich_text => {
                let links = element.get("links").and_then(Value::as_object);
                let linked = self.resolve_links(&html, links);
                Value::String(self.inline_content_items_processor.process(&linked, context))
            }
            other => other,
        }
    }
}

impl std::fmt::Debug for DefaultModelProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultModelProvider")
            .field(
                "content_link_url_resolver",
                &self.content_link_url_resolver.is_some(),
            )
            .field("type_provider", &self.type_provider.is_some())
            .finish_non_exhaustive()
    }
}

fn system_str<'a>(system: &'a Value, key: &str) -> Result<&'a str> {
    system
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| DeliveryError::Json(format!("content item system.{key} is missing")))
}

impl ModelProvider for DefaultModelProvider {
    fn content_item_model(&self, item: &Value, linked_items: &Value) -> Result<ContentItemModel> {
        let system = item
            .get("system")
            .ok_or_else(|| DeliveryError::Json("content item has no system object".to_string()))?;
        let codename = system_str(system, "codename")?;
        let content_type = system_str(system, "type")?;

        let context = ResolutionContext::new(linked_items);
        let mut properties = BTreeMap::new();
        if let Some(elements) = item.get("elements").and_then(Value::as_object) {
            for (field, element) in elements {
                properties.insert(
                    self.property_mapper.property_name(field),
                    self.element_value(element, &context),
                );
            }
        }

        Ok(ContentItemModel {
            codename: codename.to_string(),
            content_type: content_type.to_string(),
            model_type: self
                .type_provider
                .as_ref()
                .and_then(|provider| provider.type_for(content_type)),
            properties,
        })
    }
}
