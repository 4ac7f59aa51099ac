//! Code-first model traits

use std::any::TypeId;
use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::Result;

/// Maps a content type codename to a strong Rust type.
pub trait TypeProvider: Send + Sync {
    fn type_for(&self, content_type: &str) -> Option<TypeId>;
}

/// Maps a field codename to the name of the model property it fills.
pub trait PropertyMapper: Send + Sync {
    fn property_name(&self, field_codename: &str) -> String;
}

/// A content item mapped onto model properties.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentItemModel {
    pub codename: String,
    pub content_type: String,
    /// Strong type registered for `content_type`, if a type provider knows it.
    pub model_type: Option<TypeId>,
    /// Property name to element value.
    pub properties: BTreeMap<String, Value>,
}

/// Builds models from raw content items.
pub trait ModelProvider: Send + Sync {
    /// Map one item; `linked_items` is the response's linked items object.
    fn content_item_model(&self, item: &Value, linked_items: &Value) -> Result<ContentItemModel>;
}
