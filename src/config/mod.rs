//! Client configuration
//!
//! - `options`: the validated [`DeliveryOptions`] value and its defaults
//! - `builder`: [`DeliveryOptionsBuilder`], the only way to produce options
//! - `validation`: single-field and cross-field rules
//! - `source`: loading raw options from serde sources or the environment

pub mod builder;
pub mod options;
pub mod source;
pub mod validation;

pub use builder::DeliveryOptionsBuilder;
pub use options::{
    DEFAULT_MAX_RETRY_ATTEMPTS, DEFAULT_PREVIEW_ENDPOINT, DEFAULT_PRODUCTION_ENDPOINT,
    DeliveryOptions,
};
pub use source::DeliveryOptionsConfig;
