//! # delivery-client - Assembly of a content Delivery API client
//!
//! The crate builds a fully configured [`DeliveryClient`] from a project
//! identity plus any number of optional collaborators. Collaborators the caller
//! does not supply are filled in with defaults.
//!
#![deny(unsafe_code)]

//! ## Features
//!
//! - **Staged Builder**: the project identity must be supplied before anything
//!   else; `build` is only reachable afterwards.
//! - **Override Precedence**: a collaborator supplied by the caller always wins
//!   over a built-in default, regardless of call order.
//! - **Lazy Defaults**: each default is constructed at most once, and only when
//!   a capability is still unbound.
//! - **Validated Options**: options are checked at the builder's terminal
//!   `build`; API keys are kept in `secrecy::SecretString`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use delivery_client::prelude::*;
//!
//! struct ShoutingMapper;
//!
//! impl PropertyMapper for ShoutingMapper {
//!     fn property_name(&self, field_codename: &str) -> String {
//!         field_codename.to_uppercase()
//!     }
//! }
//!
//! fn main() -> Result<()> {
//!     let client = DeliveryClientBuilder::new()
//!         .with_delivery_options(|options| {
//!             Ok(options
//!                 .with_project_id("e5629811-ddaa-4c2b-80d2-fa91e16bb264")?
//!                 .enable_resilience_logic()
//!                 .with_max_retry_attempts(3))
//!         })?
//!         .with_property_mapper(Arc::new(ShoutingMapper) as Arc<dyn PropertyMapper>)
//!         .build()?;
//!
//!     println!("{}", client.base_url());
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod client;
pub mod config;
pub mod defaults;
pub mod error;
pub mod registry;
pub mod retry;
pub mod traits;

pub use builder::DeliveryClientBuilder;
pub use client::DeliveryClient;
pub use config::{DeliveryOptions, DeliveryOptionsBuilder, DeliveryOptionsConfig};
pub use error::{DeliveryError, Result};
pub use registry::{Capability, Registry};
pub use retry::RetryPolicy;

/// Commonly used types and traits
pub mod prelude {
    pub use crate::builder::{DeliveryClientBuilder, Mandatory, Optional};
    pub use crate::client::DeliveryClient;
    pub use crate::config::{DeliveryOptions, DeliveryOptionsBuilder};
    pub use crate::error::{DeliveryError, Result};
    pub use crate::retry::RetryPolicy;
    pub use crate::traits::*;
}
