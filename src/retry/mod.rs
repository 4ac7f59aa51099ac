//! Retry module (ergonomic namespace)
//! - policy.rs: policy-based retries with exponential backoff delays

pub mod policy;

pub use policy::*;
