//! Options validation rules
//!
//! Single-argument checks are used by the builder setters; the cross-field
//! check runs once, when the options are built.

use secrecy::{ExposeSecret, SecretString};
use uuid::Uuid;

use super::DeliveryOptions;
use crate::error::{DeliveryError, Result};

/// Reject an empty string argument.
pub fn validate_not_empty(value: &str, field: &'static str) -> Result<()> {
    if value.is_empty() {
        return Err(DeliveryError::argument_missing(field));
    }
    Ok(())
}

/// Check that a project identifier is present and parses as a UUID.
pub fn validate_project_id(project_id: &str) -> Result<()> {
    validate_not_empty(project_id, "project_id")?;

    // `Uuid::parse_str` also accepts the URN form; project ids never use it.
    let is_urn = project_id
        .get(..4)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("urn:"));
    if is_urn || Uuid::parse_str(project_id).is_err() {
        return Err(DeliveryError::invalid_format(
            "project_id",
            format!(
                "Provided string is not a valid project identifier ({project_id}). \
                 Haven't you accidentally passed the Preview API key instead of the project identifier?"
            ),
        ));
    }
    Ok(())
}

/// Check that a preview API key is present.
pub fn validate_preview_api_key(preview_api_key: &str) -> Result<()> {
    validate_not_empty(preview_api_key, "preview_api_key")
}

fn has_value(key: Option<&SecretString>) -> bool {
    key.is_some_and(|k| !k.expose_secret().is_empty())
}

/// Validate a complete options value, in order: project identifier, preview
/// key consistency, secured production key consistency.
pub fn validate_options(options: &DeliveryOptions) -> Result<()> {
    validate_project_id(&options.project_id)?;

    if options.use_preview_api && !has_value(options.preview_api_key.as_ref()) {
        return Err(DeliveryError::configuration_inconsistent(
            "preview_api_key",
            "Preview API is enabled but the Preview API key is not specified",
        ));
    }

    if options.use_secured_production_api
        && !has_value(options.secured_production_api_key.as_ref())
    {
        return Err(DeliveryError::configuration_inconsistent(
            "secured_production_api_key",
            "Secured production API is enabled but its API key is not specified",
        ));
    }

    Ok(())
}
