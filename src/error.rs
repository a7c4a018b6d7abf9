//! Error types for the estimation engine.

use std::time::Duration;

/// Errors that abort an estimate.
///
/// Only these two conditions are surfaced to callers. Catalog failures are
/// recovered inside the aggregator and show up as lowered confidence instead.
#[derive(Debug, thiserror::Error)]
pub enum EstimateError {
    /// No project template matches the requested project type.
    #[error("No project template matches '{project_type}'")]
    TemplateNotFound { project_type: String },

    /// A request parameter is out of range or not a recognised value.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },
}

impl EstimateError {
    pub(crate) fn invalid(name: &str, reason: impl Into<String>) -> Self {
        EstimateError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors raised by pricing catalogs and catalog data loading.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The backing store could not be reached.
    #[error("{catalog} catalog unavailable: {reason}")]
    Unavailable { catalog: String, reason: String },

    /// The query did not complete within the configured timeout.
    #[error("{catalog} catalog query timed out after {timeout:?}")]
    Timeout { catalog: String, timeout: Duration },

    /// A catalog item violates one of its data invariants.
    #[error("Invalid catalog item '{id}': {reason}")]
    InvalidItem { id: String, reason: String },

    /// A catalog snapshot file could not be read or parsed.
    #[error("Snapshot error: {reason}")]
    Snapshot { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CatalogError {
    pub(crate) fn invalid_item(id: &str, reason: impl Into<String>) -> Self {
        CatalogError::InvalidItem {
            id: id.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while reading engine configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}
