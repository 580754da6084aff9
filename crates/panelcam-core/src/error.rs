//! Error handling for the PanelCAM data model
//!
//! Provides the error types raised while constructing or validating
//! panels, tools and machining operations:
//! - Model errors (invalid numeric fields, empty paths)
//! - Tool lookup errors (unknown tool identifier)
//!
//! All error types use `thiserror` for ergonomic error handling.

use crate::data::tools::ToolId;
use thiserror::Error;

/// Model validation error
///
/// Raised when an entity would describe physically nonsensical motion.
/// Entities are rejected when they are built, never halfway through
/// program generation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// A path-bearing operation has no points
    #[error("{operation} path must contain at least one point")]
    EmptyPath {
        /// The kind of operation that carried the empty path.
        operation: &'static str,
    },

    /// A numeric field is NaN or infinite
    #[error("Field '{field}' must be finite, got {value}")]
    NonFinite {
        /// The name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A numeric field is below its allowed minimum
    #[error("Field '{field}' must be {constraint}, got {value}")]
    OutOfRange {
        /// The name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
        /// Human readable constraint ("positive", "non-negative").
        constraint: &'static str,
    },

    /// A catalog tool failed validation
    #[error("Tool '{id}' is invalid: {source}")]
    InvalidTool {
        /// The identifier of the rejected tool.
        id: ToolId,
        /// The underlying validation failure.
        #[source]
        source: Box<ModelError>,
    },

    /// An identifier is empty or whitespace only
    #[error("Identifier for {entity} must not be empty")]
    EmptyIdentifier {
        /// The kind of entity that carried the identifier.
        entity: &'static str,
    },
}

/// Tool lookup failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Tool '{0}' not found in catalog")]
pub struct ToolNotFound(pub ToolId);

/// Result type alias for model validation.
pub type ModelResult<T> = Result<T, ModelError>;

pub(crate) fn require_finite(field: &'static str, value: f64) -> ModelResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ModelError::NonFinite { field, value })
    }
}

pub(crate) fn require_non_negative(field: &'static str, value: f64) -> ModelResult<f64> {
    require_finite(field, value)?;
    if value < 0.0 {
        return Err(ModelError::OutOfRange {
            field,
            value,
            constraint: "non-negative",
        });
    }
    Ok(value)
}

pub(crate) fn require_positive(field: &'static str, value: f64) -> ModelResult<f64> {
    require_finite(field, value)?;
    if value <= 0.0 {
        return Err(ModelError::OutOfRange {
            field,
            value,
            constraint: "positive",
        });
    }
    Ok(value)
}

/// Feed rates print as whole mm/min, so anything below one would emit `F0`.
pub(crate) fn require_feed_rate(field: &'static str, value: f64) -> ModelResult<f64> {
    require_finite(field, value)?;
    if value < crate::units::MIN_FEED_RATE {
        return Err(ModelError::OutOfRange {
            field,
            value,
            constraint: "at least 1 mm/min",
        });
    }
    Ok(value)
}
