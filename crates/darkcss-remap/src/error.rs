//! Error types for the remapping pipeline.
//!
//! Nothing in the pipeline is recovered locally: a malformed token means the
//! extraction step handed over something it should not have, so every variant
//! here is fatal to the run.

use thiserror::Error;

/// Errors produced while remapping a stylesheet.
#[derive(Debug, Error)]
pub enum RemapError {
    /// A color token could not be converted to RGB.
    #[error("invalid color token '{token}': {reason}")]
    InvalidColor { token: String, reason: String },

    /// The embedded palette failed validation.
    #[error("invalid palette: {message}")]
    Palette { message: String },

    /// A variant mapping is not a `property: value` declaration.
    #[error("invalid mapping '{mapping}': expected 'property: value'")]
    Mapping { mapping: String },

    /// The intro section or the combined variants file could not be rendered.
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    /// A section pattern or rewrite rule failed to compile.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl RemapError {
    pub(crate) fn invalid_color(token: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidColor {
            token: token.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn mapping(mapping: impl Into<String>) -> Self {
        Self::Mapping {
            mapping: mapping.into(),
        }
    }

    pub(crate) fn palette(message: impl Into<String>) -> Self {
        Self::Palette {
            message: message.into(),
        }
    }
}

/// Result type for remapping operations.
pub type Result<T> = std::result::Result<T, RemapError>;
