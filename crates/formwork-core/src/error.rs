//! Core error types for formwork.
//!
//! Every variant of [`FormError`] describes a programming mistake in the
//! calling code: reading an attribute the model never declared, addressing a
//! non-model attribute with a dotted path, passing an empty tag name, or
//! handing the loader a malformed configuration file. Type mismatches while
//! assigning attribute values are never errors; the model stores its best
//! coercion instead.

use thiserror::Error;

/// The error type shared by all formwork crates.
#[derive(Error, Debug)]
pub enum FormError {
    // ── Model errors ─────────────────────────────────────────────────

    /// An attribute was read that the model does not declare.
    #[error("Undefined property: \"{form}::{attribute}\".")]
    UndefinedAttribute {
        /// The model's form name (may be empty for anonymous models).
        form: String,
        /// The attribute that was requested.
        attribute: String,
    },

    /// A dotted path traversed an attribute that is not a nested model.
    #[error("Attribute \"{0}\" is not a nested attribute.")]
    NotNestedAttribute(String),

    /// A tabular attribute expression referenced an unknown attribute.
    #[error("Attribute '{0}' does not exist.")]
    AttributeNotFound(String),

    /// A tabular attribute expression could not be parsed.
    #[error("Attribute name must contain word characters only.")]
    InvalidAttributeName(String),

    /// Tabular input names require a non-empty form name.
    #[error("formName() cannot be empty for tabular inputs.")]
    EmptyFormName,

    // ── Rendering errors ─────────────────────────────────────────────

    /// A required HTML tag name was empty.
    #[error("Tag name cannot be empty.")]
    EmptyTagName,

    // ── Configuration ────────────────────────────────────────────────

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred while reading configuration.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl FormError {
    /// Returns `true` for errors raised by model access (as opposed to
    /// rendering or configuration loading).
    pub const fn is_model_error(&self) -> bool {
        matches!(
            self,
            Self::UndefinedAttribute { .. }
                | Self::NotNestedAttribute(_)
                | Self::AttributeNotFound(_)
                | Self::InvalidAttributeName(_)
                | Self::EmptyFormName
        )
    }

    /// Returns `true` for mistakes in the calling code or its configuration.
    /// Only I/O failures can happen in correct programs.
    pub const fn is_configuration_error(&self) -> bool {
        !matches!(self, Self::IoError(_))
    }

    /// Creates an [`FormError::UndefinedAttribute`] error.
    pub fn undefined(form: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::UndefinedAttribute {
            form: form.into(),
            attribute: attribute.into(),
        }
    }
}

/// A convenience type alias for `Result<T, FormError>`.
pub type FormResult<T> = Result<T, FormError>;
