//! # formwork-core
//!
//! Core types, settings, and error types for the formwork crates.
//! This crate has no dependency on the rendering layer and provides the
//! foundation the other crates build on.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`utils`] - Text and HTML helpers (label humanization, escaping)
//! - [`settings`] - Runtime settings and global configuration
//! - [`settings_loader`] - Loading settings from TOML, JSON, and the environment
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;
pub mod utils;

// Re-export the most commonly used types at the crate root.
pub use error::{FormError, FormResult};
pub use settings::{Settings, SETTINGS};
