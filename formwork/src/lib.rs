//! # formwork
//!
//! Themeable form models and HTML form-field rendering.
//!
//! This is the meta-crate that re-exports the sub-crates. Depend on
//! `formwork` to get everything, or on the individual crates for
//! finer-grained control.

/// Errors, settings, logging, and text/HTML utilities.
pub use formwork_core as core;

/// Form models, themes, and field rendering.
#[cfg(feature = "forms")]
pub use formwork_forms as forms;

/// Theme overrides, validator stubs, and HTML assertions for tests.
#[cfg(feature = "testing")]
pub use formwork_test as test;

/// Third-party crates re-exported for convenience.
pub use serde;
pub use serde_json;
pub use tracing;
pub use tracing_subscriber;
