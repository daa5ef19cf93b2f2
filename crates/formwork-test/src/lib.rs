//! # formwork-test
//!
//! Testing utilities for formwork. Provides thread-local theme overrides so
//! parallel tests can render against different themes, a validator stub that
//! returns canned errors, and assertions for comparing rendered HTML.

pub mod assertions;
pub mod override_themes;
pub mod validator;

pub use assertions::{assert_html_contains, assert_html_eq};
pub use override_themes::{override_themes, ThemeOverride};
pub use validator::StubValidator;
