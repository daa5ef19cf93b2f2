//! Theme override utility for tests.
//!
//! [`override_themes`] installs a [`ThemeContainer`] as the current thread's
//! theme registry for the duration of a closure. Fields rendered inside the
//! closure without an explicit container resolve their options from it.
//! Overrides nest, and each thread has its own stack, so parallel tests do
//! not see each other's themes.
//!
//! ## Example
//!
//! ```rust
//! use formwork_forms::prelude::*;
//! use formwork_test::override_themes::{override_themes, ThemeOverride};
//!
//! let overrides = ThemeOverride::new().set_default_options(FieldOptions {
//!     container_class: Some(ClassList::from(["wrapper", "red"])),
//!     ..FieldOptions::default()
//! });
//!
//! let schema = FormSchema::builder("TextForm").attribute("job", [TypeTag::String]).build();
//! let form = FormModel::new(&schema);
//! let html = override_themes(overrides, || Field::text(&form, "job").unwrap().render());
//! assert!(html.starts_with(r#"<div class="wrapper red">"#));
//! ```

use std::sync::Arc;

use formwork_core::settings::Settings;
use formwork_core::FormResult;
use formwork_forms::enricher::{RulesEnricher, ValidationRulesEnricher};
use formwork_forms::field::FieldKind;
use formwork_forms::theme::{self, load_json_str, FieldOptions, ThemeConfig, ThemeContainer};

/// A builder for the themes installed by [`override_themes`].
///
/// Starts from an empty container whose default theme is `"default"`.
#[derive(Debug, Clone, Default)]
pub struct ThemeOverride {
    container: ThemeContainer,
}

impl ThemeOverride {
    /// Creates an override with no themes registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from a container built from settings.
    pub fn from_settings(settings: &Settings) -> FormResult<Self> {
        Ok(Self {
            container: ThemeContainer::from_settings(settings)?,
        })
    }

    /// Registers `config` under `name`.
    #[must_use]
    pub fn set_theme(mut self, name: &str, config: ThemeConfig) -> Self {
        self.container = self.container.theme(name, config);
        self
    }

    /// Registers a theme given as JSON.
    ///
    /// # Panics
    ///
    /// Panics if `json` is not a valid theme.
    #[must_use]
    pub fn set_theme_json(self, name: &str, json: &serde_json::Value) -> Self {
        let config = load_json_str(&json.to_string())
            .unwrap_or_else(|e| panic!("Invalid theme '{name}': {e}"));
        self.set_theme(name, config)
    }

    /// Replaces the shared options of the default theme, keeping its
    /// per-kind options.
    #[must_use]
    pub fn set_default_options(mut self, options: FieldOptions) -> Self {
        let name = self.container.default_name().to_string();
        let mut config = self.container.get(&name).cloned().unwrap_or_default();
        config.options = options;
        self.container = self.container.theme(name, config);
        self
    }

    /// Sets the per-kind options of the default theme.
    #[must_use]
    pub fn set_field_config(mut self, kind: FieldKind, options: FieldOptions) -> Self {
        let name = self.container.default_name().to_string();
        let config = self
            .container
            .get(&name)
            .cloned()
            .unwrap_or_default()
            .field_config(kind, options);
        self.container = self.container.theme(name, config);
        self
    }

    /// Sets the name of the default theme.
    #[must_use]
    pub fn set_default_theme(mut self, name: &str) -> Self {
        self.container = self.container.default_config(name);
        self
    }

    /// Installs a rules enricher.
    #[must_use]
    pub fn set_enricher(mut self, enricher: Arc<dyn ValidationRulesEnricher>) -> Self {
        self.container = self.container.with_enricher(enricher);
        self
    }

    /// Installs the standard [`RulesEnricher`].
    #[must_use]
    pub fn set_rules_enricher(self) -> Self {
        self.set_enricher(Arc::new(RulesEnricher))
    }

    /// Returns the built container.
    pub fn build(self) -> ThemeContainer {
        self.container
    }
}

/// Runs `f` with the overridden themes as this thread's current registry.
///
/// The override is removed afterwards, even if `f` panics.
pub fn override_themes<F, R>(overrides: ThemeOverride, f: F) -> R
where
    F: FnOnce() -> R,
{
    theme::scoped(Arc::new(overrides.build()), f)
}

/// The container fields on this thread currently resolve against.
pub fn current_themes() -> Arc<ThemeContainer> {
    theme::current()
}
