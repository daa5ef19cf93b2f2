//! Themes: named bundles of default rendering options.
//!
//! A field resolves its effective options in layers, each layer only
//! replacing the options it sets:
//!
//! 1. built-in defaults ([`FieldOptions::builtin`]),
//! 2. the container's default theme,
//! 3. the theme requested by the field, if it differs from the default,
//! 4. the theme's `fieldConfigs` entry for the field's kind,
//! 5. the options set on the field instance.
//!
//! Fields take their [`ThemeContainer`] explicitly through
//! [`FieldOptionsExt::with_themes`](crate::field::FieldOptionsExt::with_themes).
//! Without one they use the process-wide registry replaced by
//! [`initialize`] (or [`initialize_from_settings`]), or the innermost
//! container installed on the current thread with [`scoped`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use formwork_core::settings::{Settings, SETTINGS};
use formwork_core::settings_loader::toml_str_to_json;
use formwork_core::{FormError, FormResult};
use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::enricher::{RulesEnricher, ValidationRulesEnricher};
use crate::field::FieldKind;
use crate::html::{Attributes, ClassList};
use crate::template::DEFAULT_TEMPLATE;

/// The Bootstrap 5 vertical-layout theme, as TOML.
pub const BOOTSTRAP5_VERTICAL: &str = include_str!("../themes/bootstrap5-vertical.toml");

/// Replaces each listed field of `$lower` that is set in `$upper`.
macro_rules! overlay_fields {
    ($lower:ident, $upper:ident; $($field:ident),* $(,)?) => {
        $(
            if $upper.$field.is_some() {
                $lower.$field.clone_from(&$upper.$field);
            }
        )*
    };
}

/// Options of a label, hint or error part.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartConfig {
    /// Element name; `label` for labels and `div` otherwise.
    pub tag: Option<String>,
    /// Extra attributes.
    pub attributes: Option<Attributes>,
    /// Extra classes.
    pub class: Option<ClassList>,
    /// Labels only: whether to render `for`.
    pub set_for: Option<bool>,
    /// Labels only: whether `for` takes the input id.
    pub use_input_id: Option<bool>,
    /// Whether content is HTML-escaped.
    pub encode: Option<bool>,
}

impl PartConfig {
    /// Applies the options set in `upper` on top of `self`.
    pub fn overlay(&mut self, upper: &Self) {
        overlay_fields!(self, upper; tag, attributes, class, set_for, use_input_id, encode);
    }
}

fn overlay_part(lower: &mut Option<PartConfig>, upper: Option<&PartConfig>) {
    if let Some(upper) = upper {
        lower.get_or_insert_with(PartConfig::default).overlay(upper);
    }
}

/// Every option a theme layer or a field instance can set.
///
/// All fields are optional: an unset option falls through to the layer
/// below.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldOptions {
    /// Layout string with `{label}`, `{input}`, `{hint}` and `{error}`.
    pub template: Option<String>,
    /// Whether the parts are wrapped in a container element.
    pub use_container: Option<bool>,
    /// Container element name.
    pub container_tag: Option<String>,
    /// Container attributes.
    pub container_attributes: Option<Attributes>,
    /// Container classes.
    pub container_class: Option<ClassList>,
    /// Classes added after [`container_class`](Self::container_class).
    pub add_container_class: Option<ClassList>,
    /// Element wrapping only the input; none when unset.
    pub input_container_tag: Option<String>,
    /// Input container attributes.
    pub input_container_attributes: Option<Attributes>,
    /// Input container classes.
    pub input_container_class: Option<ClassList>,

    pub label_class: Option<ClassList>,
    pub label_config: Option<PartConfig>,
    pub hint_class: Option<ClassList>,
    pub hint_config: Option<PartConfig>,
    pub error_class: Option<ClassList>,
    pub error_config: Option<PartConfig>,

    /// Input attributes.
    pub input_attributes: Option<Attributes>,
    /// Input classes.
    pub input_class: Option<ClassList>,
    /// Whether the input gets an `id`.
    #[serde(alias = "setInputIdAttribute")]
    pub set_input_id: Option<bool>,
    /// Whether the input gets a `placeholder`.
    pub use_placeholder: Option<bool>,
    /// Whether constraint attributes are derived from validation rules.
    pub enrichment_from_rules: Option<bool>,

    /// Container classes of a validated field without errors.
    pub valid_class: Option<ClassList>,
    /// Container classes of a field with errors.
    pub invalid_class: Option<ClassList>,
    /// Input classes of a validated field without errors.
    pub input_valid_class: Option<ClassList>,
    /// Input classes of a field with errors.
    pub input_invalid_class: Option<ClassList>,

    // Checkbox
    pub input_value: Option<String>,
    pub uncheck_value: Option<String>,
    pub enclosed_by_label: Option<bool>,
    pub input_label_class: Option<ClassList>,
    pub input_label_attributes: Option<Attributes>,

    // Buttons
    pub button_class: Option<ClassList>,
    pub button_attributes: Option<Attributes>,

    // Error summary
    pub header: Option<String>,
    pub header_tag: Option<String>,
    pub header_attributes: Option<Attributes>,
    pub footer: Option<String>,
    pub footer_attributes: Option<Attributes>,
    pub list_attributes: Option<Attributes>,
    pub only_attributes: Option<Vec<String>>,
    pub show_all_errors: Option<bool>,
}

impl FieldOptions {
    /// The lowest layer: values every option falls back to.
    pub fn builtin() -> Self {
        Self {
            template: Some(DEFAULT_TEMPLATE.to_string()),
            use_container: Some(true),
            container_tag: Some("div".to_string()),
            set_input_id: Some(true),
            use_placeholder: Some(true),
            enrichment_from_rules: Some(false),
            ..Self::default()
        }
    }

    /// Applies the options set in `upper` on top of `self`.
    pub fn overlay(&mut self, upper: &Self) {
        overlay_fields!(self, upper;
            template, use_container, container_tag, container_attributes, container_class,
            add_container_class,
            input_container_tag, input_container_attributes, input_container_class,
            label_class, hint_class, error_class,
            input_attributes, input_class, set_input_id, use_placeholder, enrichment_from_rules,
            valid_class, invalid_class, input_valid_class, input_invalid_class,
            input_value, uncheck_value, enclosed_by_label, input_label_class, input_label_attributes,
            button_class, button_attributes,
            header, header_tag, header_attributes, footer, footer_attributes, list_attributes,
            only_attributes, show_all_errors,
        );
        overlay_part(&mut self.label_config, upper.label_config.as_ref());
        overlay_part(&mut self.hint_config, upper.hint_config.as_ref());
        overlay_part(&mut self.error_config, upper.error_config.as_ref());
    }

    /// Returns `self` with `upper` applied.
    #[must_use]
    pub fn overlaid(mut self, upper: &Self) -> Self {
        self.overlay(upper);
        self
    }
}

/// One named theme.
///
/// # Examples
///
/// ```
/// use formwork_forms::theme::load_toml_str;
/// use formwork_forms::field::FieldKind;
///
/// let theme = load_toml_str(r#"
///     containerClass = ["wrapper", "red"]
///     useContainer = true
///
///     [fieldConfigs.Text]
///     inputClass = "form-control"
/// "#).unwrap();
///
/// assert_eq!(theme.options.use_container, Some(true));
/// assert!(theme.field_configs.contains_key(&FieldKind::Text));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThemeConfig {
    /// Options for every field kind.
    #[serde(flatten)]
    pub options: FieldOptions,
    /// Options for one field kind, applied over [`options`](Self::options).
    pub field_configs: HashMap<FieldKind, FieldOptions>,
}

impl ThemeConfig {
    /// A theme setting only the given options.
    pub fn new(options: FieldOptions) -> Self {
        Self {
            options,
            field_configs: HashMap::new(),
        }
    }

    /// Adds per-kind options.
    #[must_use]
    pub fn field_config(mut self, kind: FieldKind, options: FieldOptions) -> Self {
        self.field_configs.insert(kind, options);
        self
    }
}

/// Parses a theme from TOML.
///
/// # Errors
///
/// Returns [`FormError::ConfigurationError`] for malformed TOML or unknown
/// option types.
pub fn load_toml_str(toml: &str) -> FormResult<ThemeConfig> {
    let json = toml_str_to_json(toml)?;
    serde_json::from_value(json)
        .map_err(|e| FormError::ConfigurationError(format!("Invalid theme: {e}")))
}

/// Parses a theme from JSON.
///
/// # Errors
///
/// Returns [`FormError::ConfigurationError`] for malformed JSON.
pub fn load_json_str(json: &str) -> FormResult<ThemeConfig> {
    serde_json::from_str(json)
        .map_err(|e| FormError::ConfigurationError(format!("Invalid theme: {e}")))
}

/// Reads a theme file, choosing the format from the extension (`.json`
/// for JSON, TOML otherwise).
///
/// # Errors
///
/// Returns [`FormError::IoError`] if the file cannot be read, or a
/// configuration error if it cannot be parsed.
pub fn load_file(path: &Path) -> FormResult<ThemeConfig> {
    let content = std::fs::read_to_string(path)?;
    if path.extension().is_some_and(|ext| ext == "json") {
        load_json_str(&content)
    } else {
        load_toml_str(&content)
    }
}

/// The effective options of a theme, before per-kind options.
#[derive(Debug, Clone)]
pub struct ResolvedTheme {
    /// Options shared by every kind.
    pub options: FieldOptions,
    /// Accumulated per-kind options.
    pub field_configs: HashMap<FieldKind, FieldOptions>,
    /// Enricher consulted when `enrichmentFromRules` is on.
    pub enricher: Option<Arc<dyn ValidationRulesEnricher>>,
}

impl ResolvedTheme {
    fn apply(&mut self, config: &ThemeConfig) {
        self.options.overlay(&config.options);
        for (kind, options) in &config.field_configs {
            self.field_configs
                .entry(*kind)
                .or_default()
                .overlay(options);
        }
    }

    /// The options for a field of `kind`.
    pub fn options_for(&self, kind: FieldKind) -> FieldOptions {
        match self.field_configs.get(&kind) {
            Some(per_kind) => self.options.clone().overlaid(per_kind),
            None => self.options.clone(),
        }
    }
}

impl PartialEq for ResolvedTheme {
    fn eq(&self, other: &Self) -> bool {
        self.options == other.options
            && self.field_configs == other.field_configs
            && self.enricher.is_some() == other.enricher.is_some()
    }
}

/// A registry of named themes.
#[derive(Debug, Clone)]
pub struct ThemeContainer {
    configs: HashMap<String, ThemeConfig>,
    default_config: String,
    enricher: Option<Arc<dyn ValidationRulesEnricher>>,
}

impl Default for ThemeContainer {
    fn default() -> Self {
        Self {
            configs: HashMap::new(),
            default_config: "default".to_string(),
            enricher: None,
        }
    }
}

impl ThemeContainer {
    /// Creates a container from named themes.
    pub fn new(configs: HashMap<String, ThemeConfig>, default_config: impl Into<String>) -> Self {
        Self {
            configs,
            default_config: default_config.into(),
            enricher: None,
        }
    }

    /// Adds or replaces one theme.
    #[must_use]
    pub fn theme(mut self, name: impl Into<String>, config: ThemeConfig) -> Self {
        self.configs.insert(name.into(), config);
        self
    }

    /// Sets the name of the default theme.
    #[must_use]
    pub fn default_config(mut self, name: impl Into<String>) -> Self {
        self.default_config = name.into();
        self
    }

    /// Installs a validation rules enricher.
    #[must_use]
    pub fn with_enricher(mut self, enricher: Arc<dyn ValidationRulesEnricher>) -> Self {
        self.enricher = Some(enricher);
        self
    }

    /// Builds a container from settings: every file in `theme_files` is
    /// loaded under its key, `default_theme` becomes the default, and the
    /// [`RulesEnricher`] is installed when `enrich_from_rules` is set.
    ///
    /// # Errors
    ///
    /// Fails if a theme file cannot be read or parsed.
    pub fn from_settings(settings: &Settings) -> FormResult<Self> {
        let mut container = Self::default().default_config(settings.default_theme.clone());
        for (name, path) in &settings.theme_files {
            tracing::debug!(theme = %name, path = %path.display(), "loading theme");
            container = container.theme(name.clone(), load_file(path)?);
        }
        if settings.enrich_from_rules {
            container = container.with_enricher(Arc::new(RulesEnricher));
        }
        Ok(container)
    }

    /// A registered theme.
    pub fn get(&self, name: &str) -> Option<&ThemeConfig> {
        self.configs.get(name)
    }

    /// Name of the default theme.
    pub fn default_name(&self) -> &str {
        &self.default_config
    }

    /// The installed enricher.
    pub fn enricher(&self) -> Option<&Arc<dyn ValidationRulesEnricher>> {
        self.enricher.as_ref()
    }

    /// Resolves built-in defaults, the default theme, and `theme` (when
    /// given and different from the default). Unregistered names are
    /// skipped.
    pub fn resolve(&self, theme: Option<&str>) -> ResolvedTheme {
        let mut resolved = ResolvedTheme {
            options: FieldOptions::builtin(),
            field_configs: HashMap::new(),
            enricher: self.enricher.clone(),
        };

        if let Some(config) = self.configs.get(&self.default_config) {
            resolved.apply(config);
        }

        if let Some(name) = theme.filter(|name| *name != self.default_config) {
            match self.configs.get(name) {
                Some(config) => resolved.apply(config),
                None => tracing::debug!(theme = name, "theme not registered, using defaults"),
            }
        }

        resolved
    }
}

// ── Process-wide registry ────────────────────────────────────────────

static REGISTRY: Lazy<RwLock<Arc<ThemeContainer>>> =
    Lazy::new(|| RwLock::new(Arc::new(ThemeContainer::default())));

thread_local! {
    /// Containers installed by [`scoped`]; the last one is active.
    static THEME_STACK: RefCell<Vec<Arc<ThemeContainer>>> = const { RefCell::new(Vec::new()) };
}

/// Replaces the process-wide registry.
pub fn initialize(container: ThemeContainer) {
    let mut registry = REGISTRY.write().unwrap_or_else(PoisonError::into_inner);
    *registry = Arc::new(container);
    tracing::debug!(default = registry.default_name(), "theme registry initialized");
}

/// Replaces the process-wide registry with a container built from the
/// global [`SETTINGS`], or from default settings when they are not
/// configured.
///
/// # Errors
///
/// Fails if a theme file cannot be read or parsed; the registry is left
/// unchanged.
pub fn initialize_from_settings() -> FormResult<()> {
    let container = match SETTINGS.try_get() {
        Some(settings) => ThemeContainer::from_settings(settings)?,
        None => ThemeContainer::from_settings(&Settings::default())?,
    };
    initialize(container);
    Ok(())
}

/// The container fields use when none is given: the innermost [`scoped`]
/// container on this thread, else the process-wide registry.
pub fn current() -> Arc<ThemeContainer> {
    THEME_STACK
        .with(|stack| stack.borrow().last().cloned())
        .unwrap_or_else(|| Arc::clone(&REGISTRY.read().unwrap_or_else(PoisonError::into_inner)))
}

/// Runs `f` with `container` as this thread's current container.
///
/// The container is removed afterwards, even if `f` panics. Other threads
/// are not affected.
pub fn scoped<F, R>(container: Arc<ThemeContainer>, f: F) -> R
where
    F: FnOnce() -> R,
{
    struct PopGuard;
    impl Drop for PopGuard {
        fn drop(&mut self) {
            THEME_STACK.with(|stack| {
                stack.borrow_mut().pop();
            });
        }
    }

    THEME_STACK.with(|stack| stack.borrow_mut().push(container));
    let _guard = PopGuard;
    f()
}
