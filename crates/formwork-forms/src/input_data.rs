//! What a field knows about the value it renders.
//!
//! Fields never hold a [`FormModel`]; they hold an [`InputData`] snapshot,
//! either taken from a model attribute with [`FormModelInputData`] or built
//! by hand with [`PureInputData`].

use std::fmt;

use formwork_core::FormResult;

use crate::helper;
use crate::model::FormModel;
use crate::validation::Rule;
use crate::value::Value;

/// Data a field renders.
pub trait InputData: Send + Sync + fmt::Debug {
    /// The input `name`.
    fn name(&self) -> Option<&str>;
    /// The input `id`.
    fn id(&self) -> Option<&str>;
    /// The current value.
    fn value(&self) -> &Value;
    /// The label text.
    fn label(&self) -> Option<&str>;
    /// The hint text.
    fn hint(&self) -> Option<&str>;
    /// The placeholder text.
    fn placeholder(&self) -> Option<&str>;
    /// Validation errors, or `None` when validation has not run.
    fn validation_errors(&self) -> Option<&[String]>;
    /// Declared validation rules.
    fn rules(&self) -> &[Rule] {
        &[]
    }

    /// Returns `true` once validation has run.
    fn is_validated(&self) -> bool {
        self.validation_errors().is_some()
    }

    /// The first validation error.
    fn first_error(&self) -> Option<&str> {
        self.validation_errors()
            .and_then(|errors| errors.first())
            .map(String::as_str)
    }
}

/// A snapshot of one model attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct FormModelInputData {
    name: String,
    id: String,
    value: Value,
    label: String,
    hint: String,
    placeholder: String,
    errors: Option<Vec<String>>,
    rules: Vec<Rule>,
}

impl FormModelInputData {
    /// Captures `attribute` of `form`. The attribute may carry a tabular
    /// prefix or array suffix (`[0]name`).
    ///
    /// # Errors
    ///
    /// Fails when the attribute expression is malformed, names an unknown
    /// attribute, or uses a tabular prefix on an anonymous form.
    pub fn new(form: &FormModel, attribute: &str) -> FormResult<Self> {
        let name = helper::input_name(form, attribute)?;
        let id = helper::id_from_name(&name);
        let path = helper::parse_attribute(attribute)?.name;
        let value = form.attribute_value(path)?.clone();

        let errors = form
            .is_validated()
            .then(|| form.errors_for(path).to_vec());

        Ok(Self {
            name,
            id,
            value,
            label: form.attribute_label(path),
            hint: form.attribute_hint(path),
            placeholder: form.attribute_placeholder(path),
            errors,
            rules: form.rules_for(path).to_vec(),
        })
    }
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}

impl InputData for FormModelInputData {
    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn value(&self) -> &Value {
        &self.value
    }

    fn label(&self) -> Option<&str> {
        non_empty(&self.label)
    }

    fn hint(&self) -> Option<&str> {
        non_empty(&self.hint)
    }

    fn placeholder(&self) -> Option<&str> {
        non_empty(&self.placeholder)
    }

    fn validation_errors(&self) -> Option<&[String]> {
        self.errors.as_deref()
    }

    fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

/// Input data built without a model.
///
/// # Examples
///
/// ```
/// use formwork_forms::input_data::{InputData, PureInputData};
///
/// let data = PureInputData::new()
///     .with_name("age")
///     .with_value(42)
///     .with_validation_errors(vec!["Too old.".to_string()]);
/// assert_eq!(data.first_error(), Some("Too old."));
/// assert!(data.is_validated());
/// assert_eq!(data.id(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PureInputData {
    name: Option<String>,
    id: Option<String>,
    value: Value,
    label: Option<String>,
    hint: Option<String>,
    placeholder: Option<String>,
    errors: Option<Vec<String>>,
    rules: Vec<Rule>,
}

impl PureInputData {
    /// Creates empty input data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the input name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the input id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = value.into();
        self
    }

    /// Sets the label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the hint.
    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Sets the placeholder.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Marks the data validated with the given errors. An empty list means
    /// validated and valid.
    #[must_use]
    pub fn with_validation_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = Some(errors);
        self
    }

    /// Sets the declared rules.
    #[must_use]
    pub fn with_rules(mut self, rules: Vec<Rule>) -> Self {
        self.rules = rules;
        self
    }
}

impl InputData for PureInputData {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn value(&self) -> &Value {
        &self.value
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    fn validation_errors(&self) -> Option<&[String]> {
        self.errors.as_deref()
    }

    fn rules(&self) -> &[Rule] {
        &self.rules
    }
}
