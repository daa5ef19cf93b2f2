//! Form models.
//!
//! A [`FormModel`] is one instance of a [`FormSchema`]: the current
//! attribute values, the per-attribute errors, and whether validation has
//! run. Attributes of nested forms are addressed with dotted paths such as
//! `"user.login"`.

use std::fmt;
use std::sync::Arc;

use formwork_core::utils::text::humanize;
use formwork_core::{FormError, FormResult};
use indexmap::IndexMap;

use crate::coerce::type_cast;
use crate::errors::FormErrors;
use crate::schema::{FormSchema, TypeTag};
use crate::validation::{ResultSet, Rule, Validator};
use crate::value::{Value, ValueMap};

/// Mutable state of one form.
///
/// # Examples
///
/// ```
/// use formwork_forms::model::FormModel;
/// use formwork_forms::schema::{FormSchema, TypeTag};
/// use formwork_forms::value::Value;
///
/// let schema = FormSchema::builder("LoginForm")
///     .nullable("login", [TypeTag::String])
///     .attribute("rememberMe", [TypeTag::Bool])
///     .build();
/// let mut form = FormModel::new(&schema);
///
/// form.set_attribute("rememberMe", "on").unwrap();
/// assert_eq!(form.attribute_value("rememberMe").unwrap(), &Value::Bool(true));
/// assert_eq!(form.attribute_label("rememberMe"), "Remember Me");
/// ```
#[derive(Clone)]
pub struct FormModel {
    schema: Arc<FormSchema>,
    values: IndexMap<String, Value>,
    errors: FormErrors,
    validated: bool,
}

impl FormModel {
    /// Creates a model with every attribute at its declared default.
    pub fn new(schema: &Arc<FormSchema>) -> Self {
        let values = schema
            .attributes()
            .map(|(name, def)| (name.clone(), def.default.clone()))
            .collect();
        Self {
            schema: Arc::clone(schema),
            values,
            errors: FormErrors::new(),
            validated: false,
        }
    }

    /// The schema this model was created from.
    pub fn schema(&self) -> &Arc<FormSchema> {
        &self.schema
    }

    /// The form name; empty for anonymous forms.
    pub fn form_name(&self) -> &str {
        self.schema.name()
    }

    /// Declared attribute names in declaration order.
    pub fn attribute_names(&self) -> Vec<&str> {
        self.schema.attribute_names().collect()
    }

    /// Declared types of a top-level attribute.
    pub fn attribute_types(&self, name: &str) -> Option<&[TypeTag]> {
        self.schema.attribute(name).map(|def| def.types.as_slice())
    }

    /// Returns `true` if `path` names a declared attribute, following
    /// dotted paths into nested models.
    pub fn has_attribute(&self, path: &str) -> bool {
        match path.split_once('.') {
            None => self.values.contains_key(path),
            Some((head, rest)) => self
                .nested_model(head)
                .is_ok_and(|nested| nested.has_attribute(rest)),
        }
    }

    /// [`has_attribute`](Self::has_attribute) with the path given as
    /// segments.
    pub fn has_attribute_at(&self, segments: &[&str]) -> bool {
        self.has_attribute(&segments.join("."))
    }

    /// Reads the value at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UndefinedAttribute`] for unknown attributes and
    /// [`FormError::NotNestedAttribute`] when a dotted path crosses an
    /// attribute that does not hold a model.
    pub fn attribute_value(&self, path: &str) -> FormResult<&Value> {
        match path.split_once('.') {
            None => self
                .values
                .get(path)
                .ok_or_else(|| FormError::undefined(self.form_name(), path)),
            Some((head, rest)) => self.nested_model(head)?.attribute_value(rest),
        }
    }

    /// [`attribute_value`](Self::attribute_value) with the path given as
    /// segments.
    ///
    /// # Errors
    ///
    /// See [`attribute_value`](Self::attribute_value).
    pub fn attribute_value_at(&self, segments: &[&str]) -> FormResult<&Value> {
        self.attribute_value(&segments.join("."))
    }

    /// Coerces `value` to the declared types of `name`.
    ///
    /// Unknown attributes leave the value unchanged.
    pub fn type_cast(&self, name: &str, value: Value) -> Value {
        match self.attribute_types(name) {
            Some(types) => type_cast(types, value),
            None => value,
        }
    }

    /// Assigns `value` to the attribute at `path`.
    ///
    /// The value is coerced to the attribute's declared types. A map assigned
    /// to a model-typed attribute is loaded into the nested model. Unknown
    /// attributes are silently ignored.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::NotNestedAttribute`] when a dotted path crosses a
    /// declared attribute that does not hold a model.
    pub fn set_attribute(&mut self, path: &str, value: impl Into<Value>) -> FormResult<()> {
        let value = value.into();
        if let Some((head, rest)) = path.split_once('.') {
            if !self.values.contains_key(head) {
                return Ok(());
            }
            return self.nested_model_mut(head)?.set_attribute(rest, value);
        }

        if !self.values.contains_key(path) {
            tracing::trace!(form = self.form_name(), attribute = path, "ignoring unknown attribute");
            return Ok(());
        }

        if let Value::Map(map) = &value {
            if let Ok(nested) = self.nested_model_mut(path) {
                for (name, item) in map {
                    nested.set_attribute(name, item.clone())?;
                }
                return Ok(());
            }
        }

        let cast = self.type_cast(path, value);
        self.values.insert(path.to_string(), cast);
        Ok(())
    }

    /// [`set_attribute`](Self::set_attribute) with the path given as
    /// segments.
    ///
    /// # Errors
    ///
    /// See [`set_attribute`](Self::set_attribute).
    pub fn set_attribute_at(&mut self, segments: &[&str], value: impl Into<Value>) -> FormResult<()> {
        self.set_attribute(&segments.join("."), value)
    }

    /// Loads submitted data.
    ///
    /// With a non-empty scope (the form name unless `scope` is given), the
    /// entries under `data[scope]` are assigned; with an empty scope the
    /// whole of `data` is. Returns whether anything was found to assign.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`set_attribute`](Self::set_attribute).
    pub fn load(&mut self, data: &ValueMap, scope: Option<&str>) -> FormResult<bool> {
        let scope = scope.unwrap_or_else(|| self.schema.name()).to_string();

        let values = if scope.is_empty() {
            data.clone()
        } else {
            match data.get(&scope) {
                Some(Value::Map(map)) => map.clone(),
                _ => ValueMap::new(),
            }
        };

        for (name, value) in &values {
            self.set_attribute(name, value.clone())?;
        }

        tracing::debug!(form = self.form_name(), scope = %scope, loaded = values.len(), "loaded form data");
        Ok(!values.is_empty())
    }

    // ── Labels, hints, placeholders ──────────────────────────────────

    /// The label of `path`: the nested form's label for dotted paths,
    /// otherwise the declared override, otherwise the humanized name.
    pub fn attribute_label(&self, path: &str) -> String {
        if let Some(label) = self.nested_text(path, Self::attribute_label) {
            return label;
        }
        self.schema
            .label_override(path)
            .map_or_else(|| humanize(path), str::to_string)
    }

    /// The hint of `path`, empty when none is declared.
    pub fn attribute_hint(&self, path: &str) -> String {
        self.nested_text(path, Self::attribute_hint)
            .or_else(|| self.schema.hint_override(path).map(str::to_string))
            .unwrap_or_default()
    }

    /// The placeholder of `path`, empty when none is declared.
    pub fn attribute_placeholder(&self, path: &str) -> String {
        self.nested_text(path, Self::attribute_placeholder)
            .or_else(|| self.schema.placeholder_override(path).map(str::to_string))
            .unwrap_or_default()
    }

    /// [`attribute_label`](Self::attribute_label) for a segmented path.
    pub fn attribute_label_at(&self, segments: &[&str]) -> String {
        self.attribute_label(&segments.join("."))
    }

    /// [`attribute_hint`](Self::attribute_hint) for a segmented path.
    pub fn attribute_hint_at(&self, segments: &[&str]) -> String {
        self.attribute_hint(&segments.join("."))
    }

    /// [`attribute_placeholder`](Self::attribute_placeholder) for a
    /// segmented path.
    pub fn attribute_placeholder_at(&self, segments: &[&str]) -> String {
        self.attribute_placeholder(&segments.join("."))
    }

    // ── Errors ───────────────────────────────────────────────────────

    /// Appends an error for `attribute`.
    pub fn add_error(&mut self, attribute: &str, message: impl Into<String>) {
        self.errors.add(attribute, message);
    }

    /// Errors of `attribute`.
    pub fn errors_for(&self, attribute: &str) -> &[String] {
        self.errors.get(attribute)
    }

    /// The first error of `attribute`.
    pub fn first_error(&self, attribute: &str) -> Option<&str> {
        self.errors.first(attribute)
    }

    /// The first error of every attribute that has one.
    pub fn first_errors(&self) -> IndexMap<String, String> {
        self.errors.first_errors()
    }

    /// Every error in order, or only the first per attribute.
    pub fn error_summary(&self, show_all_errors: bool) -> Vec<String> {
        if show_all_errors {
            self.errors.summary(&[])
        } else {
            self.errors.summary_first_errors(&[])
        }
    }

    /// Returns `true` if any attribute has an error.
    pub fn has_errors(&self) -> bool {
        self.errors.has_errors()
    }

    /// The error bag.
    pub fn form_errors(&self) -> &FormErrors {
        &self.errors
    }

    /// The error bag, mutably.
    pub fn form_errors_mut(&mut self) -> &mut FormErrors {
        &mut self.errors
    }

    /// Replaces the error bag.
    pub fn set_form_errors(&mut self, errors: FormErrors) {
        self.errors = errors;
    }

    // ── Validation ───────────────────────────────────────────────────

    /// Rules declared for `attribute`.
    pub fn rules_for(&self, attribute: &str) -> &[Rule] {
        self.schema.rules_for(attribute)
    }

    /// Replaces the errors with those of `results` and marks the model
    /// validated.
    pub fn process_validation_result(&mut self, results: &ResultSet) {
        self.errors.clear();
        for (attribute, result) in results.iter() {
            for message in result.errors() {
                self.errors.add(attribute, message.clone());
            }
        }
        self.validated = true;
    }

    /// Runs `validator` and records its results. Returns `true` when the
    /// model has no errors afterwards.
    pub fn validate_with(&mut self, validator: &dyn Validator) -> bool {
        let results = validator.validate(self);
        self.process_validation_result(&results);
        !self.has_errors()
    }

    /// Returns `true` once validation results have been processed.
    pub const fn is_validated(&self) -> bool {
        self.validated
    }

    // ── Nesting ──────────────────────────────────────────────────────

    fn nested_model(&self, attribute: &str) -> FormResult<&Self> {
        let def = self
            .schema
            .attribute(attribute)
            .ok_or_else(|| FormError::undefined(self.form_name(), attribute))?;
        if def.nested_schema().is_none() {
            return Err(FormError::NotNestedAttribute(attribute.to_string()));
        }
        self.values
            .get(attribute)
            .and_then(Value::as_model)
            .ok_or_else(|| FormError::NotNestedAttribute(attribute.to_string()))
    }

    /// The nested model held by `attribute`. A nullable nested attribute
    /// that is still `Null` gets a fresh model of its schema first.
    fn nested_model_mut(&mut self, attribute: &str) -> FormResult<&mut Self> {
        let not_nested = || FormError::NotNestedAttribute(attribute.to_string());
        let schema = self
            .schema
            .attribute(attribute)
            .and_then(|def| def.nested_schema())
            .cloned()
            .ok_or_else(not_nested)?;
        let slot = self.values.get_mut(attribute).ok_or_else(not_nested)?;
        if slot.is_null() {
            tracing::trace!(attribute, form = schema.name(), "creating nested model");
            *slot = Value::from(Self::new(&schema));
        }
        slot.as_model_mut().ok_or_else(not_nested)
    }

    fn nested_text(&self, path: &str, read: fn(&Self, &str) -> String) -> Option<String> {
        let (head, rest) = path.split_once('.')?;
        let text = read(self.nested_model(head).ok()?, rest);
        (!text.is_empty()).then_some(text)
    }
}

impl fmt::Debug for FormModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormModel")
            .field("form", &self.schema.name())
            .field("values", &self.values)
            .field("errors", &self.errors)
            .field("validated", &self.validated)
            .finish()
    }
}

impl PartialEq for FormModel {
    fn eq(&self, other: &Self) -> bool {
        self.schema.name() == other.schema.name()
            && self.values == other.values
            && self.errors == other.errors
            && self.validated == other.validated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationResult;

    fn login_schema() -> Arc<FormSchema> {
        FormSchema::builder("LoginForm")
            .nullable("login", [TypeTag::String])
            .nullable("password", [TypeTag::String])
            .attribute("rememberMe", [TypeTag::Bool])
            .label("login", "Login:")
            .hint("login", "Write your id or email.")
            .placeholder("login", "Type Username or Email.")
            .build()
    }

    fn nested_schema() -> Arc<FormSchema> {
        FormSchema::builder("NestedForm")
            .nested("user", &login_schema())
            .attribute("id", [TypeTag::Int])
            .build()
    }

    #[test]
    fn test_defaults() {
        let form = FormModel::new(&login_schema());
        assert_eq!(form.attribute_value("login").unwrap(), &Value::Null);
        assert_eq!(form.attribute_value("rememberMe").unwrap(), &Value::Bool(false));
        assert!(!form.is_validated());
    }

    #[test]
    fn test_undefined_attribute() {
        let form = FormModel::new(&login_schema());
        let err = form.attribute_value("noExist").unwrap_err();
        assert_eq!(err.to_string(), "Undefined property: \"LoginForm::noExist\".");
    }

    #[test]
    fn test_set_unknown_attribute_is_ignored() {
        let mut form = FormModel::new(&login_schema());
        form.set_attribute("noExist", "x").unwrap();
        assert!(!form.has_attribute("noExist"));
    }

    #[test]
    fn test_set_attribute_casts() {
        let mut form = FormModel::new(&login_schema());
        form.set_attribute("login", 42).unwrap();
        assert_eq!(form.attribute_value("login").unwrap(), &Value::from("42"));
        form.set_attribute("rememberMe", "0").unwrap();
        assert_eq!(form.attribute_value("rememberMe").unwrap(), &Value::Bool(false));
    }

    #[test]
    fn test_nested_paths() {
        let mut form = FormModel::new(&nested_schema());
        form.set_attribute("user.login", "admin").unwrap();
        assert_eq!(form.attribute_value("user.login").unwrap(), &Value::from("admin"));
        assert_eq!(
            form.attribute_value_at(&["user", "login"]).unwrap(),
            &Value::from("admin")
        );
        assert!(form.has_attribute("user.password"));
        assert!(!form.has_attribute("user.noExist"));
        assert!(!form.has_attribute("id.x"));
    }

    #[test]
    fn test_not_nested_attribute() {
        let mut form = FormModel::new(&nested_schema());
        let err = form.set_attribute("id.value", 1).unwrap_err();
        assert_eq!(err.to_string(), "Attribute \"id\" is not a nested attribute.");
        assert!(form.attribute_value("id.value").is_err());
    }

    #[test]
    fn test_nullable_nested_model_created_on_write() {
        let outer = FormSchema::builder("ProfileForm")
            .attribute("user", [TypeTag::Model(login_schema()), TypeTag::Null])
            .build();
        let mut form = FormModel::new(&outer);
        assert_eq!(form.attribute_value("user").unwrap(), &Value::Null);

        form.set_attribute("user.login", "admin").unwrap();
        assert_eq!(form.attribute_value("user.login").unwrap(), &Value::from("admin"));
        assert_eq!(form.attribute_value("user.rememberMe").unwrap(), &Value::Bool(false));
    }

    #[test]
    fn test_map_loads_into_null_nested_model() {
        let outer = FormSchema::builder("ProfileForm")
            .nullable("user", [TypeTag::Model(login_schema())])
            .build();
        let mut form = FormModel::new(&outer);
        let mut user = ValueMap::new();
        user.insert("login".to_string(), Value::from("joe"));
        form.set_attribute("user", Value::Map(user)).unwrap();
        assert_eq!(form.attribute_value("user.login").unwrap(), &Value::from("joe"));
    }

    #[test]
    fn test_map_loads_into_nested_model() {
        let mut form = FormModel::new(&nested_schema());
        let mut user = ValueMap::new();
        user.insert("login".to_string(), Value::from("joe"));
        user.insert("rememberMe".to_string(), Value::from("yes"));
        form.set_attribute("user", Value::Map(user)).unwrap();
        assert_eq!(form.attribute_value("user.login").unwrap(), &Value::from("joe"));
        assert_eq!(form.attribute_value("user.rememberMe").unwrap(), &Value::Bool(true));
    }

    #[test]
    fn test_labels_hints_placeholders() {
        let form = FormModel::new(&nested_schema());
        assert_eq!(form.attribute_label("user.login"), "Login:");
        assert_eq!(form.attribute_label("user.rememberMe"), "Remember Me");
        assert_eq!(form.attribute_label("id"), "Id");
        assert_eq!(form.attribute_hint("user.login"), "Write your id or email.");
        assert_eq!(form.attribute_hint("id"), "");
        assert_eq!(
            form.attribute_placeholder_at(&["user", "login"]),
            "Type Username or Email."
        );
    }

    #[test]
    fn test_load_scoped() {
        let mut form = FormModel::new(&login_schema());
        let data = crate::value::value_map(serde_json::json!({
            "LoginForm": {"login": "admin", "password": "123456", "rememberMe": true, "noExist": 1}
        }));
        assert!(form.load(&data, None).unwrap());
        assert_eq!(form.attribute_value("login").unwrap(), &Value::from("admin"));
        assert_eq!(form.attribute_value("rememberMe").unwrap(), &Value::Bool(true));
    }

    #[test]
    fn test_load_wrong_scope() {
        let mut form = FormModel::new(&login_schema());
        let data = crate::value::value_map(serde_json::json!({"Other": {"login": "x"}}));
        assert!(!form.load(&data, None).unwrap());
        assert_eq!(form.attribute_value("login").unwrap(), &Value::Null);
    }

    #[test]
    fn test_load_empty_scope() {
        let mut form = FormModel::new(&login_schema());
        let data = crate::value::value_map(serde_json::json!({"login": "admin"}));
        assert!(form.load(&data, Some("")).unwrap());
        assert_eq!(form.attribute_value("login").unwrap(), &Value::from("admin"));
        assert!(!form.load(&ValueMap::new(), Some("")).unwrap());
    }

    #[test]
    fn test_process_validation_result() {
        let mut form = FormModel::new(&login_schema());
        form.add_error("password", "stale");
        let results = ResultSet::new()
            .with("login", ValidationResult::new().with_error("Value cannot be blank."))
            .with("password", ValidationResult::new());
        form.process_validation_result(&results);
        assert!(form.is_validated());
        assert_eq!(form.first_error("login"), Some("Value cannot be blank."));
        assert!(form.errors_for("password").is_empty());
        assert_eq!(form.error_summary(true), ["Value cannot be blank."]);
    }

    #[test]
    fn test_validate_with_closure() {
        let mut form = FormModel::new(&login_schema());
        let validator = |_: &FormModel| ResultSet::new().with("login", ValidationResult::new());
        assert!(form.validate_with(&validator));
        assert!(form.is_validated());
    }
}
