//! A validator returning canned results.

use formwork_forms::model::FormModel;
use formwork_forms::validation::{ResultSet, ValidationResult, Validator};

/// Reports fixed errors per attribute, regardless of the model's values.
///
/// Attributes given no errors are reported as validated and valid.
///
/// ```rust
/// use formwork_forms::prelude::*;
/// use formwork_test::StubValidator;
///
/// let schema = FormSchema::builder("TextForm").attribute("name", [TypeTag::String]).build();
/// let mut form = FormModel::new(&schema);
/// let valid = form.validate_with(&StubValidator::new().error("name", "Value cannot be blank."));
/// assert!(!valid);
/// assert_eq!(form.first_error("name"), Some("Value cannot be blank."));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StubValidator {
    results: Vec<(String, Vec<String>)>,
}

impl StubValidator {
    /// Creates a validator that reports nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an error for `attribute`.
    #[must_use]
    pub fn error(mut self, attribute: &str, message: &str) -> Self {
        match self.results.iter_mut().find(|(name, _)| name == attribute) {
            Some((_, errors)) => errors.push(message.to_string()),
            None => self
                .results
                .push((attribute.to_string(), vec![message.to_string()])),
        }
        self
    }

    /// Reports `attribute` as valid.
    #[must_use]
    pub fn valid(mut self, attribute: &str) -> Self {
        if !self.results.iter().any(|(name, _)| name == attribute) {
            self.results.push((attribute.to_string(), Vec::new()));
        }
        self
    }
}

impl Validator for StubValidator {
    fn validate(&self, _model: &FormModel) -> ResultSet {
        let mut set = ResultSet::new();
        for (attribute, errors) in &self.results {
            let result = errors
                .iter()
                .fold(ValidationResult::new(), |result, e| result.with_error(e.clone()));
            set.add(attribute, result);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use formwork_forms::schema::{FormSchema, TypeTag};

    use super::*;

    #[test]
    fn test_reports_errors_in_order() {
        let schema = FormSchema::builder("F")
            .attribute("a", [TypeTag::String])
            .attribute("b", [TypeTag::String])
            .build();
        let model = FormModel::new(&schema);
        let set = StubValidator::new()
            .error("b", "first")
            .error("b", "second")
            .valid("a")
            .validate(&model);
        assert!(!set.is_valid());
        assert_eq!(set.get("b").map(ValidationResult::errors), Some(&["first".to_string(), "second".to_string()][..]));
        assert!(set.get("a").is_some_and(ValidationResult::is_valid));
    }

    #[test]
    fn test_empty_is_valid() {
        let schema = FormSchema::builder("F").attribute("a", [TypeTag::String]).build();
        assert!(StubValidator::new().validate(&FormModel::new(&schema)).is_valid());
    }
}
