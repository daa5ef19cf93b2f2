//! Validation rule declarations and results.
//!
//! Rules are declared on a [`FormSchema`](crate::schema::FormSchema) and
//! evaluated by an external [`Validator`]. This crate only consumes the
//! outcome: a [`ResultSet`] fed into
//! [`FormModel::process_validation_result`](crate::model::FormModel::process_validation_result),
//! and the declarations themselves, which the
//! [`RulesEnricher`](crate::enricher::RulesEnricher) turns into HTML5
//! constraint attributes.

use indexmap::IndexMap;

use crate::model::FormModel;

/// A declared validation rule.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// The value must not be empty.
    Required,
    /// String length bounds, in characters.
    HasLength {
        /// Minimum length.
        min: Option<usize>,
        /// Maximum length.
        max: Option<usize>,
    },
    /// Numeric bounds.
    Number {
        /// Smallest allowed value.
        min: Option<f64>,
        /// Largest allowed value.
        max: Option<f64>,
        /// Whether only integers are accepted.
        integer_only: bool,
    },
    /// The value must match a delimited pattern such as `/^[a-z]+$/i`.
    MatchRegularExpression {
        /// The pattern, with delimiters.
        pattern: String,
    },
    /// The value must be an e-mail address.
    Email,
    /// The value must be a URL.
    Url,
}

impl Rule {
    /// Shorthand for a [`Rule::HasLength`] rule.
    pub const fn length(min: Option<usize>, max: Option<usize>) -> Self {
        Self::HasLength { min, max }
    }

    /// Shorthand for a [`Rule::Number`] rule accepting any number.
    pub fn number(min: Option<f64>, max: Option<f64>) -> Self {
        Self::Number {
            min,
            max,
            integer_only: false,
        }
    }

    /// Shorthand for a [`Rule::MatchRegularExpression`] rule.
    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self::MatchRegularExpression {
            pattern: pattern.into(),
        }
    }
}

/// The outcome of validating one attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: Vec<String>,
}

impl ValidationResult {
    /// Creates a passing result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an error message.
    #[must_use]
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.errors.push(message.into());
        self
    }

    /// Adds an error message in place.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Returns `true` if no errors were recorded.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The error messages, in order.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}

/// Per-attribute validation results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    results: IndexMap<String, ValidationResult>,
}

impl ResultSet {
    /// Creates an empty result set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the result for `attribute`, merging with any earlier result.
    pub fn add(&mut self, attribute: impl Into<String>, result: ValidationResult) {
        self.results
            .entry(attribute.into())
            .or_default()
            .errors
            .extend(result.errors);
    }

    /// Builder form of [`add`](Self::add).
    #[must_use]
    pub fn with(mut self, attribute: impl Into<String>, result: ValidationResult) -> Self {
        self.add(attribute, result);
        self
    }

    /// The result for `attribute`, if one was recorded.
    pub fn get(&self, attribute: &str) -> Option<&ValidationResult> {
        self.results.get(attribute)
    }

    /// Returns `true` if every recorded result is valid.
    pub fn is_valid(&self) -> bool {
        self.results.values().all(ValidationResult::is_valid)
    }

    /// Iterates over results in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ValidationResult)> {
        self.results.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Evaluates a model's rules.
pub trait Validator {
    /// Validates every attribute of `model`.
    fn validate(&self, model: &FormModel) -> ResultSet;
}

impl<F> Validator for F
where
    F: Fn(&FormModel) -> ResultSet,
{
    fn validate(&self, model: &FormModel) -> ResultSet {
        self(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_set_merges() {
        let mut set = ResultSet::new();
        set.add("login", ValidationResult::new().with_error("a"));
        set.add("login", ValidationResult::new().with_error("b"));
        set.add("password", ValidationResult::new());
        assert_eq!(set.get("login").unwrap().errors(), ["a", "b"]);
        assert!(set.get("password").unwrap().is_valid());
        assert!(!set.is_valid());
    }

    #[test]
    fn test_empty_result_set_is_valid() {
        assert!(ResultSet::new().is_valid());
    }

    #[test]
    fn test_rule_shorthands() {
        assert_eq!(
            Rule::length(Some(4), None),
            Rule::HasLength {
                min: Some(4),
                max: None
            }
        );
        assert_eq!(
            Rule::pattern("/^a$/"),
            Rule::MatchRegularExpression {
                pattern: "/^a$/".to_string()
            }
        );
    }
}
