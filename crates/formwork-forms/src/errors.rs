//! Per-attribute error messages of a form.

use indexmap::IndexMap;

/// Error messages keyed by attribute, in insertion order.
///
/// # Examples
///
/// ```
/// use formwork_forms::errors::FormErrors;
///
/// let mut errors = FormErrors::new();
/// errors.add("login", "Login is required.");
/// errors.add("login", "Login is too short.");
/// assert_eq!(errors.first("login"), Some("Login is required."));
/// assert_eq!(errors.summary(&[]), ["Login is required.", "Login is too short."]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: IndexMap<String, Vec<String>>,
}

impl FormErrors {
    /// Creates an empty error bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an error for `attribute`.
    pub fn add(&mut self, attribute: &str, message: impl Into<String>) {
        self.errors
            .entry(attribute.to_string())
            .or_default()
            .push(message.into());
    }

    /// Errors of `attribute`, empty when there are none.
    pub fn get(&self, attribute: &str) -> &[String] {
        self.errors.get(attribute).map_or(&[], Vec::as_slice)
    }

    /// The first error of `attribute`.
    pub fn first(&self, attribute: &str) -> Option<&str> {
        self.get(attribute).first().map(String::as_str)
    }

    /// All errors keyed by attribute.
    pub fn all(&self) -> &IndexMap<String, Vec<String>> {
        &self.errors
    }

    /// The first error of every attribute that has one.
    pub fn first_errors(&self) -> IndexMap<String, String> {
        self.errors
            .iter()
            .filter_map(|(attr, list)| list.first().map(|e| (attr.clone(), e.clone())))
            .collect()
    }

    /// Every error message in order, optionally restricted to the given
    /// attributes (an empty slice means all).
    pub fn summary(&self, only_attributes: &[String]) -> Vec<String> {
        self.filtered(only_attributes)
            .flat_map(|(_, list)| list.iter().cloned())
            .collect()
    }

    /// The first error of each attribute, optionally restricted to the given
    /// attributes.
    pub fn summary_first_errors(&self, only_attributes: &[String]) -> Vec<String> {
        self.filtered(only_attributes)
            .filter_map(|(_, list)| list.first().cloned())
            .collect()
    }

    /// Returns `true` if any attribute has an error.
    pub fn has_errors(&self) -> bool {
        self.errors.values().any(|list| !list.is_empty())
    }

    /// Returns `true` if `attribute` has an error.
    pub fn has_errors_for(&self, attribute: &str) -> bool {
        !self.get(attribute).is_empty()
    }

    /// Removes the errors of one attribute.
    pub fn clear_attribute(&mut self, attribute: &str) {
        self.errors.shift_remove(attribute);
    }

    /// Removes every error.
    pub fn clear(&mut self) {
        self.errors.clear();
    }

    fn filtered<'a>(
        &'a self,
        only_attributes: &'a [String],
    ) -> impl Iterator<Item = (&'a String, &'a Vec<String>)> {
        self.errors
            .iter()
            .filter(move |(attr, _)| only_attributes.is_empty() || only_attributes.contains(attr))
    }
}

impl FromIterator<(String, Vec<String>)> for FormErrors {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}
