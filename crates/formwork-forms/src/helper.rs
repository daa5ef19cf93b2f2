//! Input names and ids derived from form attributes.
//!
//! An attribute expression may carry a tabular prefix and an array suffix:
//! `[0]dates[1]` names the attribute `dates` with prefix `[0]` and suffix
//! `[1]`.

use formwork_core::{FormError, FormResult};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::FormModel;

static ATTRIBUTE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*\])?([\w.+\-]+)(\[.*)?$").unwrap());

/// The parts of an attribute expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAttribute<'a> {
    /// Tabular prefix such as `[0]`, possibly empty.
    pub prefix: &'a str,
    /// The attribute name.
    pub name: &'a str,
    /// Array suffix such as `[1]`, possibly empty.
    pub suffix: &'a str,
}

/// Splits an attribute expression into prefix, name and suffix.
///
/// # Errors
///
/// Returns [`FormError::InvalidAttributeName`] if the expression has no
/// word-character name part.
pub fn parse_attribute(attribute: &str) -> FormResult<ParsedAttribute<'_>> {
    let caps = ATTRIBUTE_RE
        .captures(attribute)
        .ok_or_else(|| FormError::InvalidAttributeName(attribute.to_string()))?;
    let part = |i: usize| caps.get(i).map_or("", |m| m.as_str());
    Ok(ParsedAttribute {
        prefix: part(1),
        name: part(2),
        suffix: part(3),
    })
}

/// The `name` of the input for `attribute`.
///
/// ```
/// use formwork_forms::helper::input_name;
/// use formwork_forms::model::FormModel;
/// use formwork_forms::schema::FormSchema;
///
/// let form = FormModel::new(&FormSchema::builder("LoginForm").build());
/// assert_eq!(input_name(&form, "age").unwrap(), "LoginForm[age]");
/// assert_eq!(input_name(&form, "[0]dates[0]").unwrap(), "LoginForm[0][dates][0]");
/// ```
///
/// # Errors
///
/// Returns [`FormError::InvalidAttributeName`] for malformed expressions and
/// [`FormError::EmptyFormName`] for tabular inputs of anonymous forms.
pub fn input_name(form: &FormModel, attribute: &str) -> FormResult<String> {
    let parsed = parse_attribute(attribute)?;
    let form_name = form.form_name();

    if form_name.is_empty() {
        if parsed.prefix.is_empty() {
            return Ok(attribute.to_string());
        }
        return Err(FormError::EmptyFormName);
    }

    Ok(format!(
        "{form_name}{}[{}]{}",
        parsed.prefix, parsed.name, parsed.suffix
    ))
}

/// The `id` of the input for `attribute`: the lower-cased input name with
/// brackets, spaces and dots turned into dashes.
///
/// # Errors
///
/// See [`input_name`].
pub fn input_id(form: &FormModel, attribute: &str) -> FormResult<String> {
    Ok(id_from_name(&input_name(form, attribute)?))
}

/// Converts an input name into an id.
///
/// ```
/// use formwork_forms::helper::id_from_name;
///
/// assert_eq!(id_from_name("PersonalForm[0][name]"), "personalform-0-name");
/// assert_eq!(id_from_name("tags[]"), "tags");
/// ```
pub fn id_from_name(name: &str) -> String {
    name.to_lowercase()
        .replace("[]", "")
        .replace("][", "-")
        .replace('[', "-")
        .replace(']', "")
        .replace([' ', '.'], "-")
}

/// The bare attribute name of an expression, checked against the form.
///
/// # Errors
///
/// Returns [`FormError::InvalidAttributeName`] for malformed expressions and
/// [`FormError::AttributeNotFound`] when the form has no such attribute.
pub fn attribute_name<'a>(form: &FormModel, attribute: &'a str) -> FormResult<&'a str> {
    let name = parse_attribute(attribute)?.name;
    if form.has_attribute(name) {
        Ok(name)
    } else {
        Err(FormError::AttributeNotFound(name.to_string()))
    }
}
