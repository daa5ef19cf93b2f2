//! HTML5 constraint attributes derived from validation rules.

use std::fmt;

use crate::field::FieldKind;
use crate::html::{AttributeValue, Attributes};
use crate::validation::Rule;

/// Turns declared validation rules into input attributes.
///
/// Installed on a [`ThemeContainer`](crate::theme::ThemeContainer) and
/// consulted by fields with `enrichmentFromRules` enabled.
pub trait ValidationRulesEnricher: Send + Sync + fmt::Debug {
    /// Attributes to add to an input of `kind` bound to an attribute with
    /// the given rules.
    fn enrich(&self, kind: FieldKind, rules: &[Rule]) -> Attributes;
}

/// Maps rules to the attributes browsers understand.
///
/// | Rule | Attributes | Kinds |
/// |------|------------|-------|
/// | `Required` | `required` | inputs other than hidden, image and range |
/// | `HasLength` | `minlength`, `maxlength` | text-like inputs, textarea |
/// | `Number` | `min`, `max` | number, range |
/// | `MatchRegularExpression` | `pattern` | text-like inputs |
///
/// # Examples
///
/// ```
/// use formwork_forms::enricher::{RulesEnricher, ValidationRulesEnricher};
/// use formwork_forms::field::FieldKind;
/// use formwork_forms::html::render_attributes;
/// use formwork_forms::validation::Rule;
///
/// let attrs = RulesEnricher.enrich(
///     FieldKind::Text,
///     &[Rule::Required, Rule::length(Some(4), Some(40))],
/// );
/// assert_eq!(render_attributes(&attrs), r#" maxlength="40" minlength="4" required"#);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RulesEnricher;

impl ValidationRulesEnricher for RulesEnricher {
    fn enrich(&self, kind: FieldKind, rules: &[Rule]) -> Attributes {
        let mut attrs = Attributes::new();
        for rule in rules {
            match rule {
                Rule::Required if kind.accepts_required() => {
                    attrs.insert("required".to_string(), AttributeValue::Flag(true));
                }
                Rule::HasLength { min, max } if kind.is_text_like() => {
                    if let Some(min) = min {
                        attrs.insert("minlength".to_string(), AttributeValue::Text(min.to_string()));
                    }
                    if let Some(max) = max {
                        attrs.insert("maxlength".to_string(), AttributeValue::Text(max.to_string()));
                    }
                }
                Rule::Number { min, max, .. } if kind.is_numeric() => {
                    if let Some(min) = min {
                        attrs.insert("min".to_string(), AttributeValue::Text(min.to_string()));
                    }
                    if let Some(max) = max {
                        attrs.insert("max".to_string(), AttributeValue::Text(max.to_string()));
                    }
                }
                Rule::MatchRegularExpression { pattern }
                    if kind.is_text_like() && kind != FieldKind::Textarea =>
                {
                    attrs.insert(
                        "pattern".to_string(),
                        AttributeValue::Text(normalize_pattern(pattern)),
                    );
                }
                _ => {}
            }
        }
        attrs
    }
}

/// Strips the delimiters and trailing flags from a delimited pattern and
/// unescapes the delimiter inside it. Undelimited patterns are returned
/// as they are.
///
/// ```
/// use formwork_forms::enricher::normalize_pattern;
///
/// assert_eq!(normalize_pattern("/^[a-z]+$/i"), "^[a-z]+$");
/// assert_eq!(normalize_pattern(r"~^a\~b$~"), "^a~b$");
/// assert_eq!(normalize_pattern(r"\w+"), r"\w+");
/// ```
pub fn normalize_pattern(pattern: &str) -> String {
    let Some(delimiter) = pattern.chars().next() else {
        return String::new();
    };
    if delimiter.is_alphanumeric() || delimiter == '\\' || delimiter.is_whitespace() {
        return pattern.to_string();
    }
    let body = &pattern[delimiter.len_utf8()..];
    match body.rfind(delimiter) {
        Some(end) => body[..end].replace(&format!("\\{delimiter}"), &delimiter.to_string()),
        None => pattern.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::render_attributes;

    #[test]
    fn test_required_on_text() {
        let attrs = RulesEnricher.enrich(FieldKind::Text, &[Rule::Required]);
        assert_eq!(render_attributes(&attrs), " required");
    }

    #[test]
    fn test_number_bounds() {
        let attrs = RulesEnricher.enrich(FieldKind::Number, &[Rule::number(Some(1.0), Some(9.5))]);
        assert_eq!(render_attributes(&attrs), r#" min="1" max="9.5""#);
    }

    #[test]
    fn test_number_ignored_on_text() {
        let attrs = RulesEnricher.enrich(FieldKind::Text, &[Rule::number(Some(1.0), None)]);
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_pattern() {
        let attrs = RulesEnricher.enrich(FieldKind::Telephone, &[Rule::pattern("/^\\d+$/")]);
        assert_eq!(render_attributes(&attrs), r#" pattern="^\d+$""#);
    }

    #[test]
    fn test_buttons_get_nothing() {
        let attrs = RulesEnricher.enrich(FieldKind::SubmitButton, &[Rule::Required]);
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_unterminated_pattern_kept() {
        assert_eq!(normalize_pattern("/abc"), "/abc");
        assert_eq!(normalize_pattern(""), "");
    }
}
