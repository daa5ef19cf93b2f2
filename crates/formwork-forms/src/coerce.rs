//! Coercion of incoming values to declared attribute types.
//!
//! [`type_cast`] is applied to every value assigned through
//! [`FormModel::set_attribute`](crate::model::FormModel::set_attribute).
//! It never fails: a value that cannot be converted to any declared type is
//! kept as it is.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::schema::TypeTag;
use crate::value::{Value, ValueMap};

static INT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?[0-9]+$").unwrap());
static FLOAT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?$").unwrap()
});

/// Coerces `value` towards one of `types`.
///
/// 1. Untyped attributes, and values whose runtime type is already declared,
///    pass through unchanged.
/// 2. Scalars are filtered through each declared scalar type in order and
///    the first successful conversion wins.
/// 3. Dates and times become strings when `string` is declared.
/// 4. Otherwise a native conversion is tried in declared order: `Null`
///    becomes the zero value of the target, scalars become one-element
///    lists, and lists and maps convert into each other.
/// 5. If nothing applies, the original value is returned.
///
/// # Examples
///
/// ```
/// use formwork_forms::coerce::type_cast;
/// use formwork_forms::schema::TypeTag;
/// use formwork_forms::value::Value;
///
/// assert_eq!(type_cast(&[TypeTag::Int], Value::from("42")), Value::Int(42));
/// assert_eq!(type_cast(&[TypeTag::Bool], Value::from("false")), Value::Bool(false));
/// assert_eq!(type_cast(&[TypeTag::String], Value::Int(555)), Value::from("555"));
/// assert_eq!(type_cast(&[TypeTag::Int], Value::from("abc")), Value::from("abc"));
/// ```
pub fn type_cast(types: &[TypeTag], value: Value) -> Value {
    if types.is_empty() || types.iter().any(|t| t.matches(&value)) {
        return value;
    }

    if value.is_scalar() {
        if let Some(cast) = types.iter().find_map(|t| filter_scalar(t, &value)) {
            return cast;
        }
    } else if matches!(value, Value::Date(_) | Value::DateTime(_) | Value::Time(_))
        && types.contains(&TypeTag::String)
    {
        if let Some(s) = value.as_string() {
            return Value::String(s);
        }
    }

    types
        .iter()
        .find_map(|t| native_cast(t, &value))
        .unwrap_or(value)
}

/// Validating filter for one scalar target type.
fn filter_scalar(target: &TypeTag, value: &Value) -> Option<Value> {
    let raw = value.as_string()?;
    match target {
        TypeTag::Bool => filter_bool(&raw).map(Value::Bool),
        TypeTag::Int => filter_int(&raw).map(Value::Int),
        TypeTag::Float => filter_float(&raw).map(Value::Float),
        TypeTag::String => Some(Value::String(raw)),
        _ => None,
    }
}

/// Accepts `1/true/on/yes` and `0/false/off/no/""`, case-insensitively.
pub fn filter_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" | "" => Some(false),
        _ => None,
    }
}

/// Accepts optionally signed decimal integers that fit in an `i64`.
pub fn filter_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if !INT_RE.is_match(trimmed) {
        return None;
    }
    trimmed.parse().ok()
}

/// Accepts decimal and exponent notation; rejects `inf` and `NaN`.
pub fn filter_float(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if !FLOAT_RE.is_match(trimmed) {
        return None;
    }
    trimmed.parse().ok().filter(|f: &f64| f.is_finite())
}

/// Language-level conversion. Never converts to `Null` or into a model.
fn native_cast(target: &TypeTag, value: &Value) -> Option<Value> {
    match (target, value) {
        (TypeTag::Null | TypeTag::Model(_), _) => None,
        (t, Value::Null) => Some(t.default_value()),
        (TypeTag::Array, v) if v.is_scalar() => Some(Value::List(vec![v.clone()])),
        (TypeTag::Array, Value::Map(map)) => Some(Value::List(map.values().cloned().collect())),
        (TypeTag::Object, Value::List(items)) => Some(Value::Map(
            items
                .iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v.clone()))
                .collect::<ValueMap>(),
        )),
        (TypeTag::Bool, Value::List(items)) => Some(Value::Bool(!items.is_empty())),
        (TypeTag::Bool, Value::Map(map)) => Some(Value::Bool(!map.is_empty())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untyped_passes_through() {
        assert_eq!(type_cast(&[], Value::from("x")), Value::from("x"));
        assert_eq!(type_cast(&[], Value::Null), Value::Null);
    }

    #[test]
    fn test_declared_type_passes_through() {
        assert_eq!(
            type_cast(&[TypeTag::String, TypeTag::Int], Value::Int(3)),
            Value::Int(3)
        );
        assert_eq!(
            type_cast(&[TypeTag::String, TypeTag::Null], Value::Null),
            Value::Null
        );
    }

    #[test]
    fn test_bool_filter() {
        for raw in ["1", "true", "ON", " yes "] {
            assert_eq!(type_cast(&[TypeTag::Bool], Value::from(raw)), Value::Bool(true));
        }
        for raw in ["0", "false", "Off", "no", ""] {
            assert_eq!(type_cast(&[TypeTag::Bool], Value::from(raw)), Value::Bool(false));
        }
        assert_eq!(type_cast(&[TypeTag::Bool], Value::Int(1)), Value::Bool(true));
        assert_eq!(type_cast(&[TypeTag::Bool], Value::from("maybe")), Value::from("maybe"));
    }

    #[test]
    fn test_int_filter() {
        assert_eq!(type_cast(&[TypeTag::Int], Value::from(" -12 ")), Value::Int(-12));
        assert_eq!(type_cast(&[TypeTag::Int], Value::Bool(true)), Value::Int(1));
        assert_eq!(type_cast(&[TypeTag::Int], Value::from("1.5")), Value::from("1.5"));
        assert_eq!(type_cast(&[TypeTag::Int], Value::Float(2.0)), Value::Int(2));
    }

    #[test]
    fn test_float_filter() {
        assert_eq!(type_cast(&[TypeTag::Float], Value::from("3.15")), Value::Float(3.15));
        assert_eq!(type_cast(&[TypeTag::Float], Value::from("1e3")), Value::Float(1000.0));
        assert_eq!(type_cast(&[TypeTag::Float], Value::Int(4)), Value::Float(4.0));
        assert_eq!(type_cast(&[TypeTag::Float], Value::from("inf")), Value::from("inf"));
    }

    #[test]
    fn test_first_declared_filter_wins() {
        assert_eq!(
            type_cast(&[TypeTag::Int, TypeTag::String], Value::Float(7.0)),
            Value::Int(7)
        );
        assert_eq!(
            type_cast(&[TypeTag::Int, TypeTag::String], Value::Float(7.5)),
            Value::from("7.5")
        );
    }

    #[test]
    fn test_string_filter_bools() {
        assert_eq!(type_cast(&[TypeTag::String], Value::Bool(true)), Value::from("1"));
        assert_eq!(type_cast(&[TypeTag::String], Value::Bool(false)), Value::from(""));
    }

    #[test]
    fn test_date_to_string() {
        let d = chrono::NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
        assert_eq!(
            type_cast(&[TypeTag::String], Value::Date(d)),
            Value::from("2020-01-02")
        );
        assert_eq!(type_cast(&[TypeTag::Int], Value::Date(d)), Value::Date(d));
    }

    #[test]
    fn test_null_becomes_zero_value() {
        assert_eq!(type_cast(&[TypeTag::Int], Value::Null), Value::Int(0));
        assert_eq!(type_cast(&[TypeTag::String], Value::Null), Value::from(""));
        assert_eq!(type_cast(&[TypeTag::Array], Value::Null), Value::List(vec![]));
    }

    #[test]
    fn test_scalar_to_array() {
        assert_eq!(
            type_cast(&[TypeTag::Array], Value::from("a")),
            Value::List(vec![Value::from("a")])
        );
    }

    #[test]
    fn test_list_map_conversion() {
        let list = Value::from(vec!["a", "b"]);
        let Value::Map(map) = type_cast(&[TypeTag::Object], list) else {
            panic!("expected map");
        };
        assert_eq!(map["1"], Value::from("b"));

        let back = type_cast(&[TypeTag::Array], Value::Map(map));
        assert_eq!(back, Value::from(vec!["a", "b"]));
    }

    #[test]
    fn test_unconvertible_kept() {
        assert_eq!(
            type_cast(&[TypeTag::Int, TypeTag::Null], Value::from("")),
            Value::from("")
        );
        let list = Value::from(vec![1_i64]);
        assert_eq!(type_cast(&[TypeTag::String], list.clone()), list);
    }
}
