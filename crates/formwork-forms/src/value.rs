//! Attribute values.
//!
//! The [`Value`] enum is what a [`FormModel`](crate::model::FormModel)
//! stores for each attribute, what submitted data is loaded as, and what
//! fields render into `value` attributes.

use std::fmt;

use indexmap::IndexMap;

use crate::model::FormModel;

/// An ordered string-keyed map of values, as submitted by a client.
pub type ValueMap = IndexMap<String, Value>;

/// A dynamically typed attribute value.
///
/// # Examples
///
/// ```
/// use formwork_forms::value::Value;
///
/// let v = Value::from(42_i64);
/// assert_eq!(v, Value::Int(42));
///
/// let v = Value::from("hello");
/// assert_eq!(v, Value::String("hello".to_string()));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// No value.
    #[default]
    Null,
    /// A boolean value.
    Bool(bool),
    /// A 64-bit signed integer.
    Int(i64),
    /// A 64-bit floating-point number.
    Float(f64),
    /// A UTF-8 string.
    String(String),
    /// An ordered list of values.
    List(Vec<Self>),
    /// A string-keyed map of values.
    Map(ValueMap),
    /// A date without time.
    Date(chrono::NaiveDate),
    /// A date and time without timezone.
    DateTime(chrono::NaiveDateTime),
    /// A time without date.
    Time(chrono::NaiveTime),
    /// A nested form model.
    Model(Box<FormModel>),
}

impl Value {
    /// Returns `true` for `Bool`, `Int`, `Float` and `String`.
    pub const fn is_scalar(&self) -> bool {
        matches!(
            self,
            Self::Bool(_) | Self::Int(_) | Self::Float(_) | Self::String(_)
        )
    }

    /// Returns `true` if this is [`Value::Null`].
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Converts the value to the string it renders as, if it has one.
    ///
    /// `true` becomes `"1"`, `false` and `Null` become the empty string,
    /// and dates use their HTML input formats. Lists, maps and models have
    /// no string form.
    ///
    /// ```
    /// use formwork_forms::value::Value;
    ///
    /// assert_eq!(Value::Bool(true).as_string().as_deref(), Some("1"));
    /// assert_eq!(Value::Float(3.0).as_string().as_deref(), Some("3"));
    /// assert_eq!(Value::List(vec![]).as_string(), None);
    /// ```
    pub fn as_string(&self) -> Option<String> {
        match self {
            Self::Null | Self::Bool(false) => Some(String::new()),
            Self::Bool(true) => Some("1".to_string()),
            Self::Int(i) => Some(i.to_string()),
            Self::Float(f) => Some(f.to_string()),
            Self::String(s) => Some(s.clone()),
            Self::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
            Self::DateTime(dt) => Some(dt.format("%Y-%m-%dT%H:%M").to_string()),
            Self::Time(t) => Some(t.format("%H:%M").to_string()),
            Self::List(_) | Self::Map(_) | Self::Model(_) => None,
        }
    }

    /// Returns the string slice if this is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the nested model if this is a `Model`.
    pub fn as_model(&self) -> Option<&FormModel> {
        match self {
            Self::Model(m) => Some(m),
            _ => None,
        }
    }

    /// Returns the nested model mutably if this is a `Model`.
    pub fn as_model_mut(&mut self) -> Option<&mut FormModel> {
        match self {
            Self::Model(m) => Some(m),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List(vals) => {
                write!(f, "[")?;
                for (i, v) in vals.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, "]")
            }
            Self::Map(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
            Self::Model(m) => write!(f, "<{}>", m.form_name()),
            other => write!(f, "{}", other.as_string().unwrap_or_default()),
        }
    }
}

// ── From implementations ──────────────────────────────────────────────

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<chrono::NaiveDate> for Value {
    fn from(v: chrono::NaiveDate) -> Self {
        Self::Date(v)
    }
}

impl From<chrono::NaiveDateTime> for Value {
    fn from(v: chrono::NaiveDateTime) -> Self {
        Self::DateTime(v)
    }
}

impl From<chrono::NaiveTime> for Value {
    fn from(v: chrono::NaiveTime) -> Self {
        Self::Time(v)
    }
}

impl From<FormModel> for Value {
    fn from(v: FormModel) -> Self {
        Self::Model(Box::new(v))
    }
}

impl From<ValueMap> for Value {
    fn from(v: ValueMap) -> Self {
        Self::Map(v)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map_or_else(|| Self::Float(n.as_f64().unwrap_or_default()), Self::Int),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(obj) => {
                Self::Map(obj.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

/// Builds a [`ValueMap`] from a JSON object; other JSON values yield an
/// empty map.
///
/// ```
/// use formwork_forms::value::{value_map, Value};
///
/// let data = value_map(serde_json::json!({"LoginForm": {"login": "admin"}}));
/// assert!(matches!(data.get("LoginForm"), Some(Value::Map(_))));
/// ```
pub fn value_map(json: serde_json::Value) -> ValueMap {
    match Value::from(json) {
        Value::Map(map) => map,
        _ => ValueMap::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_string_scalars() {
        assert_eq!(Value::Null.as_string().as_deref(), Some(""));
        assert_eq!(Value::Bool(false).as_string().as_deref(), Some(""));
        assert_eq!(Value::Int(-7).as_string().as_deref(), Some("-7"));
        assert_eq!(Value::Float(1.2563).as_string().as_deref(), Some("1.2563"));
        assert_eq!(Value::from("x").as_string().as_deref(), Some("x"));
    }

    #[test]
    fn test_as_string_dates() {
        let d = chrono::NaiveDate::from_ymd_opt(2021, 9, 18).unwrap();
        assert_eq!(Value::Date(d).as_string().as_deref(), Some("2021-09-18"));
        let dt = d.and_hms_opt(12, 30, 0).unwrap();
        assert_eq!(
            Value::DateTime(dt).as_string().as_deref(),
            Some("2021-09-18T12:30")
        );
    }

    #[test]
    fn test_is_scalar() {
        assert!(Value::Int(1).is_scalar());
        assert!(Value::from("").is_scalar());
        assert!(!Value::Null.is_scalar());
        assert!(!Value::List(vec![]).is_scalar());
    }

    #[test]
    fn test_from_json() {
        let v = Value::from(serde_json::json!({"a": [1, 2.5, null, "x"]}));
        let Value::Map(map) = v else {
            panic!("expected map");
        };
        assert_eq!(
            map["a"],
            Value::List(vec![
                Value::Int(1),
                Value::Float(2.5),
                Value::Null,
                Value::from("x")
            ])
        );
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("a")), Value::from("a"));
    }

    #[test]
    fn test_display_list() {
        let v = Value::from(vec![1_i64, 2]);
        assert_eq!(v.to_string(), "[1, 2]");
    }
}
