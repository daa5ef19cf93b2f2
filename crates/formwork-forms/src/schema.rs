//! Form schemas.
//!
//! A [`FormSchema`] declares everything about a form that is fixed at
//! definition time: its name, its attributes in declaration order with their
//! accepted types and defaults, nested forms, and the label, hint,
//! placeholder and rule overrides. Schemas are built once and shared behind
//! an [`Arc`], usually from a `static`:
//!
//! ```
//! use std::sync::Arc;
//! use once_cell::sync::Lazy;
//! use formwork_forms::schema::{FormSchema, TypeTag};
//!
//! static LOGIN: Lazy<Arc<FormSchema>> = Lazy::new(|| {
//!     FormSchema::builder("LoginForm")
//!         .nullable("login", [TypeTag::String])
//!         .nullable("password", [TypeTag::String])
//!         .attribute("rememberMe", [TypeTag::Bool])
//!         .label("login", "Login:")
//!         .build()
//! });
//!
//! assert_eq!(LOGIN.attribute_names().collect::<Vec<_>>(), ["login", "password", "rememberMe"]);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::model::FormModel;
use crate::validation::Rule;
use crate::value::{Value, ValueMap};

/// A declared attribute type.
#[derive(Clone)]
pub enum TypeTag {
    /// `bool`
    Bool,
    /// `int`
    Int,
    /// `float`
    Float,
    /// `string`
    String,
    /// A list.
    Array,
    /// A map, or any structured value such as a date.
    Object,
    /// Accepts `Null`; makes the attribute nullable.
    Null,
    /// A nested form model of the given schema.
    Model(Arc<FormSchema>),
}

impl TypeTag {
    /// Returns `true` if `value`'s runtime type is this tag.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::Bool, Value::Bool(_))
            | (Self::Int, Value::Int(_))
            | (Self::Float, Value::Float(_))
            | (Self::String, Value::String(_))
            | (Self::Array, Value::List(_))
            | (Self::Null, Value::Null)
            | (
                Self::Object,
                Value::Map(_) | Value::Date(_) | Value::DateTime(_) | Value::Time(_),
            ) => true,
            (Self::Model(schema), Value::Model(model)) => {
                Arc::ptr_eq(schema, model.schema()) || schema.name == model.form_name()
            }
            _ => false,
        }
    }

    /// Returns `true` for the four scalar tags.
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Self::Bool | Self::Int | Self::Float | Self::String)
    }

    /// The zero value of this type.
    pub fn default_value(&self) -> Value {
        match self {
            Self::Bool => Value::Bool(false),
            Self::Int => Value::Int(0),
            Self::Float => Value::Float(0.0),
            Self::String => Value::String(String::new()),
            Self::Array => Value::List(Vec::new()),
            Self::Object => Value::Map(ValueMap::new()),
            Self::Null => Value::Null,
            Self::Model(schema) => Value::from(FormModel::new(schema)),
        }
    }
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Model(a), Self::Model(b)) => Arc::ptr_eq(a, b) || a.name == b.name,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => write!(f, "bool"),
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::String => write!(f, "string"),
            Self::Array => write!(f, "array"),
            Self::Object => write!(f, "object"),
            Self::Null => write!(f, "null"),
            Self::Model(schema) => write!(f, "{}", schema.name),
        }
    }
}

/// One declared attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeDef {
    /// Accepted types, in coercion order. Empty means untyped.
    pub types: Vec<TypeTag>,
    /// The value a fresh model starts with.
    pub default: Value,
}

impl AttributeDef {
    /// Returns the nested schema if this attribute holds a model.
    pub fn nested_schema(&self) -> Option<&Arc<FormSchema>> {
        self.types.iter().find_map(|t| match t {
            TypeTag::Model(schema) => Some(schema),
            _ => None,
        })
    }
}

/// The definition of a form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSchema {
    name: String,
    attributes: IndexMap<String, AttributeDef>,
    labels: HashMap<String, String>,
    hints: HashMap<String, String>,
    placeholders: HashMap<String, String>,
    rules: IndexMap<String, Vec<Rule>>,
}

impl FormSchema {
    /// Starts building a schema for the form called `name`.
    pub fn builder(name: impl Into<String>) -> FormSchemaBuilder {
        FormSchemaBuilder {
            schema: Self {
                name: name.into(),
                attributes: IndexMap::new(),
                labels: HashMap::new(),
                hints: HashMap::new(),
                placeholders: HashMap::new(),
                rules: IndexMap::new(),
            },
        }
    }

    /// Starts building a schema for a form with no name. Inputs of an
    /// anonymous form are named after the bare attribute.
    pub fn anonymous() -> FormSchemaBuilder {
        Self::builder("")
    }

    /// The form name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared attribute names, in declaration order.
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    /// Looks up a declared attribute.
    pub fn attribute(&self, name: &str) -> Option<&AttributeDef> {
        self.attributes.get(name)
    }

    pub(crate) fn attributes(&self) -> impl Iterator<Item = (&String, &AttributeDef)> {
        self.attributes.iter()
    }

    /// Label override for a (possibly dotted) attribute path.
    pub fn label_override(&self, path: &str) -> Option<&str> {
        self.labels.get(path).map(String::as_str)
    }

    /// Hint override for a (possibly dotted) attribute path.
    pub fn hint_override(&self, path: &str) -> Option<&str> {
        self.hints.get(path).map(String::as_str)
    }

    /// Placeholder override for a (possibly dotted) attribute path.
    pub fn placeholder_override(&self, path: &str) -> Option<&str> {
        self.placeholders.get(path).map(String::as_str)
    }

    /// Validation rules declared for `attribute`.
    pub fn rules_for(&self, attribute: &str) -> &[Rule] {
        self.rules.get(attribute).map_or(&[], Vec::as_slice)
    }

    /// All declared rules keyed by attribute.
    pub fn rules(&self) -> &IndexMap<String, Vec<Rule>> {
        &self.rules
    }
}

/// Builder for [`FormSchema`].
#[derive(Debug, Clone)]
pub struct FormSchemaBuilder {
    schema: FormSchema,
}

impl FormSchemaBuilder {
    /// Declares an attribute accepting the given types.
    ///
    /// The default is the zero value of the first declared type, or `Null`
    /// for untyped and nullable attributes.
    #[must_use]
    pub fn attribute(mut self, name: &str, types: impl IntoIterator<Item = TypeTag>) -> Self {
        let types: Vec<TypeTag> = types.into_iter().collect();
        let default = if types.is_empty() || types.contains(&TypeTag::Null) {
            Value::Null
        } else {
            types[0].default_value()
        };
        self.schema
            .attributes
            .insert(name.to_string(), AttributeDef { types, default });
        self
    }

    /// Declares an attribute accepting the given types or `Null`.
    #[must_use]
    pub fn nullable(self, name: &str, types: impl IntoIterator<Item = TypeTag>) -> Self {
        let types = types
            .into_iter()
            .chain(std::iter::once(TypeTag::Null))
            .collect::<Vec<_>>();
        self.attribute(name, types)
    }

    /// Declares an attribute with no type constraint.
    #[must_use]
    pub fn untyped(self, name: &str) -> Self {
        self.attribute(name, [])
    }

    /// Declares an attribute holding a nested form.
    #[must_use]
    pub fn nested(self, name: &str, schema: &Arc<FormSchema>) -> Self {
        self.attribute(name, [TypeTag::Model(Arc::clone(schema))])
    }

    /// Sets the default value of an already declared attribute.
    #[must_use]
    pub fn default_value(mut self, name: &str, value: impl Into<Value>) -> Self {
        if let Some(def) = self.schema.attributes.get_mut(name) {
            def.default = value.into();
        }
        self
    }

    /// Overrides the label of an attribute path.
    #[must_use]
    pub fn label(mut self, path: &str, label: &str) -> Self {
        self.schema
            .labels
            .insert(path.to_string(), label.to_string());
        self
    }

    /// Sets the hint of an attribute path.
    #[must_use]
    pub fn hint(mut self, path: &str, hint: &str) -> Self {
        self.schema.hints.insert(path.to_string(), hint.to_string());
        self
    }

    /// Sets the placeholder of an attribute path.
    #[must_use]
    pub fn placeholder(mut self, path: &str, placeholder: &str) -> Self {
        self.schema
            .placeholders
            .insert(path.to_string(), placeholder.to_string());
        self
    }

    /// Adds a validation rule for an attribute.
    #[must_use]
    pub fn rule(mut self, attribute: &str, rule: Rule) -> Self {
        self.schema
            .rules
            .entry(attribute.to_string())
            .or_default()
            .push(rule);
        self
    }

    /// Finishes the schema.
    pub fn build(self) -> Arc<FormSchema> {
        Arc::new(self.schema)
    }
}
