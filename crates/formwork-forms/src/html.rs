//! HTML tag building.
//!
//! Attributes render in a fixed priority order (`type`, `id`, `class`,
//! `name`, `value`, ...) followed by every other attribute in insertion
//! order. `true` and the empty string render as a bare attribute name,
//! `false` omits the attribute, and lists are joined with spaces.

use std::fmt;

use formwork_core::utils::html::{encode_attribute, escape_html};
use formwork_core::{FormError, FormResult};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Attributes rendered ahead of all others, in this order.
const ATTRIBUTE_ORDER: &[&str] = &[
    "type", "id", "class", "name", "value", "href", "loading", "src", "srcset", "form", "action",
    "method", "selected", "checked", "readonly", "disabled", "multiple", "size", "maxlength",
    "minlength", "width", "height", "rows", "cols", "alt", "title", "rel", "media",
];

/// Elements rendered without content or closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// The value of one HTML attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// A boolean attribute: present when `true`, omitted when `false`.
    Flag(bool),
    /// An integer.
    Int(i64),
    /// A string.
    Text(String),
    /// A space-separated list.
    List(Vec<String>),
}

impl AttributeValue {
    /// The rendered value, or `None` when the attribute is omitted.
    /// `Some("")` renders as a bare attribute.
    fn rendered(&self) -> Option<String> {
        match self {
            Self::Flag(true) => Some(String::new()),
            Self::Flag(false) => None,
            Self::Int(i) => Some(i.to_string()),
            Self::Text(s) => Some(s.clone()),
            Self::List(items) if items.is_empty() => None,
            Self::List(items) => Some(items.join(" ")),
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(v: bool) -> Self {
        Self::Flag(v)
    }
}

impl From<i64> for AttributeValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for AttributeValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<&str> for AttributeValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Vec<String>> for AttributeValue {
    fn from(v: Vec<String>) -> Self {
        Self::List(v)
    }
}

/// An ordered set of HTML attributes.
pub type Attributes = IndexMap<String, AttributeValue>;

/// Builds [`Attributes`] from `(name, value)` pairs.
///
/// ```
/// use formwork_forms::html::{attributes, render_attributes};
///
/// let attrs = attributes([("data-type", "input-text"), ("class", "red")]);
/// assert_eq!(render_attributes(&attrs), r#" class="red" data-type="input-text""#);
/// ```
pub fn attributes<K, V, I>(pairs: I) -> Attributes
where
    K: Into<String>,
    V: Into<AttributeValue>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Renders attributes with a leading space before each one.
pub fn render_attributes(attrs: &Attributes) -> String {
    let mut ordered: Vec<(&String, &AttributeValue)> = Vec::with_capacity(attrs.len());
    for name in ATTRIBUTE_ORDER {
        if let Some((key, value)) = attrs.get_key_value(*name) {
            ordered.push((key, value));
        }
    }
    ordered.extend(
        attrs
            .iter()
            .filter(|(name, _)| !ATTRIBUTE_ORDER.contains(&name.as_str())),
    );

    let mut html = String::new();
    for (name, value) in ordered {
        match value.rendered() {
            None => {}
            Some(v) if v.is_empty() => {
                html.push(' ');
                html.push_str(name);
            }
            Some(v) => {
                html.push(' ');
                html.push_str(name);
                html.push_str("=\"");
                html.push_str(&encode_attribute(&v));
                html.push('"');
            }
        }
    }
    html
}

/// Appends CSS classes to the `class` attribute, skipping duplicates.
pub fn add_css_class(attrs: &mut Attributes, classes: &ClassList) {
    if classes.is_empty() {
        return;
    }
    let mut current: Vec<String> = match attrs.get("class") {
        Some(AttributeValue::Text(s)) => s.split_whitespace().map(str::to_string).collect(),
        Some(AttributeValue::List(items)) => items.clone(),
        _ => Vec::new(),
    };
    for class in classes.iter() {
        if !current.iter().any(|c| c == class) {
            current.push(class.to_string());
        }
    }
    attrs.insert("class".to_string(), AttributeValue::List(current));
}

/// A list of CSS classes.
///
/// Deserializes from either a single string or a list of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassList(Vec<String>);

impl ClassList {
    /// Creates an empty class list.
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Returns `true` if there are no classes.
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(String::is_empty)
    }

    /// Iterates over individual class names, splitting entries that hold
    /// several space-separated classes.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().flat_map(|c| c.split_whitespace())
    }

    /// Appends the classes of `other`.
    pub fn extend(&mut self, other: &Self) {
        self.0.extend(other.0.iter().cloned());
    }
}

impl<'de> Deserialize<'de> for ClassList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            One(String),
            Many(Vec<String>),
        }
        Ok(match Repr::deserialize(deserializer)? {
            Repr::One(s) => Self(vec![s]),
            Repr::Many(v) => Self(v),
        })
    }
}

impl From<&str> for ClassList {
    fn from(v: &str) -> Self {
        Self(vec![v.to_string()])
    }
}

impl From<String> for ClassList {
    fn from(v: String) -> Self {
        Self(vec![v])
    }
}

impl From<Vec<String>> for ClassList {
    fn from(v: Vec<String>) -> Self {
        Self(v)
    }
}

impl From<Vec<&str>> for ClassList {
    fn from(v: Vec<&str>) -> Self {
        Self(v.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ClassList {
    fn from(v: [&str; N]) -> Self {
        Self(v.iter().map(|s| (*s).to_string()).collect())
    }
}

/// An HTML element under construction.
///
/// # Examples
///
/// ```
/// use formwork_forms::html::Tag;
///
/// let html = Tag::new("label")
///     .unwrap()
///     .attr("for", "loginform-login")
///     .add_class(&"form-label".into())
///     .content("Login & password")
///     .render();
/// assert_eq!(
///     html,
///     r#"<label class="form-label" for="loginform-login">Login &amp; password</label>"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    name: String,
    attributes: Attributes,
    content: String,
}

impl Tag {
    /// Starts a tag.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::EmptyTagName`] when `name` is empty.
    pub fn new(name: &str) -> FormResult<Self> {
        if name.is_empty() {
            return Err(FormError::EmptyTagName);
        }
        Ok(Self {
            name: name.to_string(),
            attributes: Attributes::new(),
            content: String::new(),
        })
    }

    /// Starts a tag whose name is already known to be non-empty.
    pub(crate) fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            attributes: Attributes::new(),
            content: String::new(),
        }
    }

    /// Starts an `<input>` of the given type.
    pub fn input(input_type: &str) -> Self {
        let mut attributes = Attributes::new();
        attributes.insert("type".to_string(), AttributeValue::from(input_type));
        Self {
            name: "input".to_string(),
            attributes,
            content: String::new(),
        }
    }

    /// Sets one attribute.
    #[must_use]
    pub fn attr(mut self, name: &str, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }

    /// Sets an attribute only when it is not already present.
    #[must_use]
    pub fn attr_default(mut self, name: &str, value: impl Into<AttributeValue>) -> Self {
        self.attributes
            .entry(name.to_string())
            .or_insert_with(|| value.into());
        self
    }

    /// Merges attributes, later values replacing earlier ones.
    #[must_use]
    pub fn attrs(mut self, attrs: &Attributes) -> Self {
        for (name, value) in attrs {
            self.attributes.insert(name.clone(), value.clone());
        }
        self
    }

    /// Appends CSS classes.
    #[must_use]
    pub fn add_class(mut self, classes: &ClassList) -> Self {
        add_css_class(&mut self.attributes, classes);
        self
    }

    /// Sets text content, HTML-escaped.
    #[must_use]
    pub fn content(mut self, text: &str) -> Self {
        self.content = escape_html(text);
        self
    }

    /// Sets pre-rendered HTML content.
    #[must_use]
    pub fn raw_content(mut self, html: impl Into<String>) -> Self {
        self.content = html.into();
        self
    }

    /// The attributes set so far.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Renders the element.
    pub fn render(&self) -> String {
        let attrs = render_attributes(&self.attributes);
        if VOID_ELEMENTS.contains(&self.name.as_str()) {
            format!("<{}{attrs}>", self.name)
        } else {
            format!("<{}{attrs}>{}</{}>", self.name, self.content, self.name)
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        let attrs = attributes([
            ("data-x", "1"),
            ("value", "v"),
            ("name", "n"),
            ("id", "i"),
            ("type", "text"),
        ]);
        assert_eq!(
            render_attributes(&attrs),
            r#" type="text" id="i" name="n" value="v" data-x="1""#
        );
    }

    #[test]
    fn test_bare_and_omitted() {
        let mut attrs = Attributes::new();
        attrs.insert("value".into(), AttributeValue::from(""));
        attrs.insert("required".into(), AttributeValue::from(true));
        attrs.insert("disabled".into(), AttributeValue::from(false));
        assert_eq!(render_attributes(&attrs), " value required");
    }

    #[test]
    fn test_attribute_encoding() {
        let attrs = attributes([("title", r#"a "b" <c>"#)]);
        assert_eq!(
            render_attributes(&attrs),
            r#" title="a &quot;b&quot; &lt;c&gt;""#
        );
    }

    #[test]
    fn test_add_css_class_dedupes() {
        let mut attrs = attributes([("class", "a b")]);
        add_css_class(&mut attrs, &ClassList::from(["b", "c d"]));
        assert_eq!(render_attributes(&attrs), r#" class="a b c d""#);
    }

    #[test]
    fn test_empty_class_list_is_noop() {
        let mut attrs = Attributes::new();
        add_css_class(&mut attrs, &ClassList::new());
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_void_element() {
        let html = Tag::input("hidden").attr("name", "x").attr("value", "0").render();
        assert_eq!(html, r#"<input type="hidden" name="x" value="0">"#);
    }

    #[test]
    fn test_empty_tag_name() {
        assert!(matches!(Tag::new(""), Err(FormError::EmptyTagName)));
    }

    #[test]
    fn test_class_list_deserialize() {
        let one: ClassList = serde_json::from_str(r#""form-control""#).unwrap();
        let many: ClassList = serde_json::from_str(r#"["wrapper", "red"]"#).unwrap();
        assert_eq!(one, ClassList::from("form-control"));
        assert_eq!(many.iter().collect::<Vec<_>>(), ["wrapper", "red"]);
    }

    #[test]
    fn test_attr_default_keeps_existing() {
        let tag = Tag::input("text").attr("id", "a").attr_default("id", "b");
        assert_eq!(tag.render(), r#"<input type="text" id="a">"#);
    }
}
