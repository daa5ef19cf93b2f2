//! Label, hint and error parts.
//!
//! Each part renders on its own through [`LabelPart`], [`HintPart`] and
//! [`ErrorPart`], and inside every field through the `render_*` functions.

use std::sync::Arc;

use crate::html::{ClassList, Tag};
use crate::input_data::InputData;
use crate::theme::{FieldOptions, PartConfig, ThemeContainer};

use super::{non_empty, FieldBase, FieldKind};

fn part_tag(config: Option<&PartConfig>, class: Option<&ClassList>, default: &str) -> Tag {
    let name = non_empty(config.and_then(|c| c.tag.as_deref())).unwrap_or(default);
    let mut tag = Tag::named(name);
    if let Some(attrs) = config.and_then(|c| c.attributes.as_ref()) {
        tag = tag.attrs(attrs);
    }
    for class in [config.and_then(|c| c.class.as_ref()), class]
        .into_iter()
        .flatten()
    {
        tag = tag.add_class(class);
    }
    tag
}

fn with_text(tag: Tag, config: Option<&PartConfig>, text: &str) -> Tag {
    if config.and_then(|c| c.encode).unwrap_or(true) {
        tag.content(text)
    } else {
        tag.raw_content(text)
    }
}

/// Renders a `<label>`; empty when there is no text.
pub(crate) fn render_label(options: &FieldOptions, data: &dyn InputData, text: Option<&str>) -> String {
    let Some(text) = non_empty(text) else {
        return String::new();
    };
    let config = options.label_config.as_ref();
    let mut tag = part_tag(config, options.label_class.as_ref(), "label");

    let set_for = config.and_then(|c| c.set_for).unwrap_or(true);
    let use_input_id = config.and_then(|c| c.use_input_id).unwrap_or(true);
    if set_for && use_input_id && options.set_input_id.unwrap_or(true) {
        let input_id = options
            .input_attributes
            .as_ref()
            .and_then(|attrs| attrs.get("id"))
            .cloned()
            .or_else(|| data.id().map(Into::into));
        if let Some(id) = input_id {
            tag = tag.attr_default("for", id);
        }
    }
    with_text(tag, config, text).render()
}

/// Renders the hint; empty when there is no text.
pub(crate) fn render_hint(options: &FieldOptions, text: Option<&str>) -> String {
    match non_empty(text) {
        Some(text) => {
            let config = options.hint_config.as_ref();
            with_text(part_tag(config, options.hint_class.as_ref(), "div"), config, text).render()
        }
        None => String::new(),
    }
}

/// Renders the error; empty when there is no text.
pub(crate) fn render_error(options: &FieldOptions, text: Option<&str>) -> String {
    match non_empty(text) {
        Some(text) => {
            let config = options.error_config.as_ref();
            with_text(part_tag(config, options.error_class.as_ref(), "div"), config, text).render()
        }
        None => String::new(),
    }
}

macro_rules! part_widget {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone)]
        pub struct $name {
            base: FieldBase,
            text: Option<String>,
        }

        impl $name {
            /// Creates the part for `data`.
            pub fn new(data: Arc<dyn InputData>) -> Self {
                Self {
                    base: FieldBase::new(FieldKind::Text, data),
                    text: None,
                }
            }

            /// Replaces the text.
            #[must_use]
            pub fn text(mut self, text: impl Into<String>) -> Self {
                self.text = Some(text.into());
                self
            }

            /// Resolves options from the named theme.
            #[must_use]
            pub fn theme(mut self, name: impl Into<String>) -> Self {
                self.base.theme = Some(name.into());
                self
            }

            /// Resolves themes from `themes` instead of the current registry.
            #[must_use]
            pub fn with_themes(mut self, themes: Arc<ThemeContainer>) -> Self {
                self.base.themes = Some(themes);
                self
            }

            /// Applies every option set in `options`.
            #[must_use]
            pub fn options(mut self, options: &FieldOptions) -> Self {
                self.base.options.overlay(options);
                self
            }
        }
    };
}

part_widget! {
    /// A label rendered on its own.
    ///
    /// ```
    /// use formwork_forms::prelude::*;
    ///
    /// let schema = FormSchema::builder("TextForm").attribute("job", [TypeTag::String]).build();
    /// let label = Field::label(&FormModel::new(&schema), "job").unwrap();
    /// assert_eq!(
    ///     label.with_themes(ThemeContainer::default().into()).render(),
    ///     r#"<label for="textform-job">Job</label>"#
    /// );
    /// ```
    LabelPart
}

part_widget! {
    /// A hint rendered on its own.
    HintPart
}

part_widget! {
    /// The first error of an attribute, rendered on its own.
    ErrorPart
}

impl LabelPart {
    /// Sets the label class.
    #[must_use]
    pub fn class(mut self, class: impl Into<ClassList>) -> Self {
        self.base.options.label_class = Some(class.into());
        self
    }

    /// Sets the label config.
    #[must_use]
    pub fn config(mut self, config: PartConfig) -> Self {
        self.base.options.label_config = Some(config);
        self
    }

    /// Renders the label.
    pub fn render(&self) -> String {
        let ctx = self.base.context();
        let text = self.text.as_deref().or_else(|| ctx.label_text());
        render_label(ctx.options(), ctx.data(), text)
    }
}

impl HintPart {
    /// Sets the hint class.
    #[must_use]
    pub fn class(mut self, class: impl Into<ClassList>) -> Self {
        self.base.options.hint_class = Some(class.into());
        self
    }

    /// Sets the hint config.
    #[must_use]
    pub fn config(mut self, config: PartConfig) -> Self {
        self.base.options.hint_config = Some(config);
        self
    }

    /// Renders the hint.
    pub fn render(&self) -> String {
        let ctx = self.base.context();
        let text = self.text.as_deref().or_else(|| ctx.data().hint());
        render_hint(ctx.options(), text)
    }
}

impl ErrorPart {
    /// Sets the error class.
    #[must_use]
    pub fn class(mut self, class: impl Into<ClassList>) -> Self {
        self.base.options.error_class = Some(class.into());
        self
    }

    /// Sets the error config.
    #[must_use]
    pub fn config(mut self, config: PartConfig) -> Self {
        self.base.options.error_config = Some(config);
        self
    }

    /// Renders the first error.
    pub fn render(&self) -> String {
        let ctx = self.base.context();
        let text = self.text.as_deref().or_else(|| ctx.data().first_error());
        render_error(ctx.options(), text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input_data::PureInputData;

    fn data() -> Arc<dyn InputData> {
        Arc::new(
            PureInputData::new()
                .with_id("textform-job")
                .with_label("Job")
                .with_hint("Input your full name.")
                .with_validation_errors(vec!["Value cannot be blank.".into(), "Other.".into()]),
        )
    }

    fn empty_themes() -> Arc<ThemeContainer> {
        Arc::new(ThemeContainer::default())
    }

    #[test]
    fn test_label() {
        let label = LabelPart::new(data()).with_themes(empty_themes());
        assert_eq!(label.render(), r#"<label for="textform-job">Job</label>"#);
    }

    #[test]
    fn test_label_without_for() {
        let config = PartConfig {
            set_for: Some(false),
            ..PartConfig::default()
        };
        let label = LabelPart::new(data()).with_themes(empty_themes()).config(config);
        assert_eq!(label.render(), "<label>Job</label>");

        let config = PartConfig {
            use_input_id: Some(false),
            ..PartConfig::default()
        };
        let label = LabelPart::new(data()).with_themes(empty_themes()).config(config);
        assert_eq!(label.render(), "<label>Job</label>");
    }

    #[test]
    fn test_label_class() {
        let label = LabelPart::new(data())
            .with_themes(empty_themes())
            .class(["red", "blue"]);
        assert_eq!(
            label.render(),
            r#"<label class="red blue" for="textform-job">Job</label>"#
        );
    }

    #[test]
    fn test_label_text_is_escaped_unless_raw() {
        let label = LabelPart::new(data()).with_themes(empty_themes()).text("<b>Job</b>");
        assert_eq!(
            label.render(),
            r#"<label for="textform-job">&lt;b&gt;Job&lt;/b&gt;</label>"#
        );

        let raw = PartConfig {
            encode: Some(false),
            ..PartConfig::default()
        };
        let label = LabelPart::new(data())
            .with_themes(empty_themes())
            .text("<b>Job</b>")
            .config(raw);
        assert_eq!(label.render(), r#"<label for="textform-job"><b>Job</b></label>"#);
    }

    #[test]
    fn test_hint() {
        let hint = HintPart::new(data()).with_themes(empty_themes());
        assert_eq!(hint.render(), "<div>Input your full name.</div>");

        let config = PartConfig {
            tag: Some("b".into()),
            ..PartConfig::default()
        };
        let hint = HintPart::new(data()).with_themes(empty_themes()).config(config);
        assert_eq!(hint.render(), "<b>Input your full name.</b>");

        let hint = HintPart::new(data()).with_themes(empty_themes()).class("red");
        assert_eq!(hint.render(), r#"<div class="red">Input your full name.</div>"#);
    }

    #[test]
    fn test_error_shows_first_only() {
        let error = ErrorPart::new(data()).with_themes(empty_themes());
        assert_eq!(error.render(), "<div>Value cannot be blank.</div>");

        let config = PartConfig {
            tag: Some("b".into()),
            ..PartConfig::default()
        };
        let error = ErrorPart::new(data()).with_themes(empty_themes()).config(config);
        assert_eq!(error.render(), "<b>Value cannot be blank.</b>");
    }

    #[test]
    fn test_missing_text_renders_nothing() {
        let data: Arc<dyn InputData> = Arc::new(PureInputData::new());
        assert_eq!(HintPart::new(Arc::clone(&data)).with_themes(empty_themes()).render(), "");
        assert_eq!(ErrorPart::new(Arc::clone(&data)).with_themes(empty_themes()).render(), "");
        assert_eq!(LabelPart::new(data).with_themes(empty_themes()).render(), "");
    }
}
