//! `<input>` fields.

use std::sync::Arc;

use crate::html::{AttributeValue, Attributes};
use crate::input_data::InputData;

use super::{render_field, FieldBase, FieldKind, FormField, RenderContext};

/// A field rendering one `<input>` of its kind's type.
///
/// Hidden inputs render alone, without container, label, hint or error.
/// Range inputs default to `min="1"` and `max="100"`. Image inputs carry
/// no `name` or `value`.
#[derive(Debug, Clone)]
pub struct InputField {
    base: FieldBase,
    attributes: Attributes,
}

impl InputField {
    /// Creates a field of `kind` bound to `data`.
    pub fn new(kind: FieldKind, data: Arc<dyn InputData>) -> Self {
        Self {
            base: FieldBase::new(kind, data),
            attributes: Attributes::new(),
        }
    }

    /// Creates a field of `kind` bound to nothing.
    pub fn detached(kind: FieldKind) -> Self {
        Self {
            base: FieldBase::detached(kind),
            attributes: Attributes::new(),
        }
    }

    /// Sets one input attribute, replacing any themed value.
    #[must_use]
    pub fn attr(mut self, name: &str, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }

    #[must_use]
    pub fn autofocus(self, on: bool) -> Self {
        self.attr("autofocus", on)
    }

    #[must_use]
    pub fn disabled(self, on: bool) -> Self {
        self.attr("disabled", on)
    }

    #[must_use]
    pub fn readonly(self, on: bool) -> Self {
        self.attr("readonly", on)
    }

    #[must_use]
    pub fn required(self, on: bool) -> Self {
        self.attr("required", on)
    }

    #[must_use]
    pub fn tab_index(self, index: i64) -> Self {
        self.attr("tabindex", index)
    }

    /// Sets `min`, for numeric and date kinds.
    #[must_use]
    pub fn min(self, min: impl Into<AttributeValue>) -> Self {
        self.attr("min", min)
    }

    /// Sets `max`, for numeric and date kinds.
    #[must_use]
    pub fn max(self, max: impl Into<AttributeValue>) -> Self {
        self.attr("max", max)
    }

    #[must_use]
    pub fn step(self, step: impl Into<AttributeValue>) -> Self {
        self.attr("step", step)
    }

    #[must_use]
    pub fn max_length(self, len: i64) -> Self {
        self.attr("maxlength", len)
    }

    #[must_use]
    pub fn min_length(self, len: i64) -> Self {
        self.attr("minlength", len)
    }

    #[must_use]
    pub fn pattern(self, pattern: &str) -> Self {
        self.attr("pattern", pattern)
    }

    /// The image source, for image inputs.
    #[must_use]
    pub fn src(self, src: &str) -> Self {
        self.attr("src", src)
    }

    #[must_use]
    pub fn alt(self, alt: &str) -> Self {
        self.attr("alt", alt)
    }

    #[must_use]
    pub fn width(self, width: impl Into<AttributeValue>) -> Self {
        self.attr("width", width)
    }

    #[must_use]
    pub fn height(self, height: impl Into<AttributeValue>) -> Self {
        self.attr("height", height)
    }

    fn input_html(&self, ctx: &RenderContext<'_>) -> String {
        let kind = ctx.kind();
        let Some(input_type) = kind.input_type() else {
            tracing::warn!(field = kind.name(), "kind does not render an <input>");
            return String::new();
        };
        let mut tag = ctx.input_tag(input_type).attrs(&self.attributes);

        if kind != FieldKind::Image {
            let value = ctx.data().value();
            if !value.is_null() {
                match value.as_string() {
                    Some(text) => tag = tag.attr_default("value", text),
                    None => tracing::debug!(
                        field = kind.name(),
                        "value has no string form, not rendered"
                    ),
                }
            }
        }
        if kind == FieldKind::Range {
            tag = tag.attr_default("min", "1").attr_default("max", "100");
        }

        ctx.finish_input(tag).render()
    }
}

impl FormField for InputField {
    fn base(&self) -> &FieldBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut FieldBase {
        &mut self.base
    }

    fn render_input(&self, ctx: &RenderContext<'_>) -> String {
        ctx.wrap_input(self.input_html(ctx))
    }

    fn render(&self) -> String {
        if self.base.kind() == FieldKind::Hidden {
            return self.input_html(&self.base.context());
        }
        render_field(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldOptionsExt;
    use crate::input_data::PureInputData;
    use crate::theme::ThemeContainer;
    use crate::value::Value;

    fn data(value: impl Into<Value>) -> Arc<dyn InputData> {
        Arc::new(
            PureInputData::new()
                .with_name("F[a]")
                .with_id("f-a")
                .with_value(value),
        )
    }

    fn render(field: InputField) -> String {
        field
            .with_themes(Arc::new(ThemeContainer::default()))
            .use_container(false)
            .render()
    }

    #[test]
    fn test_null_value_omitted() {
        let html = render(InputField::new(FieldKind::Text, data(Value::Null)));
        assert_eq!(html, r#"<input type="text" id="f-a" name="F[a]">"#);
    }

    #[test]
    fn test_range_defaults() {
        let html = render(InputField::new(FieldKind::Range, data(5)));
        assert_eq!(
            html,
            r#"<input type="range" id="f-a" name="F[a]" value="5" min="1" max="100">"#
        );
        let html = render(InputField::new(FieldKind::Range, data(5)).min(0).max(10));
        assert_eq!(
            html,
            r#"<input type="range" id="f-a" name="F[a]" value="5" min="0" max="10">"#
        );
    }

    #[test]
    fn test_image_has_no_name_or_value() {
        let html = render(InputField::detached(FieldKind::Image).src("/go.png").alt("Go"));
        assert_eq!(html, r#"<input type="image" src="/go.png" alt="Go">"#);
    }

    #[test]
    fn test_hidden_renders_alone() {
        let html = InputField::new(FieldKind::Hidden, data("x100"))
            .with_themes(Arc::new(ThemeContainer::default()))
            .label("ignored")
            .render();
        assert_eq!(html, r#"<input type="hidden" id="f-a" name="F[a]" value="x100">"#);
    }

    #[test]
    fn test_flags() {
        let html = render(
            InputField::new(FieldKind::Email, data(""))
                .disabled(true)
                .readonly(false)
                .tab_index(3),
        );
        assert_eq!(
            html,
            r#"<input type="email" id="f-a" name="F[a]" value disabled tabindex="3">"#
        );
    }

    #[test]
    fn test_kind_without_input_renders_nothing() {
        assert_eq!(render(InputField::new(FieldKind::Textarea, data("x"))), "");
    }

    #[test]
    fn test_list_value_not_rendered() {
        let html = render(InputField::new(FieldKind::Text, data(vec![1_i64])));
        assert_eq!(html, r#"<input type="text" id="f-a" name="F[a]">"#);
    }
}
