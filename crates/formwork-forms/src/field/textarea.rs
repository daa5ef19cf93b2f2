//! Multi-line text field.

use std::sync::Arc;

use crate::html::{AttributeValue, Attributes, Tag};
use crate::input_data::InputData;

use super::{FieldBase, FieldKind, FormField, RenderContext};

/// A `<textarea>` holding the escaped value.
#[derive(Debug, Clone)]
pub struct Textarea {
    base: FieldBase,
    attributes: Attributes,
}

impl Textarea {
    /// Creates a textarea bound to `data`.
    pub fn new(data: Arc<dyn InputData>) -> Self {
        Self {
            base: FieldBase::new(FieldKind::Textarea, data),
            attributes: Attributes::new(),
        }
    }

    /// Sets one attribute of the `<textarea>`.
    #[must_use]
    pub fn attr(mut self, name: &str, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }

    #[must_use]
    pub fn rows(self, rows: i64) -> Self {
        self.attr("rows", rows)
    }

    #[must_use]
    pub fn cols(self, cols: i64) -> Self {
        self.attr("cols", cols)
    }

    /// `soft` or `hard`.
    #[must_use]
    pub fn wrap(self, wrap: &str) -> Self {
        self.attr("wrap", wrap)
    }

    #[must_use]
    pub fn disabled(self, on: bool) -> Self {
        self.attr("disabled", on)
    }

    #[must_use]
    pub fn readonly(self, on: bool) -> Self {
        self.attr("readonly", on)
    }
}

impl FormField for Textarea {
    fn base(&self) -> &FieldBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut FieldBase {
        &mut self.base
    }

    fn render_input(&self, ctx: &RenderContext<'_>) -> String {
        let mut tag = Tag::named("textarea");
        if let Some(attrs) = &ctx.options().input_attributes {
            tag = tag.attrs(attrs);
        }
        let tag = ctx.identify(tag.attrs(&self.attributes));
        let text = ctx.data().value().as_string().unwrap_or_default();
        ctx.wrap_input(ctx.finish_input(tag).content(&text).render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldOptionsExt;
    use crate::input_data::PureInputData;
    use crate::theme::ThemeContainer;

    fn textarea(value: &str) -> Textarea {
        Textarea::new(Arc::new(
            PureInputData::new()
                .with_name("TextareaForm[bio]")
                .with_id("textareaform-bio")
                .with_placeholder("About you")
                .with_value(value),
        ))
        .with_themes(Arc::new(ThemeContainer::default()))
        .use_container(false)
    }

    #[test]
    fn test_value_escaped() {
        assert_eq!(
            textarea("<p>hi</p>").rows(4).render(),
            "<textarea id=\"textareaform-bio\" name=\"TextareaForm[bio]\" rows=\"4\" placeholder=\"About you\">&lt;p&gt;hi&lt;/p&gt;</textarea>"
        );
    }

    #[test]
    fn test_blank_lines_in_value_survive_template() {
        let html = textarea("a\n\nb")
            .use_placeholder(false)
            .use_container(true)
            .render();
        assert_eq!(
            html,
            "<div>\n<textarea id=\"textareaform-bio\" name=\"TextareaForm[bio]\">a\n\nb</textarea>\n</div>"
        );
    }

    #[test]
    fn test_placeholder_can_be_disabled() {
        assert_eq!(
            textarea("").use_placeholder(false).render(),
            "<textarea id=\"textareaform-bio\" name=\"TextareaForm[bio]\"></textarea>"
        );
    }
}
