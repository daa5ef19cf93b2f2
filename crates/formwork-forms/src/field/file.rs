//! File upload field.

use std::sync::Arc;

use crate::html::{AttributeValue, Attributes, Tag};
use crate::input_data::InputData;

use super::{FieldBase, FieldKind, FormField, RenderContext};

/// An `<input type="file">`.
///
/// Browsers submit nothing for an empty file input. With
/// [`force_unchecked_value`](Self::force_unchecked_value) a hidden input of
/// the same name is rendered first so the attribute is always submitted.
/// The bound value is never rendered.
#[derive(Debug, Clone)]
pub struct FileInput {
    base: FieldBase,
    attributes: Attributes,
    unchecked_value: Option<String>,
    hidden_attributes: Attributes,
}

impl FileInput {
    /// Creates a file input bound to `data`.
    pub fn new(data: Arc<dyn InputData>) -> Self {
        Self {
            base: FieldBase::new(FieldKind::File, data),
            attributes: Attributes::new(),
            unchecked_value: None,
            hidden_attributes: Attributes::new(),
        }
    }

    /// Sets one attribute of the file input.
    #[must_use]
    pub fn attr(mut self, name: &str, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }

    /// Accepted file types, such as `image/*` or `.pdf`.
    #[must_use]
    pub fn accept(self, accept: &str) -> Self {
        self.attr("accept", accept)
    }

    #[must_use]
    pub fn multiple(self, on: bool) -> Self {
        self.attr("multiple", on)
    }

    /// The id of the form the input belongs to.
    #[must_use]
    pub fn form(self, form: &str) -> Self {
        self.attr("form", form)
    }

    /// Renders a hidden input carrying `value` ahead of the file input.
    #[must_use]
    pub fn force_unchecked_value(mut self, value: impl Into<String>) -> Self {
        self.unchecked_value = Some(value.into());
        self
    }

    /// Attributes of the hidden input.
    #[must_use]
    pub fn hidden_attributes(mut self, attributes: Attributes) -> Self {
        self.hidden_attributes = attributes;
        self
    }

    fn hidden_html(&self, ctx: &RenderContext<'_>) -> String {
        let (Some(value), Some(name)) = (&self.unchecked_value, ctx.data().name()) else {
            return String::new();
        };
        Tag::input("hidden")
            .attrs(&self.hidden_attributes)
            .attr("name", name)
            .attr("value", value.as_str())
            .render()
    }
}

impl FormField for FileInput {
    fn base(&self) -> &FieldBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut FieldBase {
        &mut self.base
    }

    fn render_input(&self, ctx: &RenderContext<'_>) -> String {
        let tag = ctx.input_tag("file").attrs(&self.attributes);
        let input = ctx.finish_input(tag).render();
        ctx.wrap_input(format!("{}{input}", self.hidden_html(ctx)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldOptionsExt;
    use crate::html::attributes;
    use crate::input_data::PureInputData;
    use crate::theme::ThemeContainer;

    fn file() -> FileInput {
        FileInput::new(Arc::new(
            PureInputData::new()
                .with_name("TypeForm[toNull]")
                .with_id("typeform-tonull")
                .with_value("ignored"),
        ))
        .with_themes(Arc::new(ThemeContainer::default()))
        .use_container(false)
    }

    #[test]
    fn test_plain() {
        assert_eq!(
            file().render(),
            r#"<input type="file" id="typeform-tonull" name="TypeForm[toNull]">"#
        );
    }

    #[test]
    fn test_accept_and_multiple() {
        assert_eq!(
            file().accept("image/*").multiple(true).render(),
            r#"<input type="file" id="typeform-tonull" name="TypeForm[toNull]" multiple accept="image/*">"#
        );
    }

    #[test]
    fn test_force_unchecked_value() {
        assert_eq!(
            file().force_unchecked_value("").render(),
            r#"<input type="hidden" name="TypeForm[toNull]" value><input type="file" id="typeform-tonull" name="TypeForm[toNull]">"#
        );
    }

    #[test]
    fn test_hidden_attributes() {
        let html = file()
            .force_unchecked_value("none")
            .hidden_attributes(attributes([("id", "test-id")]))
            .render();
        assert_eq!(
            html,
            r#"<input type="hidden" id="test-id" name="TypeForm[toNull]" value="none"><input type="file" id="typeform-tonull" name="TypeForm[toNull]">"#
        );
    }
}
