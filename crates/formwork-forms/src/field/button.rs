//! Buttons.

use crate::html::{AttributeValue, Attributes, ClassList, Tag};

use super::{FieldBase, FieldKind, FormField, RenderContext};

/// A `<button>` of type `button`, `submit` or `reset`.
///
/// Buttons have no label, hint or error; only `{input}` is filled.
///
/// ```
/// use std::sync::Arc;
/// use formwork_forms::prelude::*;
///
/// let html = Field::submit_button("Save")
///     .with_themes(Arc::new(ThemeContainer::default()))
///     .button_class("primary")
///     .render();
/// assert_eq!(html, "<div>\n<button type=\"submit\" class=\"primary\">Save</button>\n</div>");
/// ```
#[derive(Debug, Clone)]
pub struct Button {
    base: FieldBase,
    content: String,
    encode: bool,
    attributes: Attributes,
}

impl Button {
    /// Creates an empty button; `kind` is one of the button kinds.
    pub fn new(kind: FieldKind) -> Self {
        Self {
            base: FieldBase::detached(kind),
            content: String::new(),
            encode: true,
            attributes: Attributes::new(),
        }
    }

    /// Sets the text content.
    #[must_use]
    pub fn content(mut self, text: impl Into<String>) -> Self {
        self.content = text.into();
        self.encode = true;
        self
    }

    /// Sets pre-rendered HTML content.
    #[must_use]
    pub fn raw_content(mut self, html: impl Into<String>) -> Self {
        self.content = html.into();
        self.encode = false;
        self
    }

    /// Sets the button classes.
    #[must_use]
    pub fn button_class(mut self, class: impl Into<ClassList>) -> Self {
        self.base.options.button_class = Some(class.into());
        self
    }

    /// Sets the button attributes.
    #[must_use]
    pub fn button_attributes(mut self, attributes: Attributes) -> Self {
        self.base.options.button_attributes = Some(attributes);
        self
    }

    /// Sets one button attribute.
    #[must_use]
    pub fn attr(mut self, name: &str, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }

    #[must_use]
    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    #[must_use]
    pub fn name(self, name: &str) -> Self {
        self.attr("name", name)
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
    pub fn tab_index(self, index: i64) -> Self {
        self.attr("tabindex", index)
    }

    /// The id of the form the button belongs to.
    #[must_use]
    pub fn form(self, form: &str) -> Self {
        self.attr("form", form)
    }
}

impl FormField for Button {
    fn base(&self) -> &FieldBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut FieldBase {
        &mut self.base
    }

    fn render_input(&self, ctx: &RenderContext<'_>) -> String {
        let options = ctx.options();
        let input_type = ctx.kind().input_type().unwrap_or("button");
        let mut tag = Tag::named("button").attr("type", input_type);
        if let Some(attrs) = &options.button_attributes {
            tag = tag.attrs(attrs);
        }
        tag = tag.attrs(&self.attributes);
        if let Some(class) = &options.button_class {
            tag = tag.add_class(class);
        }
        let tag = if self.encode {
            tag.content(&self.content)
        } else {
            tag.raw_content(self.content.clone())
        };
        ctx.wrap_input(tag.render())
    }

    fn render_label(&self, _ctx: &RenderContext<'_>) -> String {
        String::new()
    }

    fn render_hint(&self, _ctx: &RenderContext<'_>) -> String {
        String::new()
    }

    fn render_error(&self, _ctx: &RenderContext<'_>) -> String {
        String::new()
    }
}
