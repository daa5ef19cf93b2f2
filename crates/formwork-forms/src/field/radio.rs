//! Radio button field.

use std::sync::Arc;

use crate::html::{Attributes, ClassList};
use crate::input_data::InputData;

use super::checkbox::{choice_input, enclose, enclosed, uncheck_input};
use super::{FieldBase, FieldKind, FormField, RenderContext};

/// One radio button, enclosed by its label by default.
///
/// Unlike [`Checkbox`](super::Checkbox), no hidden input is rendered unless
/// an unchecked value is set.
#[derive(Debug, Clone)]
pub struct Radio {
    base: FieldBase,
}

impl Radio {
    /// Creates a radio button bound to `data`.
    pub fn new(data: Arc<dyn InputData>) -> Self {
        Self {
            base: FieldBase::new(FieldKind::Radio, data),
        }
    }

    /// The value submitted when selected; `1` unless set.
    #[must_use]
    pub fn input_value(mut self, value: impl Into<String>) -> Self {
        self.base.options.input_value = Some(value.into());
        self
    }

    /// Renders a hidden input with `value` ahead of the radio, so that the
    /// attribute is submitted when nothing is selected.
    #[must_use]
    pub fn uncheck_value(mut self, value: impl Into<String>) -> Self {
        self.base.options.uncheck_value = Some(value.into());
        self
    }

    #[must_use]
    pub fn enclosed_by_label(mut self, enclosed: bool) -> Self {
        self.base.options.enclosed_by_label = Some(enclosed);
        self
    }

    #[must_use]
    pub fn input_label_attributes(mut self, attributes: Attributes) -> Self {
        self.base.options.input_label_attributes = Some(attributes);
        self
    }

    #[must_use]
    pub fn input_label_class(mut self, class: impl Into<ClassList>) -> Self {
        self.base.options.input_label_class = Some(class.into());
        self
    }
}

impl FormField for Radio {
    fn base(&self) -> &FieldBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut FieldBase {
        &mut self.base
    }

    fn render_input(&self, ctx: &RenderContext<'_>) -> String {
        let hidden = uncheck_input(ctx, ctx.options().uncheck_value.as_deref());
        let radio = enclose(ctx, choice_input(ctx, "radio"));
        ctx.wrap_input(format!("{hidden}{radio}"))
    }

    fn render_label(&self, ctx: &RenderContext<'_>) -> String {
        if enclosed(ctx) {
            String::new()
        } else {
            ctx.label()
        }
    }
}
