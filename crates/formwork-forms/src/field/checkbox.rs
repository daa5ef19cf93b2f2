//! Checkbox field.

use std::sync::Arc;

use formwork_core::utils::html::escape_html;

use crate::html::{add_css_class, Attributes, ClassList, Tag};
use crate::input_data::InputData;

use super::{FieldBase, FieldKind, FormField, RenderContext};

const DEFAULT_INPUT_VALUE: &str = "1";
const DEFAULT_UNCHECK_VALUE: &str = "0";

/// Renders a checkbox or radio `<input>`, checked when the bound value's
/// string form equals the input value.
pub(super) fn choice_input(ctx: &RenderContext<'_>, input_type: &str) -> String {
    let options = ctx.options();
    let input_value = options.input_value.as_deref().unwrap_or(DEFAULT_INPUT_VALUE);
    let checked = ctx
        .data()
        .value()
        .as_string()
        .is_some_and(|current| current == input_value);

    let tag = ctx
        .input_tag(input_type)
        .attr_default("value", input_value)
        .attr_default("checked", checked);
    ctx.finish_input(tag).render()
}

/// Whether the label wraps the input.
pub(super) fn enclosed(ctx: &RenderContext<'_>) -> bool {
    ctx.options().enclosed_by_label.unwrap_or(true)
}

/// Puts `input` inside a `<label>` followed by the label text, when the
/// input is enclosed and there is a label.
pub(super) fn enclose(ctx: &RenderContext<'_>, input: String) -> String {
    if !enclosed(ctx) {
        return input;
    }
    let Some(text) = ctx.label_text() else {
        return input;
    };
    let options = ctx.options();
    let mut attrs = options.input_label_attributes.clone().unwrap_or_default();
    if let Some(class) = &options.input_label_class {
        add_css_class(&mut attrs, class);
    }
    Tag::named("label")
        .attrs(&attrs)
        .raw_content(format!("{input} {}", escape_html(text)))
        .render()
}

/// The hidden input submitted in place of an unchecked box. Empty when the
/// unchecked value is empty or the field has no name.
pub(super) fn uncheck_input(ctx: &RenderContext<'_>, uncheck: Option<&str>) -> String {
    match (ctx.data().name(), uncheck) {
        (Some(name), Some(uncheck)) if !uncheck.is_empty() => Tag::input("hidden")
            .attr("name", name)
            .attr("value", uncheck)
            .render(),
        _ => String::new(),
    }
}

/// A checkbox, preceded by a hidden input carrying the unchecked value so
/// that an unchecked box still submits.
///
/// By default the label encloses the checkbox and the template's `{label}`
/// stays empty.
#[derive(Debug, Clone)]
pub struct Checkbox {
    base: FieldBase,
}

impl Checkbox {
    /// Creates a checkbox bound to `data`.
    pub fn new(data: Arc<dyn InputData>) -> Self {
        Self {
            base: FieldBase::new(FieldKind::Checkbox, data),
        }
    }

    /// The value submitted when checked.
    #[must_use]
    pub fn input_value(mut self, value: impl Into<String>) -> Self {
        self.base.options.input_value = Some(value.into());
        self
    }

    /// The value submitted when unchecked; empty for no hidden input.
    #[must_use]
    pub fn uncheck_value(mut self, value: impl Into<String>) -> Self {
        self.base.options.uncheck_value = Some(value.into());
        self
    }

    /// Whether the label wraps the checkbox.
    #[must_use]
    pub fn enclosed_by_label(mut self, enclosed: bool) -> Self {
        self.base.options.enclosed_by_label = Some(enclosed);
        self
    }

    /// Attributes of the enclosing label.
    #[must_use]
    pub fn input_label_attributes(mut self, attributes: Attributes) -> Self {
        self.base.options.input_label_attributes = Some(attributes);
        self
    }

    /// Classes of the enclosing label.
    #[must_use]
    pub fn input_label_class(mut self, class: impl Into<ClassList>) -> Self {
        self.base.options.input_label_class = Some(class.into());
        self
    }
}

impl FormField for Checkbox {
    fn base(&self) -> &FieldBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut FieldBase {
        &mut self.base
    }

    fn render_input(&self, ctx: &RenderContext<'_>) -> String {
        let uncheck = ctx
            .options()
            .uncheck_value
            .as_deref()
            .unwrap_or(DEFAULT_UNCHECK_VALUE);
        let checkbox = enclose(ctx, choice_input(ctx, "checkbox"));
        ctx.wrap_input(format!("{}{checkbox}", uncheck_input(ctx, Some(uncheck))))
    }

    fn render_label(&self, ctx: &RenderContext<'_>) -> String {
        if enclosed(ctx) {
            String::new()
        } else {
            ctx.label()
        }
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
                .with_name("CheckboxForm[blue]")
                .with_id("checkboxform-blue")
                .with_label("Blue color")
                .with_value(value),
        )
    }

    fn themed(field: Checkbox) -> Checkbox {
        field.with_themes(Arc::new(ThemeContainer::default()))
    }

    #[test]
    fn test_enclosed_unchecked() {
        let html = themed(Checkbox::new(data(false))).render();
        assert_eq!(
            html,
            "<div>\n<input type=\"hidden\" name=\"CheckboxForm[blue]\" value=\"0\">\
             <label><input type=\"checkbox\" id=\"checkboxform-blue\" name=\"CheckboxForm[blue]\" value=\"1\"> Blue color</label>\n</div>"
        );
    }

    #[test]
    fn test_checked_when_value_matches() {
        let html = themed(Checkbox::new(data(true))).use_container(false).render();
        assert!(html.contains(r#"value="1" checked>"#));
    }

    #[test]
    fn test_custom_values() {
        let html = themed(Checkbox::new(data("yes")))
            .input_value("yes")
            .uncheck_value("")
            .use_container(false)
            .render();
        assert_eq!(
            html,
            "<label><input type=\"checkbox\" id=\"checkboxform-blue\" name=\"CheckboxForm[blue]\" value=\"yes\" checked> Blue color</label>"
        );
    }

    #[test]
    fn test_not_enclosed_uses_template_label() {
        let html = themed(Checkbox::new(data(false)))
            .enclosed_by_label(false)
            .use_container(false)
            .render();
        assert_eq!(
            html,
            "<label for=\"checkboxform-blue\">Blue color</label>\n\
             <input type=\"hidden\" name=\"CheckboxForm[blue]\" value=\"0\">\
             <input type=\"checkbox\" id=\"checkboxform-blue\" name=\"CheckboxForm[blue]\" value=\"1\">"
        );
    }

    #[test]
    fn test_input_label_attributes_and_class() {
        let html = themed(Checkbox::new(data(false)))
            .uncheck_value("")
            .input_label_attributes(crate::html::attributes([("data-x", "1")]))
            .input_label_class("form-check-label")
            .use_container(false)
            .render();
        assert!(html.starts_with(r#"<label class="form-check-label" data-x="1"><input"#));
    }

    #[test]
    fn test_label_text_is_escaped() {
        let html = themed(Checkbox::new(data(false)))
            .label("A & B")
            .uncheck_value("")
            .use_container(false)
            .render();
        assert!(html.ends_with(" A &amp; B</label>"));
    }
}
