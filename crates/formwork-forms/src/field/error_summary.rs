//! A list of the form's validation errors.

use crate::errors::FormErrors;
use crate::html::{Attributes, Tag};

use super::{non_empty, FieldBase, FieldKind, FormField, RenderContext};

const DEFAULT_HEADER: &str = "Please fix the following errors:";
const DEFAULT_HEADER_TAG: &str = "p";

/// A header, a `<ul>` of error messages, and an optional footer.
///
/// Shows the first error of each attribute unless `show_all_errors` is
/// set, skipping repeated messages. Renders nothing when there are no
/// errors to show. The template option is ignored.
#[derive(Debug, Clone)]
pub struct ErrorSummary {
    base: FieldBase,
    errors: FormErrors,
}

impl ErrorSummary {
    /// Creates a summary of `errors`.
    pub fn new(errors: FormErrors) -> Self {
        Self {
            base: FieldBase::detached(FieldKind::ErrorSummary),
            errors,
        }
    }

    /// Sets the header text; empty for no header.
    #[must_use]
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.base.options.header = Some(header.into());
        self
    }

    /// Sets the header attributes.
    #[must_use]
    pub fn header_attributes(mut self, attributes: Attributes) -> Self {
        self.base.options.header_attributes = Some(attributes);
        self
    }

    /// Sets the footer text.
    #[must_use]
    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.base.options.footer = Some(footer.into());
        self
    }

    /// Sets the footer attributes.
    #[must_use]
    pub fn footer_attributes(mut self, attributes: Attributes) -> Self {
        self.base.options.footer_attributes = Some(attributes);
        self
    }

    /// Sets the `<ul>` attributes.
    #[must_use]
    pub fn list_attributes(mut self, attributes: Attributes) -> Self {
        self.base.options.list_attributes = Some(attributes);
        self
    }

    /// Restricts the summary to the given attributes.
    #[must_use]
    pub fn only_attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.base.options.only_attributes = Some(attributes.into_iter().map(Into::into).collect());
        self
    }

    /// Shows every error of each attribute instead of the first.
    #[must_use]
    pub fn show_all_errors(mut self, all: bool) -> Self {
        self.base.options.show_all_errors = Some(all);
        self
    }

    fn messages(&self, ctx: &RenderContext<'_>) -> Vec<String> {
        let options = ctx.options();
        let only = options.only_attributes.as_deref().unwrap_or_default();
        let mut messages = if options.show_all_errors.unwrap_or(false) {
            self.errors.summary(only)
        } else {
            self.errors.summary_first_errors(only)
        };
        let mut seen = std::collections::HashSet::new();
        messages.retain(|m| seen.insert(m.clone()));
        messages
    }
}

impl FormField for ErrorSummary {
    fn base(&self) -> &FieldBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut FieldBase {
        &mut self.base
    }

    fn render_input(&self, ctx: &RenderContext<'_>) -> String {
        let messages = self.messages(ctx);
        if messages.is_empty() {
            return String::new();
        }
        let options = ctx.options();
        let mut lines = Vec::with_capacity(3);

        let header = options.header.as_deref().unwrap_or(DEFAULT_HEADER);
        if !header.is_empty() {
            let name = non_empty(options.header_tag.as_deref()).unwrap_or(DEFAULT_HEADER_TAG);
            let mut tag = Tag::named(name);
            if let Some(attrs) = &options.header_attributes {
                tag = tag.attrs(attrs);
            }
            lines.push(tag.content(header).render());
        }

        let items: String = messages
            .iter()
            .map(|m| format!("{}\n", Tag::named("li").content(m).render()))
            .collect();
        let mut list = Tag::named("ul");
        if let Some(attrs) = &options.list_attributes {
            list = list.attrs(attrs);
        }
        lines.push(list.raw_content(format!("\n{items}")).render());

        if let Some(footer) = non_empty(options.footer.as_deref()) {
            let mut tag = Tag::named("p");
            if let Some(attrs) = &options.footer_attributes {
                tag = tag.attrs(attrs);
            }
            lines.push(tag.content(footer).render());
        }
        lines.join("\n")
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

    fn render(&self) -> String {
        let ctx = self.base.context();
        let content = self.render_input(&ctx);
        if content.is_empty() {
            return content;
        }
        ctx.wrap(&content)
    }
}
