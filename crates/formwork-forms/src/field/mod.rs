//! Renderable fields.
//!
//! Every field wraps a [`FieldBase`] (the bound [`InputData`], the
//! instance-level [`FieldOptions`] and the theme to resolve) and implements
//! [`FormField`], whose [`render`](FormField::render) resolves the theme,
//! renders the label, input, hint and error parts, fills the template, and
//! wraps the result in the container.
//!
//! Configuration methods shared by all fields live on [`FieldOptionsExt`],
//! implemented for every [`FormField`]. Each call consumes the field and
//! returns the updated one.

pub mod button;
pub mod checkbox;
pub mod error_summary;
pub mod file;
pub mod input;
pub mod parts;
pub mod radio;
pub mod textarea;

use std::sync::Arc;

use formwork_core::logging::render_span;
use formwork_core::{FormError, FormResult};
use serde::{Deserialize, Serialize};

use crate::enricher::ValidationRulesEnricher;
use crate::html::{add_css_class, Attributes, ClassList, Tag};
use crate::input_data::{FormModelInputData, InputData, PureInputData};
use crate::model::FormModel;
use crate::template::{self, TemplateParts, DEFAULT_TEMPLATE};
use crate::theme::{self, FieldOptions, PartConfig, ThemeContainer};

pub use button::Button;
pub use checkbox::Checkbox;
pub use error_summary::ErrorSummary;
pub use file::FileInput;
pub use input::InputField;
pub use parts::{ErrorPart, HintPart, LabelPart};
pub use radio::Radio;
pub use textarea::Textarea;

/// The kinds of field, used as `fieldConfigs` keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    Text,
    Email,
    Password,
    Number,
    Range,
    Date,
    DateTimeLocal,
    Telephone,
    Url,
    Hidden,
    Image,
    File,
    Checkbox,
    Radio,
    Textarea,
    Button,
    SubmitButton,
    ResetButton,
    ErrorSummary,
}

impl FieldKind {
    /// The `type` of the rendered `<input>` or `<button>`; `None` for
    /// kinds rendering neither.
    pub const fn input_type(self) -> Option<&'static str> {
        match self {
            Self::Text => Some("text"),
            Self::Email => Some("email"),
            Self::Password => Some("password"),
            Self::Number => Some("number"),
            Self::Range => Some("range"),
            Self::Date => Some("date"),
            Self::DateTimeLocal => Some("datetime-local"),
            Self::Telephone => Some("tel"),
            Self::Url => Some("url"),
            Self::Hidden => Some("hidden"),
            Self::Image => Some("image"),
            Self::File => Some("file"),
            Self::Checkbox => Some("checkbox"),
            Self::Radio => Some("radio"),
            Self::Button => Some("button"),
            Self::SubmitButton => Some("submit"),
            Self::ResetButton => Some("reset"),
            Self::Textarea | Self::ErrorSummary => None,
        }
    }

    /// Kinds taking free text: length and pattern constraints apply.
    pub const fn is_text_like(self) -> bool {
        matches!(
            self,
            Self::Text | Self::Email | Self::Password | Self::Telephone | Self::Url | Self::Textarea
        )
    }

    /// Kinds taking `min` and `max`.
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Number | Self::Range)
    }

    /// Kinds that can carry `required`.
    pub const fn accepts_required(self) -> bool {
        !matches!(
            self,
            Self::Hidden
                | Self::Image
                | Self::Range
                | Self::Button
                | Self::SubmitButton
                | Self::ResetButton
                | Self::ErrorSummary
        )
    }

    /// Kinds that render a `placeholder`.
    pub const fn accepts_placeholder(self) -> bool {
        self.is_text_like() || matches!(self, Self::Number)
    }

    /// The kind's name, as used in theme files.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Email => "Email",
            Self::Password => "Password",
            Self::Number => "Number",
            Self::Range => "Range",
            Self::Date => "Date",
            Self::DateTimeLocal => "DateTimeLocal",
            Self::Telephone => "Telephone",
            Self::Url => "Url",
            Self::Hidden => "Hidden",
            Self::Image => "Image",
            Self::File => "File",
            Self::Checkbox => "Checkbox",
            Self::Radio => "Radio",
            Self::Textarea => "Textarea",
            Self::Button => "Button",
            Self::SubmitButton => "SubmitButton",
            Self::ResetButton => "ResetButton",
            Self::ErrorSummary => "ErrorSummary",
        }
    }
}

/// State shared by every field.
#[derive(Debug, Clone)]
pub struct FieldBase {
    kind: FieldKind,
    data: Arc<dyn InputData>,
    options: FieldOptions,
    theme: Option<String>,
    themes: Option<Arc<ThemeContainer>>,
    label: Option<String>,
    hint: Option<String>,
    error: Option<String>,
    placeholder: Option<String>,
}

impl FieldBase {
    /// Creates the base of a field of `kind` rendering `data`.
    pub fn new(kind: FieldKind, data: Arc<dyn InputData>) -> Self {
        Self {
            kind,
            data,
            options: FieldOptions::default(),
            theme: None,
            themes: None,
            label: None,
            hint: None,
            error: None,
            placeholder: None,
        }
    }

    /// Creates the base of a field with no bound data.
    pub fn detached(kind: FieldKind) -> Self {
        Self::new(kind, Arc::new(PureInputData::new()))
    }

    /// The field kind.
    pub const fn kind(&self) -> FieldKind {
        self.kind
    }

    /// The bound data.
    pub fn data(&self) -> &dyn InputData {
        self.data.as_ref()
    }

    /// Instance-level options.
    pub const fn options(&self) -> &FieldOptions {
        &self.options
    }

    /// Instance-level options, mutably.
    pub fn options_mut(&mut self) -> &mut FieldOptions {
        &mut self.options
    }

    /// Resolves the effective options and builds the render context.
    pub fn context(&self) -> RenderContext<'_> {
        let themes = self.themes.clone().unwrap_or_else(theme::current);
        let resolved = themes.resolve(self.theme.as_deref());
        let options = resolved.options_for(self.kind).overlaid(&self.options);
        RenderContext {
            base: self,
            options,
            enricher: resolved.enricher,
        }
    }
}

/// Effective options of one render call.
#[derive(Debug)]
pub struct RenderContext<'a> {
    base: &'a FieldBase,
    options: FieldOptions,
    enricher: Option<Arc<dyn ValidationRulesEnricher>>,
}

impl<'a> RenderContext<'a> {
    /// The effective options.
    pub const fn options(&self) -> &FieldOptions {
        &self.options
    }

    /// The bound data.
    pub fn data(&self) -> &'a dyn InputData {
        self.base.data.as_ref()
    }

    /// The field kind.
    pub const fn kind(&self) -> FieldKind {
        self.base.kind
    }

    /// The label text: the instance override, else the data's label.
    pub fn label_text(&self) -> Option<&'a str> {
        self.base
            .label
            .as_deref()
            .or_else(|| self.data().label())
            .filter(|s| !s.is_empty())
    }

    /// `Some(true)` when validated with errors, `Some(false)` when
    /// validated without, `None` before validation.
    pub fn has_errors(&self) -> Option<bool> {
        self.data()
            .validation_errors()
            .map(|errors| !errors.is_empty())
    }

    fn flag(value: Option<bool>, default: bool) -> bool {
        value.unwrap_or(default)
    }

    /// Whether the input gets an `id`.
    pub fn set_input_id(&self) -> bool {
        Self::flag(self.options.set_input_id, true)
    }

    /// Starts an `<input>` with the configured attributes, `id` and `name`.
    pub fn input_tag(&self, input_type: &str) -> Tag {
        let mut tag = Tag::input(input_type);
        if let Some(attrs) = &self.options.input_attributes {
            tag = tag.attrs(attrs);
        }
        self.identify(tag)
    }

    /// Adds `id` and `name` unless already set.
    pub fn identify(&self, mut tag: Tag) -> Tag {
        if self.set_input_id() {
            if let Some(id) = self.data().id() {
                tag = tag.attr_default("id", id);
            }
        }
        if let Some(name) = self.data().name() {
            tag = tag.attr_default("name", name);
        }
        tag
    }

    /// Adds placeholder, rule-derived attributes, and input classes.
    pub fn finish_input(&self, mut tag: Tag) -> Tag {
        if self.kind().accepts_placeholder() && Self::flag(self.options.use_placeholder, true) {
            let placeholder = self
                .base
                .placeholder
                .as_deref()
                .or_else(|| self.data().placeholder())
                .filter(|s| !s.is_empty());
            if let Some(placeholder) = placeholder {
                tag = tag.attr_default("placeholder", placeholder);
            }
        }

        if Self::flag(self.options.enrichment_from_rules, false) {
            if let Some(enricher) = &self.enricher {
                for (name, value) in enricher.enrich(self.kind(), self.data().rules()) {
                    tag = tag.attr_default(&name, value);
                }
            }
        }

        if let Some(class) = &self.options.input_class {
            tag = tag.add_class(class);
        }
        let state_class = match self.has_errors() {
            Some(true) => self.options.input_invalid_class.as_ref(),
            Some(false) => self.options.input_valid_class.as_ref(),
            None => None,
        };
        if let Some(class) = state_class {
            tag = tag.add_class(class);
        }
        tag
    }

    /// Wraps rendered input HTML in the input container, if one is set.
    pub fn wrap_input(&self, html: String) -> String {
        let Some(name) = non_empty(self.options.input_container_tag.as_deref()) else {
            return html;
        };
        let mut attrs = self.options.input_container_attributes.clone().unwrap_or_default();
        if let Some(class) = &self.options.input_container_class {
            add_css_class(&mut attrs, class);
        }
        Tag::named(name).attrs(&attrs).raw_content(html).render()
    }

    /// Renders the label part.
    pub fn label(&self) -> String {
        parts::render_label(&self.options, self.data(), self.label_text())
    }

    /// Renders the hint part.
    pub fn hint(&self) -> String {
        let text = self.base.hint.as_deref().or_else(|| self.data().hint());
        parts::render_hint(&self.options, text)
    }

    /// Renders the error part.
    pub fn error(&self) -> String {
        let text = self.base.error.as_deref().or_else(|| self.data().first_error());
        parts::render_error(&self.options, text)
    }

    /// Wraps content in the container, unless containers are off.
    pub fn wrap(&self, content: &str) -> String {
        if !Self::flag(self.options.use_container, true) {
            return content.to_string();
        }
        let name = non_empty(self.options.container_tag.as_deref()).unwrap_or("div");
        let mut tag = Tag::named(name);
        if let Some(attrs) = &self.options.container_attributes {
            tag = tag.attrs(attrs);
        }
        for class in [
            self.options.container_class.as_ref(),
            self.options.add_container_class.as_ref(),
        ]
        .into_iter()
        .flatten()
        {
            tag = tag.add_class(class);
        }
        let state_class = match self.has_errors() {
            Some(true) => self.options.invalid_class.as_ref(),
            Some(false) => self.options.valid_class.as_ref(),
            None => None,
        };
        if let Some(class) = state_class {
            tag = tag.add_class(class);
        }
        tag.raw_content(format!("\n{content}\n")).render()
    }

    /// Fills the effective template.
    pub fn fill_template(&self, parts: &TemplateParts<'_>) -> String {
        let template = self.options.template.as_deref().unwrap_or(DEFAULT_TEMPLATE);
        template::render(template, parts)
    }
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// A renderable field.
pub trait FormField {
    /// Shared state.
    fn base(&self) -> &FieldBase;

    /// Shared state, mutably.
    fn base_mut(&mut self) -> &mut FieldBase;

    /// Renders the input part, including its input container.
    fn render_input(&self, ctx: &RenderContext<'_>) -> String;

    /// Renders the label part.
    fn render_label(&self, ctx: &RenderContext<'_>) -> String {
        ctx.label()
    }

    /// Renders the hint part.
    fn render_hint(&self, ctx: &RenderContext<'_>) -> String {
        ctx.hint()
    }

    /// Renders the error part.
    fn render_error(&self, ctx: &RenderContext<'_>) -> String {
        ctx.error()
    }

    /// Renders the complete field.
    fn render(&self) -> String {
        render_field(self)
    }
}

/// Renders the parts of `field`, fills the template, and wraps the result.
pub(crate) fn render_field<F: FormField + ?Sized>(field: &F) -> String {
    let ctx = field.base().context();
    let span = render_span(ctx.kind().name(), ctx.data().name().unwrap_or_default());
    let _enter = span.enter();

    let label = field.render_label(&ctx);
    let input = field.render_input(&ctx);
    let hint = field.render_hint(&ctx);
    let error = field.render_error(&ctx);

    let content = ctx.fill_template(&TemplateParts {
        label: &label,
        input: &input,
        hint: &hint,
        error: &error,
    });
    let html = ctx.wrap(&content);
    tracing::trace!(len = html.len(), "field rendered");
    html
}

/// Configuration shared by every field.
pub trait FieldOptionsExt: FormField + Sized {
    /// Resolves options from the named theme.
    #[must_use]
    fn theme(mut self, name: impl Into<String>) -> Self {
        self.base_mut().theme = Some(name.into());
        self
    }

    /// Resolves themes from `themes` instead of the current registry.
    #[must_use]
    fn with_themes(mut self, themes: Arc<ThemeContainer>) -> Self {
        self.base_mut().themes = Some(themes);
        self
    }

    /// Applies every option set in `options`.
    #[must_use]
    fn options(mut self, options: &FieldOptions) -> Self {
        self.base_mut().options.overlay(options);
        self
    }

    #[must_use]
    fn template(mut self, template: impl Into<String>) -> Self {
        self.base_mut().options.template = Some(template.into());
        self
    }

    #[must_use]
    fn use_container(mut self, use_container: bool) -> Self {
        self.base_mut().options.use_container = Some(use_container);
        self
    }

    /// Sets the container element.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::EmptyTagName`] for an empty name.
    fn container_tag(mut self, name: &str) -> FormResult<Self> {
        if name.is_empty() {
            return Err(FormError::EmptyTagName);
        }
        self.base_mut().options.container_tag = Some(name.to_string());
        Ok(self)
    }

    #[must_use]
    fn container_attributes(mut self, attributes: Attributes) -> Self {
        self.base_mut().options.container_attributes = Some(attributes);
        self
    }

    #[must_use]
    fn container_class(mut self, class: impl Into<ClassList>) -> Self {
        self.base_mut().options.container_class = Some(class.into());
        self
    }

    /// Adds container classes on top of the configured ones.
    #[must_use]
    fn add_container_class(mut self, class: impl Into<ClassList>) -> Self {
        let class = class.into();
        self.base_mut()
            .options
            .add_container_class
            .get_or_insert_with(ClassList::new)
            .extend(&class);
        self
    }

    /// Wraps the input alone in an element.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::EmptyTagName`] for an empty name.
    fn input_container_tag(mut self, name: &str) -> FormResult<Self> {
        if name.is_empty() {
            return Err(FormError::EmptyTagName);
        }
        self.base_mut().options.input_container_tag = Some(name.to_string());
        Ok(self)
    }

    #[must_use]
    fn input_container_attributes(mut self, attributes: Attributes) -> Self {
        self.base_mut().options.input_container_attributes = Some(attributes);
        self
    }

    #[must_use]
    fn input_container_class(mut self, class: impl Into<ClassList>) -> Self {
        self.base_mut().options.input_container_class = Some(class.into());
        self
    }

    #[must_use]
    fn label_class(mut self, class: impl Into<ClassList>) -> Self {
        self.base_mut().options.label_class = Some(class.into());
        self
    }

    #[must_use]
    fn label_config(mut self, config: PartConfig) -> Self {
        self.base_mut().options.label_config = Some(config);
        self
    }

    #[must_use]
    fn hint_class(mut self, class: impl Into<ClassList>) -> Self {
        self.base_mut().options.hint_class = Some(class.into());
        self
    }

    #[must_use]
    fn hint_config(mut self, config: PartConfig) -> Self {
        self.base_mut().options.hint_config = Some(config);
        self
    }

    #[must_use]
    fn error_class(mut self, class: impl Into<ClassList>) -> Self {
        self.base_mut().options.error_class = Some(class.into());
        self
    }

    #[must_use]
    fn error_config(mut self, config: PartConfig) -> Self {
        self.base_mut().options.error_config = Some(config);
        self
    }

    #[must_use]
    fn input_attributes(mut self, attributes: Attributes) -> Self {
        self.base_mut().options.input_attributes = Some(attributes);
        self
    }

    #[must_use]
    fn input_class(mut self, class: impl Into<ClassList>) -> Self {
        self.base_mut().options.input_class = Some(class.into());
        self
    }

    #[must_use]
    fn set_input_id(mut self, set: bool) -> Self {
        self.base_mut().options.set_input_id = Some(set);
        self
    }

    #[must_use]
    fn use_placeholder(mut self, use_placeholder: bool) -> Self {
        self.base_mut().options.use_placeholder = Some(use_placeholder);
        self
    }

    #[must_use]
    fn enrichment_from_rules(mut self, enrich: bool) -> Self {
        self.base_mut().options.enrichment_from_rules = Some(enrich);
        self
    }

    #[must_use]
    fn valid_class(mut self, class: impl Into<ClassList>) -> Self {
        self.base_mut().options.valid_class = Some(class.into());
        self
    }

    #[must_use]
    fn invalid_class(mut self, class: impl Into<ClassList>) -> Self {
        self.base_mut().options.invalid_class = Some(class.into());
        self
    }

    #[must_use]
    fn input_valid_class(mut self, class: impl Into<ClassList>) -> Self {
        self.base_mut().options.input_valid_class = Some(class.into());
        self
    }

    #[must_use]
    fn input_invalid_class(mut self, class: impl Into<ClassList>) -> Self {
        self.base_mut().options.input_invalid_class = Some(class.into());
        self
    }

    /// Replaces the label text.
    #[must_use]
    fn label(mut self, text: impl Into<String>) -> Self {
        self.base_mut().label = Some(text.into());
        self
    }

    /// Replaces the hint text.
    #[must_use]
    fn hint(mut self, text: impl Into<String>) -> Self {
        self.base_mut().hint = Some(text.into());
        self
    }

    /// Replaces the error text.
    #[must_use]
    fn error(mut self, text: impl Into<String>) -> Self {
        self.base_mut().error = Some(text.into());
        self
    }

    /// Replaces the placeholder text.
    #[must_use]
    fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.base_mut().placeholder = Some(text.into());
        self
    }
}

impl<T: FormField> FieldOptionsExt for T {}

/// Constructors binding fields to model attributes.
///
/// ```
/// use formwork_forms::prelude::*;
///
/// let schema = FormSchema::builder("HiddenForm")
///     .attribute("key", [TypeTag::String])
///     .default_value("key", "x100")
///     .build();
/// let html = Field::hidden(&FormModel::new(&schema), "key").unwrap().render();
/// assert_eq!(html, r#"<input type="hidden" id="hiddenform-key" name="HiddenForm[key]" value="x100">"#);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Field;

fn bind(form: &FormModel, attribute: &str) -> FormResult<Arc<dyn InputData>> {
    Ok(Arc::new(FormModelInputData::new(form, attribute)?))
}

macro_rules! input_constructors {
    ($($(#[$doc:meta])* $fn_name:ident => $kind:ident),* $(,)?) => {
        $(
            $(#[$doc])*
            pub fn $fn_name(form: &FormModel, attribute: &str) -> FormResult<InputField> {
                Ok(InputField::new(FieldKind::$kind, bind(form, attribute)?))
            }
        )*
    };
}

impl Field {
    input_constructors! {
        /// `<input type="text">`
        text => Text,
        /// `<input type="email">`
        email => Email,
        /// `<input type="password">`
        password => Password,
        /// `<input type="number">`
        number => Number,
        /// `<input type="range">`, `min` 1 and `max` 100 unless set.
        range => Range,
        /// `<input type="date">`
        date => Date,
        /// `<input type="datetime-local">`
        date_time_local => DateTimeLocal,
        /// `<input type="tel">`
        telephone => Telephone,
        /// `<input type="url">`
        url => Url,
        /// `<input type="hidden">`, rendered without container or parts.
        hidden => Hidden,
    }

    /// `<input type="image">`, not bound to an attribute.
    pub fn image() -> InputField {
        InputField::detached(FieldKind::Image)
    }

    /// A checkbox with a hidden "unchecked" input.
    ///
    /// # Errors
    ///
    /// Fails when the attribute cannot be bound.
    pub fn checkbox(form: &FormModel, attribute: &str) -> FormResult<Checkbox> {
        Ok(Checkbox::new(bind(form, attribute)?))
    }

    /// A radio button.
    ///
    /// # Errors
    ///
    /// Fails when the attribute cannot be bound.
    pub fn radio(form: &FormModel, attribute: &str) -> FormResult<Radio> {
        Ok(Radio::new(bind(form, attribute)?))
    }

    /// `<input type="file">`
    ///
    /// # Errors
    ///
    /// Fails when the attribute cannot be bound.
    pub fn file(form: &FormModel, attribute: &str) -> FormResult<FileInput> {
        Ok(FileInput::new(bind(form, attribute)?))
    }

    /// A `<textarea>`.
    ///
    /// # Errors
    ///
    /// Fails when the attribute cannot be bound.
    pub fn textarea(form: &FormModel, attribute: &str) -> FormResult<Textarea> {
        Ok(Textarea::new(bind(form, attribute)?))
    }

    /// `<button type="button">`
    pub fn button(content: &str) -> Button {
        Button::new(FieldKind::Button).content(content)
    }

    /// `<button type="submit">`
    pub fn submit_button(content: &str) -> Button {
        Button::new(FieldKind::SubmitButton).content(content)
    }

    /// `<button type="reset">`
    pub fn reset_button(content: &str) -> Button {
        Button::new(FieldKind::ResetButton).content(content)
    }

    /// A list of the form's errors.
    pub fn error_summary(form: &FormModel) -> ErrorSummary {
        ErrorSummary::new(form.form_errors().clone())
    }

    /// The label of one attribute.
    ///
    /// # Errors
    ///
    /// Fails when the attribute cannot be bound.
    pub fn label(form: &FormModel, attribute: &str) -> FormResult<LabelPart> {
        Ok(LabelPart::new(bind(form, attribute)?))
    }

    /// The hint of one attribute.
    ///
    /// # Errors
    ///
    /// Fails when the attribute cannot be bound.
    pub fn hint(form: &FormModel, attribute: &str) -> FormResult<HintPart> {
        Ok(HintPart::new(bind(form, attribute)?))
    }

    /// The first error of one attribute.
    ///
    /// # Errors
    ///
    /// Fails when the attribute cannot be bound.
    pub fn error(form: &FormModel, attribute: &str) -> FormResult<ErrorPart> {
        Ok(ErrorPart::new(bind(form, attribute)?))
    }
}
