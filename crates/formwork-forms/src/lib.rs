//! # formwork-forms
//!
//! Form models and themeable HTML field rendering.
//!
//! A [`FormModel`](model::FormModel) holds the typed attribute values of one
//! form, declared up front by a [`FormSchema`](schema::FormSchema). Fields in
//! [`field`] bind to a model attribute (or to detached
//! [`PureInputData`](input_data::PureInputData)) and render labels, inputs,
//! hints and errors through a template resolved from the active
//! [`ThemeContainer`](theme::ThemeContainer).
//!
//! ```
//! use formwork_forms::prelude::*;
//!
//! let schema = FormSchema::builder("TextForm")
//!     .attribute("job", [TypeTag::String])
//!     .build();
//! let form = FormModel::new(&schema);
//!
//! let html = Field::text(&form, "job")
//!     .unwrap()
//!     .with_themes(ThemeContainer::default().into())
//!     .render();
//! assert_eq!(
//!     html,
//!     "<div>\n<label for=\"textform-job\">Job</label>\n\
//!      <input type=\"text\" id=\"textform-job\" name=\"TextForm[job]\" value>\n</div>"
//! );
//! ```

pub mod coerce;
pub mod enricher;
pub mod errors;
pub mod field;
pub mod helper;
pub mod html;
pub mod input_data;
pub mod model;
pub mod schema;
pub mod template;
pub mod theme;
pub mod validation;
pub mod value;

/// Commonly used types, including the [`FieldOptionsExt`](field::FieldOptionsExt)
/// configuration methods.
pub mod prelude {
    pub use crate::enricher::{RulesEnricher, ValidationRulesEnricher};
    pub use crate::errors::FormErrors;
    pub use crate::field::{
        Button, Checkbox, ErrorPart, ErrorSummary, Field, FieldKind, FieldOptionsExt, FileInput,
        FormField, HintPart, InputField, LabelPart, Radio, Textarea,
    };
    pub use crate::html::{AttributeValue, Attributes, ClassList, Tag};
    pub use crate::input_data::{FormModelInputData, InputData, PureInputData};
    pub use crate::model::FormModel;
    pub use crate::schema::{FormSchema, TypeTag};
    pub use crate::theme::{FieldOptions, PartConfig, ThemeConfig, ThemeContainer};
    pub use crate::validation::{ResultSet, Rule, ValidationResult, Validator};
    pub use crate::value::{Value, ValueMap};
}
