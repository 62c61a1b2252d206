//! briefing core crate.
//!
//! Pure form logic, no HTML and no I/O:
//!
//! - `schema`: fields document model and one-time field-kind
//!   resolution. Every later dispatch is on [`FieldKind`], never on
//!   the raw type string.
//! - `rules`: value-level validation predicates and the user-visible
//!   messages.
//! - `mask`: positional digit grouping for phone inputs.
//! - `answer`: extracted values and the final answers payload.
//! - `page`: the request/user page pair and its loud parser.
//!
//! The rendering side (node factories, validator, extractor,
//! controller) lives in `briefing-web` and consumes these types.

pub mod answer;
pub mod error;
pub mod mask;
pub mod page;
pub mod rules;
pub mod schema;

pub use answer::{AnswerMap, AnswerValue, FormAnswers};
pub use error::FormError;
pub use mask::{CELLPHONE_PATTERN, InputMask};
pub use page::FormPage;
pub use rules::{
    CHOOSE_ONE_MESSAGE, INVALID_EMAIL_MESSAGE, REQUIRED_MESSAGE, UNSELECTED, check_email,
    check_multi_choice, check_single_choice, check_text, is_blank, is_email,
};
pub use schema::{EnumOption, FieldKind, FieldSchema, FormSchema, Question};
