//! Form domain layer
//!
//! The content form's data model, rules and session lifecycle, independent of
//! how it is drawn.

mod error;
mod field;
mod focus;
mod form_state;
mod group;
mod options;
mod record;
mod schema;
mod validator;

pub use error::{FieldPath, SubmitError};
pub use field::{FieldEdit, FieldKind, FieldSpec};
pub use focus::{focus_order, FocusTarget, FormFocus};
pub use form_state::{FormSession, SessionState};
pub use group::MAX_ENTRIES;
pub use options::ContentType;
pub use record::{BaseField, ContentRecord};
