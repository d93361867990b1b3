//! Form domain layer
//!
//! The admission form's record and the descriptors of its fields.

mod field;
mod form_state;

pub use field::FieldKind;
pub use form_state::FormState;
