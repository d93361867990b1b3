//! The admission form record

use super::field::FieldKind;
use serde::{Deserialize, Serialize};

/// Everything the applicant has entered so far.
///
/// Serializes to the submission endpoint's payload shape. `countryCode` is
/// only present once a code has been picked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    pub name: String,
    pub email: String,
    #[serde(rename = "phonenumber")]
    pub phone_number: String,
    #[serde(
        rename = "countryCode",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub country_code: Option<String>,
    #[serde(rename = "freetextfield")]
    pub free_text: String,
}

impl FormState {
    /// Text value of a field. The country code reads as empty when unset.
    pub fn value(&self, field: FieldKind) -> &str {
        match field {
            FieldKind::Name => &self.name,
            FieldKind::Email => &self.email,
            FieldKind::CountryCode => self.country_code.as_deref().unwrap_or(""),
            FieldKind::PhoneNumber => &self.phone_number,
            FieldKind::FreeText => &self.free_text,
        }
    }

    fn text_mut(&mut self, field: FieldKind) -> Option<&mut String> {
        match field {
            FieldKind::Name => Some(&mut self.name),
            FieldKind::Email => Some(&mut self.email),
            FieldKind::PhoneNumber => Some(&mut self.phone_number),
            FieldKind::FreeText => Some(&mut self.free_text),
            FieldKind::CountryCode => None,
        }
    }

    /// Append a character to a text field. Returns false for non-text fields.
    pub fn push_char(&mut self, field: FieldKind, c: char) -> bool {
        match self.text_mut(field) {
            Some(value) => {
                value.push(c);
                true
            }
            None => false,
        }
    }

    /// Remove the last character of a text field
    pub fn pop_char(&mut self, field: FieldKind) -> bool {
        match self.text_mut(field) {
            Some(value) => value.pop().is_some(),
            None => false,
        }
    }

    /// Replace a text field's value
    pub fn set_text(&mut self, field: FieldKind, value: impl Into<String>) -> bool {
        match self.text_mut(field) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }
}
