//! Field presence and format checks for the admission form
//!
//! The email and phone checks are deliberately loose. The phone check follows
//! JavaScript `Number()` string coercion, so a handful of non-digit strings
//! (`"1.23456789"`, `"0x1234567f"`, ten spaces) pass.

use crate::state::FormState;
use thiserror::Error;

/// Why a form was rejected before submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("All fields are required")]
    MissingFields,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Please enter a valid 10-digit phone number")]
    InvalidPhone,
}

/// Check a form. Presence is checked first, then email, then phone.
pub fn validate(form: &FormState) -> Result<(), ValidationError> {
    if form.name.is_empty() || form.email.is_empty() || form.phone_number.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    if !is_valid_email(&form.email) {
        return Err(ValidationError::InvalidEmail);
    }
    if !is_valid_phone_number(&form.phone_number) {
        return Err(ValidationError::InvalidPhone);
    }
    Ok(())
}

/// Exactly one `@`, a non-empty local part, and a dot somewhere in the domain
pub fn is_valid_email(email: &str) -> bool {
    let parts: Vec<&str> = email.split('@').collect();
    parts.len() == 2 && !parts[0].is_empty() && parts[1].contains('.')
}

/// Ten UTF-16 code units that coerce to a number
pub fn is_valid_phone_number(phone: &str) -> bool {
    phone.encode_utf16().count() == 10 && is_numeric_like(phone)
}

/// Whether `Number(input)` would produce something other than `NaN`
fn is_numeric_like(input: &str) -> bool {
    let trimmed = input.trim_matches(is_js_whitespace);
    if trimmed.is_empty() {
        return true;
    }
    if let Some(valid) = radix_literal(trimmed) {
        return valid;
    }

    let unsigned = trimmed
        .strip_prefix(|c| c == '+' || c == '-')
        .unwrap_or(trimmed);
    unsigned == "Infinity" || is_decimal_literal(unsigned)
}

fn is_js_whitespace(c: char) -> bool {
    c == '\u{FEFF}' || (c.is_whitespace() && c != '\u{85}')
}

/// `Some(valid)` when the input carries a `0x`/`0o`/`0b` prefix
fn radix_literal(s: &str) -> Option<bool> {
    let prefix = s.get(..2)?;
    let digits = &s[2..];
    let radix = match prefix {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    Some(!digits.is_empty() && digits.chars().all(|c| c.is_digit(radix)))
}

fn is_decimal_literal(s: &str) -> bool {
    let (mantissa, exponent) = match s.find(|c| c == 'e' || c == 'E') {
        Some(at) => (&s[..at], Some(&s[at + 1..])),
        None => (s, None),
    };

    if let Some(exponent) = exponent {
        let digits = exponent
            .strip_prefix(|c| c == '+' || c == '-')
            .unwrap_or(exponent);
        if !all_digits(digits) {
            return false;
        }
    }

    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return false;
    }
    (int_part.is_empty() || all_digits(int_part)) && (frac_part.is_empty() || all_digits(frac_part))
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
