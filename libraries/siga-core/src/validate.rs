//! Form validators
//!
//! Reusable checks for the data-entry forms. Messages are the user-facing
//! strings shown next to each field.

use crate::types::CreateMember;
use std::collections::BTreeMap;

/// Field name -> error message
pub type FieldErrors = BTreeMap<&'static str, &'static str>;

/// Something@domain.tld, no whitespace
pub fn validate_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Optional leading `+`, first digit 1-9, at most 16 digits; spaces ignored
pub fn validate_phone(phone: &str) -> bool {
    let compact: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    let digits = compact.strip_prefix('+').unwrap_or(&compact);
    let mut chars = digits.chars();
    match chars.next() {
        Some('1'..='9') => {}
        _ => return false,
    }
    digits.len() <= 16 && chars.all(|c| c.is_ascii_digit())
}

pub fn validate_required(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

pub fn validate_min_length(value: &str, min_length: usize) -> bool {
    !value.is_empty() && value.chars().count() >= min_length
}

pub fn validate_max_length(value: &str, max_length: usize) -> bool {
    !value.is_empty() && value.chars().count() <= max_length
}

/// Which password rules are met
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordCheck {
    pub is_valid: bool,
    pub min_length: usize,
    pub has_upper_case: bool,
    pub has_lower_case: bool,
    pub has_numbers: bool,
    /// Reported but not required
    pub has_special_char: bool,
}

const PASSWORD_MIN_LENGTH: usize = 8;
const PASSWORD_SPECIALS: &str = "!@#$%^&*(),.?\":{}|<>";

pub fn validate_password(password: &str) -> PasswordCheck {
    let has_upper_case = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower_case = password.chars().any(|c| c.is_ascii_lowercase());
    let has_numbers = password.chars().any(|c| c.is_ascii_digit());
    let has_special_char = password.chars().any(|c| PASSWORD_SPECIALS.contains(c));

    PasswordCheck {
        is_valid: password.chars().count() >= PASSWORD_MIN_LENGTH
            && has_upper_case
            && has_lower_case
            && has_numbers,
        min_length: PASSWORD_MIN_LENGTH,
        has_upper_case,
        has_lower_case,
        has_numbers,
        has_special_char,
    }
}

/// Check the member form; an empty map means the form is valid
pub fn validate_member_form(form: &CreateMember) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if !validate_required(Some(&form.name)) {
        errors.insert("name", "El nombre es obligatorio");
    }

    if !validate_required(Some(&form.email)) {
        errors.insert("email", "El email es obligatorio");
    } else if !validate_email(&form.email) {
        errors.insert("email", "El formato del email es inválido");
    }

    match form.phone.as_deref() {
        phone if !validate_required(phone) => {
            errors.insert("phone", "El teléfono es obligatorio");
        }
        Some(phone) if !validate_phone(phone) => {
            errors.insert("phone", "El formato del teléfono es inválido");
        }
        _ => {}
    }

    errors
}
