//! Input validation shared by create and update.
//!
//! Uniqueness is not checked here; it needs the record set and lives in
//! [`crate::store::ContactStore`].

use std::sync::LazyLock;

use regex::Regex;

use crate::{
  contact::ContactInput,
  error::{Field, ValidationError},
};

/// Minimum number of digits a phone number must contain.
pub const MIN_PHONE_DIGITS: usize = 10;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
    .expect("email pattern is valid")
});

static DIGIT_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\d").expect("digit pattern is valid"));

/// Input that passed field-level validation. Strings are trimmed and empty
/// optional fields are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInput {
  pub name:    String,
  pub phone:   String,
  pub email:   Option<String>,
  pub address: Option<String>,
}

/// Number of decimal digits in `phone`, ignoring separators. Any Unicode
/// decimal digit counts, not only `0-9`.
pub fn digit_count(phone: &str) -> usize { DIGIT_RE.find_iter(phone).count() }

pub fn is_valid_phone(phone: &str) -> bool {
  digit_count(phone) >= MIN_PHONE_DIGITS
}

/// Empty input is valid: email is optional.
pub fn is_valid_email(email: &str) -> bool {
  email.is_empty() || EMAIL_RE.is_match(email)
}

/// Trim and check `input` in order: required fields, phone, email.
pub fn validate(input: &ContactInput) -> Result<ValidatedInput, ValidationError> {
  let name = input.name.trim();
  let phone = input.phone.trim();
  let email = input.email.trim();
  let address = input.address.trim();

  if name.is_empty() {
    return Err(ValidationError::MissingField(Field::Name));
  }
  if phone.is_empty() {
    return Err(ValidationError::MissingField(Field::Phone));
  }
  if !is_valid_phone(phone) {
    return Err(ValidationError::InvalidPhone(phone.to_owned()));
  }
  if !is_valid_email(email) {
    return Err(ValidationError::InvalidEmail(email.to_owned()));
  }

  Ok(ValidatedInput {
    name:    name.to_owned(),
    phone:   phone.to_owned(),
    email:   non_empty(email),
    address: non_empty(address),
  })
}

fn non_empty(s: &str) -> Option<String> {
  (!s.is_empty()).then(|| s.to_owned())
}
