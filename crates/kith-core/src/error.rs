//! Error types for `kith-core`.

use thiserror::Error;

use crate::contact::ContactId;

/// A required input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Field {
  Name,
  Phone,
}

/// User-input problems. Always recoverable; the caller re-prompts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("{0} is required")]
  MissingField(Field),

  #[error("invalid phone number {0:?}: at least 10 digits are required")]
  InvalidPhone(String),

  #[error("invalid email address {0:?}")]
  InvalidEmail(String),

  #[error("a contact with phone number {phone:?} already exists (id {existing})")]
  DuplicatePhone { phone: String, existing: ContactId },
}

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error("contact not found: {0}")]
  NotFound(ContactId),

  /// Reading or writing the backing store failed. Any in-memory change made
  /// by the failing operation has been kept.
  #[error("persistence error: {0}")]
  Persistence(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("no contacts to export")]
  NothingToExport,

  /// The highest stored id is `u64::MAX`; no further id can be assigned.
  #[error("no contact id left after {0}")]
  IdSpaceExhausted(ContactId),
}

impl Error {
  pub(crate) fn persistence(
    err: impl std::error::Error + Send + Sync + 'static,
  ) -> Self {
    Self::Persistence(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
