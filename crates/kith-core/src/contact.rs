//! Contact records: the unit of the Kith contact book.
//!
//! A contact is created once, edited in place, and soft-deleted by flipping
//! its [`ContactStatus`]. Records are never physically removed, so the id
//! space stays intact across deletions.

use std::fmt;

use chrono::{Local, NaiveDateTime, Timelike};

// ─── Identity ────────────────────────────────────────────────────────────────

/// Store-assigned integer id. Monotonic; never reused after deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContactId(pub u64);

impl ContactId {
  /// The id following `self`, or `None` once the id space is used up.
  pub fn next(self) -> Option<Self> { self.0.checked_add(1).map(Self) }
}

impl fmt::Display for ContactId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// ─── Status ──────────────────────────────────────────────────────────────────

/// Whether a record is visible to queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContactStatus {
  #[default]
  Active,
  /// Soft-deleted: hidden from every query but still persisted.
  Deleted,
}

impl ContactStatus {
  pub fn is_active(&self) -> bool { matches!(self, Self::Active) }
}

// ─── Contact ─────────────────────────────────────────────────────────────────

/// A single contact record.
///
/// Timestamps are local wall-clock time truncated to the minute, which is
/// the resolution of the persisted form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
  pub id:          ContactId,
  pub name:        String,
  /// Stored exactly as entered (after trimming); never digit-normalised.
  pub phone:       String,
  pub email:       Option<String>,
  pub address:     Option<String>,
  /// Set once at creation.
  pub created_at:  NaiveDateTime,
  /// Bumped on every successful edit; never earlier than `created_at`.
  pub modified_at: NaiveDateTime,
  pub status:      ContactStatus,
}

impl Contact {
  pub fn is_active(&self) -> bool { self.status.is_active() }

  /// The email address, or `""` when absent.
  pub fn email_str(&self) -> &str { self.email.as_deref().unwrap_or_default() }

  /// The postal address, or `""` when absent.
  pub fn address_str(&self) -> &str {
    self.address.as_deref().unwrap_or_default()
  }
}

// ─── ContactInput ────────────────────────────────────────────────────────────

/// Raw user input for [`crate::store::ContactStore::create`] and
/// [`crate::store::ContactStore::update`].
///
/// Fields are taken verbatim from the caller; trimming and validation happen
/// in [`crate::validate::validate`]. An empty `email` or `address` means the
/// field is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactInput {
  pub name:    String,
  pub phone:   String,
  pub email:   String,
  pub address: String,
}

impl ContactInput {
  /// Convenience constructor with the optional fields left empty.
  pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      phone: phone.into(),
      ..Self::default()
    }
  }

  pub fn with_email(mut self, email: impl Into<String>) -> Self {
    self.email = email.into();
    self
  }

  pub fn with_address(mut self, address: impl Into<String>) -> Self {
    self.address = address.into();
    self
  }
}

impl From<&Contact> for ContactInput {
  /// Pre-fill an edit form from an existing record.
  fn from(contact: &Contact) -> Self {
    Self {
      name:    contact.name.clone(),
      phone:   contact.phone.clone(),
      email:   contact.email_str().to_owned(),
      address: contact.address_str().to_owned(),
    }
  }
}

// ─── Clock ───────────────────────────────────────────────────────────────────

/// Current local time truncated to the minute.
pub fn now() -> NaiveDateTime { truncate_to_minute(Local::now().naive_local()) }

pub fn truncate_to_minute(at: NaiveDateTime) -> NaiveDateTime {
  at.with_second(0)
    .and_then(|t| t.with_nanosecond(0))
    .unwrap_or(at)
}
