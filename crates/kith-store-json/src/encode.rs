//! Encoding and decoding between [`Contact`] and the on-disk JSON records.
//!
//! Timestamps are stored as `YYYY-MM-DD HH:MM` local-time strings. Optional
//! text fields are stored as empty strings. The `deleted` key is written only
//! for deleted records; a missing key reads as `false`.

use chrono::NaiveDateTime;
use kith_core::contact::{Contact, ContactId, ContactStatus};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Format of `date_added` and `date_modified`.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

// ─── NaiveDateTime ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: NaiveDateTime) -> String { dt.format(DATE_FORMAT).to_string() }

pub fn decode_dt(s: &str) -> Result<NaiveDateTime> {
  NaiveDateTime::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Optional text ───────────────────────────────────────────────────────────

fn encode_optional(value: &Option<String>) -> Option<String> {
  Some(value.clone().unwrap_or_default())
}

/// `null`, a missing key and `""` all mean "absent".
fn decode_optional(value: Option<String>) -> Option<String> {
  value.filter(|s| !s.is_empty())
}

fn is_false(b: &bool) -> bool { !*b }

// ─── Row type ────────────────────────────────────────────────────────────────

/// One element of the JSON array, field for field.
#[derive(Debug, Serialize, Deserialize)]
pub struct RawContact {
  pub id:            u64,
  pub name:          String,
  pub phone:         String,
  #[serde(default)]
  pub email:         Option<String>,
  #[serde(default)]
  pub address:       Option<String>,
  pub date_added:    String,
  /// Older files may lack this; it then defaults to `date_added`.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub date_modified: Option<String>,
  #[serde(default, skip_serializing_if = "is_false")]
  pub deleted:       bool,
}

impl RawContact {
  pub fn from_contact(contact: &Contact) -> Self {
    Self {
      id:            contact.id.0,
      name:          contact.name.clone(),
      phone:         contact.phone.clone(),
      email:         encode_optional(&contact.email),
      address:       encode_optional(&contact.address),
      date_added:    encode_dt(contact.created_at),
      date_modified: Some(encode_dt(contact.modified_at)),
      deleted:       !contact.is_active(),
    }
  }

  pub fn into_contact(self) -> Result<Contact> {
    let created_at = decode_dt(&self.date_added)?;
    let modified_at = self
      .date_modified
      .as_deref()
      .map(decode_dt)
      .transpose()?
      .unwrap_or(created_at);

    Ok(Contact {
      id: ContactId(self.id),
      name: self.name,
      phone: self.phone,
      email: decode_optional(self.email),
      address: decode_optional(self.address),
      created_at,
      modified_at,
      status: if self.deleted {
        ContactStatus::Deleted
      } else {
        ContactStatus::Active
      },
    })
  }
}

// ─── Whole file ──────────────────────────────────────────────────────────────

/// Serialise the full record set as a two-space-indented JSON array.
pub fn encode_file(contacts: &[Contact]) -> Result<String> {
  let raws: Vec<RawContact> = contacts.iter().map(RawContact::from_contact).collect();
  Ok(serde_json::to_string_pretty(&raws)?)
}

/// Parse a full file. Fails on anything other than an array of records with
/// well-formed timestamps.
pub fn decode_file(text: &str) -> Result<Vec<Contact>> {
  let raws: Vec<RawContact> = serde_json::from_str(text)?;
  raws.into_iter().map(RawContact::into_contact).collect()
}
