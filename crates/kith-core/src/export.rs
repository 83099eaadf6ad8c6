//! Plain-text export report.

use std::fmt::Write as _;

use chrono::NaiveDateTime;

use crate::contact::Contact;

pub const HEADER: &str = "CONTACT LIST EXPORT";

/// Timestamp format for the `Added:` line; matches the persisted form.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Timestamp format for the trailing `Export date:` line.
pub const EXPORT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render `contacts` in the order given, numbered from 1.
///
/// Callers pass the active records already sorted; see
/// [`crate::store::ContactStore::export_text`].
pub fn render(contacts: &[Contact], exported_at: NaiveDateTime) -> String {
  let mut out = String::new();

  // Writing into a `String` cannot fail.
  let _ = writeln!(out, "{HEADER}");
  let _ = writeln!(out, "{}", "=".repeat(50));
  out.push('\n');

  for (i, contact) in contacts.iter().enumerate() {
    let _ = writeln!(out, "{}. {}", i + 1, contact.name);
    let _ = writeln!(out, "   Phone: {}", contact.phone);
    if let Some(email) = &contact.email {
      let _ = writeln!(out, "   Email: {email}");
    }
    if let Some(address) = &contact.address {
      let _ = writeln!(out, "   Address: {address}");
    }
    let _ = writeln!(out, "   Added: {}", contact.created_at.format(DATE_FORMAT));
    out.push('\n');
  }

  let _ = writeln!(out, "\nTotal contacts exported: {}", contacts.len());
  let _ = writeln!(
    out,
    "Export date: {}",
    exported_at.format(EXPORT_DATE_FORMAT)
  );

  out
}
