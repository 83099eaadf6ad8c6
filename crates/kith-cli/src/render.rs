//! Plain-text rendering of query results for the terminal.

use std::fmt::Write as _;

use chrono::NaiveDateTime;
use kith_core::contact::Contact;

const HEADINGS: [&str; 5] = ["Name", "Phone Number", "Email Address", "Address", "Date Added"];

/// One row per contact; the date column shows only the day a contact was added.
pub fn contact_table(contacts: &[Contact]) -> String {
  let rows: Vec<[String; 5]> = contacts
    .iter()
    .map(|c| {
      [
        c.name.clone(),
        c.phone.clone(),
        c.email_str().to_owned(),
        c.address_str().to_owned(),
        c.created_at.format("%Y-%m-%d").to_string(),
      ]
    })
    .collect();

  let mut widths = HEADINGS.map(|h| h.chars().count());
  for row in &rows {
    for (width, cell) in widths.iter_mut().zip(row) {
      *width = (*width).max(cell.chars().count());
    }
  }

  let mut out = String::new();
  push_row(&mut out, &HEADINGS.map(str::to_owned), &widths);
  push_row(&mut out, &widths.map(|w| "-".repeat(w)), &widths);
  for row in &rows {
    push_row(&mut out, row, &widths);
  }
  out
}

fn push_row(out: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
  let line = cells
    .iter()
    .zip(widths)
    .map(|(cell, &width)| format!("{cell:<width$}"))
    .collect::<Vec<_>>()
    .join("  ");
  out.push_str(line.trim_end());
  out.push('\n');
}

/// The summary shown under the list.
pub fn stats_line(showing: usize, total: usize, filtered: bool) -> String {
  if filtered {
    format!("Showing {showing} of {total} contacts")
  } else {
    format!("Total contacts: {total}")
  }
}

/// Every field of one contact, labelled.
pub fn contact_detail(contact: &Contact) -> String {
  let or_missing = |s: &str| {
    if s.is_empty() {
      "Not provided".to_owned()
    } else {
      s.to_owned()
    }
  };

  let fields = [
    ("ID:", contact.id.to_string()),
    ("Name:", contact.name.clone()),
    ("Phone:", contact.phone.clone()),
    ("Email:", or_missing(contact.email_str())),
    ("Address:", or_missing(contact.address_str())),
    ("Date Added:", timestamp(contact.created_at)),
    ("Last Modified:", timestamp(contact.modified_at)),
  ];

  let mut out = String::new();
  for (label, value) in fields {
    let _ = writeln!(out, "{label:<15}{value}");
  }
  out
}

fn timestamp(at: NaiveDateTime) -> String { at.format("%Y-%m-%d %H:%M").to_string() }

/// Default file name for an export written at `at`.
pub fn export_file_name(at: NaiveDateTime) -> String {
  format!("contacts_export_{}.txt", at.format("%Y%m%d_%H%M%S"))
}
