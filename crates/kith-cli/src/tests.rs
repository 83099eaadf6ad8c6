//! Tests for the sub-commands, rendering and settings resolution.

use std::{fs, path::Path};

use chrono::NaiveDate;
use kith_core::{
  Error,
  contact::{Contact, ContactId, ContactInput, ContactStatus},
  error::ValidationError,
  search::SearchMode,
  store::ContactStore,
};
use kith_store_json::JsonFileBackend;
use tempfile::TempDir;

use crate::{
  commands::{self, Command},
  settings::{Settings, expand_tilde},
  render,
};

fn store(dir: &TempDir) -> ContactStore<JsonFileBackend> {
  let backend = JsonFileBackend::open(dir.path().join("contacts.json")).unwrap();
  ContactStore::load(backend).store
}

/// Run `command`, answering every confirmation with `answer`.
fn run(
  s: &mut ContactStore<JsonFileBackend>,
  command: Command,
  answer: bool,
) -> anyhow::Result<String> {
  let mut out = Vec::new();
  let mut confirm = |_: &str| -> std::io::Result<bool> { Ok(answer) };
  commands::run(s, command, &mut out, &mut confirm)?;
  Ok(String::from_utf8(out).unwrap())
}

fn add(name: &str, phone: &str) -> Command {
  Command::Add {
    name:    name.into(),
    phone:   phone.into(),
    email:   String::new(),
    address: String::new(),
  }
}

fn sample(name: &str) -> Contact {
  let at = NaiveDate::from_ymd_opt(2024, 5, 17)
    .unwrap()
    .and_hms_opt(8, 30, 0)
    .unwrap();
  Contact {
    id:          ContactId(7),
    name:        name.into(),
    phone:       "555-123-4567".into(),
    email:       None,
    address:     Some("1 Main St".into()),
    created_at:  at,
    modified_at: at,
    status:      ContactStatus::Active,
  }
}

// ─── Commands ────────────────────────────────────────────────────────────────

#[test]
fn add_then_list() {
  let dir = TempDir::new().unwrap();
  let mut s = store(&dir);

  let out = run(&mut s, add("Ann", "1234567890"), true).unwrap();
  assert_eq!(out, "Contact added: Ann (id 1)\n");
  run(&mut s, add("bob", "1234567891"), true).unwrap();

  let out = run(&mut s, Command::List { term: None, by: SearchMode::ByName }, true)
    .unwrap();
  let lines: Vec<&str> = out.lines().collect();
  assert!(lines[0].starts_with("Name"));
  assert!(lines[2].starts_with("Ann"));
  assert!(lines[3].starts_with("bob"));
  assert_eq!(lines.last(), Some(&"Total contacts: 2"));
}

#[test]
fn list_with_term_reports_filtered_count() {
  let dir = TempDir::new().unwrap();
  let mut s = store(&dir);
  run(&mut s, add("Ann", "1234567890"), true).unwrap();
  run(&mut s, add("Ben", "1234567891"), true).unwrap();

  let out = run(
    &mut s,
    Command::List { term: Some("7891".into()), by: SearchMode::ByPhone },
    true,
  )
  .unwrap();
  assert!(out.contains("Ben"));
  assert!(!out.contains("Ann"));
  assert!(out.ends_with("Showing 1 of 2 contacts\n"));

  let out = run(
    &mut s,
    Command::List { term: Some("zzz".into()), by: SearchMode::AllFields },
    true,
  )
  .unwrap();
  assert_eq!(out, "No contacts found.\nShowing 0 of 2 contacts\n");
}

#[test]
fn add_reports_validation_errors() {
  let dir = TempDir::new().unwrap();
  let mut s = store(&dir);
  let err = run(&mut s, add("Ann", "12345"), true).unwrap_err();
  assert!(matches!(
    err.downcast_ref::<Error>(),
    Some(Error::Validation(ValidationError::InvalidPhone(_)))
  ));
  assert_eq!(s.active_count(), 0);
}

#[test]
fn edit_keeps_unspecified_fields() {
  let dir = TempDir::new().unwrap();
  let mut s = store(&dir);
  s.create(&ContactInput::new("Ann", "1234567890").with_email("ann@example.com"))
    .unwrap();

  let out = run(
    &mut s,
    Command::Edit {
      id:      1,
      name:    None,
      phone:   None,
      email:   None,
      address: Some("2 High St".into()),
    },
    true,
  )
  .unwrap();
  assert_eq!(out, "Contact updated: Ann\n");

  let ann = s.get(ContactId(1)).unwrap();
  assert_eq!(ann.email.as_deref(), Some("ann@example.com"));
  assert_eq!(ann.address.as_deref(), Some("2 High St"));
}

#[test]
fn show_unknown_id() {
  let dir = TempDir::new().unwrap();
  let mut s = store(&dir);
  let err = run(&mut s, Command::Show { id: 3 }, true).unwrap_err();
  assert!(matches!(err.downcast_ref::<Error>(), Some(Error::NotFound(ContactId(3)))));
}

#[test]
fn delete_asks_first() {
  let dir = TempDir::new().unwrap();
  let mut s = store(&dir);
  run(&mut s, add("Ann", "1234567890"), true).unwrap();

  let out = run(&mut s, Command::Delete { id: 1, yes: false }, false).unwrap();
  assert_eq!(out, "Cancelled.\n");
  assert_eq!(s.active_count(), 1);

  let out = run(&mut s, Command::Delete { id: 1, yes: false }, true).unwrap();
  assert_eq!(out, "Contact deleted: Ann\n");
  assert_eq!(s.active_count(), 0);
}

#[test]
fn clear_with_yes_skips_confirmation() {
  let dir = TempDir::new().unwrap();
  let mut s = store(&dir);
  assert_eq!(
    run(&mut s, Command::Clear { yes: true }, false).unwrap(),
    "No contacts to clear.\n"
  );

  run(&mut s, add("Ann", "1234567890"), true).unwrap();
  run(&mut s, add("Ben", "1234567891"), true).unwrap();
  let out = run(&mut s, Command::Clear { yes: true }, false).unwrap();
  assert_eq!(out, "All contacts cleared (2 contacts deleted)\n");
  assert_eq!(s.contacts().len(), 2);
}

#[test]
fn export_writes_report_to_file() {
  let dir = TempDir::new().unwrap();
  let mut s = store(&dir);
  let target = dir.path().join("report.txt");

  let out = run(&mut s, Command::Export { output: Some(target.clone()) }, true).unwrap();
  assert_eq!(out, "No contacts to export.\n");
  assert!(!target.exists());

  run(&mut s, add("Alice", "1234567890"), true).unwrap();
  let out = run(&mut s, Command::Export { output: Some(target.clone()) }, true).unwrap();
  assert!(out.starts_with("Contacts exported to "));

  let report = fs::read_to_string(&target).unwrap();
  assert!(report.contains("1. Alice"));
  assert!(report.contains("Total contacts exported: 1"));
}

// ─── Rendering ───────────────────────────────────────────────────────────────

#[test]
fn table_shows_date_only_and_aligns_columns() {
  let table = render::contact_table(&[sample("Ann"), sample("Bartholomew")]);
  let lines: Vec<&str> = table.lines().collect();
  assert_eq!(lines.len(), 4);
  assert!(lines[2].ends_with("2024-05-17"));
  assert!(!table.contains("08:30"));

  let phone_col = lines[0].find("Phone Number").unwrap();
  assert_eq!(lines[2].find("555-123-4567"), Some(phone_col));
  assert_eq!(lines[3].find("555-123-4567"), Some(phone_col));
}

#[test]
fn detail_marks_missing_fields() {
  let detail = render::contact_detail(&sample("Ann"));
  assert!(detail.contains("Email:         Not provided\n"));
  assert!(detail.contains("Address:       1 Main St\n"));
  assert!(detail.contains("Last Modified: 2024-05-17 08:30\n"));
}

#[test]
fn stats_and_export_names() {
  assert_eq!(render::stats_line(1, 3, true), "Showing 1 of 3 contacts");
  assert_eq!(render::stats_line(3, 3, false), "Total contacts: 3");

  let at = NaiveDate::from_ymd_opt(2024, 1, 2)
    .unwrap()
    .and_hms_opt(3, 4, 5)
    .unwrap();
  assert_eq!(render::export_file_name(at), "contacts_export_20240102_030405.txt");
}

// ─── Settings ────────────────────────────────────────────────────────────────

#[test]
fn settings_from_config_file_and_flag() {
  let dir = TempDir::new().unwrap();
  let config_path = dir.path().join("config.toml");
  fs::write(&config_path, "data_file = \"/srv/kith/contacts.json\"\n").unwrap();

  let settings = Settings::load(Some(config_path.as_path()), None).unwrap();
  assert_eq!(settings.data_file, Path::new("/srv/kith/contacts.json"));

  let settings =
    Settings::load(Some(config_path.as_path()), Some(Path::new("/tmp/other.json"))).unwrap();
  assert_eq!(settings.data_file, Path::new("/tmp/other.json"));
}

#[test]
fn explicit_config_file_must_exist() {
  let dir = TempDir::new().unwrap();
  assert!(Settings::load(Some(dir.path().join("nope.toml").as_path()), None).is_err());
}

#[test]
fn tilde_expansion() {
  assert_eq!(expand_tilde(Path::new("/abs/path")), Path::new("/abs/path"));
  if let Ok(home) = std::env::var("HOME") {
    assert_eq!(
      expand_tilde(Path::new("~/contacts.json")),
      Path::new(&home).join("contacts.json")
    );
  }
}
