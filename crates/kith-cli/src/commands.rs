//! Sub-commands. Each one drives a single [`ContactStore`] operation and
//! prints the outcome.

use std::{fs, io::Write, path::PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use clap::Subcommand;
use kith_core::{
  Error,
  contact::{ContactId, ContactInput},
  search::SearchMode,
  store::{Backend, ContactStore},
};

use crate::render;

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Add a new contact.
  Add {
    #[arg(long)]
    name:    String,
    #[arg(long)]
    phone:   String,
    #[arg(long, default_value = "")]
    email:   String,
    #[arg(long, default_value = "")]
    address: String,
  },

  /// List contacts, optionally filtered by a search term.
  List {
    /// Substring to look for; lists everything when omitted.
    term: Option<String>,
    /// Fields to search: `name`, `phone` or `all`.
    #[arg(long, default_value_t = SearchMode::ByName)]
    by:   SearchMode,
  },

  /// Show every field of one contact.
  Show { id: u64 },

  /// Change fields of a contact; omitted fields keep their value.
  Edit {
    id:      u64,
    #[arg(long)]
    name:    Option<String>,
    #[arg(long)]
    phone:   Option<String>,
    #[arg(long)]
    email:   Option<String>,
    #[arg(long)]
    address: Option<String>,
  },

  /// Delete a contact.
  Delete {
    id:  u64,
    /// Do not ask for confirmation.
    #[arg(short, long)]
    yes: bool,
  },

  /// Delete every contact.
  Clear {
    /// Do not ask for confirmation.
    #[arg(short, long)]
    yes: bool,
  },

  /// Write a plain-text report of all contacts.
  Export {
    /// Destination; defaults to `contacts_export_<timestamp>.txt`.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
  },
}

/// Asks the user a yes/no question.
pub type Confirm<'a> = dyn FnMut(&str) -> std::io::Result<bool> + 'a;

/// Run `command` against `store`, writing user-facing output to `out`.
pub fn run<B: Backend>(
  store: &mut ContactStore<B>,
  command: Command,
  out: &mut dyn Write,
  confirm: &mut Confirm<'_>,
) -> Result<()> {
  match command {
    Command::Add {
      name,
      phone,
      email,
      address,
    } => {
      let input = ContactInput {
        name,
        phone,
        email,
        address,
      };
      let contact = store.create(&input).map_err(report)?;
      writeln!(out, "Contact added: {} (id {})", contact.name, contact.id)?;
    }

    Command::List { term, by } => {
      let term = term.unwrap_or_default();
      let found = store.search(&term, by);
      if found.is_empty() {
        writeln!(out, "No contacts found.")?;
      } else {
        write!(out, "{}", render::contact_table(&found))?;
      }
      writeln!(
        out,
        "{}",
        render::stats_line(found.len(), store.active_count(), !term.is_empty())
      )?;
    }

    Command::Show { id } => {
      let id = ContactId(id);
      let contact = store.get(id).ok_or(Error::NotFound(id))?;
      write!(out, "{}", render::contact_detail(contact))?;
    }

    Command::Edit {
      id,
      name,
      phone,
      email,
      address,
    } => {
      let id = ContactId(id);
      let current = store.get(id).ok_or(Error::NotFound(id))?;
      let mut input = ContactInput::from(current);
      if let Some(name) = name {
        input.name = name;
      }
      if let Some(phone) = phone {
        input.phone = phone;
      }
      if let Some(email) = email {
        input.email = email;
      }
      if let Some(address) = address {
        input.address = address;
      }

      let contact = store.update(id, &input).map_err(report)?;
      writeln!(out, "Contact updated: {}", contact.name)?;
    }

    Command::Delete { id, yes } => {
      let id = ContactId(id);
      let name = store.get(id).ok_or(Error::NotFound(id))?.name.clone();
      let question = format!(
        "Are you sure you want to delete the contact '{name}'?\nThis action cannot be undone."
      );
      if !yes && !confirm(&question)? {
        writeln!(out, "Cancelled.")?;
        return Ok(());
      }

      store.soft_delete(id).map_err(report)?;
      writeln!(out, "Contact deleted: {name}")?;
    }

    Command::Clear { yes } => {
      let active = store.active_count();
      if active == 0 {
        writeln!(out, "No contacts to clear.")?;
        return Ok(());
      }
      let question = format!(
        "Are you sure you want to delete all {active} contacts?\nThis action cannot be undone."
      );
      if !yes && !confirm(&question)? {
        writeln!(out, "Cancelled.")?;
        return Ok(());
      }

      let count = store.clear_all().map_err(report)?;
      writeln!(out, "All contacts cleared ({count} contacts deleted)")?;
    }

    Command::Export { output } => match store.export_text() {
      Ok(text) => {
        let path = output.unwrap_or_else(|| {
          PathBuf::from(render::export_file_name(Local::now().naive_local()))
        });
        fs::write(&path, text)
          .with_context(|| format!("failed to export contacts to {}", path.display()))?;
        writeln!(out, "Contacts exported to {}", path.display())?;
      }
      Err(Error::NothingToExport) => writeln!(out, "No contacts to export.")?,
      Err(e) => return Err(e.into()),
    },
  }

  Ok(())
}

/// A failed save still leaves the change applied in memory, which is lost
/// when the process exits; say so.
fn report(err: Error) -> anyhow::Error {
  match err {
    Error::Persistence(_) => {
      anyhow::Error::new(err).context("the change could not be saved")
    }
    other => other.into(),
  }
}
