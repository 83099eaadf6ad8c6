//! [`ContactStore`] and the [`Backend`] persistence seam.
//!
//! The store holds the whole record set in memory and rewrites it through its
//! backend after every mutation. Backends (e.g. `kith-store-json`) only know
//! how to read and write a complete record set; every rule about validation,
//! uniqueness and soft deletion lives here.

use chrono::Local;
use tracing::{debug, info, warn};

use crate::{
  Error, Result,
  contact::{Contact, ContactId, ContactInput, ContactStatus, now},
  error::ValidationError,
  export,
  search::{self, SearchMode},
  validate::validate,
};

// ─── Backend ─────────────────────────────────────────────────────────────────

/// Why a backend could not produce a record set.
#[derive(Debug)]
pub enum ReadError<E> {
  /// Nothing has been stored yet.
  Missing,
  /// Stored data exists but cannot be decoded.
  Malformed(String),
  /// Any other I/O failure (permissions, device errors, ...).
  Io(E),
}

/// Whole-set persistence for a [`ContactStore`].
///
/// `write` always receives every record, deleted ones included, in insertion
/// order, and must replace whatever was stored before.
pub trait Backend {
  type Error: std::error::Error + Send + Sync + 'static;

  fn read(&self) -> Result<Vec<Contact>, ReadError<Self::Error>>;

  fn write(&mut self, contacts: &[Contact]) -> Result<(), Self::Error>;
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// The result of [`ContactStore::load`]: always a usable store, plus an
/// optional warning the caller may show to the user.
pub struct Loaded<B: Backend> {
  pub store:   ContactStore<B>,
  pub warning: Option<Error>,
}

/// In-memory contact book backed by a [`Backend`].
///
/// Mutations that fail to persist are not rolled back: the store keeps the
/// change, reports [`Error::Persistence`] and marks itself dirty until a later
/// [`ContactStore::save`] succeeds.
pub struct ContactStore<B: Backend> {
  backend:  B,
  contacts: Vec<Contact>,
  dirty:    bool,
}

impl<B: Backend> ContactStore<B> {
  /// Read every record from `backend`.
  ///
  /// Missing or undecodable data yields an empty store. Other read failures
  /// also yield an empty store, with the failure returned as a warning.
  pub fn load(backend: B) -> Loaded<B> {
    let (contacts, warning) = match backend.read() {
      Ok(contacts) => {
        debug!(count = contacts.len(), "loaded contacts");
        (contacts, None)
      }
      Err(ReadError::Missing) => {
        debug!("no stored contacts; starting empty");
        (Vec::new(), None)
      }
      Err(ReadError::Malformed(reason)) => {
        warn!(%reason, "stored contacts are malformed; starting empty");
        (Vec::new(), None)
      }
      Err(ReadError::Io(e)) => {
        warn!(error = %e, "failed to read stored contacts; starting empty");
        (Vec::new(), Some(Error::persistence(e)))
      }
    };

    Loaded {
      store: Self {
        backend,
        contacts,
        dirty: false,
      },
      warning,
    }
  }

  // ── Commands ──────────────────────────────────────────────────────────────

  /// Validate `input` and append a new active contact.
  pub fn create(&mut self, input: &ContactInput) -> Result<Contact> {
    let valid = validate(input)?;
    self.ensure_phone_free(&valid.phone, None)?;
    let id = self.next_id()?;

    let at = now();
    let contact = Contact {
      id,
      name:        valid.name,
      phone:       valid.phone,
      email:       valid.email,
      address:     valid.address,
      created_at:  at,
      modified_at: at,
      status:      ContactStatus::Active,
    };

    self.contacts.push(contact.clone());
    info!(id = %contact.id, "created contact");

    self.save()?;
    Ok(contact)
  }

  /// Replace the fields of the active contact `id`, re-validating exactly as
  /// [`ContactStore::create`] does. The contact's own phone number does not
  /// count as a duplicate.
  pub fn update(&mut self, id: ContactId, input: &ContactInput) -> Result<Contact> {
    let idx = self.position_active(id).ok_or(Error::NotFound(id))?;
    let valid = validate(input)?;
    self.ensure_phone_free(&valid.phone, Some(id))?;

    let contact = &mut self.contacts[idx];
    contact.name = valid.name;
    contact.phone = valid.phone;
    contact.email = valid.email;
    contact.address = valid.address;
    contact.modified_at = now().max(contact.created_at);
    let updated = contact.clone();
    info!(%id, "updated contact");

    self.save()?;
    Ok(updated)
  }

  /// Mark the active contact `id` as deleted.
  ///
  /// Deleting an already-deleted contact reports [`Error::NotFound`].
  pub fn soft_delete(&mut self, id: ContactId) -> Result<()> {
    let idx = self.position_active(id).ok_or(Error::NotFound(id))?;
    self.contacts[idx].status = ContactStatus::Deleted;
    info!(%id, "deleted contact");
    self.save()
  }

  /// Mark every active contact as deleted and return how many were affected.
  /// Nothing is written when there were none.
  pub fn clear_all(&mut self) -> Result<usize> {
    let mut count = 0;
    for contact in self.contacts.iter_mut().filter(|c| c.is_active()) {
      contact.status = ContactStatus::Deleted;
      count += 1;
    }
    if count == 0 {
      return Ok(0);
    }
    info!(count, "cleared all contacts");

    self.save()?;
    Ok(count)
  }

  /// Write the full record set to the backend.
  ///
  /// Called by every command; callers use it directly to retry after an
  /// [`Error::Persistence`].
  pub fn save(&mut self) -> Result<()> {
    match self.backend.write(&self.contacts) {
      Ok(()) => {
        self.dirty = false;
        debug!(count = self.contacts.len(), "saved contacts");
        Ok(())
      }
      Err(e) => {
        self.dirty = true;
        warn!(error = %e, "failed to save contacts; memory is ahead of disk");
        Err(Error::persistence(e))
      }
    }
  }

  // ── Queries ───────────────────────────────────────────────────────────────

  /// Active contacts matching `term` under `mode`, sorted by name
  /// (case-insensitive, stable).
  pub fn search(&self, term: &str, mode: SearchMode) -> Vec<Contact> {
    let mut found: Vec<Contact> = self
      .active()
      .filter(|c| search::matches(c, term, mode))
      .cloned()
      .collect();
    search::sort_by_name(&mut found);
    found
  }

  /// The active contact with `id`.
  pub fn get(&self, id: ContactId) -> Option<&Contact> {
    self.active().find(|c| c.id == id)
  }

  pub fn active_count(&self) -> usize { self.active().count() }

  /// Every record, deleted ones included, in insertion order.
  pub fn contacts(&self) -> &[Contact] { &self.contacts }

  /// Whether the last write failed and memory holds unsaved changes.
  pub fn is_dirty(&self) -> bool { self.dirty }

  pub fn backend(&self) -> &B { &self.backend }

  /// Plain-text report of all active contacts, in name order.
  pub fn export_text(&self) -> Result<String> {
    let contacts = self.search("", SearchMode::ByName);
    if contacts.is_empty() {
      return Err(Error::NothingToExport);
    }
    Ok(export::render(&contacts, Local::now().naive_local()))
  }

  // ── Helpers ───────────────────────────────────────────────────────────────

  fn active(&self) -> impl Iterator<Item = &Contact> {
    self.contacts.iter().filter(|c| c.is_active())
  }

  fn position_active(&self, id: ContactId) -> Option<usize> {
    self.contacts.iter().position(|c| c.id == id && c.is_active())
  }

  /// Ids are never reused, so deleted records count too.
  fn next_id(&self) -> Result<ContactId> {
    let last = self
      .contacts
      .iter()
      .map(|c| c.id)
      .max()
      .unwrap_or(ContactId(0));
    last.next().ok_or(Error::IdSpaceExhausted(last))
  }

  fn ensure_phone_free(
    &self,
    phone: &str,
    except: Option<ContactId>,
  ) -> Result<(), ValidationError> {
    match self
      .active()
      .find(|c| c.phone == phone && Some(c.id) != except)
    {
      Some(existing) => Err(ValidationError::DuplicatePhone {
        phone:    phone.to_owned(),
        existing: existing.id,
      }),
      None => Ok(()),
    }
  }
}
