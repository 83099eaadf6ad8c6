//! Filtering and ordering of contacts for list views.

use crate::contact::Contact;

/// Which fields a search term is matched against.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  strum::Display,
  strum::EnumString,
)]
pub enum SearchMode {
  /// Case-insensitive substring of the name.
  #[default]
  #[strum(serialize = "name")]
  ByName,
  /// Case-sensitive substring of the phone number as stored.
  #[strum(serialize = "phone")]
  ByPhone,
  /// Case-insensitive substring of name, phone, email or address.
  #[strum(serialize = "all")]
  AllFields,
}

/// Whether `contact` matches `term` under `mode`. An empty term matches
/// everything.
pub fn matches(contact: &Contact, term: &str, mode: SearchMode) -> bool {
  if term.is_empty() {
    return true;
  }
  match mode {
    SearchMode::ByName => contains_ci(&contact.name, &term.to_lowercase()),
    SearchMode::ByPhone => contact.phone.contains(term),
    SearchMode::AllFields => {
      let needle = term.to_lowercase();
      [
        contact.name.as_str(),
        contact.phone.as_str(),
        contact.email_str(),
        contact.address_str(),
      ]
      .into_iter()
      .any(|field| contains_ci(field, &needle))
    }
  }
}

/// Sort by name, case-insensitive. Stable: equal names keep their order.
pub fn sort_by_name(contacts: &mut [Contact]) {
  contacts.sort_by_cached_key(|c| c.name.to_lowercase());
}

/// `needle` must already be lowercase.
fn contains_ci(haystack: &str, needle: &str) -> bool {
  haystack.to_lowercase().contains(needle)
}
