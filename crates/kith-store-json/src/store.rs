//! [`JsonFileBackend`]: the JSON file implementation of [`Backend`].

use std::{
  fs, io,
  path::{Path, PathBuf},
};

use kith_core::{
  contact::Contact,
  store::{Backend, ReadError},
};
use tracing::{debug, warn};

use crate::{
  Error, Result,
  encode::{decode_file, encode_file},
};

/// Contents written to a freshly created data file.
const EMPTY_FILE: &str = "[]";

// ─── Backend ─────────────────────────────────────────────────────────────────

/// A contact record set stored in a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
  path: PathBuf,
}

impl JsonFileBackend {
  /// Use the file at `path` without touching the filesystem.
  pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

  /// Use the file at `path`, creating its parent directory and seeding it
  /// with an empty array when it does not exist yet.
  pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
    let backend = Self::new(path);
    if !backend.path.exists() {
      if let Some(dir) = backend.path.parent()
        && !dir.as_os_str().is_empty()
      {
        fs::create_dir_all(dir)?;
      }
      fs::write(&backend.path, EMPTY_FILE)?;
      debug!(path = %backend.path.display(), "created empty contact file");
    }
    Ok(backend)
  }

  pub fn path(&self) -> &Path { &self.path }

  /// Sibling path used for atomic replacement.
  fn temp_path(&self) -> PathBuf {
    let mut name = self.path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    self.path.with_file_name(name)
  }
}

impl Backend for JsonFileBackend {
  type Error = Error;

  fn read(&self) -> Result<Vec<Contact>, ReadError<Error>> {
    let text = match fs::read_to_string(&self.path) {
      Ok(text) => text,
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        return Err(ReadError::Missing);
      }
      // Not UTF-8: the file exists but is not something we wrote.
      Err(e) if e.kind() == io::ErrorKind::InvalidData => {
        return Err(ReadError::Malformed(e.to_string()));
      }
      Err(e) => return Err(ReadError::Io(Error::Io(e))),
    };

    decode_file(&text).map_err(|e| ReadError::Malformed(e.to_string()))
  }

  fn write(&mut self, contacts: &[Contact]) -> Result<()> {
    let text = encode_file(contacts)?;
    let tmp = self.temp_path();

    let replaced =
      fs::write(&tmp, text).and_then(|()| fs::rename(&tmp, &self.path));
    if let Err(e) = replaced {
      warn!(path = %tmp.display(), "failed to replace contact file");
      let _ = fs::remove_file(&tmp);
      return Err(e.into());
    }
    Ok(())
  }
}
