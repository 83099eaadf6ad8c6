//! Layered settings: defaults, TOML file, `KITH_*` environment, then flags.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "~/.config/kith/config.toml";
pub const DEFAULT_DATA_FILE: &str = "~/.local/share/kith/contacts.json";

/// Runtime settings for the `kith` binary.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  /// The JSON file holding every contact record.
  pub data_file: PathBuf,
}

impl Settings {
  /// Resolve settings. An explicitly named config file must exist; the
  /// default one is optional. `data_file` overrides every other source.
  pub fn load(config_file: Option<&Path>, data_file: Option<&Path>) -> Result<Self> {
    let file = config_file
      .map(Path::to_path_buf)
      .unwrap_or_else(|| expand_tilde(Path::new(DEFAULT_CONFIG_FILE)));

    let settings = config::Config::builder()
      .set_default("data_file", DEFAULT_DATA_FILE)?
      .add_source(config::File::from(file).required(config_file.is_some()))
      .add_source(config::Environment::with_prefix("KITH"))
      .set_override_option(
        "data_file",
        data_file.map(|p| p.to_string_lossy().into_owned()),
      )?
      .build()
      .context("failed to read configuration")?;

    let mut settings: Settings = settings
      .try_deserialize()
      .context("failed to deserialise settings")?;
    settings.data_file = expand_tilde(&settings.data_file);
    Ok(settings)
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
