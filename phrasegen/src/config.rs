//! # Settings

use std::{
  fs, io,
  path::{Path, PathBuf},
  result,
  time::Duration,
};

use directories_next::ProjectDirs;
use phrasebones::Scheme;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::serde_helpers::*;

/// How long the copy button keeps showing the "copied" glyph.
pub const DEFAULT_COPIED_RESET: Duration = Duration::from_millis(2000);

const SETTINGS_FILE: &str = "config.json";

pub type Result<T> = result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
  #[error("io error")]
  Io(#[from] io::Error),
  #[error("malformed settings file {}", path.display())]
  Malformed {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },
  #[error("cannot resolve config directory")]
  NoConfigDir,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
  #[serde(serialize_with = "ser_scheme", deserialize_with = "de_scheme")]
  pub scheme: Scheme,
  #[serde(
    rename = "copied_reset_ms",
    serialize_with = "ser_millis",
    deserialize_with = "de_millis"
  )]
  pub copied_reset: Duration,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      scheme: Scheme::default(),
      copied_reset: DEFAULT_COPIED_RESET,
    }
  }
}

/// Returns the path of the settings file in the platform's config
/// directory.  The directory is not created.
pub fn default_settings_path() -> Result<PathBuf> {
  let project_dirs = ProjectDirs::from("com", "mjhanninen", "phrasegen")
    .ok_or(Error::NoConfigDir)?;
  Ok(project_dirs.config_dir().join(SETTINGS_FILE))
}

impl Settings {
  /// Loads the settings from an explicitly given file, or from the default
  /// location when `path` is `None`.  Only the default file is allowed to be
  /// missing.
  pub fn load(path: Option<&Path>) -> Result<Self> {
    match path {
      Some(path) => Self::read(path),
      None => match default_settings_path() {
        Ok(path) if path.is_file() => Self::read(&path),
        Ok(path) => {
          debug!(path = %path.display(), "no settings file, using defaults");
          Ok(Self::default())
        }
        Err(Error::NoConfigDir) => {
          warn!("cannot resolve config directory, using default settings");
          Ok(Self::default())
        }
        Err(err) => Err(err),
      },
    }
  }

  fn read(path: &Path) -> Result<Self> {
    let bytes = fs::read(path)?;
    let settings = serde_json::from_slice(&bytes).map_err(|source| {
      Error::Malformed {
        path: path.to_owned(),
        source,
      }
    })?;
    debug!(path = %path.display(), ?settings, "loaded settings");
    Ok(settings)
  }
}

#[cfg(test)]
mod tests {

  use std::io::Write;

  use super::*;

  fn settings_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
  }

  #[test]
  fn defaults() {
    let settings = Settings::default();
    assert_eq!(settings.scheme, Scheme::Scattered);
    assert_eq!(settings.copied_reset, Duration::from_millis(2000));
  }

  #[test]
  fn reads_full_file() {
    let file =
      settings_file(r#"{ "scheme": "deterministic", "copied_reset_ms": 500 }"#);
    let settings = Settings::load(Some(file.path())).unwrap();
    assert_eq!(
      settings,
      Settings {
        scheme: Scheme::Deterministic,
        copied_reset: Duration::from_millis(500),
      }
    );
  }

  #[test]
  fn missing_fields_fall_back_to_defaults() {
    let file = settings_file(r#"{ "copied_reset_ms": 750 }"#);
    let settings = Settings::load(Some(file.path())).unwrap();
    assert_eq!(settings.scheme, Scheme::Scattered);
    assert_eq!(settings.copied_reset, Duration::from_millis(750));
  }

  #[test]
  fn unknown_scheme_is_malformed() {
    let file = settings_file(r#"{ "scheme": "random" }"#);
    assert!(matches!(
      Settings::load(Some(file.path())),
      Err(Error::Malformed { .. })
    ));
  }

  #[test]
  fn unknown_field_is_malformed() {
    let file = settings_file(r#"{ "length": 20 }"#);
    assert!(matches!(
      Settings::load(Some(file.path())),
      Err(Error::Malformed { .. })
    ));
  }

  #[test]
  fn explicit_path_must_exist() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.json");
    assert!(matches!(
      Settings::load(Some(path.as_path())),
      Err(Error::Io(_))
    ));
  }

  #[test]
  fn written_settings_read_back() {
    let settings = Settings {
      scheme: Scheme::Deterministic,
      copied_reset: Duration::from_millis(1500),
    };
    let json = serde_json::to_string(&settings).unwrap();
    assert_eq!(json, r#"{"scheme":"deterministic","copied_reset_ms":1500}"#);
    let file = settings_file(&json);
    assert_eq!(Settings::load(Some(file.path())).unwrap(), settings);
  }
}
