//! # System clipboard

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("clipboard unavailable: {0}")]
  Unavailable(String),
  #[error("clipboard write failed: {0}")]
  WriteFailed(String),
}

pub trait Clipboard {
  fn write_text(&mut self, text: &str) -> Result<(), Error>;
}

/// The clipboard of the desktop session the process runs in.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
  fn write_text(&mut self, text: &str) -> Result<(), Error> {
    inner::copy(text)
  }
}

#[cfg(target_os = "linux")]
mod inner {
  use wl_clipboard_rs::copy::{MimeType, Options, Source};

  use super::Error;

  // Not in the foreground: the copy is served by a forked child so that the
  // caller can carry on.
  pub fn copy(text: &str) -> Result<(), Error> {
    if std::env::var_os("WAYLAND_DISPLAY").is_none() {
      return Err(Error::Unavailable("no Wayland display".to_owned()));
    }
    let mut options = Options::new();
    options.foreground(false).trim_newline(true);
    options
      .copy(Source::Bytes(text.as_bytes().into()), MimeType::Text)
      .map_err(|err| Error::WriteFailed(err.to_string()))
  }
}

#[cfg(not(target_os = "linux"))]
mod inner {
  use super::Error;

  pub fn copy(text: &str) -> Result<(), Error> {
    let mut clipboard = arboard::Clipboard::new()
      .map_err(|err| Error::Unavailable(err.to_string()))?;
    clipboard
      .set_text(text)
      .map_err(|err| Error::WriteFailed(err.to_string()))
  }
}
