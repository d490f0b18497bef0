//! # Password generator
//!
//! The state behind the form: the text being typed, the last derived
//! password and whether that password was just copied.  Digest, randomness,
//! clipboard, clock and notifications are passed in by the caller.

use std::time::{Duration, Instant};

use phrasebones::{Digester, Password, Scheme};
use rand::Rng;
use tracing::{debug, warn};

use crate::{
  clipboard::Clipboard,
  config::Settings,
  notify::{Notice, Notifier},
};

pub trait Clock {
  fn now(&self) -> Instant;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> Instant {
    Instant::now()
  }
}

/// Icon of the copy button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Glyph {
  Copy,
  Copied,
}

impl Glyph {
  pub const fn symbol(self) -> &'static str {
    match self {
      Glyph::Copy => "⧉",
      Glyph::Copied => "✓",
    }
  }
}

/// What the front end should show right now.
#[derive(Debug, PartialEq, Eq)]
pub struct View<'a> {
  pub generate_enabled: bool,
  pub password: Option<&'a str>,
  pub copy_glyph: Glyph,
}

pub struct Generator {
  input: String,
  password: Option<Password>,
  // A later copy replaces the deadline, so there is never more than one
  // pending reset.
  copied_until: Option<Instant>,
  scheme: Scheme,
  copied_reset: Duration,
}

impl Generator {
  pub fn new(settings: &Settings) -> Self {
    Self {
      input: String::new(),
      password: None,
      copied_until: None,
      scheme: settings.scheme,
      copied_reset: settings.copied_reset,
    }
  }

  pub fn scheme(&self) -> Scheme {
    self.scheme
  }

  pub fn set_input(&mut self, text: impl Into<String>) {
    self.input = text.into();
  }

  pub fn input(&self) -> &str {
    &self.input
  }

  /// Whether the generate trigger is enabled.
  pub fn can_generate(&self) -> bool {
    !phrasebones::is_blank(&self.input)
  }

  pub fn password(&self) -> Option<&Password> {
    self.password.as_ref()
  }

  /// Derives a new password from the current input.  Returns the new
  /// password, or `None` when the input is blank or derivation failed; in
  /// both cases the previous password is kept and the user is notified.
  pub fn generate<D, R, N>(
    &mut self,
    digester: &D,
    rng: &mut R,
    notifier: &mut N,
  ) -> Option<&Password>
  where
    D: Digester + ?Sized,
    R: Rng + ?Sized,
    N: Notifier + ?Sized,
  {
    if !self.can_generate() {
      notifier.post(Notice::InputRequired);
      return None;
    }
    match phrasebones::derive_with(self.scheme, &self.input, digester, rng) {
      Ok(password) => {
        debug!(scheme = %self.scheme, "derived password");
        self.password = Some(password);
        self.password.as_ref()
      }
      Err(err) => {
        warn!(error = %err, "password generation failed");
        notifier.post(Notice::GenerationFailed);
        None
      }
    }
  }

  /// Copies the current password to the clipboard.  Does nothing when no
  /// password has been generated yet.  Returns whether the clipboard was
  /// written.
  pub fn copy<C, K, N>(
    &mut self,
    clipboard: &mut C,
    clock: &K,
    notifier: &mut N,
  ) -> bool
  where
    C: Clipboard + ?Sized,
    K: Clock + ?Sized,
    N: Notifier + ?Sized,
  {
    let Some(password) = &self.password else {
      return false;
    };
    match clipboard.write_text(password.as_str()) {
      Ok(()) => {
        self.copied_until = Some(clock.now() + self.copied_reset);
        debug!("password copied to clipboard");
        notifier.post(Notice::Copied);
        true
      }
      Err(err) => {
        warn!(error = %err, "copying to clipboard failed");
        notifier.post(Notice::CopyFailed);
        false
      }
    }
  }

  pub fn is_copied<K>(&self, clock: &K) -> bool
  where
    K: Clock + ?Sized,
  {
    matches!(self.copied_until, Some(deadline) if clock.now() < deadline)
  }

  pub fn view<K>(&self, clock: &K) -> View<'_>
  where
    K: Clock + ?Sized,
  {
    View {
      generate_enabled: self.can_generate(),
      password: self.password.as_ref().map(Password::as_str),
      copy_glyph: if self.is_copied(clock) {
        Glyph::Copied
      } else {
        Glyph::Copy
      },
    }
  }
}
