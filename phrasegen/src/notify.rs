//! # Notifications
//!
//! Short, non-blocking messages for the user.  Delivery is fire and forget;
//! nothing waits for a notification to be seen.

use crossterm::style::Stylize;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
  Info,
  Destructive,
}

/// Every notification the generator can raise.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notice {
  InputRequired,
  GenerationFailed,
  Copied,
  CopyFailed,
}

impl Notice {
  pub const fn kind(self) -> NoticeKind {
    match self {
      Notice::Copied => NoticeKind::Info,
      Notice::InputRequired | Notice::GenerationFailed | Notice::CopyFailed => {
        NoticeKind::Destructive
      }
    }
  }

  pub const fn title(self) -> &'static str {
    match self {
      Notice::InputRequired => "Input required",
      Notice::GenerationFailed => "Generation failed",
      Notice::Copied => "Copied!",
      Notice::CopyFailed => "Copy failed",
    }
  }

  pub const fn message(self) -> &'static str {
    match self {
      Notice::InputRequired => "Please enter some text to generate a password.",
      Notice::GenerationFailed => {
        "Failed to generate password. Please try again."
      }
      Notice::Copied => "Password copied to clipboard.",
      Notice::CopyFailed => "Failed to copy password to clipboard.",
    }
  }
}

pub trait Notifier {
  fn notify(&mut self, kind: NoticeKind, title: &str, message: &str);

  fn post(&mut self, notice: Notice) {
    self.notify(notice.kind(), notice.title(), notice.message());
  }
}

/// Prints notifications to stderr so that they never mix with a password
/// written to stdout.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
  fn notify(&mut self, kind: NoticeKind, title: &str, message: &str) {
    debug!(?kind, title, "notice");
    match kind {
      NoticeKind::Info => eprintln!("{} {}", title.green().bold(), message),
      NoticeKind::Destructive => {
        eprintln!("{} {}", title.red().bold(), message)
      }
    }
  }
}

#[cfg(test)]
mod tests {

  use super::*;

  #[derive(Default)]
  struct Recorder(Vec<(NoticeKind, String, String)>);

  impl Notifier for Recorder {
    fn notify(&mut self, kind: NoticeKind, title: &str, message: &str) {
      self.0.push((kind, title.to_owned(), message.to_owned()));
    }
  }

  #[test]
  fn post_forwards_fixed_texts() {
    let mut recorder = Recorder::default();
    recorder.post(Notice::InputRequired);
    recorder.post(Notice::Copied);
    assert_eq!(
      recorder.0,
      vec![
        (
          NoticeKind::Destructive,
          "Input required".to_owned(),
          "Please enter some text to generate a password.".to_owned()
        ),
        (
          NoticeKind::Info,
          "Copied!".to_owned(),
          "Password copied to clipboard.".to_owned()
        ),
      ]
    );
  }

  #[test]
  fn only_copied_is_informational() {
    for notice in [
      Notice::InputRequired,
      Notice::GenerationFailed,
      Notice::CopyFailed,
    ] {
      assert_eq!(notice.kind(), NoticeKind::Destructive);
    }
    assert_eq!(Notice::Copied.kind(), NoticeKind::Info);
  }
}
