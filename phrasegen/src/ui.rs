//! # Terminal front end

use std::process::ExitCode;

use crossterm::style::Stylize;
use phrasebones::Sha256;
use rand::rngs::OsRng;
use requestty::{ErrorKind, Question};
use tracing::info;

use crate::{
  clipboard::SystemClipboard,
  generator::{Generator, SystemClock, View},
  notify::TerminalNotifier,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
  Generate,
  Copy,
  Edit,
  Quit,
}

impl Action {
  const fn label(self) -> &'static str {
    match self {
      Action::Generate => "Generate password",
      Action::Copy => "Copy to clipboard",
      Action::Edit => "Edit text",
      Action::Quit => "Quit",
    }
  }
}

/// Actions offered for the given view, in menu order.  Copying is only
/// offered once there is something to copy.
fn actions(view: &View) -> Vec<Action> {
  let mut actions = Vec::with_capacity(4);
  if view.generate_enabled {
    actions.push(Action::Generate);
  }
  if view.password.is_some() {
    actions.push(Action::Copy);
  }
  actions.push(Action::Edit);
  actions.push(Action::Quit);
  actions
}

fn show_notice() {
  println!(
    "{}, version {}",
    "Password Generator".bold(),
    env!("CARGO_PKG_VERSION")
  );
  println!("Enter any text to create a secure password");
}

fn render(view: &View) {
  if let Some(password) = view.password {
    println!();
    println!("{}", "Generated Password".bold());
    println!("  {}  {}", password.bold(), view.copy_glyph.symbol());
    println!();
  }
}

/// `None` when the user cancels the prompt.
fn ask_text(current: &str) -> anyhow::Result<Option<String>> {
  let question = Question::input("text")
    .message("Your Text")
    .default(current)
    .build();
  match requestty::prompt_one(question) {
    Ok(answer) => Ok(answer.as_string().map(str::to_owned)),
    Err(ErrorKind::Aborted | ErrorKind::Interrupted) => Ok(None),
    Err(err) => Err(err.into()),
  }
}

fn ask_action(view: &View) -> anyhow::Result<Action> {
  let offered = actions(view);
  let mut builder = Question::select("action").message("What next?");
  if !view.generate_enabled {
    builder = builder.separator(format!(
      "{} (enter some text first)",
      Action::Generate.label()
    ));
  }
  for action in &offered {
    builder = builder.choice(action.label());
  }
  let answer = match requestty::prompt_one(builder.build()) {
    Ok(answer) => answer,
    Err(ErrorKind::Aborted | ErrorKind::Interrupted) => return Ok(Action::Quit),
    Err(err) => return Err(err.into()),
  };
  let chosen = answer
    .as_list_item()
    .and_then(|item| offered.iter().find(|a| a.label() == item.text))
    .copied()
    .unwrap_or(Action::Quit);
  Ok(chosen)
}

/// Runs the form until the user quits.
pub fn run_interactive(generator: &mut Generator) -> anyhow::Result<()> {
  let digester = Sha256;
  let mut rng = OsRng;
  let mut clipboard = SystemClipboard;
  let clock = SystemClock;
  let mut notifier = TerminalNotifier;

  show_notice();
  info!(scheme = %generator.scheme(), "interactive session started");
  match ask_text(generator.input())? {
    Some(text) => generator.set_input(text),
    None => return Ok(()),
  }
  loop {
    let view = generator.view(&clock);
    render(&view);
    match ask_action(&view)? {
      Action::Generate => {
        generator.generate(&digester, &mut rng, &mut notifier);
      }
      Action::Copy => {
        generator.copy(&mut clipboard, &clock, &mut notifier);
      }
      Action::Edit => match ask_text(generator.input())? {
        Some(text) => generator.set_input(text),
        None => break,
      },
      Action::Quit => break,
    }
  }
  Ok(())
}

/// Derives a single password from `text`, prints it and optionally copies
/// it.
pub fn run_once(generator: &mut Generator, text: String, copy: bool) -> ExitCode {
  let clock = SystemClock;
  let mut notifier = TerminalNotifier;

  generator.set_input(text);
  if generator
    .generate(&Sha256, &mut OsRng, &mut notifier)
    .is_none()
  {
    return ExitCode::FAILURE;
  }
  if let Some(password) = generator.password() {
    println!("{}", password);
  }
  if copy && !generator.copy(&mut SystemClipboard, &clock, &mut notifier) {
    return ExitCode::FAILURE;
  }
  ExitCode::SUCCESS
}
