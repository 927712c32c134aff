//! The interactive REPL.
//!
//! Each round the REPL asks every living hero for a command. Commands that
//! only look at the game (`status`, `map`, `trace`, `help`) are answered on
//! the spot and the hero is asked again.

use delve_engine::{Action, ActionSource, GameState};
use delve_foundation::{Direction, EntityId, Error, Result};
use delve_storage::EquipSlot;
use thiserror::Error;

use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::session::Session;
use crate::view;

// =============================================================================
// Commands
// =============================================================================

/// One parsed line of input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Something for the hero to do.
    Act(Action),
    /// Print vitals, gear and backpack.
    Status,
    /// Print the explored map.
    Map,
    /// Print the most recent trace lines.
    Trace(usize),
    /// Print the command list.
    Help,
    /// Leave the game.
    Quit,
}

/// Why a line could not be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    /// First word is not a command.
    #[error("unknown command: {0} (try 'help')")]
    Unknown(String),
    /// A command is missing its argument.
    #[error("'{command}' needs {what}")]
    MissingArgument {
        /// The command.
        command: &'static str,
        /// What it needs.
        what: &'static str,
    },
    /// Argument is not a number.
    #[error("not a number: {0}")]
    BadNumber(String),
    /// Argument is not an equipment slot.
    #[error("unknown slot: {0}")]
    BadSlot(String),
}

fn entity_arg(command: &'static str, arg: Option<&str>) -> std::result::Result<EntityId, CommandError> {
    let text = arg.ok_or(CommandError::MissingArgument {
        command,
        what: "an item number",
    })?;
    text.parse()
        .map(EntityId::new)
        .map_err(|_| CommandError::BadNumber(text.to_string()))
}

/// Parses one line of input.
///
/// # Errors
///
/// Returns a [`CommandError`] describing what is wrong with the line.
pub fn parse_command(line: &str) -> std::result::Result<Command, CommandError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Err(CommandError::Unknown(String::new()));
    };
    let arg = words.next();
    if let Some(dir) = Direction::parse(head) {
        return Ok(Command::Act(Action::Move(dir)));
    }
    let command = match head.to_ascii_lowercase().as_str() {
        "wait" | "." | "z" => Command::Act(Action::Wait),
        "get" | "g" | "pickup" => Command::Act(Action::PickUp),
        "use" | "u" => Command::Act(Action::Use(entity_arg("use", arg)?)),
        "equip" | "wear" => Command::Act(Action::Equip(entity_arg("equip", arg)?)),
        "unequip" | "remove" => {
            let text = arg.ok_or(CommandError::MissingArgument {
                command: "unequip",
                what: "a slot",
            })?;
            let slot = EquipSlot::parse(text).ok_or_else(|| CommandError::BadSlot(text.to_string()))?;
            Command::Act(Action::Unequip(slot))
        }
        "descend" | ">" => Command::Act(Action::Descend),
        "status" | "i" => Command::Status,
        "map" | "m" => Command::Map,
        "trace" => {
            let count = match arg {
                None => 20,
                Some(t) => t.parse().map_err(|_| CommandError::BadNumber(t.to_string()))?,
            };
            Command::Trace(count)
        }
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(command)
}

const HELP: &str = "\
Commands:
  n ne e se s sw w nw   step, attack or interact in a direction
  wait                  pass the turn
  get                   pick up the item underfoot
  use <n>               use backpack item n
  equip <n>             wear backpack item n
  unequip <slot>        take off main, off, head, body or trinket
  descend               take the stairs down
  status                vitals, gear and backpack
  map                   the explored map
  trace [n]             the last n trace lines
  quit                  leave the game";

// =============================================================================
// Prompt
// =============================================================================

/// Action source that reads commands from a line editor.
struct Prompt<'a, E: LineEditor> {
    editor: &'a mut E,
    recent_trace: &'a str,
    quit: bool,
    error: Option<Error>,
}

impl<E: LineEditor> Prompt<'_, E> {
    fn answer(&self, command: Command, state: &GameState) {
        match command {
            Command::Status => {
                for line in view::status_lines(state) {
                    println!("{line}");
                }
            }
            Command::Map => println!("{}", view::render_map(state)),
            Command::Trace(count) => {
                let lines: Vec<_> = self.recent_trace.lines().collect();
                if lines.is_empty() {
                    println!("(no trace; start with --trace)");
                }
                for line in &lines[lines.len().saturating_sub(count)..] {
                    println!("{line}");
                }
            }
            Command::Help => println!("{HELP}"),
            Command::Act(_) | Command::Quit => {}
        }
    }
}

impl<E: LineEditor> ActionSource for Prompt<'_, E> {
    fn next_action(&mut self, actor: EntityId, state: &GameState) -> Option<Action> {
        if self.quit {
            return None;
        }
        let prompt = format!("{} [{}]> ", view::name_of(state, actor), actor.raw());
        loop {
            let line = match self.editor.read_line(&prompt) {
                Ok(ReadResult::Line(line)) => line,
                Ok(ReadResult::Interrupted) => continue,
                Ok(ReadResult::Eof) => {
                    self.quit = true;
                    return None;
                }
                Err(e) => {
                    self.error = Some(e);
                    self.quit = true;
                    return None;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            self.editor.add_history(&line);
            match parse_command(&line) {
                Ok(Command::Act(action)) => return Some(action),
                Ok(Command::Quit) => {
                    self.quit = true;
                    return None;
                }
                Ok(command) => self.answer(command, state),
                Err(e) => println!("{e}"),
            }
        }
    }
}

// =============================================================================
// Repl
// =============================================================================

/// The interactive REPL.
pub struct Repl<E: LineEditor = RustylineEditor> {
    editor: E,
    session: Session,
    show_banner: bool,
}

impl Repl<RustylineEditor> {
    /// Creates a new REPL over `session` with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new(session: Session) -> Result<Self> {
        Ok(Self::with_editor(RustylineEditor::new()?, session))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a new REPL with the given editor.
    pub fn with_editor(editor: E, session: Session) -> Self {
        Self {
            editor,
            session,
            show_banner: true,
        }
    }

    /// Disables the welcome banner.
    #[must_use]
    pub fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Returns a reference to the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the editor.
    #[must_use]
    pub const fn editor(&self) -> &E {
        &self.editor
    }

    /// Runs rounds until the heroes die or the player quits.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            println!("Delve. Type 'help' for commands.");
            println!("{}", view::render_map(self.session.state()));
        }

        loop {
            if self.session.state().is_over() {
                println!("All heroes have fallen on floor {}.", self.session.state().floor());
                break;
            }
            let recent = self.session.tracer().format_recent(200);
            let mut prompt = Prompt {
                editor: &mut self.editor,
                recent_trace: &recent,
                quit: false,
                error: None,
            };
            let report = self.session.play_round_with(&mut prompt);
            let (quit, error) = (prompt.quit, prompt.error.take());
            if let Some(e) = error {
                return Err(e);
            }
            if quit {
                break;
            }
            for line in view::describe_round(self.session.state(), &report) {
                println!("{line}");
            }
            if report.descended {
                println!("{}", view::render_map(self.session.state()));
            }
        }

        println!("Goodbye!");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::ScriptedEditor;
    use crate::session::SessionConfig;

    #[test]
    fn parses_directions_and_actions() {
        assert_eq!(parse_command("ne"), Ok(Command::Act(Action::Move(Direction::NorthEast))));
        assert_eq!(parse_command("  wait "), Ok(Command::Act(Action::Wait)));
        assert_eq!(
            parse_command("use 12"),
            Ok(Command::Act(Action::Use(EntityId::new(12))))
        );
        assert_eq!(
            parse_command("unequip off"),
            Ok(Command::Act(Action::Unequip(EquipSlot::OffHand)))
        );
        assert_eq!(parse_command("trace 5"), Ok(Command::Trace(5)));
        assert_eq!(parse_command("trace"), Ok(Command::Trace(20)));
    }

    #[test]
    fn reports_bad_lines() {
        assert_eq!(parse_command("dance"), Err(CommandError::Unknown("dance".into())));
        assert_eq!(
            parse_command("use"),
            Err(CommandError::MissingArgument {
                command: "use",
                what: "an item number"
            })
        );
        assert_eq!(parse_command("use x"), Err(CommandError::BadNumber("x".into())));
        assert_eq!(parse_command("unequip tail"), Err(CommandError::BadSlot("tail".into())));
    }

    fn repl(lines: &[&str]) -> Repl<ScriptedEditor> {
        let session = Session::new(SessionConfig::new().with_seed(4)).unwrap();
        Repl::with_editor(ScriptedEditor::new(lines.iter().copied()), session).without_banner()
    }

    #[test]
    fn waits_then_quits() {
        let mut repl = repl(&["status", "wait", "quit"]);
        repl.run().unwrap();
        assert_eq!(repl.session().state().round(), 2);
        assert_eq!(repl.editor().history(), ["status", "wait", "quit"]);
    }

    #[test]
    fn eof_ends_the_session() {
        let mut repl = repl(&[]);
        repl.run().unwrap();
        assert_eq!(repl.session().state().round(), 1);
    }

    #[test]
    fn bad_lines_do_not_spend_the_turn() {
        let mut repl = repl(&["dance", "use", "map", "wait"]);
        repl.run().unwrap();
        // One round for the wait, one ended by EOF.
        assert_eq!(repl.session().state().round(), 2);
    }
}
