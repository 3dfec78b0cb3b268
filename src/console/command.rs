use std::path::PathBuf;

use anyhow::{Result, bail};

pub const HELP: &str = "\
Commands:
  <enter>, draw    draw the next ball
  undo             take back the last ball
  reset            start a new game (asks for confirmation)
  theme            switch between default and christmas
  phrases          toggle phrase display
  sound            toggle sound effects
  voice            toggle spoken calls
  board            show every drawn ball
  cards [path]     write a sheet of printable cards
  help             this list
  quit             save and exit";

/// A line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Draw,
    Undo,
    Reset,
    Theme,
    Phrases,
    Sound,
    Voice,
    Board,
    Cards(Option<PathBuf>),
    Help,
    Quit,
}

impl Command {
    /// An empty line draws, so calling a game is mostly pressing enter.
    pub fn parse(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(Self::Draw);
        };
        let command = match head.to_ascii_lowercase().as_str() {
            "draw" | "d" => Self::Draw,
            "undo" | "u" => Self::Undo,
            "reset" | "new" => Self::Reset,
            "theme" | "t" => Self::Theme,
            "phrases" => Self::Phrases,
            "sound" => Self::Sound,
            "voice" => Self::Voice,
            "board" | "b" => Self::Board,
            "cards" => Self::Cards(words.next().map(PathBuf::from)),
            "help" | "h" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            other => bail!("Unknown command: {other} (type 'help')"),
        };
        Ok(command)
    }
}

/// Answer to the reset confirmation prompt.
pub fn is_confirmation(line: &str) -> bool {
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes" | "j" | "ja")
}
