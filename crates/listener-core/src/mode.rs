//! The terminal/exploration mode machine and exploration input parsing.

use std::fmt;

use crate::tile::TileKind;

/// Which screen owns the player's input.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    #[default]
    Terminal,
    Exploration,
}

impl Mode {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Terminal => "terminal",
            Self::Exploration => "exploration",
        }
    }
}

/// Holds the current [`Mode`] and enforces its transitions.
///
/// Entering exploration is always allowed; leaving it is only allowed while
/// standing on a terminal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModeMachine {
    mode: Mode,
}

impl ModeMachine {
    pub fn new(mode: Mode) -> Self {
        Self { mode }
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch to exploration. Unconditional.
    pub fn enter_exploration(&mut self) -> Mode {
        if self.mode != Mode::Exploration {
            log::info!("mode: terminal -> exploration");
        }
        self.mode = Mode::Exploration;
        self.mode
    }

    /// Return to the terminal if the observer stands on one.
    pub fn exit_to_terminal(&mut self, here: TileKind) -> Result<Mode, ModeError> {
        if self.mode == Mode::Terminal {
            return Ok(self.mode);
        }
        if here != TileKind::Terminal {
            log::info!("mode: exit rejected on {here:?}");
            return Err(ModeError::NotAtTerminal { tile: here });
        }
        log::info!("mode: exploration -> terminal");
        self.mode = Mode::Terminal;
        Ok(self.mode)
    }
}

/// A rejected mode transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeError {
    NotAtTerminal { tile: TileKind },
}

impl fmt::Display for ModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAtTerminal { tile } => write!(
                f,
                "No terminal here ({}). Return to the TERMINAL to exit.",
                tile.label()
            ),
        }
    }
}

impl std::error::Error for ModeError {}

// ---------------------------------------------------------------------------
// ExplorationInput
// ---------------------------------------------------------------------------

/// The commands accepted while exploring.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ExplorationInput {
    Forward,
    Backward,
    TurnLeft,
    TurnRight,
    ShowMap,
    Help,
    ExitToTerminal,
}

impl ExplorationInput {
    /// Parse a typed command (case and surrounding space ignored).
    pub fn parse(input: &str) -> Result<Self, InputError> {
        let cmd = input.trim().to_ascii_lowercase();
        let parsed = match cmd.as_str() {
            "w" | "forward" => Self::Forward,
            "s" | "back" | "backward" => Self::Backward,
            "a" | "left" => Self::TurnLeft,
            "d" | "right" => Self::TurnRight,
            "m" | "map" => Self::ShowMap,
            "h" | "?" | "help" => Self::Help,
            "q" | "exit" => Self::ExitToTerminal,
            _ => return Err(InputError::Unrecognized(input.trim().to_string())),
        };
        Ok(parsed)
    }
}

/// Input that is not an exploration command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    Unrecognized(String),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unrecognized(_) => f.write_str("Invalid command. Type 'help' for controls."),
        }
    }
}

impl std::error::Error for InputError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entering_is_unconditional() {
        let mut m = ModeMachine::default();
        assert_eq!(m.mode(), Mode::Terminal);
        assert_eq!(m.enter_exploration(), Mode::Exploration);
        assert_eq!(m.enter_exploration(), Mode::Exploration);
    }

    #[test]
    fn exit_needs_terminal_tile() {
        let mut m = ModeMachine::new(Mode::Exploration);
        for t in TileKind::ALL {
            if t == TileKind::Terminal {
                continue;
            }
            assert_eq!(
                m.exit_to_terminal(t),
                Err(ModeError::NotAtTerminal { tile: t })
            );
            assert_eq!(m.mode(), Mode::Exploration);
        }
        assert_eq!(m.exit_to_terminal(TileKind::Terminal), Ok(Mode::Terminal));
        assert_eq!(m.mode(), Mode::Terminal);
    }

    #[test]
    fn parse_inputs() {
        assert_eq!(ExplorationInput::parse("W"), Ok(ExplorationInput::Forward));
        assert_eq!(ExplorationInput::parse(" s "), Ok(ExplorationInput::Backward));
        assert_eq!(ExplorationInput::parse("a"), Ok(ExplorationInput::TurnLeft));
        assert_eq!(ExplorationInput::parse("d"), Ok(ExplorationInput::TurnRight));
        assert_eq!(ExplorationInput::parse("map"), Ok(ExplorationInput::ShowMap));
        assert_eq!(ExplorationInput::parse("help"), Ok(ExplorationInput::Help));
        assert_eq!(
            ExplorationInput::parse("q"),
            Ok(ExplorationInput::ExitToTerminal)
        );
        let err = ExplorationInput::parse("jump").unwrap_err();
        assert_eq!(err, InputError::Unrecognized("jump".into()));
        assert_eq!(err.to_string(), "Invalid command. Type 'help' for controls.");
    }
}
