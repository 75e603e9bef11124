//! Input events: [`Msg`] and [`Key`].

use std::time::Instant;

/// A keyboard key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Escape,
    Enter,
    Tab,
    Backspace,
    /// A printable character.
    Char(char),
}

/// An input message delivered to the application.
#[derive(Clone, Debug)]
pub enum Msg {
    /// A key was pressed.
    KeyDown { key: Key, time: Instant },
    /// The terminal was resized.
    Screen { cols: usize, rows: usize },
    /// No input arrived for one tick interval.
    Tick,
    /// Sent once when the application starts.
    Init,
    /// Request to quit (e.g. Ctrl+C).
    Quit,
}

impl Msg {
    /// Convenience: a `KeyDown` stamped now.
    pub fn key(key: Key) -> Self {
        Self::KeyDown {
            key,
            time: Instant::now(),
        }
    }
}
