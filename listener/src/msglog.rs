//! Player-facing message log.

use listener_core::Color;

/// Kind of a log entry, mapped to display colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogStyle {
    Normal,
    /// Rejected input or a blocked step.
    Error,
    /// Ambient station sound.
    Sound,
    /// Mode changes and other system notices.
    System,
}

impl LogStyle {
    pub const fn color(self) -> Color {
        match self {
            Self::Normal => Color::White,
            Self::Error => Color::Red,
            Self::Sound => Color::Gray,
            Self::System => Color::Cyan,
        }
    }
}

/// A single log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub text: String,
    pub style: LogStyle,
    /// Consecutive repeats folded into this entry.
    pub dups: u32,
}

impl LogEntry {
    /// Entry text with a repeat count, e.g. `Blocked. (3x)`.
    pub fn display(&self) -> String {
        if self.dups > 0 {
            format!("{} ({}x)", self.text, self.dups + 1)
        } else {
            self.text.clone()
        }
    }
}

const MAX_ENTRIES: usize = 1000;
const TRIM_BY: usize = 100;

/// The session's message log.
///
/// The newest entry counts as fresh until [`mark_seen`](MessageLog::mark_seen)
/// is called; the exploration screen shows only a fresh entry.
#[derive(Debug, Default)]
pub struct MessageLog {
    entries: Vec<LogEntry>,
    fresh: bool,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, text: &str, style: LogStyle) {
        self.fresh = true;

        if let Some(last) = self.entries.last_mut() {
            if last.text == text && last.style == style {
                last.dups += 1;
                return;
            }
        }

        self.entries.push(LogEntry {
            text: text.to_string(),
            style,
            dups: 0,
        });

        if self.entries.len() > MAX_ENTRIES {
            self.entries.drain(0..TRIM_BY);
        }
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    /// The newest entry, if nothing has been seen since it was pushed.
    pub fn fresh(&self) -> Option<&LogEntry> {
        if self.fresh { self.entries.last() } else { None }
    }

    pub fn mark_seen(&mut self) {
        self.fresh = false;
    }

    /// The last `n` entries, oldest first.
    pub fn recent(&self, n: usize) -> &[LogEntry] {
        &self.entries[self.entries.len().saturating_sub(n)..]
    }
}
