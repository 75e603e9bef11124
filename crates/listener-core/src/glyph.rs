//! The [`Glyph`] type: one terminal column of a rendered frame.

use crate::style::{Color, Style};

/// A styled character occupying exactly one terminal column.
///
/// `mark` is an optional combining character drawn on top of `ch`; it never
/// takes a column of its own.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Glyph {
    pub ch: char,
    pub mark: Option<char>,
    pub style: Style,
}

impl Glyph {
    /// A blank column.
    pub const BLANK: Self = Self {
        ch: ' ',
        mark: None,
        style: Style::fg(Color::Default),
    };

    /// An unstyled glyph.
    #[inline]
    pub const fn new(ch: char) -> Self {
        Self {
            ch,
            mark: None,
            style: Style::fg(Color::Default),
        }
    }

    /// A glyph drawn in `fg`.
    #[inline]
    pub const fn colored(ch: char, fg: Color) -> Self {
        Self {
            ch,
            mark: None,
            style: Style::fg(fg),
        }
    }

    /// Set the character (builder).
    #[inline]
    pub const fn with_char(mut self, ch: char) -> Self {
        self.ch = ch;
        self
    }

    /// Set the combining mark (builder).
    #[inline]
    pub const fn with_mark(mut self, mark: char) -> Self {
        self.mark = Some(mark);
        self
    }

    /// Set the style (builder).
    #[inline]
    pub const fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Whether this glyph renders as empty space.
    #[inline]
    pub fn is_blank(&self) -> bool {
        self.ch == ' ' && self.mark.is_none()
    }

    /// Append the glyph's text (character plus mark) to `out`.
    #[inline]
    pub fn push_to(&self, out: &mut String) {
        out.push(self.ch);
        if let Some(m) = self.mark {
            out.push(m);
        }
    }
}

impl Default for Glyph {
    #[inline]
    fn default() -> Self {
        Self::BLANK
    }
}
