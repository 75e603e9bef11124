//! Fixed-width text buffers: [`Row`] and [`Frame`].
//!
//! A `Row` is allocated at its final width up front and never grows: writes
//! past the right edge are dropped, so every row of a [`Frame`] has exactly
//! the frame's width no matter which band produced it.

use std::ops::Range;

use crate::glyph::Glyph;
use crate::style::Style;

// ---------------------------------------------------------------------------
// Row
// ---------------------------------------------------------------------------

/// One line of glyphs with a fixed column count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    cells: Vec<Glyph>,
}

impl Row {
    /// A blank row `width` columns wide.
    pub fn new(width: usize) -> Self {
        Self {
            cells: vec![Glyph::BLANK; width],
        }
    }

    /// A row holding `text` in `style`, truncated or blank-padded to `width`.
    pub fn text(width: usize, text: &str, style: Style) -> Self {
        let mut row = Self::new(width);
        row.put_str(0, text, style);
        row
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.cells.len()
    }

    /// The glyph at column `x`, if inside the row.
    #[inline]
    pub fn get(&self, x: usize) -> Option<&Glyph> {
        self.cells.get(x)
    }

    /// Set column `x`. No-op past the right edge.
    #[inline]
    pub fn set(&mut self, x: usize, glyph: Glyph) {
        if let Some(c) = self.cells.get_mut(x) {
            *c = glyph;
        }
    }

    /// Fill `span` (clipped to the row) with copies of `glyph`.
    pub fn fill(&mut self, span: Range<usize>, glyph: Glyph) {
        let span = self.clip(span);
        for c in &mut self.cells[span] {
            *c = glyph;
        }
    }

    /// Write a run of glyphs starting at `x`, dropping whatever overflows.
    pub fn put_run(&mut self, x: usize, run: &[Glyph]) {
        for (i, g) in run.iter().enumerate() {
            self.set(x + i, *g);
        }
    }

    /// Write `text` starting at column `x`, one column per `char`.
    pub fn put_str(&mut self, x: usize, text: &str, style: Style) {
        for (i, ch) in text.chars().enumerate() {
            if x + i >= self.cells.len() {
                break;
            }
            self.cells[x + i] = Glyph::new(ch).with_style(style);
        }
    }

    /// The glyphs of this row.
    #[inline]
    pub fn glyphs(&self) -> &[Glyph] {
        &self.cells
    }

    /// Mutable access to the first and last glyph.
    pub fn edges_mut(&mut self) -> Option<(&mut Glyph, &mut Glyph)> {
        match self.cells.as_mut_slice() {
            [] | [_] => None,
            [first, .., last] => Some((first, last)),
        }
    }

    /// Render the row as a string (marks included).
    pub fn to_text(&self) -> String {
        let mut s = String::with_capacity(self.cells.len());
        for g in &self.cells {
            g.push_to(&mut s);
        }
        s
    }

    fn clip(&self, span: Range<usize>) -> Range<usize> {
        let end = span.end.min(self.cells.len());
        span.start.min(end)..end
    }
}

// ---------------------------------------------------------------------------
// Frame
// ---------------------------------------------------------------------------

/// An ordered sequence of rows produced by one render call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    rows: Vec<Row>,
    width: usize,
}

impl Frame {
    /// An empty frame whose rows will be `width` columns wide.
    pub fn new(width: usize) -> Self {
        Self {
            rows: Vec::new(),
            width,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Append a row, truncating or padding it to the frame width.
    pub fn push(&mut self, row: Row) {
        if row.width() == self.width {
            self.rows.push(row);
        } else {
            let mut fitted = Row::new(self.width);
            fitted.put_run(0, row.glyphs());
            self.rows.push(fitted);
        }
    }

    /// Append a blank row.
    pub fn push_blank(&mut self) {
        self.rows.push(Row::new(self.width));
    }

    /// Append a text row.
    pub fn push_text(&mut self, text: &str, style: Style) {
        self.rows.push(Row::text(self.width, text, style));
    }

    #[inline]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// The frame as plain text lines.
    pub fn lines(&self) -> Vec<String> {
        self.rows.iter().map(Row::to_text).collect()
    }

    /// Iterate every glyph in row-major order.
    pub fn glyphs(&self) -> impl Iterator<Item = &Glyph> {
        self.rows.iter().flat_map(|r| r.glyphs().iter())
    }
}
