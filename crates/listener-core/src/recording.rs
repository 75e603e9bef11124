//! Frame transcripts.
//!
//! [`FrameRecorder`] appends every frame it is given to a writer as plain
//! text, so a session can be replayed or diffed offline.
//!
//! ## Format
//!
//! ```text
//! --- frame <n> (<width>x<height>) ---
//! <row 0>
//! ...
//! <row height-1>
//! ```
//!
//! Rows keep their combining marks; trailing blanks are trimmed.

use std::io::{self, Write};

use crate::frame::Frame;

/// Writes frames as a text transcript.
pub struct FrameRecorder<W: Write> {
    writer: W,
    count: u64,
}

impl<W: Write> FrameRecorder<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, count: 0 }
    }

    /// Number of frames written so far.
    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Append one frame.
    pub fn record(&mut self, frame: &Frame) -> io::Result<()> {
        writeln!(
            self.writer,
            "--- frame {} ({}x{}) ---",
            self.count,
            frame.width(),
            frame.height()
        )?;
        for line in frame.lines() {
            writeln!(self.writer, "{}", line.trim_end())?;
        }
        self.count += 1;
        self.writer.flush()
    }

    /// Consume the recorder, returning the inner writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Style;

    #[test]
    fn writes_headers_and_rows() {
        let mut f = Frame::new(6);
        f.push_text("ab", Style::default());
        f.push_text("cdefgh", Style::default());

        let mut rec = FrameRecorder::new(Vec::new());
        rec.record(&f).unwrap();
        rec.record(&f).unwrap();
        assert_eq!(rec.count(), 2);

        let text = String::from_utf8(rec.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "--- frame 0 (6x2) ---");
        assert_eq!(lines[1], "ab");
        assert_eq!(lines[2], "cdefgh");
        assert_eq!(lines[3], "--- frame 1 (6x2) ---");
        assert_eq!(lines.len(), 6);
    }
}
