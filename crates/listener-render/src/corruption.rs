//! Sanity-driven per-glyph corruption.
//!
//! Every frame builds a fresh [`CorruptionOverlay`]. Nothing here remembers
//! which cells were corrupted before; the pattern depends only on the
//! random source.

use rand::{Rng, RngExt};

use listener_core::{AttrMask, Color, Glyph, Row, Sanity, Style};

use crate::config::RenderConfig;

/// Replacement glyphs. Disjoint from every glyph the projector draws on
/// its own, so a corrupted cell can always be recognized.
pub const CORRUPTION_GLYPHS: [char; 17] = [
    '■', '□', '▪', '▫', '§', '¶', '†', '‡', '∴', '∵', '◊', '○', '●', '◘', '◙', '▄', '▀',
];

/// Combining overlays added to corrupted glyphs at very low sanity.
pub const SEVERITY_MARKS: [char; 5] = ['\u{0334}', '\u{0335}', '\u{0336}', '\u{0337}', '\u{0338}'];

pub const GLITCH_COLORS: [Color; 3] = [Color::Red, Color::Magenta, Color::Cyan];

/// `(100 - sanity) / denominator`.
#[inline]
pub fn corruption_chance(sanity: Sanity, denominator: f64) -> f64 {
    f64::from(100 - sanity.value()) / denominator
}

#[inline]
pub fn is_corruption_glyph(ch: char) -> bool {
    CORRUPTION_GLYPHS.contains(&ch)
}

/// Random glitch colour.
pub fn glitch_color(rng: &mut impl Rng) -> Color {
    GLITCH_COLORS[rng.random_range(0..GLITCH_COLORS.len())]
}

/// Counters for one frame's worth of corruption.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CorruptionStats {
    /// Glyphs offered to [`CorruptionOverlay::apply`].
    pub candidates: usize,
    /// Of those, how many were replaced.
    pub corrupted: usize,
    /// Severity marks added, on any path.
    pub marks: usize,
    /// Row edges replaced by [`CorruptionOverlay::corrupt_edges`].
    pub edge_hits: usize,
}

impl CorruptionStats {
    /// Observed per-glyph rate, `corrupted / candidates`.
    pub fn rate(&self) -> f64 {
        if self.candidates == 0 {
            0.0
        } else {
            self.corrupted as f64 / self.candidates as f64
        }
    }

    pub fn merge(&mut self, other: CorruptionStats) {
        self.candidates += other.candidates;
        self.corrupted += other.corrupted;
        self.marks += other.marks;
        self.edge_hits += other.edge_hits;
    }
}

/// Per-frame glyph substitution.
#[derive(Clone, Debug)]
pub struct CorruptionOverlay {
    chance: f64,
    severe_marks: bool,
    mark_chance: f64,
    edges: bool,
    edge_chance: f64,
    stats: CorruptionStats,
}

impl CorruptionOverlay {
    pub fn new(config: &RenderConfig, sanity: Sanity) -> Self {
        Self {
            chance: corruption_chance(sanity, config.corruption_denominator),
            severe_marks: sanity.value() < config.severity_sanity,
            mark_chance: config.severity_mark_chance,
            edges: sanity.value() < config.edge_corruption_sanity,
            edge_chance: config.edge_corruption_chance,
            stats: CorruptionStats::default(),
        }
    }

    #[inline]
    pub fn chance(&self) -> f64 {
        self.chance
    }

    #[inline]
    pub fn stats(&self) -> CorruptionStats {
        self.stats
    }

    /// Whether row edges may be corrupted at this sanity.
    #[inline]
    pub fn corrupts_edges(&self) -> bool {
        self.edges
    }

    /// Offer one glyph. One uniform draw decides replacement.
    pub fn apply(&mut self, glyph: Glyph, rng: &mut impl Rng) -> Glyph {
        self.stats.candidates += 1;
        if rng.random::<f64>() < self.chance {
            self.stats.corrupted += 1;
            self.severe(rng)
        } else {
            glyph
        }
    }

    /// Pass a run of glyphs through [`apply`](CorruptionOverlay::apply).
    /// Blank cells are left alone and not counted.
    pub fn apply_run(&mut self, run: &mut [Glyph], rng: &mut impl Rng) {
        for g in run.iter_mut().filter(|g| !g.is_blank()) {
            *g = self.apply(*g, rng);
        }
    }

    /// A corruption glyph in a glitch colour, possibly with a severity mark.
    pub fn severe(&mut self, rng: &mut impl Rng) -> Glyph {
        let ch = CORRUPTION_GLYPHS[rng.random_range(0..CORRUPTION_GLYPHS.len())];
        let style = Style::fg(glitch_color(rng)).with_attrs(AttrMask::BOLD);
        let g = Glyph::new(ch).with_style(style);
        if self.severe_marks && rng.random::<f64>() < self.mark_chance {
            self.stats.marks += 1;
            g.with_mark(SEVERITY_MARKS[rng.random_range(0..SEVERITY_MARKS.len())])
        } else {
            g
        }
    }

    /// Independently replace the first and last glyph of `row`.
    pub fn corrupt_edges(&mut self, row: &mut Row, rng: &mut impl Rng) {
        if !self.edges {
            return;
        }
        let hit_first = rng.random::<f64>() < self.edge_chance;
        let hit_last = rng.random::<f64>() < self.edge_chance;
        if !hit_first && !hit_last {
            return;
        }
        let first = hit_first.then(|| self.severe(rng));
        let last = hit_last.then(|| self.severe(rng));
        if let Some((a, b)) = row.edges_mut() {
            if let Some(g) = first {
                *a = g;
                self.stats.edge_hits += 1;
            }
            if let Some(g) = last {
                *b = g;
                self.stats.edge_hits += 1;
            }
        }
    }
}
