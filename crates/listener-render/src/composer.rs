//! Frame composition: ceiling, wall and floor bands plus the footer.
//!
//! [`Renderer`] owns the two pieces of state a render advances, the light
//! flicker and the random source. Given the same seed and the same scenes
//! it produces the same frames.

use rand::rngs::StdRng;
use rand::{Rng, RngExt, SeedableRng};

use listener_core::{AttrMask, Color, Frame, Glyph, Row, Style, TileKind, Viewport};

use crate::config::RenderConfig;
use crate::corruption::{CorruptionOverlay, CorruptionStats};
use crate::palette::{
    self, CEILING_DOTS, FLOOR_FILL, FLOOR_SEAM, FLOOR_SPECK, RULE, RULE_COLOR, SPECK_COLOR,
};
use crate::projector::{BandSlot, PerspectiveProjector};
use crate::scene::SceneView;
use crate::shade::{LightFlicker, ShadeModel, ShadeTier};

/// Rows after the three bands: rule, status, hint, flavor.
pub const FOOTER_ROWS: usize = 4;

/// Lines shown under the status line when sanity is low.
pub const FLAVOR_LINES: [&str; 6] = [
    "...something moved in the shadows...",
    "...the walls feel closer than before...",
    "...did you hear that?...",
    "...the hum of the vents sounds like breathing...",
    "...you are not alone down here...",
    "...the terminal is still listening...",
];

/// Hint for the tile under the observer.
pub fn hint_for(tile: TileKind) -> &'static str {
    match tile {
        TileKind::Terminal => "> You are at the TERMINAL. Press Q to use it.",
        TileKind::Generator => "> You are at the GENERATOR. It hums unevenly.",
        TileKind::Storage => "> You are at STORAGE. The shelves are mostly bare.",
        TileKind::Door => "> A doorway. W/S to move through.",
        TileKind::Floor | TileKind::Wall => "> CORRIDOR. W/S move, A/D turn, M map, H help.",
    }
}

/// Row counts for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BandLayout {
    pub cols: usize,
    pub ceiling: usize,
    pub wall: usize,
    pub floor: usize,
}

impl BandLayout {
    /// Split a viewport, already clamped, into three bands and the footer.
    pub fn split(viewport: Viewport) -> Self {
        let avail = viewport.rows.saturating_sub(FOOTER_ROWS);
        let band = avail / 3;
        Self {
            cols: viewport.cols,
            ceiling: band,
            wall: band,
            floor: avail - 2 * band,
        }
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.ceiling + self.wall + self.floor + FOOTER_ROWS
    }
}

/// What the last composed frame contained.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    pub corruption: CorruptionStats,
    /// Flicker counter the frame was lit with.
    pub flicker: u8,
    pub lights_on: bool,
    pub layout: Option<BandLayout>,
    pub flavor: bool,
}

/// Composes frames from [`SceneView`]s.
pub struct Renderer<R = StdRng> {
    config: RenderConfig,
    shade: ShadeModel,
    flicker: LightFlicker,
    rng: R,
    last: FrameStats,
}

impl Renderer<StdRng> {
    /// A renderer seeded from the thread RNG.
    pub fn new(config: RenderConfig) -> Self {
        let seed = rand::rng().random::<u64>();
        log::info!("renderer seed {seed}");
        Self::seeded(config, seed)
    }

    /// A reproducible renderer.
    pub fn seeded(config: RenderConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Renderer<R> {
    pub fn with_rng(config: RenderConfig, rng: R) -> Self {
        Self {
            shade: ShadeModel::from_config(&config),
            flicker: LightFlicker::new(config.flicker_period),
            config,
            rng,
            last: FrameStats::default(),
        }
    }

    #[inline]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    #[inline]
    pub fn flicker(&self) -> LightFlicker {
        self.flicker
    }

    /// Statistics of the most recent [`render`](Renderer::render).
    #[inline]
    pub fn last_stats(&self) -> &FrameStats {
        &self.last
    }

    /// Band layout for `viewport` after clamping.
    pub fn layout(&self, viewport: Viewport) -> BandLayout {
        let min_cols = self.config.effective_min_cols();
        let min_rows = self.config.min_rows.max(FOOTER_ROWS + 3);
        if viewport.is_degenerate(min_cols, min_rows) {
            log::debug!(
                "viewport {}x{} raised to {min_cols}x{min_rows}",
                viewport.cols,
                viewport.rows
            );
        }
        BandLayout::split(viewport.clamped(min_cols, min_rows))
    }

    /// Compose one frame. Advances the flicker exactly once.
    pub fn render(&mut self, scene: &SceneView<'_>, viewport: Viewport) -> Frame {
        let layout = self.layout(viewport);
        let flicker = self.flicker;
        let mut overlay = CorruptionOverlay::new(&self.config, scene.sanity);
        let mut frame = Frame::new(layout.cols);

        for i in 0..layout.ceiling {
            let row = self.ceiling_row(layout, i, &mut overlay);
            frame.push(row);
        }

        let projector = PerspectiveProjector::new(&self.config);
        for i in 0..layout.wall {
            let slot = BandSlot::new(layout.cols, i, layout.wall);
            let projected = projector.project_row(scene, flicker, slot, &mut overlay, &mut self.rng);
            frame.push(projected.row);
        }

        for i in 0..layout.floor {
            let row = self.floor_row(layout, i);
            frame.push(row);
        }

        let flavor = self.push_footer(&mut frame, scene);

        self.last = FrameStats {
            corruption: overlay.stats(),
            flicker: flicker.counter(),
            lights_on: self.shade.light_intensity(flicker, scene.sanity) >= 1.0,
            layout: Some(layout),
            flavor,
        };
        self.flicker.advance();
        frame
    }

    fn ceiling_row(&mut self, layout: BandLayout, i: usize, overlay: &mut CorruptionOverlay) -> Row {
        let near = i < layout.ceiling.div_ceil(3);
        let chance = if near {
            self.config.ceiling_near_dot_chance
        } else {
            self.config.ceiling_dot_chance
        };
        let mut row = Row::new(layout.cols);
        for x in 0..layout.cols {
            if self.rng.random::<f64>() < chance {
                let ch = CEILING_DOTS[self.rng.random_range(0..CEILING_DOTS.len())];
                row.set(x, Glyph::colored(ch, SPECK_COLOR));
            }
        }
        overlay.corrupt_edges(&mut row, &mut self.rng);
        row
    }

    fn floor_row(&mut self, layout: BandLayout, i: usize) -> Row {
        let cols = layout.cols;
        let depth = if layout.floor > 1 {
            i as f64 / (layout.floor - 1) as f64
        } else {
            1.0
        };
        let fraction = self.config.floor_base_width + depth * self.config.floor_width_growth;
        let width = ((cols as f64 * fraction).floor() as usize).min(cols);
        let start = (cols - width) / 2;
        let end = start + width;

        let mut row = Row::new(cols);
        let seams = depth > self.config.floor_seam_depth;
        let spacing = self.config.floor_seam_spacing.max(1);
        for x in 0..cols {
            let g = if (start..end).contains(&x) {
                if seams && (x - start) % spacing == 0 {
                    Glyph::colored(FLOOR_SEAM, Color::Gray)
                } else {
                    Glyph::colored(FLOOR_FILL, SPECK_COLOR)
                }
            } else if self.rng.random::<f64>() < self.config.speck_chance {
                Glyph::colored(FLOOR_SPECK, SPECK_COLOR)
            } else {
                Glyph::BLANK
            };
            row.set(x, g);
        }
        row
    }

    /// Rule, status, hint and flavor rows. Returns whether a flavor line
    /// was drawn.
    fn push_footer(&mut self, frame: &mut Frame, scene: &SceneView<'_>) -> bool {
        let cols = frame.width();
        let mut rule = Row::new(cols);
        rule.fill(0..cols, Glyph::colored(RULE, RULE_COLOR));
        frame.push(rule);

        frame.push(status_row(cols, scene));

        let here = scene.current_tile();
        let hint_style = Style::fg(palette::tile_color(here)).with_attrs(AttrMask::DIM);
        frame.push_text(hint_for(here), hint_style);

        let flavor = scene.sanity.value() < self.config.flavor_sanity
            && self.rng.random::<f64>() < self.config.flavor_chance;
        if flavor {
            let line = FLAVOR_LINES[self.rng.random_range(0..FLAVOR_LINES.len())];
            frame.push_text(line, Style::fg(Color::Gray));
        } else {
            frame.push_blank();
        }
        flavor
    }
}

/// `GENERATOR | (4, 2) | Facing N | O2 97%`, each part in its own colour.
fn status_row(cols: usize, scene: &SceneView<'_>) -> Row {
    let here = scene.current_tile();
    let o = scene.orientation;
    let parts: [(String, Style); 7] = [
        (
            here.label().to_string(),
            Style::fg(palette::tile_color(here)).with_attrs(AttrMask::BOLD),
        ),
        (" | ".to_string(), Style::fg(Color::DarkGray)),
        (o.pos().to_string(), Style::fg(Color::Cyan)),
        (" | ".to_string(), Style::fg(Color::DarkGray)),
        (format!("Facing {}", o.facing().initial()), Style::fg(Color::Yellow)),
        (" | ".to_string(), Style::fg(Color::DarkGray)),
        (
            format!("O2 {}", scene.oxygen),
            Style::fg(palette::gauge_color(scene.oxygen.value())),
        ),
    ];
    let mut row = Row::new(cols);
    let mut x = 0;
    for (text, style) in &parts {
        row.put_str(x, text, *style);
        x += text.chars().count();
    }
    row
}

impl<R> std::fmt::Debug for Renderer<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("flicker", &self.flicker)
            .field("last", &self.last)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corruption::is_corruption_glyph;
    use listener_core::{Direction, GridMap, Orientation, Oxygen, Point, Sanity};

    /// Tier of every shade glyph in a row, in column order.
    fn row_tiers(row: &Row) -> Vec<ShadeTier> {
        row.glyphs()
            .iter()
            .filter_map(|g| ShadeTier::from_glyph(g.ch))
            .collect()
    }

    fn room() -> GridMap {
        GridMap::walled(10, 10, TileKind::Floor)
    }

    fn at(map: &GridMap, x: i32, y: i32, facing: Direction) -> Orientation {
        Orientation::spawn(map, Point::new(x, y), facing).unwrap()
    }

    #[test]
    fn layout_splits_rows_into_thirds() {
        let r = Renderer::seeded(RenderConfig::default(), 0);
        let l = r.layout(Viewport::new(80, 24));
        assert_eq!((l.ceiling, l.wall, l.floor), (6, 6, 8));
        assert_eq!(l.height(), 24);
        let l = r.layout(Viewport::new(80, 25));
        assert_eq!((l.ceiling, l.wall, l.floor), (7, 7, 7));
    }

    #[test]
    fn frame_matches_viewport() {
        let map = room();
        let o = at(&map, 2, 2, Direction::East);
        let scene = SceneView::new(&map, &o, Sanity::new(45));
        let mut r = Renderer::seeded(RenderConfig::default(), 3);
        for (cols, rows) in [(40, 12), (80, 24), (121, 37)] {
            let f = r.render(&scene, Viewport::new(cols, rows));
            assert_eq!(f.width(), cols);
            assert_eq!(f.height(), rows);
            assert!(f.rows().iter().all(|row| row.width() == cols));
        }
    }

    #[test]
    fn degenerate_viewport_is_clamped() {
        let map = room();
        let o = at(&map, 2, 2, Direction::North);
        let scene = SceneView::new(&map, &o, Sanity::MAX);
        let mut r = Renderer::seeded(RenderConfig::default(), 1);
        for vp in [Viewport::new(0, 0), Viewport::new(1, 1), Viewport::new(39, 80)] {
            let f = r.render(&scene, vp);
            assert!(f.width() >= 40);
            assert!(f.height() >= 12);
        }
    }

    #[test]
    fn identical_seeds_render_identical_frames() {
        let map = room().with_tile(Point::new(2, 1), TileKind::Generator);
        let o = at(&map, 2, 4, Direction::North);
        let scene = SceneView::new(&map, &o, Sanity::new(12)).with_oxygen(Oxygen::new(61));
        let mut a = Renderer::seeded(RenderConfig::default(), 99);
        let mut b = Renderer::seeded(RenderConfig::default(), 99);
        for _ in 0..12 {
            let vp = Viewport::new(90, 30);
            assert_eq!(a.render(&scene, vp), b.render(&scene, vp));
        }
        let mut c = Renderer::seeded(RenderConfig::default(), 100);
        let vp = Viewport::new(90, 30);
        assert_ne!(a.render(&scene, vp), c.render(&scene, vp));
    }

    #[test]
    fn flicker_advances_once_per_frame() {
        let map = room();
        let o = at(&map, 2, 2, Direction::North);
        let scene = SceneView::new(&map, &o, Sanity::new(20));
        let mut r = Renderer::seeded(RenderConfig::default(), 5);
        for n in 0..25u8 {
            assert_eq!(r.flicker().counter(), n % 10);
            r.render(&scene, Viewport::new(60, 20));
            assert_eq!(r.last_stats().flicker, n % 10);
            assert_eq!(r.last_stats().lights_on, n % 10 < 7);
        }
    }

    #[test]
    fn calm_room_has_no_corruption_and_fades_with_distance() {
        let map = room();
        let o = at(&map, 2, 2, Direction::North);
        let scene = SceneView::new(&map, &o, Sanity::MAX);
        let mut r = Renderer::seeded(RenderConfig::default(), 17);
        let vp = Viewport::new(80, 40);
        for _ in 0..10 {
            let f = r.render(&scene, vp);
            assert!(f.glyphs().all(|g| !is_corruption_glyph(g.ch)));
            assert!(f.glyphs().all(|g| g.mark.is_none()));
            assert_eq!(r.last_stats().corruption.corrupted, 0);
            assert_eq!(r.last_stats().corruption.edge_hits, 0);
            assert!(!r.last_stats().flavor);

            // Wall band rows run far to near; the best tier in each row may
            // only grow as distance shrinks. The nearest row is open floor.
            let l = r.last_stats().layout.unwrap();
            let band = &f.rows()[l.ceiling..l.ceiling + l.wall];
            let mut prev = ShadeTier::Sparse;
            for row in band {
                if let Some(best) = row_tiers(row).into_iter().max() {
                    assert!(best >= prev);
                    prev = best;
                }
            }
            assert_eq!(prev, ShadeTier::Dense);
        }
    }

    #[test]
    fn generator_at_low_sanity() {
        let map = room().with_tile(Point::new(5, 5), TileKind::Generator);
        let o = at(&map, 5, 5, Direction::West);
        let scene = SceneView::new(&map, &o, Sanity::new(10));
        let mut r = Renderer::seeded(RenderConfig::default(), 2024);
        let vp = Viewport::new(100, 40);

        let mut total = CorruptionStats::default();
        let mut flavored = 0;
        for _ in 0..60 {
            let f = r.render(&scene, vp);
            let lines = f.lines();
            let l = r.last_stats().layout.unwrap();
            let status = &lines[l.ceiling + l.wall + l.floor + 1];
            let hint = &lines[l.ceiling + l.wall + l.floor + 2];
            assert!(status.starts_with("GENERATOR"));
            assert!(hint.contains("GENERATOR"));
            total.merge(r.last_stats().corruption);
            if r.last_stats().flavor {
                flavored += 1;
            }
        }
        let rate = total.rate();
        assert!(total.candidates > 20_000);
        assert!((rate - 0.225).abs() < 0.01, "rate {rate}");
        assert!(total.marks > 0);
        assert!(total.edge_hits > 0);
        assert!(flavored > 0 && flavored < 60);
    }

    #[test]
    fn status_line_reports_position_facing_and_oxygen() {
        let map = room();
        let o = at(&map, 3, 7, Direction::South);
        let scene = SceneView::new(&map, &o, Sanity::MAX).with_oxygen(Oxygen::new(42));
        let row = status_row(60, &scene);
        assert_eq!(row.to_text().trim_end(), "CORRIDOR | (3, 7) | Facing S | O2 42%");
        assert_eq!(row.width(), 60);
    }

    #[test]
    fn hints_name_the_feature() {
        assert!(hint_for(TileKind::Terminal).contains("TERMINAL"));
        assert!(hint_for(TileKind::Generator).contains("GENERATOR"));
        assert!(hint_for(TileKind::Storage).contains("STORAGE"));
        assert!(hint_for(TileKind::Floor).contains("CORRIDOR"));
    }

    #[test]
    fn floor_widens_toward_the_viewer() {
        let mut r = Renderer::seeded(
            RenderConfig {
                speck_chance: 0.0,
                ..RenderConfig::default()
            },
            8,
        );
        let l = r.layout(Viewport::new(100, 40));
        let first = r.floor_row(l, 0);
        let last = r.floor_row(l, l.floor - 1);
        let filled = |row: &Row| row.glyphs().iter().filter(|g| !g.is_blank()).count();
        assert_eq!(filled(&first), 30);
        assert_eq!(filled(&last), 70);
        assert!(last.to_text().contains(FLOOR_SEAM));
        assert!(!first.to_text().contains(FLOOR_SEAM));
    }

    /// Non-blank share of the near-third and far ceiling rows, and whether
    /// any ceiling edge held a corruption glyph.
    fn ceiling_sample(sanity: u8, frames: usize) -> (f64, f64, bool) {
        let map = room();
        let o = at(&map, 2, 2, Direction::North);
        let scene = SceneView::new(&map, &o, Sanity::new(sanity));
        let mut r = Renderer::seeded(RenderConfig::default(), 23);
        let vp = Viewport::new(80, 40);
        let (mut near, mut near_cells, mut far, mut far_cells) = (0usize, 0usize, 0usize, 0usize);
        let mut edge_glitch = false;
        for _ in 0..frames {
            let f = r.render(&scene, vp);
            let l = r.last_stats().layout.unwrap();
            for (i, row) in f.rows()[..l.ceiling].iter().enumerate() {
                let glyphs = row.glyphs();
                let last = glyphs.len() - 1;
                for (x, g) in glyphs.iter().enumerate() {
                    if x == 0 || x == last {
                        edge_glitch |= is_corruption_glyph(g.ch);
                    } else {
                        assert!(g.is_blank() || CEILING_DOTS.contains(&g.ch), "{:?}", g.ch);
                    }
                }
                let dots = glyphs.iter().filter(|g| !g.is_blank()).count();
                if i < l.ceiling.div_ceil(3) {
                    near += dots;
                    near_cells += glyphs.len();
                } else {
                    far += dots;
                    far_cells += glyphs.len();
                }
            }
        }
        (
            near as f64 / near_cells as f64,
            far as f64 / far_cells as f64,
            edge_glitch,
        )
    }

    #[test]
    fn ceiling_is_denser_in_the_near_third() {
        let cfg = RenderConfig::default();
        let (near, far, edge_glitch) = ceiling_sample(100, 200);
        assert!((near - cfg.ceiling_near_dot_chance).abs() < 0.02, "near {near}");
        assert!((far - cfg.ceiling_dot_chance).abs() < 0.01, "far {far}");
        assert!(near > 2.0 * far);
        assert!(!edge_glitch);
    }

    #[test]
    fn ceiling_edges_glitch_only_below_half_sanity() {
        let (_, _, edge_glitch) = ceiling_sample(50, 100);
        assert!(!edge_glitch);
        let (_, _, edge_glitch) = ceiling_sample(45, 100);
        assert!(edge_glitch);
    }
}
