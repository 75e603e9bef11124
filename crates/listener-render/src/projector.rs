//! Per-row perspective projection of the corridor ahead.
//!
//! Row `i` of the wall band looks `dist` tiles ahead, with the far end at
//! the top. Each row is three runs: left wall, centre gap, right wall. The
//! centre run is produced by one handler per [`TileKind`] and is always
//! exactly `center_gap` glyphs wide.

use rand::{Rng, RngExt};

use listener_core::{Color, Glyph, GridMap, Orientation, Point, Row, Style, TileKind};

use crate::config::RenderConfig;
use crate::corruption::CorruptionOverlay;
use crate::palette::{
    self, BEAM, DOOR_COLOR, DOOR_HANDLE, FeatureMotif, SEAM_GLYPHS, SPECK, SPECK_COLOR,
};
use crate::scene::SceneView;
use crate::shade::{LightFlicker, ShadeModel, ShadeTier};

/// Which wall-band row to project, and how wide the screen is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BandSlot {
    pub cols: usize,
    /// Row index within the band, far end first.
    pub row: usize,
    /// Total rows in the wall band.
    pub rows: usize,
}

impl BandSlot {
    #[inline]
    pub const fn new(cols: usize, row: usize, rows: usize) -> Self {
        Self { cols, row, rows }
    }
}

/// Horizontal layout of one wall-band row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RowGeometry {
    /// Tiles ahead of the observer, `1..=view_distance`.
    pub dist: i32,
    /// `(D - dist + 1) / (D + 1)`.
    pub perspective: f64,
    pub wall_width: usize,
    pub center_gap: usize,
    /// First column of the right wall.
    pub right_start: usize,
}

impl RowGeometry {
    /// Geometry of one slot.
    ///
    /// Both width minimums hold only if `slot.cols` is at least
    /// [`RenderConfig::min_layout_cols`]; the renderer clamps the viewport
    /// before calling this.
    pub fn compute(config: &RenderConfig, slot: BandSlot) -> Self {
        let cols = slot.cols;
        let d = config.view_distance.max(1);
        let progress = slot.row as f64 / slot.rows.max(1) as f64;
        let dist = ((f64::from(d) * (1.0 - progress)).floor() as i32 + 1).clamp(1, d);
        let perspective = f64::from(d - dist + 1) / f64::from(d + 1);

        let scaled = (cols as f64 * config.wall_width_fraction * perspective).floor() as usize;
        let mut wall_width = scaled.max(config.min_wall_width);
        let mut center_gap = cols.saturating_sub(2 * wall_width);
        if center_gap < config.min_center_gap {
            center_gap = config.min_center_gap;
            wall_width = cols.saturating_sub(center_gap) / 2;
        }
        Self {
            dist,
            perspective,
            wall_width,
            center_gap,
            right_start: cols.saturating_sub(wall_width),
        }
    }
}

/// Tiles sampled for one row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowSample {
    pub left: TileKind,
    pub center: TileKind,
    pub right: TileKind,
}

impl RowSample {
    pub fn take(map: &GridMap, orientation: &Orientation, dist: i32) -> Self {
        let dir = orientation.facing().vector();
        let look: Point = orientation.pos() + dir * dist;
        let perp = dir.rotate90();
        Self {
            left: map.tile_at(look + perp),
            center: map.tile_at(look),
            right: map.tile_at(look - perp),
        }
    }
}

/// One projected wall-band row plus what went into it.
#[derive(Clone, Debug)]
pub struct ProjectedRow {
    pub row: Row,
    pub geometry: RowGeometry,
    pub sample: RowSample,
    pub tier: ShadeTier,
}

/// Inputs shared by every glyph-run handler for one row.
struct RunContext {
    width: usize,
    dist: i32,
    perspective: f64,
    tier: ShadeTier,
    wall: Color,
    near: i32,
    mid: i32,
}

impl RunContext {
    fn wall_glyph(&self) -> Glyph {
        Glyph::colored(self.tier.glyph(), self.wall)
    }
}

pub struct PerspectiveProjector<'a> {
    config: &'a RenderConfig,
    shade: ShadeModel,
}

impl<'a> PerspectiveProjector<'a> {
    pub fn new(config: &'a RenderConfig) -> Self {
        Self {
            config,
            shade: ShadeModel::from_config(config),
        }
    }

    /// Project one wall-band row. Every non-blank glyph of the three runs
    /// is offered to `overlay`, then the row edges.
    pub fn project_row<R: Rng>(
        &self,
        scene: &SceneView<'_>,
        flicker: LightFlicker,
        slot: BandSlot,
        overlay: &mut CorruptionOverlay,
        rng: &mut R,
    ) -> ProjectedRow {
        let sanity = scene.sanity;
        let geometry = RowGeometry::compute(self.config, slot);
        let sample = RowSample::take(scene.map, scene.orientation, geometry.dist);
        let tier = self.shade.shade(geometry.dist, flicker, sanity);
        let ctx = RunContext {
            width: geometry.center_gap,
            dist: geometry.dist,
            perspective: geometry.perspective,
            tier,
            wall: palette::wall_color(tier, sanity, self.config.steady_wall_sanity, rng),
            near: self.config.near_distance,
            mid: self.config.mid_distance,
        };

        let mut row = Row::new(slot.cols);

        let mut left = self.side_run(sample.left, &ctx, geometry.wall_width, false, rng);
        overlay.apply_run(&mut left, rng);
        row.put_run(0, &left);

        let mut center = self.center_run(sample.center, &ctx);
        overlay.apply_run(&mut center, rng);
        row.put_run(geometry.wall_width, &center);

        let mut right = self.side_run(sample.right, &ctx, geometry.wall_width, true, rng);
        overlay.apply_run(&mut right, rng);
        row.put_run(geometry.right_start, &right);

        overlay.corrupt_edges(&mut row, rng);

        ProjectedRow {
            row,
            geometry,
            sample,
            tier,
        }
    }

    /// A side wall band. Seams only appear past the configured depth,
    /// measured from the screen edge inwards.
    fn side_run(
        &self,
        tile: TileKind,
        ctx: &RunContext,
        width: usize,
        right: bool,
        rng: &mut impl Rng,
    ) -> Vec<Glyph> {
        if tile != TileKind::Wall {
            return (0..width)
                .map(|_| {
                    if rng.random::<f64>() < self.config.speck_chance {
                        Glyph::colored(SPECK, SPECK_COLOR)
                    } else {
                        Glyph::BLANK
                    }
                })
                .collect();
        }
        let base = ctx.wall_glyph();
        (0..width)
            .map(|j| {
                let from_edge = if right { width - 1 - j } else { j };
                let depth = from_edge as f64 / width as f64;
                if depth > self.config.seam_depth && rng.random::<f64>() < self.config.seam_chance {
                    base.with_char(SEAM_GLYPHS[rng.random_range(0..SEAM_GLYPHS.len())])
                } else {
                    base
                }
            })
            .collect()
    }

    fn center_run(&self, tile: TileKind, ctx: &RunContext) -> Vec<Glyph> {
        match tile {
            TileKind::Wall => self.wall_run(ctx),
            TileKind::Door => door_run(ctx),
            TileKind::Terminal | TileKind::Generator | TileKind::Storage => {
                FeatureMotif::for_tile(tile).map_or_else(|| open_run(ctx), |m| feature_run(m, ctx))
            }
            TileKind::Floor => open_run(ctx),
        }
    }

    /// Facing wall: tier texture broken by evenly spaced beams.
    fn wall_run(&self, ctx: &RunContext) -> Vec<Glyph> {
        let base = ctx.wall_glyph();
        let spacing = self.config.beam_spacing.max(2);
        (0..ctx.width)
            .map(|x| {
                if x % spacing == spacing / 2 {
                    base.with_char(BEAM)
                } else {
                    base
                }
            })
            .collect()
    }
}

/// Door set into a wall; the wall texture fills either side.
fn door_run(ctx: &RunContext) -> Vec<Glyph> {
    let gap = ctx.width;
    let raw = (gap as f64 * ctx.perspective * 0.5).floor() as usize;
    let w = raw.max(4).min(gap.saturating_sub(4));
    let pad = (gap - w) / 2;

    let mut run = vec![ctx.wall_glyph(); gap];
    let door = Style::fg(DOOR_COLOR);
    let fill = if ctx.dist <= ctx.mid {
        ShadeTier::Medium
    } else {
        ShadeTier::Light
    };
    for (k, g) in run[pad..pad + w].iter_mut().enumerate() {
        let ch = if ctx.dist <= ctx.near {
            match k {
                0 => '[',
                _ if k == w - 1 => ']',
                _ if k == w - 2 => DOOR_HANDLE,
                _ => fill.glyph(),
            }
        } else {
            fill.glyph()
        };
        *g = Glyph::new(ch).with_style(door);
    }
    run
}

/// Terminal, generator or storage ahead. Detailed up close, a flat block
/// further out, and a faint wash past the mid distance.
fn feature_run(motif: &FeatureMotif, ctx: &RunContext) -> Vec<Glyph> {
    let gap = ctx.width;
    let tint = Glyph::colored(ShadeTier::Sparse.glyph(), motif.color);
    if ctx.dist > ctx.mid {
        return vec![tint; gap];
    }

    let raw = (gap as f64 * ctx.perspective * motif.width_multiplier).floor() as usize;
    let w = raw.max(motif.min_width).min(gap);
    let pad = (gap - w) / 2;
    let mut run = vec![Glyph::BLANK; gap];
    let near = ctx.dist <= ctx.near;
    for (k, g) in run[pad..pad + w].iter_mut().enumerate() {
        let ch = if !near {
            ShadeTier::Medium.glyph()
        } else if k == 0 {
            motif.open
        } else if k == w - 1 {
            motif.close
        } else if k == w / 2 {
            motif.accent
        } else {
            motif.fill
        };
        *g = Glyph::colored(ch, motif.color);
    }
    run
}

/// Open floor: empty space.
fn open_run(ctx: &RunContext) -> Vec<Glyph> {
    vec![Glyph::BLANK; ctx.width]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corruption::is_corruption_glyph;
    use listener_core::{Direction, Sanity};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn room() -> GridMap {
        GridMap::walled(10, 10, TileKind::Floor)
    }

    #[test]
    fn minimum_widths_hold_for_every_row() {
        let cfg = RenderConfig::default();
        for cols in 40..=240 {
            for i in 0..16 {
                let g = RowGeometry::compute(&cfg, BandSlot::new(cols, i, 16));
                assert!(g.wall_width >= 8, "cols {cols} row {i}: {g:?}");
                assert!(g.center_gap >= 10, "cols {cols} row {i}: {g:?}");
                assert!(2 * g.wall_width + g.center_gap <= cols);
                assert_eq!(g.right_start + g.wall_width, cols);
            }
        }
    }

    #[test]
    fn distance_runs_far_to_near() {
        let cfg = RenderConfig::default();
        assert_eq!(RowGeometry::compute(&cfg, BandSlot::new(80, 0, 8)).dist, 8);
        assert_eq!(RowGeometry::compute(&cfg, BandSlot::new(80, 7, 8)).dist, 2);
        assert_eq!(RowGeometry::compute(&cfg, BandSlot::new(80, 4, 8)).dist, 5);
        let mut prev = i32::MAX;
        for i in 0..20 {
            let d = RowGeometry::compute(&cfg, BandSlot::new(80, i, 20)).dist;
            assert!((1..=8).contains(&d));
            assert!(d <= prev);
            prev = d;
        }
    }

    #[test]
    fn gap_wins_when_walls_crowd_it() {
        let cfg = RenderConfig {
            min_wall_width: 12,
            ..RenderConfig::default()
        };
        let g = RowGeometry::compute(&cfg, BandSlot::new(33, 3, 4));
        assert_eq!(g.center_gap, 10);
        assert_eq!(g.wall_width, 11);
        assert_eq!(g.right_start, 22);

        let g = RowGeometry::compute(&cfg, BandSlot::new(cfg.min_layout_cols(), 3, 4));
        assert_eq!((g.wall_width, g.center_gap), (12, 10));
    }

    #[test]
    fn samples_left_and_right_of_facing() {
        let map = room()
            .with_tile(Point::new(1, 1), TileKind::Terminal)
            .with_tile(Point::new(3, 1), TileKind::Storage);
        let o = Orientation::spawn(&map, Point::new(2, 2), Direction::North).unwrap();
        let s = RowSample::take(&map, &o, 1);
        assert_eq!(s.center, TileKind::Floor);
        assert_eq!(s.left, TileKind::Terminal);
        assert_eq!(s.right, TileKind::Storage);
    }

    #[test]
    fn rows_are_exactly_cols_wide() {
        let cfg = RenderConfig::default();
        let p = PerspectiveProjector::new(&cfg);
        let mut rng = StdRng::seed_from_u64(4);
        let map = room().with_tile(Point::new(2, 1), TileKind::Door);
        for facing in Direction::ALL {
            let o = Orientation::spawn(&map, Point::new(2, 2), facing).unwrap();
            for cols in [40, 41, 79, 80, 133] {
                let scene = SceneView::new(&map, &o, Sanity::new(5));
                let mut overlay = CorruptionOverlay::new(&cfg, scene.sanity);
                for i in 0..6 {
                    let slot = BandSlot::new(cols, i, 6);
                    let pr =
                        p.project_row(&scene, LightFlicker::default(), slot, &mut overlay, &mut rng);
                    assert_eq!(pr.row.width(), cols);
                }
            }
        }
    }

    #[test]
    fn calm_rows_have_no_corruption_and_walls_at_sides() {
        let cfg = RenderConfig::default();
        let p = PerspectiveProjector::new(&cfg);
        let mut rng = StdRng::seed_from_u64(9);
        let map = room();
        // Hugging the west wall, facing north.
        let o = Orientation::spawn(&map, Point::new(1, 5), Direction::North).unwrap();
        let scene = SceneView::new(&map, &o, Sanity::MAX);
        let mut overlay = CorruptionOverlay::new(&cfg, Sanity::MAX);
        let slot = BandSlot::new(80, 5, 6);
        let pr = p.project_row(&scene, LightFlicker::default(), slot, &mut overlay, &mut rng);
        assert_eq!(pr.sample.left, TileKind::Wall);
        assert!(pr.row.glyphs().iter().all(|g| !is_corruption_glyph(g.ch)));
        let left = &pr.row.glyphs()[..pr.geometry.wall_width];
        assert!(
            left.iter()
                .all(|g| ShadeTier::from_glyph(g.ch) == Some(pr.tier) || SEAM_GLYPHS.contains(&g.ch))
        );
        // No seams in the outer part of the band.
        let outer = (pr.geometry.wall_width as f64 * cfg.seam_depth) as usize;
        assert!(left[..outer].iter().all(|g| ShadeTier::from_glyph(g.ch).is_some()));
        assert_eq!(overlay.stats().corrupted, 0);
    }

    fn ctx(width: usize, dist: i32) -> RunContext {
        let d = 8;
        RunContext {
            width,
            dist,
            perspective: f64::from(d - dist + 1) / f64::from(d + 1),
            tier: ShadeTier::Dense,
            wall: Color::Gray,
            near: 2,
            mid: 4,
        }
    }

    #[test]
    fn near_door_has_frame_and_handle() {
        let run = door_run(&ctx(40, 1));
        assert_eq!(run.len(), 40);
        let text: String = run.iter().map(|g| g.ch).collect();
        assert!(text.contains('['));
        assert!(text.contains("o]"));
        assert!(text.starts_with('█'));
        assert!(text.ends_with('█'));

        let mid: String = door_run(&ctx(40, 3)).iter().map(|g| g.ch).collect();
        assert!(mid.contains('▓') && !mid.contains('['));
        let far: String = door_run(&ctx(40, 6)).iter().map(|g| g.ch).collect();
        assert!(far.contains('▒'));
    }

    #[test]
    fn door_width_is_clamped() {
        for gap in [10, 11, 30, 120] {
            for dist in 1..=8 {
                let run = door_run(&ctx(gap, dist));
                assert_eq!(run.len(), gap);
                let door = run.iter().filter(|g| g.style.fg == DOOR_COLOR).count();
                assert!(door >= 4 && door <= gap - 4, "gap {gap} dist {dist}: {door}");
            }
        }
    }

    #[test]
    fn feature_detail_fades_with_distance() {
        let motif = &palette::GENERATOR_MOTIF;
        let near: String = feature_run(motif, &ctx(30, 1)).iter().map(|g| g.ch).collect();
        assert!(near.contains('(') && near.contains('*') && near.contains(')'));
        let mid = feature_run(motif, &ctx(30, 4));
        assert!(mid.iter().any(|g| g.ch == '▓'));
        let far = feature_run(motif, &ctx(30, 5));
        assert!(far.iter().all(|g| g.ch == '░' && g.style.fg == motif.color));
        for d in 1..=8 {
            assert_eq!(feature_run(motif, &ctx(30, d)).len(), 30);
        }
        let shown = feature_run(motif, &ctx(30, 3))
            .iter()
            .filter(|g| !g.is_blank())
            .count();
        assert!(shown >= motif.min_width);
    }
}
