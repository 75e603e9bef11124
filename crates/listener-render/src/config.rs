//! Renderer tuning constants.
//!
//! Each `pub const` is the default for the matching [`RenderConfig`] field.

/// Tiles sampled ahead of the observer.
pub const VIEW_DISTANCE: i32 = 8;

/// Frames in one light flicker cycle.
pub const FLICKER_PERIOD: u8 = 10;
/// Frames per cycle in which the lights are on regardless of sanity.
pub const FLICKER_LIT_FRAMES: u8 = 7;
/// Above this sanity the lights never flicker off.
pub const STABLE_LIGHT_SANITY: u8 = 60;
/// Light intensity while the lights are off.
pub const DIM_LIGHT_INTENSITY: f64 = 0.3;

/// Brightness above which a surface is drawn dense.
pub const DENSE_THRESHOLD: f64 = 0.7;
/// Brightness above which a surface is drawn medium.
pub const MEDIUM_THRESHOLD: f64 = 0.4;
/// Brightness above which a surface is drawn light; sparse below.
pub const LIGHT_THRESHOLD: f64 = 0.2;

/// `corruption_chance = (100 - sanity) / CORRUPTION_DENOMINATOR`.
pub const CORRUPTION_DENOMINATOR: f64 = 400.0;
/// Below this sanity corrupted glyphs may gain a severity mark.
pub const SEVERITY_SANITY: u8 = 30;
/// Chance of adding a severity mark below [`SEVERITY_SANITY`].
pub const SEVERITY_MARK_CHANCE: f64 = 0.3;
/// Below this sanity the first/last column of a row may be replaced.
pub const EDGE_CORRUPTION_SANITY: u8 = 50;
/// Chance, per edge, of an edge replacement.
pub const EDGE_CORRUPTION_CHANCE: f64 = 0.1;

/// Side wall width as a fraction of the columns, before perspective.
pub const WALL_WIDTH_FRACTION: f64 = 0.15;
pub const MIN_WALL_WIDTH: usize = 8;
pub const MIN_CENTER_GAP: usize = 10;
/// Chance of a seam glyph in the inner part of a side wall.
pub const SEAM_CHANCE: f64 = 0.08;
/// Fraction of a side wall, from its outer edge, that never carries seams.
pub const SEAM_DEPTH: f64 = 0.4;
/// Chance of a dark speck in an open side band.
pub const SPECK_CHANCE: f64 = 0.03;
/// Columns between structural beams in a facing wall.
pub const BEAM_SPACING: usize = 6;
/// Above this sanity walls keep their natural colour.
pub const STEADY_WALL_SANITY: u8 = 50;
/// Doors and features at or inside this distance show full detail.
pub const NEAR_DISTANCE: i32 = 2;
/// Doors and features past this distance fade to a light wash.
pub const MID_DISTANCE: i32 = 4;

/// Dot chance in the far two thirds of the ceiling.
pub const CEILING_DOT_CHANCE: f64 = 0.04;
/// Dot chance in the near third of the ceiling.
pub const CEILING_NEAR_DOT_CHANCE: f64 = 0.12;
/// Floor strip width as a fraction of the columns at the far edge.
pub const FLOOR_BASE_WIDTH: f64 = 0.3;
/// Extra floor width fraction gained by the nearest row.
pub const FLOOR_WIDTH_GROWTH: f64 = 0.4;
/// Floor depth past which seams are drawn.
pub const FLOOR_SEAM_DEPTH: f64 = 0.66;
pub const FLOOR_SEAM_SPACING: usize = 8;

/// Below this sanity a flavor line may appear under the status line.
pub const FLAVOR_SANITY: u8 = 40;
pub const FLAVOR_CHANCE: f64 = 0.2;

/// Smallest viewport the renderer lays out; smaller ones are raised to it.
pub const MIN_COLS: usize = 40;
pub const MIN_ROWS: usize = 12;

/// Every tuning value used by the renderer.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RenderConfig {
    pub view_distance: i32,
    pub flicker_period: u8,
    pub flicker_lit_frames: u8,
    pub stable_light_sanity: u8,
    pub dim_light_intensity: f64,
    pub dense_threshold: f64,
    pub medium_threshold: f64,
    pub light_threshold: f64,
    pub corruption_denominator: f64,
    pub severity_sanity: u8,
    pub severity_mark_chance: f64,
    pub edge_corruption_sanity: u8,
    pub edge_corruption_chance: f64,
    pub wall_width_fraction: f64,
    pub min_wall_width: usize,
    pub min_center_gap: usize,
    pub seam_chance: f64,
    pub seam_depth: f64,
    pub speck_chance: f64,
    pub beam_spacing: usize,
    pub steady_wall_sanity: u8,
    pub near_distance: i32,
    pub mid_distance: i32,
    pub ceiling_dot_chance: f64,
    pub ceiling_near_dot_chance: f64,
    pub floor_base_width: f64,
    pub floor_width_growth: f64,
    pub floor_seam_depth: f64,
    pub floor_seam_spacing: usize,
    pub flavor_sanity: u8,
    pub flavor_chance: f64,
    pub min_cols: usize,
    pub min_rows: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            view_distance: VIEW_DISTANCE,
            flicker_period: FLICKER_PERIOD,
            flicker_lit_frames: FLICKER_LIT_FRAMES,
            stable_light_sanity: STABLE_LIGHT_SANITY,
            dim_light_intensity: DIM_LIGHT_INTENSITY,
            dense_threshold: DENSE_THRESHOLD,
            medium_threshold: MEDIUM_THRESHOLD,
            light_threshold: LIGHT_THRESHOLD,
            corruption_denominator: CORRUPTION_DENOMINATOR,
            severity_sanity: SEVERITY_SANITY,
            severity_mark_chance: SEVERITY_MARK_CHANCE,
            edge_corruption_sanity: EDGE_CORRUPTION_SANITY,
            edge_corruption_chance: EDGE_CORRUPTION_CHANCE,
            wall_width_fraction: WALL_WIDTH_FRACTION,
            min_wall_width: MIN_WALL_WIDTH,
            min_center_gap: MIN_CENTER_GAP,
            seam_chance: SEAM_CHANCE,
            seam_depth: SEAM_DEPTH,
            speck_chance: SPECK_CHANCE,
            beam_spacing: BEAM_SPACING,
            steady_wall_sanity: STEADY_WALL_SANITY,
            near_distance: NEAR_DISTANCE,
            mid_distance: MID_DISTANCE,
            ceiling_dot_chance: CEILING_DOT_CHANCE,
            ceiling_near_dot_chance: CEILING_NEAR_DOT_CHANCE,
            floor_base_width: FLOOR_BASE_WIDTH,
            floor_width_growth: FLOOR_WIDTH_GROWTH,
            floor_seam_depth: FLOOR_SEAM_DEPTH,
            floor_seam_spacing: FLOOR_SEAM_SPACING,
            flavor_sanity: FLAVOR_SANITY,
            flavor_chance: FLAVOR_CHANCE,
            min_cols: MIN_COLS,
            min_rows: MIN_ROWS,
        }
    }
}

impl RenderConfig {
    /// Smallest column count for which both width minimums can hold.
    #[inline]
    pub fn min_layout_cols(&self) -> usize {
        2 * self.min_wall_width + self.min_center_gap
    }

    /// The configured minimum viewport, never below
    /// [`min_layout_cols`](RenderConfig::min_layout_cols).
    #[inline]
    pub fn effective_min_cols(&self) -> usize {
        self.min_cols.max(self.min_layout_cols())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fit_the_minimum_viewport() {
        let c = RenderConfig::default();
        assert_eq!(c.view_distance, 8);
        assert_eq!(c.min_layout_cols(), 26);
        assert!(c.effective_min_cols() >= c.min_layout_cols());
        assert!(c.flicker_lit_frames < c.flicker_period);
        assert!(c.near_distance < c.mid_distance);
        assert!(c.ceiling_near_dot_chance > c.ceiling_dot_chance);
        assert!(c.floor_base_width + c.floor_width_growth <= 1.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_round_trip_and_partial() {
        let c = RenderConfig::default();
        let s = serde_json::to_string(&c).unwrap();
        let back: RenderConfig = serde_json::from_str(&s).unwrap();
        assert_eq!(back, c);

        let partial: RenderConfig = serde_json::from_str(r#"{"view_distance": 5}"#).unwrap();
        assert_eq!(partial.view_distance, 5);
        assert_eq!(partial.flicker_period, FLICKER_PERIOD);
    }
}
