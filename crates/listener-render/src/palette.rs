//! Glyphs and colours shared by the projector and the composer.

use rand::Rng;

use listener_core::{Color, Sanity, TileKind};

use crate::corruption::glitch_color;
use crate::shade::ShadeTier;

/// Vertical seam glyphs scattered over side walls.
pub const SEAM_GLYPHS: [char; 4] = ['│', '┃', '╎', '╏'];
/// Structural beam in a facing wall.
pub const BEAM: char = '║';
/// Dark speck in open side bands and floor margins.
pub const SPECK: char = '·';
pub const FLOOR_SPECK: char = ',';
pub const CEILING_DOTS: [char; 2] = ['.', '·'];
pub const FLOOR_FILL: char = '.';
pub const FLOOR_SEAM: char = '+';
pub const DOOR_HANDLE: char = 'o';
pub const RULE: char = '═';

pub const DOOR_COLOR: Color = Color::Yellow;
pub const SPECK_COLOR: Color = Color::DarkGray;
pub const RULE_COLOR: Color = Color::Cyan;

/// Colour of wall surfaces for one row. At or below `steady` sanity the
/// walls take a glitch colour.
pub fn wall_color(tier: ShadeTier, sanity: Sanity, steady: u8, rng: &mut impl Rng) -> Color {
    if sanity.value() > steady {
        if tier >= ShadeTier::Medium {
            Color::White
        } else {
            Color::Gray
        }
    } else {
        glitch_color(rng)
    }
}

/// How a station feature is drawn when it fills the view ahead.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeatureMotif {
    pub color: Color,
    /// Share of the centre gap taken at full perspective.
    pub width_multiplier: f64,
    pub min_width: usize,
    pub open: char,
    pub fill: char,
    pub accent: char,
    pub close: char,
}

pub const TERMINAL_MOTIF: FeatureMotif = FeatureMotif {
    color: Color::Green,
    width_multiplier: 0.4,
    min_width: 6,
    open: '[',
    fill: '=',
    accent: '>',
    close: ']',
};

pub const GENERATOR_MOTIF: FeatureMotif = FeatureMotif {
    color: Color::Yellow,
    width_multiplier: 0.5,
    min_width: 8,
    open: '(',
    fill: '~',
    accent: '*',
    close: ')',
};

pub const STORAGE_MOTIF: FeatureMotif = FeatureMotif {
    color: Color::Cyan,
    width_multiplier: 0.4,
    min_width: 6,
    open: '|',
    fill: '▤',
    accent: '#',
    close: '|',
};

impl FeatureMotif {
    /// Motif for a feature tile; `None` for structure and floor.
    pub const fn for_tile(tile: TileKind) -> Option<&'static FeatureMotif> {
        match tile {
            TileKind::Terminal => Some(&TERMINAL_MOTIF),
            TileKind::Generator => Some(&GENERATOR_MOTIF),
            TileKind::Storage => Some(&STORAGE_MOTIF),
            TileKind::Floor | TileKind::Wall | TileKind::Door => None,
        }
    }
}

/// Colour of the status line's tile label.
pub const fn tile_color(tile: TileKind) -> Color {
    match tile {
        TileKind::Terminal => TERMINAL_MOTIF.color,
        TileKind::Generator => GENERATOR_MOTIF.color,
        TileKind::Storage => STORAGE_MOTIF.color,
        TileKind::Door => DOOR_COLOR,
        TileKind::Floor | TileKind::Wall => Color::Gray,
    }
}

/// Colour for a percentage gauge.
pub const fn gauge_color(value: u8) -> Color {
    if value >= 70 {
        Color::Green
    } else if value >= 40 {
        Color::Yellow
    } else {
        Color::Red
    }
}
