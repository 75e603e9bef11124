//! Tile kinds of the station grid.

/// What occupies one grid cell. The set is closed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileKind {
    Floor,
    Wall,
    Door,
    Terminal,
    Generator,
    Storage,
}

impl TileKind {
    pub const ALL: [TileKind; 6] = [
        TileKind::Floor,
        TileKind::Wall,
        TileKind::Door,
        TileKind::Terminal,
        TileKind::Generator,
        TileKind::Storage,
    ];

    /// Whether the observer may stand on this tile.
    #[inline]
    pub const fn is_walkable(self) -> bool {
        !matches!(self, Self::Wall)
    }

    /// Layout character.
    pub const fn rune(self) -> char {
        match self {
            Self::Floor => '.',
            Self::Wall => '#',
            Self::Door => 'D',
            Self::Terminal => 'T',
            Self::Generator => 'G',
            Self::Storage => 'S',
        }
    }

    /// Parse a layout character.
    pub const fn from_rune(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Self::Floor),
            '#' => Some(Self::Wall),
            'D' => Some(Self::Door),
            'T' => Some(Self::Terminal),
            'G' => Some(Self::Generator),
            'S' => Some(Self::Storage),
            _ => None,
        }
    }

    /// Upper-case label for the status line.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Floor => "CORRIDOR",
            Self::Wall => "WALL",
            Self::Door => "DOORWAY",
            Self::Terminal => "TERMINAL",
            Self::Generator => "GENERATOR",
            Self::Storage => "STORAGE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_walls_block() {
        for t in TileKind::ALL {
            assert_eq!(t.is_walkable(), t != TileKind::Wall);
        }
    }

    #[test]
    fn runes_round_trip() {
        for t in TileKind::ALL {
            assert_eq!(TileKind::from_rune(t.rune()), Some(t));
        }
        assert_eq!(TileKind::from_rune('x'), None);
    }
}
