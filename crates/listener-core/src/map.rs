//! The station [`GridMap`]: an immutable rectangle of [`TileKind`]s.
//!
//! Any query outside the rectangle answers [`TileKind::Wall`], so the
//! station is closed on every side even when the layout forgets a border.

use std::fmt;

use crate::geom::Point;
use crate::tile::TileKind;

/// The station as laid out when the game starts.
pub const STATION_LAYOUT: [&str; 10] = [
    "##########",
    "#...#....#",
    "#.T.D..G.#",
    "#...#....#",
    "##D####D##",
    "#........#",
    "#......S.#",
    "#........#",
    "#........#",
    "##########",
];

/// Immutable tile grid, built once at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridMap {
    tiles: Vec<TileKind>,
    width: i32,
    height: i32,
}

impl GridMap {
    /// Build a map from layout rows using the [`TileKind::rune`] legend.
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<Self, MapError> {
        let Some(first) = rows.first() else {
            return Err(MapError::Empty);
        };
        let width = first.as_ref().chars().count();
        if width == 0 {
            return Err(MapError::Empty);
        }

        let mut tiles = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let found = row.chars().count();
            if found != width {
                return Err(MapError::Ragged {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                let tile = TileKind::from_rune(ch).ok_or(MapError::UnknownTile {
                    ch,
                    pos: Point::new(x as i32, y as i32),
                })?;
                tiles.push(tile);
            }
        }

        let map = Self {
            tiles,
            width: width as i32,
            height: rows.len() as i32,
        };
        log::debug!("grid map built: {}x{}", map.width, map.height);
        Ok(map)
    }

    /// A `width` x `height` map with a solid wall border around `interior`.
    pub fn walled(width: i32, height: i32, interior: TileKind) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let mut tiles = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                let border = x == 0 || y == 0 || x == width - 1 || y == height - 1;
                tiles.push(if border { TileKind::Wall } else { interior });
            }
        }
        Self {
            tiles,
            width,
            height,
        }
    }

    /// The default station.
    pub fn station() -> Self {
        Self::parse_or_room(&STATION_LAYOUT)
    }

    /// Parse `rows`, or log the error and build a plain 10x10 room.
    fn parse_or_room<S: AsRef<str>>(rows: &[S]) -> Self {
        match Self::parse(rows) {
            Ok(map) => map,
            Err(err) => {
                log::warn!("station layout rejected ({err}); using a plain room");
                Self::walled(10, 10, TileKind::Floor)
            }
        }
    }

    /// Copy of this map with one tile replaced. Maps are otherwise
    /// immutable, so this is how fixtures and level variants are derived.
    pub fn with_tile(&self, p: Point, tile: TileKind) -> Self {
        let mut map = self.clone();
        if let Some(i) = map.index(p) {
            map.tiles[i] = tile;
        }
        map
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.index(p).is_some()
    }

    /// The tile at `p`; [`TileKind::Wall`] outside the grid.
    #[inline]
    pub fn tile_at(&self, p: Point) -> TileKind {
        self.index(p).map_or(TileKind::Wall, |i| self.tiles[i])
    }

    /// Whether the observer may stand at `p`.
    #[inline]
    pub fn is_walkable(&self, p: Point) -> bool {
        self.tile_at(p).is_walkable()
    }

    /// Iterate `(Point, TileKind)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, TileKind)> + '_ {
        self.tiles.iter().enumerate().map(move |(i, &t)| {
            let i = i as i32;
            (Point::new(i % self.width, i / self.width), t)
        })
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height {
            Some((p.y * self.width + p.x) as usize)
        } else {
            None
        }
    }
}

/// Errors that can occur when parsing a layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// No rows, or an empty first row.
    Empty,
    /// A row's width differs from the first row's.
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A character outside the tile legend.
    UnknownTile { ch: char, pos: Point },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("map layout is empty"),
            Self::Ragged {
                row,
                expected,
                found,
            } => write!(
                f,
                "map layout row {row} is {found} tiles wide, expected {expected}"
            ),
            Self::UnknownTile { ch, pos } => {
                write!(f, "map layout has unknown tile \u{201c}{ch}\u{201d} at {pos}")
            }
        }
    }
}

impl std::error::Error for MapError {}
