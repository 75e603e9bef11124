//! Geometry primitives: [`Point`], [`Direction`] and [`Viewport`].

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A 2D integer point on the station grid. X grows east, Y grows south.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Rotate a direction vector a quarter turn counter-clockwise.
    ///
    /// Applied to a facing vector this yields the observer's left hand:
    /// North (0,-1) becomes West (-1,0).
    #[inline]
    pub const fn rotate90(self) -> Self {
        Self {
            x: self.y,
            y: -self.x,
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for Point {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<i32> for Point {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: i32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Compass facing. Variants are listed in clockwise order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All four directions in clockwise order, starting at North.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Position in the clockwise cycle (North = 0).
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }

    /// Unit step for this facing.
    #[inline]
    pub const fn vector(self) -> Point {
        match self {
            Self::North => Point::new(0, -1),
            Self::East => Point::new(1, 0),
            Self::South => Point::new(0, 1),
            Self::West => Point::new(-1, 0),
        }
    }

    /// The direction one quarter turn away.
    #[inline]
    pub const fn turned(self, clockwise: bool) -> Self {
        let step = if clockwise { 1 } else { 3 };
        Self::ALL[(self.index() + step) % 4]
    }

    /// Upper-case name, e.g. `"NORTH"`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::North => "NORTH",
            Self::East => "EAST",
            Self::South => "SOUTH",
            Self::West => "WEST",
        }
    }

    /// Single-letter initial used on the status line.
    #[inline]
    pub const fn initial(self) -> char {
        match self {
            Self::North => 'N',
            Self::East => 'E',
            Self::South => 'S',
            Self::West => 'W',
        }
    }

    /// Arrow glyph used by the top-down map.
    #[inline]
    pub const fn arrow(self) -> char {
        match self {
            Self::North => '^',
            Self::East => '>',
            Self::South => 'v',
            Self::West => '<',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Viewport
// ---------------------------------------------------------------------------

/// Terminal size in character cells, queried fresh for every render.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub cols: usize,
    pub rows: usize,
}

impl Viewport {
    #[inline]
    pub const fn new(cols: usize, rows: usize) -> Self {
        Self { cols, rows }
    }

    /// Raise both dimensions to at least the given minimums.
    #[inline]
    pub fn clamped(self, min_cols: usize, min_rows: usize) -> Self {
        Self {
            cols: self.cols.max(min_cols),
            rows: self.rows.max(min_rows),
        }
    }

    /// Whether [`clamped`](Viewport::clamped) would change this viewport.
    #[inline]
    pub fn is_degenerate(self, min_cols: usize, min_rows: usize) -> bool {
        self.cols < min_cols || self.rows < min_rows
    }

    /// The same viewport with `n` fewer rows (saturating).
    #[inline]
    pub fn shrink_rows(self, n: usize) -> Self {
        Self {
            cols: self.cols,
            rows: self.rows.saturating_sub(n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_vectors() {
        assert_eq!(Direction::North.vector(), Point::new(0, -1));
        assert_eq!(Direction::East.vector(), Point::new(1, 0));
        assert_eq!(Direction::South.vector(), Point::new(0, 1));
        assert_eq!(Direction::West.vector(), Point::new(-1, 0));
    }

    #[test]
    fn four_turns_return_home() {
        for d in Direction::ALL {
            let mut cw = d;
            let mut ccw = d;
            for _ in 0..4 {
                cw = cw.turned(true);
                ccw = ccw.turned(false);
            }
            assert_eq!(cw, d);
            assert_eq!(ccw, d);
        }
    }

    #[test]
    fn turn_order_is_clockwise() {
        assert_eq!(Direction::North.turned(true), Direction::East);
        assert_eq!(Direction::North.turned(false), Direction::West);
        assert_eq!(Direction::West.turned(true), Direction::North);
    }

    #[test]
    fn rotate90_points_left() {
        for d in Direction::ALL {
            assert_eq!(d.vector().rotate90(), d.turned(false).vector());
        }
    }

    #[test]
    fn viewport_clamp() {
        let v = Viewport::new(10, 3);
        assert!(v.is_degenerate(40, 12));
        assert_eq!(v.clamped(40, 12), Viewport::new(40, 12));
        assert_eq!(Viewport::new(100, 30).clamped(40, 12), Viewport::new(100, 30));
        assert_eq!(Viewport::new(80, 2).shrink_rows(5).rows, 0);
    }
}
