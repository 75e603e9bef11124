//! Observer position and facing, and the step/turn rules that move them.
//!
//! An [`Orientation`] can only be created on, and only ever moves onto, a
//! walkable tile. Every operation either commits completely or leaves the
//! observer untouched.

use std::fmt;

use crate::gauge::Sanity;
use crate::geom::{Direction, Point};
use crate::map::GridMap;
use crate::tile::TileKind;

/// Oxygen consumed by one committed step.
pub const STEP_OXYGEN_COST: u8 = 1;

/// At or above this sanity the station stays quiet while walking.
pub const AMBIENT_SOUND_SANITY: u8 = 60;
/// Chance of an ambient sound just below [`AMBIENT_SOUND_SANITY`].
pub const AMBIENT_SOUND_BASE_CHANCE: f64 = 0.1;
/// Extra chance added linearly as sanity falls to zero.
pub const AMBIENT_SOUND_RAMP: f64 = 0.1;

/// Probability that a committed step triggers an ambient sound.
pub fn ambient_sound_chance(sanity: Sanity) -> f64 {
    let s = sanity.value();
    if s >= AMBIENT_SOUND_SANITY {
        return 0.0;
    }
    let missing = f64::from(AMBIENT_SOUND_SANITY - s) / f64::from(AMBIENT_SOUND_SANITY);
    AMBIENT_SOUND_BASE_CHANCE + AMBIENT_SOUND_RAMP * missing
}

/// Result of a step request.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The observer moved; the caller owes `oxygen_cost` units of air.
    Moved {
        from: Point,
        to: Point,
        oxygen_cost: u8,
    },
    /// The target tile is not walkable; nothing changed.
    Blocked { target: Point, tile: TileKind },
}

impl MoveOutcome {
    #[inline]
    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked { .. })
    }

    /// Message to show the player, if any.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::Moved { .. } => None,
            Self::Blocked { .. } => Some("You can't move that way!"),
        }
    }
}

/// Where the observer stands and which way they face.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Orientation {
    pos: Point,
    facing: Direction,
}

impl Orientation {
    /// Place the observer, refusing non-walkable tiles.
    pub fn spawn(map: &GridMap, pos: Point, facing: Direction) -> Result<Self, SpawnError> {
        let tile = map.tile_at(pos);
        if !tile.is_walkable() {
            return Err(SpawnError::NotWalkable { pos, tile });
        }
        Ok(Self { pos, facing })
    }

    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }

    #[inline]
    pub fn facing(&self) -> Direction {
        self.facing
    }

    /// Step one tile forward or backward along the facing.
    pub fn step(&mut self, map: &GridMap, forward: bool) -> MoveOutcome {
        let v = self.facing.vector();
        let target = if forward { self.pos + v } else { self.pos - v };
        let tile = map.tile_at(target);
        if !tile.is_walkable() {
            log::debug!("step to {target} blocked by {tile:?}");
            return MoveOutcome::Blocked { target, tile };
        }
        let from = self.pos;
        self.pos = target;
        MoveOutcome::Moved {
            from,
            to: target,
            oxygen_cost: STEP_OXYGEN_COST,
        }
    }

    /// Quarter turn in place. Always succeeds.
    #[inline]
    pub fn turn(&mut self, clockwise: bool) {
        self.facing = self.facing.turned(clockwise);
    }
}

/// Errors creating an [`Orientation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpawnError {
    NotWalkable { pos: Point, tile: TileKind },
}

impl fmt::Display for SpawnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotWalkable { pos, tile } => {
                write!(f, "cannot place observer at {pos}: {} is not walkable", tile.label())
            }
        }
    }
}

impl std::error::Error for SpawnError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{RngExt, SeedableRng};

    fn room() -> GridMap {
        GridMap::walled(10, 10, TileKind::Floor)
    }

    #[test]
    fn spawn_rejects_walls() {
        let map = room();
        assert!(Orientation::spawn(&map, Point::new(2, 2), Direction::North).is_ok());
        let err = Orientation::spawn(&map, Point::new(0, 0), Direction::North).unwrap_err();
        assert_eq!(
            err,
            SpawnError::NotWalkable {
                pos: Point::new(0, 0),
                tile: TileKind::Wall
            }
        );
        assert!(Orientation::spawn(&map, Point::new(-4, 2), Direction::North).is_err());
    }

    #[test]
    fn blocked_step_changes_nothing() {
        let map = room();
        let mut o = Orientation::spawn(&map, Point::new(2, 1), Direction::North).unwrap();
        let before = o;
        let out = o.step(&map, true);
        assert!(out.is_blocked());
        assert_eq!(out.message(), Some("You can't move that way!"));
        assert_eq!(o, before);
    }

    #[test]
    fn step_forward_and_back() {
        let map = room();
        let mut o = Orientation::spawn(&map, Point::new(2, 2), Direction::East).unwrap();
        assert_eq!(
            o.step(&map, true),
            MoveOutcome::Moved {
                from: Point::new(2, 2),
                to: Point::new(3, 2),
                oxygen_cost: STEP_OXYGEN_COST
            }
        );
        o.step(&map, false);
        o.step(&map, false);
        assert_eq!(o.pos(), Point::new(1, 2));
        assert_eq!(o.facing(), Direction::East);
    }

    #[test]
    fn turning_cycles() {
        let map = room();
        let mut o = Orientation::spawn(&map, Point::new(2, 2), Direction::South).unwrap();
        for _ in 0..4 {
            o.turn(true);
        }
        assert_eq!(o.facing(), Direction::South);
        o.turn(false);
        assert_eq!(o.facing(), Direction::East);
    }

    #[test]
    fn random_walk_stays_walkable() {
        let map = GridMap::station();
        let mut rng = StdRng::seed_from_u64(7);
        let mut o = Orientation::spawn(&map, Point::new(2, 2), Direction::North).unwrap();
        for _ in 0..5000 {
            match rng.random_range(0..4u32) {
                0 => {
                    o.step(&map, true);
                }
                1 => {
                    o.step(&map, false);
                }
                2 => o.turn(true),
                _ => o.turn(false),
            }
            assert!(map.is_walkable(o.pos()), "{}", o.pos());
        }
    }

    #[test]
    fn ambient_chance_rises_as_sanity_falls() {
        assert_eq!(ambient_sound_chance(Sanity::new(100)), 0.0);
        assert_eq!(ambient_sound_chance(Sanity::new(60)), 0.0);
        let mut last = 0.0;
        for s in (0..60).rev() {
            let c = ambient_sound_chance(Sanity::new(s));
            assert!(c >= last);
            last = c;
        }
        assert!((ambient_sound_chance(Sanity::new(0)) - 0.2).abs() < 1e-12);
    }
}
