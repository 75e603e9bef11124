//! **listener-core**: the station model behind *The Listener*.
//!
//! This crate provides the pieces every other crate builds on: geometry and
//! facings, the immutable station [`GridMap`], the observer's
//! [`Orientation`] with its step/turn rules, the terminal/exploration
//! [`ModeMachine`], fixed-width glyph buffers ([`Row`], [`Frame`]), input
//! messages, and the Elm-architecture application loop.

pub mod app;
pub mod frame;
pub mod gauge;
pub mod geom;
pub mod glyph;
pub mod map;
pub mod messages;
pub mod mode;
pub mod orientation;
pub mod recording;
pub mod style;
pub mod tile;

pub use app::{App, AppConfig, Context, Driver, Effect, Model};
pub use frame::{Frame, Row};
pub use gauge::{Oxygen, Percent, Sanity};
pub use geom::{Direction, Point, Viewport};
pub use glyph::Glyph;
pub use map::{GridMap, MapError, STATION_LAYOUT};
pub use messages::{Key, Msg};
pub use mode::{ExplorationInput, InputError, Mode, ModeError, ModeMachine};
pub use orientation::{MoveOutcome, Orientation, SpawnError};
pub use recording::FrameRecorder;
pub use style::{AttrMask, Color, Style};
pub use tile::TileKind;
