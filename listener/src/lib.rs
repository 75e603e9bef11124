//! The Listener: a first-person station crawl whose picture falls apart as
//! the player's sanity drains.
//!
//! The binary wires a [`ListenerModel`] to the crossterm driver; this
//! library half holds the game itself so it can be driven from tests.

pub mod model;
pub mod msglog;
pub mod screens;
pub mod session;

pub use model::ListenerModel;
pub use msglog::{LogEntry, LogStyle, MessageLog};
pub use session::{Reaction, Session, SessionConfig};
