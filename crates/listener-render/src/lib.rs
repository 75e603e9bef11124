//! **listener-render**: the first-person view of *The Listener*.
//!
//! A [`Renderer`] turns a [`SceneView`] (map, observer, sanity, oxygen) into
//! a [`Frame`](listener_core::Frame) for a given viewport:
//!
//! - [`shade`] quantizes distance and flickering light into four tiers,
//! - [`corruption`] substitutes glyphs at a rate driven by sanity,
//! - [`projector`] slices the corridor ahead into one row per distance,
//! - [`composer`] stacks ceiling, wall and floor bands over a status footer.

pub mod composer;
pub mod config;
pub mod corruption;
pub mod palette;
pub mod projector;
pub mod scene;
pub mod shade;

pub use composer::{BandLayout, FLAVOR_LINES, FrameStats, Renderer, hint_for};
pub use config::RenderConfig;
pub use corruption::{
    CORRUPTION_GLYPHS, CorruptionOverlay, CorruptionStats, SEVERITY_MARKS, corruption_chance,
    is_corruption_glyph,
};
pub use projector::{BandSlot, PerspectiveProjector, ProjectedRow, RowGeometry, RowSample};
pub use scene::SceneView;
pub use shade::{LightFlicker, ShadeModel, ShadeTier};
