//! Read-only view of the state a frame is rendered from.

use listener_core::{GridMap, Orientation, Oxygen, Sanity, TileKind};

/// Everything the renderer reads from the session, borrowed for one frame.
#[derive(Clone, Copy, Debug)]
pub struct SceneView<'a> {
    pub map: &'a GridMap,
    pub orientation: &'a Orientation,
    pub sanity: Sanity,
    /// Shown on the status line only.
    pub oxygen: Oxygen,
}

impl<'a> SceneView<'a> {
    /// A view with full oxygen.
    pub fn new(map: &'a GridMap, orientation: &'a Orientation, sanity: Sanity) -> Self {
        Self {
            map,
            orientation,
            sanity,
            oxygen: Oxygen::MAX,
        }
    }

    pub fn with_oxygen(mut self, oxygen: Oxygen) -> Self {
        self.oxygen = oxygen;
        self
    }

    /// The tile the observer stands on.
    #[inline]
    pub fn current_tile(&self) -> TileKind {
        self.map.tile_at(self.orientation.pos())
    }
}
