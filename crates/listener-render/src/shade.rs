//! Distance shading and the light flicker cycle.

use listener_core::Sanity;

use crate::config::RenderConfig;

/// Discrete brightness level used to pick glyph density.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShadeTier {
    Sparse,
    Light,
    Medium,
    Dense,
}

impl ShadeTier {
    /// Block glyph for this tier.
    #[inline]
    pub const fn glyph(self) -> char {
        match self {
            Self::Dense => '█',
            Self::Medium => '▓',
            Self::Light => '▒',
            Self::Sparse => '░',
        }
    }

    /// Reverse lookup of [`glyph`](ShadeTier::glyph).
    pub const fn from_glyph(ch: char) -> Option<Self> {
        match ch {
            '█' => Some(Self::Dense),
            '▓' => Some(Self::Medium),
            '▒' => Some(Self::Light),
            '░' => Some(Self::Sparse),
            _ => None,
        }
    }
}

/// Cyclic frame counter simulating unstable station lighting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LightFlicker {
    counter: u8,
    period: u8,
}

impl LightFlicker {
    pub fn new(period: u8) -> Self {
        Self {
            counter: 0,
            period: period.max(1),
        }
    }

    #[inline]
    pub fn counter(&self) -> u8 {
        self.counter
    }

    /// Step to the next frame of the cycle.
    #[inline]
    pub fn advance(&mut self) {
        self.counter = (self.counter + 1) % self.period;
    }
}

impl Default for LightFlicker {
    fn default() -> Self {
        Self::new(crate::config::FLICKER_PERIOD)
    }
}

/// Maps distance, flicker phase and sanity to a [`ShadeTier`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadeModel {
    view_distance: i32,
    lit_frames: u8,
    stable_sanity: u8,
    dim: f64,
    thresholds: [f64; 3],
}

impl ShadeModel {
    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            view_distance: config.view_distance.max(1),
            lit_frames: config.flicker_lit_frames,
            stable_sanity: config.stable_light_sanity,
            dim: config.dim_light_intensity,
            thresholds: [
                config.dense_threshold,
                config.medium_threshold,
                config.light_threshold,
            ],
        }
    }

    /// 1.0 while the lights are on, the dim intensity otherwise.
    pub fn light_intensity(&self, flicker: LightFlicker, sanity: Sanity) -> f64 {
        if flicker.counter() < self.lit_frames || sanity.value() > self.stable_sanity {
            1.0
        } else {
            self.dim
        }
    }

    /// `(1 - dist / D) * intensity`.
    #[inline]
    pub fn brightness(&self, dist: i32, intensity: f64) -> f64 {
        (1.0 - dist as f64 / self.view_distance as f64) * intensity
    }

    pub fn tier(&self, brightness: f64) -> ShadeTier {
        let [dense, medium, light] = self.thresholds;
        if brightness > dense {
            ShadeTier::Dense
        } else if brightness > medium {
            ShadeTier::Medium
        } else if brightness > light {
            ShadeTier::Light
        } else {
            ShadeTier::Sparse
        }
    }

    /// Tier for a surface `dist` tiles away under the given lighting.
    pub fn shade(&self, dist: i32, flicker: LightFlicker, sanity: Sanity) -> ShadeTier {
        self.tier(self.brightness(dist, self.light_intensity(flicker, sanity)))
    }
}

impl Default for ShadeModel {
    fn default() -> Self {
        Self::from_config(&RenderConfig::default())
    }
}
