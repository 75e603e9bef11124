//! [`Percent`]: a saturating 0-100 gauge used for sanity and oxygen.

use std::fmt;

/// An integer level clamped to `0..=100`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Percent(u8);

/// Mental state. Lower values corrupt the view and destabilise the lights.
pub type Sanity = Percent;
/// Breathable air remaining. Display-only for the renderer.
pub type Oxygen = Percent;

impl Percent {
    pub const MIN: Self = Self(0);
    pub const MAX: Self = Self(100);

    /// Clamp `v` into range.
    #[inline]
    pub const fn new(v: u8) -> Self {
        if v > 100 { Self(100) } else { Self(v) }
    }

    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn saturating_sub(self, n: u8) -> Self {
        Self(self.0.saturating_sub(n))
    }

    #[inline]
    pub const fn saturating_add(self, n: u8) -> Self {
        Self::new(self.0.saturating_add(n))
    }
}

impl Default for Percent {
    fn default() -> Self {
        Self::MAX
    }
}

impl From<u8> for Percent {
    fn from(v: u8) -> Self {
        Self::new(v)
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_and_saturates() {
        assert_eq!(Percent::new(250).value(), 100);
        assert_eq!(Percent::new(3).saturating_sub(5), Percent::MIN);
        assert_eq!(Percent::new(99).saturating_add(5), Percent::MAX);
        assert!(Percent::new(0).is_empty());
        assert_eq!(Percent::new(42).to_string(), "42%");
    }
}
