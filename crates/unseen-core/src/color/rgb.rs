//! 8-bit RGB color values and channel sanitization.

use std::fmt;

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// An sRGB color with integer channels in `[0, 255]`.
///
/// Every value produced by the engine goes through [`sanitize`], so the
/// channel range is guaranteed by the `u8` representation itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from unconstrained channel values in the 0–255 scale.
    ///
    /// Each channel is clamped and rounded via [`sanitize`].
    pub fn sanitized(channels: [f64; 3]) -> Self {
        Self {
            r: sanitize(channels[0]),
            g: sanitize(channels[1]),
            b: sanitize(channels[2]),
        }
    }

    /// Channels normalized to `[0, 1]`.
    pub fn to_unit(self) -> DVec3 {
        DVec3::new(f64::from(self.r), f64::from(self.g), f64::from(self.b)) / 255.0
    }

    /// Inverse of [`Rgb::to_unit`]: scale by 255 and sanitize.
    pub fn from_unit(unit: DVec3) -> Self {
        Self::sanitized((unit * 255.0).to_array())
    }

    /// Whether all three channels are equal.
    pub fn is_gray(self) -> bool {
        self.r == self.g && self.g == self.b
    }
}

/// Serializes as CSS `rgb(r, g, b)`.
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

/// Clamp a channel to `[0, 255]` and round it to the nearest integer.
///
/// ```text
/// sanitize(x) = round(clamp(x, 0, 255)),  sanitize(NaN) = 0
/// ```
#[inline]
pub fn sanitize(x: f64) -> u8 {
    if x.is_nan() {
        return 0;
    }
    // Clamped first, so the cast cannot truncate.
    x.clamp(0.0, 255.0).round() as u8
}
