//! Color-vision deficiency transforms.
//!
//! Dichromatic deficiencies (loss of one cone type) are simulated in LMS
//! space with a fixed 3x3 matrix; achromatopsia collapses the color to its
//! luminance using a fixed weight vector directly in RGB.
//!
//! # Reference
//! - Viénot, Brettel & Mollon (1999) — LMS projection matrices
//! - Rec. 709 luminance weights for the monochromatic case

use std::fmt;
use std::str::FromStr;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::color::lms::{ColorMatrix, lms_to_rgb, rgb_to_lms};
use crate::color::rgb::Rgb;
use crate::error::SimulationError;

/// L-cone loss: L is rebuilt from M and S.
const PROTANOPIA: ColorMatrix = ColorMatrix([
    [0.0, 1.05118294, -0.05116099],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
]);

/// M-cone loss: M is rebuilt from L and S.
const DEUTERANOPIA: ColorMatrix = ColorMatrix([
    [1.0, 0.0, 0.0],
    [0.9513092, 0.0, 0.04866992],
    [0.0, 0.0, 1.0],
]);

/// S-cone loss: S is rebuilt from L and M.
const TRITANOPIA: ColorMatrix = ColorMatrix([
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [-0.86744736, 1.86727089, 0.0],
]);

/// Luminance weights for total color-vision loss.
const ACHROMATOPSIA: [f64; 3] = [0.212656, 0.715158, 0.072186];

/// A supported color-vision deficiency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Deficiency {
    /// Red-blind (no L cones).
    Protanopia,
    /// Green-blind (no M cones).
    Deuteranopia,
    /// Blue-blind (no S cones).
    Tritanopia,
    /// Total color blindness (monochromatic vision).
    Achromatopsia,
}

/// How a deficiency is applied to a color.
#[derive(Debug, Clone, Copy)]
enum Kernel {
    Dichromatic(ColorMatrix),
    Monochromatic([f64; 3]),
}

impl Deficiency {
    /// Lowercase name, as accepted by [`FromStr`].
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Protanopia => "protanopia",
            Self::Deuteranopia => "deuteranopia",
            Self::Tritanopia => "tritanopia",
            Self::Achromatopsia => "achromatopsia",
        }
    }

    /// All supported deficiencies.
    pub fn all() -> &'static [Self] {
        const ALL: [Deficiency; 4] = [
            Deficiency::Protanopia,
            Deficiency::Deuteranopia,
            Deficiency::Tritanopia,
            Deficiency::Achromatopsia,
        ];
        &ALL
    }

    /// Whether this deficiency models the loss of a single cone type.
    pub const fn is_dichromatic(&self) -> bool {
        !matches!(self, Self::Achromatopsia)
    }

    const fn kernel(&self) -> Kernel {
        match self {
            Self::Protanopia => Kernel::Dichromatic(PROTANOPIA),
            Self::Deuteranopia => Kernel::Dichromatic(DEUTERANOPIA),
            Self::Tritanopia => Kernel::Dichromatic(TRITANOPIA),
            Self::Achromatopsia => Kernel::Monochromatic(ACHROMATOPSIA),
        }
    }

    /// Color as perceived under this deficiency.
    pub fn simulate(&self, rgb: Rgb) -> Rgb {
        match self.kernel() {
            Kernel::Dichromatic(matrix) => dichromatic(rgb, &matrix),
            Kernel::Monochromatic(weights) => monochromatic(rgb, weights),
        }
    }
}

impl fmt::Display for Deficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Deficiency {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|d| d.name() == s)
            .ok_or_else(|| SimulationError::InvalidArgument(format!("unknown deficiency `{s}`")))
    }
}

/// Simulate a dichromatic deficiency in LMS space.
///
/// ```text
/// out = sanitize(lms_to_rgb(matrix × rgb_to_lms(rgb)))
/// ```
///
/// `rgb` is already sanitized by construction and `lms_to_rgb` sanitizes
/// its result, so both ends of the chain hold the `[0, 255]` invariant.
pub(crate) fn dichromatic(rgb: Rgb, matrix: &ColorMatrix) -> Rgb {
    lms_to_rgb(rgb_to_lms(rgb).transform(matrix))
}

/// Collapse a color onto the gray axis using luminance weights.
///
/// ```text
/// y   = dot(rgb / 255, weights)
/// out = sanitize([y × 255, y × 255, y × 255])
/// ```
pub(crate) fn monochromatic(rgb: Rgb, weights: [f64; 3]) -> Rgb {
    let y = rgb.to_unit().dot(DVec3::from_array(weights));
    Rgb::from_unit(DVec3::splat(y))
}
