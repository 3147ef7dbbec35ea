//! LMS cone-response space and the fixed 3x3 RGB ↔ LMS transforms.
//!
//! LMS is an intermediate representation only: values are unconstrained and
//! never leave the crate. The two matrices are published approximations and
//! are not exact inverses of each other, so an RGB → LMS → RGB round trip
//! may be off by one or two steps per channel.

use glam::DVec3;

use super::rgb::Rgb;

/// A 3x3 row-major color matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatrix(pub [[f64; 3]; 3]);

impl ColorMatrix {
    /// Multiply this matrix by a column vector.
    pub fn apply(&self, v: DVec3) -> DVec3 {
        let [r0, r1, r2] = self.0;
        DVec3::new(
            DVec3::from_array(r0).dot(v),
            DVec3::from_array(r1).dot(v),
            DVec3::from_array(r2).dot(v),
        )
    }
}

/// Linear RGB (normalized) → LMS.
pub const RGB_TO_LMS: ColorMatrix = ColorMatrix([
    [0.31399022, 0.63951294, 0.04649755],
    [0.15537241, 0.75789446, 0.08670142],
    [0.01775239, 0.10944209, 0.87256922],
]);

/// LMS → linear RGB (normalized). Approximate inverse of [`RGB_TO_LMS`].
pub const LMS_TO_RGB: ColorMatrix = ColorMatrix([
    [5.47221206, -4.6419601, 0.16963708],
    [-1.1252419, 2.29317094, -0.1678952],
    [0.02980165, -0.19318073, 1.16364789],
]);

/// Long/medium/short cone responses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lms(pub DVec3);

impl Lms {
    /// Apply a simulation matrix in cone space.
    pub fn transform(self, matrix: &ColorMatrix) -> Self {
        Self(matrix.apply(self.0))
    }
}

/// Normalize to `[0, 1]` and project into LMS.
pub fn rgb_to_lms(rgb: Rgb) -> Lms {
    Lms(RGB_TO_LMS.apply(rgb.to_unit()))
}

/// Project back to RGB, scale by 255 and sanitize.
pub fn lms_to_rgb(lms: Lms) -> Rgb {
    Rgb::from_unit(LMS_TO_RGB.apply(lms.0))
}
