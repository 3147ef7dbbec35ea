//! Color values and the RGB ↔ LMS cone-response conversion.

pub(crate) mod lms;
pub mod rgb;
