//! Linear gradients — per-stop simulation and reconstruction.
//!
//! A gradient is simulated by decomposing it into its direction and ordered
//! color stops, simulating each stop's color independently, and writing the
//! stops back out in their original order with their original positions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::deficiency::Deficiency;
use crate::parse::parse_color;

/// One entry of a gradient: a color token and an optional position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorStop {
    /// Color text as written, e.g. `rgb(255, 0, 0)`.
    pub color: String,
    /// Offset kept verbatim (`50%`, `12px`).
    pub position: Option<String>,
}

impl ColorStop {
    /// Simulate this stop's color.
    ///
    /// Stops whose color is not recognized (named colors, `transparent`,
    /// other color functions) are returned unchanged.
    pub fn simulate(&self, deficiency: Deficiency) -> Self {
        match parse_color(&self.color) {
            Some(rgb) => Self {
                color: deficiency.simulate(rgb).to_string(),
                position: self.position.clone(),
            },
            None => self.clone(),
        }
    }
}

impl fmt::Display for ColorStop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.position {
            Some(position) => write!(f, "{} {}", self.color, position),
            None => f.write_str(&self.color),
        }
    }
}

/// A single-layer linear gradient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gradient {
    /// Direction token (`to right`, `45deg`); `None` when it was left implicit.
    pub direction: Option<String>,
    /// Color stops in their original order.
    pub stops: Vec<ColorStop>,
    /// Whether this was a `repeating-linear-gradient`.
    #[serde(default)]
    pub repeating: bool,
}

impl Gradient {
    /// Simulate every stop, keeping direction, order, and positions.
    pub fn simulate(&self, deficiency: Deficiency) -> Self {
        Self {
            direction: self.direction.clone(),
            stops: self.stops.iter().map(|s| s.simulate(deficiency)).collect(),
            repeating: self.repeating,
        }
    }

    /// Serialize back to CSS, e.g. `linear-gradient(to right, rgb(1, 2, 3), rgb(4, 5, 6) 50%)`.
    pub fn reconstruct(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Gradient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.repeating {
            f.write_str("repeating-")?;
        }
        f.write_str("linear-gradient(")?;
        if let Some(direction) = &self.direction {
            write!(f, "{direction}, ")?;
        }
        for (i, stop) in self.stops.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{stop}")?;
        }
        f.write_str(")")
    }
}
