//! Parameters for a simulation pass.

use serde::{Deserialize, Serialize};

use crate::deficiency::Deficiency;
use crate::error::SimulationError;
use crate::surface::StyleProperty;

/// Properties simulated when none are given explicitly.
pub const DEFAULT_PROPERTIES: [StyleProperty; 4] = [
    StyleProperty::Color,
    StyleProperty::BackgroundColor,
    StyleProperty::BorderColor,
    StyleProperty::BackgroundImage,
];

/// What to simulate and where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationParams {
    /// Deficiency to simulate.
    pub deficiency: Deficiency,
    /// Properties whose rendered value is simulated and written back inline.
    #[serde(default = "default_properties")]
    pub properties: Vec<StyleProperty>,
}

fn default_properties() -> Vec<StyleProperty> {
    DEFAULT_PROPERTIES.to_vec()
}

impl SimulationParams {
    /// Simulate `deficiency` on the default property set.
    pub fn new(deficiency: Deficiency) -> Self {
        Self {
            deficiency,
            properties: default_properties(),
        }
    }

    /// Reject property sets the engine cannot honor.
    ///
    /// Box shadows are snapshotted and restored but never recolored, since
    /// a shadow's alpha would be lost on the `rgb(...)` round trip.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.properties.contains(&StyleProperty::BoxShadow) {
            return Err(SimulationError::InvalidArgument(
                "box-shadow cannot be simulated".to_string(),
            ));
        }
        for (i, p) in self.properties.iter().enumerate() {
            if self.properties[..i].contains(p) {
                return Err(SimulationError::InvalidArgument(format!(
                    "property `{p}` listed twice"
                )));
            }
        }
        Ok(())
    }
}
