//! Unseen Core — color-vision deficiency simulation engine.
//!
//! This crate contains the color math (RGB ↔ LMS, deficiency transforms),
//! the parsers for CSS color and linear-gradient text, and the mutation
//! cache that makes simulation on a document fully reversible. No DOM or
//! browser dependencies: documents are reached through [`StyleSurface`].

pub mod cache;
pub mod color;
pub mod deficiency;
pub mod engine;
pub mod error;
pub mod gradient;
pub mod params;
pub mod parse;
pub mod surface;

// Re-exports for convenience.
pub use cache::{StyleMutationCache, StyleSnapshot};
pub use color::rgb::Rgb;
pub use deficiency::Deficiency;
pub use engine::{BatchReport, ProcessOutcome, RestoreReport, SimulationEngine, simulate_property};
pub use error::SimulationError;
pub use gradient::{ColorStop, Gradient};
pub use params::SimulationParams;
pub use parse::{parse_color, parse_gradient, parse_stop};
pub use surface::{MemoryNode, MemorySurface, NodeId, StyleProperty, StyleSurface};
