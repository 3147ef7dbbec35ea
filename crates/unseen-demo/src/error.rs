use std::path::PathBuf;

use unseen_core::SimulationError;

#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error("usage: {0}")]
    Usage(String),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid scene JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Simulation(#[from] SimulationError),
}
