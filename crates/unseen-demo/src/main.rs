//! Unseen Demo — runs a color-deficiency simulation over a JSON scene.
//!
//! The scene is a list of nodes with cascaded (`style`) and author-set
//! (`inline`) values for the color-bearing properties. The simulated scene
//! is printed to stdout as JSON; logs go to stderr.

mod config;
mod error;

use std::process::ExitCode;

use serde::Serialize;
use tracing_subscriber::EnvFilter;
use unseen_core::{
    BatchReport, MemorySurface, NodeId, SimulationEngine, SimulationParams, StyleProperty,
    parse_color, parse_gradient, simulate_property,
};

use config::{AppConfig, Input, USAGE};
use error::DemoError;

#[derive(Serialize)]
struct SceneOutput {
    params: SimulationParams,
    failed: Vec<FailedNode>,
    simulated: MemorySurface,
    #[serde(skip_serializing_if = "Option::is_none")]
    restored: Option<MemorySurface>,
}

#[derive(Serialize)]
struct FailedNode {
    id: NodeId,
    error: String,
}

#[derive(Serialize)]
struct ValueOutput {
    params: SimulationParams,
    input: String,
    output: Option<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(DemoError::Usage(msg)) => {
            eprintln!("{msg}\n\nusage: {USAGE}");
            ExitCode::from(2)
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), DemoError> {
    let config = AppConfig::from_env()?;
    config.params.validate()?;
    tracing::info!("simulating {}", config.params.deficiency);

    let json = match &config.input {
        Input::Value(value) => serde_json::to_string_pretty(&simulate_value(value, &config.params))?,
        Input::Scene(path) => {
            let text = std::fs::read_to_string(path).map_err(|source| DemoError::Io {
                path: path.clone(),
                source,
            })?;
            let scene: MemorySurface = serde_json::from_str(&text)?;
            tracing::info!("loaded {} nodes from {}", scene.len(), path.display());
            serde_json::to_string_pretty(&simulate_scene(scene, &config))?
        }
    };
    println!("{json}");
    Ok(())
}

/// Simulate a lone value, as a gradient if it is one, otherwise as a color.
fn simulate_value(value: &str, params: &SimulationParams) -> ValueOutput {
    let property = if parse_gradient(value).is_some() {
        StyleProperty::BackgroundImage
    } else {
        StyleProperty::Color
    };
    let output = simulate_property(property, value, params.deficiency);
    if output.is_none() && parse_color(value).is_none() {
        tracing::warn!("`{value}` holds no color; nothing to simulate");
    }
    ValueOutput {
        params: params.clone(),
        input: value.to_string(),
        output,
    }
}

fn simulate_scene(mut scene: MemorySurface, config: &AppConfig) -> SceneOutput {
    let mut engine = SimulationEngine::new();
    let ids = scene.ids();
    let BatchReport { failed, .. } = engine.process_batch(&mut scene, ids, &config.params);
    let simulated = scene.clone();

    let restored = config.restore.then(|| {
        let report = engine.restore_all(&mut scene);
        tracing::info!("restored {} nodes, {} failed", report.restored, report.failed.len());
        scene
    });

    SceneOutput {
        params: config.params.clone(),
        failed: failed
            .into_iter()
            .map(|(id, e)| FailedNode {
                id,
                error: e.to_string(),
            })
            .collect(),
        simulated,
        restored,
    }
}
