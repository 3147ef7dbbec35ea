//! Runtime configuration for the demo.
//!
//! Resolved from defaults, then environment variables, then arguments:
//!
//! ```text
//! unseen-demo <scene.json> [--deficiency NAME] [--restore]
//! unseen-demo --value TEXT [--deficiency NAME]
//! ```

use std::path::PathBuf;

use unseen_core::{Deficiency, SimulationParams};

use crate::error::DemoError;

/// Default deficiency when neither `UNSEEN_DEFICIENCY` nor `--deficiency` is given.
const DEFAULT_DEFICIENCY: Deficiency = Deficiency::Protanopia;

pub const USAGE: &str = "unseen-demo <scene.json> [--deficiency NAME] [--restore]\n       \
     unseen-demo --value TEXT [--deficiency NAME]";

/// What to run the simulation on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// JSON list of nodes, loaded into a `MemorySurface`.
    Scene(PathBuf),
    /// A single color or gradient value.
    Value(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub params: SimulationParams,
    pub input: Input,
    /// Restore the scene after simulating and print both states.
    pub restore: bool,
}

impl AppConfig {
    /// Build the configuration from the process environment and arguments.
    pub fn from_env() -> Result<Self, DemoError> {
        let deficiency = std::env::var("UNSEEN_DEFICIENCY").ok();
        let restore = std::env::var("UNSEEN_RESTORE").is_ok();
        Self::resolve(deficiency.as_deref(), restore, std::env::args().skip(1))
    }

    /// Apply `args` on top of the environment-provided values.
    pub fn resolve<I>(env_deficiency: Option<&str>, env_restore: bool, args: I) -> Result<Self, DemoError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut deficiency = match env_deficiency {
            Some(name) => name.parse()?,
            None => DEFAULT_DEFICIENCY,
        };
        let mut restore = env_restore;
        let mut input = None;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--deficiency" | "-d" => {
                    let name = args
                        .next()
                        .ok_or_else(|| DemoError::Usage("--deficiency needs a value".into()))?;
                    deficiency = name.parse()?;
                }
                "--restore" => restore = true,
                "--value" => {
                    let value = args
                        .next()
                        .ok_or_else(|| DemoError::Usage("--value needs a value".into()))?;
                    set_input(&mut input, Input::Value(value))?;
                }
                flag if flag.starts_with('-') => {
                    return Err(DemoError::Usage(format!("unknown flag `{flag}`")));
                }
                path => set_input(&mut input, Input::Scene(PathBuf::from(path)))?,
            }
        }

        let input = input.ok_or_else(|| DemoError::Usage("missing scene path or --value".into()))?;
        Ok(Self {
            params: SimulationParams::new(deficiency),
            input,
            restore,
        })
    }
}

fn set_input(slot: &mut Option<Input>, input: Input) -> Result<(), DemoError> {
    if slot.is_some() {
        return Err(DemoError::Usage("only one scene or value may be given".into()));
    }
    *slot = Some(input);
    Ok(())
}
