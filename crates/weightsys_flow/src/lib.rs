//! Entry point that parses the command line arguments
//! and provides a shared way for interfaces to handle the start flow.

use std::{collections::HashSet, fs};

use clap::Parser;
use ron::error::SpannedError;
use weightsys_core::prelude::*;

pub enum StartFlow {
    /// Walk through the reference scenario step by step.
    Demo,
    Simulate { settings: SimSettings },
}

#[derive(thiserror::Error, Debug)]
pub enum FlowError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("cannot parse config {path}: {source}")]
    Parse { path: String, source: SpannedError },
}

impl StartFlow {
    pub fn from_args() -> Result<StartFlow, FlowError> {
        FlowArgs::parse().try_into()
    }
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct FlowArgs {
    /// Simulation config path (ron)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Number of rounds, overrides the config
    #[arg(short, long)]
    pub rounds: Option<u32>,

    /// Rng seed, overrides the config
    #[arg(short, long)]
    pub seed: Option<u64>,
}

impl TryFrom<FlowArgs> for StartFlow {
    type Error = FlowError;

    fn try_from(value: FlowArgs) -> Result<Self, Self::Error> {
        let Some(config_path) = value.config else {
            if value.rounds.is_some() || value.seed.is_some() {
                tracing::warn!(target: "flow", "rounds and seed are ignored without a config");
            }
            return Ok(StartFlow::Demo);
        };
        let config_str = fs::read_to_string(&config_path).map_err(|source| FlowError::Read {
            path: config_path.clone(),
            source,
        })?;
        let settings = SimSettings::from_string(&config_str).map_err(|source| FlowError::Parse {
            path: config_path.clone(),
            source,
        })?;
        Ok(StartFlow::Simulate {
            settings: settings.with_overrides(value.rounds, value.seed),
        })
    }
}

/// One selectable option in a simulation, with the chance that picking it succeeds.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ArmSettings {
    pub name: String,
    pub success_rate: f64,
    pub weight: Option<f64>,
}

impl Default for ArmSettings {
    fn default() -> Self {
        Self {
            name: String::new(),
            success_rate: 0.5,
            weight: None,
        }
    }
}

impl ArmSettings {
    pub fn add_options(&self) -> AddItemOptions {
        AddItemOptions {
            weight: self.weight,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SimSettings {
    pub system: NewOptions,
    pub arms: Vec<ArmSettings>,
    pub rounds: u32,
    pub seed: Option<u64>,
    /// Print an intermediate report every this many rounds, 0 only reports at the end.
    pub report_every: u32,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            system: NewOptions::default(),
            arms: vec![],
            rounds: 1000,
            seed: None,
            report_every: 0,
        }
    }
}

impl SimSettings {
    pub fn from_string(config_str: &str) -> Result<Self, SpannedError> {
        let settings: SimSettings = ron::from_str(config_str)?;
        Ok(settings.sanitized())
    }

    pub fn with_overrides(self, rounds: Option<u32>, seed: Option<u64>) -> Self {
        Self {
            rounds: rounds.unwrap_or(self.rounds),
            seed: seed.or(self.seed),
            ..self
        }
    }

    /// Clamps success rates into `[0, 1]`, a NaN rate never succeeds.
    /// Arms repeating an earlier name are dropped.
    fn sanitized(mut self) -> Self {
        let mut seen = HashSet::new();
        self.arms.retain(|arm| {
            let first = seen.insert(arm.name.clone());
            if !first {
                tracing::warn!(target: "flow", "duplicate arm {} dropped", arm.name);
            }
            first
        });
        for arm in self.arms.iter_mut() {
            let rate = if arm.success_rate.is_nan() {
                0.0
            } else {
                arm.success_rate.clamp(0.0, 1.0)
            };
            if rate != arm.success_rate {
                tracing::warn!(target: "flow", "arm {} success rate {} clamped to {}", arm.name, arm.success_rate, rate);
                arm.success_rate = rate;
            }
        }
        self
    }
}
