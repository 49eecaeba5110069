//! Configuration for temperature sweeps
//!
//! A sweep is described by an optional YAML file whose fields all have
//! defaults; command-line arguments (see [`Args`]) override file values.

mod args;

pub use args::Args;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::ising::metropolis::{step_budget, DEFAULT_SWEEPS};
use crate::ising::{InitialState, SimulationConfig};

pub const DEFAULT_SIZE: usize = 50;
pub const DEFAULT_COUPLING: f64 = 1.0;
pub const DEFAULT_FIELD: f64 = 0.0;

/// Temperatures to visit, either listed or evenly spaced
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TemperatureSpec {
    List(Vec<f64>),
    /// `points` evenly spaced values from `start` to `stop`, both included
    Linspace { start: f64, stop: f64, points: usize },
}

impl Default for TemperatureSpec {
    fn default() -> Self {
        TemperatureSpec::Linspace {
            start: 0.001,
            stop: 5.0,
            points: 12,
        }
    }
}

impl TemperatureSpec {
    pub fn values(&self) -> Result<Vec<f64>, ConfigError> {
        let values = match *self {
            TemperatureSpec::List(ref list) => list.clone(),
            TemperatureSpec::Linspace {
                start,
                stop,
                points,
            } => {
                if points == 0 || !start.is_finite() || !stop.is_finite() {
                    return Err(ConfigError::InvalidRange {
                        start,
                        stop,
                        points,
                    });
                }
                if points == 1 {
                    vec![start]
                } else {
                    let step = (stop - start) / (points - 1) as f64;
                    (0..points).map(|i| start + i as f64 * step).collect()
                }
            }
        };

        if values.is_empty() {
            return Err(ConfigError::EmptySweep);
        }
        Ok(values)
    }
}

/// Sweep configuration as read from YAML
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SweepConfig {
    pub size: Option<usize>,
    pub coupling: Option<f64>,
    pub field: Option<f64>,
    /// Attempted flips per site for each temperature
    pub sweeps: Option<u64>,
    pub temperatures: Option<TemperatureSpec>,
    pub initial_state: Option<InitialState>,
    /// Record energy and magnetization after each of the last
    /// `sample_sweeps` sweeps; 0 disables sampling
    pub sample_sweeps: Option<u64>,
    /// Base seed; temperature point `i` uses `seed + i`
    pub seed: Option<u64>,
    /// Directory for the summary table and lattice files
    pub output_dir: Option<String>,
}

/// Fully resolved sweep parameters
#[derive(Debug, Clone, PartialEq)]
pub struct SweepPlan {
    pub temperatures: Vec<f64>,
    pub size: usize,
    pub coupling: f64,
    pub field: f64,
    pub sweeps: u64,
    pub sample_sweeps: u64,
    pub initial_state: InitialState,
    pub seed: u64,
}

impl SweepConfig {
    pub fn from_yaml(content: &str) -> Result<Self, serde_yml::Error> {
        serde_yml::from_str(content)
    }

    /// Fill in defaults and check every resulting run configuration.
    ///
    /// Without a configured seed a fresh one is drawn, so the plan records
    /// the seed that makes the sweep reproducible.
    pub fn plan(&self) -> Result<SweepPlan, ConfigError> {
        let plan = SweepPlan {
            temperatures: self.temperatures.clone().unwrap_or_default().values()?,
            size: self.size.unwrap_or(DEFAULT_SIZE),
            coupling: self.coupling.unwrap_or(DEFAULT_COUPLING),
            field: self.field.unwrap_or(DEFAULT_FIELD),
            sweeps: self.sweeps.unwrap_or(DEFAULT_SWEEPS),
            sample_sweeps: self.sample_sweeps.unwrap_or(0),
            initial_state: self.initial_state.unwrap_or_default(),
            seed: self.seed.unwrap_or_else(rand::random),
        };

        if plan.sample_sweeps > plan.sweeps {
            return Err(ConfigError::InvalidSampling {
                sample_sweeps: plan.sample_sweeps,
                sweeps: plan.sweeps,
            });
        }
        for &temperature in &plan.temperatures {
            plan.simulation_config(temperature)?.validate()?;
        }
        Ok(plan)
    }
}

impl SweepPlan {
    /// Run configuration for one temperature, with `sweeps * N²` steps
    pub fn simulation_config(&self, temperature: f64) -> Result<SimulationConfig, ConfigError> {
        let steps =
            step_budget(self.sweeps, self.size).ok_or(ConfigError::StepBudgetOverflow {
                sweeps: self.sweeps,
                size: self.size,
            })?;
        Ok(SimulationConfig::new(temperature, self.size)
            .with_coupling(self.coupling)
            .with_field(self.field)
            .with_steps(steps))
    }

    pub fn seed_for(&self, index: usize) -> u64 {
        self.seed.wrapping_add(index as u64)
    }
}
