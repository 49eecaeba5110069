//! Command-line argument parsing for Ising sweeps

use clap::Parser;

use super::{SweepConfig, TemperatureSpec};
use crate::ising::InitialState;

/// 2D Ising model Metropolis sweep over temperatures
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to an optional YAML configuration file
    #[arg(short, long)]
    pub config_file: Option<String>,

    /// Override lattice size N (N x N sites)
    #[arg(short = 'n', long)]
    pub size: Option<usize>,

    /// Override temperatures (repeat for several points)
    #[arg(short, long = "temperature")]
    pub temperatures: Vec<f64>,

    /// Override attempted flips per site
    #[arg(long)]
    pub sweeps: Option<u64>,

    /// Override coupling constant J
    #[arg(long)]
    pub coupling: Option<f64>,

    /// Override external field B
    #[arg(long, allow_hyphen_values = true)]
    pub field: Option<f64>,

    /// Sample observables over the last N sweeps of each run
    #[arg(long)]
    pub sample_sweeps: Option<u64>,

    /// Override base random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start from random spins instead of all up
    #[arg(long)]
    pub random_start: bool,

    /// Directory for the summary table and lattice files
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Write log output to this file instead of stdout
    #[arg(long)]
    pub log_file: Option<String>,
}

impl Args {
    /// Layer command-line overrides on top of a file configuration
    pub fn apply(&self, mut config: SweepConfig) -> SweepConfig {
        if let Some(size) = self.size {
            config.size = Some(size);
        }
        if !self.temperatures.is_empty() {
            config.temperatures = Some(TemperatureSpec::List(self.temperatures.clone()));
        }
        if let Some(sweeps) = self.sweeps {
            config.sweeps = Some(sweeps);
        }
        if let Some(coupling) = self.coupling {
            config.coupling = Some(coupling);
        }
        if let Some(field) = self.field {
            config.field = Some(field);
        }
        if let Some(sample_sweeps) = self.sample_sweeps {
            config.sample_sweeps = Some(sample_sweeps);
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if self.random_start {
            config.initial_state = Some(InitialState::Random);
        }
        if let Some(ref dir) = self.output_dir {
            config.output_dir = Some(dir.clone());
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "ising_mc",
            "-n",
            "8",
            "-t",
            "1.5",
            "-t",
            "2.5",
            "--field",
            "-0.5",
            "--random-start",
            "--sample-sweeps",
            "4",
        ]);
        let file = SweepConfig {
            size: Some(32),
            sweeps: Some(10),
            ..Default::default()
        };

        let config = args.apply(file);
        assert_eq!(config.size, Some(8));
        assert_eq!(config.sweeps, Some(10));
        assert_eq!(config.field, Some(-0.5));
        assert_eq!(
            config.temperatures,
            Some(TemperatureSpec::List(vec![1.5, 2.5]))
        );
        assert_eq!(config.initial_state, Some(InitialState::Random));
        assert_eq!(config.sample_sweeps, Some(4));
    }

    #[test]
    fn test_no_overrides_keeps_file() {
        let file = SweepConfig {
            seed: Some(3),
            ..Default::default()
        };
        assert_eq!(Args::default().apply(file.clone()), file);
    }
}
