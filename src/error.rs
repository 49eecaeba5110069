//! Error types for the Ising Monte Carlo engine

use thiserror::Error;

/// Reasons a simulation or sweep configuration is rejected before any
/// lattice is touched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("temperature must be positive and finite, got {0}")]
    InvalidTemperature(f64),
    #[error("lattice size must be at least 1, got {0}")]
    InvalidSize(usize),
    #[error("coupling must be finite, got {0}")]
    NonFiniteCoupling(f64),
    #[error("external field must be finite, got {0}")]
    NonFiniteField(f64),
    #[error("lattice is {lattice}x{lattice} but the configuration expects {config}x{config}")]
    SizeMismatch { config: usize, lattice: usize },
    #[error("{sweeps} sweeps of a {size}x{size} lattice exceed the representable step count")]
    StepBudgetOverflow { sweeps: u64, size: usize },
    #[error("cannot sample the last {sample_sweeps} sweeps of a {sweeps}-sweep run")]
    InvalidSampling { sample_sweeps: u64, sweeps: u64 },
    #[error("temperature sweep contains no points")]
    EmptySweep,
    #[error("temperature range {start}..{stop} with {points} points is not usable")]
    InvalidRange { start: f64, stop: f64, points: usize },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IsingError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    /// A bounded random stream ran dry in the middle of a run.
    #[error("random source exhausted after {draws} draws")]
    RandomSourceExhausted { draws: usize },
    #[error("spin value {value} at index {index} is not -1 or +1")]
    InvalidSpin { index: usize, value: i8 },
    #[error("expected {expected} spin values, got {actual}")]
    LatticeShape { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, IsingError>;
