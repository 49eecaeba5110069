// Ising model Monte Carlo library

pub mod config;
pub mod error;
pub mod ising;
pub mod sweep;

pub use error::{ConfigError, IsingError};
pub use ising::{run, Lattice, MetropolisEngine, RandomSource, RunOutcome, SimulationConfig};
pub use sweep::{run_sweep, SweepPoint};
