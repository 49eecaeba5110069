//! 2D Ising model on a periodic square lattice, sampled with single-spin-flip
//! Metropolis Monte Carlo.

pub mod analysis;
pub mod energy;
pub mod lattice;
pub mod metropolis;
pub mod neighbors;
pub mod random;

pub use lattice::{InitialState, Lattice, Site};
pub use metropolis::{run, MetropolisEngine, RunOutcome, SimulationConfig};
pub use random::{Draw, RandomSource, ScriptedRandom, SeededRandom};
