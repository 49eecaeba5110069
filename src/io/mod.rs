//! Input/Output for sweep runs
//!
//! Logging setup and plain-text result files.

mod output;

pub use output::{save_results, setup_output};
