//! Ising sweep command-line interface
//!
//! Runs one Metropolis simulation per temperature and reports the final
//! magnetization of each, optionally saving spin configurations to disk.

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use std::fs;
use std::path::Path;
use tracing::info;

mod io;

use io::{save_results, setup_output};
use ising_mc::config::{Args, SweepConfig};
use ising_mc::sweep::{mean_abs_magnetization, run_sweep};

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    setup_output(args.log_file.as_ref());

    let file_config = match args.config_file {
        Some(ref path) => {
            info!("Reading configuration from: {}", path);
            let content = fs::read_to_string(path)
                .wrap_err_with(|| format!("Unable to read configuration file: {}", path))?;
            SweepConfig::from_yaml(&content).wrap_err("Failed to parse configuration file")?
        }
        None => SweepConfig::default(),
    };
    let config = args.apply(file_config);
    info!("Configuration loaded:\n{:?}", config);

    let plan = config.plan().wrap_err("Invalid sweep configuration")?;
    let points = run_sweep(&plan).wrap_err("Sweep failed")?;

    info!("Mean |m| over sweep: {:.5}", mean_abs_magnetization(&points));

    if let Some(ref dir) = config.output_dir {
        save_results(Path::new(dir), &points)?;
    }

    Ok(())
}
