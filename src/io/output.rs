//! Output formatting and logging utilities

use color_eyre::eyre::{Result, WrapErr};
use ising_mc::SweepPoint;
use std::fmt;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime as StdSystemTime;
use tracing::info;
use tracing_subscriber::{
    fmt::format::Writer, fmt::layer, fmt::time::FormatTime, layer::SubscriberExt,
    util::SubscriberInitExt, EnvFilter, Registry,
};

/// Custom time formatter that shows only seconds
struct SecondPrecisionTimer;

impl FormatTime for SecondPrecisionTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        let now = StdSystemTime::now();
        let duration = now
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default();

        // HH:MM:SS
        let total_seconds = duration.as_secs();
        let hours = (total_seconds / 3600) % 24;
        let minutes = (total_seconds / 60) % 60;
        let seconds = total_seconds % 60;

        write!(w, "{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Setup log output to a file or stdout
pub fn setup_output(log_path: Option<&String>) {
    match log_path {
        Some(path) => match File::create(path) {
            Ok(log) => {
                let file_layer = layer()
                    .with_writer(Mutex::new(log))
                    .with_timer(SecondPrecisionTimer)
                    .with_ansi(false);
                Registry::default()
                    .with(env_filter())
                    .with(file_layer)
                    .init();
                info!("Log output will be written to: {}", path);
            }
            Err(err) => {
                eprintln!("Could not create log file {}: {}", path, err);
            }
        },
        None => {
            let stdout_layer = layer()
                .with_writer(std::io::stdout)
                .with_timer(SecondPrecisionTimer)
                .with_ansi(true);
            Registry::default()
                .with(env_filter())
                .with(stdout_layer)
                .init();
        }
    }
}

/// Write one tab-separated line per temperature point
pub fn write_summary<W: Write>(writer: &mut W, points: &[SweepPoint]) -> Result<()> {
    writeln!(writer, "T\tm\t|m|\tE/site\tacceptance\tC\tchi")?;
    for p in points {
        writeln!(
            writer,
            "{:.6}\t{:.6}\t{:.6}\t{:.6}\t{:.6}\t{}\t{}",
            p.temperature,
            p.magnetization,
            p.abs_magnetization,
            p.energy_per_site,
            p.acceptance_rate,
            optional(p.specific_heat),
            optional(p.susceptibility)
        )?;
    }
    Ok(())
}

/// Sampled observables, or `-` when sampling was off
fn optional(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.6}", v))
}

pub fn lattice_file_name(index: usize, temperature: f64) -> String {
    format!("lattice_{:02}_T{:.3}.txt", index, temperature)
}

/// Write `summary.tsv` and one row-major lattice file per point into `dir`
pub fn save_results(dir: &Path, points: &[SweepPoint]) -> Result<()> {
    fs::create_dir_all(dir)
        .wrap_err_with(|| format!("Unable to create output directory: {}", dir.display()))?;

    let summary_path = dir.join("summary.tsv");
    let mut summary = File::create(&summary_path)
        .wrap_err_with(|| format!("Unable to create {}", summary_path.display()))?;
    write_summary(&mut summary, points)?;

    for (index, point) in points.iter().enumerate() {
        let path = dir.join(lattice_file_name(index, point.temperature));
        fs::write(&path, point.lattice.to_string())
            .wrap_err_with(|| format!("Unable to write {}", path.display()))?;
    }

    info!("Results written to: {}", dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ising_mc::Lattice;

    fn point(temperature: f64) -> SweepPoint {
        let lattice = Lattice::from_row_major(2, vec![1, 1, -1, 1]).unwrap();
        SweepPoint {
            temperature,
            magnetization: 0.5,
            abs_magnetization: 0.5,
            energy_per_site: 0.0,
            acceptance_rate: 0.25,
            specific_heat: None,
            susceptibility: Some(0.125),
            lattice,
        }
    }

    #[test]
    fn test_summary_format() {
        let mut buf = Vec::new();
        write_summary(&mut buf, &[point(1.0)]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "1.000000\t0.500000\t0.500000\t0.000000\t0.250000\t-\t0.125000");
    }

    #[test]
    fn test_save_results() {
        let dir = tempfile::tempdir().unwrap();
        save_results(dir.path(), &[point(0.5), point(2.0)]).unwrap();

        let summary = fs::read_to_string(dir.path().join("summary.tsv")).unwrap();
        assert_eq!(summary.lines().count(), 3);

        let lattice = fs::read_to_string(dir.path().join(lattice_file_name(1, 2.0))).unwrap();
        assert_eq!(lattice, "1 1\n-1 1\n");
    }
}
