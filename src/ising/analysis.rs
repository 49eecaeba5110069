//! Observables and reference values for the 2D Ising model

use super::lattice::Lattice;

/// Magnetization per site, `Σ s / N²`, always in [-1, 1]
pub fn magnetization(lattice: &Lattice) -> f64 {
    lattice.sum() as f64 / lattice.sites() as f64
}

pub fn abs_magnetization(lattice: &Lattice) -> f64 {
    magnetization(lattice).abs()
}

/// Critical temperature for the square-lattice Ising model (exact result)
/// T_c = 2J / (k_B * ln(1 + √2)) ≈ 2.269 J/k_B
pub fn critical_temperature() -> f64 {
    2.0 / (1.0 + 2.0_f64.sqrt()).ln()
}

/// Magnetization at T=0 (all spins aligned)
pub fn magnetization_at_zero_temp() -> f64 {
    1.0
}

/// Energy per site at T=0 with J=1 and no field.
pub fn energy_per_site_at_zero_temp() -> f64 {
    // Each spin has 4 aligned neighbors, E = -J * 4 / 2 = -2J per site
    -2.0
}

fn mean_and_variance(samples: &[f64]) -> (f64, f64) {
    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let mean_sq = samples.iter().map(|v| v * v).sum::<f64>() / n;
    (mean, mean_sq - mean * mean)
}

/// Specific heat per site from a series of total energies.
///
/// Returns 0 when fewer than two samples are given.
pub fn specific_heat(energy_samples: &[f64], temperature: f64, sites: usize) -> f64 {
    if energy_samples.len() < 2 {
        return 0.0;
    }
    let (_, variance) = mean_and_variance(energy_samples);
    variance / (temperature * temperature * sites as f64)
}

/// Magnetic susceptibility per site from a series of total magnetizations.
///
/// Returns 0 when fewer than two samples are given.
pub fn magnetic_susceptibility(magnetization_samples: &[f64], temperature: f64, sites: usize) -> f64 {
    if magnetization_samples.len() < 2 {
        return 0.0;
    }
    let (_, variance) = mean_and_variance(magnetization_samples);
    variance / (temperature * sites as f64)
}
