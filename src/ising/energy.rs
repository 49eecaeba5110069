use super::lattice::{Lattice, Site};
use super::neighbors::neighbors;

/// Energy change that flipping the spin at `site` would cause, without
/// touching the lattice.
///
/// The site contributes `-J s Σ s_n - B s`; flipping `s` reverses that
/// contribution, so ΔE = 2 B s + 2 J s Σ s_n.
pub fn delta_energy(lattice: &Lattice, site: Site, coupling: f64, field: f64) -> f64 {
    let spin = lattice.spin(site) as f64;
    let neighbor_sum: f64 = neighbors(site, lattice.size())
        .iter()
        .map(|&n| lattice.spin(n) as f64)
        .sum();

    2.0 * field * spin + 2.0 * coupling * spin * neighbor_sum
}

/// Total energy `-J Σ<ij> s_i s_j - B Σ s_i`.
///
/// Each bond is counted once, through the right and down neighbours.
pub fn total_energy(lattice: &Lattice, coupling: f64, field: f64) -> f64 {
    let size = lattice.size() as isize;
    let mut energy = 0.0;

    for x in 0..size {
        for y in 0..size {
            let spin = lattice.get(x, y) as f64;
            let right = lattice.get(x, y + 1) as f64;
            let down = lattice.get(x + 1, y) as f64;

            energy -= coupling * spin * (right + down);
            energy -= field * spin;
        }
    }

    energy
}

pub fn energy_per_site(lattice: &Lattice, coupling: f64, field: f64) -> f64 {
    total_energy(lattice, coupling, field) / lattice.sites() as f64
}
