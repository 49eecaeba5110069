use std::fmt;

use itertools::Itertools;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, IsingError, Result};

/// A lattice coordinate, already reduced into `[0, N)` on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Site {
    pub x: usize,
    pub y: usize,
}

impl Site {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// How the spins of a fresh lattice are chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InitialState {
    /// Every spin +1 (ordered state)
    #[default]
    Uniform,
    /// Each spin independently ±1 with probability 1/2
    Random,
}

/// N x N grid of Ising spins with periodic boundaries.
///
/// Spins are stored row-major: site `(x, y)` lives at `x * N + y`.
/// Every stored value is exactly -1 or +1; the only mutation is [`Lattice::flip`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lattice {
    size: usize,
    spins: Vec<i8>,
}

impl Lattice {
    /// Create a lattice with all spins up
    pub fn uniform(size: usize) -> Result<Self> {
        Self::check_size(size)?;
        Ok(Self {
            size,
            spins: vec![1; size * size],
        })
    }

    /// Create a lattice with independently random spins
    pub fn random<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Self> {
        Self::check_size(size)?;
        let spins = (0..size * size)
            .map(|_| if rng.gen_bool(0.5) { 1 } else { -1 })
            .collect();
        Ok(Self { size, spins })
    }

    pub fn with_initial_state<R: Rng + ?Sized>(
        size: usize,
        initial: InitialState,
        rng: &mut R,
    ) -> Result<Self> {
        match initial {
            InitialState::Uniform => Self::uniform(size),
            InitialState::Random => Self::random(size, rng),
        }
    }

    /// Rebuild a lattice from `N²` row-major spin values
    pub fn from_row_major(size: usize, values: Vec<i8>) -> Result<Self> {
        Self::check_size(size)?;
        if values.len() != size * size {
            return Err(IsingError::LatticeShape {
                expected: size * size,
                actual: values.len(),
            });
        }
        if let Some((index, &value)) = values.iter().find_position(|&&s| s != 1 && s != -1) {
            return Err(IsingError::InvalidSpin { index, value });
        }
        Ok(Self {
            size,
            spins: values,
        })
    }

    fn check_size(size: usize) -> Result<()> {
        if size == 0 {
            return Err(ConfigError::InvalidSize(size).into());
        }
        Ok(())
    }

    /// Linear size N
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of sites, N²
    pub fn sites(&self) -> usize {
        self.spins.len()
    }

    /// Reduce arbitrary (possibly negative) coordinates onto the torus
    pub fn wrap(&self, x: isize, y: isize) -> Site {
        let n = self.size as isize;
        Site::new(x.rem_euclid(n) as usize, y.rem_euclid(n) as usize)
    }

    /// Spin at `(x, y)` with periodic wraparound
    pub fn get(&self, x: isize, y: isize) -> i8 {
        self.spin(self.wrap(x, y))
    }

    /// Negate the spin at `(x, y)` with periodic wraparound
    pub fn flip(&mut self, x: isize, y: isize) {
        let site = self.wrap(x, y);
        self.flip_site(site);
    }

    /// Spin at an already-reduced site. Panics if the site is outside the lattice.
    pub fn spin(&self, site: Site) -> i8 {
        self.spins[self.index(site)]
    }

    pub fn flip_site(&mut self, site: Site) {
        let idx = self.index(site);
        self.spins[idx] = -self.spins[idx];
    }

    fn index(&self, site: Site) -> usize {
        assert!(
            site.x < self.size && site.y < self.size,
            "site ({}, {}) outside {}x{} lattice",
            site.x,
            site.y,
            self.size,
            self.size
        );
        site.x * self.size + site.y
    }

    /// Sum of all spins
    pub fn sum(&self) -> i64 {
        self.spins.iter().map(|&s| s as i64).sum()
    }

    /// Spins in row-major order
    pub fn to_row_major(&self) -> Vec<i8> {
        self.spins.clone()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[i8]> {
        self.spins.chunks(self.size)
    }
}

impl fmt::Display for Lattice {
    /// One row per line, spins separated by single spaces
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            writeln!(f, "{}", row.iter().join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_zero_size_rejected() {
        assert_eq!(
            Lattice::uniform(0),
            Err(IsingError::InvalidConfiguration(ConfigError::InvalidSize(0)))
        );
    }

    #[test]
    fn test_wraparound_access() {
        let mut lattice = Lattice::uniform(3).unwrap();
        lattice.flip(-1, 0);
        assert_eq!(lattice.spin(Site::new(2, 0)), -1);
        assert_eq!(lattice.get(2, 0), -1);
        assert_eq!(lattice.get(5, 3), -1);
        assert_eq!(lattice.get(-4, -3), -1);
        assert_eq!(lattice.get(1, -1), 1);
        assert_eq!(lattice.sum(), 7);
    }

    #[test]
    fn test_flip_twice_restores() {
        let mut lattice = Lattice::uniform(4).unwrap();
        lattice.flip(1, 2);
        lattice.flip(1, 2);
        assert_eq!(lattice, Lattice::uniform(4).unwrap());
    }

    #[test]
    fn test_random_spins_are_valid() {
        let mut rng = StdRng::seed_from_u64(7);
        let lattice = Lattice::random(16, &mut rng).unwrap();
        assert!(lattice.to_row_major().iter().all(|&s| s == 1 || s == -1));
        assert!(lattice.sum().abs() < 256);
    }

    #[test]
    fn test_row_major_validation() {
        assert_eq!(
            Lattice::from_row_major(2, vec![1, -1, 0, 1]),
            Err(IsingError::InvalidSpin { index: 2, value: 0 })
        );
        assert_eq!(
            Lattice::from_row_major(2, vec![1, -1, 1]),
            Err(IsingError::LatticeShape {
                expected: 4,
                actual: 3
            })
        );
        let lattice = Lattice::from_row_major(2, vec![1, -1, -1, 1]).unwrap();
        assert_eq!(lattice.get(0, 1), -1);
        assert_eq!(lattice.get(1, 0), -1);
    }

    #[test]
    fn test_display_rows() {
        let lattice = Lattice::from_row_major(2, vec![1, -1, -1, 1]).unwrap();
        assert_eq!(lattice.to_string(), "1 -1\n-1 1\n");
    }
}
