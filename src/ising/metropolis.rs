use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use super::analysis::magnetization;
use super::energy::delta_energy;
use super::lattice::{Lattice, Site};
use super::random::RandomSource;
use crate::error::{ConfigError, Result};

/// Attempted flips per site when no explicit step count is given
pub const DEFAULT_SWEEPS: u64 = 1000;

/// `sweeps * size²`, or `None` if that does not fit in a `u64`
pub fn step_budget(sweeps: u64, size: usize) -> Option<u64> {
    let size = size as u64;
    size.checked_mul(size)?.checked_mul(sweeps)
}

/// Parameters of a single Metropolis run.
///
/// Temperature is in units of J/k_B.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    pub temperature: f64,
    pub size: usize,
    pub coupling: f64,
    pub field: f64,
    /// `None` means `1000 * N²`
    pub steps: Option<u64>,
}

impl SimulationConfig {
    pub fn new(temperature: f64, size: usize) -> Self {
        Self {
            temperature,
            size,
            coupling: 1.0,
            field: 0.0,
            steps: None,
        }
    }

    pub fn with_coupling(mut self, coupling: f64) -> Self {
        self.coupling = coupling;
        self
    }

    pub fn with_field(mut self, field: f64) -> Self {
        self.field = field;
        self
    }

    pub fn with_steps(mut self, steps: u64) -> Self {
        self.steps = Some(steps);
        self
    }

    /// Number of single-spin update attempts in a run.
    ///
    /// Saturates at `u64::MAX` when the `1000 * N²` default overflows;
    /// [`SimulationConfig::validate`] rejects such configurations.
    pub fn step_count(&self) -> u64 {
        self.steps
            .unwrap_or_else(|| step_budget(DEFAULT_SWEEPS, self.size).unwrap_or(u64::MAX))
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if !(self.temperature.is_finite() && self.temperature > 0.0) {
            return Err(ConfigError::InvalidTemperature(self.temperature));
        }
        if self.size == 0 {
            return Err(ConfigError::InvalidSize(self.size));
        }
        if !self.coupling.is_finite() {
            return Err(ConfigError::NonFiniteCoupling(self.coupling));
        }
        if !self.field.is_finite() {
            return Err(ConfigError::NonFiniteField(self.field));
        }
        if self.steps.is_none() && step_budget(DEFAULT_SWEEPS, self.size).is_none() {
            return Err(ConfigError::StepBudgetOverflow {
                sweeps: DEFAULT_SWEEPS,
                size: self.size,
            });
        }
        Ok(())
    }
}

/// Final state of a run
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub lattice: Lattice,
    pub magnetization: f64,
    pub accepted: u64,
    pub completed_steps: u64,
    pub cancelled: bool,
}

impl RunOutcome {
    pub fn acceptance_rate(&self) -> f64 {
        if self.completed_steps == 0 {
            return 0.0;
        }
        self.accepted as f64 / self.completed_steps as f64
    }
}

/// Single-spin-flip Metropolis sampler.
///
/// Holds only the validated configuration; the lattice and the random
/// stream are passed in per run, so one engine can drive any number of
/// independent runs on different threads.
#[derive(Debug, Clone)]
pub struct MetropolisEngine {
    config: SimulationConfig,
}

impl MetropolisEngine {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run the full step budget on `lattice`
    pub fn run<R: RandomSource>(&self, lattice: Lattice, random: R) -> Result<RunOutcome> {
        self.run_inner(lattice, random, None, None)
    }

    /// Like [`MetropolisEngine::run`], calling `observe(completed, &lattice)`
    /// after every `interval` steps. An `interval` of 0 never observes.
    ///
    /// The observer only reads the lattice, so the chain is the same one
    /// [`MetropolisEngine::run`] produces from the same stream.
    pub fn run_observed<R, F>(
        &self,
        lattice: Lattice,
        random: R,
        interval: u64,
        mut observe: F,
    ) -> Result<RunOutcome>
    where
        R: RandomSource,
        F: FnMut(u64, &Lattice),
    {
        let observe: &mut dyn FnMut(u64, &Lattice) = &mut observe;
        self.run_inner(lattice, random, None, Some((interval, observe)))
    }

    /// Like [`MetropolisEngine::run`], but stops early once `cancel` is set.
    ///
    /// The flag is polled between steps, so the steps that did run are the
    /// same ones an uncancelled run with the same stream would have made.
    pub fn run_cancellable<R: RandomSource>(
        &self,
        lattice: Lattice,
        random: R,
        cancel: &AtomicBool,
    ) -> Result<RunOutcome> {
        self.run_inner(lattice, random, Some(cancel), None)
    }

    fn run_inner<R: RandomSource>(
        &self,
        mut lattice: Lattice,
        mut random: R,
        cancel: Option<&AtomicBool>,
        mut observer: Option<(u64, &mut dyn FnMut(u64, &Lattice))>,
    ) -> Result<RunOutcome> {
        if lattice.size() != self.config.size {
            return Err(ConfigError::SizeMismatch {
                config: self.config.size,
                lattice: lattice.size(),
            }
            .into());
        }

        let steps = self.config.step_count();
        debug!(
            "Metropolis run: T={}, N={}, J={}, B={}, steps={}",
            self.config.temperature,
            self.config.size,
            self.config.coupling,
            self.config.field,
            steps
        );

        let mut accepted = 0u64;
        let mut completed = 0u64;
        let mut cancelled = false;

        while completed < steps {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                cancelled = true;
                break;
            }
            if self.step(&mut lattice, &mut random)? {
                accepted += 1;
            }
            completed += 1;

            if let Some((interval, observe)) = observer.as_mut() {
                if *interval > 0 && completed % *interval == 0 {
                    (*observe)(completed, &lattice);
                }
            }
        }

        let magnetization = magnetization(&lattice);
        debug!(
            "Metropolis run finished: steps={}, accepted={}, m={:.6}, cancelled={}",
            completed, accepted, magnetization, cancelled
        );

        Ok(RunOutcome {
            lattice,
            magnetization,
            accepted,
            completed_steps: completed,
            cancelled,
        })
    }

    /// One update attempt. Returns whether the flip was accepted.
    fn step<R: RandomSource>(&self, lattice: &mut Lattice, random: &mut R) -> Result<bool> {
        let size = lattice.size();
        let x = random.next_index(size)?;
        let y = random.next_index(size)?;
        let site = Site::new(x, y);

        let delta_e = delta_energy(lattice, site, self.config.coupling, self.config.field);

        let accept = if delta_e < 0.0 {
            true
        } else {
            random.next_unit()? < (-delta_e / self.config.temperature).exp()
        };

        if accept {
            lattice.flip_site(site);
        }
        Ok(accept)
    }
}

/// Validate `config`, then run the Metropolis chain on `lattice`.
///
/// The configuration is checked before the lattice or the random stream is
/// touched. On any error the lattice is dropped; callers that need the
/// starting state afterwards should keep their own copy.
pub fn run<R: RandomSource>(
    config: SimulationConfig,
    lattice: Lattice,
    random: R,
) -> Result<RunOutcome> {
    MetropolisEngine::new(config)?.run(lattice, random)
}
