use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::config::TrainingConfig;
use crate::error::RunError;
use crate::settings::Settings;

use super::model::{RunPhase, RunStats, TickOutcome};

const START_LOSS: f64 = 2.5;
const LOSS_DROP: f64 = 2.3;
const MIN_LOSS: f64 = 0.01;

const START_ACCURACY: f64 = 50.0;
const ACCURACY_GAIN: f64 = 45.0;
const MAX_ACCURACY: f64 = 99.0;

/// Synthetic training run.
///
/// Each [`tick`](Self::tick) advances one epoch and derives a plausible loss,
/// accuracy and timing from the fraction of epochs done. Nothing is trained.
#[derive(Debug)]
pub struct TrainingSimulator<R = StdRng> {
    phase: RunPhase,
    stats: RunStats,
    seconds_per_epoch: u64,
    loss_jitter: f64,
    accuracy_jitter: f64,
    rng: R,
}

impl TrainingSimulator<StdRng> {
    /// Creates an idle simulator seeded from the OS.
    pub fn new(settings: &Settings) -> Self {
        Self::with_rng(settings, StdRng::from_os_rng())
    }

    /// Creates an idle simulator with reproducible noise.
    pub fn seeded(settings: &Settings, seed: u64) -> Self {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> TrainingSimulator<R> {
    pub fn with_rng(settings: &Settings, rng: R) -> Self {
        Self {
            phase: RunPhase::Idle,
            stats: RunStats::default(),
            seconds_per_epoch: settings.seconds_per_epoch,
            loss_jitter: settings.loss_jitter.max(0.0),
            accuracy_jitter: settings.accuracy_jitter.max(0.0),
            rng,
        }
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Begins a fresh run, discarding the figures of any previous one.
    ///
    /// # Errors
    /// Returns [`RunError::AlreadyRunning`] unless the simulator is idle.
    pub fn start(&mut self, config: &TrainingConfig) -> Result<(), RunError> {
        if self.is_running() {
            return Err(RunError::AlreadyRunning);
        }

        let total = config.epochs.get();
        self.stats = RunStats {
            current_epoch: 0,
            total_epochs: total,
            loss: START_LOSS,
            accuracy: START_ACCURACY,
            elapsed_secs: 0,
            eta_secs: Some(u64::from(total).saturating_mul(self.seconds_per_epoch)),
        };
        self.phase = RunPhase::Running;
        Ok(())
    }

    /// Advances the run by one epoch.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::Ignored;
        }

        let total = self.stats.total_epochs;
        let current = (self.stats.current_epoch + 1).min(total);
        let done = f64::from(current) / f64::from(total);

        let loss_noise = self.rng.random::<f64>() * self.loss_jitter;
        let accuracy_noise = self.rng.random::<f64>() * self.accuracy_jitter;

        self.stats.current_epoch = current;
        self.stats.loss = (START_LOSS - done * LOSS_DROP + loss_noise).max(MIN_LOSS);
        self.stats.accuracy =
            (START_ACCURACY + done * ACCURACY_GAIN + accuracy_noise).min(MAX_ACCURACY);
        self.stats.elapsed_secs = u64::from(current).saturating_mul(self.seconds_per_epoch);
        self.stats.eta_secs =
            Some(u64::from(total - current).saturating_mul(self.seconds_per_epoch));

        if current >= total {
            self.phase = RunPhase::Idle;
            TickOutcome::Finished
        } else {
            TickOutcome::Advanced
        }
    }

    /// Stops a running run, keeping its figures. Returns false if idle.
    pub fn cancel(&mut self) -> bool {
        let was_running = self.is_running();
        self.phase = RunPhase::Idle;
        was_running
    }
}
