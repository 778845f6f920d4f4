use std::time::Duration;

use tokio::{runtime::Handle, sync::mpsc};

use crate::config::TrainingConfig;
use crate::error::RunError;
use crate::settings::Settings;

use super::model::{LogLine, RunPhase, RunStats, TickOutcome};
use super::simulator::TrainingSimulator;
use super::ticker::Ticker;

const MAX_LOGS: usize = 200;

/// Owns a [`TrainingSimulator`] together with the timer that drives it.
///
/// Ticks arrive over a channel and are applied by [`pump`](Self::pump) on the
/// caller's thread, so the simulator is only ever mutated by its owner. Each
/// run gets a new generation; ticks left over from a cancelled or finished
/// run are dropped.
pub struct RunController {
    runtime: Handle,
    period: Duration,
    simulator: TrainingSimulator,
    ticks_tx: mpsc::UnboundedSender<u64>,
    ticks_rx: mpsc::UnboundedReceiver<u64>,
    ticker: Option<Ticker>,
    generation: u64,
    logs: Vec<LogLine>,
}

impl RunController {
    pub fn new(runtime: Handle, settings: &Settings) -> Self {
        Self::with_simulator(runtime, settings, TrainingSimulator::new(settings))
    }

    pub fn with_simulator(
        runtime: Handle,
        settings: &Settings,
        simulator: TrainingSimulator,
    ) -> Self {
        let (ticks_tx, ticks_rx) = mpsc::unbounded_channel();
        Self {
            runtime,
            period: settings.tick_period(),
            simulator,
            ticks_tx,
            ticks_rx,
            ticker: None,
            generation: 0,
            logs: Vec::new(),
        }
    }

    pub fn phase(&self) -> RunPhase {
        self.simulator.phase()
    }

    pub fn is_running(&self) -> bool {
        self.simulator.is_running()
    }

    pub fn stats(&self) -> &RunStats {
        self.simulator.stats()
    }

    pub fn logs(&self) -> &[LogLine] {
        &self.logs
    }

    /// Starts a new run and its ticker.
    ///
    /// # Errors
    /// Returns [`RunError::AlreadyRunning`] if a run is in progress.
    pub fn start(&mut self, config: &TrainingConfig) -> Result<(), RunError> {
        self.simulator.start(config)?;

        self.generation += 1;
        self.ticker = Some(Ticker::spawn(
            &self.runtime,
            self.period,
            self.generation,
            self.ticks_tx.clone(),
        ));

        log::info!(
            "run {} started: model={} optimizer={} epochs={} batch_size={} lr={} split={}",
            self.generation,
            config.model.label(),
            config.optimizer.label(),
            config.epochs,
            config.batch_size,
            config.learning_rate,
            config.train_split
        );
        self.push_log(
            "INFO",
            format!(
                "run {} started: {} / {}, {} epochs",
                self.generation,
                config.model.label(),
                config.optimizer.label(),
                config.epochs
            ),
        );
        Ok(())
    }

    /// Aborts the active run. Returns false if nothing was running.
    pub fn cancel(&mut self) -> bool {
        if !self.simulator.cancel() {
            return false;
        }
        self.ticker = None;

        let stats = self.simulator.stats();
        let message = format!(
            "run {} cancelled at epoch {}/{}",
            self.generation, stats.current_epoch, stats.total_epochs
        );
        log::warn!("{message}");
        self.push_log("WARN", message);
        true
    }

    /// Applies every tick received so far without blocking.
    ///
    /// Should be called once per UI frame. Returns the number of ticks applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;

        while let Ok(generation) = self.ticks_rx.try_recv() {
            let current = self.ticker.as_ref().map(Ticker::generation);
            if current != Some(generation) {
                log::trace!("dropping stale tick from run {generation}");
                continue;
            }

            applied += 1;
            if self.simulator.tick() == TickOutcome::Finished {
                self.ticker = None;

                let stats = self.simulator.stats();
                let message = format!(
                    "run {} finished: loss={:.4} accuracy={:.1}% in {}",
                    self.generation,
                    stats.loss,
                    stats.accuracy,
                    stats.elapsed()
                );
                log::info!("{message}");
                self.push_log("INFO", message);
            }
        }

        applied
    }

    /// Appends a line to the event panel, keeping the newest [`MAX_LOGS`].
    pub fn push_log(&mut self, level: &'static str, message: String) {
        self.logs.push(LogLine { level, message });
        if self.logs.len() > MAX_LOGS {
            let drain = self.logs.len() - MAX_LOGS;
            self.logs.drain(0..drain);
        }
    }
}

impl Drop for RunController {
    fn drop(&mut self) {
        if self.ticker.is_some() {
            log::info!("run {} released before completion", self.generation);
        }
    }
}
