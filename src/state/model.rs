/// Lifecycle of the training simulator. `Idle` is both the initial and the
/// resting state after a run, so a finished run can be restarted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunPhase {
    #[default]
    Idle,
    Running,
}

/// What a single tick did to the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The epoch counter moved forward and the run continues.
    Advanced,
    /// The last epoch was reached; the simulator is back to `Idle`.
    Finished,
    /// No run was active, nothing changed.
    Ignored,
}

/// Live statistics of the current (or last) run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunStats {
    pub current_epoch: u32,
    pub total_epochs: u32,
    pub loss: f64,
    /// Percentage in `[0, 99]`.
    pub accuracy: f64,
    pub elapsed_secs: u64,
    /// `None` until a run has been started.
    pub eta_secs: Option<u64>,
}

impl RunStats {
    /// Completion percentage, clamped to `[0, 100]`.
    pub fn progress(&self) -> f64 {
        if self.total_epochs == 0 {
            return 0.0;
        }
        (f64::from(self.current_epoch) / f64::from(self.total_epochs) * 100.0).clamp(0.0, 100.0)
    }

    pub fn elapsed(&self) -> String {
        format_hms(self.elapsed_secs)
    }

    pub fn eta(&self) -> String {
        self.eta_secs
            .map(format_hms)
            .unwrap_or_else(|| "--:--:--".to_string())
    }
}

/// Formats seconds as zero-padded `HH:MM:SS`. Hours are not wrapped at 24.
pub fn format_hms(seconds: u64) -> String {
    let h = seconds / 3600;
    let m = (seconds % 3600) / 60;
    let s = seconds % 60;
    format!("{h:02}:{m:02}:{s:02}")
}

/// A single entry of the event panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub level: &'static str,
    pub message: String,
}

/// One epoch of the recorded training history on the metrics page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryRow {
    pub epoch: u32,
    pub train_loss: f64,
    pub val_loss: f64,
    pub train_acc: f64,
    pub val_acc: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperimentStatus {
    Completed,
    Failed,
}

/// A past experiment listed on the metrics page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Experiment {
    pub id: &'static str,
    pub model: &'static str,
    pub accuracy: f64,
    pub loss: f64,
    pub duration_secs: u64,
    pub status: ExperimentStatus,
}

/// Aggregates shown on the metrics overview cards.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSummary {
    pub best_accuracy: f64,
    pub lowest_loss: f64,
    pub total_experiments: usize,
    pub successful: usize,
    pub avg_duration_secs: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hms_formatting() {
        assert_eq!(format_hms(0), "00:00:00");
        assert_eq!(format_hms(59), "00:00:59");
        assert_eq!(format_hms(3661), "01:01:01");
        assert_eq!(format_hms(100 * 3600 + 5), "100:00:05");
    }

    #[test]
    fn fresh_stats_render_placeholders() {
        let stats = RunStats::default();
        assert_eq!(stats.progress(), 0.0);
        assert_eq!(stats.elapsed(), "00:00:00");
        assert_eq!(stats.eta(), "--:--:--");
    }

    #[test]
    fn progress_is_clamped() {
        let stats = RunStats {
            current_epoch: 12,
            total_epochs: 10,
            ..RunStats::default()
        };
        assert_eq!(stats.progress(), 100.0);
    }
}
