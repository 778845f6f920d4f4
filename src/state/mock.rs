use super::model::{Experiment, ExperimentStatus, HistoryRow, MetricsSummary};

/// Hardcoded results shown on the metrics page.
///
/// Nothing here is produced by the simulator; the page is a static showcase.
#[derive(Debug, Clone)]
pub struct MockMetrics {
    pub history: Vec<HistoryRow>,
    pub experiments: Vec<Experiment>,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

impl MockMetrics {
    pub fn new() -> Self {
        let history = [
            (2.45, 2.52, 45.2, 42.1),
            (1.89, 1.98, 58.3, 55.7),
            (1.34, 1.56, 68.9, 64.2),
            (0.98, 1.23, 76.4, 71.8),
            (0.72, 0.98, 82.1, 78.3),
            (0.54, 0.82, 86.5, 82.9),
            (0.41, 0.71, 89.2, 86.1),
            (0.32, 0.64, 91.3, 88.4),
            (0.25, 0.59, 93.1, 90.2),
            (0.19, 0.55, 94.5, 91.8),
        ]
        .into_iter()
        .zip(1..)
        .map(|((train_loss, val_loss, train_acc, val_acc), epoch)| HistoryRow {
            epoch,
            train_loss,
            val_loss,
            train_acc,
            val_acc,
        })
        .collect();

        let experiment = |id, model, accuracy, loss, (h, m, s): (u64, u64, u64), status| {
            Experiment {
                id,
                model,
                accuracy,
                loss,
                duration_secs: h * 3600 + m * 60 + s,
                status,
            }
        };

        let experiments = vec![
            experiment("EXP-001", "Transformer", 94.5, 0.19, (2, 34, 12), ExperimentStatus::Completed),
            experiment("EXP-002", "ResNet-50", 92.1, 0.28, (1, 45, 38), ExperimentStatus::Completed),
            experiment("EXP-003", "LSTM", 87.3, 0.45, (3, 12, 5), ExperimentStatus::Completed),
            experiment("EXP-004", "CNN", 89.8, 0.34, (0, 58, 22), ExperimentStatus::Completed),
            experiment("EXP-005", "MLP", 78.2, 0.67, (0, 23, 45), ExperimentStatus::Failed),
        ];

        Self {
            history,
            experiments,
            precision: 93.2,
            recall: 91.7,
            f1: 92.4,
        }
    }

    /// Aggregates for the overview cards.
    pub fn summary(&self) -> MetricsSummary {
        let best_accuracy = self
            .experiments
            .iter()
            .map(|e| e.accuracy)
            .fold(0.0, f64::max);
        let lowest_loss = self
            .experiments
            .iter()
            .map(|e| e.loss)
            .fold(f64::INFINITY, f64::min);
        let successful = self
            .experiments
            .iter()
            .filter(|e| e.status == ExperimentStatus::Completed)
            .count();
        let total: u64 = self.experiments.iter().map(|e| e.duration_secs).sum();
        let avg_duration_secs = total
            .checked_div(self.experiments.len() as u64)
            .unwrap_or(0);

        MetricsSummary {
            best_accuracy,
            lowest_loss: if lowest_loss.is_finite() { lowest_loss } else { 0.0 },
            total_experiments: self.experiments.len(),
            successful,
            avg_duration_secs,
        }
    }

    /// True when the training loss dropped compared to the previous epoch.
    pub fn improving(&self, index: usize) -> bool {
        index > 0
            && self
                .history
                .get(index)
                .zip(self.history.get(index - 1))
                .map(|(row, prev)| row.train_loss < prev.train_loss)
                .unwrap_or(false)
    }
}

impl Default for MockMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_is_numbered_from_one() {
        let metrics = MockMetrics::new();
        assert_eq!(metrics.history.len(), 10);
        assert_eq!(metrics.history[0].epoch, 1);
        assert_eq!(metrics.history[9].epoch, 10);
    }

    #[test]
    fn summary_aggregates_experiments() {
        let summary = MockMetrics::new().summary();
        assert_eq!(summary.best_accuracy, 94.5);
        assert_eq!(summary.lowest_loss, 0.19);
        assert_eq!(summary.total_experiments, 5);
        assert_eq!(summary.successful, 4);
        // (9252 + 6338 + 11525 + 3502 + 1425) / 5
        assert_eq!(summary.avg_duration_secs, 6408);
    }

    #[test]
    fn empty_summary_does_not_divide_by_zero() {
        let metrics = MockMetrics {
            experiments: Vec::new(),
            ..MockMetrics::new()
        };
        let summary = metrics.summary();
        assert_eq!(summary.avg_duration_secs, 0);
        assert_eq!(summary.lowest_loss, 0.0);
    }

    #[test]
    fn first_epoch_is_baseline() {
        let metrics = MockMetrics::new();
        assert!(!metrics.improving(0));
        assert!(metrics.improving(1));
        assert!(!metrics.improving(99));
    }
}
