use std::num::NonZeroU32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelKind {
    #[default]
    Transformer,
    Cnn,
    Rnn,
    Mlp,
    ResNet,
}

impl ModelKind {
    pub const ALL: [ModelKind; 5] = [
        ModelKind::Transformer,
        ModelKind::Cnn,
        ModelKind::Rnn,
        ModelKind::Mlp,
        ModelKind::ResNet,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ModelKind::Transformer => "Transformer",
            ModelKind::Cnn => "CNN",
            ModelKind::Rnn => "RNN / LSTM",
            ModelKind::Mlp => "MLP",
            ModelKind::ResNet => "ResNet",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn previous(self) -> Self {
        cycle(&Self::ALL, self, Self::ALL.len() - 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptimizerKind {
    #[default]
    Adam,
    Sgd,
    RmsProp,
    AdamW,
}

impl OptimizerKind {
    pub const ALL: [OptimizerKind; 4] = [
        OptimizerKind::Adam,
        OptimizerKind::Sgd,
        OptimizerKind::RmsProp,
        OptimizerKind::AdamW,
    ];

    pub fn label(self) -> &'static str {
        match self {
            OptimizerKind::Adam => "Adam",
            OptimizerKind::Sgd => "SGD",
            OptimizerKind::RmsProp => "RMSprop",
            OptimizerKind::AdamW => "AdamW",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn previous(self) -> Self {
        cycle(&Self::ALL, self, Self::ALL.len() - 1)
    }
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: T, step: usize) -> T {
    let idx = all.iter().position(|v| *v == current).unwrap_or(0);
    all[(idx + step) % all.len()]
}

/// Training form as typed by the user.
///
/// Numeric fields stay free-form text until [`super::builder::build`] runs.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingDraft {
    pub model: ModelKind,
    pub epochs: String,
    pub batch_size: String,
    pub learning_rate: String,
    pub optimizer: OptimizerKind,
    pub train_split: String,
    pub dataset_path: String,
}

impl Default for TrainingDraft {
    fn default() -> Self {
        Self {
            model: ModelKind::Transformer,
            epochs: "100".into(),
            batch_size: "32".into(),
            learning_rate: "0.001".into(),
            optimizer: OptimizerKind::Adam,
            train_split: "80".into(),
            dataset_path: String::new(),
        }
    }
}

/// Validated run configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingConfig {
    pub model: ModelKind,
    pub epochs: NonZeroU32,
    pub batch_size: NonZeroU32,
    pub learning_rate: f64,
    pub optimizer: OptimizerKind,
    /// Percentage of the dataset used for training, in `[50, 95]`.
    pub train_split: u8,
}

const DEFAULT_BATCH_SIZE: NonZeroU32 = match NonZeroU32::new(32) {
    Some(n) => n,
    None => panic!("batch size must be non-zero"),
};

impl TrainingConfig {
    /// Shorthand used by tests and demos: defaults with a given epoch count.
    pub fn with_epochs(epochs: NonZeroU32) -> Self {
        Self {
            model: ModelKind::default(),
            epochs,
            batch_size: DEFAULT_BATCH_SIZE,
            learning_rate: 0.001,
            optimizer: OptimizerKind::default(),
            train_split: 80,
        }
    }
}

/// Metadata of a selected dataset. The content is never read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetFile {
    pub name: String,
    pub size_bytes: u64,
}

impl DatasetFile {
    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / 1024.0 / 1024.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_cycle() {
        assert_eq!(ModelKind::ResNet.next(), ModelKind::Transformer);
        assert_eq!(ModelKind::Transformer.previous(), ModelKind::ResNet);
        assert_eq!(OptimizerKind::AdamW.next(), OptimizerKind::Adam);
        assert_eq!(OptimizerKind::Sgd.previous(), OptimizerKind::Adam);
    }

    #[test]
    fn with_epochs_keeps_form_defaults() {
        let config = TrainingConfig::with_epochs(NonZeroU32::new(7).unwrap());
        assert_eq!(config.epochs.get(), 7);
        assert_eq!(config.batch_size.get(), 32);
        assert_eq!(config.train_split, 80);
    }

    #[test]
    fn size_in_megabytes() {
        let file = DatasetFile {
            name: "train.csv".into(),
            size_bytes: 3 * 1024 * 1024 / 2,
        };
        assert!((file.size_mb() - 1.5).abs() < f64::EPSILON);
    }
}
