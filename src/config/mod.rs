pub mod builder;
pub mod dataset;
pub mod model;

pub use builder::build;
pub use model::{DatasetFile, ModelKind, OptimizerKind, TrainingConfig, TrainingDraft};
