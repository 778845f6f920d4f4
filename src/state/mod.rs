pub mod controller;
pub mod mock;
pub mod model;
pub mod simulator;
pub mod ticker;

pub use controller::RunController;
pub use model::{format_hms, RunPhase, RunStats, TickOutcome};
pub use simulator::TrainingSimulator;
