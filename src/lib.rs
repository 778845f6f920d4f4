pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod settings;
pub mod state;
pub mod ui;
