use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::runtime;

use crate::logging;
use crate::settings::Settings;
use crate::ui::screens::Action;

use super::dashboard::Dashboard;

const FRAME_POLL: Duration = Duration::from_millis(30);

struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Runs the dashboard until the user quits.
///
/// # Errors
/// Returns an error if settings are invalid, or if terminal setup or
/// rendering fails.
pub fn run() -> Result<()> {
    logging::init()?;
    let settings = Settings::load()?;

    // The timer task is the only thing scheduled on the runtime.
    let runtime = runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("dashboard-ticker")
        .enable_time()
        .build()
        .context("cannot start the timer runtime")?;

    log::info!(
        "dashboard starting (tick {} ms, {} s per epoch)",
        settings.tick_ms,
        settings.seconds_per_epoch
    );

    let _guard = TerminalGuard::enter()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut dashboard = Dashboard::new(runtime.handle().clone(), settings);

    loop {
        dashboard.tick();
        terminal.draw(|f| dashboard.draw(f))?;

        if event::poll(FRAME_POLL)? {
            if let Event::Key(k) = event::read()? {
                if k.kind != KeyEventKind::Press {
                    continue;
                }
                if let Action::Quit = dashboard.handle_key(k.code) {
                    break;
                }
            }
        }
    }

    drop(dashboard);
    terminal.show_cursor()?;
    log::info!("dashboard stopped");
    Ok(())
}
