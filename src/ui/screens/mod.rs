pub mod metrics;
pub mod picker;
pub mod train;

use crossterm::event::KeyCode;
use ratatui::{layout::Rect, Frame};

use super::theme::ThemeConfig;

pub enum Action {
    None,
    Quit,
}

/// Navigable pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Train,
    Metrics,
}

impl Page {
    pub const ALL: [Page; 2] = [Page::Train, Page::Metrics];

    pub fn label(self) -> &'static str {
        match self {
            Page::Train => "Upload & Train",
            Page::Metrics => "Metrics",
        }
    }
}

pub enum Screen {
    Train(train::TrainState),
    Metrics(metrics::MetricsState),
}

impl Screen {
    pub fn page(&self) -> Page {
        match self {
            Screen::Train(_) => Page::Train,
            Screen::Metrics(_) => Page::Metrics,
        }
    }

    pub fn draw(&self, f: &mut Frame, area: Rect, theme: &ThemeConfig) {
        match self {
            Screen::Train(s) => train::draw(f, area, theme, s),
            Screen::Metrics(s) => metrics::draw(f, area, theme, s),
        }
    }

    pub fn handle_key(&mut self, key: KeyCode) -> Action {
        match self {
            Screen::Train(s) => train::handle_key(s, key),
            Screen::Metrics(s) => metrics::handle_key(s, key),
        }
    }

    /// Per-frame housekeeping.
    pub fn tick(&mut self) {
        if let Screen::Train(s) = self {
            s.pump();
        }
    }
}
