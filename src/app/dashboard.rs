use crossterm::event::KeyCode;
use ratatui::Frame;
use tokio::runtime::Handle;

use crate::settings::Settings;
use crate::ui::draw;
use crate::ui::screens::{
    metrics::MetricsState,
    picker::{self, PickerAction, ThemePicker},
    train::TrainState,
    Action, Page, Screen,
};
use crate::ui::theme::{ThemeResolver, ThemeSource};

/// Composition root: owns the theme selection, the active page, and the
/// theme picker overlay.
pub struct Dashboard {
    theme: ThemeResolver,
    screen: Screen,
    picker: Option<ThemePicker>,
    runtime: Handle,
    settings: Settings,
}

impl Dashboard {
    pub fn new(runtime: Handle, settings: Settings) -> Self {
        let screen = Screen::Train(TrainState::new(runtime.clone(), settings.clone()));
        Self {
            theme: ThemeResolver::new(),
            screen,
            picker: None,
            runtime,
            settings,
        }
    }

    pub fn theme(&self) -> &ThemeResolver {
        &self.theme
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn page(&self) -> Page {
        self.screen.page()
    }

    pub fn picker_open(&self) -> bool {
        self.picker.is_some()
    }

    /// Called once per frame before drawing.
    pub fn tick(&mut self) {
        self.screen.tick();
    }

    pub fn handle_key(&mut self, key: KeyCode) -> Action {
        if let Some(p) = self.picker.as_mut() {
            match picker::handle_key(p, key) {
                PickerAction::Apply(variant) => {
                    self.theme.set_theme(variant);
                    self.picker = None;
                }
                PickerAction::Close => self.picker = None,
                PickerAction::None => {}
            }
            return Action::None;
        }

        match key {
            KeyCode::F(1) => self.navigate(Page::Train),
            KeyCode::F(2) => self.navigate(Page::Metrics),
            KeyCode::F(3) => self.picker = Some(ThemePicker::new(self.theme.variant())),
            KeyCode::F(10) => return Action::Quit,
            _ => return self.screen.handle_key(key),
        }
        Action::None
    }

    /// Switches pages. The previous page state is dropped, which stops any
    /// run that was in progress on it.
    pub fn navigate(&mut self, page: Page) {
        if self.screen.page() == page {
            return;
        }
        log::info!("navigating to {}", page.label());
        self.screen = match page {
            Page::Train => Screen::Train(TrainState::new(
                self.runtime.clone(),
                self.settings.clone(),
            )),
            Page::Metrics => Screen::Metrics(MetricsState::new()),
        };
    }

    pub fn draw(&self, f: &mut Frame) {
        draw::draw(f, &self.theme, &self.screen, self.picker.as_ref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::ThemeVariant;

    #[tokio::test]
    async fn picker_applies_theme() {
        let mut dash = Dashboard::new(Handle::current(), Settings::default());
        assert_eq!(dash.theme().variant(), ThemeVariant::Minimal);

        dash.handle_key(KeyCode::F(3));
        assert!(dash.picker_open());
        dash.handle_key(KeyCode::Down);
        dash.handle_key(KeyCode::Enter);

        assert!(!dash.picker_open());
        assert_eq!(dash.theme().variant(), ThemeVariant::Dark);
    }

    #[tokio::test]
    async fn picker_swallows_page_keys() {
        let mut dash = Dashboard::new(Handle::current(), Settings::default());
        dash.handle_key(KeyCode::F(3));
        dash.handle_key(KeyCode::F(2));
        assert_eq!(dash.page(), Page::Train);

        dash.handle_key(KeyCode::Esc);
        assert!(!dash.picker_open());
        assert_eq!(dash.theme().variant(), ThemeVariant::Minimal);
    }

    #[tokio::test]
    async fn leaving_the_train_page_drops_the_run() {
        let mut dash = Dashboard::new(Handle::current(), Settings::default());
        // Focus wraps from the dataset field to the run button.
        dash.handle_key(KeyCode::Up);
        dash.handle_key(KeyCode::Enter);
        match dash.screen() {
            Screen::Train(s) => assert!(s.run().is_running()),
            Screen::Metrics(_) => panic!("expected the train page"),
        }

        dash.navigate(Page::Metrics);
        dash.navigate(Page::Train);
        match dash.screen() {
            Screen::Train(s) => {
                assert!(!s.run().is_running());
                assert_eq!(s.run().stats().current_epoch, 0);
            }
            Screen::Metrics(_) => panic!("expected the train page"),
        }
    }

    #[tokio::test]
    async fn theme_survives_navigation() {
        let mut dash = Dashboard::new(Handle::current(), Settings::default());
        dash.handle_key(KeyCode::F(3));
        dash.handle_key(KeyCode::Up);
        dash.handle_key(KeyCode::Enter);
        dash.handle_key(KeyCode::F(2));
        dash.handle_key(KeyCode::F(1));
        assert_eq!(dash.theme().variant(), ThemeVariant::Terminal);
    }

    #[tokio::test]
    async fn page_keys_do_not_quit() {
        let mut dash = Dashboard::new(Handle::current(), Settings::default());
        assert!(matches!(dash.handle_key(KeyCode::Esc), Action::None));
        dash.handle_key(KeyCode::F(2));
        for key in [KeyCode::Esc, KeyCode::Char('q')] {
            assert!(matches!(dash.handle_key(key), Action::None));
        }
        assert_eq!(dash.page(), Page::Metrics);
    }

    #[tokio::test]
    async fn f10_quits_from_any_page() {
        let mut dash = Dashboard::new(Handle::current(), Settings::default());
        assert!(matches!(dash.handle_key(KeyCode::F(10)), Action::Quit));
        dash.handle_key(KeyCode::F(2));
        assert!(matches!(dash.handle_key(KeyCode::F(10)), Action::Quit));
    }
}
