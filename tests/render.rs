use crossterm::event::KeyCode;
use ratatui::{backend::TestBackend, Terminal};
use tokio::runtime::Handle;

use training_dashboard::app::dashboard::Dashboard;
use training_dashboard::settings::Settings;
use training_dashboard::ui::screens::Page;
use training_dashboard::ui::theme::{LabelStyle, ThemeSource, ThemeVariant};

const WIDTH: u16 = 140;
const HEIGHT: u16 = 45;

fn render(dash: &Dashboard) -> String {
    let mut terminal = Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap();
    terminal.draw(|f| dash.draw(f)).unwrap();
    terminal
        .backend()
        .buffer()
        .content
        .iter()
        .map(|c| c.symbol())
        .collect()
}

fn dashboard_with(variant: ThemeVariant) -> Dashboard {
    let mut dash = Dashboard::new(Handle::current(), Settings::default());
    dash.handle_key(KeyCode::F(3));
    for _ in 0..variant.position() {
        dash.handle_key(KeyCode::Down);
    }
    dash.handle_key(KeyCode::Enter);
    assert_eq!(dash.theme().variant(), variant);
    dash
}

#[tokio::test]
async fn every_theme_renders_both_pages() {
    for variant in ThemeVariant::ALL {
        let config = variant.config();
        let mut dash = dashboard_with(variant);

        let train = render(&dash);
        assert!(train.contains(config.name), "{}: theme name missing", variant.id());
        assert!(
            train.contains(&config.heading("Data Upload")),
            "{}: upload card missing",
            variant.id()
        );
        assert!(
            train.contains(&config.heading("Live Statistics")),
            "{}: statistics missing",
            variant.id()
        );

        dash.handle_key(KeyCode::F(2));
        assert_eq!(dash.page(), Page::Metrics);
        let metrics = render(&dash);
        assert!(
            metrics.contains(&config.heading("Model Quality")),
            "{}: quality card missing",
            variant.id()
        );

        dash.handle_key(KeyCode::Char('2'));
        let history = render(&dash);
        assert!(
            history.contains(&config.heading("Epoch History")),
            "{}: history table missing",
            variant.id()
        );

        dash.handle_key(KeyCode::Char('3'));
        let experiments = render(&dash);
        assert!(experiments.contains("EXP-001"), "{}", variant.id());
        assert!(experiments.contains("EXP-005"), "{}", variant.id());
    }
}

#[tokio::test]
async fn terminal_theme_uses_shell_labels() {
    let dash = dashboard_with(ThemeVariant::Terminal);
    assert_eq!(ThemeVariant::Terminal.config().labels, LabelStyle::Shell);

    let screen = render(&dash);
    assert!(screen.contains("> ML_TRAINING_SYS"));
    assert!(screen.contains("> EXECUTE_TRAINING"));
    assert!(screen.contains("STATUS: OPERATIONAL"));
}

#[tokio::test]
async fn picker_overlay_lists_all_themes() {
    let mut dash = Dashboard::new(Handle::current(), Settings::default());
    dash.handle_key(KeyCode::F(3));
    let screen = render(&dash);
    for variant in ThemeVariant::ALL {
        assert!(
            screen.contains(variant.config().name),
            "{} missing from picker",
            variant.config().name
        );
    }
}

#[tokio::test]
async fn running_page_shows_progress() {
    let mut dash = Dashboard::new(Handle::current(), Settings::default());
    dash.handle_key(KeyCode::Up);
    dash.handle_key(KeyCode::Enter);

    let screen = render(&dash);
    assert!(screen.contains("Training Progress"));
    assert!(screen.contains("Epoch 0 / 100"));
    assert!(screen.contains("00:05:00"));
}

#[tokio::test]
async fn invalid_form_shows_error_bar() {
    let mut dash = Dashboard::new(Handle::current(), Settings::default());
    // Dataset -> Model -> Optimizer -> Epochs.
    for _ in 0..3 {
        dash.handle_key(KeyCode::Down);
    }
    for _ in 0..3 {
        dash.handle_key(KeyCode::Backspace);
    }
    dash.handle_key(KeyCode::Char('x'));
    // Epochs -> Batch Size -> Learning Rate -> Split -> Run.
    for _ in 0..4 {
        dash.handle_key(KeyCode::Down);
    }
    dash.handle_key(KeyCode::Enter);

    let screen = render(&dash);
    assert!(screen.contains("must be a whole number"), "{screen}");
}
