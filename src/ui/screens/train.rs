use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use tokio::runtime::Handle;

use crate::config::{self, dataset, DatasetFile, TrainingDraft};
use crate::settings::Settings;
use crate::state::RunController;
use crate::ui::layout;
use crate::ui::theme::{LabelStyle, ThemeConfig};
use crate::ui::widgets::{self, Trend};

use super::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Dataset,
    Model,
    Optimizer,
    Epochs,
    BatchSize,
    LearningRate,
    Split,
    Run,
}

impl Field {
    const ORDER: [Field; 8] = [
        Field::Dataset,
        Field::Model,
        Field::Optimizer,
        Field::Epochs,
        Field::BatchSize,
        Field::LearningRate,
        Field::Split,
        Field::Run,
    ];

    fn caption(self) -> &'static str {
        match self {
            Field::Dataset => "Dataset Path",
            Field::Model => "Model Type",
            Field::Optimizer => "Optimizer",
            Field::Epochs => "Number of Epochs",
            Field::BatchSize => "Batch Size",
            Field::LearningRate => "Learning Rate",
            Field::Split => "Training Split (%)",
            Field::Run => "Run",
        }
    }

    fn step(self, delta: isize) -> Self {
        let len = Self::ORDER.len() as isize;
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0) as isize;
        Self::ORDER[(idx + delta).rem_euclid(len) as usize]
    }
}

/// Upload-and-train page: form, run control, live statistics.
///
/// Owns the [`RunController`]; leaving the page drops it and stops any run.
pub struct TrainState {
    pub draft: TrainingDraft,
    pub focus: Field,
    pub dataset: Option<DatasetFile>,
    pub error: Option<String>,
    run: RunController,
    settings: Settings,
}

impl TrainState {
    pub fn new(runtime: Handle, settings: Settings) -> Self {
        Self::with_controller(RunController::new(runtime, &settings), settings)
    }

    pub fn with_controller(run: RunController, settings: Settings) -> Self {
        Self {
            draft: TrainingDraft::default(),
            focus: Field::Dataset,
            dataset: None,
            error: None,
            run,
            settings,
        }
    }

    pub fn run(&self) -> &RunController {
        &self.run
    }

    /// Applies pending simulator ticks.
    pub fn pump(&mut self) -> usize {
        self.run.pump()
    }

    /// Validates the form and starts a run. Failures land in `self.error`.
    pub fn start_run(&mut self) {
        let config = match config::build(&self.draft, &self.settings) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("invalid training config: {e}");
                self.error = Some(e.to_string());
                self.run.push_log("ERROR", e.to_string());
                return;
            }
        };

        if let Err(e) = self.run.start(&config) {
            self.error = Some(e.to_string());
        }
    }

    /// Inspects the typed dataset path.
    pub fn select_dataset(&mut self) {
        if self.draft.dataset_path.trim().is_empty() {
            self.error = Some("type a dataset path first".into());
            return;
        }

        match dataset::inspect(&self.draft.dataset_path) {
            Ok(file) => {
                log::info!("dataset selected: {} ({} bytes)", file.name, file.size_bytes);
                self.run.push_log(
                    "INFO",
                    format!("dataset selected: {} ({:.2} MB)", file.name, file.size_mb()),
                );
                self.dataset = Some(file);
            }
            Err(e) => {
                log::warn!("dataset rejected: {e}");
                self.error = Some(e.to_string());
                self.dataset = None;
            }
        }
    }

    fn text_field(&mut self) -> Option<&mut String> {
        match self.focus {
            Field::Dataset => Some(&mut self.draft.dataset_path),
            Field::Epochs => Some(&mut self.draft.epochs),
            Field::BatchSize => Some(&mut self.draft.batch_size),
            Field::LearningRate => Some(&mut self.draft.learning_rate),
            Field::Split => Some(&mut self.draft.train_split),
            Field::Model | Field::Optimizer | Field::Run => None,
        }
    }

    fn cycle_choice(&mut self, forward: bool) {
        match (self.focus, forward) {
            (Field::Model, true) => self.draft.model = self.draft.model.next(),
            (Field::Model, false) => self.draft.model = self.draft.model.previous(),
            (Field::Optimizer, true) => self.draft.optimizer = self.draft.optimizer.next(),
            (Field::Optimizer, false) => self.draft.optimizer = self.draft.optimizer.previous(),
            _ => {}
        }
    }
}

pub fn handle_key(state: &mut TrainState, key: KeyCode) -> Action {
    state.error = None;

    match key {
        KeyCode::Esc => {
            state.run.cancel();
        }
        KeyCode::Up | KeyCode::BackTab => state.focus = state.focus.step(-1),
        KeyCode::Down | KeyCode::Tab => state.focus = state.focus.step(1),
        KeyCode::Left => state.cycle_choice(false),
        KeyCode::Right => state.cycle_choice(true),
        KeyCode::Enter => match state.focus {
            Field::Dataset => state.select_dataset(),
            Field::Run => state.start_run(),
            _ => state.focus = state.focus.step(1),
        },
        KeyCode::Backspace => {
            if let Some(text) = state.text_field() {
                text.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(text) = state.text_field() {
                text.push(c);
            } else if c == ' ' {
                state.cycle_choice(true);
            }
        }
        _ => {}
    }

    Action::None
}

pub fn draw(f: &mut Frame, area: Rect, theme: &ThemeConfig, state: &TrainState) {
    let (left, right) = layout::columns(area);

    let stats = state.run.stats();
    let show_progress = state.run.is_running() || stats.progress() > 0.0;

    let mut heights = vec![5, 11, 3];
    if show_progress {
        heights.push(5);
    }
    let rows = layout::rows(left, &heights);

    draw_dataset(f, rows[0], theme, state);
    draw_form(f, rows[1], theme, state);
    draw_run_button(f, rows[2], theme, state);

    let logs_area = if show_progress {
        draw_progress(f, rows[3], theme, state);
        rows[4]
    } else {
        rows[3]
    };
    f.render_widget(
        widgets::logs(theme, state.run.logs(), logs_area.height),
        logs_area,
    );

    draw_stats(f, right, theme, state);

    if let Some(err) = &state.error {
        widgets::error_bar(f, area, theme, err);
    }
}

fn field_block<'a>(theme: &ThemeConfig, field: Field, focused: bool) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            theme.focus()
        } else {
            theme.input_border()
        })
        .style(theme.input())
        .title(Span::styled(theme.caption(field.caption()), theme.muted()))
}

fn cursor(focused: bool) -> &'static str {
    if focused {
        "█"
    } else {
        ""
    }
}

fn draw_dataset(f: &mut Frame, area: Rect, theme: &ThemeConfig, state: &TrainState) {
    let block = widgets::card(theme, "Data Upload");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let focused = state.focus == Field::Dataset;
    let rows = layout::rows(inner, &[1, 1, 1]);

    let path = if state.draft.dataset_path.is_empty() && !focused {
        Span::styled("type a path, then enter", theme.muted())
    } else {
        Span::styled(state.draft.dataset_path.as_str(), theme.text())
    };
    let marker = if focused { theme.focus() } else { theme.muted() };
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("path: ", marker),
            path,
            Span::styled(cursor(focused), theme.accent()),
        ])),
        rows[0],
    );

    let shell = theme.labels == LabelStyle::Shell;
    let (primary, secondary) = match &state.dataset {
        Some(file) => (
            if shell {
                format!("> FILE: {}", file.name)
            } else {
                file.name.clone()
            },
            format!("{:.2} MB", file.size_mb()),
        ),
        None => (
            if shell {
                "> DRAG_FILE_HERE".to_string()
            } else {
                "No dataset selected".to_string()
            },
            if shell {
                "// Supports: .csv, .json, .parquet, .zip".to_string()
            } else {
                "Supports CSV, JSON, Parquet, or ZIP files".to_string()
            },
        ),
    };

    f.render_widget(Paragraph::new(Span::styled(primary, theme.text())), rows[1]);
    f.render_widget(Paragraph::new(Span::styled(secondary, theme.muted())), rows[2]);
}

fn draw_form(f: &mut Frame, area: Rect, theme: &ThemeConfig, state: &TrainState) {
    let block = widgets::card(theme, "Training Configuration");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let d = &state.draft;
    let grid = [
        (Field::Model, d.model.label()),
        (Field::Optimizer, d.optimizer.label()),
        (Field::Epochs, d.epochs.as_str()),
        (Field::BatchSize, d.batch_size.as_str()),
        (Field::LearningRate, d.learning_rate.as_str()),
        (Field::Split, d.train_split.as_str()),
    ];

    let rows = layout::rows(inner, &[3, 3, 3]);
    for (pair, row) in grid.chunks(2).zip(rows.iter()) {
        let cols = layout::even_columns(*row, 2);
        for ((field, value), col) in pair.iter().zip(cols) {
            let focused = state.focus == *field;
            let content = match field {
                Field::Model | Field::Optimizer => Line::from(vec![
                    Span::styled("◀ ", theme.muted()),
                    Span::styled(*value, theme.text()),
                    Span::styled(" ▶", theme.muted()),
                ]),
                _ => Line::from(vec![
                    Span::styled(*value, theme.text()),
                    Span::styled(cursor(focused), theme.accent()),
                ]),
            };
            f.render_widget(
                Paragraph::new(content).block(field_block(theme, *field, focused)),
                col,
            );
        }
    }
}

fn draw_run_button(f: &mut Frame, area: Rect, theme: &ThemeConfig, state: &TrainState) {
    let shell = theme.labels == LabelStyle::Shell;
    let label = match (state.run.is_running(), shell) {
        (true, true) => "> TRAINING_IN_PROGRESS...  [esc] abort",
        (true, false) => "Training...  (esc to cancel)",
        (false, true) => "> EXECUTE_TRAINING",
        (false, false) => "▶ RUN TRAINING",
    };

    let focused = state.focus == Field::Run;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            theme.focus()
        } else {
            theme.border()
        })
        .style(theme.button());

    f.render_widget(
        Paragraph::new(Span::styled(label, theme.button()))
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

fn draw_progress(f: &mut Frame, area: Rect, theme: &ThemeConfig, state: &TrainState) {
    let block = widgets::card(theme, "Training Progress");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let stats = state.run.stats();
    let rows = layout::rows(inner, &[1, 1, 1]);
    f.render_widget(widgets::progress(theme, stats.progress()), rows[0]);

    let eta = match theme.labels {
        LabelStyle::Shell => format!("ETA: {}", stats.eta()),
        LabelStyle::Plain => format!("Estimated time remaining: {}", stats.eta()),
    };
    let cols = layout::even_columns(rows[2], 2);
    f.render_widget(
        Paragraph::new(Span::styled(
            format!("Epoch {} / {}", stats.current_epoch, stats.total_epochs),
            theme.muted(),
        )),
        cols[0],
    );
    f.render_widget(
        Paragraph::new(Span::styled(eta, theme.muted())).alignment(Alignment::Right),
        cols[1],
    );
}

fn draw_stats(f: &mut Frame, area: Rect, theme: &ThemeConfig, state: &TrainState) {
    let stats = state.run.stats();
    let started = stats.eta_secs.is_some();

    let rows = layout::rows(area, &[1, 5, 5, 5, 5]);
    f.render_widget(
        Paragraph::new(Span::styled(theme.heading("Live Statistics"), theme.title())),
        rows[0],
    );

    let total = if started {
        stats.total_epochs.to_string()
    } else {
        state.draft.epochs.trim().to_string()
    };
    widgets::stat_card(
        f,
        rows[1],
        theme,
        "Current Epoch",
        &stats.current_epoch.to_string(),
        Some(format!("of {total} total").as_str()),
        None,
    );

    let loss_trend = if started && stats.loss < 1.0 {
        Trend::Down
    } else {
        Trend::Neutral
    };
    widgets::stat_card(
        f,
        rows[2],
        theme,
        "Training Loss",
        &format!("{:.4}", stats.loss),
        None,
        Some((loss_trend, "Decreasing")),
    );

    let (acc_trend, acc_text) = if stats.accuracy > 80.0 {
        (Trend::Up, "Good")
    } else {
        (Trend::Neutral, "Training...")
    };
    widgets::stat_card(
        f,
        rows[3],
        theme,
        "Accuracy",
        &format!("{:.1}%", stats.accuracy),
        None,
        Some((acc_trend, acc_text)),
    );

    widgets::stat_card(
        f,
        rows[4],
        theme,
        "Elapsed Time",
        &stats.elapsed(),
        Some(format!("ETA: {}", stats.eta()).as_str()),
        None,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> TrainState {
        TrainState::new(Handle::current(), Settings::default())
    }

    fn type_text(state: &mut TrainState, text: &str) {
        for c in text.chars() {
            handle_key(state, KeyCode::Char(c));
        }
    }

    #[tokio::test]
    async fn focus_wraps_around() {
        let mut s = state();
        assert_eq!(s.focus, Field::Dataset);
        handle_key(&mut s, KeyCode::Up);
        assert_eq!(s.focus, Field::Run);
        handle_key(&mut s, KeyCode::Down);
        assert_eq!(s.focus, Field::Dataset);
    }

    #[tokio::test]
    async fn typing_edits_the_focused_field() {
        let mut s = state();
        s.focus = Field::Epochs;
        handle_key(&mut s, KeyCode::Backspace);
        handle_key(&mut s, KeyCode::Backspace);
        type_text(&mut s, "5");
        assert_eq!(s.draft.epochs, "15");

        s.focus = Field::Model;
        type_text(&mut s, "x");
        assert_eq!(s.draft.model, crate::config::ModelKind::Transformer);
        handle_key(&mut s, KeyCode::Right);
        assert_eq!(s.draft.model, crate::config::ModelKind::Cnn);
    }

    #[tokio::test]
    async fn invalid_form_reports_inline() {
        let mut s = state();
        s.draft.epochs = "0".into();
        s.focus = Field::Run;
        handle_key(&mut s, KeyCode::Enter);

        assert!(!s.run().is_running());
        let err = s.error.as_deref().unwrap();
        assert!(err.contains("epochs"), "{err}");
        assert_eq!(s.run().logs().last().unwrap().level, "ERROR");

        // Any key clears the message.
        handle_key(&mut s, KeyCode::Down);
        assert!(s.error.is_none());
    }

    #[tokio::test]
    async fn enter_starts_and_esc_cancels() {
        let mut s = state();
        s.focus = Field::Run;
        assert!(matches!(handle_key(&mut s, KeyCode::Enter), Action::None));
        assert!(s.run().is_running());

        assert!(matches!(handle_key(&mut s, KeyCode::Esc), Action::None));
        assert!(!s.run().is_running());

        // Esc while idle stays on the page.
        assert!(matches!(handle_key(&mut s, KeyCode::Esc), Action::None));
    }

    #[tokio::test]
    async fn enter_on_form_fields_only_moves_focus() {
        let mut s = state();
        for field in [
            Field::Model,
            Field::Optimizer,
            Field::Epochs,
            Field::BatchSize,
            Field::LearningRate,
            Field::Split,
        ] {
            s.focus = field;
            assert!(matches!(handle_key(&mut s, KeyCode::Enter), Action::None));
            assert!(!s.run().is_running(), "{field:?} started a run");
            assert_eq!(s.focus, field.step(1));
        }
        assert_eq!(s.focus, Field::Run);
        assert!(s.run().logs().is_empty());
    }

    #[tokio::test]
    async fn dataset_selection_errors_are_shown() {
        let mut s = state();
        handle_key(&mut s, KeyCode::Enter);
        assert!(s.error.is_some());

        type_text(&mut s, "notes.txt");
        handle_key(&mut s, KeyCode::Enter);
        assert!(s.error.as_deref().unwrap().contains("unsupported"));
        assert!(s.dataset.is_none());
    }
}
