use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Cell, Paragraph, Row, Table, Tabs},
    Frame,
};

use crate::state::format_hms;
use crate::state::mock::MockMetrics;
use crate::state::model::ExperimentStatus;
use crate::ui::layout;
use crate::ui::theme::{LabelStyle, ThemeConfig};
use crate::ui::widgets::{self, Trend};

use super::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Overview,
    History,
    Experiments,
}

impl Tab {
    const ALL: [Tab; 3] = [Tab::Overview, Tab::History, Tab::Experiments];

    fn label(self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::History => "Training History",
            Tab::Experiments => "Experiments",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }
}

/// Metrics review page over hardcoded results.
pub struct MetricsState {
    pub tab: Tab,
    metrics: MockMetrics,
}

impl MetricsState {
    pub fn new() -> Self {
        Self {
            tab: Tab::default(),
            metrics: MockMetrics::new(),
        }
    }
}

impl Default for MetricsState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn handle_key(state: &mut MetricsState, key: KeyCode) -> Action {
    let len = Tab::ALL.len();
    match key {
        KeyCode::Right | KeyCode::Tab | KeyCode::Char('l') => {
            state.tab = Tab::ALL[(state.tab.index() + 1) % len];
        }
        KeyCode::Left | KeyCode::BackTab | KeyCode::Char('h') => {
            state.tab = Tab::ALL[(state.tab.index() + len - 1) % len];
        }
        KeyCode::Char('1') => state.tab = Tab::Overview,
        KeyCode::Char('2') => state.tab = Tab::History,
        KeyCode::Char('3') => state.tab = Tab::Experiments,
        _ => {}
    }
    Action::None
}

pub fn draw(f: &mut Frame, area: Rect, theme: &ThemeConfig, state: &MetricsState) {
    let rows = layout::rows(area, &[1, 1]);
    let body = rows[2];

    let titles = Tab::ALL
        .iter()
        .map(|t| Line::from(theme.tab(t.label())))
        .collect::<Vec<_>>();
    f.render_widget(
        Tabs::new(titles)
            .select(state.tab.index())
            .style(theme.muted())
            .highlight_style(theme.button())
            .divider(" "),
        rows[0],
    );

    match state.tab {
        Tab::Overview => draw_overview(f, body, theme, &state.metrics),
        Tab::History => draw_history(f, body, theme, &state.metrics),
        Tab::Experiments => draw_experiments(f, body, theme, &state.metrics),
    }
}

fn draw_overview(f: &mut Frame, area: Rect, theme: &ThemeConfig, metrics: &MockMetrics) {
    let summary = metrics.summary();
    let rows = layout::rows(area, &[5, 14, 6]);

    let cards = layout::even_columns(rows[0], 4);
    widgets::stat_card(
        f,
        cards[0],
        theme,
        "Best Accuracy",
        &format!("{:.1}%", summary.best_accuracy),
        None,
        Some((Trend::Up, "best of all runs")),
    );
    widgets::stat_card(
        f,
        cards[1],
        theme,
        "Lowest Loss",
        &format!("{:.2}", summary.lowest_loss),
        None,
        Some((Trend::Down, "Optimal range")),
    );
    widgets::stat_card(
        f,
        cards[2],
        theme,
        "Total Experiments",
        &summary.total_experiments.to_string(),
        Some(format!("{} successful", summary.successful).as_str()),
        None,
    );
    widgets::stat_card(
        f,
        cards[3],
        theme,
        "Avg Training Time",
        &format_hms(summary.avg_duration_secs),
        Some("Per experiment"),
        None,
    );

    let block = widgets::card(theme, "Training Visualization");
    let inner = block.inner(rows[1]);
    f.render_widget(block, rows[1]);

    match theme.labels {
        // Shell style keeps a single accuracy histogram, like a terminal plot.
        LabelStyle::Shell => {
            f.render_widget(accuracy_chart(theme, metrics, "Accuracy Over Epochs"), inner);
        }
        LabelStyle::Plain => {
            let charts = layout::even_columns(inner, 2);
            f.render_widget(loss_chart(theme, metrics), charts[0]);
            f.render_widget(accuracy_chart(theme, metrics, "Accuracy Over Epochs"), charts[1]);
        }
    }

    let block = widgets::card(theme, "Model Quality");
    let inner = block.inner(rows[2]);
    f.render_widget(block, rows[2]);

    let cols = layout::even_columns(inner, 3);
    widgets::quality_bar(f, cols[0], theme, "Precision", metrics.precision);
    widgets::quality_bar(f, cols[1], theme, "Recall", metrics.recall);
    widgets::quality_bar(f, cols[2], theme, "F1 Score", metrics.f1);
}

fn loss_chart<'a>(theme: &ThemeConfig, metrics: &MockMetrics) -> BarChart<'a> {
    let bars = metrics
        .history
        .iter()
        .map(|h| {
            Bar::default()
                .value((h.train_loss * 100.0).round() as u64)
                .text_value(format!("{:.2}", h.train_loss))
                .label(Line::from(h.epoch.to_string()))
        })
        .collect::<Vec<_>>();

    chart(theme, &bars, "Training Loss Over Epochs")
}

fn accuracy_chart<'a>(theme: &ThemeConfig, metrics: &MockMetrics, title: &str) -> BarChart<'a> {
    let bars = metrics
        .history
        .iter()
        .map(|h| {
            Bar::default()
                .value(h.train_acc.round() as u64)
                .text_value(format!("{:.0}", h.train_acc))
                .label(Line::from(h.epoch.to_string()))
        })
        .collect::<Vec<_>>();

    chart(theme, &bars, title).max(100)
}

fn chart<'a>(theme: &ThemeConfig, bars: &[Bar<'a>], title: &str) -> BarChart<'a> {
    BarChart::default()
        .block(Block::default().title(Span::styled(theme.caption(title), theme.muted())))
        .data(BarGroup::default().bars(bars))
        .bar_width(3)
        .bar_gap(1)
        .bar_style(theme.gauge())
        .value_style(theme.button())
        .label_style(theme.muted())
}

fn draw_history(f: &mut Frame, area: Rect, theme: &ThemeConfig, metrics: &MockMetrics) {
    let shell = theme.labels == LabelStyle::Shell;
    let header = Row::new(
        ["Epoch", "Train Loss", "Val Loss", "Train Acc", "Val Acc", "Trend"]
            .into_iter()
            .map(|h| Cell::from(shell_upper(h, shell))),
    )
    .style(theme.table_header());

    let rows = metrics.history.iter().enumerate().map(|(i, row)| {
        let (trend, trend_style) = if metrics.improving(i) {
            ("↓ Improving", theme.ok())
        } else {
            ("→ Baseline", theme.muted())
        };
        let epoch = if shell {
            format!("[{}]", row.epoch)
        } else {
            row.epoch.to_string()
        };

        Row::new(vec![
            Cell::from(epoch),
            Cell::from(format!("{:.4}", row.train_loss)),
            Cell::from(format!("{:.4}", row.val_loss)),
            Cell::from(format!("{:.1}%", row.train_acc)),
            Cell::from(format!("{:.1}%", row.val_acc)),
            Cell::from(Span::styled(shell_upper(trend, shell), trend_style)),
        ])
        .style(theme.row(i))
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Min(12),
        ],
    )
    .header(header)
    .block(widgets::card(theme, "Epoch History"));

    f.render_widget(table, area);
}

fn draw_experiments(f: &mut Frame, area: Rect, theme: &ThemeConfig, metrics: &MockMetrics) {
    let shell = theme.labels == LabelStyle::Shell;
    let header = Row::new(
        ["Experiment ID", "Model", "Accuracy", "Loss", "Duration", "Status"]
            .into_iter()
            .map(|h| Cell::from(shell_upper(h, shell))),
    )
    .style(theme.table_header());

    let rows = metrics.experiments.iter().enumerate().map(|(i, exp)| {
        let status = match (exp.status, shell) {
            (ExperimentStatus::Completed, true) => Span::styled("OK", theme.ok()),
            (ExperimentStatus::Completed, false) => Span::styled("✔ Completed", theme.ok()),
            (ExperimentStatus::Failed, true) => Span::styled("FAIL", theme.error()),
            (ExperimentStatus::Failed, false) => Span::styled("✖ Failed", theme.error()),
        };

        Row::new(vec![
            Cell::from(Span::styled(exp.id, theme.accent())),
            Cell::from(exp.model),
            Cell::from(format!("{:.1}%", exp.accuracy)),
            Cell::from(format!("{:.2}", exp.loss)),
            Cell::from(format_hms(exp.duration_secs)),
            Cell::from(status),
        ])
        .style(theme.row(i))
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(15),
            Constraint::Length(14),
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Length(10),
            Constraint::Min(12),
        ],
    )
    .header(header)
    .block(widgets::card(theme, "Experiment Results"));

    f.render_widget(table, area);
}

fn shell_upper(text: &str, shell: bool) -> String {
    if shell {
        text.to_uppercase().replace(' ', "_")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tabs_cycle_and_jump() {
        let mut state = MetricsState::new();
        assert_eq!(state.tab, Tab::Overview);

        handle_key(&mut state, KeyCode::Right);
        assert_eq!(state.tab, Tab::History);
        handle_key(&mut state, KeyCode::Left);
        handle_key(&mut state, KeyCode::Left);
        assert_eq!(state.tab, Tab::Experiments);

        handle_key(&mut state, KeyCode::Char('1'));
        assert_eq!(state.tab, Tab::Overview);
    }

    #[test]
    fn page_keys_never_quit() {
        let mut state = MetricsState::new();
        for key in [KeyCode::Char('q'), KeyCode::Esc, KeyCode::Char('x')] {
            assert!(matches!(handle_key(&mut state, key), Action::None));
        }
        assert_eq!(state.tab, Tab::Overview);
    }

    #[test]
    fn shell_headers_are_upper_snake() {
        assert_eq!(shell_upper("Train Loss", true), "TRAIN_LOSS");
        assert_eq!(shell_upper("Train Loss", false), "Train Loss");
    }
}
