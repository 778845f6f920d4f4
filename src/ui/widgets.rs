use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::state::model::LogLine;

use super::theme::{LabelStyle, ThemeConfig};

/// Direction marker shown under a stat card value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

impl Trend {
    fn symbol(self) -> &'static str {
        match self {
            Trend::Up => "↑",
            Trend::Down => "↓",
            Trend::Neutral => "→",
        }
    }

    fn style(self, theme: &ThemeConfig) -> Style {
        match self {
            Trend::Up => theme.ok(),
            Trend::Down => theme.error(),
            Trend::Neutral => theme.muted(),
        }
    }
}

/// Bordered card surface with a themed heading.
pub fn card<'a>(theme: &ThemeConfig, title: &str) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border())
        .style(theme.card())
        .title(Span::styled(format!(" {} ", theme.heading(title)), theme.title()))
}

/// Card with a caption, a large value, and optional subtitle and trend.
pub fn stat_card(
    f: &mut Frame,
    area: Rect,
    theme: &ThemeConfig,
    title: &str,
    value: &str,
    subtitle: Option<&str>,
    trend: Option<(Trend, &str)>,
) {
    let mut lines = vec![
        Line::from(Span::styled(theme.caption(title), theme.muted())),
        Line::from(Span::styled(theme.value(value), theme.title())),
    ];
    if let Some(sub) = subtitle {
        lines.push(Line::from(Span::styled(sub.to_string(), theme.muted())));
    }
    if let Some((trend, text)) = trend {
        let style = trend.style(theme);
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", trend.symbol()), style),
            Span::styled(text.to_string(), style),
        ]));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border())
        .style(theme.card());

    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// Themed progress gauge with a percentage label.
pub fn progress<'a>(theme: &ThemeConfig, percent: f64) -> Gauge<'a> {
    let percent = percent.clamp(0.0, 100.0);
    let label = match theme.labels {
        LabelStyle::Plain => format!("{percent:.1}%"),
        LabelStyle::Shell => format!("[{percent:.1}%]"),
    };

    Gauge::default()
        .gauge_style(theme.gauge())
        .ratio(percent / 100.0)
        .label(Span::styled(label, theme.text()))
}

/// Tail of the event log.
pub fn logs<'a>(theme: &ThemeConfig, logs: &'a [LogLine], height: u16) -> Paragraph<'a> {
    let visible = usize::from(height.saturating_sub(2)).max(1);
    let tail = logs.iter().skip(logs.len().saturating_sub(visible));

    let lines = tail
        .map(|l| {
            let level = match l.level {
                "ERROR" => theme.error(),
                "WARN" => theme.warn(),
                _ => theme.muted(),
            };
            Line::from(vec![
                Span::styled(format!("[{}] ", l.level), level),
                Span::styled(l.message.as_str(), theme.text()),
            ])
        })
        .collect::<Vec<_>>();

    Paragraph::new(lines)
        .block(card(theme, "Events"))
        .wrap(Wrap { trim: true })
}

/// One-line error message pinned to the bottom of `area`.
pub fn error_bar(f: &mut Frame, area: Rect, theme: &ThemeConfig, msg: &str) {
    if area.height == 0 {
        return;
    }
    let bar = Rect {
        x: area.x + 1,
        y: area.y + area.height - 1,
        width: area.width.saturating_sub(2),
        height: 1,
    };
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(" ✖ ", theme.error()),
            Span::styled(msg, theme.error()),
        ]))
        .style(theme.card()),
        bar,
    );
}

/// Key hints rendered as `[key] action` pairs on one line.
pub fn hints<'a>(theme: &ThemeConfig, hints: &[(&str, &str)]) -> Paragraph<'a> {
    let spans = hints
        .iter()
        .flat_map(|(key, action)| {
            [
                Span::styled(format!("[{key}]"), theme.accent()),
                Span::styled(format!(" {action}   "), theme.muted()),
            ]
        })
        .collect::<Vec<_>>();

    Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
}

/// Labelled bar used for the precision / recall / F1 panel.
pub fn quality_bar(f: &mut Frame, area: Rect, theme: &ThemeConfig, label: &str, percent: f64) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(theme.caption(label), theme.muted()),
            Span::styled(format!("  {percent:.1}%"), theme.text()),
        ])),
        rows[0],
    );
    f.render_widget(
        Gauge::default()
            .gauge_style(theme.gauge())
            .ratio((percent / 100.0).clamp(0.0, 1.0))
            .label(""),
        rows[1],
    );
}
