use ratatui::{
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use super::screens::{picker::ThemePicker, Page, Screen};
use super::theme::{LabelStyle, ThemeSource};
use super::{layout, widgets};

/// Draws the whole frame: shell, active page, and the theme picker if open.
pub fn draw(f: &mut Frame, theme: &dyn ThemeSource, screen: &Screen, picker: Option<&ThemePicker>) {
    let config = theme.theme();
    let area = f.size();
    f.render_widget(Block::default().style(config.base()), area);

    let shell = layout::shell(area);
    let terminal = config.labels == LabelStyle::Shell;

    let title = if terminal {
        "> ML_TRAINING_SYS"
    } else {
        "ML Training Dashboard"
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(title, config.title()),
        Span::styled("   theme: ", config.muted()),
        Span::styled(config.name, config.accent()),
        Span::styled("  [F3]", config.muted()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(config.border())
            .style(config.card()),
    );
    f.render_widget(header, shell.header);

    let current = screen.page();
    let titles = Page::ALL
        .iter()
        .enumerate()
        .map(|(i, p)| Line::from(format!("F{} {}", i + 1, config.tab(p.label()))))
        .collect::<Vec<_>>();
    f.render_widget(
        Tabs::new(titles)
            .select(Page::ALL.iter().position(|p| *p == current).unwrap_or(0))
            .style(config.muted())
            .highlight_style(config.button())
            .divider("|"),
        shell.nav,
    );

    screen.draw(f, shell.body, config);

    let footer = if terminal {
        "// ML Training Dashboard v1.0 | STATUS: OPERATIONAL"
    } else {
        "ML Training Dashboard"
    };
    let cols = layout::even_columns(shell.footer, 2);
    f.render_widget(Paragraph::new(Span::styled(footer, config.muted())), cols[0]);
    f.render_widget(
        widgets::hints(config, &[("F1/F2", "pages"), ("F3", "theme"), ("F10", "quit")]),
        cols[1],
    );

    if let Some(p) = picker {
        super::screens::picker::draw(f, area, config, p);
    }
}
