use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::ui::layout;
use crate::ui::theme::{color, ThemeConfig, ThemeVariant};
use crate::ui::widgets;

/// Colour attributes previewed next to the variant list.
const SWATCHES: [&str; 6] = [
    "primary",
    "accent",
    "progress_fill",
    "success",
    "warning",
    "error",
];

pub enum PickerAction {
    None,
    Close,
    Apply(ThemeVariant),
}

/// Overlay listing the theme variants.
pub struct ThemePicker {
    pub selected: ThemeVariant,
}

impl ThemePicker {
    pub fn new(current: ThemeVariant) -> Self {
        Self { selected: current }
    }
}

pub fn handle_key(picker: &mut ThemePicker, key: KeyCode) -> PickerAction {
    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            picker.selected = picker.selected.previous();
            PickerAction::None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            picker.selected = picker.selected.next();
            PickerAction::None
        }
        KeyCode::Enter => PickerAction::Apply(picker.selected),
        KeyCode::Esc | KeyCode::F(3) | KeyCode::Char('q') => PickerAction::Close,
        _ => PickerAction::None,
    }
}

/// Draws the picker using the active `theme`, previewing the highlighted one.
pub fn draw(f: &mut Frame, area: Rect, theme: &ThemeConfig, picker: &ThemePicker) {
    let outer = layout::centered_rect(50, 50, area);
    f.render_widget(Clear, outer);

    let block = widgets::card(theme, "Theme");
    let inner = block.inner(outer);
    f.render_widget(block, outer);

    let rows = layout::rows(inner, &[ThemeVariant::ALL.len() as u16, 1, 1, 1]);

    let items = ThemeVariant::ALL
        .iter()
        .map(|v| ListItem::new(Line::from(v.config().name)))
        .collect::<Vec<_>>();
    let list = List::new(items)
        .style(theme.card())
        .highlight_style(theme.highlight())
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    state.select(Some(picker.selected.position()));
    f.render_stateful_widget(list, rows[0], &mut state);

    let preview = picker.selected.config();
    let swatches = preview
        .colors()
        .into_iter()
        .filter(|(name, _)| SWATCHES.contains(name))
        .flat_map(|(_, hex)| {
            [
                Span::styled("   ", Style::default().bg(color(hex))),
                Span::raw(" "),
            ]
        })
        .collect::<Vec<_>>();
    f.render_widget(Paragraph::new(Line::from(swatches)), rows[2]);

    f.render_widget(
        widgets::hints(theme, &[("↑↓", "choose"), ("enter", "apply"), ("esc", "close")]),
        rows[3],
    );
}
