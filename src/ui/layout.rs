use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Regions of the application shell.
pub struct Shell {
    pub header: Rect,
    pub nav: Rect,
    pub body: Rect,
    pub footer: Rect,
}

/// Computes the shell regions: header, navigation tabs, page body, footer.
pub fn shell(area: Rect) -> Shell {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(10),
            Constraint::Length(1),
        ])
        .split(area);

    Shell {
        header: chunks[0],
        nav: chunks[1],
        body: chunks[2],
        footer: chunks[3],
    }
}

/// Splits a page body into a wide left column and a narrow right column.
pub fn columns(area: Rect) -> (Rect, Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(66), Constraint::Percentage(34)])
        .split(area);

    (cols[0], cols[1])
}

/// Splits `area` into `n` equal columns.
pub fn even_columns(area: Rect, n: usize) -> Vec<Rect> {
    let n = n.max(1) as u32;
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints((0..n).map(|_| Constraint::Ratio(1, n)).collect::<Vec<_>>())
        .split(area)
        .to_vec()
}

/// Stacks rows of the given heights, with any remaining space at the end.
pub fn rows(area: Rect, heights: &[u16]) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            heights
                .iter()
                .map(|h| Constraint::Length(*h))
                .chain(std::iter::once(Constraint::Min(0)))
                .collect::<Vec<_>>(),
        )
        .split(area)
        .to_vec()
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vert[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_fills_the_area() {
        let area = Rect::new(0, 0, 100, 40);
        let s = shell(area);
        assert_eq!(s.header.height, 3);
        assert_eq!(s.nav.height, 1);
        assert_eq!(s.footer.height, 1);
        assert_eq!(s.body.height, 35);
        assert_eq!(s.footer.y, 39);
    }

    #[test]
    fn rows_keep_a_trailing_filler() {
        let r = rows(Rect::new(0, 0, 10, 20), &[3, 4]);
        assert_eq!(r.len(), 3);
        assert_eq!(r[0].height, 3);
        assert_eq!(r[1].y, 3);
        assert_eq!(r[2].height, 13);
    }

    #[test]
    fn even_columns_cover_the_width() {
        let cols = even_columns(Rect::new(0, 0, 90, 5), 3);
        assert_eq!(cols.len(), 3);
        assert_eq!(cols.iter().map(|c| c.width).sum::<u16>(), 90);
    }
}
