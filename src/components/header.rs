use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

/// Title bar: breadcrumb, active sort and the loading indicator.
pub struct HeaderWidget<'a> {
    breadcrumb: &'a str,
    sort_label: &'a str,
    loading: bool,
    focused: bool,
}

impl<'a> HeaderWidget<'a> {
    pub fn new(breadcrumb: &'a str, sort_label: &'a str) -> Self {
        Self {
            breadcrumb,
            sort_label,
            loading: false,
            focused: false,
        }
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl<'a> Widget for HeaderWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let border = if self.focused {
            Color::Cyan
        } else {
            Color::DarkGray
        };
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(border));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 {
            return;
        }

        let sort = format!("Sort: {} ", self.sort_label);
        let loading = if self.loading { "Loading… " } else { "" };
        let right_len = sort.chars().count() + loading.chars().count();
        let budget = (inner.width as usize).saturating_sub(right_len + 1);

        let crumb_len = self.breadcrumb.chars().count();
        let crumb: String = if crumb_len > budget && budget > 1 {
            let tail: String = self
                .breadcrumb
                .chars()
                .skip(crumb_len - (budget - 1))
                .collect();
            format!("…{}", tail)
        } else {
            self.breadcrumb.chars().take(budget).collect()
        };
        let gap = (inner.width as usize)
            .saturating_sub(crumb.chars().count())
            .saturating_sub(right_len);

        let title_style = if self.focused {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        };
        let line = Line::from(vec![
            Span::styled(crumb, title_style),
            Span::raw(" ".repeat(gap)),
            Span::styled(
                loading,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(sort, Style::default().fg(Color::Gray)),
        ]);
        buf.set_line(inner.x, inner.y, &line, inner.width);
    }
}
