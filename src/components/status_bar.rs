use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::view::announce::Announcement;

const KEY_HINTS: &str = " ↑↓ move  ⏎ open  ⌫ back  ^F search  s/o sort  q quit ";

/// Live region plus key hints.
///
/// Alerts take the whole bar; polite messages share it with the hints.
pub struct StatusBarWidget<'a> {
    announcement: Option<&'a Announcement>,
    position: &'a str,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(position: &'a str) -> Self {
        Self {
            announcement: None,
            position,
        }
    }

    pub fn announcement(mut self, announcement: Option<&'a Announcement>) -> Self {
        self.announcement = announcement;
        self
    }
}

fn fit(text: &str, width: usize) -> String {
    let mut out: String = text.chars().take(width).collect();
    let len = out.chars().count();
    out.extend(std::iter::repeat(' ').take(width - len));
    out
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let width = area.width as usize;

        if let Some(alert) = self.announcement.filter(|a| a.is_alert()) {
            let style = Style::default()
                .bg(Color::Red)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD);
            let line = Line::from(Span::styled(fit(&format!(" {}", alert.message), width), style));
            buf.set_line(area.x, area.y, &line, area.width);
            return;
        }

        let hints_len = KEY_HINTS.chars().count();
        let remaining = width.saturating_sub(hints_len);
        let message = self
            .announcement
            .map(|a| a.message.as_str())
            .unwrap_or_default();
        let left = if message.is_empty() {
            format!(" {}", self.position)
        } else {
            format!(" {}  {}", self.position, message)
        };

        let line = Line::from(vec![
            Span::styled(fit(&left, remaining), Style::default().fg(Color::Green)),
            Span::styled(
                KEY_HINTS,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::DIM),
            ),
        ]);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
