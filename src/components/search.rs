use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Widget},
};

/// Text the user sees in the search box.
///
/// This can hold input the engine rejected; the engine only ever stores
/// validated text.
#[derive(Debug, Default, Clone)]
pub struct SearchInput {
    pub text: String,
    /// Byte offset of the cursor.
    pub cursor_position: usize,
    /// Everything is selected; the next edit replaces it.
    pub selected_all: bool,
}

impl SearchInput {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Select all text, as after Ctrl+F.
    pub fn select_all(&mut self) {
        self.selected_all = !self.text.is_empty();
        self.cursor_position = self.text.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor_position = 0;
        self.selected_all = false;
    }

    /// Drop the selection if present. Returns `true` when something was selected.
    fn take_selection(&mut self) -> bool {
        if self.selected_all {
            self.clear();
            true
        } else {
            false
        }
    }

    /// Insert a character at the current cursor position.
    pub fn insert_char(&mut self, c: char) {
        self.take_selection();
        self.text.insert(self.cursor_position, c);
        self.cursor_position += c.len_utf8();
    }

    /// Delete the character before the cursor (backspace).
    pub fn delete_before(&mut self) {
        if self.take_selection() {
            return;
        }
        if let Some(prev) = self.text[..self.cursor_position].chars().next_back() {
            self.cursor_position -= prev.len_utf8();
            self.text.remove(self.cursor_position);
        }
    }

    /// Delete the character under the cursor.
    pub fn delete_after(&mut self) {
        if self.take_selection() {
            return;
        }
        if self.cursor_position < self.text.len() {
            self.text.remove(self.cursor_position);
        }
    }

    pub fn move_left(&mut self) {
        self.selected_all = false;
        if let Some(prev) = self.text[..self.cursor_position].chars().next_back() {
            self.cursor_position -= prev.len_utf8();
        }
    }

    pub fn move_right(&mut self) {
        self.selected_all = false;
        if let Some(next) = self.text[self.cursor_position..].chars().next() {
            self.cursor_position += next.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.selected_all = false;
        self.cursor_position = 0;
    }

    pub fn move_end(&mut self) {
        self.selected_all = false;
        self.cursor_position = self.text.len();
    }
}

/// Search field with its inline validation error underneath.
pub struct SearchBoxWidget<'a> {
    input: &'a SearchInput,
    focused: bool,
    error: Option<&'a str>,
}

impl<'a> SearchBoxWidget<'a> {
    pub fn new(input: &'a SearchInput, focused: bool) -> Self {
        Self {
            input,
            focused,
            error: None,
        }
    }

    pub fn error(mut self, error: Option<&'a str>) -> Self {
        self.error = error;
        self
    }
}

impl<'a> Widget for SearchBoxWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 || area.width < 10 {
            return;
        }

        let border = if self.error.is_some() {
            Color::Red
        } else if self.focused {
            Color::Cyan
        } else {
            Color::DarkGray
        };
        let block = Block::default()
            .title(" Search (Ctrl+F) ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .padding(Padding::horizontal(1));
        let box_area = Rect::new(area.x, area.y, area.width, 3);
        let inner = block.inner(box_area);
        block.render(box_area, buf);

        let text_style = if self.input.selected_all {
            Style::default().bg(Color::Blue).fg(Color::White)
        } else {
            Style::default().fg(Color::White)
        };

        let line = if self.input.text.is_empty() && !self.focused {
            Line::from(Span::styled(
                "Filter by name...",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::DIM),
            ))
        } else if self.focused && !self.input.selected_all {
            let text = &self.input.text;
            let pos = self.input.cursor_position;
            let (before, rest) = text.split_at(pos);
            let mut chars = rest.chars();
            let cursor_char = chars.next().map(String::from).unwrap_or_else(|| " ".into());
            let after: String = chars.collect();
            let cursor_style = Style::default()
                .bg(Color::White)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD);
            Line::from(vec![
                Span::styled(before, text_style),
                Span::styled(cursor_char, cursor_style),
                Span::styled(after, text_style),
            ])
        } else {
            Line::from(Span::styled(self.input.text.as_str(), text_style))
        };
        buf.set_line(inner.x, inner.y, &line, inner.width);

        if let Some(error) = self.error {
            if area.height > 3 {
                let line = Line::from(Span::styled(
                    format!("⚠ {}", error),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ));
                buf.set_line(area.x + 1, area.y + 3, &line, area.width.saturating_sub(1));
            }
        }
    }
}
