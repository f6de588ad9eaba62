use std::ops::Range;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Widget},
};

use crate::docs::TreeNode;
use crate::keyboard::ListFocus;

/// List length at which only a window of rows is materialized.
pub const DEFAULT_VIRTUALIZE_THRESHOLD: usize = 50;
/// Rows materialized beyond each edge of the visible window.
pub const DEFAULT_OVERSCAN: usize = 5;

/// Scroll and focus state of the document list.
#[derive(Debug, Clone)]
pub struct ListViewport {
    pub scroll_offset: usize,
    /// Visible rows, known after the first render.
    pub height: usize,
    pub len: usize,
    /// Row that currently holds keyboard focus.
    pub focused: Option<usize>,
    pub threshold: usize,
    pub overscan: usize,
}

impl Default for ListViewport {
    fn default() -> Self {
        Self::new(DEFAULT_VIRTUALIZE_THRESHOLD, DEFAULT_OVERSCAN)
    }
}

impl ListViewport {
    pub fn new(threshold: usize, overscan: usize) -> Self {
        Self {
            scroll_offset: 0,
            height: 0,
            len: 0,
            focused: None,
            threshold,
            overscan,
        }
    }

    pub fn is_virtualized(&self) -> bool {
        self.len >= self.threshold
    }

    /// Rows that exist right now and can take focus.
    pub fn materialized(&self) -> Range<usize> {
        if !self.is_virtualized() {
            return 0..self.len;
        }
        let start = self.scroll_offset.saturating_sub(self.overscan);
        let end = (self.scroll_offset + self.height + self.overscan).min(self.len);
        start..end
    }

    /// Rows inside the visible window.
    pub fn visible(&self) -> Range<usize> {
        let end = (self.scroll_offset + self.height).min(self.len);
        self.scroll_offset.min(end)..end
    }

    /// Record the current list length, dropping focus that fell off the end.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if self.focused.is_some_and(|i| i >= len) {
            self.focused = None;
        }
        let max_offset = len.saturating_sub(self.height.max(1));
        self.scroll_offset = self.scroll_offset.min(max_offset);
    }

    pub fn set_height(&mut self, height: usize) {
        self.height = height;
        if let Some(index) = self.focused {
            self.scroll_to(index);
        }
    }

    /// Back to the top with nothing focused, for a brand new list.
    pub fn reset(&mut self) {
        self.scroll_offset = 0;
        self.focused = None;
    }

    /// Adjust the scroll offset so `index` is visible.
    fn scroll_to(&mut self, index: usize) {
        if self.height == 0 {
            return;
        }
        if index < self.scroll_offset {
            self.scroll_offset = index;
        } else if index >= self.scroll_offset + self.height {
            self.scroll_offset = index - self.height + 1;
        }
    }
}

impl ListFocus for ListViewport {
    fn focus_row(&mut self, index: usize) -> bool {
        if !self.materialized().contains(&index) {
            return false;
        }
        self.focused = Some(index);
        self.scroll_to(index);
        true
    }
}

/// Renders the visible window of the displayed documents.
pub struct DocumentListWidget<'a> {
    documents: &'a [&'a TreeNode],
    viewport: &'a ListViewport,
    empty_message: String,
    block: Option<Block<'a>>,
}

impl<'a> DocumentListWidget<'a> {
    pub fn new(documents: &'a [&'a TreeNode], viewport: &'a ListViewport) -> Self {
        Self {
            documents,
            viewport,
            empty_message: String::new(),
            block: None,
        }
    }

    pub fn empty_message(mut self, message: String) -> Self {
        self.empty_message = message;
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    fn row_line(node: &TreeNode, width: usize, focused: bool) -> Line<'static> {
        let (icon, detail) = match node {
            TreeNode::Folder { children, .. } => (
                "▸ ",
                format!(
                    "{} item{}",
                    children.len(),
                    if children.len() == 1 { "" } else { "s" }
                ),
            ),
            TreeNode::File {
                subtype, added_at, ..
            } => ("  ", format!("{}  {}", subtype.label(), added_at)),
        };

        let base = if focused {
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else if node.is_folder() {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let detail_style = if focused {
            base
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let name_width = width.saturating_sub(icon.chars().count() + detail.chars().count() + 1);
        let name: String = node.name().chars().take(name_width).collect();
        let gap = name_width.saturating_sub(name.chars().count()) + 1;

        Line::from(vec![
            Span::styled(icon, base),
            Span::styled(name, base),
            Span::styled(" ".repeat(gap), base),
            Span::styled(detail, detail_style),
        ])
    }
}

impl<'a> Widget for DocumentListWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = if let Some(block) = &self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        if self.documents.is_empty() {
            let line = Line::from(Span::styled(
                self.empty_message.as_str(),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ));
            buf.set_line(inner.x + 1, inner.y, &line, inner.width.saturating_sub(1));
            return;
        }

        let materialized = self.viewport.materialized();
        for (row, index) in self.viewport.visible().enumerate() {
            if !materialized.contains(&index) {
                continue;
            }
            let Some(node) = self.documents.get(index) else {
                break;
            };
            let y = inner.y + row as u16;
            if y >= inner.y + inner.height {
                break;
            }
            let focused = self.viewport.focused == Some(index);
            let line = Self::row_line(node, inner.width as usize, focused);
            buf.set_line(inner.x, y, &line, inner.width);
        }
    }
}
