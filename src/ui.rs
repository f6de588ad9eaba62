use ratatui::{
    layout::{Constraint, Layout},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

use crate::app::{App, FocusRegion};
use crate::components::header::HeaderWidget;
use crate::components::list::DocumentListWidget;
use crate::components::search::SearchBoxWidget;
use crate::components::status_bar::StatusBarWidget;

/// Render the application UI.
pub fn render(app: &mut App, frame: &mut Frame) {
    let [header_area, search_area, list_area, status_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(4),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    // Keep the focused row visible for the current list height
    let visible_height = list_area.height.saturating_sub(2) as usize; // account for border
    app.list.set_height(visible_height);
    app.list.set_len(app.engine.documents().len());

    let breadcrumb = app.engine.breadcrumb();
    let sort_label = app.engine.state().sort.label();
    frame.render_widget(
        HeaderWidget::new(&breadcrumb, &sort_label)
            .loading(app.engine.is_loading())
            .focused(app.region == FocusRegion::Header),
        header_area,
    );

    let error = app.engine.search_error_message();
    frame.render_widget(
        SearchBoxWidget::new(&app.search_input, app.region == FocusRegion::Search)
            .error(error.as_deref()),
        search_area,
    );

    let documents = app.engine.documents();
    let border = if app.region == FocusRegion::List {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let title = if app.list.is_virtualized() {
        format!(" {} documents (windowed) ", documents.len())
    } else {
        format!(" {} documents ", documents.len())
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    frame.render_widget(
        DocumentListWidget::new(&documents, &app.list)
            .empty_message(app.engine.empty_state().message())
            .block(block),
        list_area,
    );

    let position = app.position_label();
    frame.render_widget(
        StatusBarWidget::new(&position).announcement(app.engine.announcement()),
        status_area,
    );
}
