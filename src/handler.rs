use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::App;
use crate::components::search::SearchInput;
use crate::keyboard::KeyTarget;

/// Handle a key event.
///
/// The keyboard coordinator sees every key first; keys it leaves alone go to
/// the search box while it has focus, or to the global bindings otherwise.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    let outcome = app.route_key(key);
    if outcome.prevent_default {
        return;
    }

    match app.key_target() {
        KeyTarget::TextInput => handle_search_key(app, key),
        KeyTarget::Other => handle_global_key(app, key),
    }
}

fn handle_search_key(app: &mut App, key: KeyEvent) {
    let command_modifier = key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER);
    match key.code {
        KeyCode::Char('f') | KeyCode::Char('F') if command_modifier => {
            app.search_input.select_all()
        }
        KeyCode::Char(c) if !command_modifier => app.edit_search(|input| input.insert_char(c)),
        KeyCode::Backspace => app.edit_search(SearchInput::delete_before),
        KeyCode::Delete => app.edit_search(SearchInput::delete_after),
        KeyCode::Left => app.search_input.move_left(),
        KeyCode::Right => app.search_input.move_right(),
        KeyCode::Home => app.search_input.move_home(),
        KeyCode::End => app.search_input.move_end(),
        KeyCode::Esc | KeyCode::Enter | KeyCode::Tab | KeyCode::Down => app.focus_list(),
        _ => {}
    }
}

fn handle_global_key(app: &mut App, key: KeyEvent) {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
    {
        return;
    }
    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('s') => app.engine.cycle_sort_field(),
        KeyCode::Char('o') => app.engine.toggle_sort_direction(),
        KeyCode::Char('/') => app.focus_search(),
        KeyCode::Tab => app.cycle_region(),
        _ => {}
    }
}
