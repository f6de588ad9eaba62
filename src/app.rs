use crossterm::event::KeyEvent;
use tokio::sync::mpsc;

use crate::components::list::ListViewport;
use crate::components::search::SearchInput;
use crate::config::AppConfig;
use crate::docs::TreeStore;
use crate::event::Event;
use crate::keyboard::{Command, KeyContext, KeyOutcome, KeyTarget, KeyboardCoordinator};
use crate::view::ViewEngine;

/// Screen region holding keyboard focus.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FocusRegion {
    Header,
    Search,
    #[default]
    List,
}

impl FocusRegion {
    /// Tab order: header, search, list.
    pub fn next(&self) -> Self {
        match self {
            FocusRegion::Header => FocusRegion::Search,
            FocusRegion::Search => FocusRegion::List,
            FocusRegion::List => FocusRegion::Header,
        }
    }
}

/// Main application state.
pub struct App {
    pub engine: ViewEngine,
    pub keyboard: KeyboardCoordinator,
    pub list: ListViewport,
    pub search_input: SearchInput,
    pub region: FocusRegion,
    pub should_quit: bool,
}

impl App {
    /// Create the app over `store`; timers report back through `event_tx`.
    pub fn new(store: TreeStore, config: &AppConfig, event_tx: mpsc::UnboundedSender<Event>) -> Self {
        let engine = ViewEngine::new(store, config.timing(), config.sort_option(), event_tx);
        let keyboard = KeyboardCoordinator::new(engine.view_generation());
        let mut app = Self {
            engine,
            keyboard,
            list: ListViewport::new(config.virtualize_threshold(), config.overscan()),
            search_input: SearchInput::default(),
            region: FocusRegion::List,
            should_quit: false,
        };
        app.sync_view();
        app
    }

    /// Bring focus and list state in line with the engine's current view.
    pub fn sync_view(&mut self) {
        if self.keyboard.observe_view(self.engine.view_generation()) {
            self.list.reset();
        }
        self.list.set_len(self.engine.documents().len());
    }

    pub fn key_target(&self) -> KeyTarget {
        if self.region == FocusRegion::Search {
            KeyTarget::TextInput
        } else {
            KeyTarget::Other
        }
    }

    /// Offer a key to the keyboard coordinator and run whatever it asks for.
    pub fn route_key(&mut self, key: KeyEvent) -> KeyOutcome {
        self.sync_view();
        let target = self.key_target();
        let documents = self.engine.documents();
        let ctx = KeyContext {
            documents: &documents,
            can_go_back: self.engine.can_go_back(),
            filter_active: self.engine.filter_active() || !self.search_input.is_empty(),
            view_generation: self.engine.view_generation(),
        };
        let outcome = self.keyboard.handle_key(key, target, &ctx, &mut self.list);
        drop(documents);

        match &outcome.command {
            Some(command) => self.dispatch(command.clone()),
            None if outcome.prevent_default => self.region = FocusRegion::List,
            None => {}
        }
        outcome
    }

    pub fn dispatch(&mut self, command: Command) {
        tracing::debug!(?command, "dispatch");
        match command {
            Command::GoBack => {
                self.engine.navigate_back();
            }
            Command::ClearSearch => self.clear_search(),
            Command::FocusSearch => self.focus_search(),
            Command::FocusHeader => self.region = FocusRegion::Header,
            Command::NavigateInto(name) => {
                self.engine.navigate_into(&name);
            }
        }
    }

    /// Apply an edit to the visible search text and feed the result to the engine.
    pub fn edit_search(&mut self, edit: impl FnOnce(&mut SearchInput)) {
        edit(&mut self.search_input);
        self.engine.set_filter_text(&self.search_input.text);
    }

    pub fn clear_search(&mut self) {
        self.search_input.clear();
        self.engine.clear_filter();
    }

    /// Focus the search field with its text selected.
    pub fn focus_search(&mut self) {
        self.region = FocusRegion::Search;
        self.search_input.select_all();
    }

    pub fn focus_list(&mut self) {
        self.search_input.selected_all = false;
        self.region = FocusRegion::List;
    }

    pub fn cycle_region(&mut self) {
        match self.region.next() {
            FocusRegion::Search => self.focus_search(),
            FocusRegion::List => self.focus_list(),
            FocusRegion::Header => self.region = FocusRegion::Header,
        }
    }

    /// Completed navigation clears the filter, so the visible text follows.
    pub fn complete_navigation(&mut self, token: u64) {
        let before = self.engine.view_generation();
        self.engine.complete_navigation(token);
        if self.engine.view_generation() != before {
            self.search_input.clear();
        }
    }

    /// "3/12" when a row is focused, otherwise the item count.
    pub fn position_label(&self) -> String {
        let len = self.list.len;
        match self.keyboard.index() {
            -1 => format!("{} item{}", len, if len == 1 { "" } else { "s" }),
            i => format!("{}/{}", i + 1, len),
        }
    }

    /// Quit the application.
    pub fn quit(&mut self) {
        self.keyboard.deactivate();
        self.should_quit = true;
    }
}
