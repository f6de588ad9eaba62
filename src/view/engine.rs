use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::announce::{count_phrase, Announcement};
use super::empty_state::EmptyState;
use super::filter::{matches_filter, validate_search_input, SearchInputError};
use super::sort::{sort_entries, SortOption};
use crate::docs::{TreeNode, TreeStore};
use crate::event::Event;

/// Label for the root of the breadcrumb.
pub const ROOT_LABEL: &str = "Documents";

/// Timer lengths used by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineTiming {
    /// Quiet period before a validated filter is applied to the view.
    pub debounce: Duration,
    /// Simulated latency for opening a folder.
    pub forward_latency: Duration,
    /// Simulated latency for going back to the parent.
    pub back_latency: Duration,
}

impl Default for EngineTiming {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            forward_latency: Duration::from_millis(300),
            back_latency: Duration::from_millis(200),
        }
    }
}

/// Everything the displayed view is derived from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    /// Folder names from the root to the open folder.
    pub path: Vec<String>,
    pub sort: SortOption,
    /// Last raw input that passed validation.
    pub raw_filter: String,
    /// Trimmed form of `raw_filter`.
    pub validated_filter: String,
    /// `validated_filter` once the debounce window elapsed; this is what filters the view.
    pub debounced_filter: String,
    pub is_loading: bool,
    pub search_error: Option<SearchInputError>,
}

/// Where a navigation lands, fixed when it is requested.
#[derive(Debug, Clone, PartialEq, Eq)]
enum NavigationTarget {
    /// Open the last segment of this path.
    Into(Vec<String>),
    /// Return to this ancestor path.
    Back(Vec<String>),
}

impl NavigationTarget {
    fn path(&self) -> &[String] {
        match self {
            NavigationTarget::Into(path) | NavigationTarget::Back(path) => path,
        }
    }
}

#[derive(Debug)]
struct PendingNavigation {
    token: u64,
    target: NavigationTarget,
    timer: JoinHandle<()>,
}

#[derive(Debug)]
struct PendingDebounce {
    generation: u64,
    timer: JoinHandle<()>,
}

/// What happened to a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationRequest {
    /// The latency timer is running.
    Started,
    /// Another navigation is in flight; this one runs after it commits.
    Queued,
    /// Nothing to do (unknown name, a file, or already at the root).
    Ignored,
}

/// Derive the displayed entries: children at `path`, filtered, then sorted.
///
/// An unresolvable path yields an empty list.
pub fn derive_view<'a, S: AsRef<str> + std::fmt::Debug>(
    store: &'a TreeStore,
    path: &[S],
    filter: &str,
    sort: SortOption,
) -> Vec<&'a TreeNode> {
    let Some(level) = store.resolve(path) else {
        tracing::warn!(?path, "path does not resolve, showing empty view");
        return Vec::new();
    };
    let mut entries: Vec<&TreeNode> = level
        .iter()
        .filter(|node| matches_filter(node, filter))
        .collect();
    sort_entries(&mut entries, sort);
    entries
}

/// Owns navigation, search and sort state over a [`TreeStore`].
///
/// Timers run as tokio tasks that post [`Event::FilterSettled`] or
/// [`Event::NavigationSettled`] back to the event loop, which hands them to
/// [`ViewEngine::commit_filter`] and [`ViewEngine::complete_navigation`].
/// Only one navigation is in flight at a time; a request made meanwhile is
/// queued (latest request wins the single queue slot) and starts once the
/// current one commits.
pub struct ViewEngine {
    store: TreeStore,
    state: NavigationState,
    timing: EngineTiming,
    event_tx: mpsc::UnboundedSender<Event>,
    debounce: Option<PendingDebounce>,
    filter_generation: u64,
    navigation: Option<PendingNavigation>,
    queued: Option<NavigationTarget>,
    next_token: u64,
    view_generation: u64,
    announcement: Option<Announcement>,
}

impl ViewEngine {
    pub fn new(
        store: TreeStore,
        timing: EngineTiming,
        sort: SortOption,
        event_tx: mpsc::UnboundedSender<Event>,
    ) -> Self {
        Self {
            store,
            state: NavigationState {
                sort,
                ..NavigationState::default()
            },
            timing,
            event_tx,
            debounce: None,
            filter_generation: 0,
            navigation: None,
            queued: None,
            next_token: 0,
            view_generation: 0,
            announcement: None,
        }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// The entries currently displayed, recomputed on every call.
    pub fn documents(&self) -> Vec<&TreeNode> {
        derive_view(
            &self.store,
            &self.state.path,
            &self.state.debounced_filter,
            self.state.sort,
        )
    }

    /// Bumped whenever the displayed sequence may have changed identity.
    pub fn view_generation(&self) -> u64 {
        self.view_generation
    }

    pub fn can_go_back(&self) -> bool {
        !self.state.path.is_empty()
    }

    pub fn filter_active(&self) -> bool {
        !self.state.validated_filter.is_empty() || !self.state.debounced_filter.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    pub fn search_error_message(&self) -> Option<String> {
        self.state.search_error.as_ref().map(ToString::to_string)
    }

    pub fn empty_state(&self) -> EmptyState {
        EmptyState::classify(&self.state.debounced_filter, &self.state.path)
    }

    /// "Documents / Misc / Receipts".
    pub fn breadcrumb(&self) -> String {
        std::iter::once(ROOT_LABEL)
            .chain(self.state.path.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" / ")
    }

    /// Latest live-region announcement.
    pub fn announcement(&self) -> Option<&Announcement> {
        self.announcement.as_ref()
    }

    fn announce(&mut self, announcement: Announcement) {
        tracing::debug!(
            politeness = ?announcement.politeness,
            message = %announcement.message,
            "announce"
        );
        self.announcement = Some(announcement);
    }

    /// Count of displayed entries, or the empty-state message when there are none.
    fn describe_view(&self) -> String {
        match self.documents().len() {
            0 => self.empty_state().message(),
            n => count_phrase(n),
        }
    }

    // ── Sorting ──────────────────────────────────────────────────────────────

    pub fn set_sort(&mut self, option: SortOption) {
        tracing::debug!(from = ?self.state.sort, to = ?option, "sort changed");
        self.state.sort = option;
        self.view_generation += 1;
        self.announce(Announcement::polite(format!("Sorted by {}", option.label())));
    }

    pub fn cycle_sort_field(&mut self) {
        let sort = self.state.sort;
        self.set_sort(SortOption::new(sort.field.next(), sort.direction));
    }

    pub fn toggle_sort_direction(&mut self) {
        let sort = self.state.sort;
        self.set_sort(SortOption::new(sort.field, sort.direction.toggled()));
    }

    // ── Filtering ────────────────────────────────────────────────────────────

    /// Apply one keystroke's worth of raw search text.
    ///
    /// A rejected input leaves the validated filter untouched and records the
    /// error; the next accepted input clears it.
    pub fn set_filter_text(&mut self, raw: &str) {
        self.state.search_error = None;
        match validate_search_input(raw) {
            Ok(term) => {
                self.state.raw_filter = raw.to_string();
                if term != self.state.validated_filter {
                    self.state.validated_filter = term;
                    self.schedule_debounce();
                }
            }
            Err(err) => {
                tracing::debug!(error = %err, "search input rejected");
                self.announce(Announcement::assertive(err.to_string()));
                self.state.search_error = Some(err);
            }
        }
    }

    fn schedule_debounce(&mut self) {
        self.cancel_debounce();
        self.filter_generation += 1;
        let generation = self.filter_generation;
        let delay = self.timing.debounce;
        let tx = self.event_tx.clone();
        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(Event::FilterSettled(generation));
        });
        self.debounce = Some(PendingDebounce { generation, timer });
    }

    fn cancel_debounce(&mut self) {
        if let Some(pending) = self.debounce.take() {
            pending.timer.abort();
        }
    }

    /// Commit the validated filter if `generation` is the latest debounce.
    pub fn commit_filter(&mut self, generation: u64) {
        match self.debounce.take() {
            Some(pending) if pending.generation == generation => {}
            other => {
                self.debounce = other;
                tracing::trace!(generation, "superseded filter settle ignored");
                return;
            }
        }
        if self.state.debounced_filter == self.state.validated_filter {
            return;
        }
        self.state.debounced_filter = self.state.validated_filter.clone();
        self.view_generation += 1;
        let summary = self.describe_view();
        tracing::info!(filter = %self.state.debounced_filter, %summary, "filter applied");
        self.announce(Announcement::polite(summary));
    }

    /// Drop all search state at once.
    pub fn clear_filter(&mut self) {
        let had_filter = !self.state.debounced_filter.is_empty();
        self.reset_filter_state();
        if had_filter {
            self.view_generation += 1;
        }
        let summary = format!("Search cleared, {}", self.describe_view());
        self.announce(Announcement::polite(summary));
    }

    fn reset_filter_state(&mut self) {
        self.cancel_debounce();
        self.state.raw_filter.clear();
        self.state.validated_filter.clear();
        self.state.debounced_filter.clear();
        self.state.search_error = None;
    }

    // ── Navigation ───────────────────────────────────────────────────────────

    /// Open the folder called `name` in the displayed view.
    ///
    /// The name is looked up in the view shown now, even while another
    /// navigation is loading; the request is ignored unless it names a folder
    /// there.
    pub fn navigate_into(&mut self, name: &str) -> NavigationRequest {
        let opens_folder = self
            .documents()
            .iter()
            .find(|node| node.name() == name)
            .is_some_and(|node| node.is_folder());
        if !opens_folder {
            tracing::debug!(%name, "no folder with that name in view");
            return NavigationRequest::Ignored;
        }
        let mut path = self.state.path.clone();
        path.push(name.to_string());
        self.request(NavigationTarget::Into(path))
    }

    /// Go to the parent of the folder the browser is heading to: the queued
    /// target, else the loading one, else the folder shown now.
    pub fn navigate_back(&mut self) -> NavigationRequest {
        let landing = match (&self.queued, &self.navigation) {
            (Some(queued), _) => queued.path(),
            (None, Some(pending)) => pending.target.path(),
            (None, None) => self.state.path.as_slice(),
        };
        let Some((_, parent)) = landing.split_last() else {
            return NavigationRequest::Ignored;
        };
        let parent = parent.to_vec();
        self.request(NavigationTarget::Back(parent))
    }

    fn request(&mut self, target: NavigationTarget) -> NavigationRequest {
        if self.navigation.is_some() {
            tracing::debug!(?target, "navigation in flight, queueing request");
            self.queued = Some(target);
            return NavigationRequest::Queued;
        }
        self.start_navigation(target)
    }

    fn start_navigation(&mut self, target: NavigationTarget) -> NavigationRequest {
        let latency = match &target {
            NavigationTarget::Into(_) => self.timing.forward_latency,
            NavigationTarget::Back(_) => self.timing.back_latency,
        };

        self.next_token += 1;
        let token = self.next_token;
        let tx = self.event_tx.clone();
        let timer = tokio::spawn(async move {
            tokio::time::sleep(latency).await;
            let _ = tx.send(Event::NavigationSettled(token));
        });
        self.navigation = Some(PendingNavigation {
            token,
            target,
            timer,
        });
        self.state.is_loading = true;
        self.announce(Announcement::polite("Loading…"));
        NavigationRequest::Started
    }

    /// Apply the navigation identified by `token`; stale tokens are ignored.
    pub fn complete_navigation(&mut self, token: u64) {
        let pending = match self.navigation.take() {
            Some(pending) if pending.token == token => pending,
            other => {
                self.navigation = other;
                tracing::debug!(token, "stale navigation settle ignored");
                return;
            }
        };

        let (verb, path) = match pending.target {
            NavigationTarget::Into(path) => ("Opened", path),
            NavigationTarget::Back(path) => ("Back to", path),
        };
        let message = format!(
            "{} {}",
            verb,
            path.last().map(String::as_str).unwrap_or(ROOT_LABEL)
        );
        self.state.path = path;
        self.reset_filter_state();
        self.state.is_loading = false;
        self.view_generation += 1;
        tracing::info!(path = %self.breadcrumb(), "navigation committed");
        let summary = format!("{}, {}", message, self.describe_view());
        self.announce(Announcement::polite(summary));

        if let Some(next) = self.queued.take() {
            self.start_navigation(next);
        }
    }
}

impl Drop for ViewEngine {
    fn drop(&mut self) {
        self.cancel_debounce();
        if let Some(pending) = self.navigation.take() {
            pending.timer.abort();
        }
    }
}
