//! Keyboard shortcuts and the focus index over the displayed documents.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::docs::TreeNode;

/// The list-rendering side of focus handling.
pub trait ListFocus {
    /// Ask the row at `index` to take keyboard focus.
    ///
    /// Returns `false` without side effects when the row is not currently
    /// materialized.
    fn focus_row(&mut self, index: usize) -> bool;
}

/// Where a key event was delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTarget {
    /// A text-editing field; shortcuts do not apply.
    TextInput,
    Other,
}

/// Snapshot of engine state a key is interpreted against.
#[derive(Debug, Clone, Copy)]
pub struct KeyContext<'a> {
    pub documents: &'a [&'a TreeNode],
    pub can_go_back: bool,
    pub filter_active: bool,
    pub view_generation: u64,
}

/// Work the coordinator hands back to its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    GoBack,
    ClearSearch,
    FocusSearch,
    FocusHeader,
    NavigateInto(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyOutcome {
    /// The key was consumed and must not reach any default handling.
    pub prevent_default: bool,
    pub command: Option<Command>,
}

impl KeyOutcome {
    fn ignored() -> Self {
        Self::default()
    }

    fn handled() -> Self {
        Self {
            prevent_default: true,
            command: None,
        }
    }

    fn command(command: Command) -> Self {
        Self {
            prevent_default: true,
            command: Some(command),
        }
    }
}

/// Owns the focus index for one mounted document list.
///
/// Created when the list is activated and stops reacting to keys after
/// [`KeyboardCoordinator::deactivate`].
#[derive(Debug)]
pub struct KeyboardCoordinator {
    focus: Option<usize>,
    seen_generation: u64,
    active: bool,
}

impl KeyboardCoordinator {
    pub fn new(view_generation: u64) -> Self {
        tracing::debug!("keyboard coordinator activated");
        Self {
            focus: None,
            seen_generation: view_generation,
            active: true,
        }
    }

    pub fn deactivate(&mut self) {
        if self.active {
            tracing::debug!("keyboard coordinator deactivated");
        }
        self.active = false;
        self.focus = None;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn focus(&self) -> Option<usize> {
        self.focus
    }

    /// Focus as a signed index, `-1` meaning none.
    pub fn index(&self) -> isize {
        self.focus.map_or(-1, |i| i as isize)
    }

    /// Forget the focus when the displayed sequence changed.
    ///
    /// Returns `true` if focus was reset.
    pub fn observe_view(&mut self, view_generation: u64) -> bool {
        if view_generation == self.seen_generation {
            return false;
        }
        self.seen_generation = view_generation;
        self.focus = None;
        true
    }

    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        target: KeyTarget,
        ctx: &KeyContext<'_>,
        list: &mut dyn ListFocus,
    ) -> KeyOutcome {
        if !self.active || target == KeyTarget::TextInput {
            return KeyOutcome::ignored();
        }
        self.observe_view(ctx.view_generation);

        let len = ctx.documents.len();
        let command_modifier = key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER);

        match key.code {
            KeyCode::Backspace if ctx.can_go_back => KeyOutcome::command(Command::GoBack),
            KeyCode::Esc if ctx.filter_active => KeyOutcome::command(Command::ClearSearch),
            KeyCode::Char('f') | KeyCode::Char('F') if command_modifier => {
                KeyOutcome::command(Command::FocusSearch)
            }
            KeyCode::Char('h') | KeyCode::Char('H') if command_modifier => {
                KeyOutcome::command(Command::FocusHeader)
            }
            KeyCode::Down if len > 0 => {
                let next = self.focus.map_or(0, |i| (i + 1).min(len - 1));
                self.move_focus(next, list)
            }
            KeyCode::Up if len > 0 => {
                let prev = self.focus.map_or(0, |i| i.saturating_sub(1).min(len - 1));
                self.move_focus(prev, list)
            }
            KeyCode::Home if len > 0 => self.move_focus(0, list),
            KeyCode::End if len > 0 => self.move_focus(len - 1, list),
            KeyCode::Enter => match self.focus.and_then(|i| ctx.documents.get(i)) {
                Some(node) if node.is_folder() => {
                    KeyOutcome::command(Command::NavigateInto(node.name().to_string()))
                }
                _ => KeyOutcome::ignored(),
            },
            _ => KeyOutcome::ignored(),
        }
    }

    fn move_focus(&mut self, index: usize, list: &mut dyn ListFocus) -> KeyOutcome {
        self.focus = Some(index);
        if !list.focus_row(index) {
            tracing::trace!(index, "row not rendered, focus request dropped");
        }
        KeyOutcome::handled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docs::FileSubtype;
    use std::ops::Range;

    struct FakeList {
        materialized: Range<usize>,
        focused: Option<usize>,
        requests: Vec<usize>,
    }

    impl FakeList {
        fn all(len: usize) -> Self {
            Self {
                materialized: 0..len,
                focused: None,
                requests: Vec::new(),
            }
        }
    }

    impl ListFocus for FakeList {
        fn focus_row(&mut self, index: usize) -> bool {
            self.requests.push(index);
            if self.materialized.contains(&index) {
                self.focused = Some(index);
                true
            } else {
                false
            }
        }
    }

    fn nodes() -> Vec<TreeNode> {
        vec![
            TreeNode::folder("Expenses", vec![]),
            TreeNode::file(FileSubtype::Pdf, "Handbook", "2017-01-06"),
            TreeNode::folder("Misc", vec![]),
        ]
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn ctx<'a>(documents: &'a [&'a TreeNode]) -> KeyContext<'a> {
        KeyContext {
            documents,
            can_go_back: false,
            filter_active: false,
            view_generation: 0,
        }
    }

    #[test]
    fn arrow_down_from_none_focuses_first() {
        let nodes = nodes();
        let docs: Vec<&TreeNode> = nodes.iter().collect();
        let mut list = FakeList::all(3);
        let mut kb = KeyboardCoordinator::new(0);
        assert_eq!(kb.index(), -1);

        let out = kb.handle_key(key(KeyCode::Down), KeyTarget::Other, &ctx(&docs), &mut list);
        assert!(out.prevent_default);
        assert_eq!(kb.focus(), Some(0));
        assert_eq!(list.focused, Some(0));
    }

    #[test]
    fn arrows_clamp_at_both_ends() {
        let nodes = nodes();
        let docs: Vec<&TreeNode> = nodes.iter().collect();
        let mut list = FakeList::all(3);
        let mut kb = KeyboardCoordinator::new(0);
        let c = ctx(&docs);

        for _ in 0..5 {
            kb.handle_key(key(KeyCode::Down), KeyTarget::Other, &c, &mut list);
        }
        assert_eq!(kb.focus(), Some(2));
        for _ in 0..5 {
            kb.handle_key(key(KeyCode::Up), KeyTarget::Other, &c, &mut list);
        }
        assert_eq!(kb.focus(), Some(0));
    }

    #[test]
    fn up_from_none_focuses_first() {
        let nodes = nodes();
        let docs: Vec<&TreeNode> = nodes.iter().collect();
        let mut list = FakeList::all(3);
        let mut kb = KeyboardCoordinator::new(0);
        kb.handle_key(key(KeyCode::Up), KeyTarget::Other, &ctx(&docs), &mut list);
        assert_eq!(kb.focus(), Some(0));
    }

    #[test]
    fn home_and_end_jump() {
        let nodes = nodes();
        let docs: Vec<&TreeNode> = nodes.iter().collect();
        let mut list = FakeList::all(3);
        let mut kb = KeyboardCoordinator::new(0);
        let c = ctx(&docs);
        kb.handle_key(key(KeyCode::End), KeyTarget::Other, &c, &mut list);
        assert_eq!(kb.focus(), Some(2));
        kb.handle_key(key(KeyCode::Home), KeyTarget::Other, &c, &mut list);
        assert_eq!(kb.focus(), Some(0));
        assert_eq!(list.requests, vec![2, 0]);
    }

    #[test]
    fn list_keys_ignored_when_empty() {
        let docs: Vec<&TreeNode> = Vec::new();
        let mut list = FakeList::all(0);
        let mut kb = KeyboardCoordinator::new(0);
        for code in [KeyCode::Down, KeyCode::Up, KeyCode::Home, KeyCode::End] {
            let out = kb.handle_key(key(code), KeyTarget::Other, &ctx(&docs), &mut list);
            assert!(!out.prevent_default);
        }
        assert_eq!(kb.focus(), None);
        assert!(list.requests.is_empty());
    }

    #[test]
    fn enter_on_folder_navigates() {
        let nodes = nodes();
        let docs: Vec<&TreeNode> = nodes.iter().collect();
        let mut list = FakeList::all(3);
        let mut kb = KeyboardCoordinator::new(0);
        let c = ctx(&docs);
        kb.handle_key(key(KeyCode::End), KeyTarget::Other, &c, &mut list);
        let out = kb.handle_key(key(KeyCode::Enter), KeyTarget::Other, &c, &mut list);
        assert_eq!(out.command, Some(Command::NavigateInto("Misc".into())));
        assert!(out.prevent_default);
    }

    #[test]
    fn enter_on_file_or_without_focus_does_nothing() {
        let nodes = nodes();
        let docs: Vec<&TreeNode> = nodes.iter().collect();
        let mut list = FakeList::all(3);
        let mut kb = KeyboardCoordinator::new(0);
        let c = ctx(&docs);
        let out = kb.handle_key(key(KeyCode::Enter), KeyTarget::Other, &c, &mut list);
        assert_eq!(out, KeyOutcome::default());

        kb.handle_key(key(KeyCode::Down), KeyTarget::Other, &c, &mut list);
        kb.handle_key(key(KeyCode::Down), KeyTarget::Other, &c, &mut list);
        let out = kb.handle_key(key(KeyCode::Enter), KeyTarget::Other, &c, &mut list);
        assert!(out.command.is_none());
    }

    #[test]
    fn backspace_requires_parent() {
        let docs: Vec<&TreeNode> = Vec::new();
        let mut list = FakeList::all(0);
        let mut kb = KeyboardCoordinator::new(0);
        let mut c = ctx(&docs);
        let out = kb.handle_key(key(KeyCode::Backspace), KeyTarget::Other, &c, &mut list);
        assert!(out.command.is_none());
        c.can_go_back = true;
        let out = kb.handle_key(key(KeyCode::Backspace), KeyTarget::Other, &c, &mut list);
        assert_eq!(out.command, Some(Command::GoBack));
    }

    #[test]
    fn escape_requires_active_filter() {
        let docs: Vec<&TreeNode> = Vec::new();
        let mut list = FakeList::all(0);
        let mut kb = KeyboardCoordinator::new(0);
        let mut c = ctx(&docs);
        assert!(kb
            .handle_key(key(KeyCode::Esc), KeyTarget::Other, &c, &mut list)
            .command
            .is_none());
        c.filter_active = true;
        let out = kb.handle_key(key(KeyCode::Esc), KeyTarget::Other, &c, &mut list);
        assert_eq!(out.command, Some(Command::ClearSearch));
    }

    #[test]
    fn ctrl_and_cmd_shortcuts() {
        let docs: Vec<&TreeNode> = Vec::new();
        let mut list = FakeList::all(0);
        let mut kb = KeyboardCoordinator::new(0);
        let c = ctx(&docs);
        let out = kb.handle_key(ctrl('f'), KeyTarget::Other, &c, &mut list);
        assert_eq!(out.command, Some(Command::FocusSearch));
        let cmd_h = KeyEvent::new(KeyCode::Char('h'), KeyModifiers::SUPER);
        let out = kb.handle_key(cmd_h, KeyTarget::Other, &c, &mut list);
        assert_eq!(out.command, Some(Command::FocusHeader));
        let plain_f = kb.handle_key(key(KeyCode::Char('f')), KeyTarget::Other, &c, &mut list);
        assert_eq!(plain_f, KeyOutcome::default());
    }

    #[test]
    fn text_input_target_suppresses_everything() {
        let nodes = nodes();
        let docs: Vec<&TreeNode> = nodes.iter().collect();
        let mut list = FakeList::all(3);
        let mut kb = KeyboardCoordinator::new(0);
        let c = KeyContext {
            documents: &docs,
            can_go_back: true,
            filter_active: true,
            view_generation: 0,
        };
        for ev in [
            key(KeyCode::Backspace),
            key(KeyCode::Esc),
            ctrl('f'),
            ctrl('h'),
            key(KeyCode::Down),
            key(KeyCode::End),
        ] {
            let out = kb.handle_key(ev, KeyTarget::TextInput, &c, &mut list);
            assert_eq!(out, KeyOutcome::default());
        }
        assert_eq!(kb.focus(), None);
    }

    #[test]
    fn new_view_generation_resets_focus() {
        let nodes = nodes();
        let docs: Vec<&TreeNode> = nodes.iter().collect();
        let mut list = FakeList::all(3);
        let mut kb = KeyboardCoordinator::new(0);
        kb.handle_key(key(KeyCode::End), KeyTarget::Other, &ctx(&docs), &mut list);
        assert_eq!(kb.focus(), Some(2));

        // Shorter list under a new generation: Enter must not use the old index.
        let short: Vec<&TreeNode> = docs[..1].to_vec();
        let c = KeyContext {
            view_generation: 1,
            ..ctx(&short)
        };
        let out = kb.handle_key(key(KeyCode::Enter), KeyTarget::Other, &c, &mut list);
        assert!(out.command.is_none());
        assert_eq!(kb.index(), -1);
        assert!(!kb.observe_view(1));
    }

    #[test]
    fn unrendered_row_keeps_index_without_focusing() {
        let nodes = nodes();
        let docs: Vec<&TreeNode> = nodes.iter().collect();
        let mut list = FakeList {
            materialized: 0..2,
            focused: None,
            requests: Vec::new(),
        };
        let mut kb = KeyboardCoordinator::new(0);
        kb.handle_key(key(KeyCode::End), KeyTarget::Other, &ctx(&docs), &mut list);
        assert_eq!(kb.focus(), Some(2));
        assert_eq!(list.focused, None);
        assert_eq!(list.requests, vec![2]);
    }

    #[test]
    fn deactivated_coordinator_ignores_keys() {
        let nodes = nodes();
        let docs: Vec<&TreeNode> = nodes.iter().collect();
        let mut list = FakeList::all(3);
        let mut kb = KeyboardCoordinator::new(0);
        kb.deactivate();
        assert!(!kb.is_active());
        let out = kb.handle_key(key(KeyCode::Down), KeyTarget::Other, &ctx(&docs), &mut list);
        assert!(!out.prevent_default);
        assert_eq!(kb.focus(), None);
    }

    #[test]
    fn focus_stays_in_bounds_for_all_short_key_sequences() {
        let codes = [
            KeyCode::Down,
            KeyCode::Up,
            KeyCode::Home,
            KeyCode::End,
            KeyCode::Enter,
        ];
        let nodes = nodes();
        for len in 0..=nodes.len() {
            let docs: Vec<&TreeNode> = nodes[..len].iter().collect();
            let c = ctx(&docs);
            // Every sequence of four keys.
            for seq in 0..codes.len().pow(4) {
                let mut kb = KeyboardCoordinator::new(0);
                let mut list = FakeList::all(len);
                let mut rest = seq;
                for _ in 0..4 {
                    let code = codes[rest % codes.len()];
                    rest /= codes.len();
                    kb.handle_key(key(code), KeyTarget::Other, &c, &mut list);
                    let index = kb.index();
                    assert!(index >= -1);
                    if len > 0 {
                        assert!(index < len as isize);
                    } else {
                        assert_eq!(index, -1);
                    }
                }
            }
        }
    }
}
