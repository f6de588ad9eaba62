/// Why the displayed list is empty. Presentation only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyState {
    /// A filter is active and matched nothing.
    Search { term: String },
    /// The open folder has no entries.
    EmptyFolder,
    /// The whole collection is empty.
    Root,
}

impl EmptyState {
    pub fn classify<S: AsRef<str>>(debounced_filter: &str, path: &[S]) -> Self {
        if !debounced_filter.is_empty() {
            EmptyState::Search {
                term: debounced_filter.to_string(),
            }
        } else if !path.is_empty() {
            EmptyState::EmptyFolder
        } else {
            EmptyState::Root
        }
    }

    pub fn message(&self) -> String {
        match self {
            EmptyState::Search { term } => format!("No documents match \"{}\"", term),
            EmptyState::EmptyFolder => "This folder is empty".to_string(),
            EmptyState::Root => "No documents found".to_string(),
        }
    }
}
