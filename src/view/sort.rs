use std::cmp::Ordering;

use serde::Deserialize;

use crate::docs::TreeNode;

/// Field the displayed entries are ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Name,
    Date,
}

impl SortField {
    /// Parse from a config or CLI string, falling back to name.
    pub fn from_str(s: &str) -> Self {
        match s {
            "date" => SortField::Date,
            _ => SortField::Name,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortField::Name => "Name",
            SortField::Date => "Date",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            SortField::Name => SortField::Date,
            SortField::Date => SortField::Name,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn from_str(s: &str) -> Self {
        match s {
            "desc" => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ascending",
            SortDirection::Desc => "descending",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    fn apply(&self, ord: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }
}

/// Sort field plus direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortOption {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortOption {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// "Name (ascending)" style label.
    pub fn label(&self) -> String {
        format!("{} ({})", self.field.label(), self.direction.label())
    }

    /// Compare two entries under this option.
    pub fn compare(&self, a: &TreeNode, b: &TreeNode) -> Ordering {
        match self.field {
            SortField::Name => self.direction.apply(compare_names(a.name(), b.name())),
            SortField::Date => match (a.added_at(), b.added_at()) {
                (None, None) => Ordering::Equal,
                // Folders carry no date and trail files in either direction.
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(x), Some(y)) => self.direction.apply(x.cmp(y)),
            },
        }
    }
}

/// Dictionary-style name ordering.
///
/// Letters compare case-insensitively first; names equal under case folding
/// put the lowercase form first, so only identical names tie.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded.then_with(|| b.cmp(a))
}

/// Stable in-place sort of displayed entries.
pub fn sort_entries(entries: &mut [&TreeNode], option: SortOption) {
    entries.sort_by(|a, b| option.compare(a, b));
}
