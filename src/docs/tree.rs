use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Document format of a file entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileSubtype {
    Pdf,
    Doc,
    Csv,
    Mov,
}

impl FileSubtype {
    /// Short uppercase label for list rows.
    pub fn label(&self) -> &'static str {
        match self {
            FileSubtype::Pdf => "PDF",
            FileSubtype::Doc => "DOC",
            FileSubtype::Csv => "CSV",
            FileSubtype::Mov => "MOV",
        }
    }
}

/// A node in the document tree. Loaded once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TreeNode {
    File {
        subtype: FileSubtype,
        name: String,
        #[serde(rename = "addedAt")]
        added_at: String,
    },
    Folder {
        name: String,
        #[serde(default)]
        children: Vec<TreeNode>,
    },
}

impl TreeNode {
    pub fn file(subtype: FileSubtype, name: impl Into<String>, added_at: impl Into<String>) -> Self {
        TreeNode::File {
            subtype,
            name: name.into(),
            added_at: added_at.into(),
        }
    }

    pub fn folder(name: impl Into<String>, children: Vec<TreeNode>) -> Self {
        TreeNode::Folder {
            name: name.into(),
            children,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            TreeNode::File { name, .. } | TreeNode::Folder { name, .. } => name,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, TreeNode::Folder { .. })
    }

    /// The ISO date string of a file; folders have none.
    pub fn added_at(&self) -> Option<&str> {
        match self {
            TreeNode::File { added_at, .. } => Some(added_at),
            TreeNode::Folder { .. } => None,
        }
    }

    /// Children of a folder; files have none.
    pub fn children(&self) -> Option<&[TreeNode]> {
        match self {
            TreeNode::Folder { children, .. } => Some(children),
            TreeNode::File { .. } => None,
        }
    }
}

/// Read-only store for the static document tree.
#[derive(Debug, Clone)]
pub struct TreeStore {
    roots: Vec<TreeNode>,
}

impl TreeStore {
    /// Build a store, rejecting sibling folders that share a name.
    ///
    /// Folder names are the lookup key for descending, so they must be unique
    /// within a level. Files may repeat names.
    pub fn new(roots: Vec<TreeNode>) -> Result<Self> {
        Self::check_level(&roots, "Documents")?;
        Ok(Self { roots })
    }

    /// Load the tree from a JSON array of nodes.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let roots: Vec<TreeNode> = serde_json::from_str(content)?;
        let store = Self::new(roots)?;
        tracing::info!(
            top_level = store.roots.len(),
            total = store.node_count(),
            "loaded document tree"
        );
        Ok(store)
    }

    fn check_level(level: &[TreeNode], location: &str) -> Result<()> {
        let mut seen = HashSet::new();
        for node in level {
            if let TreeNode::Folder { name, children } = node {
                if !seen.insert(name.as_str()) {
                    return Err(AppError::InvalidTree(format!(
                        "duplicate folder \"{}\" in {}",
                        name, location
                    )));
                }
                Self::check_level(children, &format!("{} / {}", location, name))?;
            }
        }
        Ok(())
    }

    /// Top-level entries.
    pub fn roots(&self) -> &[TreeNode] {
        &self.roots
    }

    /// Walk from the root, descending into the folder named by each segment.
    ///
    /// Returns `None` when a segment is missing or names a file.
    pub fn resolve<S: AsRef<str>>(&self, path: &[S]) -> Option<&[TreeNode]> {
        let mut level = self.roots();
        for segment in path {
            let segment = segment.as_ref();
            level = level
                .iter()
                .find(|node| node.is_folder() && node.name() == segment)
                .and_then(TreeNode::children)?;
        }
        Some(level)
    }

    /// Total number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        fn count(level: &[TreeNode]) -> usize {
            level
                .iter()
                .map(|n| 1 + n.children().map(count).unwrap_or(0))
                .sum()
        }
        count(&self.roots)
    }
}
