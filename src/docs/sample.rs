//! Built-in document tree used when no tree file is supplied.

use super::tree::{FileSubtype, TreeNode, TreeStore};
use crate::error::Result;

/// Number of generated receipts in `Misc / Receipts`.
pub const RECEIPT_COUNT: usize = 60;

fn receipts() -> Vec<TreeNode> {
    (1..=RECEIPT_COUNT)
        .map(|i| {
            let month = (i - 1) % 12 + 1;
            let day = (i - 1) % 28 + 1;
            TreeNode::file(
                FileSubtype::Pdf,
                format!("Receipt {:03}", i),
                format!("2022-{:02}-{:02}", month, day),
            )
        })
        .collect()
}

/// The sample company handbook tree.
pub fn sample_nodes() -> Vec<TreeNode> {
    vec![
        TreeNode::folder(
            "Expenses",
            vec![
                TreeNode::file(FileSubtype::Doc, "Expenses claim form", "2017-05-02"),
                TreeNode::file(FileSubtype::Doc, "Fuel allowances", "2017-05-03"),
                TreeNode::folder(
                    "Archive",
                    vec![TreeNode::file(FileSubtype::Csv, "Claims 2016", "2016-12-31")],
                ),
            ],
        ),
        TreeNode::folder(
            "Cost centres",
            vec![TreeNode::file(FileSubtype::Csv, "Cost centres", "2016-09-05")],
        ),
        TreeNode::folder(
            "Misc",
            vec![
                TreeNode::file(FileSubtype::Doc, "Christmas party", "2017-12-01"),
                TreeNode::file(FileSubtype::Mov, "Welcome to the company!", "2015-04-24"),
                TreeNode::folder("Receipts", receipts()),
                TreeNode::folder("Empty", Vec::new()),
            ],
        ),
        TreeNode::folder(
            "Employee Handbook",
            vec![TreeNode::file(FileSubtype::Pdf, "Employee Handbook", "2017-01-06")],
        ),
        TreeNode::folder(
            "Public Holiday policy",
            vec![TreeNode::file(FileSubtype::Pdf, "Public Holiday policy", "2016-12-06")],
        ),
    ]
}

impl TreeStore {
    pub fn sample() -> Result<Self> {
        Self::new(sample_nodes())
    }
}
