pub mod header;
pub mod list;
pub mod search;
pub mod status_bar;
