//! Navigation, search and sort state, and the list derived from it.

pub mod announce;
pub mod empty_state;
pub mod engine;
pub mod filter;
pub mod sort;

pub use engine::{EngineTiming, NavigationRequest, ViewEngine};
pub use sort::{SortDirection, SortField, SortOption};
