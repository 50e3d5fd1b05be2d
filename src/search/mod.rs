//! Search engine for the minichess engine
//!
//! Alpha-beta minimax over `Board` copies, with fixed-depth and
//! time-bounded iterative deepening drivers.

pub mod params;
pub mod search;
pub mod stats;

pub use self::params::{SearchMode, SearchParams, TimeManagement};
pub use self::search::{get_all_moves, Search, SearchResult, INFINITE};
pub use self::stats::SearchStats;
