//! Search parameters and configuration
//!
//! Controls search behavior: fixed depth or time-bounded iterative
//! deepening, and which evaluation terms are active.

use std::time::Duration;

/// How the root search is driven
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Single root search at `max_depth` plies
    FixedDepth,

    /// Depth 1, 2, ... up to `max_depth`, keeping the last depth that
    /// completed within the time limit
    IterativeDeepening { time_limit: Duration },
}

/// Search parameters for the engine
#[derive(Debug, Clone)]
pub struct SearchParams {
    pub mode: SearchMode,

    /// Maximum search depth in plies (at least 1)
    pub max_depth: u8,

    /// Include mobility in leaf evaluation
    pub use_mobility: bool,

    /// Add aggression/vulnerability of the root move to its score
    pub use_move_heuristics: bool,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            mode: SearchMode::FixedDepth,
            max_depth: 3,
            use_mobility: true,
            use_move_heuristics: false,
        }
    }
}

impl SearchParams {
    /// Create new search params with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum depth in plies
    pub fn max_depth(mut self, depth: u8) -> Self {
        self.max_depth = depth;
        self
    }

    /// Switch to iterative deepening with a time limit in milliseconds
    pub fn time_limit(mut self, ms: u64) -> Self {
        self.mode = SearchMode::IterativeDeepening {
            time_limit: Duration::from_millis(ms),
        };
        self
    }

    /// Switch back to a single fixed-depth search
    pub fn fixed_depth(mut self) -> Self {
        self.mode = SearchMode::FixedDepth;
        self
    }

    /// Enable or disable the mobility term
    pub fn use_mobility(mut self, enable: bool) -> Self {
        self.use_mobility = enable;
        self
    }

    /// Enable or disable root move heuristics
    pub fn use_move_heuristics(mut self, enable: bool) -> Self {
        self.use_move_heuristics = enable;
        self
    }
}

/// Clock-based time budgeting defaults
#[derive(Debug, Clone)]
pub struct TimeManagement {
    /// Budget when no clock information is available
    pub msec_per_move: u64,

    /// Expected moves left when the clock gives no hint
    pub moves_to_go: u64,
}

impl Default for TimeManagement {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeManagement {
    pub fn new() -> Self {
        Self {
            msec_per_move: 1000,
            moves_to_go: 20,
        }
    }
}
