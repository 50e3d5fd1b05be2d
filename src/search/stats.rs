//! Search statistics and performance metrics
//!
//! Tracks nodes searched, cutoffs, completed depths and timing.

use std::time::{Duration, Instant};

/// Search statistics
#[derive(Debug, Default, Clone)]
pub struct SearchStats {
    /// Total nodes searched (root moves included)
    pub nodes: u64,

    /// Nodes at root ply
    pub root_nodes: u64,

    /// Static evaluations performed
    pub leaf_evals: u64,

    /// Alpha-beta cutoffs
    pub cutoffs: u64,

    /// Deepest root search that ran to completion
    pub completed_depth: u8,

    /// Depths abandoned because the time limit ran out
    pub aborted_depths: u32,

    /// Search start time
    pub start_time: Option<Instant>,

    /// Time spent searching
    pub search_time: Duration,

    /// Nodes per second rate
    pub nps: u64,
}

impl SearchStats {
    /// Create new empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Start timing
    pub fn start_timing(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Time since `start_timing`, zero if timing never started
    pub fn elapsed(&self) -> Duration {
        self.start_time.map(|t| t.elapsed()).unwrap_or_default()
    }

    /// Update elapsed time and calculate NPS
    pub fn update_timing(&mut self) {
        self.search_time = self.elapsed();
        let elapsed_ms = self.search_time.as_millis() as u64;
        if elapsed_ms > 0 {
            self.nps = (self.nodes * 1000) / elapsed_ms;
        }
    }

    pub fn inc_node(&mut self) {
        self.nodes += 1;
    }

    pub fn inc_root_node(&mut self) {
        self.root_nodes += 1;
    }

    pub fn inc_leaf_eval(&mut self) {
        self.leaf_evals += 1;
    }

    pub fn inc_cutoff(&mut self) {
        self.cutoffs += 1;
    }

    pub fn inc_aborted_depth(&mut self) {
        self.aborted_depths += 1;
    }

    /// Reset all statistics
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Log a formatted summary at info level
    pub fn log_summary(&self) {
        log::info!(
            "search: depth {} nodes {} (root {}) evals {} cutoffs {} aborted {} time {} ms nps {}",
            self.completed_depth,
            self.nodes,
            self.root_nodes,
            self.leaf_evals,
            self.cutoffs,
            self.aborted_depths,
            self.search_time.as_millis(),
            self.nps
        );
    }
}
