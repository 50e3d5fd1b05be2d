//! Main search engine implementation
//!
//! Minimax with fail-soft alpha-beta pruning, driven either at a fixed depth
//! or by iterative deepening under a wall-clock budget. Every explored move
//! works on its own `Board` copy, so a child never disturbs its parent or
//! its siblings.
//!
//! Evaluation policy: leaves (depth 0, checkmate, stalemate) are scored with
//! `evaluate` (or `evaluate_fast` when mobility is disabled) from the root
//! side's perspective. The move-specific heuristics are only ever added at
//! the root, and only when enabled. Root moves are searched in generation
//! order; there is no move ordering.

use std::time::{Duration, Instant};

use super::params::{SearchMode, SearchParams};
use super::stats::SearchStats;
use crate::board::{Board, Color, Move};
use crate::eval::{evaluate, evaluate_fast, move_heuristics};

pub const INFINITE: f64 = f64::INFINITY;

/// Outcome of a root search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    /// None when the side to search has no legal move
    pub best_move: Option<Move>,
    pub score: f64,
    /// Depth the result comes from (0 if nothing completed)
    pub depth: u8,
    pub nodes: u64,
}

/// Every legal move of `color`: origin squares row-major, destinations in
/// generation order.
pub fn get_all_moves(board: &Board, color: Color) -> Vec<Move> {
    board.generate_moves(color)
}

/// Main search engine
pub struct Search {
    params: SearchParams,
    stats: SearchStats,
}

impl Default for Search {
    fn default() -> Self {
        Self::new(SearchParams::default())
    }
}

impl Search {
    pub fn new(params: SearchParams) -> Self {
        Self {
            params,
            stats: SearchStats::new(),
        }
    }

    /// Fixed-depth search with default evaluation terms
    pub fn with_depth(depth: u8) -> Self {
        Self::new(SearchParams::new().max_depth(depth))
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    /// Statistics of the last search
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Best move for `color` on `board`, or None when it has no legal move
    pub fn get_best_move(&mut self, board: &Board, color: Color) -> Option<Move> {
        self.search(board, color).best_move
    }

    /// Main search interface, dispatching on the configured mode
    pub fn search(&mut self, board: &Board, color: Color) -> SearchResult {
        self.stats.reset();
        self.stats.start_timing();

        let max_depth = if self.params.max_depth == 0 {
            log::warn!("Depth 0 is not supported, using minimum depth of 1");
            1
        } else {
            self.params.max_depth
        };

        let result = match self.params.mode {
            SearchMode::FixedDepth => self.search_fixed(board, color, max_depth),
            SearchMode::IterativeDeepening { time_limit } => {
                self.search_timed(board, color, max_depth, time_limit)
            }
        };

        self.stats.update_timing();
        self.stats.log_summary();
        match result.best_move {
            Some(mv) => log::info!(
                "{} plays {} (score {:.1}, depth {})",
                color,
                mv,
                result.score,
                result.depth
            ),
            None => log::info!("{} has no legal move", color),
        }
        result
    }

    fn search_fixed(&mut self, board: &Board, color: Color, depth: u8) -> SearchResult {
        let (best_move, score) = self
            .root_search(board, color, depth, None)
            .unwrap_or((None, -INFINITE));
        self.stats.completed_depth = depth;
        SearchResult {
            best_move,
            score,
            depth,
            nodes: self.stats.nodes,
        }
    }

    /// Iterative deepening with time control. Depth 1 always runs to
    /// completion; deeper iterations are abandoned as soon as the deadline
    /// passes between two root moves, and their partial result is dropped.
    fn search_timed(
        &mut self,
        board: &Board,
        color: Color,
        max_depth: u8,
        time_limit: Duration,
    ) -> SearchResult {
        let deadline = self
            .stats
            .start_time
            .unwrap_or_else(Instant::now)
            .checked_add(time_limit);

        let mut best = SearchResult {
            best_move: None,
            score: -INFINITE,
            depth: 0,
            nodes: 0,
        };

        for depth in 1..=max_depth {
            let limit = if depth == 1 { None } else { deadline };
            if limit.is_some_and(|d| Instant::now() >= d) {
                self.stats.inc_aborted_depth();
                log::debug!("time limit reached before depth {}", depth);
                break;
            }

            match self.root_search(board, color, depth, limit) {
                Some((best_move, score)) => {
                    best.best_move = best_move;
                    best.score = score;
                    best.depth = depth;
                    self.stats.completed_depth = depth;
                    log::debug!(
                        "depth {} done: best {} score {:.1} nodes {} ({} ms)",
                        depth,
                        best_move.map_or_else(|| "none".to_string(), |m| m.to_string()),
                        score,
                        self.stats.nodes,
                        self.stats.elapsed().as_millis()
                    );
                    // Nessuna mossa: non serve andare più in profondità
                    if best_move.is_none() {
                        break;
                    }
                }
                None => {
                    self.stats.inc_aborted_depth();
                    log::debug!(
                        "depth {} aborted after {} ms, keeping depth {}",
                        depth,
                        self.stats.elapsed().as_millis(),
                        best.depth
                    );
                    break;
                }
            }
        }

        best.nodes = self.stats.nodes;
        best
    }

    /// Searches every root move to `depth` plies and keeps the first move
    /// with the strictly highest score. Returns None if `deadline` passed
    /// before all root moves were searched.
    fn root_search(
        &mut self,
        board: &Board,
        color: Color,
        depth: u8,
        deadline: Option<Instant>,
    ) -> Option<(Option<Move>, f64)> {
        let mut best_move = None;
        let mut best_score = -INFINITE;

        for mv in get_all_moves(board, color) {
            if deadline.is_some_and(|d| Instant::now() >= d) {
                return None;
            }
            self.stats.inc_root_node();

            let child = board.make_move(mv);
            let bonus = if self.params.use_move_heuristics {
                move_heuristics(&child, mv)
            } else {
                0.0
            };
            // Children only need to prove they beat the current best
            let score = self.minimax(
                &child,
                depth.saturating_sub(1),
                false,
                color,
                best_score - bonus,
                INFINITE,
            ) + bonus;

            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
        }

        Some((best_move, best_score))
    }

    /// Fail-soft alpha-beta minimax. `color` is the root side: scores are
    /// always from its perspective, and it moves on maximizing plies while
    /// its opponent moves on minimizing ones.
    pub fn minimax(
        &mut self,
        board: &Board,
        depth: u8,
        maximizing: bool,
        color: Color,
        mut alpha: f64,
        mut beta: f64,
    ) -> f64 {
        self.stats.inc_node();

        if depth == 0 {
            return self.leaf_eval(board, color);
        }

        let side = if maximizing { color } else { color.opponent() };
        let moves = get_all_moves(board, side);
        // No legal move: checkmate or stalemate for the side to search
        if moves.is_empty() {
            return self.leaf_eval(board, color);
        }

        if maximizing {
            let mut max_eval = -INFINITE;
            for mv in moves {
                let child = board.make_move(mv);
                let eval = self.minimax(&child, depth - 1, false, color, alpha, beta);
                max_eval = max_eval.max(eval);
                alpha = alpha.max(eval);
                if beta <= alpha {
                    self.stats.inc_cutoff();
                    break;
                }
            }
            max_eval
        } else {
            let mut min_eval = INFINITE;
            for mv in moves {
                let child = board.make_move(mv);
                let eval = self.minimax(&child, depth - 1, true, color, alpha, beta);
                min_eval = min_eval.min(eval);
                beta = beta.min(eval);
                if beta <= alpha {
                    self.stats.inc_cutoff();
                    break;
                }
            }
            min_eval
        }
    }

    fn leaf_eval(&mut self, board: &Board, color: Color) -> f64 {
        self.stats.inc_leaf_eval();
        if self.params.use_mobility {
            evaluate(board, color)
        } else {
            evaluate_fast(board, color)
        }
    }
}
