//! Time management helper
//!
//! Turns clock information from the command protocol into a per-move
//! budget for iterative deepening.

use crate::search::params::TimeManagement as TM;

pub struct TimeManager;

impl TimeManager {
    /// Compute milliseconds to allocate given TimeManagement and go parameters
    #[allow(clippy::too_many_arguments)]
    pub fn allocate_time(
        time_mgmt: &TM,
        wtime: Option<u64>,
        btime: Option<u64>,
        winc: Option<u64>,
        binc: Option<u64>,
        movetime: Option<u64>,
        movestogo: Option<u64>,
        side_is_white: bool,
    ) -> u64 {
        if let Some(mt) = movetime {
            return mt;
        }

        // min 2 to avoid spending the whole clock on one move
        let moves_to_go = movestogo.unwrap_or(time_mgmt.moves_to_go).max(2);

        let (remaining, increment) = if side_is_white {
            (wtime, winc)
        } else {
            (btime, binc)
        };

        if let Some(left) = remaining {
            let base_time = (left / moves_to_go).max(10);
            // Valori grezzi dal protocollo: niente overflow
            let increment_bonus = increment.map(|inc| inc.saturating_mul(8) / 10).unwrap_or(0);
            return base_time.saturating_add(increment_bonus);
        }

        // fall back to configured per-move millisecond default
        time_mgmt.msec_per_move
    }
}
