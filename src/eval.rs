//! Modulo di valutazione
//!
//! Static evaluation of a 6x5 position from a fixed perspective. The score is
//! a sum of independent terms, all in centipawns:
//!
//! - material (own pieces minus opponent pieces)
//! - center control on the four squares c3, d3, c4, d4
//! - mobility, 0.1 per legal move of difference
//! - king safety: a flat bonus while the king stays on its home rank
//!
//! `evaluate` is pure: it reads a `Board` copy and never touches game history.

use crate::board::{Board, Color, Move, PieceKind, Square};

// ============================================================================
// VALORI MATERIALI (in centipawn)
// ============================================================================
const PAWN_VALUE: i32 = 100;
const KNIGHT_VALUE: i32 = 320;
const BISHOP_VALUE: i32 = 330;
const ROOK_VALUE: i32 = 500;
const QUEEN_VALUE: i32 = 900;
const KING_VALUE: i32 = 20000;

const CENTER_BONUS: i32 = 50;
const KING_HOME_BONUS: i32 = 20;
const MOBILITY_WEIGHT: f64 = 0.1;

/// Penalty when the piece just moved can be taken next turn.
const VULNERABILITY_PENALTY: f64 = 50.0;
/// Scale for the proximity bonus toward enemy pieces.
const AGGRESSION_WEIGHT: f64 = 0.01;
const AGGRESSION_RADIUS: usize = 2;

/// (row, col) of the central squares: rows 2-3, cols 2-3.
const CENTER_SQUARES: [(usize, usize); 4] = [(2, 2), (2, 3), (3, 2), (3, 3)];

pub fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => PAWN_VALUE,
        PieceKind::Knight => KNIGHT_VALUE,
        PieceKind::Bishop => BISHOP_VALUE,
        PieceKind::Rook => ROOK_VALUE,
        PieceKind::Queen => QUEEN_VALUE,
        PieceKind::King => KING_VALUE,
    }
}

/// Per-term scores, each from the perspective the breakdown was built for.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EvalBreakdown {
    pub material: i32,
    pub center: i32,
    pub mobility: f64,
    pub king_safety: i32,
}

impl EvalBreakdown {
    pub fn total(&self) -> f64 {
        (self.material + self.center + self.king_safety) as f64 + self.mobility
    }
}

/// Full evaluation, higher is better for `perspective`.
pub fn evaluate(board: &Board, perspective: Color) -> f64 {
    evaluate_breakdown(board, perspective).total()
}

/// Evaluation without the mobility term. Mobility enumerates every legal
/// move of both sides and dominates the cost of `evaluate`.
pub fn evaluate_fast(board: &Board, perspective: Color) -> f64 {
    let score = material(board, perspective)
        + center_control(board, perspective)
        + king_safety(board, perspective);
    score as f64
}

pub fn evaluate_breakdown(board: &Board, perspective: Color) -> EvalBreakdown {
    EvalBreakdown {
        material: material(board, perspective),
        center: center_control(board, perspective),
        mobility: mobility(board, perspective),
        king_safety: king_safety(board, perspective),
    }
}

fn material(board: &Board, perspective: Color) -> i32 {
    Square::all()
        .filter_map(|sq| board.piece_at(sq))
        .map(|p| {
            let value = piece_value(p.kind);
            if p.color == perspective {
                value
            } else {
                -value
            }
        })
        .sum()
}

fn center_control(board: &Board, perspective: Color) -> i32 {
    CENTER_SQUARES
        .iter()
        .filter_map(|&(row, col)| board.get_piece(row as i32, col as i32))
        .map(|p| {
            if p.color == perspective {
                CENTER_BONUS
            } else {
                -CENTER_BONUS
            }
        })
        .sum()
}

fn mobility(board: &Board, perspective: Color) -> f64 {
    let own = board.legal_move_count(perspective) as f64;
    let theirs = board.legal_move_count(perspective.opponent()) as f64;
    MOBILITY_WEIGHT * (own - theirs)
}

// Solo il bonus per il proprio re: nessuna penalità simmetrica per l'avversario
fn king_safety(board: &Board, perspective: Color) -> i32 {
    match board.king_square(perspective) {
        Some(sq) if sq.row() == perspective.home_row() => KING_HOME_BONUS,
        _ => 0,
    }
}

/// Score adjustment for a move that was just played on `after`, from the
/// mover's point of view: proximity to enemy pieces minus a penalty when
/// the moved piece hangs.
pub fn move_heuristics(after: &Board, mv: Move) -> f64 {
    let Some(moved) = after.piece_at(mv.to) else {
        return 0.0;
    };
    let enemy = moved.color.opponent();

    let vulnerable = after
        .pieces(enemy)
        .any(|(from, _)| after.pseudo_legal_moves(from).contains(&mv.to));

    let aggression: f64 = after
        .pieces(enemy)
        .filter_map(|(sq, p)| {
            let distance = sq.manhattan(mv.to);
            (distance <= AGGRESSION_RADIUS)
                .then(|| piece_value(p.kind) as f64 / (distance + 1) as f64)
        })
        .sum();

    let penalty = if vulnerable { VULNERABILITY_PENALTY } else { 0.0 };
    AGGRESSION_WEIGHT * aggression - penalty
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_position_is_balanced() {
        let board = Board::start();
        let white = evaluate_breakdown(&board, Color::White);
        assert_eq!(white.material, 0);
        assert_eq!(white.center, 0);
        assert_eq!(white.mobility, 0.0);
        assert_eq!(white.king_safety, KING_HOME_BONUS);
        assert_eq!(evaluate(&board, Color::White), evaluate(&board, Color::Black));
    }

    #[test]
    fn test_material_is_antisymmetric() {
        let board = Board::from_layout("rnbqk/pppp1/5/5/PPPPP/RNBQK w").unwrap();
        assert_eq!(material(&board, Color::White), PAWN_VALUE);
        assert_eq!(material(&board, Color::Black), -PAWN_VALUE);
    }

    #[test]
    fn test_center_bonus() {
        let board = Board::from_layout("4k/5/2N2/3p1/5/4K w").unwrap();
        // Knight on c4 and pawn on d3 both sit on central squares
        assert_eq!(center_control(&board, Color::White), 0);
        let board = Board::from_layout("4k/5/2NN1/5/5/4K w").unwrap();
        assert_eq!(center_control(&board, Color::White), 2 * CENTER_BONUS);
        assert_eq!(center_control(&board, Color::Black), -2 * CENTER_BONUS);
    }

    #[test]
    fn test_king_safety_only_on_home_rank() {
        let home = Board::from_layout("4k/5/5/5/5/4K w").unwrap();
        let away = Board::from_layout("4k/5/5/5/4K/5 w").unwrap();
        assert_eq!(king_safety(&home, Color::White), KING_HOME_BONUS);
        assert_eq!(king_safety(&away, Color::White), 0);
        assert_eq!(king_safety(&home, Color::Black), KING_HOME_BONUS);
    }

    #[test]
    fn test_fast_eval_skips_mobility() {
        let board = Board::from_layout("4k/5/2Q2/5/5/4K w").unwrap();
        let full = evaluate_breakdown(&board, Color::White);
        assert!(full.mobility > 0.0);
        let fast = evaluate_fast(&board, Color::White);
        assert!((fast - (full.total() - full.mobility)).abs() < 1e-9);
    }

    #[test]
    fn test_hanging_piece_is_penalised() {
        // Knight to c3 is out of reach of the pawn on b5
        let board = Board::from_layout("4k/1p3/5/5/5/1N2K w").unwrap();
        let mv: Move = "b1c3".parse().unwrap();
        let safe = move_heuristics(&board.make_move(mv), mv);

        let hanging: Move = "b1a3".parse().unwrap();
        // Knight to a3 walks into the pawn on b4
        let board = Board::from_layout("4k/5/1p3/5/5/1N2K w").unwrap();
        let hung = move_heuristics(&board.make_move(hanging), hanging);
        assert!(hung < safe);
        assert!(hung < 0.0);
    }

    #[test]
    fn test_aggression_bonus_value() {
        // Knight lands on c3: pawn d3 at distance 1, bishop a3 at distance 2,
        // neither reaches c3
        let board = Board::from_layout("k4/5/5/b2p1/5/1N2K w").unwrap();
        let mv: Move = "b1c3".parse().unwrap();
        let bonus = move_heuristics(&board.make_move(mv), mv);
        let expected = AGGRESSION_WEIGHT
            * (PAWN_VALUE as f64 / 2.0 + BISHOP_VALUE as f64 / 3.0);
        assert!((expected - 1.6).abs() < 1e-9);
        assert!((bonus - expected).abs() < 1e-9, "bonus {}", bonus);
    }
}
