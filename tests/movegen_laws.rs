//! Move generation laws checked over every position reachable in a few plies

use minichess::board::{Board, Color, Square, COLS, ROWS};

fn reachable(root: Board, plies: u8) -> Vec<Board> {
    let mut out = vec![root];
    let mut frontier = vec![root];
    for _ in 0..plies {
        let mut next = Vec::new();
        for b in &frontier {
            for mv in b.generate_moves(b.side) {
                next.push(b.make_move(mv));
            }
        }
        out.extend(next.iter().copied());
        frontier = next;
    }
    out
}

fn positions() -> Vec<Board> {
    let mut all = reachable(Board::start(), 3);
    // Open middlegame with every piece kind in play
    let mid = Board::from_layout("r1bqk/pp1pp/2n2/2P2/PP1PP/RNBQK b").unwrap();
    all.extend(reachable(mid, 2));
    all
}

#[test]
fn pseudo_moves_stay_on_board_and_never_hit_own_pieces() {
    for board in positions() {
        for sq in Square::all() {
            let Some(piece) = board.piece_at(sq) else {
                assert!(board.pseudo_legal_moves(sq).is_empty());
                continue;
            };
            for to in board.pseudo_legal_moves(sq) {
                assert!(to.row() < ROWS && to.col() < COLS);
                if let Some(target) = board.piece_at(to) {
                    assert_ne!(
                        target.color, piece.color,
                        "{} hits own piece on {} in {}",
                        sq,
                        to,
                        board.to_layout()
                    );
                }
            }
        }
    }
}

#[test]
fn legal_moves_are_a_subset_of_pseudo_moves() {
    for board in positions() {
        for sq in Square::all() {
            let pseudo = board.pseudo_legal_moves(sq);
            for to in board.legal_moves(sq) {
                assert!(pseudo.contains(&to), "{}{} not pseudo-legal", sq, to);
            }
        }
    }
}

#[test]
fn legal_moves_never_leave_own_king_in_check() {
    for board in positions() {
        let side = board.side;
        for mv in board.generate_moves(side) {
            assert!(
                !board.make_move(mv).is_in_check(side),
                "{} leaves {} in check in {}",
                mv,
                side,
                board.to_layout()
            );
        }
    }
}

#[test]
fn checkmate_and_stalemate_are_exclusive() {
    let mut boards = positions();
    boards.push(Board::from_layout("k4/5/1Q3/5/5/4K b").unwrap());
    boards.push(Board::from_layout("kQ3/2K2/5/5/5/5 b").unwrap());

    for board in boards {
        for color in [Color::White, Color::Black] {
            let mate = board.is_checkmate(color);
            let stale = board.is_stalemate(color);
            assert!(!(mate && stale));
            if mate || stale {
                assert!(!board.has_legal_moves(color));
                assert_eq!(board.legal_move_count(color), 0);
            }
        }
    }
}

#[test]
fn terminal_layouts_are_recognised() {
    let stale = Board::from_layout("k4/5/1Q3/5/5/4K b").unwrap();
    assert!(stale.is_stalemate(Color::Black));
    assert!(!stale.is_checkmate(Color::Black));

    // Queen on b6 protected by the king on c5
    let mate = Board::from_layout("kQ3/2K2/5/5/5/5 b").unwrap();
    assert!(mate.is_in_check(Color::Black));
    assert!(mate.is_checkmate(Color::Black));
    assert!(!mate.is_stalemate(Color::Black));
}

#[test]
fn white_starts_with_only_safe_moves() {
    let board = Board::start();
    let moves = board.generate_moves(Color::White);
    assert_eq!(moves.len(), 7);
    for mv in moves {
        assert!(!board.make_move(mv).is_in_check(Color::White));
    }
}
