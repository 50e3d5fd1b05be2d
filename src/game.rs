//! Game session: a `Board` plus move history, undo/redo and terminal
//! status. Search never sees this type; it works on `Board` copies taken
//! with `Game::board`.

use crate::board::{Board, Color, Move, Piece, Square};
use crate::search::Search;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    White,
    Black,
    Draw,
}

impl From<Color> for Winner {
    fn from(color: Color) -> Self {
        match color {
            Color::White => Winner::White,
            Color::Black => Winner::Black,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress { in_check: bool },
    Checkmate { winner: Color },
    Stalemate,
}

// Undo entry per rollback
#[derive(Debug, Clone)]
struct Undo {
    mv: Move,
    captured: Option<Piece>,
    prev_game_over: bool,
    prev_winner: Option<Winner>,
}

#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    game_over: bool,
    winner: Option<Winner>,
    history: Vec<Undo>,
    redo_stack: Vec<Move>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::from_board(Board::start())
    }

    /// Starts a session from an arbitrary position; the side to move is
    /// taken from `board.side`.
    pub fn from_board(board: Board) -> Self {
        let mut game = Self {
            board,
            game_over: false,
            winner: None,
            history: Vec::new(),
            redo_stack: Vec::new(),
        };
        game.recompute_terminal_status();
        game
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.board.side
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }

    pub fn move_history(&self) -> Vec<Move> {
        self.history.iter().map(|u| u.mv).collect()
    }

    pub fn get_piece(&self, row: i32, col: i32) -> Option<Piece> {
        self.board.get_piece(row, col)
    }

    pub fn legal_moves(&self, sq: Square) -> Vec<Square> {
        self.board.legal_moves(sq)
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        self.board.is_in_check(color)
    }

    /// Plays `from -> to` for the side to move. Fails, leaving everything
    /// untouched, when the game is over, the origin does not hold a piece
    /// of the side to move, or the move would leave its king in check.
    pub fn apply_move(&mut self, from: Square, to: Square) -> bool {
        if self.game_over {
            return false;
        }
        match self.board.piece_at(from) {
            Some(p) if p.color == self.board.side => {}
            _ => return false,
        }
        if !self.board.legal_moves(from).contains(&to) {
            return false;
        }
        self.push_move(Move::new(from, to));
        self.redo_stack.clear();
        true
    }

    pub fn play(&mut self, mv: Move) -> bool {
        self.apply_move(mv.from, mv.to)
    }

    fn push_move(&mut self, mv: Move) {
        let prev_game_over = self.game_over;
        let prev_winner = self.winner;
        let captured = self.board.move_piece(mv);
        self.board.side = self.board.side.opponent();
        self.history.push(Undo {
            mv,
            captured,
            prev_game_over,
            prev_winner,
        });
        self.recompute_terminal_status();
    }

    /// Reverts the last applied move, restoring any captured piece.
    pub fn undo(&mut self) -> bool {
        let Some(undo) = self.history.pop() else {
            return false;
        };
        if let Some(moved) = self.board.clear_square(undo.mv.to) {
            self.board.set_piece(undo.mv.from, moved);
        }
        if let Some(captured) = undo.captured {
            self.board.set_piece(undo.mv.to, captured);
        }
        self.board.side = self.board.side.opponent();
        self.game_over = undo.prev_game_over;
        self.winner = undo.prev_winner;
        self.redo_stack.push(undo.mv);
        true
    }

    /// Replays the most recently undone move. Applying a new move forgets
    /// everything that could be redone.
    pub fn redo(&mut self) -> bool {
        match self.redo_stack.pop() {
            Some(mv) => {
                self.push_move(mv);
                true
            }
            None => false,
        }
    }

    /// Terminal status from the point of view of the side now to move.
    pub fn recompute_terminal_status(&mut self) {
        let side = self.board.side;
        if self.board.has_legal_moves(side) {
            self.game_over = false;
            self.winner = None;
        } else {
            self.game_over = true;
            self.winner = if self.board.is_in_check(side) {
                Some(Winner::from(side.opponent()))
            } else {
                Some(Winner::Draw)
            };
        }
    }

    pub fn status(&self) -> GameStatus {
        match self.winner {
            Some(Winner::White) if self.game_over => GameStatus::Checkmate {
                winner: Color::White,
            },
            Some(Winner::Black) if self.game_over => GameStatus::Checkmate {
                winner: Color::Black,
            },
            Some(Winner::Draw) if self.game_over => GameStatus::Stalemate,
            _ => GameStatus::InProgress {
                in_check: self.board.is_in_check(self.board.side),
            },
        }
    }

    pub fn status_text(&self) -> String {
        match self.status() {
            GameStatus::InProgress { in_check: true } => {
                format!("Check! {} to move", self.board.side)
            }
            GameStatus::InProgress { in_check: false } => format!("{} to move", self.board.side),
            GameStatus::Checkmate { winner } => format!("Checkmate! {} wins", winner),
            GameStatus::Stalemate => "Stalemate! Draw".to_string(),
        }
    }

    /// Engine move for the side to move; None once the game is over.
    pub fn best_move(&self, search: &mut Search) -> Option<Move> {
        if self.game_over {
            return None;
        }
        search.get_best_move(&self.board, self.board.side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_rejects_malformed_requests() {
        let mut game = Game::new();
        let before = *game.board();
        // empty origin
        assert!(!game.apply_move(sq("c3"), sq("c4")));
        // opponent's piece
        assert!(!game.apply_move(sq("a5"), sq("a4")));
        // not a legal destination
        assert!(!game.apply_move(sq("a2"), sq("a4")));
        assert_eq!(*game.board(), before);
        assert!(game.move_history().is_empty());
    }

    #[test]
    fn test_apply_flips_side() {
        let mut game = Game::new();
        assert!(game.apply_move(sq("c2"), sq("c3")));
        assert_eq!(game.side_to_move(), Color::Black);
        assert_eq!(game.status_text(), "Black to move");
    }

    #[test]
    fn test_checkmate_freezes_game() {
        let board = Board::from_layout("k4/5/2K2/5/5/1Q3 w").unwrap();
        let mut game = Game::from_board(board);
        assert!(game.apply_move(sq("b1"), sq("b5")));
        assert!(game.is_game_over());
        assert_eq!(game.winner(), Some(Winner::White));
        assert_eq!(game.status(), GameStatus::Checkmate { winner: Color::White });
        assert_eq!(game.status_text(), "Checkmate! White wins");
        assert!(!game.apply_move(sq("a6"), sq("b5")));

        assert!(game.undo());
        assert!(!game.is_game_over());
        assert_eq!(game.winner(), None);
    }

    #[test]
    fn test_undo_redo_restores_capture() {
        let board = Board::from_layout("4k/5/1p3/2P2/5/4K w").unwrap();
        let mut game = Game::from_board(board);
        assert!(game.apply_move(sq("c3"), sq("b4")));
        assert!(game.undo());
        assert_eq!(*game.board(), board);
        assert!(game.redo());
        assert_eq!(game.move_history(), vec!["c3b4".parse().unwrap()]);
        assert!(!game.redo());
    }
}
