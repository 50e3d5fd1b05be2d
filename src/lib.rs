pub mod board;
pub mod error;
pub mod eval;
pub mod game;
pub mod protocol;
pub mod search;
pub mod time;

pub use board::{Board, Color, Move, Piece, PieceKind, Square};
pub use game::{Game, GameStatus, Winner};
pub use search::{get_all_moves, Search, SearchParams, SearchResult};
