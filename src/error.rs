//! Error types for text input (squares, moves, layouts, protocol arguments).
//!
//! Rules and search operations never fail: they answer with `Option`, empty
//! move lists or `false`. Only parsing user-supplied text can go wrong.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid square notation: {0}")]
    Square(String),

    #[error("invalid move notation: {0}")]
    Move(String),

    #[error("invalid layout: {0}")]
    Layout(String),

    #[error("invalid side to move: {0}")]
    Side(String),

    #[error("invalid number for {name}: {value}")]
    Number { name: &'static str, value: String },

    #[error("missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("unknown command: {0}")]
    UnknownCommand(String),
}
