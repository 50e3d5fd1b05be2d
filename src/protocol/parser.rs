//! Command parser for the text protocol
//!
//! Minimal tokenizer. Squares and moves are validated here, so the session
//! only ever sees well-formed commands.

use crate::board::{Move, Square};
use crate::error::ParseError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoParams {
    pub depth: Option<u8>,
    pub movetime: Option<u64>,
    pub wtime: Option<u64>,
    pub btime: Option<u64>,
    pub winc: Option<u64>,
    pub binc: Option<u64>,
    pub movestogo: Option<u64>,
}

impl GoParams {
    pub fn has_clock(&self) -> bool {
        self.movetime.is_some() || self.wtime.is_some() || self.btime.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    IsReady,
    NewGame,
    Position {
        /// None means the start layout
        layout: Option<String>,
        moves: Vec<Move>,
    },
    Go(GoParams),
    Play(Move),
    Moves(Square),
    Undo,
    Redo,
    Show,
    Status,
    Layout,
    Quit,
}

/// Parse one command line
pub fn parse_command(line: &str) -> Result<Command, ParseError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some(&head) = parts.first() else {
        return Err(ParseError::UnknownCommand(String::new()));
    };

    match head {
        "isready" => Ok(Command::IsReady),
        "new" => Ok(Command::NewGame),
        "undo" => Ok(Command::Undo),
        "redo" => Ok(Command::Redo),
        "show" => Ok(Command::Show),
        "status" => Ok(Command::Status),
        "layout" => Ok(Command::Layout),
        "quit" => Ok(Command::Quit),
        "play" => {
            let mv = parts.get(1).ok_or(ParseError::MissingArgument("move"))?;
            Ok(Command::Play(mv.parse()?))
        }
        "moves" => {
            let sq = parts.get(1).ok_or(ParseError::MissingArgument("square"))?;
            Ok(Command::Moves(sq.parse()?))
        }
        "position" => parse_position(&parts[1..]),
        "go" => parse_go(&parts[1..]).map(Command::Go),
        _ => Err(ParseError::UnknownCommand(line.trim().to_string())),
    }
}

// position startpos [moves ...] | position layout <rows> [w|b] [moves ...]
fn parse_position(args: &[&str]) -> Result<Command, ParseError> {
    let moves_at = args.iter().position(|&s| s == "moves");
    let (setup, move_tokens) = match moves_at {
        Some(i) => (&args[..i], &args[i + 1..]),
        None => (args, &args[args.len()..]),
    };

    let layout = match setup.first() {
        Some(&"startpos") => None,
        Some(&"layout") if setup.len() > 1 => Some(setup[1..].join(" ")),
        Some(&"layout") => return Err(ParseError::MissingArgument("layout")),
        Some(other) => return Err(ParseError::Layout(other.to_string())),
        None => return Err(ParseError::MissingArgument("startpos or layout")),
    };

    let moves = move_tokens
        .iter()
        .map(|m| m.parse())
        .collect::<Result<Vec<Move>, _>>()?;

    Ok(Command::Position { layout, moves })
}

fn parse_go(args: &[&str]) -> Result<GoParams, ParseError> {
    let mut params = GoParams::default();
    let mut i = 0usize;
    while i < args.len() {
        let key = args[i];
        let value = args.get(i + 1).copied();
        match key {
            "depth" => params.depth = Some(parse_number("depth", value)?),
            "movetime" => params.movetime = Some(parse_number("movetime", value)?),
            "wtime" => params.wtime = Some(parse_number("wtime", value)?),
            "btime" => params.btime = Some(parse_number("btime", value)?),
            "winc" => params.winc = Some(parse_number("winc", value)?),
            "binc" => params.binc = Some(parse_number("binc", value)?),
            "movestogo" => params.movestogo = Some(parse_number("movestogo", value)?),
            _ => {
                // ignore unknown tokens
                i += 1;
                continue;
            }
        }
        i += 2;
    }
    Ok(params)
}

fn parse_number<T: std::str::FromStr>(name: &'static str, value: Option<&str>) -> Result<T, ParseError> {
    let value = value.ok_or(ParseError::MissingArgument(name))?;
    value.parse().map_err(|_| ParseError::Number {
        name,
        value: value.to_string(),
    })
}
