//! Command loop and session state for the text protocol

use std::io::{self, BufRead, Write};
use std::time::Instant;

use super::parser::{parse_command, Command, GoParams};
use crate::board::{Board, Color};
use crate::game::Game;
use crate::search::{Search, SearchParams, TimeManagement};
use crate::time::TimeManager;

/// Depth cap for clock-driven iterative deepening
const MAX_TIMED_DEPTH: u8 = 8;

pub struct Session {
    game: Game,
    params: SearchParams,
    time_mgmt: TimeManagement,
    running: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SearchParams::default())
    }
}

impl Session {
    /// `params` apply to every `go` that gives neither depth nor clock
    pub fn new(params: SearchParams) -> Self {
        Self {
            game: Game::new(),
            params,
            time_mgmt: TimeManagement::new(),
            running: true,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn handle_command(&mut self, cmd: Command) -> Vec<String> {
        let mut res = Vec::new();
        match cmd {
            Command::IsReady => res.push("readyok".to_string()),
            Command::NewGame => {
                self.game.reset();
                res.push("ok".to_string());
            }
            Command::Position { layout, moves } => {
                // Build on a scratch game so a bad move leaves the session untouched
                let board = match layout {
                    Some(l) => match Board::from_layout(&l) {
                        Ok(b) => b,
                        Err(e) => {
                            res.push(format!("error {}", e));
                            return res;
                        }
                    },
                    None => Board::start(),
                };
                let mut scratch = Game::from_board(board);
                for mv in moves {
                    if !scratch.play(mv) {
                        res.push(format!("error illegal move {}", mv));
                        return res;
                    }
                }
                self.game = scratch;
            }
            Command::Go(go) => self.go(go, &mut res),
            Command::Play(mv) => {
                if self.game.play(mv) {
                    res.push("ok".to_string());
                    if self.game.is_game_over() {
                        res.push(self.game.status_text());
                    }
                } else {
                    res.push(format!("error illegal move {}", mv));
                }
            }
            Command::Moves(sq) => {
                let dests: String = self
                    .game
                    .legal_moves(sq)
                    .iter()
                    .map(|d| format!(" {}", d))
                    .collect();
                res.push(format!("moves {}:{}", sq, dests));
            }
            Command::Undo => res.push(if self.game.undo() {
                "ok".to_string()
            } else {
                "error nothing to undo".to_string()
            }),
            Command::Redo => res.push(if self.game.redo() {
                "ok".to_string()
            } else {
                "error nothing to redo".to_string()
            }),
            Command::Show => {
                res.extend(self.game.board().to_string().lines().map(str::to_string));
            }
            Command::Status => res.push(self.game.status_text()),
            Command::Layout => res.push(self.game.board().to_layout()),
            Command::Quit => self.running = false,
        }
        res
    }

    fn go(&mut self, go: GoParams, res: &mut Vec<String>) {
        if self.game.is_game_over() {
            res.push(format!("info string game over: {}", self.game.status_text()));
            res.push("bestmove none".to_string());
            return;
        }

        // depth alone: fixed depth; any clock: iterative deepening
        let params = if go.has_clock() {
            let budget = TimeManager::allocate_time(
                &self.time_mgmt,
                go.wtime,
                go.btime,
                go.winc,
                go.binc,
                go.movetime,
                go.movestogo,
                self.game.side_to_move() == Color::White,
            );
            log::debug!("allocated {} ms for this move", budget);
            self.params
                .clone()
                .max_depth(go.depth.unwrap_or(MAX_TIMED_DEPTH))
                .time_limit(budget)
        } else if let Some(depth) = go.depth {
            self.params.clone().max_depth(depth).fixed_depth()
        } else {
            self.params.clone()
        };

        let mut search = Search::new(params);
        let started = Instant::now();
        let result = search.search(self.game.board(), self.game.side_to_move());
        res.push(format!(
            "info depth {} score {:.1} nodes {} time {}",
            result.depth,
            result.score,
            result.nodes,
            started.elapsed().as_millis()
        ));
        match result.best_move {
            Some(mv) => res.push(format!("bestmove {}", mv)),
            None => res.push("bestmove none".to_string()),
        }
    }
}

pub fn process_line(line: &str, session: &mut Session) -> Vec<String> {
    match parse_command(line) {
        Ok(cmd) => session.handle_command(cmd),
        Err(e) => vec![format!("error {}", e)],
    }
}

pub fn run_loop(params: SearchParams) -> io::Result<()> {
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let stdout = io::stdout();
    let mut writer = stdout.lock();

    let mut session = Session::new(params);
    let mut buf = String::new();

    while session.is_running() {
        buf.clear();
        let n = reader.read_line(&mut buf)?;
        if n == 0 {
            // EOF reached
            break;
        }
        let line = buf.trim();
        if line.is_empty() {
            continue;
        }

        for r in process_line(line, &mut session) {
            writeln!(writer, "{}", r)?;
        }
        writer.flush()?;
    }

    Ok(())
}
