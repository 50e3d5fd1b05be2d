//! Integration tests for the text protocol

use minichess::board::Board;
use minichess::protocol::{process_line, Session};
use minichess::search::SearchParams;

fn session() -> Session {
    Session::new(SearchParams::new().max_depth(2))
}

#[test]
fn test_basic_commands() {
    let mut session = session();

    let responses = process_line("isready", &mut session);
    assert_eq!(responses, vec!["readyok"]);

    let responses = process_line("layout", &mut session);
    assert_eq!(responses, vec!["rnbqk/ppppp/5/5/PPPPP/RNBQK w"]);

    let responses = process_line("status", &mut session);
    assert_eq!(responses, vec!["White to move"]);

    let responses = process_line("show", &mut session);
    assert_eq!(responses.len(), Board::start().to_string().lines().count());
}

#[test]
fn test_go_depth() {
    let mut session = session();
    process_line("position startpos", &mut session);
    let responses = process_line("go depth 2", &mut session);
    assert_eq!(responses.len(), 2);
    assert!(responses[0].starts_with("info depth 2"));
    assert!(responses[1].starts_with("bestmove "));

    let mv = responses[1].trim_start_matches("bestmove ");
    let responses = process_line(&format!("play {}", mv), &mut session);
    assert_eq!(responses, vec!["ok"]);
    assert_eq!(session.game().move_history().len(), 1);
}

#[test]
fn test_go_with_clock_uses_iterative_deepening() {
    let mut session = session();
    let responses = process_line("go movetime 0", &mut session);
    // No time at all still yields the depth-1 answer
    assert!(responses[0].starts_with("info depth 1"), "{:?}", responses);
    assert!(responses[1].starts_with("bestmove "));
    assert_ne!(responses[1], "bestmove none");

    let responses = process_line("go depth 2 wtime 60000 btime 60000 movestogo 30", &mut session);
    assert!(responses[0].starts_with("info depth 2"));
    assert_ne!(responses[1], "bestmove none");
}

#[test]
fn test_go_with_oversized_clock_values() {
    let mut session = session();
    let responses = process_line("go depth 1 wtime 1000 winc 18446744073709551615", &mut session);
    assert_eq!(responses.len(), 2);
    assert!(responses[0].starts_with("info depth 1"));
    assert_ne!(responses[1], "bestmove none");
}

#[test]
fn test_position_with_moves() {
    let mut session = session();
    let responses = process_line("position startpos moves a2a3 e5e4", &mut session);
    assert!(responses.is_empty());
    assert_eq!(
        process_line("layout", &mut session),
        vec!["rnbqk/pppp1/4p/P4/1PPPP/RNBQK w"]
    );

    // An illegal move leaves the previous position in place
    let responses = process_line("position startpos moves a2a4", &mut session);
    assert_eq!(responses, vec!["error illegal move a2a4"]);
    assert_eq!(
        process_line("layout", &mut session),
        vec!["rnbqk/pppp1/4p/P4/1PPPP/RNBQK w"]
    );
}

#[test]
fn test_moves_query() {
    let mut session = session();
    assert_eq!(process_line("moves a2", &mut session), vec!["moves a2: a3"]);
    assert_eq!(process_line("moves b1", &mut session), vec!["moves b1: a3 c3"]);
    assert_eq!(process_line("moves c3", &mut session), vec!["moves c3:"]);
}

#[test]
fn test_play_to_checkmate_and_undo() {
    let mut session = session();
    process_line("position layout k4/5/2K2/5/5/1Q3 w", &mut session);

    let responses = process_line("play b1b5", &mut session);
    assert_eq!(responses, vec!["ok", "Checkmate! White wins"]);

    let responses = process_line("go depth 2", &mut session);
    assert_eq!(
        responses,
        vec![
            "info string game over: Checkmate! White wins",
            "bestmove none"
        ]
    );
    assert_eq!(
        process_line("play a6a5", &mut session),
        vec!["error illegal move a6a5"]
    );

    assert_eq!(process_line("undo", &mut session), vec!["ok"]);
    assert_eq!(process_line("status", &mut session), vec!["White to move"]);
    assert_eq!(process_line("redo", &mut session), vec!["ok"]);
    assert!(session.game().is_game_over());
    assert_eq!(process_line("redo", &mut session), vec!["error nothing to redo"]);
}

#[test]
fn test_new_resets_game() {
    let mut session = session();
    process_line("play c2c3", &mut session);
    assert_eq!(process_line("new", &mut session), vec!["ok"]);
    assert_eq!(*session.game().board(), Board::start());
    assert_eq!(process_line("undo", &mut session), vec!["error nothing to undo"]);
}

#[test]
fn test_errors_are_reported() {
    let mut session = session();
    let responses = process_line("fly", &mut session);
    assert_eq!(responses, vec!["error unknown command: fly"]);

    let responses = process_line("play a2", &mut session);
    assert!(responses[0].starts_with("error invalid move notation"));

    let responses = process_line("position layout 5/5 w", &mut session);
    assert!(responses[0].starts_with("error invalid layout"));
}

#[test]
fn test_quit_stops_session() {
    let mut session = session();
    assert!(session.is_running());
    assert!(process_line("quit", &mut session).is_empty());
    assert!(!session.is_running());
}
