//! Minichess engine main entry point: reads protocol commands from stdin.

use std::io::Write;

use clap::Parser;
use minichess::search::SearchParams;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Search depth for `go` without arguments
    #[arg(long, default_value_t = 3)]
    depth: u8,

    /// Think time in milliseconds; switches `go` to iterative deepening
    #[arg(long)]
    movetime: Option<u64>,

    /// Leave mobility out of the evaluation
    #[arg(long)]
    no_mobility: bool,

    /// Add aggression/vulnerability bonuses to root moves
    #[arg(long)]
    move_heuristics: bool,
}

fn main() {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .format(|buf, record| writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args()))
    .target(env_logger::Target::Stderr)
    .init();

    let mut params = SearchParams::new()
        .max_depth(args.depth)
        .use_mobility(!args.no_mobility)
        .use_move_heuristics(args.move_heuristics);
    if let Some(ms) = args.movetime {
        params = params.time_limit(ms);
    }

    // stdout carries protocol responses only; logs go to stderr
    if let Err(e) = minichess::protocol::run_loop(params) {
        log::error!("Fatal error: {e}");
        std::process::exit(1);
    }
}
