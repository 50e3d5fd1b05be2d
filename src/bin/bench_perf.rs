use clap::Parser;
use minichess::board::Board;
use minichess::search::{Search, SearchParams};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 4)]
    depth: u8,

    /// Benchmark without the mobility term
    #[arg(long)]
    no_mobility: bool,
}

fn main() {
    let args = Args::parse();
    let board = Board::start();
    let params = SearchParams::new()
        .max_depth(args.depth)
        .use_mobility(!args.no_mobility);
    let mut search = Search::new(params);

    println!("Benchmarking depth {}...", args.depth);
    let start = Instant::now();
    let result = search.search(&board, board.side);
    let elapsed = start.elapsed();

    let stats = search.stats();
    let nps = (stats.nodes as f64 / elapsed.as_secs_f64().max(1e-9)) as u64;

    println!("Time: {:.2?}", elapsed);
    println!("Nodes: {}", stats.nodes);
    println!("Leaf evals: {}", stats.leaf_evals);
    println!("NPS: {}", nps);
    println!(
        "Best Move: {}",
        result.best_move.map_or_else(|| "none".to_string(), |m| m.to_string())
    );
    println!("Score: {:.1}", result.score);
    println!("Total Cutoffs: {}", stats.cutoffs);
}
