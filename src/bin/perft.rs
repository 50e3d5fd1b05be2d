use clap::Parser;
use minichess::board::{perft, Board, START_LAYOUT};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = String::from(START_LAYOUT))]
    layout: String,

    #[arg(short, long, default_value_t = 4)]
    depth: u8,

    /// Print the node count below each root move
    #[arg(long)]
    divide: bool,
}

fn main() {
    let args = Args::parse();

    let board = match Board::from_layout(&args.layout) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    println!("Running perft on layout '{}' at depth {}", args.layout, args.depth);

    let start = std::time::Instant::now();
    let nodes = if args.divide && args.depth > 0 {
        let mut total = 0;
        for mv in board.generate_moves(board.side) {
            let n = perft(&board.make_move(mv), args.depth - 1);
            println!("{}: {}", mv, n);
            total += n;
        }
        total
    } else {
        perft(&board, args.depth)
    };
    let duration = start.elapsed();

    println!(
        "perft({}) = {} nodes ({} ms, {:.2} Mnps)",
        args.depth,
        nodes,
        duration.as_millis(),
        nodes as f64 / (duration.as_micros().max(1) as f64)
    );
}
