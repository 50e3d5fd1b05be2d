use clap::Parser;
use minichess::board::{Board, Color, START_LAYOUT};
use minichess::eval::{evaluate_breakdown, piece_value};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = String::from(START_LAYOUT))]
    layout: String,
}

fn main() {
    let args = Args::parse();

    println!("Loading layout: {}", args.layout);
    let board = match Board::from_layout(&args.layout) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    println!("Board:\n{}", board);
    println!("Side to move: {}", board.side);

    for color in [Color::White, Color::Black] {
        let terms = evaluate_breakdown(&board, color);
        println!(
            "{}: material {} center {} mobility {:.1} king safety {} => {:.1}",
            color,
            terms.material,
            terms.center,
            terms.mobility,
            terms.king_safety,
            terms.total()
        );
        println!(
            "  in check: {}  legal moves: {}",
            board.is_in_check(color),
            board.legal_move_count(color)
        );
    }

    // Dump material manually
    let mut white = 0;
    let mut black = 0;
    for color in [Color::White, Color::Black] {
        for (sq, p) in board.pieces(color) {
            println!("{:?} {:?} on {} ({})", p.color, p.kind, sq, piece_value(p.kind));
            match p.color {
                Color::White => white += piece_value(p.kind),
                Color::Black => black += piece_value(p.kind),
            }
        }
    }
    println!("Manual White Mat: {}", white);
    println!("Manual Black Mat: {}", black);
    println!("Manual Diff: {}", white - black);
}
