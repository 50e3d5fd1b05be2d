pub mod engine_loop;
pub mod parser;

pub use engine_loop::{process_line, run_loop, Session};
pub use parser::{parse_command, Command, GoParams};
