use anyhow::{Context, Result};
use chess_ai_core::uci;
use log::info;
use opponent::{Difficulty, Opponent};

/// Usage: `opponent [difficulty]`, then speak UCI on stdin/stdout.
/// Logs go to stderr, filtered by `RUST_LOG`.
fn main() -> Result<()> {
    env_logger::init();

    let difficulty = match std::env::args().nth(1) {
        Some(tag) => tag
            .parse::<Difficulty>()
            .with_context(|| format!("Invalid difficulty argument {tag:?}"))?,
        None => Difficulty::default(),
    };
    info!("Starting at difficulty {difficulty}");

    uci::start_uci("Opponent", &mut Opponent::new(difficulty))
}
