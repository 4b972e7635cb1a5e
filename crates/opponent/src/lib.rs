//! Picks moves for the automated opponent at a chosen difficulty.

use anyhow::{bail, Result};
use chess_ai_core::{error::SelectError, rules::Rules, uci::UciOptions, Engine};
use greedy_bot::GreedyEngine;
use log::{debug, info};
use minimax_bot::AlphaBetaEngine;
use rand::{rngs::StdRng, thread_rng, Rng};
use random_bot::RandomEngine;

pub mod difficulty;

pub use difficulty::Difficulty;

/// Selects a move for `position` at `difficulty`, leaving `position` as it
/// was. The random tier draws from the thread-local generator.
pub fn select_move<R: Rules>(
    position: &mut R,
    difficulty: &Difficulty,
) -> Result<R::Move, SelectError> {
    match *difficulty {
        Difficulty::Random => random_bot::select(position, &mut thread_rng()),
        Difficulty::Greedy => greedy_bot::select(position),
        Difficulty::AlphaBeta { depth } => minimax_bot::select(position, depth),
    }
}

/// Like [`select_move`], with the difficulty given by name (see
/// [`Difficulty`]'s `FromStr`).
pub fn select_move_named<R: Rules>(position: &mut R, tag: &str) -> Result<R::Move, SelectError> {
    select_move(position, &tag.parse()?)
}

/// An [`Engine`] that dispatches to the selector for its difficulty.
#[derive(Debug, Clone)]
pub struct Opponent<G = StdRng> {
    difficulty: Difficulty,
    random: RandomEngine<G>,
}

impl Opponent {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            random: RandomEngine::new(),
        }
    }
}

impl<G: Rng> Opponent<G> {
    /// Uses `rng` for the random tier, so games against it can be replayed.
    pub fn with_rng(difficulty: Difficulty, rng: G) -> Self {
        Self {
            difficulty,
            random: RandomEngine::with_rng(rng),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        info!("Difficulty set to {difficulty}");
        self.difficulty = difficulty;
    }
}

impl<R: Rules, G: Rng> Engine<R> for Opponent<G> {
    fn best_move(&mut self, position: &mut R) -> Result<R::Move, SelectError> {
        debug!("Selecting a move at difficulty {}", self.difficulty);

        match self.difficulty {
            Difficulty::Random => self.random.best_move(position),
            Difficulty::Greedy => GreedyEngine.best_move(position),
            Difficulty::AlphaBeta { depth } => AlphaBetaEngine::new(depth).best_move(position),
        }
    }

    fn name(&self) -> &str {
        "Opponent"
    }
}

impl<G: Rng> UciOptions for Opponent<G> {
    fn declarations(&self) -> Vec<String> {
        vec![format!(
            "option name Difficulty type string default {}",
            Difficulty::default()
        )]
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<()> {
        if !name.eq_ignore_ascii_case("difficulty") {
            bail!("Unknown option: {name}");
        }

        self.set_difficulty(value.parse()?);
        Ok(())
    }
}
