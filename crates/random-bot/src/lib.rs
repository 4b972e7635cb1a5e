use chess_ai_core::{error::SelectError, rules::Rules, Engine};
use log::debug;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

/// Picks uniformly among the legal moves.
pub fn select<R: Rules, G: Rng + ?Sized>(position: &R, rng: &mut G) -> Result<R::Move, SelectError> {
    let moves = position.legal_moves();
    let m = moves.choose(rng).cloned().ok_or(SelectError::NoLegalMoves)?;
    debug!("random: picked {m} out of {} moves", moves.len());
    Ok(m)
}

/// Easy opponent. Owns its random source so tests can seed it.
#[derive(Debug, Clone)]
pub struct RandomEngine<G = StdRng> {
    rng: G,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Rng> RandomEngine<G> {
    pub fn with_rng(rng: G) -> Self {
        Self { rng }
    }

    pub fn rng_mut(&mut self) -> &mut G {
        &mut self.rng
    }
}

impl<R: Rules, G: Rng> Engine<R> for RandomEngine<G> {
    fn best_move(&mut self, position: &mut R) -> Result<R::Move, SelectError> {
        select(position, &mut self.rng)
    }

    fn name(&self) -> &str {
        "Rando"
    }
}
