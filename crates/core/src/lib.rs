use error::SelectError;
use rules::Rules;

pub mod error;
pub mod eval;
pub mod game;
pub mod movegen;
pub mod perft;
pub mod renderer;
pub mod rules;
pub mod uci;
pub mod util;

/// A move selector.
///
/// Implementations may explore `position` freely but must hand it back
/// exactly as they received it.
pub trait Engine<R: Rules> {
    fn best_move(&mut self, position: &mut R) -> Result<R::Move, SelectError>;

    fn name(&self) -> &str;
}
