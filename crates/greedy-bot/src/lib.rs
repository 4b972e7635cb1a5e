use chess_ai_core::{
    error::SelectError,
    eval::{evaluate, Score},
    rules::Rules,
    Engine,
};
use log::{debug, trace};

/// One-ply material lookahead.
///
/// Plays each legal move, scores the resulting position with [`evaluate`] and
/// keeps the highest. The score is taken as is, without flipping it for the
/// side to move. Ties go to the move enumerated first.
pub fn select<R: Rules>(position: &mut R) -> Result<R::Move, SelectError> {
    let mut best: Option<(R::Move, Score)> = None;

    for m in position.legal_moves() {
        let score = evaluate(&*position.play(&m));
        trace!("greedy: {m} scores {score}");

        if best.as_ref().map_or(true, |(_, best_score)| score > *best_score) {
            best = Some((m, score));
        }
    }

    let (m, score) = best.ok_or(SelectError::NoLegalMoves)?;
    debug!("greedy: chose {m} with score {score}");
    Ok(m)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyEngine;

impl<R: Rules> Engine<R> for GreedyEngine {
    fn best_move(&mut self, position: &mut R) -> Result<R::Move, SelectError> {
        select(position)
    }

    fn name(&self) -> &str {
        "Greedy"
    }
}
