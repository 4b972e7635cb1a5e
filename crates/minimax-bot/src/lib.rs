//! Depth-bounded minimax with alpha-beta pruning.
//!
//! The root is always searched as the maximizing side of [`evaluate`], each
//! root move with a fresh `(-inf, +inf)` window, and ties between root moves
//! go to the move enumerated first. Terminal nodes (depth exhausted, game
//! over, or no legal moves) are scored with the plain material evaluation;
//! checkmate and stalemate get no special score.

use std::num::NonZeroU32;

use chess_ai_core::{
    error::SelectError,
    eval::{evaluate, Score, SCORE_INFINITY},
    rules::Rules,
    Engine,
};
use log::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pruning {
    #[default]
    Enabled,
    /// Every node is searched with the full window. Only useful to check
    /// that pruning never changes the result.
    Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchStats {
    /// Positions visited, root children included.
    pub nodes: u64,
    /// Move loops cut short because `beta <= alpha`.
    pub cutoffs: u64,
}

#[derive(Debug)]
struct Searcher {
    pruning: Pruning,
    stats: SearchStats,
}

impl Searcher {
    fn new(pruning: Pruning) -> Self {
        Self {
            pruning,
            stats: SearchStats::default(),
        }
    }

    fn search<R: Rules>(
        &mut self,
        position: &mut R,
        depth: u32,
        maximizing: bool,
        mut alpha: Score,
        mut beta: Score,
    ) -> Score {
        self.stats.nodes += 1;

        if depth == 0 {
            return evaluate(position);
        }

        // Same as `is_game_over`, without generating the moves twice
        let moves = position.legal_moves();
        if moves.is_empty() || position.is_automatic_draw() {
            return evaluate(position);
        }

        let prune = self.pruning == Pruning::Enabled;

        if maximizing {
            let mut max_eval = -SCORE_INFINITY;
            for m in &moves {
                let eval = self.search(&mut *position.play(m), depth - 1, false, alpha, beta);
                max_eval = max_eval.max(eval);

                if prune {
                    alpha = alpha.max(eval);
                    if beta <= alpha {
                        self.stats.cutoffs += 1;
                        break;
                    }
                }
            }
            max_eval
        } else {
            let mut min_eval = SCORE_INFINITY;
            for m in &moves {
                let eval = self.search(&mut *position.play(m), depth - 1, true, alpha, beta);
                min_eval = min_eval.min(eval);

                if prune {
                    beta = beta.min(eval);
                    if beta <= alpha {
                        self.stats.cutoffs += 1;
                        break;
                    }
                }
            }
            min_eval
        }
    }

    fn select<R: Rules>(
        &mut self,
        position: &mut R,
        depth: NonZeroU32,
    ) -> Result<(R::Move, Score), SelectError> {
        let mut best: Option<(R::Move, Score)> = None;

        for m in position.legal_moves() {
            let score = self.search(
                &mut *position.play(&m),
                depth.get() - 1,
                false,
                -SCORE_INFINITY,
                SCORE_INFINITY,
            );
            trace!("alphabeta: {m} scores {score}");

            if best.as_ref().map_or(true, |(_, best_score)| score > *best_score) {
                best = Some((m, score));
            }
        }

        best.ok_or(SelectError::NoLegalMoves)
    }
}

/// Minimax value of `position` searched `depth` plies deep.
pub fn search<R: Rules>(
    position: &mut R,
    depth: u32,
    maximizing: bool,
    alpha: Score,
    beta: Score,
) -> Score {
    Searcher::new(Pruning::Enabled).search(position, depth, maximizing, alpha, beta)
}

/// Best root move at `depth` plies, root move included.
pub fn select<R: Rules>(position: &mut R, depth: NonZeroU32) -> Result<R::Move, SelectError> {
    AlphaBetaEngine::new(depth).best_move(position)
}

/// Hard opponent.
#[derive(Debug, Clone)]
pub struct AlphaBetaEngine {
    depth: NonZeroU32,
    pruning: Pruning,
    stats: SearchStats,
}

impl AlphaBetaEngine {
    pub const DEFAULT_DEPTH: NonZeroU32 = match NonZeroU32::new(3) {
        Some(depth) => depth,
        None => unreachable!(),
    };

    pub fn new(depth: NonZeroU32) -> Self {
        Self {
            depth,
            pruning: Pruning::Enabled,
            stats: SearchStats::default(),
        }
    }

    pub fn with_pruning(mut self, pruning: Pruning) -> Self {
        self.pruning = pruning;
        self
    }

    pub fn depth(&self) -> NonZeroU32 {
        self.depth
    }

    /// Counters from the most recent search.
    pub fn stats(&self) -> SearchStats {
        self.stats
    }
}

impl Default for AlphaBetaEngine {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DEPTH)
    }
}

impl<R: Rules> Engine<R> for AlphaBetaEngine {
    fn best_move(&mut self, position: &mut R) -> Result<R::Move, SelectError> {
        let mut searcher = Searcher::new(self.pruning);
        let result = searcher.select(position, self.depth);
        self.stats = searcher.stats;

        let (m, score) = result?;
        debug!(
            "alphabeta: chose {m} with score {score} at depth {} ({} nodes, {} cutoffs)",
            self.depth, self.stats.nodes, self.stats.cutoffs
        );
        Ok(m)
    }

    fn name(&self) -> &str {
        "AlphaBeta"
    }
}
