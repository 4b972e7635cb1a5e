use thiserror::Error;

/// Why a selector could not produce a move.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectError {
    /// The rules engine reported no legal move for the position.
    #[error("no legal moves in this position")]
    NoLegalMoves,

    /// A difficulty tag outside `random`, `greedy` and `alphabeta[:depth]`.
    #[error("unknown difficulty: {0:?}")]
    UnknownDifficulty(String),
}
