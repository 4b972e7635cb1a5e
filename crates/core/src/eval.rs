//! Static material evaluation.

use crate::{
    game::{BoardPos, PieceKind, Side},
    rules::Rules,
};

pub type Score = i32;

/// Bound for search windows. Never returned as a real score.
pub const SCORE_INFINITY: Score = Score::MAX;

/// The side whose material counts as positive. The automated opponent plays
/// black, and every selector maximizes from this perspective regardless of
/// whose turn it is.
pub const MAXIMIZING_SIDE: Side = Side::Black;

pub const fn piece_value(kind: PieceKind) -> Score {
    match kind {
        PieceKind::Pawn => 1,
        PieceKind::Knight => 3,
        PieceKind::Bishop => 3,
        PieceKind::Rook => 5,
        PieceKind::Queen => 9,
        // Large enough that losing the king outweighs any material swing
        PieceKind::King => 1000,
    }
}

/// Material balance of the position from [`MAXIMIZING_SIDE`]'s point of view.
///
/// Depends on piece placement only, not on the side to move.
pub fn evaluate<R: Rules + ?Sized>(position: &R) -> Score {
    BoardPos::all()
        .filter_map(|pos| position.piece_at(pos))
        .map(|(kind, side)| {
            if side == MAXIMIZING_SIDE {
                piece_value(kind)
            } else {
                -piece_value(kind)
            }
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Board;

    #[test]
    fn start_position_is_balanced() {
        assert_eq!(evaluate(&Board::default()), 0);
    }

    #[test]
    fn black_material_counts_positive() {
        // Black is a rook up
        let board = Board::from_fen("r3k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(evaluate(&board), 5);

        // White is a queen and a knight up
        let board = Board::from_fen("4k3/8/8/8/8/8/8/1N1QK3 b - - 0 1").unwrap();
        assert_eq!(evaluate(&board), -12);
    }

    #[test]
    fn side_to_move_does_not_matter() {
        let white = Board::from_fen("4k3/3p4/8/8/8/8/8/3BK3 w - - 0 1").unwrap();
        let black = Board::from_fen("4k3/3p4/8/8/8/8/8/3BK3 b - - 0 1").unwrap();
        assert_eq!(evaluate(&white), -2);
        assert_eq!(evaluate(&white), evaluate(&black));
    }
}
