use crate::rules::Rules;

/// Counts leaf nodes of the legal move tree `depth` plies deep.
///
/// See <https://www.chessprogramming.org/Perft_Results>.
pub fn perft<R: Rules>(position: &mut R, depth: usize) -> usize {
    if depth == 0 {
        return 1;
    }

    let moves = position.legal_moves();
    if depth == 1 {
        return moves.len();
    }

    moves
        .iter()
        .map(|m| perft(&mut *position.play(m), depth - 1))
        .sum()
}
