use crate::{
    game::{Board, BoardPos, CoordOffsetTyp, Move, Piece},
    util::BitBoard,
};

const ROOK_OFFSETS: [(CoordOffsetTyp, CoordOffsetTyp); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP_OFFSETS: [(CoordOffsetTyp, CoordOffsetTyp); 4] = [(1, 1), (-1, -1), (1, -1), (-1, 1)];
const QUEEN_OFFSETS: [(CoordOffsetTyp, CoordOffsetTyp); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
];
const KNIGHT_OFFSETS: [(CoordOffsetTyp, CoordOffsetTyp); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];
const KING_OFFSETS: [(CoordOffsetTyp, CoordOffsetTyp); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
];

impl Board {
    fn generate_sliding_moves(&self, pos: BoardPos, moves: &mut Vec<Move>) {
        let piece = self[pos];
        let directions = if piece.is_rook() {
            &ROOK_OFFSETS[..]
        } else if piece.is_bishop() {
            &BISHOP_OFFSETS[..]
        } else if piece.is_queen() {
            &QUEEN_OFFSETS[..]
        } else {
            return;
        };

        for &offset in directions {
            let mut current_pos = pos.add_offset(offset);

            while let Some(p) = current_pos {
                let target = self[p];

                if target.is_empty() {
                    moves.push(Move::new(pos, p));
                    current_pos = p.add_offset(offset);
                    continue;
                }

                if target.is_opponent(self.white_to_move) {
                    moves.push(Move::new(pos, p));
                }

                break;
            }
        }
    }

    fn generate_pawn_moves(&self, pos: BoardPos, moves: &mut Vec<Move>) {
        if !self[pos].is_pawn() {
            return;
        }

        let white = self.white_to_move;
        let rank_offset = white as CoordOffsetTyp * 2 - 1;
        let mut destinations = vec![];

        // Square in front of pawn
        let single = pos.add_offset((0, rank_offset));
        if let Some(dest) = single.filter(|&p| self[p].is_empty()) {
            destinations.push(dest);
        }

        // Take to both sides
        for side in [1, -1] {
            if let Some(dest) = pos
                .add_offset((side, rank_offset))
                .filter(|&p| self[p].is_opponent(white))
            {
                destinations.push(dest);
            }
        }

        let promotion_rank = if white { 6 } else { 1 };
        if pos.rank == promotion_rank {
            for &dest in &destinations {
                for promotion in [Piece::WQueen, Piece::WRook, Piece::WBishop, Piece::WKnight] {
                    moves.push(Move::new_promotion(pos, dest, promotion.to_side(white)));
                }
            }
        } else {
            moves.extend(destinations.iter().map(|&dest| Move::new(pos, dest)));
        }

        let starting_rank = if white { 1 } else { 6 };
        if pos.rank == starting_rank && single.is_some_and(|p| self[p].is_empty()) {
            if let Some(double) = pos
                .add_offset((0, rank_offset * 2))
                .filter(|&p| self[p].is_empty())
            {
                moves.push(Move::new(pos, double));
            }
        }

        if let Some(ep_file) = self.en_passant() {
            let ep_rank = if white { 4 } else { 3 };
            if pos.rank == ep_rank && pos.file.abs_diff(ep_file) == 1 {
                if let Some(dest) = BoardPos::new(ep_file, pos.rank).add_offset((0, rank_offset)) {
                    moves.push(Move::new(pos, dest));
                }
            }
        }
    }

    fn generate_offsetting_moves(&self, pos: BoardPos, moves: &mut Vec<Move>) {
        let piece = self[pos];
        let offsets = if piece.is_knight() {
            KNIGHT_OFFSETS
        } else if piece.is_king() {
            KING_OFFSETS
        } else {
            return;
        };

        for offset in offsets {
            if let Some(dest) = pos.add_offset(offset) {
                if self[dest].is_empty() || self[dest].is_opponent(self.white_to_move) {
                    moves.push(Move::new(pos, dest));
                }
            }
        }
    }

    fn generate_castling_moves(&self, pos: BoardPos, moves: &mut Vec<Move>) {
        let white = self.white_to_move;
        if !self[pos].is_king() || pos != Self::CASTLE_FROM_POS.to_side(white) {
            return;
        }

        if !self.castling().get(white, true) && !self.castling().get(white, false) {
            return;
        }

        let attacked_squares = self.attacked_squares();

        if attacked_squares[Self::CASTLE_FROM_POS.to_side(white)] {
            // King is in check
            return;
        }

        let back_rank = Self::CASTLE_FROM_POS.to_side(white).rank;
        // Pawn pushes are not attacks, so pawn captures onto the castling
        // path are checked separately.
        let pawn_rank = if white { 1 } else { 6 };
        let enemy_pawn_on = |file| {
            let p = self[BoardPos::new(file, pawn_rank)];
            p.is_pawn() && p.is_opponent(white)
        };

        let king_side_clear = self.castling().get(white, true)
            && ((Self::CASTLE_FROM_POS.file + 1)..7).all(|file| {
                let p = BoardPos::new(file, back_rank);
                self[p].is_empty() && !attacked_squares[p]
            })
            && !(Self::CASTLE_FROM_POS.file..=7).any(enemy_pawn_on);

        if king_side_clear {
            moves.push(Move::new(pos, Self::CASTLE_POSITIONS[1].to_side(white)));
        }

        let queen_side_clear = self.castling().get(white, false)
            && self[BoardPos::new(1, back_rank)].is_empty()
            && (2..Self::CASTLE_FROM_POS.file).all(|file| {
                let p = BoardPos::new(file, back_rank);
                self[p].is_empty() && !attacked_squares[p]
            })
            && !(1..=Self::CASTLE_FROM_POS.file).any(enemy_pawn_on);

        if queen_side_clear {
            moves.push(Move::new(pos, Self::CASTLE_POSITIONS[0].to_side(white)));
        }
    }

    /// Pseudo-legal moves of the piece on `pos`, if it belongs to the side to move.
    pub fn generate_moves_at(&self, pos: BoardPos, consider_castling: bool) -> Vec<Move> {
        let mut moves = vec![];
        if self[pos].is_empty() || self[pos].is_white() != self.white_to_move {
            return moves;
        }

        self.generate_sliding_moves(pos, &mut moves);
        self.generate_pawn_moves(pos, &mut moves);
        self.generate_offsetting_moves(pos, &mut moves);

        if consider_castling {
            self.generate_castling_moves(pos, &mut moves);
        }

        moves
    }

    pub fn generate_moves(&self, consider_castling: bool) -> Vec<Move> {
        BoardPos::all()
            .flat_map(|pos| self.generate_moves_at(pos, consider_castling))
            .collect()
    }

    /// Squares the side not to move could move a piece onto.
    pub fn attacked_squares(&self) -> BitBoard {
        let mut opponent = self.detached();
        opponent.white_to_move = !opponent.white_to_move;

        let mut attacked = BitBoard::default();
        for m in opponent.generate_moves(false) {
            attacked.set(m.to_pos, true);
        }

        attacked
    }

    pub fn in_check(&self) -> bool {
        self.find_first(Piece::WKing.to_side(self.white_to_move))
            .is_some_and(|king| self.attacked_squares()[king])
    }

    /// Legal moves in a stable order: pieces file by file, and per piece
    /// sliding, pawn, knight/king, then castling moves.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mover = Piece::WKing.to_side(self.white_to_move);

        self.generate_moves(true)
            .into_iter()
            .filter(|m| {
                let mut after = self.detached();
                after.push(m);
                after
                    .find_first(mover)
                    .map_or(true, |king| !after.generate_moves(false).iter().any(|r| r.to_pos == king))
            })
            .collect()
    }
}
