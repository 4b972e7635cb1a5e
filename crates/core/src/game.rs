use std::{
    collections::HashMap,
    fmt::{Display, Formatter},
    ops::{Index, IndexMut},
    str::FromStr,
};

use anyhow::{anyhow, ensure, Context, Result};
use derivative::Derivative;

pub type CoordTyp = u8;
pub type CoordOffsetTyp = i8;

type BoardData = [[Piece; 8]; 8];

/// A chess position plus the undo history of every move pushed onto it.
///
/// Equality and hashing only look at the position itself, never at the
/// history, so a board that has been explored and restored compares equal
/// to the original.
#[derive(Derivative)]
#[derivative(Debug, Clone, Eq, Hash, PartialEq)]
pub struct Board {
    pieces: BoardData,
    pub(crate) white_to_move: bool,
    castling: CastlingRights,
    en_passant: Option<CoordTyp>,
    fullmoves: usize,
    halfmoves: usize,
    #[derivative(Hash = "ignore")]
    position_counts: HashMap<PositionKey, usize>,
    #[derivative(Debug = "ignore", Hash = "ignore", PartialEq = "ignore")]
    history: Vec<Undo>,
}

/// Everything `push` can change, captured before the move is made.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Undo {
    pieces: BoardData,
    white_to_move: bool,
    castling: CastlingRights,
    en_passant: Option<CoordTyp>,
    fullmoves: usize,
    halfmoves: usize,
    position_counts: HashMap<PositionKey, usize>,
}

/// What has to match for two positions to count as a repetition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct PositionKey {
    pieces: BoardData,
    white_to_move: bool,
    castling: CastlingRights,
    /// Only set while a pawn of the side to move stands next to the target.
    en_passant: Option<CoordTyp>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Piece {
    Empty,
    WKing,
    WQueen,
    WRook,
    WBishop,
    WKnight,
    WPawn,
    BKing,
    BQueen,
    BRook,
    BBishop,
    BKnight,
    BPawn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum GameOutcome {
    Checkmate,
    Draw(DrawType),
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DrawType {
    Stalemate,
    InsufficientMaterial,
    FivefoldRepetition,
    SeventyFiveMoveRule,
    /// Claimable only, see [`Board::claimable_draw`].
    ThreefoldRepetition,
    /// Claimable only, see [`Board::claimable_draw`].
    FiftyMoveRule,
}

#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
pub struct CastlingRights {
    pub white_king: bool,
    pub white_queen: bool,
    pub black_king: bool,
    pub black_queen: bool,
}

impl CastlingRights {
    pub fn get(&self, white: bool, king_side: bool) -> bool {
        match (white, king_side) {
            (true, true) => self.white_king,
            (true, false) => self.white_queen,
            (false, true) => self.black_king,
            (false, false) => self.black_queen,
        }
    }

    /// Clears the `(queen_side, king_side)` rights flagged in `value`.
    pub fn invalidate(&mut self, white: bool, value: (bool, bool)) {
        if white {
            self.white_queen &= !value.0;
            self.white_king &= !value.1;
        } else {
            self.black_queen &= !value.0;
            self.black_king &= !value.1;
        }
    }

    /// `(white, king_side)` for each right, in FEN order.
    pub const ALL: [(bool, bool); 4] = [(true, true), (true, false), (false, true), (false, false)];

    fn flag(white: bool, king_side: bool) -> char {
        match (white, king_side) {
            (true, true) => 'K',
            (true, false) => 'Q',
            (false, true) => 'k',
            (false, false) => 'q',
        }
    }

    pub fn to_fen(&self) -> String {
        let fen: String = Self::ALL
            .into_iter()
            .filter(|&(white, king_side)| self.get(white, king_side))
            .map(|(white, king_side)| Self::flag(white, king_side))
            .collect();

        if fen.is_empty() {
            "-".to_string()
        } else {
            fen
        }
    }
}

impl Board {
    pub const DEFAULT_FEN: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    pub const CASTLE_POSITIONS: [BoardPos; 2] = [BoardPos::new(2, 0), BoardPos::new(6, 0)];
    pub const CASTLE_FROM_POS: BoardPos = BoardPos::new(4, 0);

    pub fn from_fen(fen: &str) -> Result<Board> {
        let mut pieces = [[Piece::Empty; 8]; 8];
        let mut row: usize = 7;
        let mut col: usize = 0;

        let segments: [&str; 6] = fen
            .split_ascii_whitespace()
            .collect::<Vec<_>>()
            .try_into()
            .map_err(|_| anyhow!("Invalid fen, expected 6 fields: {fen}"))?;
        let [placement, player_move, castling, en_passant, halfmove, fullmove] = segments;
        for c in placement.chars() {
            match c {
                '1'..='8' => {
                    col += c
                        .to_digit(10)
                        .context(format!("Failed to parse number {c}"))?
                        as usize
                }
                '/' => {
                    row = row.checked_sub(1).context("Too many ranks in fen")?;
                    col = 0;
                }
                _ => {
                    let piece = Piece::from_str(&c.to_string())
                        .with_context(|| format!("Invalid fen character: {c}"))?;
                    *pieces
                        .get_mut(row)
                        .and_then(|r| r.get_mut(col))
                        .context(format!("Rank overflow in fen: {placement}"))? = piece;
                    col += 1;
                }
            }
        }

        let white_to_move = match player_move {
            "w" => true,
            "b" => false,
            _ => return Err(anyhow!("Invalid side to move: {player_move}")),
        };
        let castling = CastlingRights {
            white_king: castling.contains('K'),
            white_queen: castling.contains('Q'),
            black_king: castling.contains('k'),
            black_queen: castling.contains('q'),
        };
        let en_passant = if en_passant == "-" {
            None
        } else {
            Some(BoardPos::from_str(en_passant)?.file)
        };
        let halfmoves = halfmove.parse().context("Invalid halfmove clock")?;
        let fullmoves = fullmove.parse().context("Invalid fullmove number")?;

        let mut board = Self {
            pieces,
            white_to_move,
            castling,
            en_passant,
            fullmoves,
            halfmoves,
            position_counts: HashMap::new(),
            history: Vec::new(),
        };
        board
            .validate()
            .with_context(|| format!("Impossible position in fen: {fen}"))?;
        board.position_counts.insert(board.position_key(), 1);

        Ok(board)
    }

    /// Rejects positions move generation cannot handle: a king missing or
    /// duplicated, pawns on a back rank, castling rights without king and
    /// rook at home, or the side that just moved left in check.
    fn validate(&self) -> Result<()> {
        for king in [Piece::WKing, Piece::BKing] {
            let count = BoardPos::all().filter(|&pos| self[pos] == king).count();
            ensure!(count == 1, "expected one {king:?}, found {count}");
        }

        ensure!(
            !BoardPos::all().any(|pos| (pos.rank == 0 || pos.rank == 7) && self[pos].is_pawn()),
            "pawn on a back rank"
        );

        for (white, king_side) in CastlingRights::ALL {
            if !self.castling.get(white, king_side) {
                continue;
            }
            let rook_file = if king_side { 7 } else { 0 };
            ensure!(
                self[Self::CASTLE_FROM_POS.to_side(white)] == Piece::WKing.to_side(white)
                    && self[BoardPos::new(rook_file, 0).to_side(white)]
                        == Piece::WRook.to_side(white),
                "castling right {} without king and rook on their home squares",
                CastlingRights::flag(white, king_side)
            );
        }

        let mut waiting = self.detached();
        waiting.white_to_move = !self.white_to_move;
        ensure!(!waiting.in_check(), "side not to move is in check");

        Ok(())
    }

    pub fn to_fen(&self) -> String {
        let position = (0..8)
            .rev()
            .map(|rank| {
                let mut rank_str = String::new();

                let mut consecutive_empty = 0;
                for file in 0..8 {
                    let piece = self[BoardPos::new(file, rank)];

                    if piece.is_empty() {
                        consecutive_empty += 1;
                    } else {
                        if consecutive_empty > 0 {
                            rank_str.push_str(&consecutive_empty.to_string());
                            consecutive_empty = 0;
                        }

                        rank_str.push_str(&piece.to_string())
                    }
                }

                if consecutive_empty > 0 {
                    rank_str.push_str(&consecutive_empty.to_string());
                }

                rank_str
            })
            .collect::<Vec<_>>()
            .join("/");

        let side_to_move = if self.white_to_move { "w" } else { "b" };
        let castling = self.castling.to_fen();
        let en_passant = self.en_passant.map_or("-".to_string(), |file| {
            // Target square sits behind the pawn that just moved two squares
            let ep_rank = if self.white_to_move { 5 } else { 2 };
            BoardPos::new(file, ep_rank).to_string()
        });

        format!(
            "{position} {side_to_move} {castling} {en_passant} {} {}",
            self.halfmoves, self.fullmoves
        )
    }

    fn position_key(&self) -> PositionKey {
        let white = self.white_to_move;
        let capture_rank = if white { 4 } else { 3 };
        let en_passant = self.en_passant.filter(|&file| {
            [file.checked_sub(1), file.checked_add(1)]
                .into_iter()
                .flatten()
                .filter(|&f| f < 8)
                .any(|f| self[BoardPos::new(f, capture_rank)] == Piece::WPawn.to_side(white))
        });

        PositionKey {
            pieces: self.pieces,
            white_to_move: white,
            castling: self.castling,
            en_passant,
        }
    }

    /// How often the current position has occurred since the last
    /// irreversible move, this occurrence included.
    pub fn repetitions(&self) -> usize {
        self.position_counts
            .get(&self.position_key())
            .copied()
            .unwrap_or(0)
    }

    pub fn get(&self, pos: BoardPos) -> Option<Piece> {
        if pos.is_valid() {
            return Some(self[pos]);
        }

        None
    }

    pub fn castling(&self) -> &CastlingRights {
        &self.castling
    }

    pub fn en_passant(&self) -> Option<CoordTyp> {
        self.en_passant
    }

    /// Number of pushed moves that can still be taken back.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn find_first(&self, piece: Piece) -> Option<BoardPos> {
        BoardPos::all().find(|&pos| self[pos] == piece)
    }

    /// Copy of the position without undo history or repetition table, for
    /// throwaway lookahead inside move generation.
    pub(crate) fn detached(&self) -> Board {
        Board {
            pieces: self.pieces,
            white_to_move: self.white_to_move,
            castling: self.castling,
            en_passant: self.en_passant,
            fullmoves: self.fullmoves,
            halfmoves: self.halfmoves,
            position_counts: HashMap::new(),
            history: Vec::new(),
        }
    }

    /// Plays `m` and records what is needed to take it back with [`Board::pop`].
    pub fn push(&mut self, m: &Move) {
        self.history.push(Undo {
            pieces: self.pieces,
            white_to_move: self.white_to_move,
            castling: self.castling,
            en_passant: self.en_passant,
            fullmoves: self.fullmoves,
            halfmoves: self.halfmoves,
            position_counts: self.position_counts.clone(),
        });
        self.apply(m);
    }

    /// Takes back the most recently pushed move.
    ///
    /// # Panics
    /// If no move is outstanding. An unpaired pop means a caller broke the
    /// push/pop contract and the position can no longer be trusted.
    pub fn pop(&mut self) {
        let Some(undo) = self.history.pop() else {
            panic!("pop called with no pushed move to take back\nBoard:\n{self}");
        };

        self.pieces = undo.pieces;
        self.white_to_move = undo.white_to_move;
        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.fullmoves = undo.fullmoves;
        self.halfmoves = undo.halfmoves;
        self.position_counts = undo.position_counts;
    }

    fn castle(&mut self, m: &Move) -> bool {
        let white = self.white_to_move;
        if !self[m.from_pos].is_king() || m.from_pos != Self::CASTLE_FROM_POS.to_side(white) {
            return false;
        }

        let (rook_from, rook_to) = if m.to_pos == Self::CASTLE_POSITIONS[1].to_side(white)
            && self.castling.get(white, true)
        {
            (7, 5)
        } else if m.to_pos == Self::CASTLE_POSITIONS[0].to_side(white)
            && self.castling.get(white, false)
        {
            (0, 3)
        } else {
            return false;
        };

        self[m.to_pos] = self[m.from_pos];
        self[m.from_pos] = Piece::Empty;
        self[BoardPos::new(rook_to, 0).to_side(white)] = Piece::WRook.to_side(white);
        self[BoardPos::new(rook_from, 0).to_side(white)] = Piece::Empty;

        true
    }

    fn make_en_passant(&mut self, m: &Move) -> bool {
        if let Some(ep_file) = self.en_passant() {
            if self[m.from_pos].is_pawn() // Piece is a pawn
                && m.to_pos.file == ep_file // Piece is moving to the en passant file
                && m.from_pos.file != m.to_pos.file // Piece is not moving to the same file
                && self[m.to_pos].is_empty() // Destination square is empty
            {
                self[m.to_pos] = self[m.from_pos];
                self[m.from_pos] = Piece::Empty;
                self[BoardPos::new(ep_file, m.from_pos.rank)] = Piece::Empty;

                return true;
            }
        }

        false
    }

    fn apply(&mut self, m: &Move) {
        assert!(!self[m.to_pos].is_king(), "King captured!\nBoard:\n{self}\nMove: {m}");

        let white = self.white_to_move;
        let piece = self[m.from_pos];
        let captured = self[m.to_pos];

        // Irreversible moves can never be repeated past, so the repetition
        // table restarts after them.
        let irreversible = if self.castle(m) {
            self.castling.invalidate(white, (true, true));
            self.en_passant = None;
            self.halfmoves += 1;
            true
        } else if self.make_en_passant(m) {
            self.en_passant = None;
            self.halfmoves = 0;
            true
        } else {
            if !captured.is_empty() {
                if m.to_pos == BoardPos::new(0, 0).to_side(!white) {
                    self.castling.invalidate(!white, (true, false));
                } else if m.to_pos == BoardPos::new(7, 0).to_side(!white) {
                    self.castling.invalidate(!white, (false, true));
                }
            }

            if m.from_pos == BoardPos::new(0, 0).to_side(white) {
                self.castling.invalidate(white, (true, false));
            } else if m.from_pos == BoardPos::new(7, 0).to_side(white) {
                self.castling.invalidate(white, (false, true));
            }

            if piece.is_king() {
                self.castling.invalidate(white, (true, true));
            }

            self[m.to_pos] = m.promotion.map(|p| p.to_side(white)).unwrap_or(piece);
            self[m.from_pos] = Piece::Empty;

            let pawn_starting_rank = if white { 1 } else { 6 };
            let double_pawn_move_rank = if white { 3 } else { 4 };

            self.en_passant = if piece.is_pawn()
                && m.from_pos.rank == pawn_starting_rank
                && m.to_pos.rank == double_pawn_move_rank
            {
                Some(m.to_pos.file)
            } else {
                None
            };

            if piece.is_pawn() || !captured.is_empty() {
                self.halfmoves = 0;
                true
            } else {
                self.halfmoves += 1;
                false
            }
        };

        if !white {
            self.fullmoves += 1;
        }
        self.white_to_move = !white;

        if irreversible {
            self.position_counts.clear();
        }
        *self.position_counts.entry(self.position_key()).or_insert(0) += 1;
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        if self.legal_moves().is_empty() {
            if self.in_check() {
                return Some(GameOutcome::Checkmate);
            }
            return Some(GameOutcome::Draw(DrawType::Stalemate));
        }

        self.automatic_draw().map(GameOutcome::Draw)
    }

    /// Draws that end the game without a claim. Stalemate is left to
    /// [`Board::outcome`], since it needs move generation.
    pub fn automatic_draw(&self) -> Option<DrawType> {
        if !self.is_sufficient_material() {
            return Some(DrawType::InsufficientMaterial);
        }

        if self.halfmoves >= 150 {
            return Some(DrawType::SeventyFiveMoveRule);
        }

        if self.repetitions() >= 5 {
            return Some(DrawType::FivefoldRepetition);
        }

        None
    }

    /// Draws the side to move could claim. The game goes on unless it does.
    pub fn claimable_draw(&self) -> Option<DrawType> {
        if self.halfmoves >= 100 {
            return Some(DrawType::FiftyMoveRule);
        }

        if self.repetitions() >= 3 {
            return Some(DrawType::ThreefoldRepetition);
        }

        None
    }

    fn is_sufficient_material(&self) -> bool {
        #[derive(Default)]
        struct PieceCount {
            pawns: usize,
            rooks: usize,
            queens: usize,
            bishops: (usize, usize),
            knights: usize,
        }

        let mut counts = [PieceCount::default(), PieceCount::default()];

        for pos in BoardPos::all() {
            let piece = self[pos];
            let (Some(kind), Some(side)) = (piece.kind(), piece.side()) else {
                continue;
            };
            let counter = &mut counts[side as usize];

            match kind {
                PieceKind::King => {}
                PieceKind::Queen => counter.queens += 1,
                PieceKind::Rook => counter.rooks += 1,
                PieceKind::Knight => counter.knights += 1,
                PieceKind::Pawn => counter.pawns += 1,
                PieceKind::Bishop => {
                    if (pos.file + pos.rank) % 2 == 0 {
                        counter.bishops.0 += 1;
                    } else {
                        counter.bishops.1 += 1;
                    }
                }
            }
        }

        counts.iter().any(|side| {
            let total_bishops = side.bishops.0 + side.bishops.1;

            (side.pawns >= 1 || side.rooks >= 1 || side.queens >= 1)
                || (side.knights >= 1 && total_bishops >= 1)
                || (side.knights >= 2)
                || (side.bishops.0 >= 1 && side.bishops.1 >= 1)
        })
    }

    /// Returns if white is the current player
    pub fn white_to_move(&self) -> bool {
        self.white_to_move
    }

    pub fn side_to_move(&self) -> Side {
        if self.white_to_move {
            Side::White
        } else {
            Side::Black
        }
    }
}

impl Index<BoardPos> for Board {
    type Output = Piece;

    fn index(&self, index: BoardPos) -> &Self::Output {
        &self.pieces[index.rank as usize][index.file as usize]
    }
}

impl IndexMut<BoardPos> for Board {
    fn index_mut(&mut self, index: BoardPos) -> &mut Self::Output {
        &mut self.pieces[index.rank as usize][index.file as usize]
    }
}

impl Default for Board {
    fn default() -> Self {
        let mut pieces = [[Piece::Empty; 8]; 8];
        let back_rank = [
            Piece::WRook,
            Piece::WKnight,
            Piece::WBishop,
            Piece::WQueen,
            Piece::WKing,
            Piece::WBishop,
            Piece::WKnight,
            Piece::WRook,
        ];
        pieces[0] = back_rank;
        pieces[1] = [Piece::WPawn; 8];
        pieces[6] = [Piece::BPawn; 8];
        pieces[7] = back_rank.map(Piece::opposite);

        let mut board = Self {
            pieces,
            white_to_move: true,
            castling: CastlingRights {
                white_king: true,
                white_queen: true,
                black_king: true,
                black_queen: true,
            },
            en_passant: None,
            fullmoves: 1,
            halfmoves: 0,
            position_counts: HashMap::new(),
            history: Vec::new(),
        };
        board.position_counts.insert(board.position_key(), 1);
        board
    }
}

impl Piece {
    pub fn is_white(self) -> bool {
        self.side() == Some(Side::White)
    }

    pub fn is_black(self) -> bool {
        self.side() == Some(Side::Black)
    }

    pub fn side(self) -> Option<Side> {
        match self {
            Piece::Empty => None,
            Piece::WKing
            | Piece::WQueen
            | Piece::WRook
            | Piece::WBishop
            | Piece::WKnight
            | Piece::WPawn => Some(Side::White),
            _ => Some(Side::Black),
        }
    }

    pub fn kind(self) -> Option<PieceKind> {
        match self {
            Piece::Empty => None,
            Piece::WKing | Piece::BKing => Some(PieceKind::King),
            Piece::WQueen | Piece::BQueen => Some(PieceKind::Queen),
            Piece::WRook | Piece::BRook => Some(PieceKind::Rook),
            Piece::WBishop | Piece::BBishop => Some(PieceKind::Bishop),
            Piece::WKnight | Piece::BKnight => Some(PieceKind::Knight),
            Piece::WPawn | Piece::BPawn => Some(PieceKind::Pawn),
        }
    }

    pub fn is_opponent(self, white: bool) -> bool {
        if white {
            return self.is_black();
        }

        self.is_white()
    }

    pub fn is_empty(&self) -> bool {
        *self == Piece::Empty
    }

    pub fn is_king(self) -> bool {
        self.kind() == Some(PieceKind::King)
    }

    pub fn is_pawn(self) -> bool {
        self.kind() == Some(PieceKind::Pawn)
    }

    pub fn is_rook(self) -> bool {
        self.kind() == Some(PieceKind::Rook)
    }

    pub fn is_bishop(self) -> bool {
        self.kind() == Some(PieceKind::Bishop)
    }

    pub fn is_queen(self) -> bool {
        self.kind() == Some(PieceKind::Queen)
    }

    pub fn is_knight(self) -> bool {
        self.kind() == Some(PieceKind::Knight)
    }

    pub fn to_side(self, white: bool) -> Self {
        if !self.is_empty() && white != self.is_white() {
            return self.opposite();
        }

        self
    }

    pub fn opposite(self) -> Self {
        match self {
            Piece::WKing => Piece::BKing,
            Piece::WQueen => Piece::BQueen,
            Piece::WRook => Piece::BRook,
            Piece::WBishop => Piece::BBishop,
            Piece::WKnight => Piece::BKnight,
            Piece::WPawn => Piece::BPawn,
            Piece::BKing => Piece::WKing,
            Piece::BQueen => Piece::WQueen,
            Piece::BRook => Piece::WRook,
            Piece::BBishop => Piece::WBishop,
            Piece::BKnight => Piece::WKnight,
            Piece::BPawn => Piece::WPawn,
            Piece::Empty => Piece::Empty,
        }
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Piece::WKing => "K",
                Piece::WQueen => "Q",
                Piece::WRook => "R",
                Piece::WBishop => "B",
                Piece::WKnight => "N",
                Piece::WPawn => "P",
                Piece::BKing => "k",
                Piece::BQueen => "q",
                Piece::BRook => "r",
                Piece::BBishop => "b",
                Piece::BKnight => "n",
                Piece::BPawn => "p",
                Piece::Empty => " ",
            }
        )
    }
}

impl FromStr for Piece {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "K" => Piece::WKing,
            "Q" => Piece::WQueen,
            "R" => Piece::WRook,
            "B" => Piece::WBishop,
            "N" => Piece::WKnight,
            "P" => Piece::WPawn,
            "k" => Piece::BKing,
            "q" => Piece::BQueen,
            "r" => Piece::BRook,
            "b" => Piece::BBishop,
            "n" => Piece::BKnight,
            "p" => Piece::BPawn,
            "" => Piece::Empty,
            _ => return Err(anyhow!("Invalid piece: {s}")),
        })
    }
}

fn char_to_file(c: char) -> Result<CoordTyp> {
    match c {
        'a'..='h' => Ok(c as CoordTyp - b'a'),
        _ => Err(anyhow!("Invalid file: {c}")),
    }
}

fn char_to_rank(c: char) -> Result<CoordTyp> {
    match c {
        '1'..='8' => Ok(c as CoordTyp - b'1'),
        _ => Err(anyhow!("Invalid rank: {c}")),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct BoardPos {
    pub file: CoordTyp,
    pub rank: CoordTyp,
}

impl BoardPos {
    pub const fn new(file: CoordTyp, rank: CoordTyp) -> Self {
        Self { file, rank }
    }

    /// Every square, file by file (a1, a2, ..., a8, b1, ...). Move generation
    /// visits pieces in this order.
    pub fn all() -> impl Iterator<Item = BoardPos> {
        (0..8).flat_map(|file| (0..8).map(move |rank| BoardPos::new(file, rank)))
    }

    pub const fn flip_vert(&self) -> Self {
        Self {
            file: self.file,
            rank: 7 - self.rank,
        }
    }

    pub const fn to_side(&self, white_to_move: bool) -> Self {
        if white_to_move {
            *self
        } else {
            self.flip_vert()
        }
    }

    pub const fn is_valid(&self) -> bool {
        self.file < 8 && self.rank < 8
    }

    pub fn add_offset(&self, offset: (CoordOffsetTyp, CoordOffsetTyp)) -> Option<Self> {
        let p = Self {
            file: self.file.checked_add_signed(offset.0)?,
            rank: self.rank.checked_add_signed(offset.1)?,
        };

        if !p.is_valid() {
            return None;
        }

        Some(p)
    }
}

impl Display for BoardPos {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", (b'a' + self.file) as char, self.rank + 1)
    }
}

impl FromStr for BoardPos {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(anyhow!("Invalid board position: {s}"));
        };

        Ok(Self {
            file: char_to_file(file)?,
            rank: char_to_rank(rank)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Move {
    pub from_pos: BoardPos,
    pub to_pos: BoardPos,
    pub promotion: Option<Piece>,
}

impl Move {
    pub fn new(from_pos: BoardPos, to_pos: BoardPos) -> Self {
        Self {
            from_pos,
            to_pos,
            ..Default::default()
        }
    }

    pub fn new_promotion(from_pos: BoardPos, to_pos: BoardPos, promotion: Piece) -> Self {
        Self {
            from_pos,
            to_pos,
            promotion: Some(promotion),
        }
    }
}

/// Long algebraic notation as used by UCI, e.g. `e2e4` or `e7e8q`.
impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from_pos, self.to_pos)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.to_side(false))?;
        }

        Ok(())
    }
}

impl FromStr for Move {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let from_pos = BoardPos::from_str(s.get(0..2).context(format!("Invalid move: {s}"))?)?;
        let to_pos = BoardPos::from_str(s.get(2..4).context(format!("Invalid move: {s}"))?)?;

        let promotion = match s.get(4..) {
            None | Some("") => None,
            Some(p) => Some(Piece::from_str(p)?),
        };

        Ok(Move {
            from_pos,
            to_pos,
            promotion,
        })
    }
}
