//! The narrow interface move selectors use to explore a game.
//!
//! Selectors never construct or validate moves. They enumerate what the
//! rules engine reports as legal, push a candidate, look at the result and
//! pop it again, leaving the position exactly as they found it.

use std::{
    cell::Cell,
    fmt::{Debug, Display},
    ops::{Deref, DerefMut},
};

use crate::game::{Board, BoardPos, Move, PieceKind, Side};

pub trait Rules {
    type Move: Clone + PartialEq + Debug + Display;

    /// Legal moves in a stable order. Selectors break ties by this order.
    fn legal_moves(&self) -> Vec<Self::Move>;

    fn push(&mut self, mv: &Self::Move);

    /// Takes back the last pushed move. Popping with nothing pushed is a
    /// contract violation and must not be silently ignored.
    fn pop(&mut self);

    /// The game is drawn without either side claiming it, for example by
    /// insufficient material. Checkmate and stalemate are not covered: they
    /// show up as an empty move list.
    fn is_automatic_draw(&self) -> bool;

    fn is_game_over(&self) -> bool {
        self.is_automatic_draw() || self.legal_moves().is_empty()
    }

    fn piece_at(&self, pos: BoardPos) -> Option<(PieceKind, Side)>;

    /// Pushes `mv` for as long as the returned guard lives.
    fn play(&mut self, mv: &Self::Move) -> PlayedMove<'_, Self>
    where
        Self: Sized,
    {
        PlayedMove::new(self, mv)
    }
}

/// A move pushed onto a position, popped again when dropped.
///
/// Dereferences to the position in its post-move state, so callers can keep
/// exploring through it. Early returns, `break`s out of a move loop and
/// unwinding panics all pop exactly once.
pub struct PlayedMove<'a, R: Rules> {
    position: &'a mut R,
}

impl<'a, R: Rules> PlayedMove<'a, R> {
    pub fn new(position: &'a mut R, mv: &R::Move) -> Self {
        position.push(mv);
        Self { position }
    }
}

impl<R: Rules> Deref for PlayedMove<'_, R> {
    type Target = R;

    fn deref(&self) -> &Self::Target {
        self.position
    }
}

impl<R: Rules> DerefMut for PlayedMove<'_, R> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.position
    }
}

impl<R: Rules> Drop for PlayedMove<'_, R> {
    fn drop(&mut self) {
        self.position.pop();
    }
}

impl Rules for Board {
    type Move = Move;

    fn legal_moves(&self) -> Vec<Move> {
        Board::legal_moves(self)
    }

    fn push(&mut self, mv: &Move) {
        Board::push(self, mv)
    }

    fn pop(&mut self) {
        Board::pop(self)
    }

    fn is_automatic_draw(&self) -> bool {
        self.automatic_draw().is_some()
    }

    fn is_game_over(&self) -> bool {
        self.outcome().is_some()
    }

    fn piece_at(&self, pos: BoardPos) -> Option<(PieceKind, Side)> {
        let piece = self[pos];
        Some((piece.kind()?, piece.side()?))
    }
}

/// Wraps a position and records how it was explored.
#[derive(Debug, Clone, Default)]
pub struct Tracked<R> {
    inner: R,
    pushes: usize,
    pops: usize,
    outstanding: usize,
    deepest: usize,
    generations: Cell<usize>,
}

impl<R> Tracked<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            pushes: 0,
            pops: 0,
            outstanding: 0,
            deepest: 0,
            generations: Cell::new(0),
        }
    }

    pub fn pushes(&self) -> usize {
        self.pushes
    }

    pub fn pops(&self) -> usize {
        self.pops
    }

    /// Moves pushed through this wrapper and not yet popped.
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    /// Most moves that were ever outstanding at once.
    pub fn deepest(&self) -> usize {
        self.deepest
    }

    /// Calls to `legal_moves`, including those made by `is_game_over`.
    pub fn generations(&self) -> usize {
        self.generations.get()
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Rules> Rules for Tracked<R> {
    type Move = R::Move;

    fn legal_moves(&self) -> Vec<R::Move> {
        self.generations.set(self.generations.get() + 1);
        self.inner.legal_moves()
    }

    fn push(&mut self, mv: &R::Move) {
        self.inner.push(mv);
        self.pushes += 1;
        self.outstanding += 1;
        self.deepest = self.deepest.max(self.outstanding);
    }

    fn pop(&mut self) {
        self.inner.pop();
        self.pops += 1;
        self.outstanding = self.outstanding.saturating_sub(1);
    }

    fn is_automatic_draw(&self) -> bool {
        self.inner.is_automatic_draw()
    }

    fn piece_at(&self, pos: BoardPos) -> Option<(PieceKind, Side)> {
        self.inner.piece_at(pos)
    }
}
