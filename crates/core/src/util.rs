use std::ops::Index;

use crate::game::BoardPos;

/// One bit per square, indexed `rank * 8 + file`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BitBoard(pub u64);

impl BitBoard {
    fn index(pos: BoardPos) -> usize {
        (pos.rank * 8 + pos.file) as usize
    }

    pub fn set(&mut self, pos: BoardPos, value: bool) {
        self.0 |= (value as u64) << Self::index(pos);
    }

    pub fn get(&self, pos: BoardPos) -> bool {
        (self.0 >> Self::index(pos)) & 1 == 1
    }
}

impl Index<BoardPos> for BitBoard {
    type Output = bool;

    fn index(&self, index: BoardPos) -> &Self::Output {
        if self.get(index) {
            &true
        } else {
            &false
        }
    }
}
