//! Keyboard cursor over the board.

use crate::types::Coord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Cursor position, always inside a `size` x `size` board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardCursor {
    at: Coord,
    size: usize,
}

impl BoardCursor {
    /// A cursor in the middle of the board.
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        Self {
            at: Coord::new(size / 2, size / 2),
            size,
        }
    }

    pub fn coord(&self) -> Coord {
        self.at
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Move one cell; stops at the edges.
    pub fn step(&mut self, dir: Direction) {
        let last = self.size - 1;
        let Coord { row, col } = self.at;
        self.at = match dir {
            Direction::Up => Coord::new(row.saturating_sub(1), col),
            Direction::Down => Coord::new((row + 1).min(last), col),
            Direction::Left => Coord::new(row, col.saturating_sub(1)),
            Direction::Right => Coord::new(row, (col + 1).min(last)),
        };
    }

    /// Jump to `coord`, clamped to the board.
    pub fn place(&mut self, coord: Coord) {
        let last = self.size - 1;
        self.at = Coord::new(coord.row.min(last), coord.col.min(last));
    }

    /// Follow a board size change, keeping the position where possible.
    pub fn resize(&mut self, size: usize) {
        self.size = size.max(1);
        let at = self.at;
        self.place(at);
    }
}
