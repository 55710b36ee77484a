//! Grid module - owns the square board of cells
//!
//! Cells are stored in a flat row-major `Vec` (`row * size + col`), the same
//! layout snapshots use. The edge length is fixed at construction.
//!
//! Gravity and refill are not grid operations; they belong to the cascade
//! engine, which has access to the palette and the RNG.

use tracing::debug;

use crate::error::{InvariantViolation, Rejection};
use crate::matcher::find_matches;
use crate::rng::TokenRng;
use crate::types::{
    BoardSnapshot, Candy, Cell, Coord, Palette, TokenType, MAX_BOARD_SIZE, MIN_BOARD_SIZE,
};

/// The game board - `size` x `size` cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a match-free board filled from `palette`.
    ///
    /// Every cell is drawn uniformly; afterwards any cell that takes part in a
    /// match is re-rolled, repeatedly, until no match remains.
    pub fn create<R: TokenRng>(
        size: usize,
        palette: &Palette,
        rng: &mut R,
    ) -> Result<Self, Rejection> {
        validate_level_shape(size, palette)?;

        let cells = (0..size * size)
            .map(|_| Some(Candy::plain(rng.pick(palette))))
            .collect();
        let mut grid = Self { size, cells };

        let mut rerolls = 0u32;
        loop {
            let matches = find_matches(&grid);
            if matches.is_empty() {
                break;
            }
            for &coord in matches.cells() {
                grid.set(coord, Some(Candy::plain(rng.pick(palette))));
            }
            rerolls += 1;
        }
        debug!(size, rerolls, "grid created");

        Ok(grid)
    }

    /// Build a grid from explicit rows.
    ///
    /// Rows must form a square of at least 3x3. Cells may be empty, which lets
    /// callers stage mid-cascade boards.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, InvariantViolation> {
        let size = rows.len();
        let square = rows.iter().all(|r| r.len() == size);
        if size < MIN_BOARD_SIZE || size > MAX_BOARD_SIZE || !square {
            let detail = rows
                .iter()
                .map(|r| r.len().to_string())
                .collect::<Vec<_>>()
                .join(",");
            return Err(InvariantViolation::GridShape { rows: size, detail });
        }
        Ok(Self {
            size,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Build a grid from text rows: `A`..=`H` are tokens 0..=7, `.` is empty.
    ///
    /// ```
    /// use candy_swap_core::Grid;
    /// use candy_swap_core::types::{Coord, TokenType};
    ///
    /// let grid = Grid::from_ascii(&["ABC", "BC.", "CAB"]).unwrap();
    /// assert_eq!(grid.token(Coord::new(0, 1)), Some(TokenType(1)));
    /// assert!(grid.is_empty(Coord::new(1, 2)));
    /// ```
    pub fn from_ascii(rows: &[&str]) -> Result<Self, InvariantViolation> {
        let rows = rows
            .iter()
            .map(|line| {
                line.chars()
                    .map(|ch| match ch {
                        'A'..='H' => Some(Candy::plain(TokenType(ch as u8 - b'A'))),
                        _ => None,
                    })
                    .collect()
            })
            .collect();
        Self::from_rows(rows)
    }

    /// Edge length of the board
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline(always)]
    fn index(&self, coord: Coord) -> Option<usize> {
        if coord.row >= self.size || coord.col >= self.size {
            return None;
        }
        Some(coord.row * self.size + coord.col)
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.index(coord).is_some()
    }

    /// Get the cell at `coord`; `None` if out of bounds
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        self.index(coord).map(|i| self.cells[i])
    }

    /// Token at `coord`, if in bounds and occupied
    pub fn token(&self, coord: Coord) -> Option<TokenType> {
        self.get(coord).flatten().map(|c| c.token)
    }

    /// Set the cell at `coord`. Returns false if out of bounds
    pub fn set(&mut self, coord: Coord, cell: Cell) -> bool {
        match self.index(coord) {
            Some(i) => {
                self.cells[i] = cell;
                true
            }
            None => false,
        }
    }

    /// Empty a cell, returning what it held
    pub fn clear(&mut self, coord: Coord) -> Cell {
        match self.index(coord) {
            Some(i) => self.cells[i].take(),
            None => None,
        }
    }

    /// True if `coord` is in bounds and empty
    pub fn is_empty(&self, coord: Coord) -> bool {
        matches!(self.get(coord), Some(None))
    }

    /// Exchange the full contents (token and special) of two cells.
    ///
    /// Adjacency is the caller's responsibility.
    pub fn swap(&mut self, a: Coord, b: Coord) {
        debug_assert!(a.is_adjacent(b), "swap of non-adjacent cells {a} and {b}");
        if let (Some(ia), Some(ib)) = (self.index(a), self.index(b)) {
            self.cells.swap(ia, ib);
        }
    }

    /// First empty cell in row-major order
    pub fn first_empty(&self) -> Option<Coord> {
        self.cells
            .iter()
            .position(|c| c.is_none())
            .map(|i| Coord::new(i / self.size, i % self.size))
    }

    pub fn is_full(&self) -> bool {
        self.first_empty().is_none()
    }

    /// All coordinates in row-major order
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let size = self.size;
        (0..size * size).map(move |i| Coord::new(i / size, i % size))
    }

    /// Row-major cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            size: self.size,
            cells: self.cells.clone(),
        }
    }

    /// Render as text rows (inverse of [`Grid::from_ascii`] for plain candies).
    pub fn to_ascii(&self) -> Vec<String> {
        self.cells
            .chunks(self.size)
            .map(|row| {
                row.iter()
                    .map(|c| match c {
                        Some(candy) => (b'A' + candy.token.0) as char,
                        None => '.',
                    })
                    .collect()
            })
            .collect()
    }
}

/// Checks shared by board creation and level (re)initialisation.
pub(crate) fn validate_level_shape(size: usize, palette: &Palette) -> Result<(), Rejection> {
    if size < MIN_BOARD_SIZE {
        return Err(Rejection::BoardTooSmall { size });
    }
    if size > MAX_BOARD_SIZE {
        return Err(Rejection::BoardTooLarge {
            size,
            max: MAX_BOARD_SIZE,
        });
    }
    if palette.is_empty() {
        return Err(Rejection::EmptyPalette);
    }
    if palette.distinct_count() < 2 {
        return Err(Rejection::PaletteTooSmall);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimpleRng;
    use crate::types::{Axis, SpecialKind};

    #[test]
    fn test_grid_index_calculation() {
        let grid = Grid::from_ascii(&["ABC", "BCA", "CAB"]).unwrap();
        assert_eq!(grid.index(Coord::new(0, 0)), Some(0));
        assert_eq!(grid.index(Coord::new(0, 2)), Some(2));
        assert_eq!(grid.index(Coord::new(1, 0)), Some(3));
        assert_eq!(grid.index(Coord::new(2, 2)), Some(8));
        assert_eq!(grid.index(Coord::new(3, 0)), None);
        assert_eq!(grid.index(Coord::new(0, 3)), None);
    }

    #[test]
    fn test_create_rejects_bad_input() {
        let mut rng = SimpleRng::new(1);
        assert_eq!(
            Grid::create(2, &Palette::first(5), &mut rng),
            Err(Rejection::BoardTooSmall { size: 2 })
        );
        assert_eq!(
            Grid::create(8, &Palette::new(vec![]), &mut rng),
            Err(Rejection::EmptyPalette)
        );
        assert_eq!(
            Grid::create(8, &Palette::new(vec![TokenType(3), TokenType(3)]), &mut rng),
            Err(Rejection::PaletteTooSmall)
        );
        assert!(matches!(
            Grid::create(MAX_BOARD_SIZE + 1, &Palette::first(5), &mut rng),
            Err(Rejection::BoardTooLarge { .. })
        ));
    }

    #[test]
    fn test_create_is_full_and_match_free() {
        let mut rng = SimpleRng::new(99);
        let grid = Grid::create(8, &Palette::first(5), &mut rng).unwrap();
        assert_eq!(grid.size(), 8);
        assert!(grid.is_full());
        assert!(find_matches(&grid).is_empty());
        assert!(grid.cells().iter().flatten().all(|c| c.special.is_none()));
    }

    #[test]
    fn test_swap_exchanges_specials() {
        let mut grid = Grid::from_ascii(&["ABC", "BCA", "CAB"]).unwrap();
        let marked = Candy::special(TokenType(0), SpecialKind::LineClear(Axis::Vertical));
        grid.set(Coord::new(0, 0), Some(marked));

        grid.swap(Coord::new(0, 0), Coord::new(0, 1));
        assert_eq!(grid.get(Coord::new(0, 1)), Some(Some(marked)));
        assert_eq!(grid.token(Coord::new(0, 0)), Some(TokenType(1)));
    }

    #[test]
    fn test_clear_returns_previous_cell() {
        let mut grid = Grid::from_ascii(&["ABC", "BCA", "CAB"]).unwrap();
        let prev = grid.clear(Coord::new(1, 1));
        assert_eq!(prev, Some(Candy::plain(TokenType(2))));
        assert!(grid.is_empty(Coord::new(1, 1)));
        assert_eq!(grid.first_empty(), Some(Coord::new(1, 1)));
        assert!(!grid.is_full());
        assert_eq!(grid.clear(Coord::new(7, 7)), None);
    }

    #[test]
    fn test_from_rows_rejects_bad_shapes() {
        assert!(Grid::from_ascii(&["AB", "BA"]).is_err());
        assert!(Grid::from_ascii(&["ABC", "BC", "CAB"]).is_err());
        assert!(Grid::from_ascii(&["ABCD", "BCDA", "CDAB"]).is_err());
    }

    #[test]
    fn test_ascii_roundtrip() {
        let rows = ["ABC", "B.A", "CAH"];
        let grid = Grid::from_ascii(&rows).unwrap();
        assert_eq!(grid.to_ascii(), rows.iter().map(|s| s.to_string()).collect::<Vec<_>>());
    }
}
