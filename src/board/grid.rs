//! The board arena.
//!
//! A fixed-size square grid owning one token per cell in a flat vector
//! indexed by `row * size + col`. Moving a token overwrites slots by
//! index; there is no object graph to relocate and no cell is ever
//! without a token.

use serde::{Deserialize, Serialize};

use super::coord::{Coord, Delta};
use super::token::Token;

/// A `size x size` grid of cells, each holding exactly one token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    cells: Vec<Token>,
}

impl Board {
    /// Creates an all-empty board.
    pub fn new(size: usize) -> Self {
        Board {
            size,
            cells: vec![Token::Empty; size * size],
        }
    }

    /// The board's side length.
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Whether the coordinate lies on the board.
    pub const fn in_bounds(&self, at: Coord) -> bool {
        at.row < self.size && at.col < self.size
    }

    const fn index(&self, at: Coord) -> usize {
        at.row * self.size + at.col
    }

    /// Looks up the token at `at`; out-of-bounds yields the absent-cell
    /// sentinel rather than failing.
    pub fn get(&self, at: Coord) -> Option<&Token> {
        if self.in_bounds(at) {
            Some(&self.cells[self.index(at)])
        } else {
            None
        }
    }

    /// Mutable lookup; `None` out of bounds.
    pub fn get_mut(&mut self, at: Coord) -> Option<&mut Token> {
        if self.in_bounds(at) {
            let idx = self.index(at);
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    /// Overwrites the token at `at`. Returns false out of bounds.
    pub fn set(&mut self, at: Coord, token: Token) -> bool {
        match self.get_mut(at) {
            Some(slot) => {
                *slot = token;
                true
            }
            None => false,
        }
    }

    /// Applies a signed offset, bounds-checked.
    pub fn offset(&self, at: Coord, delta: Delta) -> Option<Coord> {
        let row = at.row as i64 + i64::from(delta.row);
        let col = at.col as i64 + i64::from(delta.col);
        if row < 0 || col < 0 {
            return None;
        }
        let c = Coord::new(row as usize, col as usize);
        if self.in_bounds(c) {
            Some(c)
        } else {
            None
        }
    }

    /// Iterates all coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |col| Coord::new(row, col)))
    }

    /// Iterates `(coordinate, token)` pairs in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Coord, &Token)> + '_ {
        self.coords().map(move |c| (c, &self.cells[self.index(c)]))
    }

    /// Locates the mobile unit, if it is still on the board.
    pub fn find_unit(&self) -> Option<Coord> {
        self.cells()
            .find(|(_, t)| matches!(t, Token::Unit { .. }))
            .map(|(c, _)| c)
    }

    /// Counts cells holding the empty token.
    pub fn count_empty(&self) -> usize {
        self.cells
            .iter()
            .filter(|t| matches!(t, Token::Empty))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_board_is_all_empty() {
        let board = Board::new(4);
        assert_eq!(board.size(), 4);
        assert_eq!(board.count_empty(), 16);
        assert!(board.cells().all(|(_, t)| *t == Token::Empty));
    }

    #[test]
    fn every_position_always_holds_one_token() {
        let mut board = Board::new(3);
        board.set(Coord::new(0, 0), Token::Wall);
        board.set(Coord::new(2, 2), Token::Unit { on_village: false });
        board.set(Coord::new(2, 2), Token::Roadblock { placed: true });
        assert_eq!(board.cells().count(), 9);
        for c in board.coords() {
            assert!(board.get(c).is_some());
        }
    }

    #[test]
    fn out_of_bounds_lookup_is_absent() {
        let mut board = Board::new(3);
        assert_eq!(board.get(Coord::new(3, 0)), None);
        assert_eq!(board.get(Coord::new(0, 3)), None);
        assert!(!board.set(Coord::new(3, 3), Token::Wall));
    }

    #[test]
    fn offset_respects_bounds() {
        let board = Board::new(3);
        let at = Coord::new(0, 2);
        assert_eq!(board.offset(at, Delta::new(-1, 0)), None);
        assert_eq!(board.offset(at, Delta::new(0, 1)), None);
        assert_eq!(board.offset(at, Delta::new(1, -1)), Some(Coord::new(1, 1)));
    }

    #[test]
    fn coords_are_row_major() {
        let board = Board::new(2);
        let coords: Vec<Coord> = board.coords().collect();
        assert_eq!(
            coords,
            vec![
                Coord::new(0, 0),
                Coord::new(0, 1),
                Coord::new(1, 0),
                Coord::new(1, 1),
            ]
        );
    }

    #[test]
    fn find_unit_locates_the_unit() {
        let mut board = Board::new(3);
        assert_eq!(board.find_unit(), None);
        board.set(Coord::new(1, 2), Token::Unit { on_village: true });
        assert_eq!(board.find_unit(), Some(Coord::new(1, 2)));
    }
}
