//! Board coordinate type.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::error::BoardError;

/// A square on an N×N board, represented as (row, column).
///
/// `Coord` is the key type for every board and threat lookup. Two pieces
/// standing on the same `Coord` are the same entity as far as sets and maps
/// are concerned. Ordering follows the canonical scan order: increasing row,
/// then increasing column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    #[inline]
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Coord { x, y }
    }

    /// Row index (0 = first line of the board file)
    #[inline]
    #[must_use]
    pub const fn row(self) -> usize {
        self.x
    }

    /// Column index
    #[inline]
    #[must_use]
    pub const fn column(self) -> usize {
        self.y
    }

    /// Flat index into a row-major grid of side `size`.
    #[inline]
    #[must_use]
    pub const fn index(self, size: usize) -> usize {
        self.x * size + self.y
    }

    #[inline]
    #[must_use]
    pub const fn from_index(idx: usize, size: usize) -> Self {
        Coord {
            x: idx / size,
            y: idx % size,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_on_board(self, size: usize) -> bool {
        self.x < size && self.y < size
    }

    /// Step by a signed offset, returning `None` when the result leaves the board.
    #[inline]
    #[must_use]
    pub fn offset(self, dx: isize, dy: isize, size: usize) -> Option<Coord> {
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        let next = Coord { x, y };
        next.is_on_board(size).then_some(next)
    }

    pub(crate) fn check_bounds(self, size: usize) -> Result<Self, BoardError> {
        if self.is_on_board(size) {
            Ok(self)
        } else {
            Err(BoardError::OutOfBounds { coord: self, size })
        }
    }

    /// Iterate every square of an N×N board in scan order.
    pub fn all(size: usize) -> impl Iterator<Item = Coord> {
        (0..size * size).map(move |idx| Coord::from_index(idx, size))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(usize, usize)> for Coord {
    fn from((x, y): (usize, usize)) -> Self {
        Coord { x, y }
    }
}
