//! Fluent builder for constructing boards.
//!
//! # Example
//! ```
//! use nqueens::board::{BoardBuilder, Coord, PieceKind};
//!
//! let board = BoardBuilder::new(4)
//!     .queen(0, 1)
//!     .piece(Coord::new(3, 3), PieceKind::Rook)
//!     .build()
//!     .unwrap();
//! assert_eq!(board.active_count(), 2);
//! ```

use super::error::BoardError;
use super::{Board, Coord, Piece, PieceKind};

/// A fluent builder for constructing `Board` positions.
#[derive(Clone, Debug)]
pub struct BoardBuilder {
    size: usize,
    pieces: Vec<(Coord, PieceKind)>,
    propagate: bool,
}

impl BoardBuilder {
    /// Create a builder for an empty board of side `size`.
    #[must_use]
    pub fn new(size: usize) -> Self {
        BoardBuilder {
            size,
            pieces: Vec::new(),
            propagate: false,
        }
    }

    /// Builder with one queen per row on the main diagonal.
    #[must_use]
    pub fn diagonal_queens(size: usize) -> Self {
        (0..size).fold(Self::new(size), |b, i| b.queen(i, i))
    }

    /// Place a piece, replacing whatever was placed on that square before.
    /// Placing `PieceKind::Empty` clears the square.
    #[must_use]
    pub fn piece(mut self, coord: Coord, kind: PieceKind) -> Self {
        self.pieces.retain(|(c, _)| *c != coord);
        if !kind.is_empty() {
            self.pieces.push((coord, kind));
        }
        self
    }

    #[must_use]
    pub fn queen(self, x: usize, y: usize) -> Self {
        self.piece(Coord::new(x, y), PieceKind::Queen)
    }

    /// Remove a piece from a square.
    #[must_use]
    pub fn clear(mut self, coord: Coord) -> Self {
        self.pieces.retain(|(c, _)| *c != coord);
        self
    }

    /// Build with propagated threats instead of linked ones.
    #[must_use]
    pub const fn propagate_threats(mut self, propagate: bool) -> Self {
        self.propagate = propagate;
        self
    }

    /// Build the board.
    ///
    /// Without propagation the threat sets are filled by
    /// `Board::recompute_all_threats`.
    pub fn build(self) -> Result<Board, BoardError> {
        let mut board = Board::new(self.size);
        for (coord, kind) in self.pieces {
            board.add_piece(Piece::new(coord, kind), self.propagate)?;
        }
        if !self.propagate {
            board.recompute_all_threats();
        }
        Ok(board)
    }
}
