//! Board representation and the threat model.
//!
//! An N×N grid of pieces with incrementally maintained threat sets. Pieces
//! are described by geometric threat patterns; the board keeps, for every
//! square, the coordinates of the active pieces that threaten it.
//!
//! # Example
//! ```
//! use nqueens::board::{Board, Coord, Piece};
//!
//! let mut board = Board::new(4);
//! board.add_piece(Piece::queen(0, 1), true).unwrap();
//! assert!(!board.is_new_position_unthreatened(Coord::new(1, 0), true));
//! assert!(board.is_new_position_unthreatened(Coord::new(1, 3), true));
//! ```

mod builder;
mod error;
mod layout;
pub mod prelude;
mod state;
mod symbols;
mod types;

#[cfg(test)]
mod tests;

pub use builder::BoardBuilder;
pub use error::{BoardError, LayoutError, SymbolError};
pub use state::Board;
pub use symbols::{Glyph, SymbolTable, SYMBOLS, UNMAPPED_SYMBOL};
pub use types::{Coord, Piece, PieceKind, Reach, ThreatPattern, ThreatSquares};
