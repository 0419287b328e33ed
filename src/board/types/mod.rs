//! Core board types.
//!
//! - `Coord` - explicit (row, column) key used for every lookup
//! - `ThreatPattern` and `Reach` - geometric threat rules
//! - `PieceKind` and `Piece` - kinds and positioned pieces with threat sets

mod coord;
mod pattern;
mod piece;

pub use coord::Coord;
pub use pattern::{Reach, ThreatPattern, ThreatSquares};
pub use piece::{Piece, PieceKind};
