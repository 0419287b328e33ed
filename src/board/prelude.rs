//! Prelude module for convenient imports.
//!
//! # Example
//! ```
//! use nqueens::board::prelude::*;
//! ```

pub use super::{Board, BoardBuilder, BoardError, Coord, LayoutError, Piece, PieceKind};
pub use crate::solver::{run, Outcome, SearchLimits, SolveConfig, Solver, Strategy};
