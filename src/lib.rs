pub mod board;
pub mod solver;
mod zobrist;

pub use board::{Board, Coord, Piece, PieceKind};
pub use solver::{run, Outcome, SearchLimits, SolveConfig, Solver, Strategy};
