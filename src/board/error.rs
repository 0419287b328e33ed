//! Error types for board operations.

use std::fmt;

use super::Coord;

/// Invariant violations raised by board mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Coordinate lies outside the N×N grid
    OutOfBounds { coord: Coord, size: usize },
    /// A piece already stands on the square
    Occupied { coord: Coord },
    /// No piece stands on the square
    Vacant { coord: Coord },
    /// The empty placeholder cannot be added as a piece
    EmptyPiece { coord: Coord },
    /// A threat reference that should exist was not recorded
    ThreatMissing { target: Coord, attacker: Coord },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::OutOfBounds { coord, size } => {
                write!(f, "Square {coord} is outside a {size}x{size} board")
            }
            BoardError::Occupied { coord } => {
                write!(f, "Square {coord} is already occupied")
            }
            BoardError::Vacant { coord } => {
                write!(f, "Square {coord} holds no piece")
            }
            BoardError::EmptyPiece { coord } => {
                write!(f, "Cannot add the empty placeholder at {coord}")
            }
            BoardError::ThreatMissing { target, attacker } => {
                write!(f, "Square {target} has no recorded threat from {attacker}")
            }
        }
    }
}

impl std::error::Error for BoardError {}

/// Error type for board-file parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// No row contained a recognised symbol
    Empty,
    /// A row's width differs from the first row's width
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// Row count does not match the row width
    NotSquare { rows: usize, width: usize },
    /// The parsed squares could not be placed
    Board(BoardError),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::Empty => write!(f, "Board layout contains no squares"),
            LayoutError::RaggedRow {
                row,
                expected,
                found,
            } => {
                write!(f, "Row {row} has {found} squares, expected {expected}")
            }
            LayoutError::NotSquare { rows, width } => {
                write!(f, "Board layout has {rows} rows of width {width}")
            }
            LayoutError::Board(err) => write!(f, "Board layout could not be placed: {err}"),
        }
    }
}

impl std::error::Error for LayoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LayoutError::Board(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BoardError> for LayoutError {
    fn from(err: BoardError) -> Self {
        LayoutError::Board(err)
    }
}

/// Error type for symbol table construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolError {
    /// Two entries share a symbol, or one entry appears twice
    Collision { symbol: char },
}

impl fmt::Display for SymbolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolError::Collision { symbol } => {
                write!(f, "Symbol '{symbol}' is mapped more than once")
            }
        }
    }
}

impl std::error::Error for SymbolError {}
