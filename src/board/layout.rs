//! Textual board format.
//!
//! One board row per line, one symbol per square, symbols separated by
//! spaces. Characters missing from the symbol table are ignored and lines
//! without any recognised symbol are skipped.

use std::fmt;
use std::str::FromStr;

use super::error::LayoutError;
use super::symbols::{Glyph, SYMBOLS};
use super::{Board, BoardBuilder, Coord, PieceKind};

/// Parse the rows of a layout without building anything.
fn parse_rows(text: &str) -> Result<Vec<Vec<PieceKind>>, LayoutError> {
    let mut rows: Vec<Vec<PieceKind>> = Vec::new();
    for line in text.lines() {
        let row: Vec<PieceKind> = line
            .chars()
            .filter_map(|c| SYMBOLS.glyph(c))
            .map(Glyph::kind)
            .collect();
        if row.is_empty() {
            continue;
        }
        if let Some(first) = rows.first() {
            if first.len() != row.len() {
                return Err(LayoutError::RaggedRow {
                    row: rows.len(),
                    expected: first.len(),
                    found: row.len(),
                });
            }
        }
        rows.push(row);
    }

    let width = rows.first().map(Vec::len).ok_or(LayoutError::Empty)?;
    if rows.len() != width {
        return Err(LayoutError::NotSquare {
            rows: rows.len(),
            width,
        });
    }
    Ok(rows)
}

impl Board {
    /// Parse a board from its textual layout.
    ///
    /// The whole text is validated before the board is built, so a malformed
    /// layout never yields a partial board. Threat sets are filled pairwise
    /// as by `recompute_all_threats`.
    pub fn try_from_layout(text: &str) -> Result<Self, LayoutError> {
        let rows = parse_rows(text)?;
        let size = rows.len();
        let builder = rows
            .into_iter()
            .enumerate()
            .flat_map(|(x, row)| {
                row.into_iter()
                    .enumerate()
                    .map(move |(y, kind)| (Coord::new(x, y), kind))
            })
            .fold(BoardBuilder::new(size), |b, (coord, kind)| b.piece(coord, kind));
        Ok(builder.build()?)
    }

    /// Render the board in the textual layout, one line per row.
    #[must_use]
    pub fn to_layout(&self) -> String {
        let mut out = String::with_capacity(self.size * self.size * 2);
        for row in self.cells.chunks(self.size.max(1)) {
            let line: Vec<String> = row
                .iter()
                .map(|p| SYMBOLS.symbol_for(p.kind()).to_string())
                .collect();
            out.push_str(&line.join(" "));
            out.push('\n');
        }
        out
    }
}

impl FromStr for Board {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::try_from_layout(s)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_layout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Piece;

    const FOUR_QUEENS: &str = "- Q - -\n- - - Q\nQ - - -\n- - Q -\n";

    #[test]
    fn test_layout_round_trip() {
        let board = Board::try_from_layout(FOUR_QUEENS).unwrap();
        assert_eq!(board.size(), 4);
        assert_eq!(board.active_count(), 4);
        assert_eq!(board.to_layout(), FOUR_QUEENS);
        assert!(board.is_solved());
    }

    #[test]
    fn test_every_mapped_kind_survives_reload() {
        let text = "K Q R\nB P -\n- - -\n";
        let board: Board = text.parse().unwrap();
        let reloaded: Board = board.to_layout().parse().unwrap();
        assert_eq!(board, reloaded);
        assert_eq!(
            board.piece_at(Coord::new(1, 1)).map(Piece::kind),
            Some(PieceKind::Pawn)
        );
    }

    #[test]
    fn test_marker_and_noise_are_ignored() {
        let text = "\n  Q  !  - x\n\n- Q -\n# comment\n- - !\n";
        let board = Board::try_from_layout(text).unwrap();
        assert_eq!(board.size(), 3);
        assert_eq!(board.active_count(), 2);
        assert_eq!(board.to_layout(), "Q - -\n- Q -\n- - -\n");
    }

    #[test]
    fn test_ragged_row() {
        let result = Board::try_from_layout("Q - -\n- -\n- - -\n");
        assert_eq!(
            result,
            Err(LayoutError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn test_not_square() {
        let result = Board::try_from_layout("Q - -\n- - -\n");
        assert_eq!(result, Err(LayoutError::NotSquare { rows: 2, width: 3 }));
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(Board::try_from_layout("\n  \n"), Err(LayoutError::Empty));
    }

    #[test]
    fn test_loaded_threats_are_linked() {
        let board = Board::try_from_layout("Q Q\n- -\n").unwrap();
        assert!(board.is_at_least_one_threat());
        assert!(board.active_pieces().all(|p| p.threat_count() == 1));
    }

    #[test]
    fn test_display_matches_layout() {
        let board = Board::new(2);
        assert_eq!(board.to_string(), "- -\n- -\n");
    }
}
