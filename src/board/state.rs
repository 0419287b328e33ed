use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use super::error::BoardError;
use super::{Coord, Piece, PieceKind};
use crate::zobrist::ZobristKeys;

/// An N×N grid of pieces plus the set of squares holding an active piece.
///
/// Every square holds exactly one `Piece`; vacant squares hold the empty
/// placeholder, which is never part of the active set. `add_piece` and
/// `remove_piece` (and their `_linked` variants) are the only mutation paths.
///
/// Threat sets are maintained in one of two modes, chosen per call:
///
/// * propagated (`propagate_threats = true`): every square, vacant or not,
///   records each active piece that reaches it. This keeps the constant-time
///   `is_new_position_unthreatened(.., true)` check exact.
/// * linked (`add_piece_linked` / `remove_piece_linked` and
///   `recompute_all_threats`): only active pieces record their attackers.
///
/// Mixing the two modes on the same board is a caller error and surfaces as
/// `BoardError::ThreatMissing` on removal.
#[derive(Clone)]
pub struct Board {
    pub(crate) size: usize,
    pub(crate) cells: Vec<Piece>,
    pub(crate) active: BTreeSet<Coord>,
    pub(crate) hash: u64, // Zobrist hash
    keys: Arc<ZobristKeys>,
}

impl Board {
    /// An empty board of side `size`.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Board {
            size,
            cells: Coord::all(size).map(Piece::empty).collect(),
            active: BTreeSet::new(),
            hash: 0,
            keys: ZobristKeys::for_size(size),
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// The piece or placeholder on `coord`, or `None` off the board.
    pub fn cell(&self, coord: Coord) -> Option<&Piece> {
        if coord.is_on_board(self.size) {
            Some(&self.cells[coord.index(self.size)])
        } else {
            None
        }
    }

    /// The active piece on `coord`, if any.
    pub fn piece_at(&self, coord: Coord) -> Option<&Piece> {
        self.cell(coord).filter(|p| !p.is_empty())
    }

    pub fn active_pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.active
            .iter()
            .map(move |c| &self.cells[c.index(self.size)])
    }

    pub fn active_coords(&self) -> impl Iterator<Item = Coord> + '_ {
        self.active.iter().copied()
    }

    #[inline]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Recompute the Zobrist hash from every cell.
    pub fn calculate_hash(&self) -> u64 {
        self.cells
            .iter()
            .fold(0, |h, p| h ^ self.keys.piece_key(p.coord(), p.kind()))
    }

    /// Put `piece` on its square.
    ///
    /// The piece takes over the threat set already recorded for the square.
    /// With `propagate_threats`, the piece is also recorded as a threat on
    /// every square it reaches.
    pub fn add_piece(&mut self, piece: Piece, propagate_threats: bool) -> Result<(), BoardError> {
        let coord = piece.coord().check_bounds(self.size)?;
        if piece.is_empty() {
            return Err(BoardError::EmptyPiece { coord });
        }
        let idx = coord.index(self.size);
        if !self.cells[idx].is_empty() {
            return Err(BoardError::Occupied { coord });
        }

        let kind = piece.kind();
        let inherited = self.cells[idx].take_threats();
        self.cells[idx] = piece.with_threats(inherited);
        self.active.insert(coord);
        self.hash ^= self.keys.piece_key(coord, kind);

        if propagate_threats {
            for pattern in kind.patterns() {
                for target in pattern.threatened_squares(coord, self.size) {
                    self.cells[target.index(self.size)].add_threat(coord);
                }
            }
        }
        Ok(())
    }

    /// Take the piece off `coord`, restoring the placeholder.
    ///
    /// With `propagate_threats`, the piece is removed from the threat set of
    /// every square it reaches. Each of those entries must exist; if one is
    /// missing the board is left untouched and `ThreatMissing` is returned.
    pub fn remove_piece(&mut self, coord: Coord, propagate_threats: bool) -> Result<Piece, BoardError> {
        let coord = coord.check_bounds(self.size)?;
        let idx = coord.index(self.size);
        if self.cells[idx].is_empty() {
            return Err(BoardError::Vacant { coord });
        }
        let kind = self.cells[idx].kind();

        if propagate_threats {
            self.verify_recorded(coord, kind)?;
            for pattern in kind.patterns() {
                for target in pattern.threatened_squares(coord, self.size) {
                    self.cells[target.index(self.size)].remove_threat(coord)?;
                }
            }
        }

        let inherited = self.cells[idx].take_threats();
        let removed = std::mem::replace(
            &mut self.cells[idx],
            Piece::empty(coord).with_threats(inherited),
        );
        self.active.remove(&coord);
        self.hash ^= self.keys.piece_key(coord, kind);
        Ok(removed)
    }

    fn verify_recorded(&self, coord: Coord, kind: PieceKind) -> Result<(), BoardError> {
        for pattern in kind.patterns() {
            for target in pattern.threatened_squares(coord, self.size) {
                if !self.cells[target.index(self.size)].has_threat(coord) {
                    return Err(BoardError::ThreatMissing {
                        target,
                        attacker: coord,
                    });
                }
            }
        }
        Ok(())
    }

    /// Add `piece` and record threats in both directions between it and every
    /// other active piece. Vacant squares are not touched.
    pub fn add_piece_linked(&mut self, piece: Piece) -> Result<(), BoardError> {
        let coord = piece.coord();
        self.add_piece(piece, false)?;
        let idx = coord.index(self.size);
        self.cells[idx].clear_threats();

        for &other in &self.active {
            if other == coord {
                continue;
            }
            let o_idx = other.index(self.size);
            if self.cells[o_idx].is_threatening(coord) {
                self.cells[idx].add_threat(other);
            }
            if self.cells[idx].is_threatening(other) {
                self.cells[o_idx].add_threat(coord);
            }
        }
        Ok(())
    }

    /// Remove the piece on `coord` and withdraw it from the threat set of
    /// every active piece it threatens.
    pub fn remove_piece_linked(&mut self, coord: Coord) -> Result<Piece, BoardError> {
        let coord = coord.check_bounds(self.size)?;
        let idx = coord.index(self.size);
        if self.cells[idx].is_empty() {
            return Err(BoardError::Vacant { coord });
        }

        let victims: Vec<Coord> = self
            .active
            .iter()
            .copied()
            .filter(|&other| other != coord && self.cells[idx].is_threatening(other))
            .collect();
        for &target in &victims {
            if !self.cells[target.index(self.size)].has_threat(coord) {
                return Err(BoardError::ThreatMissing {
                    target,
                    attacker: coord,
                });
            }
        }
        for target in victims {
            self.cells[target.index(self.size)].remove_threat(coord)?;
        }

        let mut removed = self.remove_piece(coord, false)?;
        self.cells[idx].clear_threats();
        removed.clear_threats();
        Ok(removed)
    }

    /// Rebuild every threat set from scratch by testing each active piece
    /// against every other one. O(active²); vacant squares end up with no
    /// recorded threats.
    pub fn recompute_all_threats(&mut self) {
        for cell in &mut self.cells {
            cell.clear_threats();
        }
        let size = self.size;
        for &attacker in &self.active {
            for &target in &self.active {
                if attacker != target && self.cells[attacker.index(size)].is_threatening(target) {
                    self.cells[target.index(size)].add_threat(attacker);
                }
            }
        }
    }

    /// Would a piece placed on `coord` be free of threats?
    ///
    /// With `fast`, reads the recorded threat set of the square, which is
    /// only exact while every piece was added with propagation. Otherwise
    /// tests every active piece.
    ///
    /// # Panics
    /// Panics if `coord` is off the board.
    pub fn is_new_position_unthreatened(&self, coord: Coord, fast: bool) -> bool {
        assert!(coord.is_on_board(self.size), "{coord} is off the board");
        if fast {
            self.cells[coord.index(self.size)].is_unthreatened()
        } else {
            !self.active_pieces().any(|p| p.is_threatening(coord))
        }
    }

    /// Number of active pieces threatening `coord`, by rescan.
    pub fn attackers_of(&self, coord: Coord) -> usize {
        self.active_pieces()
            .filter(|p| p.is_threatening(coord))
            .count()
    }

    /// Every square of `row` has a recorded threat. False for rows off the board.
    pub fn is_entire_row_threatened(&self, row: usize) -> bool {
        if row >= self.size {
            return false;
        }
        let start = row * self.size;
        self.cells[start..start + self.size]
            .iter()
            .all(|cell| !cell.is_unthreatened())
    }

    /// No active piece stands in `row`.
    pub fn no_queens_in_row(&self, row: usize) -> bool {
        self.active
            .range(Coord::new(row, 0)..Coord::new(row + 1, 0))
            .next()
            .is_none()
    }

    /// Some active piece has a recorded threat.
    pub fn is_at_least_one_threat(&self) -> bool {
        self.active_pieces().any(|p| !p.is_unthreatened())
    }

    /// Exactly N active pieces, one per row and column, none threatening
    /// another. Checked by rescan, independent of the recorded threat sets.
    pub fn is_solved(&self) -> bool {
        if self.active.len() != self.size {
            return false;
        }
        let rows: BTreeSet<usize> = self.active.iter().map(|c| c.x).collect();
        let columns: BTreeSet<usize> = self.active.iter().map(|c| c.y).collect();
        if rows.len() != self.size || columns.len() != self.size {
            return false;
        }
        self.active_pieces()
            .all(|p| self.active.iter().all(|&other| !p.is_threatening(other)))
    }
}

impl PartialEq for Board {
    /// Boards are equal when they have the same size and the same kind on
    /// every square. Threat sets are not compared.
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size
            && self
                .cells
                .iter()
                .zip(&other.cells)
                .all(|(a, b)| a.kind() == b.kind())
    }
}

impl Eq for Board {}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("size", &self.size)
            .field("active", &self.active)
            .field("hash", &format_args!("{:#018x}", self.hash))
            .finish()
    }
}
