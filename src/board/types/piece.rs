//! Piece kinds and positioned pieces.

use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{Coord, Reach, ThreatPattern};
use crate::board::error::BoardError;

/// Piece kinds. `Empty` is the placeholder filling every vacant square.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Knight,
    Bishop,
    Pawn,
    Empty,
}

const KING_PATTERNS: [ThreatPattern; 2] = [
    ThreatPattern::Straight(Reach::Limited(1)),
    ThreatPattern::Diagonal(Reach::Limited(1)),
];
const QUEEN_PATTERNS: [ThreatPattern; 2] = [
    ThreatPattern::Straight(Reach::Unbounded),
    ThreatPattern::Diagonal(Reach::Unbounded),
];
const ROOK_PATTERNS: [ThreatPattern; 1] = [ThreatPattern::Straight(Reach::Unbounded)];
const KNIGHT_PATTERNS: [ThreatPattern; 1] = [ThreatPattern::Knight];
const BISHOP_PATTERNS: [ThreatPattern; 1] = [ThreatPattern::Diagonal(Reach::Unbounded)];
const PAWN_PATTERNS: [ThreatPattern; 1] = [ThreatPattern::Diagonal(Reach::Limited(1))];

impl PieceKind {
    /// All kinds that can stand on a board, in index order
    pub const ACTIVE: [PieceKind; 6] = [
        PieceKind::King,
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Pawn,
    ];

    #[inline]
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        match self {
            PieceKind::King => 0,
            PieceKind::Queen => 1,
            PieceKind::Rook => 2,
            PieceKind::Knight => 3,
            PieceKind::Bishop => 4,
            PieceKind::Pawn => 5,
            PieceKind::Empty => 6,
        }
    }

    /// Threat patterns for this kind. The placeholder threatens nothing.
    #[must_use]
    pub const fn patterns(self) -> &'static [ThreatPattern] {
        match self {
            PieceKind::King => &KING_PATTERNS,
            PieceKind::Queen => &QUEEN_PATTERNS,
            PieceKind::Rook => &ROOK_PATTERNS,
            PieceKind::Knight => &KNIGHT_PATTERNS,
            PieceKind::Bishop => &BISHOP_PATTERNS,
            PieceKind::Pawn => &PAWN_PATTERNS,
            PieceKind::Empty => &[],
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, PieceKind::Empty)
    }
}

/// A piece standing on a square, together with the squares of the pieces
/// currently threatening it.
///
/// Identity is the coordinate alone: `PartialEq` and `Hash` ignore the kind
/// and the threat set, so two pieces on the same square are interchangeable in
/// any set or map. The threat set holds coordinates into the owning board,
/// never references to other pieces.
#[derive(Clone, Debug)]
pub struct Piece {
    coord: Coord,
    kind: PieceKind,
    threats: BTreeSet<Coord>,
}

impl Piece {
    #[must_use]
    pub fn new(coord: Coord, kind: PieceKind) -> Self {
        Piece {
            coord,
            kind,
            threats: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn queen(x: usize, y: usize) -> Self {
        Piece::new(Coord::new(x, y), PieceKind::Queen)
    }

    #[must_use]
    pub fn empty(coord: Coord) -> Self {
        Piece::new(coord, PieceKind::Empty)
    }

    #[inline]
    pub fn coord(&self) -> Coord {
        self.coord
    }

    #[inline]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.kind.is_empty()
    }

    /// True iff any of this piece's patterns reach `target`.
    #[must_use]
    pub fn is_threatening(&self, target: Coord) -> bool {
        self.kind
            .patterns()
            .iter()
            .any(|p| p.threatens(self.coord, target))
    }

    /// Squares this piece threatens on a board of side `size`, all directions.
    pub fn threatened_squares(&self, size: usize) -> impl Iterator<Item = Coord> + '_ {
        self.kind
            .patterns()
            .iter()
            .flat_map(move |p| p.threatened_squares(self.coord, size))
    }

    /// Squares this piece threatens that come after it in scan order.
    pub fn forward_threatened_squares(&self, size: usize) -> impl Iterator<Item = Coord> + '_ {
        self.kind
            .patterns()
            .iter()
            .flat_map(move |p| p.forward_threatened_squares(self.coord, size))
    }

    /// Record `attacker` as threatening this square. Returns false if it was
    /// already recorded.
    pub fn add_threat(&mut self, attacker: Coord) -> bool {
        self.threats.insert(attacker)
    }

    /// Forget `attacker`. Removing an attacker that was never recorded means
    /// the caller's bookkeeping is wrong, so it is reported as an error.
    pub fn remove_threat(&mut self, attacker: Coord) -> Result<(), BoardError> {
        if self.threats.remove(&attacker) {
            Ok(())
        } else {
            Err(BoardError::ThreatMissing {
                target: self.coord,
                attacker,
            })
        }
    }

    /// Is `attacker` recorded as threatening this square?
    #[inline]
    pub fn has_threat(&self, attacker: Coord) -> bool {
        self.threats.contains(&attacker)
    }

    #[inline]
    pub fn is_unthreatened(&self) -> bool {
        self.threats.is_empty()
    }

    #[inline]
    pub fn threat_count(&self) -> usize {
        self.threats.len()
    }

    pub fn threats(&self) -> impl Iterator<Item = Coord> + '_ {
        self.threats.iter().copied()
    }

    pub(crate) fn clear_threats(&mut self) {
        self.threats.clear();
    }

    pub(crate) fn take_threats(&mut self) -> BTreeSet<Coord> {
        std::mem::take(&mut self.threats)
    }

    pub(crate) fn with_threats(mut self, threats: BTreeSet<Coord>) -> Self {
        self.threats = threats;
        self
    }
}

impl PartialEq for Piece {
    fn eq(&self, other: &Self) -> bool {
        self.coord == other.coord
    }
}

impl Eq for Piece {}

impl Hash for Piece {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.coord.hash(state);
    }
}
