//! Min-conflicts repair with one-step relaxation on revisited boards.
//!
//! Starting from a full board, each step moves the most threatened piece to
//! the square where the fewest pieces would threaten it. Ties are broken
//! uniformly at random. When a move lands on a board layout that was already
//! seen, the next step relaxes one of the two rules:
//!
//! - `Relaxation::Placement` (h1): the destination is any free square.
//! - `Relaxation::Selection` (h2): the piece to move is any active piece.

use std::collections::HashSet;

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use super::{Progress, SearchStats, SolveError, Solver};
use crate::board::{Board, BoardBuilder, BoardError, Coord, Piece, PieceKind};

/// Which rule is loosened for one step after a revisited layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relaxation {
    /// Destination chosen uniformly among free squares.
    Placement,
    /// Piece chosen uniformly among active pieces.
    Selection,
}

pub struct HeuristicRepair<R: Rng = StdRng> {
    board: Board,
    relaxation: Relaxation,
    rng: R,
    visited: HashSet<u64>,
    relax_next: bool,
    stats: SearchStats,
}

impl<R: Rng> HeuristicRepair<R> {
    /// Repair `board` as given. Its threat sets are rebuilt once here; from
    /// then on every move keeps them up to date pairwise.
    pub fn with_rng(mut board: Board, relaxation: Relaxation, rng: R) -> Self {
        board.recompute_all_threats();
        let mut visited = HashSet::new();
        visited.insert(board.hash());
        HeuristicRepair {
            board,
            relaxation,
            rng,
            visited,
            relax_next: false,
            stats: SearchStats::default(),
        }
    }

    /// Repair a supplied start board, which must hold exactly N queens and
    /// no other pieces.
    pub fn from_board(board: Board, relaxation: Relaxation, rng: R) -> Result<Self, SolveError> {
        let queens = board
            .active_pieces()
            .filter(|p| p.kind() == PieceKind::Queen)
            .count();
        let others = board.active_count() - queens;
        if queens != board.size() || others != 0 {
            return Err(SolveError::InvalidStart {
                size: board.size(),
                queens,
                others,
            });
        }
        Ok(Self::with_rng(board, relaxation, rng))
    }

    /// Start from one queen per row along the main diagonal.
    pub fn diagonal(size: usize, relaxation: Relaxation, rng: R) -> Result<Self, BoardError> {
        let board = BoardBuilder::diagonal_queens(size).build()?;
        Ok(Self::with_rng(board, relaxation, rng))
    }

    /// Is the next step a relaxed one?
    pub fn is_relaxed(&self) -> bool {
        self.relax_next
    }

    /// Pick the piece to move: the most threatened one, or any piece when
    /// selection is relaxed.
    fn select(&mut self, relaxed: bool) -> Option<Coord> {
        let candidates: Vec<Coord> = if relaxed {
            self.board.active_coords().collect()
        } else {
            let most = self
                .board
                .active_pieces()
                .map(Piece::threat_count)
                .max()?;
            self.board
                .active_pieces()
                .filter(|p| p.threat_count() == most)
                .map(Piece::coord)
                .collect()
        };
        candidates.choose(&mut self.rng).copied()
    }

    /// Pick the destination among free squares other than `vacated`: the
    /// least threatened ones, or any of them when placement is relaxed.
    /// Falls back to `vacated` when no other square is free.
    fn destination(&mut self, vacated: Coord, relaxed: bool) -> Coord {
        let mut best = usize::MAX;
        let mut candidates = Vec::new();
        for coord in Coord::all(self.board.size()) {
            if coord == vacated || self.board.piece_at(coord).is_some() {
                continue;
            }
            let score = if relaxed {
                0
            } else {
                self.board.attackers_of(coord)
            };
            if score < best {
                best = score;
                candidates.clear();
            }
            if score == best {
                candidates.push(coord);
            }
        }
        candidates.choose(&mut self.rng).copied().unwrap_or(vacated)
    }

    /// Nothing is threatened. That is a solution only with N pieces on
    /// the board; with fewer there is nothing left to repair.
    fn settled(&self) -> Progress {
        if self.board.is_solved() {
            Progress::Solved
        } else {
            Progress::Exhausted
        }
    }
}

impl<R: Rng> Solver for HeuristicRepair<R> {
    fn name(&self) -> &'static str {
        match self.relaxation {
            Relaxation::Placement => "h1",
            Relaxation::Selection => "h2",
        }
    }

    fn step(&mut self) -> Result<Progress, SolveError> {
        if !self.board.is_at_least_one_threat() {
            return Ok(self.settled());
        }
        self.stats.steps += 1;

        let relaxed = std::mem::take(&mut self.relax_next);
        let Some(from) = self.select(relaxed && self.relaxation == Relaxation::Selection) else {
            return Ok(self.settled());
        };
        let piece = self.board.remove_piece_linked(from)?;
        let to = self.destination(from, relaxed && self.relaxation == Relaxation::Placement);
        self.board.add_piece_linked(Piece::new(to, piece.kind()))?;
        self.stats.placements += 1;
        trace!("move {from} -> {to}{}", if relaxed { " (relaxed)" } else { "" });

        if !self.visited.insert(self.board.hash()) {
            self.relax_next = true;
            self.stats.plateaus += 1;
            debug!(
                "{}: layout {:#018x} seen before, relaxing next step",
                self.name(),
                self.board.hash()
            );
        }

        if self.board.is_at_least_one_threat() {
            Ok(Progress::Continue)
        } else {
            Ok(self.settled())
        }
    }

    fn board(&self) -> &Board {
        &self.board
    }

    fn stats(&self) -> SearchStats {
        self.stats
    }
}
