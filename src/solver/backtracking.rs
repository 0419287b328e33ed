//! Depth-first placement, one queen per row.
//!
//! The search is an explicit state machine: the current row, the next
//! column to try in it, and a stack of placed queens. Each step either
//! places one queen or undoes one placement.

use log::trace;

use super::{Progress, SearchStats, SolveError, Solver};
use crate::board::{Board, Coord, Piece, PieceKind};

/// How the search cuts off dead branches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pruning {
    /// Skip columns already holding a queen; threats checked by rescan.
    Columns,
    /// Keep propagated threat sets and back off as soon as the next row is
    /// entirely threatened.
    Lookahead,
}

pub struct Backtracking {
    pruning: Pruning,
    size: usize,
    board: Board,
    stack: Vec<Coord>,
    used_columns: Vec<bool>,
    row: usize,
    column: usize,
    stats: SearchStats,
    exhausted: bool,
}

impl Backtracking {
    #[must_use]
    pub fn new(size: usize, pruning: Pruning) -> Self {
        Backtracking {
            pruning,
            size,
            board: Board::new(size),
            stack: Vec::with_capacity(size),
            used_columns: vec![false; size],
            row: 0,
            column: 0,
            stats: SearchStats::default(),
            exhausted: false,
        }
    }

    #[inline]
    fn propagates(&self) -> bool {
        self.pruning == Pruning::Lookahead
    }

    fn place(&mut self, coord: Coord) -> Result<(), SolveError> {
        self.board
            .add_piece(Piece::new(coord, PieceKind::Queen), self.propagates())?;
        self.stack.push(coord);
        self.used_columns[coord.y] = true;
        self.stats.placements += 1;
        Ok(())
    }

    fn unplace(&mut self) -> Result<Option<Coord>, SolveError> {
        let Some(coord) = self.stack.pop() else {
            return Ok(None);
        };
        self.board.remove_piece(coord, self.propagates())?;
        self.used_columns[coord.y] = false;
        self.stats.backtracks += 1;
        Ok(Some(coord))
    }
}

impl Solver for Backtracking {
    fn name(&self) -> &'static str {
        match self.pruning {
            Pruning::Columns => "backtracking",
            Pruning::Lookahead => "lookahead",
        }
    }

    fn step(&mut self) -> Result<Progress, SolveError> {
        if self.stack.len() == self.size {
            return Ok(Progress::Solved);
        }
        if self.exhausted {
            return Ok(Progress::Exhausted);
        }
        self.stats.steps += 1;

        let fast = self.propagates();
        for y in self.column..self.size {
            if self.pruning == Pruning::Columns && self.used_columns[y] {
                continue;
            }
            let coord = Coord::new(self.row, y);
            if !self.board.is_new_position_unthreatened(coord, fast) {
                continue;
            }
            self.place(coord)?;
            if self.stack.len() == self.size {
                return Ok(Progress::Solved);
            }
            if self.pruning == Pruning::Lookahead
                && self.board.is_entire_row_threatened(self.row + 1)
            {
                trace!("{coord} seals row {}", self.row + 1);
                self.unplace()?;
                continue;
            }
            self.row += 1;
            self.column = 0;
            return Ok(Progress::Continue);
        }

        // Nothing fits in this row: resume the previous row past its queen.
        match self.unplace()? {
            Some(coord) => {
                trace!("backtrack from {coord}");
                self.row = coord.x;
                self.column = coord.y + 1;
                Ok(Progress::Continue)
            }
            None => {
                self.exhausted = true;
                Ok(Progress::Exhausted)
            }
        }
    }

    fn board(&self) -> &Board {
        &self.board
    }

    fn stats(&self) -> SearchStats {
        self.stats
    }
}
