//! Exhaustive search over column permutations.
//!
//! One queen per row and per column means a candidate is a permutation of
//! the columns, so only N! layouts need checking instead of N^N.

use log::trace;

use super::{Progress, SearchStats, SolveError, Solver};
use crate::board::{Board, Coord, Piece, PieceKind};

pub struct ExhaustivePermutation {
    columns: Vec<usize>,
    // empty board each candidate starts from
    blank: Board,
    board: Board,
    stats: SearchStats,
    exhausted: bool,
}

impl ExhaustivePermutation {
    #[must_use]
    pub fn new(size: usize) -> Self {
        let blank = Board::new(size);
        ExhaustivePermutation {
            columns: (0..size).collect(),
            board: blank.clone(),
            blank,
            stats: SearchStats::default(),
            exhausted: false,
        }
    }

    /// Place the current permutation on a fresh board, stopping at the first
    /// queen that would be threatened. Returns whether every queen fit.
    fn try_permutation(&mut self) -> Result<bool, SolveError> {
        let mut board = self.blank.clone();
        let mut fits = true;
        for (x, &y) in self.columns.iter().enumerate() {
            let coord = Coord::new(x, y);
            if !board.is_new_position_unthreatened(coord, false) {
                fits = false;
                break;
            }
            board.add_piece(Piece::new(coord, PieceKind::Queen), false)?;
            self.stats.placements += 1;
        }
        self.board = board;
        Ok(fits)
    }
}

impl Solver for ExhaustivePermutation {
    fn name(&self) -> &'static str {
        "brute_force"
    }

    /// Tests one permutation. After a solution, the next call resumes with
    /// the following permutation, so repeated stepping enumerates every
    /// solution.
    fn step(&mut self) -> Result<Progress, SolveError> {
        if self.exhausted {
            return Ok(Progress::Exhausted);
        }
        self.stats.steps += 1;
        let fits = self.try_permutation()?;
        trace!("permutation {:?} fits: {fits}", self.columns);
        if !next_permutation(&mut self.columns) {
            self.exhausted = true;
        }
        if fits {
            Ok(Progress::Solved)
        } else if self.exhausted {
            Ok(Progress::Exhausted)
        } else {
            Ok(Progress::Continue)
        }
    }

    fn board(&self) -> &Board {
        &self.board
    }

    fn stats(&self) -> SearchStats {
        self.stats
    }
}

/// Rearrange `v` into the next permutation in lexicographic order.
/// Returns false once `v` is the last permutation.
fn next_permutation(v: &mut [usize]) -> bool {
    if v.len() < 2 {
        return false;
    }
    let mut i = v.len() - 1;
    while i > 0 && v[i - 1] >= v[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }
    let mut j = v.len() - 1;
    while v[j] <= v[i - 1] {
        j -= 1;
    }
    v.swap(i - 1, j);
    v[i..].reverse();
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solutions(size: usize) -> Vec<Board> {
        let mut solver = ExhaustivePermutation::new(size);
        let mut found = Vec::new();
        loop {
            match solver.step().unwrap() {
                Progress::Continue => {}
                Progress::Solved => found.push(solver.board().clone()),
                Progress::Exhausted => return found,
            }
        }
    }

    #[test]
    fn test_next_permutation_visits_all() {
        let mut v = vec![0, 1, 2, 3];
        let mut count = 1;
        while next_permutation(&mut v) {
            count += 1;
        }
        assert_eq!(count, 24);
        assert_eq!(v, vec![3, 2, 1, 0]);
    }

    #[test]
    fn test_next_permutation_order() {
        let mut v = vec![0, 2, 1];
        assert!(next_permutation(&mut v));
        assert_eq!(v, vec![1, 0, 2]);
    }

    #[test]
    fn test_four_queens_has_two_solutions() {
        let found = solutions(4);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].to_layout(), "- Q - -\n- - - Q\nQ - - -\n- - Q -\n");
        assert!(found.iter().all(Board::is_solved));
    }

    #[test]
    fn test_small_sizes() {
        assert_eq!(solutions(1).len(), 1);
        assert!(solutions(2).is_empty());
        assert!(solutions(3).is_empty());
        assert_eq!(solutions(5).len(), 10);
        assert_eq!(solutions(6).len(), 4);
    }

    #[test]
    fn test_candidates_start_from_blank_board() {
        let mut solver = ExhaustivePermutation::new(5);
        for _ in 0..20 {
            solver.step().unwrap();
            assert_eq!(solver.blank.active_count(), 0);
            assert_eq!(solver.blank.hash(), 0);
            assert!(solver.board().active_count() <= 5);
            assert_eq!(solver.board().hash(), solver.board().calculate_hash());
        }
    }

    #[test]
    fn test_step_counts_permutations() {
        let mut solver = ExhaustivePermutation::new(3);
        while solver.step().unwrap() == Progress::Continue {}
        assert_eq!(solver.stats().steps, 6);
    }
}
