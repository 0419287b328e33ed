//! Search strategies for placing N mutually non-threatening queens.
//!
//! Every strategy implements [`Solver`]: it owns its board exclusively and
//! advances one unit of work per [`Solver::step`]. [`run`] drives a solver to
//! completion, optionally stopping after a fixed number of steps.
//!
//! # Example
//! ```
//! use nqueens::solver::{run, Outcome, SearchLimits, SolveConfig, Strategy};
//!
//! let config = SolveConfig::new(6).with_seed(7);
//! let mut solver = Strategy::Backtracking.build(&config).unwrap();
//! match run(solver.as_mut(), &SearchLimits::unlimited()).unwrap() {
//!     Outcome::Solved(board) => assert!(board.is_solved()),
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```

mod backtracking;
mod exhaustive;
mod heuristic;

use std::fmt;
use std::str::FromStr;

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::{Board, BoardError};

pub use backtracking::{Backtracking, Pruning};
pub use exhaustive::ExhaustivePermutation;
pub use heuristic::{HeuristicRepair, Relaxation};

/// Result of a single solver step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    Continue,
    Solved,
    Exhausted,
}

/// Final result of a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Solved(Board),
    /// Every candidate was tried without reaching a solution.
    NoSolution,
    /// The caller's step limit ran out first.
    LimitReached { steps: u64 },
}

impl Outcome {
    pub fn board(&self) -> Option<&Board> {
        match self {
            Outcome::Solved(board) => Some(board),
            _ => None,
        }
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, Outcome::Solved(_))
    }
}

/// Counters kept by every solver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub steps: u64,
    pub placements: u64,
    pub backtracks: u64,
    pub plateaus: u64,
}

/// External bound on a run. The strategies themselves never stop early.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchLimits {
    pub max_steps: Option<u64>,
}

impl SearchLimits {
    #[must_use]
    pub const fn unlimited() -> Self {
        SearchLimits { max_steps: None }
    }

    #[must_use]
    pub const fn steps(max_steps: u64) -> Self {
        SearchLimits {
            max_steps: Some(max_steps),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// A board invariant was violated during search
    Board(BoardError),
    /// The initial board does not match the requested size
    SizeMismatch { expected: usize, found: usize },
    /// The initial board does not hold exactly N queens and nothing else
    InvalidStart {
        size: usize,
        queens: usize,
        others: usize,
    },
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::Board(err) => write!(f, "Board invariant violated: {err}"),
            SolveError::SizeMismatch { expected, found } => {
                write!(f, "Initial board is {found}x{found}, expected {expected}x{expected}")
            }
            SolveError::InvalidStart {
                size,
                queens,
                others,
            } => write!(
                f,
                "Initial board holds {queens} queens and {others} other pieces, expected {size} queens"
            ),
        }
    }
}

impl std::error::Error for SolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SolveError::Board(err) => Some(err),
            SolveError::SizeMismatch { .. } | SolveError::InvalidStart { .. } => None,
        }
    }
}

impl From<BoardError> for SolveError {
    fn from(err: BoardError) -> Self {
        SolveError::Board(err)
    }
}

/// A search strategy that owns and mutates one board.
pub trait Solver {
    fn name(&self) -> &'static str;

    /// Advance the search by one unit of work.
    fn step(&mut self) -> Result<Progress, SolveError>;

    /// Current board. After `Progress::Solved` this is the solution.
    fn board(&self) -> &Board;

    fn stats(&self) -> SearchStats;
}

/// Step `solver` until it solves, exhausts, or hits `limits`.
pub fn run(solver: &mut dyn Solver, limits: &SearchLimits) -> Result<Outcome, SolveError> {
    debug!(
        "{}: searching a {n}x{n} board",
        solver.name(),
        n = solver.board().size()
    );
    loop {
        let steps = solver.stats().steps;
        if limits.max_steps.is_some_and(|max| steps >= max) {
            debug!("{}: step limit reached after {steps} steps", solver.name());
            return Ok(Outcome::LimitReached { steps });
        }
        match solver.step()? {
            Progress::Continue => {}
            Progress::Solved => {
                let stats = solver.stats();
                debug!("{}: solved, {stats:?}", solver.name());
                return Ok(Outcome::Solved(solver.board().clone()));
            }
            Progress::Exhausted => {
                let stats = solver.stats();
                debug!("{}: no solution, {stats:?}", solver.name());
                return Ok(Outcome::NoSolution);
            }
        }
        trace!("{}: {:?}", solver.name(), solver.stats());
    }
}

/// The available strategies, by command-line name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Strategy {
    BruteForce,
    Backtracking,
    Lookahead,
    H1,
    H2,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::BruteForce,
        Strategy::Backtracking,
        Strategy::Lookahead,
        Strategy::H1,
        Strategy::H2,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Strategy::BruteForce => "brute_force",
            Strategy::Backtracking => "backtracking",
            Strategy::Lookahead => "lookahead",
            Strategy::H1 => "h1",
            Strategy::H2 => "h2",
        }
    }

    /// Only the heuristic strategies start from a supplied board.
    #[must_use]
    pub const fn accepts_initial_board(self) -> bool {
        matches!(self, Strategy::H1 | Strategy::H2)
    }

    /// Create a solver for `config`.
    pub fn build(self, config: &SolveConfig) -> Result<Box<dyn Solver>, SolveError> {
        Ok(match self {
            Strategy::BruteForce => Box::new(ExhaustivePermutation::new(config.size)),
            Strategy::Backtracking => Box::new(Backtracking::new(config.size, Pruning::Columns)),
            Strategy::Lookahead => Box::new(Backtracking::new(config.size, Pruning::Lookahead)),
            Strategy::H1 | Strategy::H2 => {
                let relaxation = if self == Strategy::H1 {
                    Relaxation::Placement
                } else {
                    Relaxation::Selection
                };
                let rng = config.rng();
                let solver = match &config.initial {
                    Some(board) if board.size() != config.size => {
                        return Err(SolveError::SizeMismatch {
                            expected: config.size,
                            found: board.size(),
                        })
                    }
                    Some(board) => HeuristicRepair::from_board(board.clone(), relaxation, rng)?,
                    None => HeuristicRepair::diagonal(config.size, relaxation, rng)?,
                };
                Box::new(solver)
            }
        })
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStrategy(pub String);

impl fmt::Display for UnknownStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown strategy '{}'", self.0)
    }
}

impl std::error::Error for UnknownStrategy {}

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Strategy::ALL
            .into_iter()
            .find(|st| st.name() == normalized)
            .ok_or_else(|| UnknownStrategy(s.to_string()))
    }
}

/// Everything a strategy needs to start.
#[derive(Clone, Debug, Default)]
pub struct SolveConfig {
    pub size: usize,
    /// Seed for the per-run random source; entropy when unset.
    pub seed: Option<u64>,
    /// Starting layout for the heuristic strategies.
    pub initial: Option<Board>,
}

impl SolveConfig {
    #[must_use]
    pub fn new(size: usize) -> Self {
        SolveConfig {
            size,
            ..SolveConfig::default()
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_initial(mut self, board: Board) -> Self {
        self.size = board.size();
        self.initial = Some(board);
        self
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardBuilder;

    #[test]
    fn test_strategy_names_round_trip() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.name().parse::<Strategy>(), Ok(strategy));
            assert_eq!(strategy.to_string(), strategy.name());
        }
        assert_eq!(" H1 ".parse::<Strategy>(), Ok(Strategy::H1));
        assert!("all".parse::<Strategy>().is_err());
    }

    #[test]
    fn test_only_heuristics_accept_initial_board() {
        assert!(Strategy::H1.accepts_initial_board());
        assert!(Strategy::H2.accepts_initial_board());
        assert!(!Strategy::Backtracking.accepts_initial_board());
    }

    #[test]
    fn test_initial_board_size_mismatch() {
        let mut config = SolveConfig::new(5);
        config.initial = Some(Board::new(4));
        assert!(matches!(
            Strategy::H1.build(&config),
            Err(SolveError::SizeMismatch {
                expected: 5,
                found: 4
            })
        ));
    }

    #[test]
    fn test_step_limit_stops_run() {
        // three queens never settle on a 3x3 board
        let config = SolveConfig::new(3).with_seed(1);
        let mut solver = Strategy::H2.build(&config).unwrap();
        let outcome = run(solver.as_mut(), &SearchLimits::steps(50)).unwrap();
        assert_eq!(outcome, Outcome::LimitReached { steps: 50 });
        assert_eq!(solver.stats().steps, 50);
    }

    #[test]
    fn test_initial_board_is_used() {
        let board = BoardBuilder::new(4).queen(0, 1).queen(1, 3).build().unwrap();
        let config = SolveConfig::new(8).with_initial(board.clone());
        assert_eq!(config.size, 4);
        let solver = Strategy::H1.build(&config).unwrap();
        assert_eq!(solver.board(), &board);
    }

    #[test]
    fn test_no_solution_is_distinct_from_solved() {
        let mut solver = Strategy::Backtracking.build(&SolveConfig::new(3)).unwrap();
        let outcome = run(solver.as_mut(), &SearchLimits::unlimited()).unwrap();
        assert_eq!(outcome, Outcome::NoSolution);
        assert!(outcome.board().is_none());
    }

    #[test]
    fn test_underpopulated_start_board_is_rejected() {
        for layout in ["- - - -\n- - - -\n- - - -\n- - - -\n", "Q - - -\n- - - -\n- - - -\n- - - -\n"] {
            let board = Board::try_from_layout(layout).unwrap();
            let queens = board.active_count();
            for strategy in [Strategy::H1, Strategy::H2] {
                let config = SolveConfig::new(4).with_seed(3).with_initial(board.clone());
                assert_eq!(
                    strategy.build(&config).err(),
                    Some(SolveError::InvalidStart {
                        size: 4,
                        queens,
                        others: 0
                    })
                );
            }
        }
    }

    #[test]
    fn test_start_board_with_other_kinds_is_rejected() {
        let board = Board::try_from_layout("Q - - -\n- - - Q\n- R - -\n- - Q -\n").unwrap();
        let config = SolveConfig::new(4).with_initial(board);
        let err = Strategy::H2.build(&config).err().unwrap();
        assert_eq!(
            err,
            SolveError::InvalidStart {
                size: 4,
                queens: 3,
                others: 1
            }
        );
        assert!(err.to_string().contains("expected 4 queens"));
    }

    #[test]
    fn test_solve_error_from_board_error() {
        let err: SolveError = BoardError::Vacant {
            coord: crate::board::Coord::new(0, 0),
        }
        .into();
        assert!(err.to_string().contains("(0, 0)"));
    }
}
