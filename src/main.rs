use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use log::{error, info, warn};

use nqueens::board::Board;
use nqueens::solver::{run, Outcome, SearchLimits, SolveConfig, SolveError, Strategy};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    #[value(name = "brute_force")]
    BruteForce,
    Backtracking,
    Lookahead,
    H1,
    H2,
    All,
}

impl StrategyArg {
    fn expand(self) -> &'static [Strategy] {
        match self {
            StrategyArg::BruteForce => &[Strategy::BruteForce],
            StrategyArg::Backtracking => &[Strategy::Backtracking],
            StrategyArg::Lookahead => &[Strategy::Lookahead],
            StrategyArg::H1 => &[Strategy::H1],
            StrategyArg::H2 => &[Strategy::H2],
            StrategyArg::All => &Strategy::ALL,
        }
    }
}

/// Place N mutually non-threatening queens on an NxN board.
#[derive(Parser, Debug)]
#[command(name = "nqueens", version)]
struct Args {
    /// Board side length
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    size: u32,

    /// Strategies to run, in order
    #[arg(value_enum, default_value = "all")]
    strategies: Vec<StrategyArg>,

    /// Starting board file for h1/h2
    #[arg(long, value_name = "FILE")]
    load: Option<PathBuf>,

    /// Seed for the heuristic strategies' random choices
    #[arg(long)]
    seed: Option<u64>,

    /// Stop each run after this many solver steps
    #[arg(long, value_name = "STEPS")]
    max_steps: Option<u64>,
}

/// Resolved run settings.
struct RunOptions {
    strategies: Vec<Strategy>,
    base: SolveConfig,
    initial: Option<Board>,
    limits: SearchLimits,
}

impl RunOptions {
    fn from_args(args: Args) -> Result<Self, Box<dyn Error>> {
        let mut strategies: Vec<Strategy> = Vec::new();
        for strategy in args.strategies.iter().flat_map(|s| s.expand()) {
            if !strategies.contains(strategy) {
                strategies.push(*strategy);
            }
        }

        let mut base = SolveConfig::new(args.size as usize);
        base.seed = args.seed;

        let initial = match &args.load {
            None => None,
            Some(path) if !strategies.iter().any(|s| s.accepts_initial_board()) => {
                warn!(
                    "--load {} is only used by h1/h2; ignored",
                    path.display()
                );
                None
            }
            Some(path) => {
                for s in strategies.iter().filter(|s| !s.accepts_initial_board()) {
                    warn!("{s} ignores --load");
                }
                let board = load_board(path)?;
                if board.size() != base.size {
                    warn!(
                        "{} holds a {n}x{n} board; h1/h2 will use that size",
                        path.display(),
                        n = board.size()
                    );
                }
                Some(board)
            }
        };

        Ok(RunOptions {
            strategies,
            base,
            initial,
            limits: SearchLimits {
                max_steps: args.max_steps,
            },
        })
    }

    fn config_for(&self, strategy: Strategy) -> SolveConfig {
        match &self.initial {
            Some(board) if strategy.accepts_initial_board() => {
                self.base.clone().with_initial(board.clone())
            }
            _ => self.base.clone(),
        }
    }
}

fn load_board(path: &Path) -> Result<Board, Box<dyn Error>> {
    let text = fs::read_to_string(path)
        .map_err(|err| format!("cannot read {}: {err}", path.display()))?;
    let board = Board::try_from_layout(&text)
        .map_err(|err| format!("malformed board file {}: {err}", path.display()))?;
    info!("loaded {n}x{n} board from {}", path.display(), n = board.size());
    Ok(board)
}

fn solve_one(strategy: Strategy, options: &RunOptions) -> Result<(), SolveError> {
    let config = options.config_for(strategy);
    let start = Instant::now();
    let mut solver = strategy.build(&config)?;
    let outcome = run(solver.as_mut(), &options.limits)?;
    let elapsed = start.elapsed();

    println!("{strategy}:");
    match outcome {
        Outcome::Solved(board) => print!("{board}"),
        Outcome::NoSolution => println!("no solution"),
        Outcome::LimitReached { steps } => println!("step limit reached after {steps} steps"),
    }
    println!("time: {:.6}s", elapsed.as_secs_f64());
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let options = match RunOptions::from_args(Args::parse()) {
        Ok(options) => options,
        Err(err) => {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    for &strategy in &options.strategies {
        if let Err(err) = solve_one(strategy, &options) {
            error!("{strategy}: {err}");
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
