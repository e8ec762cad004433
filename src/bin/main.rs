use std::fmt::Display;
use std::path::Path;
use std::path::PathBuf;
use std::rc::Rc;

use anstream::println;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use hrsw::Stopwatch;
use human_duration::human_duration;
use owo_colors::OwoColorize;
use thiserror::Error;

use puzzle_search::algorithms::bfs::BfsSolver;
use puzzle_search::algorithms::dfs::DfsSolver;
use puzzle_search::debug::type_name;
use puzzle_search::path::SolutionPath;
use puzzle_search::problems::maze_2d::Maze2DProblem;
use puzzle_search::problems::maze_2d::Maze2DProblemParseError;
use puzzle_search::problems::word_ladder::Dictionary;
use puzzle_search::problems::word_ladder::WordLadderError;
use puzzle_search::problems::word_ladder::WordLadderPuzzle;
use puzzle_search::puzzle::Puzzle;
use puzzle_search::solver::PrunePolicy;
use puzzle_search::solver::Solver;
use puzzle_search::solver::SolverConfig;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Words used when no dictionary is given.
const DEFAULT_WORDS: &str = include_str!("../../data/problems/word_ladder/words.txt");

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Depth-first search
    Dfs,
    /// Breadth-first search, finds the shortest solution
    Bfs,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Prune {
    /// Solved states are accepted even when pruned
    Reference,
    /// Pruned states are never part of a solution
    Strict,
}

impl From<Prune> for PrunePolicy {
    fn from(p: Prune) -> Self {
        match p {
            Prune::Reference => PrunePolicy::Reference,
            Prune::Strict => PrunePolicy::Strict,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Turns a word into another one, a letter at a time
    WordLadder {
        from: String,
        to: String,

        /// Whitespace separated dictionary
        #[arg(short, long, env = "PUZZLE_SEARCH_WORDS")]
        words: Option<PathBuf>,
    },
    /// Walks from `S` to a `G` in a text maze
    Maze {
        maze: PathBuf,

        /// Gives up on positions reached after this many moves
        #[arg(long)]
        max_moves: Option<u32>,
    },
}

/// Command line arguments
#[derive(Parser, Debug)]
#[clap(long_version = puzzle_search::build::CLAP_LONG_VERSION)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// How to explore the puzzle
    #[arg(
        short,
        long,
        value_enum,
        global = true,
        env = "PUZZLE_SEARCH_STRATEGY",
        default_value_t = Strategy::Bfs
    )]
    pub strategy: Strategy,

    /// Whether solved states may be pruned ones
    #[arg(long, value_enum, global = true, default_value_t = Prune::Reference)]
    pub prune: Prune,

    /// Prints search stats
    #[arg(long, global = true)]
    pub stats: bool,

    /// Logs more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(flatten)]
    color: colorchoice_clap::Color,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error when loading '{p}': {e}")]
    IOError { p: PathBuf, e: std::io::Error },
    #[error("Couldn't write output: {0}")]
    Output(#[from] std::io::Error),
    #[error(transparent)]
    WordLadder(#[from] WordLadderError),
    #[error(transparent)]
    Maze(#[from] Maze2DProblemParseError),
    #[error("The maze has no start")]
    NoStart,
    #[error("Couldn't set up logging: {0}")]
    Logging(#[from] log::SetLoggerError),
}

fn setup_logging(verbose: u8) -> Result<(), log::SetLoggerError> {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
}

fn solve<P, S>(mut solver: S, start: P, print_stats: bool) -> Result<SolutionPath<P>, CliError>
where
    P: Puzzle + Display,
    S: Solver<P>,
{
    log::info!(
        "Solving {start} with {} ({} pruning)",
        type_name::<S>(),
        solver.config().prune
    );

    let mut stopwatch = Stopwatch::new_started();
    let path = solver.solve(start);
    stopwatch.stop();
    let elapsed = stopwatch.elapsed();

    if path.is_empty() {
        println!("{} ({})", "No solution".red(), human_duration(&elapsed));
    } else {
        println!(
            "{} {} moves ({})",
            "Solved in".green(),
            path.moves().bold(),
            human_duration(&elapsed)
        );
    }
    if print_stats {
        solver.print_stats()?;
    }

    Ok(path)
}

fn solve_with<P>(args: &Args, start: P) -> Result<SolutionPath<P>, CliError>
where
    P: Puzzle + Display,
{
    let config = SolverConfig::default().with_prune(args.prune.into());
    match args.strategy {
        Strategy::Dfs => solve(DfsSolver::with_config(config), start, args.stats),
        Strategy::Bfs => solve(BfsSolver::with_config(config), start, args.stats),
    }
}

fn read(p: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(p).map_err(|e| CliError::IOError {
        p: p.to_path_buf(),
        e,
    })
}

fn main() -> Result<(), CliError> {
    let args = Args::parse();
    args.color.write_global();
    setup_logging(args.verbose)?;

    match &args.command {
        Command::WordLadder { from, to, words } => {
            let dictionary = match words {
                Some(p) => Dictionary::try_from(read(p)?.as_str())?,
                None => Dictionary::try_from(DEFAULT_WORDS)?,
            };
            log::info!("Loaded {} words", dictionary.len());

            let start = WordLadderPuzzle::new(from, to, Rc::new(dictionary))?;
            let path = solve_with(&args, start)?;
            for (i, step) in path.iter().enumerate() {
                println!("{i:>4}. {}", step.word().yellow());
            }
        }
        Command::Maze { maze, max_moves } => {
            let problem = Maze2DProblem::try_from(maze.as_path())?;
            log::info!("Loaded {problem}");

            let start = problem
                .puzzles(*max_moves)
                .into_iter()
                .next()
                .ok_or(CliError::NoStart)?;
            let path = solve_with(&args, start)?;
            if !path.is_empty() {
                println!("{}", problem.render_path(&path));
            }
        }
    }

    Ok(())
}
