//! Command-line consumer for the search engines.
//!
//! Commands:
//! - backtrack: exhaustive N-Queens search
//! - las-vegas: randomized N-Queens placement with restarts
//! - subset-sum: enumerate every subset reaching a target
//! - replay: step through the history of a subset-sum run
//! - explain: print how an algorithm works and what it costs
//!
//! Run with: `cargo run -p queens -- backtrack -n 8 --delay-ms 0`

use std::ops::ControlFlow;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use backtrack::prelude::*;
use backtrack::{drive, parse_numbers, parse_target, Algorithm, LasVegasEvent};
use clap::{Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[derive(Parser)]
#[command(name = "queens")]
#[command(version)]
#[command(about = "N-Queens and subset-sum search with live progress")]
struct Cli {
    /// TOML configuration file (defaults to ./backtrack.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Pause after each placement, in milliseconds
    #[arg(long, global = true)]
    delay_ms: Option<u64>,

    /// Random seed for Las Vegas runs and random arrays
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Print every step
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Place N queens by exhaustive backtracking
    Backtrack {
        /// Board size
        #[arg(short = 'n', long)]
        size: Option<usize>,

        /// Cancel the search after this many snapshots
        #[arg(long)]
        cancel_after: Option<u64>,
    },

    /// Place N queens by random restarts
    LasVegas {
        /// Board size
        #[arg(short = 'n', long)]
        size: Option<usize>,

        /// Give up after this many failed attempts
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        max_attempts: Option<u64>,

        /// Run a single attempt instead of retrying
        #[arg(long)]
        single: bool,

        /// Cancel the search after this many snapshots
        #[arg(long)]
        cancel_after: Option<u64>,
    },

    /// Find every subset of an array that sums to a target
    SubsetSum {
        #[command(flatten)]
        input: SubsetInput,

        /// Cancel the search after this many snapshots
        #[arg(long)]
        cancel_after: Option<u64>,
    },

    /// Run a subset-sum search, then step through its history
    Replay {
        #[command(flatten)]
        input: SubsetInput,

        /// History index to start from
        #[arg(long, default_value_t = 0)]
        from: usize,

        /// Number of moves to make
        #[arg(long, default_value_t = 10)]
        steps: usize,

        /// Move backward instead of forward
        #[arg(long)]
        backward: bool,
    },

    /// Explain an algorithm
    Explain {
        #[arg(value_enum)]
        algorithm: AlgorithmArg,
    },
}

#[derive(clap::Args)]
struct SubsetInput {
    /// Comma-separated integers, e.g. "2,3,5,7,11"
    #[arg(long)]
    numbers: Option<String>,

    /// Target sum
    #[arg(long, allow_hyphen_values = true)]
    target: Option<String>,

    /// Generate a random array instead of using --numbers
    #[arg(long, conflicts_with = "numbers")]
    random: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum AlgorithmArg {
    Backtracking,
    LasVegas,
    SubsetSum,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Backtracking => Algorithm::Backtracking,
            AlgorithmArg::LasVegas => Algorithm::LasVegas,
            AlgorithmArg::SubsetSum => Algorithm::SubsetSum,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Explain { algorithm } = cli.command {
        explain(algorithm.into());
        return Ok(());
    }

    backtrack::init_console();
    let config = build_config(&cli)?;
    let manager = SearchManager::new(config);
    let verbose = cli.verbose;

    match cli.command {
        Commands::Backtrack { size, cancel_after } => {
            let size = size.unwrap_or(manager.config().queens.board_size);
            run_backtracking(&manager, size, cancel_after, verbose)
        }
        Commands::LasVegas {
            size,
            max_attempts,
            single,
            cancel_after,
        } => {
            let size = size.unwrap_or(manager.config().queens.board_size);
            let manager = match max_attempts {
                Some(max) => SearchManager::new(manager.config().clone().with_max_attempts(max)),
                None => manager,
            };
            run_las_vegas(&manager, size, single, cancel_after, verbose)
        }
        Commands::SubsetSum {
            input,
            cancel_after,
        } => {
            let problem = subset_problem(&input, manager.config())?;
            run_subset_sum(&manager, problem, cancel_after, verbose)
        }
        Commands::Replay {
            input,
            from,
            steps,
            backward,
        } => {
            let problem = subset_problem(&input, manager.config())?;
            replay(&manager, problem, from, steps, backward)
        }
        Commands::Explain { .. } => Ok(()),
    }
}

fn build_config(cli: &Cli) -> Result<SearchConfig> {
    let mut config = match &cli.config {
        Some(path) => SearchConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => backtrack::load_config(),
    };
    if let Some(ms) = cli.delay_ms {
        config = config.with_step_delay(Duration::from_millis(ms));
    }
    if let Some(seed) = cli.seed {
        config = config.with_random_seed(seed);
    }
    Ok(config)
}

fn subset_problem(input: &SubsetInput, config: &SearchConfig) -> Result<SubsetSumProblem> {
    let target = match &input.target {
        Some(text) => parse_target(text)?,
        None => config.subset_sum.target,
    };

    if input.random {
        let (count, max) = (config.subset_sum.random_count, config.subset_sum.random_max);
        let mut rng = match config.random_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_os_rng(),
        };
        return Ok(SubsetSumProblem::random(count, max, target, &mut rng));
    }

    let numbers = match &input.numbers {
        Some(text) => parse_numbers(text)?,
        None => config.subset_sum.numbers.clone(),
    };
    Ok(SubsetSumProblem::new(numbers, target))
}

/// Consumer callback that breaks after `limit` snapshots.
fn cancel_after<T>(
    limit: Option<u64>,
    mut each: impl FnMut(&T),
) -> impl FnMut(&T) -> ControlFlow<()> {
    let mut seen = 0u64;
    move |snapshot| {
        each(snapshot);
        seen += 1;
        match limit {
            Some(limit) if seen >= limit => {
                println!("Cancelling after {} snapshots", seen);
                ControlFlow::Break(())
            }
            _ => ControlFlow::Continue(()),
        }
    }
}

fn run_backtracking(
    manager: &SearchManager,
    size: usize,
    limit: Option<u64>,
    verbose: bool,
) -> Result<()> {
    let job = manager.start_backtracking(size)?;
    let report = drive(
        job,
        cancel_after(limit, |snapshot: &PlacementSnapshot| {
            if verbose {
                println!("{}", snapshot.status());
                println!("{}\n", snapshot.placement.render());
            }
        }),
    )?;

    println!("{}", report);
    println!("{}", report.placement.render());
    Ok(())
}

fn run_las_vegas(
    manager: &SearchManager,
    size: usize,
    single: bool,
    limit: Option<u64>,
    verbose: bool,
) -> Result<()> {
    let print_event = |event: &LasVegasEvent| match event {
        LasVegasEvent::Placed(snapshot) if verbose => println!("{}", snapshot.status()),
        LasVegasEvent::AttemptEnded {
            attempt,
            outcome: SearchOutcome::Failed,
            ..
        } => println!("Attempt {} failed, retrying...", attempt),
        _ => {}
    };

    if single {
        let attempt = drive(
            manager.start_las_vegas_attempt(size)?,
            cancel_after(limit, print_event),
        )?;
        println!("{}", attempt);
        println!("{}", attempt.placement.render());
        return Ok(());
    }

    let report = drive(
        manager.start_las_vegas(size)?,
        cancel_after(limit, print_event),
    )?;
    println!("{}", report);
    println!("{}", report.placement.render());
    Ok(())
}

fn run_subset_sum(
    manager: &SearchManager,
    problem: SubsetSumProblem,
    limit: Option<u64>,
    verbose: bool,
) -> Result<()> {
    println!("Array: {:?}", problem.numbers());
    println!("Target: {}", problem.target());

    let job = manager.start_subset_sum(problem)?;
    let report = drive(
        job,
        cancel_after(limit, |state: &SubsetSumState| {
            if verbose {
                println!("{}\n", state);
            }
        }),
    )?;

    println!("{}", report);
    println!("History: {} states", report.history.len());
    Ok(())
}

fn replay(
    manager: &SearchManager,
    problem: SubsetSumProblem,
    from: usize,
    steps: usize,
    backward: bool,
) -> Result<()> {
    manager.start_subset_sum(problem)?.join()?;
    let mut history = manager.replay()?;

    if history.seek(from).is_none() {
        anyhow::bail!(
            "history index {} out of range (0..{})",
            from,
            history.len()
        );
    }
    print_replay_state(&history);

    for _ in 0..steps {
        let moved = if backward {
            history.backward()
        } else {
            history.forward()
        };
        if let Some(message) = moved.boundary_message() {
            println!("{}", message);
            break;
        }
        print_replay_state(&history);
    }
    Ok(())
}

fn print_replay_state(history: &HistoryBuffer<SubsetSumState>) {
    if let Some(state) = history.current() {
        println!("[{}/{}]", history.cursor() + 1, history.len());
        println!("{}\n", state);
    }
}

fn explain(algorithm: Algorithm) {
    println!("{}", algorithm.name());
    for (i, step) in algorithm.explanation().iter().enumerate() {
        println!("{}. {}", i + 1, step);
    }
    println!();
    println!("{}", algorithm.complexity());
}
