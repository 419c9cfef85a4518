use anyhow::Context;
use clap::Parser;
use eight_puzzle_solver::engine::BOARD_SIZE;
use eight_puzzle_solver::utils::{format_path, parse_grid, parse_inline_grid};
use eight_puzzle_solver::{
    Board, CancelReason, Heuristic, SearchConfig, SearchEngine, SearchOutcome,
};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path to the board file (three lines of three space-separated values).
    /// Reads from stdin when neither this nor --grid is given.
    board_file: Option<PathBuf>,

    /// Board given inline, rows separated by ',' (e.g. "1 2 3,4 5 6,7 0 8")
    #[clap(short, long, conflicts_with = "board_file")]
    grid: Option<String>,

    /// Path to a search config TOML file
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Offer a cancellation check whenever a new node's move count is a multiple of this
    #[clap(long)]
    check_interval: Option<u32>,

    /// Stop after this many expansions and print the best partial path
    #[clap(long)]
    max_expansions: Option<u64>,

    /// Heuristic ordering the frontier: manhattan or misplaced_tiles
    #[clap(long)]
    heuristic: Option<Heuristic>,

    /// Allow boards to be expanded more than once
    #[clap(long)]
    no_closed_set: bool,

    /// Search even when the board's parity rules out a solution
    #[clap(long)]
    skip_solvability_check: bool,

    /// Ask whether to keep searching at every cancellation checkpoint
    #[clap(short, long)]
    interactive: bool,
}

fn read_board(args: &Args) -> anyhow::Result<Board> {
    if let Some(grid) = &args.grid {
        return parse_inline_grid(grid).context("Invalid --grid value");
    }

    if let Some(path) = &args.board_file {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read board file {}", path.display()))?;
        return parse_grid(&content)
            .with_context(|| format!("Invalid board format in {}", path.display()));
    }

    eprintln!(
        "enter a three by three grid with each row on its own line, with the numbers \
         separated by spaces\nNumbers can be an integer from 0-8 inclusive"
    );
    let stdin = io::stdin();
    let mut rows = Vec::with_capacity(BOARD_SIZE);
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read board from stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        rows.push(line);
        if rows.len() == BOARD_SIZE {
            break;
        }
    }
    parse_grid(&rows.join("\n")).context("Invalid board on stdin")
}

fn build_config(args: &Args) -> anyhow::Result<SearchConfig> {
    let mut config = match &args.config {
        Some(path) => SearchConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SearchConfig::default(),
    };

    if let Some(interval) = args.check_interval {
        config.check_interval = interval;
    }
    if let Some(limit) = args.max_expansions {
        config.max_expansions = Some(limit);
    }
    if let Some(heuristic) = args.heuristic {
        config.heuristic = heuristic;
    }
    if args.no_closed_set {
        config.closed_set = false;
    }
    if args.skip_solvability_check {
        config.check_solvability = false;
    }
    Ok(config)
}

/// Prompts on stdin; anything but "n" keeps the search going.
fn ask_to_continue(cost: u32) -> bool {
    print!("g={} would you like to continue (y/n)? it may be infinite! ", cost);
    if io::stdout().flush().is_err() {
        return true;
    }
    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(0) | Err(_) => true,
        Ok(_) => !input.trim().eq_ignore_ascii_case("n"),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let board = read_board(&args)?;
    let engine = SearchEngine::new(build_config(&args)?);

    println!("Initial board state:\n{}\n", board);

    let outcome = if args.interactive {
        engine.solve(&board, &mut ask_to_continue)?
    } else {
        engine.solve(&board, &mut |_cost: u32| true)?
    };

    match &outcome {
        SearchOutcome::Solved(solution) => {
            println!("Solution found in {} moves:\n", solution.cost);
            print!("{}", format_path(&solution.path));
        }
        SearchOutcome::Cancelled { partial, reason } => {
            let why = match reason {
                CancelReason::Requested => "cancelled",
                CancelReason::ExpansionLimit => "stopped at the expansion limit",
            };
            println!(
                "Search {} after {} expansions. Best partial path ({} moves):\n",
                why, partial.stats.nodes_expanded, partial.cost
            );
            print!("{}", format_path(&partial.path));
        }
        SearchOutcome::Exhausted(stats) => {
            println!(
                "No solution found: frontier exhausted after {} expansions.",
                stats.nodes_expanded
            );
        }
    }

    let stats = outcome.stats();
    println!(
        "Expanded: {}, Generated: {}, Duplicates skipped: {}, Frontier peak: {}",
        stats.nodes_expanded, stats.nodes_generated, stats.duplicates_skipped, stats.frontier_peak
    );
    Ok(())
}
