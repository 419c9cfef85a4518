use clap::Parser;
use eight_puzzle_solver::{Board, Heuristic, NeverCancel, SearchConfig, SearchEngine, SearchOutcome};
use std::collections::HashMap;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Compare search heuristics over seeded random boards", long_about = None)]
struct Args {
    /// Number of random boards to evaluate
    #[clap(short, long, default_value_t = 20)]
    boards: u64,

    /// Seed of the first board; board i uses seed + i
    #[clap(short, long, default_value_t = 0)]
    seed: u64,

    /// Also evaluate each heuristic with the closed set disabled
    #[clap(long)]
    include_tree_search: bool,
}

#[derive(Default)]
struct Tally {
    solved: u64,
    total_moves: u64,
    total_expanded: u64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    let mut variants: Vec<(String, SearchConfig)> = Heuristic::ALL
        .into_iter()
        .map(|heuristic| {
            let config = SearchConfig {
                heuristic,
                ..Default::default()
            };
            (heuristic.to_string(), config)
        })
        .collect();
    if args.include_tree_search {
        let tree_variants: Vec<(String, SearchConfig)> = variants
            .iter()
            .map(|(name, config)| {
                let config = SearchConfig {
                    closed_set: false,
                    ..config.clone()
                };
                (format!("{}/tree", name), config)
            })
            .collect();
        variants.extend(tree_variants);
    }

    let mut tallies: HashMap<String, Tally> = HashMap::new();

    println!("Starting heuristic evaluation for {} boards...", args.boards);

    for board_idx in 0..args.boards {
        let current_seed = args.seed + board_idx;
        let initial_board = Board::random_solvable(current_seed);
        println!(
            "\nEvaluating Board {} (Seed: {})\n{}",
            board_idx, current_seed, initial_board
        );

        for (name, config) in &variants {
            let engine = SearchEngine::new(config.clone());
            let outcome = engine.solve(&initial_board, &mut NeverCancel)?;
            let tally = tallies.entry(name.clone()).or_default();
            tally.total_expanded += outcome.stats().nodes_expanded;

            match &outcome {
                SearchOutcome::Solved(solution) => {
                    tally.solved += 1;
                    tally.total_moves += u64::from(solution.cost);
                    println!(
                        "  Variant: {:<22}, Moves: {:<3}, Expanded: {}",
                        name, solution.cost, solution.stats.nodes_expanded
                    );
                }
                other => {
                    eprintln!(
                        "Warning: variant {} did not solve board {} (Seed: {}): {:?}",
                        name,
                        board_idx,
                        current_seed,
                        other.state()
                    );
                }
            }
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("Number of boards evaluated: {}", args.boards);
    println!("\n--- Averages over solved boards ---");

    let mut averages: Vec<(&str, f64, f64)> = Vec::new();
    for (name, _) in &variants {
        let Some(tally) = tallies.get(name) else {
            println!("Variant {}: No results recorded.", name);
            continue;
        };
        if tally.solved == 0 {
            println!("Variant {}: No boards solved.", name);
            continue;
        }
        let solved = tally.solved as f64;
        averages.push((
            name.as_str(),
            tally.total_expanded as f64 / solved,
            tally.total_moves as f64 / solved,
        ));
    }

    // Fewest expansions first
    averages.sort_by(|a, b| a.1.total_cmp(&b.1));

    for (name, avg_expanded, avg_moves) in averages {
        println!(
            "Variant {:<22}: Average Expanded = {:.1}, Average Moves = {:.2}",
            name, avg_expanded, avg_moves
        );
    }
    Ok(())
}
