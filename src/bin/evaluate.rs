use std::process::ExitCode;

use clap::Parser;
use log::{debug, error, info};

use shootout::logging;
use shootout::search::Strategy;
use shootout::tree::GameTree;

#[derive(Debug, Parser)]
#[command(name = "shootout evaluate", about = "Evaluate a tree with fixed leaf values.")]
struct Opts {
    /// Depth of the tree.
    #[arg(long, allow_negative_numbers = true)]
    depth: i64,
    /// Branching factor of the tree.
    #[arg(long, allow_negative_numbers = true)]
    branches: i64,
    /// JSON array of leaf values from left to right.
    #[arg(value_parser = parse_terminals)]
    terminals: Terminals,
    /// Search algorithm.
    #[arg(long, default_value_t)]
    strategy: Strategy,
}

#[derive(Debug, Clone)]
struct Terminals(Vec<f64>);

fn parse_terminals(s: &str) -> Result<Terminals, serde_json::Error> {
    serde_json::from_str(s).map(Terminals)
}

fn main() -> ExitCode {
    logging();

    let Opts {
        depth,
        branches,
        terminals,
        strategy,
    } = Opts::parse();

    let mut tree = match GameTree::new(depth, branches, &terminals.0) {
        Ok(tree) => tree,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    info!("{}", tree);

    let depth = tree.depth();
    match strategy.evaluate(&mut tree, depth) {
        Ok(result) => {
            debug!("{:?}", tree);
            println!(
                "value {} visited {}/{} leafs, {} cutoffs, line {:?}",
                result.value,
                result.visited,
                result.leaves,
                result.cutoffs,
                result.line
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
