use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use owo_colors::OwoColorize;

use shootout::scenario::Scenario;
use shootout::search::Strategy;
use shootout::logging;

#[derive(Debug, Parser)]
#[command(
    name = "shootout",
    about = "Damage the attacker deals under optimal play, found with alpha-beta pruning."
)]
struct Opts {
    /// Number of turns, each turn is an attacker and a defender move.
    #[arg(long, default_value_t = 1)]
    turns: u32,
    /// Initial hp of the defender, 0 selects a random value in 50..=100.
    #[arg(long, default_value_t = 0)]
    hp: i64,
    /// Number of bullets, the branching factor of the tree.
    #[arg(long, default_value_t = 2)]
    bullets: u32,
    /// Lower and upper bound of the damage of a single shot.
    #[arg(
        long,
        num_args = 2,
        allow_negative_numbers = true,
        value_names = ["LOW", "HIGH"],
        default_values_t = [1, 10]
    )]
    damage: Vec<i64>,
    /// Seed for the damage values.
    #[arg(long)]
    seed: Option<u64>,
    /// Search algorithm.
    #[arg(long, default_value_t)]
    strategy: Strategy,
    /// Print the report as json.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    logging();

    let Opts {
        turns,
        hp,
        bullets,
        damage,
        seed,
        strategy,
        json,
    } = Opts::parse();

    let scenario = Scenario {
        turns,
        initial_hp: hp,
        bullets,
        damage: (damage[0], damage[1]),
        seed,
    };
    info!("{:?} {}", scenario, strategy);

    let report = match scenario.run(strategy) {
        Ok(report) => report,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                error!("{}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("{}", report.bright_green());
    }
    ExitCode::SUCCESS
}
