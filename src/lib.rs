//! Alpha-beta pruned game trees for an attacker/defender shootout.

use env_logger::fmt::Formatter;
use owo_colors::{AnsiColors, OwoColorize};
use std::io::Write;

pub mod scenario;
pub mod search;
pub mod tree;

pub use scenario::{Report, Scenario, ScenarioError};
pub use search::{AlphaBeta, Comparable, Evaluation, Minimax, SearchError, Strategy};
pub use tree::{GameTree, Node, NodeId, TreeError, TreeShape};

/// Initialize the colored logger, `RUST_LOG` overrides the `info` default.
///
/// Records are printed as `LEVEL target: message`, only the level tag is colored.
pub fn logging() {
    let env = env_logger::Env::default().default_filter_or("info");
    let _ = env_logger::Builder::from_env(env)
        .is_test(cfg!(test))
        .format(|buf: &mut Formatter, record: &log::Record| {
            let level = format!("{:5}", record.level());
            writeln!(
                buf,
                "{} {}: {}",
                level.color(level_color(record.level())),
                record.target().dimmed(),
                record.args()
            )
        })
        .try_init();
}

fn level_color(level: log::Level) -> AnsiColors {
    match level {
        log::Level::Error => AnsiColors::BrightRed,
        log::Level::Warn => AnsiColors::BrightYellow,
        log::Level::Info => AnsiColors::Green,
        log::Level::Debug => AnsiColors::Blue,
        log::Level::Trace => AnsiColors::BrightBlack,
    }
}
