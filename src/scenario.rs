//! An attacker and a defender exchange shots.
//!
//! Every turn has an attacker and a defender move, so a game of `turns`
//! turns with `bullets` shots per move is a tree of depth `2 * turns` and
//! branching factor `bullets`. Leafs hold the damage dealt to the defender.

use std::fmt;

use log::info;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::search::{SearchError, Strategy};
use crate::tree::{GameTree, TreeError, TreeShape};

/// Upper limit for generated leafs.
pub const MAX_LEAVES: usize = 1 << 24;

/// Upper limit for the tree depth, the search recurses once per level.
pub const MAX_DEPTH: u32 = 64;

/// Range of the randomly chosen initial hp if none is given.
pub const DEFAULT_HP: (i64, i64) = (50, 100);

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("number of turns must be positive")]
    InvalidTurns,
    #[error("number of bullets must be positive")]
    InvalidBullets,
    #[error("invalid damage range {low}..={high}")]
    InvalidDamageRange { low: i64, high: i64 },
    #[error("{0} leafs exceed the limit of {}", MAX_LEAVES)]
    TooManyLeaves(usize),
    #[error("{0} turns exceed the depth limit of {}", MAX_DEPTH)]
    TooDeep(u32),
    #[error("remaining hp of {hp} - {damage} is out of range")]
    HpOutOfRange { hp: i64, damage: i64 },
    #[error(transparent)]
    Tree(#[from] TreeError),
    #[error(transparent)]
    Search(#[from] SearchError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Scenario {
    pub turns: u32,
    /// Zero selects a random value from [`DEFAULT_HP`].
    pub initial_hp: i64,
    pub bullets: u32,
    /// Inclusive range of the damage a single shot deals.
    pub damage: (i64, i64),
    pub seed: Option<u64>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            turns: 1,
            initial_hp: 0,
            bullets: 2,
            damage: (1, 10),
            seed: None,
        }
    }
}

impl Scenario {
    /// Tree depth, two moves per turn.
    pub fn depth(&self) -> Result<u32, ScenarioError> {
        self.turns
            .checked_mul(2)
            .filter(|&d| d <= MAX_DEPTH)
            .ok_or(ScenarioError::TooDeep(self.turns))
    }

    pub fn shape(&self) -> Result<TreeShape, ScenarioError> {
        if self.turns == 0 {
            return Err(ScenarioError::InvalidTurns);
        }
        if self.bullets == 0 {
            return Err(ScenarioError::InvalidBullets);
        }
        let (low, high) = self.damage;
        if low > high {
            return Err(ScenarioError::InvalidDamageRange { low, high });
        }

        let shape = TreeShape::new(self.depth()? as i64, self.bullets as i64)?;
        if shape.leaves() > MAX_LEAVES {
            return Err(ScenarioError::TooManyLeaves(shape.leaves()));
        }
        Ok(shape)
    }

    /// Generate the damage values, build the tree and search it.
    pub fn run(&self, strategy: Strategy) -> Result<Report, ScenarioError> {
        let shape = self.shape()?;
        let mut rng = match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };

        let initial_hp = if self.initial_hp == 0 {
            rng.gen_range(DEFAULT_HP.0..=DEFAULT_HP.1)
        } else {
            self.initial_hp
        };

        let (low, high) = self.damage;
        let terminals: Vec<i64> = (0..shape.leaves())
            .map(|_| rng.gen_range(low..=high))
            .collect();

        let mut tree = GameTree::build(shape, &terminals)?;
        info!("{}", tree);
        let result = strategy.evaluate(&mut tree, shape.depth())?;

        let remaining_hp = initial_hp.checked_sub(result.value).ok_or(ScenarioError::HpOutOfRange {
            hp: initial_hp,
            damage: result.value,
        })?;

        Ok(Report {
            strategy,
            depth: shape.depth(),
            branches: shape.branches(),
            terminals,
            initial_hp,
            optimal: result.value,
            remaining_hp,
            comparisons: result.visited,
            principal_variation: result.line,
        })
    }
}

/// Outcome of a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub strategy: Strategy,
    pub depth: u32,
    pub branches: usize,
    pub terminals: Vec<i64>,
    pub initial_hp: i64,
    /// Damage under optimal play of both sides.
    pub optimal: i64,
    pub remaining_hp: i64,
    /// Leafs that were compared by the search.
    pub comparisons: usize,
    /// Bullet chosen at each move along the optimal line.
    pub principal_variation: Vec<usize>,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Depth and branches ratio: {}:{}", self.depth, self.branches)?;
        write!(f, "Terminal states (leaf node values):")?;
        for (i, t) in self.terminals.iter().enumerate() {
            write!(f, "{}{}", if i == 0 { " " } else { ", " }, t)?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "Remaining hp of the defender after maximum damage by the attacker: {}",
            self.remaining_hp
        )?;
        let search = match self.strategy {
            Strategy::AlphaBeta => "after alpha-beta pruning",
            Strategy::Minimax => "with minimax",
        };
        write!(f, "Leaf node comparisons {}: {}", search, self.comparisons)
    }
}
