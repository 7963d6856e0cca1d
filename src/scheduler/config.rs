//! Search driver configuration.
//!
//! Every knob has a default matching the reference tuning; callers
//! override with the `with_*` builders or deserialize from any serde
//! format.
//!
//! # Usage
//!
//! ```
//! use u_timetable::scheduler::{AStarConfig, DedupPolicy, HillClimbingConfig};
//!
//! let hc = HillClimbingConfig::default().with_max_restarts(3).with_seed(7);
//! assert_eq!(hc.max_iterations, 1000);
//!
//! let astar = AStarConfig::default().with_dedup(DedupPolicy::Revisit);
//! assert_eq!(astar.stagnation_window, 25);
//! ```

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Default successor-batch disruption probability.
pub const DEFAULT_DISRUPTION_PROBABILITY: f64 = 0.1;

/// Default pool used to diversify the first move of each restart.
pub const DEFAULT_SEED_POOL: [u64; 10] = [
    42, 69, 420, 666, 1337, 9001, 80085, 8008135, 80081355, 800813555,
];

/// Builds the driver RNG: seeded when `seed` is set, from OS entropy otherwise.
pub(crate) fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => SmallRng::from_os_rng(),
    }
}

/// Hill climbing parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HillClimbingConfig {
    /// Number of restarts from the initial state.
    pub max_restarts: usize,
    /// Step budget per restart.
    pub max_iterations: usize,
    /// Seeds drawn for the first move of each restart.
    pub seed_pool: Vec<u64>,
    /// Per-slot chance of collapsing a successor batch to one candidate.
    pub disruption_probability: f64,
    /// Driver RNG seed. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for HillClimbingConfig {
    fn default() -> Self {
        Self {
            max_restarts: 10,
            max_iterations: 1000,
            seed_pool: DEFAULT_SEED_POOL.to_vec(),
            disruption_probability: DEFAULT_DISRUPTION_PROBABILITY,
            seed: None,
        }
    }
}

impl HillClimbingConfig {
    pub fn with_max_restarts(mut self, max_restarts: usize) -> Self {
        self.max_restarts = max_restarts;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_seed_pool(mut self, seed_pool: Vec<u64>) -> Self {
        self.seed_pool = seed_pool;
        self
    }

    /// Sets the disruption probability, clamped to `[0, 1]`.
    pub fn with_disruption_probability(mut self, p: f64) -> Self {
        self.disruption_probability = p.clamp(0.0, 1.0);
        self
    }

    /// Fixes the driver RNG seed for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// How A* treats a grid that has already been expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DedupPolicy {
    /// Never expand the same grid twice, and never enqueue a child whose
    /// grid was already expanded. Forced backtracks are exempt.
    #[default]
    Strict,
    /// Record expanded grids but let them be expanded again.
    Revisit,
}

/// A* parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AStarConfig {
    /// Pops without improvement before resuming from the best state.
    /// `0` disables backtracking.
    pub stagnation_window: usize,
    /// Per-slot chance of collapsing a successor batch to one candidate.
    pub disruption_probability: f64,
    /// Closed-set behavior.
    pub dedup: DedupPolicy,
    /// Stop after this many expansions. `None` runs until the frontier empties.
    pub max_expansions: Option<usize>,
    /// Driver RNG seed. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for AStarConfig {
    fn default() -> Self {
        Self {
            stagnation_window: 25,
            disruption_probability: DEFAULT_DISRUPTION_PROBABILITY,
            dedup: DedupPolicy::Strict,
            max_expansions: None,
            seed: None,
        }
    }
}

impl AStarConfig {
    pub fn with_stagnation_window(mut self, window: usize) -> Self {
        self.stagnation_window = window;
        self
    }

    /// Sets the disruption probability, clamped to `[0, 1]`.
    pub fn with_disruption_probability(mut self, p: f64) -> Self {
        self.disruption_probability = p.clamp(0.0, 1.0);
        self
    }

    pub fn with_dedup(mut self, dedup: DedupPolicy) -> Self {
        self.dedup = dedup;
        self
    }

    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = Some(max_expansions);
        self
    }

    /// Fixes the driver RNG seed for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
