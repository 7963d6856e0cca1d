//! A* search with closed-set deduplication and stagnation backtracking.
//!
//! # Algorithm
//!
//! Best-first over [`SearchState::priority`] (total cost, then unseated
//! students, then insertion order). Each pop:
//!
//! 1. returns the state if every student is seated;
//! 2. records it as the best state if it seats more students than any before;
//! 3. after `stagnation_window` pops without improvement, swaps it for the
//!    best state and expands that instead (a *backtrack*);
//! 4. expands it: every successor is committed and pushed.
//!
//! The closed set holds expanded grids. Under [`DedupPolicy::Strict`] a grid
//! is expanded at most once (backtracks excepted) and children whose grid is
//! already closed are never enqueued.
//!
//! # Reference
//! Hart, Nilsson & Raphael (1968), "A Formal Basis for the Heuristic
//! Determination of Minimum Cost Paths"

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use log::{debug, info, trace};

use super::config::make_rng;
use super::{AStarConfig, DedupPolicy, SearchState};
use crate::models::Grid;

/// Counters collected during a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AStarStats {
    /// States popped from the frontier.
    pub explored: usize,
    /// Successors generated.
    pub generated: usize,
    /// States whose successors were generated.
    pub states_expanded: usize,
    /// Pops and children dropped because their grid was already expanded.
    pub duplicates_skipped: usize,
    /// Stagnation backtracks performed.
    pub backtracks: usize,
}

/// Result of an A* run.
#[derive(Debug, Clone)]
pub struct AStarOutcome {
    /// A state with every student seated, if one was reached.
    pub solution: Option<SearchState>,
    /// The state with the fewest unseated students seen.
    pub best: SearchState,
    pub stats: AStarStats,
}

impl AStarOutcome {
    pub fn is_solved(&self) -> bool {
        self.solution.is_some()
    }
}

struct Frontier {
    cost: u64,
    remaining: u64,
    seq: u64,
    state: SearchState,
}

impl Frontier {
    fn new(state: SearchState, seq: u64) -> Self {
        let (cost, remaining) = state.priority();
        Self {
            cost,
            remaining,
            seq,
            state,
        }
    }
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Reversed so BinaryHeap pops the cheapest, oldest entry first.
impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.remaining.cmp(&self.remaining))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// A* driver.
#[derive(Debug, Clone, Default)]
pub struct AStarSearch {
    config: AStarConfig,
}

impl AStarSearch {
    pub fn new(config: AStarConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AStarConfig {
        &self.config
    }

    /// Searches from `initial` until a complete state is popped, the
    /// frontier empties, or the expansion budget runs out.
    ///
    /// Exhaustion is not an error: the outcome carries the best state seen.
    pub fn search(&self, initial: &SearchState) -> AStarOutcome {
        let config = &self.config;
        let strict = config.dedup == DedupPolicy::Strict;
        let mut rng = make_rng(config.seed);
        let mut stats = AStarStats::default();

        let mut root = initial.clone();
        root.commit();

        let mut seq = 0u64;
        let mut open = BinaryHeap::new();
        open.push(Frontier::new(root.clone(), seq));
        let mut closed: HashSet<Grid> = HashSet::new();

        let mut best = root;
        let mut best_remaining: Option<u64> = None;
        let mut stagnation = 0usize;

        info!(
            "A*: {} students to seat, stagnation window {}",
            initial.remaining_students(),
            config.stagnation_window
        );

        while let Some(Frontier {
            cost,
            remaining,
            state,
            ..
        }) = open.pop()
        {
            stats.explored += 1;
            trace!("pop #{}: cost {cost}, {remaining} unseated", stats.explored);

            if remaining == 0 {
                info!(
                    "A* solved after {} pops, {} expansions",
                    stats.explored, stats.states_expanded
                );
                return AStarOutcome {
                    solution: Some(state.clone()),
                    best: state,
                    stats,
                };
            }

            if best_remaining.map_or(true, |b| remaining < b) {
                best_remaining = Some(remaining);
                best = state.clone();
                stagnation = 0;
            } else {
                stagnation += 1;
            }

            let mut current = state;
            let mut forced = false;
            if config.stagnation_window > 0 && stagnation >= config.stagnation_window {
                debug!(
                    "stagnated for {stagnation} pops, resuming from best ({} unseated)",
                    best.remaining_students()
                );
                current = best.clone();
                stagnation = 0;
                stats.backtracks += 1;
                forced = true;
            }

            if strict && !forced && closed.contains(current.grid()) {
                stats.duplicates_skipped += 1;
                continue;
            }

            if config
                .max_expansions
                .is_some_and(|max| stats.states_expanded >= max)
            {
                debug!("expansion budget of {} reached", stats.states_expanded);
                break;
            }

            closed.insert(current.grid().clone());
            stats.states_expanded += 1;

            for mut child in current.get_next_states(&mut rng, config.disruption_probability) {
                stats.generated += 1;
                child.commit();
                if strict && closed.contains(child.grid()) {
                    stats.duplicates_skipped += 1;
                    continue;
                }
                seq += 1;
                open.push(Frontier::new(child, seq));
            }
        }

        info!(
            "A* exhausted after {} pops, best leaves {} unseated",
            stats.explored,
            best.remaining_students()
        );
        AStarOutcome {
            solution: None,
            best,
            stats,
        }
    }
}
