//! Hill climbing drivers.
//!
//! # Algorithm
//!
//! [`HillClimbing`] is a single steepest-descent run on
//! [`SearchState::eval_node`]: every step moves to the cheapest successor
//! until none remain or the step budget runs out.
//!
//! [`RandomRestartHillClimbing`] repeats the descent from the initial
//! state. The first move of each restart is randomized: a seed drawn from
//! a fixed pool shuffles the successors (and the pool itself) and the
//! first successor is taken. Later moves are steepest-descent. A move is
//! accepted only if it does not increase the number of unseated students;
//! otherwise the restart ends.
//!
//! Across restarts the lowest `eval_node` wins (earlier restart on ties),
//! and the run stops as soon as a restart seats every student.
//!
//! # Complexity
//! Each step costs O(slots × activities × professors) successor checks.

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};

use super::config::make_rng;
use super::{HillClimbingConfig, SearchState};

/// Result of a hill climbing run.
#[derive(Debug, Clone)]
pub struct HillClimbingOutcome {
    /// Best state found, or the initial state if no restart ran.
    pub best: SearchState,
    /// Steps taken across all restarts.
    pub iterations: usize,
    /// Restarts performed. A plain run counts as one.
    pub restarts: usize,
}

/// Single-run steepest descent.
///
/// Uses `max_iterations`, `disruption_probability` and `seed` from the
/// config; restart settings are ignored.
#[derive(Debug, Clone, Default)]
pub struct HillClimbing {
    config: HillClimbingConfig,
}

impl HillClimbing {
    pub fn new(config: HillClimbingConfig) -> Self {
        Self { config }
    }

    pub fn run(&self, initial: &SearchState) -> HillClimbingOutcome {
        let mut rng = make_rng(self.config.seed);
        let mut current = initial.clone();
        let mut iterations = 0;

        while iterations < self.config.max_iterations {
            iterations += 1;
            let neighbors = current.get_next_states(&mut rng, self.config.disruption_probability);
            let Some(best) = steepest(neighbors) else {
                break;
            };
            current = best;
            current.commit();
        }

        info!(
            "hill climbing finished after {iterations} iterations, {} students unseated",
            current.remaining_students()
        );
        HillClimbingOutcome {
            best: current,
            iterations,
            restarts: 1,
        }
    }
}

/// Hill climbing with randomized restarts.
#[derive(Debug, Clone, Default)]
pub struct RandomRestartHillClimbing {
    config: HillClimbingConfig,
}

impl RandomRestartHillClimbing {
    pub fn new(config: HillClimbingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HillClimbingConfig {
        &self.config
    }

    /// Runs every restart from `initial` and returns the best result.
    pub fn run(&self, initial: &SearchState) -> HillClimbingOutcome {
        let config = &self.config;
        let mut rng = make_rng(config.seed);
        let mut pool = config.seed_pool.clone();

        let mut best = initial.clone();
        let mut best_eval = None;
        let mut iterations = 0;
        let mut restarts = 0;

        info!(
            "hill climbing: {} restarts × {} iterations, {} students to seat",
            config.max_restarts,
            config.max_iterations,
            initial.remaining_students()
        );

        for restart in 0..config.max_restarts {
            restarts += 1;
            let mut current = initial.clone();
            let mut steps = 0;

            while steps < config.max_iterations {
                iterations += 1;
                steps += 1;

                let mut neighbors = current.get_next_states(&mut rng, config.disruption_probability);
                if neighbors.is_empty() {
                    break;
                }

                let candidate = if steps == 1 {
                    diversify(&mut neighbors, &mut pool, &mut rng);
                    neighbors.swap_remove(0)
                } else {
                    match steepest(neighbors) {
                        Some(s) => s,
                        None => break,
                    }
                };

                if !accepts(&current, &candidate) {
                    break;
                }
                current = candidate;
                current.commit();
            }

            let eval = current.eval_node();
            debug!(
                "restart {restart}: {steps} steps, {} unseated, eval {eval}",
                current.remaining_students()
            );

            let done = current.is_complete();
            if best_eval.map_or(true, |b| eval < b) {
                best_eval = Some(eval);
                best = current;
            }
            if done {
                break;
            }
        }

        info!(
            "hill climbing finished: {restarts} restarts, {iterations} iterations, {} unseated",
            best.remaining_students()
        );
        HillClimbingOutcome {
            best,
            iterations,
            restarts,
        }
    }
}

/// Cheapest successor by `eval_node`; the first one wins ties.
fn steepest(neighbors: Vec<SearchState>) -> Option<SearchState> {
    neighbors.into_iter().min_by_key(SearchState::eval_node)
}

/// A move may keep but never raise the unseated student count.
fn accepts(current: &SearchState, candidate: &SearchState) -> bool {
    candidate.remaining_students() <= current.remaining_students()
}

/// Shuffles `neighbors` and `pool` with a generator seeded from the pool.
fn diversify<R: Rng + ?Sized>(neighbors: &mut [SearchState], pool: &mut [u64], rng: &mut R) {
    match pool.choose(rng).copied() {
        Some(seed) => {
            let mut seeded = SmallRng::seed_from_u64(seed);
            neighbors.shuffle(&mut seeded);
            pool.shuffle(&mut seeded);
        }
        None => neighbors.shuffle(rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Proposal, Slot};
    use crate::scheduler::fixtures;
    use std::collections::HashSet;

    fn seeded(seed: u64) -> HillClimbingConfig {
        HillClimbingConfig::default().with_seed(seed)
    }

    #[test]
    fn test_single_slot_restarts() {
        let initial = fixtures::state(fixtures::single_slot());
        let outcome = RandomRestartHillClimbing::new(seeded(1)).run(&initial);

        assert_eq!(outcome.best.remaining_students(), 0);
        assert_eq!(outcome.best.grid().assignment_count(), 1);
        // One accepted step, then one step that finds no successors
        assert_eq!(outcome.iterations, 2);
        assert_eq!(outcome.restarts, 1);
    }

    #[test]
    fn test_single_slot_plain() {
        let initial = fixtures::state(fixtures::single_slot());
        let outcome = HillClimbing::new(seeded(1)).run(&initial);

        assert!(outcome.best.is_complete());
        assert_eq!(outcome.best.grid().assignment_count(), 1);
        assert!(outcome.best.pending().is_none());
    }

    #[test]
    fn test_accepts_never_worse() {
        let root = fixtures::state(fixtures::small_week());
        let mut better = root.choose_interval(Proposal::new(Slot::new(0, 0, 1), 1, 0));
        better.commit();

        assert!(accepts(&root, &better));
        assert!(accepts(&better, &better));
        assert!(!accepts(&better, &root));
    }

    #[test]
    fn test_result_never_worse_than_initial() {
        let initial = fixtures::state(fixtures::small_week());
        let outcome = RandomRestartHillClimbing::new(seeded(11)).run(&initial);

        assert!(outcome.best.remaining_students() < initial.remaining_students());
        assert!(outcome.restarts >= 1 && outcome.restarts <= 10);
        assert!(initial.grid().assignment_count() == 0);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let initial = fixtures::state(fixtures::small_week());
        let a = RandomRestartHillClimbing::new(seeded(1337)).run(&initial);
        let b = RandomRestartHillClimbing::new(seeded(1337)).run(&initial);

        assert_eq!(a.best, b.best);
        assert_eq!(a.iterations, b.iterations);
        assert_eq!(a.restarts, b.restarts);
    }

    #[test]
    fn test_zero_restarts_returns_initial() {
        let initial = fixtures::state(fixtures::small_week());
        let config = seeded(3).with_max_restarts(0);
        let outcome = RandomRestartHillClimbing::new(config).run(&initial);

        assert_eq!(outcome.best, initial);
        assert_eq!(outcome.iterations, 0);
        assert_eq!(outcome.restarts, 0);
    }

    #[test]
    fn test_iteration_budget() {
        let initial = fixtures::state(fixtures::small_week());
        let config = seeded(5).with_max_restarts(2).with_max_iterations(1);
        let outcome = RandomRestartHillClimbing::new(config).run(&initial);

        assert_eq!(outcome.iterations, 2);
        assert_eq!(outcome.best.grid().assignment_count(), 1);
    }

    #[test]
    fn test_empty_seed_pool_still_diversifies() {
        let initial = fixtures::state(fixtures::single_slot());
        let config = seeded(2).with_seed_pool(Vec::new());
        let outcome = RandomRestartHillClimbing::new(config).run(&initial);
        assert!(outcome.best.is_complete());
    }

    #[test]
    fn test_diversify_shuffles_pool_deterministically() {
        let initial = fixtures::state(fixtures::small_week());
        let mut rng = SmallRng::seed_from_u64(8);
        let mut neighbors = initial.get_next_states(&mut rng, 0.0);
        let before: HashSet<_> = neighbors.iter().map(|s| *s.pending().unwrap()).collect();

        let mut pool = vec![1, 2, 3, 4, 5];
        diversify(&mut neighbors, &mut pool, &mut SmallRng::seed_from_u64(8));
        let after: HashSet<_> = neighbors.iter().map(|s| *s.pending().unwrap()).collect();

        assert_eq!(before, after);
        let mut sorted = pool.clone();
        sorted.sort();
        assert_eq!(sorted, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_hard_constraints_hold_in_result() {
        let _ = env_logger::builder().is_test(true).try_init();
        let initial = fixtures::state(fixtures::small_week());
        let outcome = RandomRestartHillClimbing::new(seeded(42)).run(&initial);
        let grid = outcome.best.grid();

        for day in 0..grid.days() {
            for interval in 0..grid.intervals() {
                let here: Vec<_> = grid.placements_at(day, interval).collect();
                let professors: HashSet<_> = here.iter().map(|p| p.professor).collect();
                let activities: HashSet<_> = here.iter().map(|p| p.activity).collect();
                assert_eq!(professors.len(), here.len());
                assert_eq!(activities.len(), here.len());
            }
        }
    }
}
