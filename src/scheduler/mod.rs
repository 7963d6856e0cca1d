//! Timetable search: state model, search drivers and KPI evaluation.
//!
//! # Components
//!
//! - [`ConstraintManager`]: immutable problem view with memoized lookups
//! - [`SearchState`]: partial timetable, successor generation, costs
//! - [`HillClimbing`] / [`RandomRestartHillClimbing`]: local search on
//!   [`SearchState::eval_node`]
//! - [`AStarSearch`]: best-first search on [`SearchState::total_cost`]
//! - [`TimetableKpi`]: quality metrics for a finished timetable
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use u_timetable::models::{Activity, Professor, Room, TimetableProblem};
//! use u_timetable::scheduler::{AStarConfig, AStarSearch, ConstraintManager, SearchState};
//!
//! let problem = TimetableProblem::new()
//!     .with_day("Monday")
//!     .with_interval(8, 10)
//!     .with_room(Room::new("EC105", 30).with_activity("IA"))
//!     .with_professor(Professor::new("Andrei").with_activity("IA"))
//!     .with_activity(Activity::new("IA", 30));
//!
//! let constraints = Arc::new(ConstraintManager::new(problem).unwrap());
//! let initial = SearchState::new(constraints);
//! let outcome = AStarSearch::new(AStarConfig::default().with_seed(1)).search(&initial);
//! assert!(outcome.is_solved());
//! ```
//!
//! # References
//!
//! - Russell & Norvig (2021), "Artificial Intelligence: A Modern Approach", Ch. 3-4
//! - Schaerf (1999), "A Survey of Automated Timetabling"

mod astar;
mod config;
mod hill_climbing;
mod kpi;
mod manager;
mod state;

pub use astar::{AStarOutcome, AStarSearch, AStarStats};
pub use config::{
    AStarConfig, DedupPolicy, HillClimbingConfig, DEFAULT_DISRUPTION_PROBABILITY,
    DEFAULT_SEED_POOL,
};
pub use hill_climbing::{HillClimbing, HillClimbingOutcome, RandomRestartHillClimbing};
pub use kpi::TimetableKpi;
pub use manager::ConstraintManager;
pub use state::{
    SearchState, PAUSE_COST, PREFERENCE_COST, REMAINING_SQUARED_WEIGHT, STEP_COST, STUDENT_COST,
};
