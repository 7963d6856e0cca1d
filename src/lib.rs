//! University timetabling search core.
//!
//! Assigns (professor, activity) pairs to (day, interval, room) slots so
//! that as many students as possible get a seat, subject to hard
//! feasibility rules, while keeping professors' soft preferences.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Activity`, `Room`, `Professor`,
//!   `Preference`, `Interval`, `TimetableProblem`, `Grid`, `Proposal`
//! - **`validation`**: Input integrity checks (duplicate IDs, unknown
//!   activities, malformed intervals)
//! - **`scheduler`**: `ConstraintManager`, `SearchState`, hill climbing,
//!   A* and KPIs
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use u_timetable::models::{Activity, Professor, Room, TimetableProblem};
//! use u_timetable::scheduler::{
//!     ConstraintManager, HillClimbingConfig, RandomRestartHillClimbing, SearchState,
//!     TimetableKpi,
//! };
//!
//! let problem = TimetableProblem::new()
//!     .with_day("Monday")
//!     .with_day("Tuesday")
//!     .with_interval(8, 10)
//!     .with_interval(10, 12)
//!     .with_room(Room::new("EC105", 30).with_activity("IA"))
//!     .with_room(Room::new("EG324", 60).with_activity("IA").with_activity("PCOM"))
//!     .with_professor(
//!         Professor::new("Andrei")
//!             .with_activity("IA")
//!             .with_raw_preference("!Tuesday")
//!             .unwrap(),
//!     )
//!     .with_professor(Professor::new("Maria").with_activity("PCOM"))
//!     .with_activity(Activity::new("IA", 90))
//!     .with_activity(Activity::new("PCOM", 60));
//!
//! let constraints = Arc::new(ConstraintManager::new(problem).unwrap());
//! let initial = SearchState::new(constraints);
//!
//! let config = HillClimbingConfig::default().with_seed(42);
//! let outcome = RandomRestartHillClimbing::new(config).run(&initial);
//!
//! let kpi = TimetableKpi::calculate(&outcome.best);
//! assert!(kpi.students_seated > 0);
//! for class in outcome.best.scheduled_classes() {
//!     println!("{} {} {} {} {}", class.day, class.interval, class.room, class.professor, class.activity);
//! }
//! ```
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Russell & Norvig (2021), "Artificial Intelligence: A Modern Approach"

pub mod models;
pub mod scheduler;
pub mod validation;
