//! Timetabling domain models.
//!
//! Provides the static problem description (days, intervals, rooms,
//! professors, activities, preferences) and the assignment grid the
//! searches fill in.
//!
//! # Domain Mappings
//!
//! | u-timetable | University | Training center | Clinic |
//! |-------------|------------|-----------------|--------|
//! | Activity | Course | Workshop | Procedure |
//! | Room | Lecture hall | Classroom | Exam room |
//! | Professor | Lecturer | Trainer | Physician |
//! | Grid | Timetable | Course plan | Shift plan |

mod activity;
mod calendar;
mod constraint;
mod problem;
mod resource;
mod schedule;

pub use activity::Activity;
pub use calendar::Interval;
pub use constraint::{
    count_pause_violations, Preference, PreferenceParseError, DAY_START_HOUR,
    DAY_VIOLATION_WEIGHT, INTERVAL_VIOLATION_WEIGHT,
};
pub use problem::{TimetableProblem, DEFAULT_MAX_PROFESSOR_LOAD};
pub use resource::{Professor, Room};
pub use schedule::{Grid, Placement, Proposal, ScheduledClass, Slot};
