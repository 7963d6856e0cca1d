//! Timetabling problem description.
//!
//! The static facts produced by an external loader: teaching days,
//! intervals, rooms, professors and the activities to seat. Nothing
//! here changes once a search starts.

use serde::{Deserialize, Serialize};

use super::{Activity, Interval, Professor, Room};

/// Default cap on the number of sessions a single professor may teach.
pub const DEFAULT_MAX_PROFESSOR_LOAD: u32 = 6;

fn default_max_professor_load() -> u32 {
    DEFAULT_MAX_PROFESSOR_LOAD
}

/// Input container for timetabling.
///
/// Every day offers every interval in every room; the grid shape is
/// `days × intervals × rooms`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableProblem {
    /// Teaching days, in week order.
    pub days: Vec<String>,
    /// Teaching intervals, in chronological order.
    pub intervals: Vec<Interval>,
    /// Available rooms.
    pub rooms: Vec<Room>,
    /// Available professors.
    pub professors: Vec<Professor>,
    /// Activities with their initial student counts.
    pub activities: Vec<Activity>,
    /// Maximum number of sessions per professor.
    #[serde(default = "default_max_professor_load")]
    pub max_professor_load: u32,
}

impl TimetableProblem {
    /// Creates an empty problem.
    pub fn new() -> Self {
        Self {
            days: Vec::new(),
            intervals: Vec::new(),
            rooms: Vec::new(),
            professors: Vec::new(),
            activities: Vec::new(),
            max_professor_load: DEFAULT_MAX_PROFESSOR_LOAD,
        }
    }

    /// Adds a teaching day.
    pub fn with_day(mut self, day: impl Into<String>) -> Self {
        self.days.push(day.into());
        self
    }

    /// Adds a teaching interval.
    pub fn with_interval(mut self, start: u32, end: u32) -> Self {
        self.intervals.push(Interval::new(start, end));
        self
    }

    /// Adds a room.
    pub fn with_room(mut self, room: Room) -> Self {
        self.rooms.push(room);
        self
    }

    /// Adds a professor.
    pub fn with_professor(mut self, professor: Professor) -> Self {
        self.professors.push(professor);
        self
    }

    /// Adds an activity.
    pub fn with_activity(mut self, activity: Activity) -> Self {
        self.activities.push(activity);
        self
    }

    /// Sets the per-professor session cap.
    pub fn with_max_professor_load(mut self, max_load: u32) -> Self {
        self.max_professor_load = max_load;
        self
    }

    /// Sum of initial student counts across all activities.
    pub fn total_students(&self) -> u64 {
        self.activities.iter().map(|a| u64::from(a.students)).sum()
    }

    /// Number of (day, interval, room) slots in the grid.
    pub fn slot_count(&self) -> usize {
        self.days.len() * self.intervals.len() * self.rooms.len()
    }
}

impl Default for TimetableProblem {
    fn default() -> Self {
        Self::new()
    }
}
