//! Shared, read-only view over a timetabling problem.
//!
//! Every search state holds an `Arc<ConstraintManager>`. Names are
//! resolved to positions once, at construction; afterwards all queries
//! work on indices and cannot fail.
//!
//! The per-key lookups (rooms accepting an activity, activities a room
//! accepts, professors teaching an activity) are computed on first use
//! and cached for the lifetime of the manager.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::models::{Activity, Interval, Professor, Room, TimetableProblem};
use crate::validation::{validate_problem, ValidationError};

/// Read-only problem snapshot with memoized derived queries.
#[derive(Debug)]
pub struct ConstraintManager {
    problem: TimetableProblem,
    activity_index: HashMap<String, usize>,
    room_index: HashMap<String, usize>,
    professor_index: HashMap<String, usize>,
    day_index: HashMap<String, usize>,
    total_students: u64,
    rooms_accepting: Vec<OnceLock<Vec<usize>>>,
    activities_accepted: Vec<OnceLock<Vec<usize>>>,
    professors_accepting: Vec<OnceLock<Vec<usize>>>,
}

impl ConstraintManager {
    /// Validates `problem` and builds the manager.
    ///
    /// # Returns
    /// All validation errors if the problem is malformed.
    pub fn new(problem: TimetableProblem) -> Result<Self, Vec<ValidationError>> {
        validate_problem(&problem)?;

        let activity_index = index_of(problem.activities.iter().map(|a| &a.id));
        let room_index = index_of(problem.rooms.iter().map(|r| &r.id));
        let professor_index = index_of(problem.professors.iter().map(|p| &p.id));
        let day_index = index_of(problem.days.iter());

        let activities = problem.activities.len();
        let rooms = problem.rooms.len();

        Ok(Self {
            total_students: problem.total_students(),
            rooms_accepting: (0..activities).map(|_| OnceLock::new()).collect(),
            activities_accepted: (0..rooms).map(|_| OnceLock::new()).collect(),
            professors_accepting: (0..activities).map(|_| OnceLock::new()).collect(),
            problem,
            activity_index,
            room_index,
            professor_index,
            day_index,
        })
    }

    /// The underlying problem description.
    pub fn problem(&self) -> &TimetableProblem {
        &self.problem
    }

    /// Sum of initial student counts.
    pub fn total_students(&self) -> u64 {
        self.total_students
    }

    /// Per-professor session cap.
    pub fn max_professor_load(&self) -> u32 {
        self.problem.max_professor_load
    }

    pub fn day_count(&self) -> usize {
        self.problem.days.len()
    }

    pub fn interval_count(&self) -> usize {
        self.problem.intervals.len()
    }

    pub fn room_count(&self) -> usize {
        self.problem.rooms.len()
    }

    pub fn professor_count(&self) -> usize {
        self.problem.professors.len()
    }

    pub fn activity_count(&self) -> usize {
        self.problem.activities.len()
    }

    /// Day name at `day`.
    pub fn day(&self, day: usize) -> &str {
        &self.problem.days[day]
    }

    /// Interval at `interval`.
    pub fn interval(&self, interval: usize) -> Interval {
        self.problem.intervals[interval]
    }

    pub fn room(&self, room: usize) -> &Room {
        &self.problem.rooms[room]
    }

    pub fn professor(&self, professor: usize) -> &Professor {
        &self.problem.professors[professor]
    }

    pub fn activity(&self, activity: usize) -> &Activity {
        &self.problem.activities[activity]
    }

    pub fn day_index(&self, name: &str) -> Option<usize> {
        self.day_index.get(name).copied()
    }

    pub fn room_index(&self, id: &str) -> Option<usize> {
        self.room_index.get(id).copied()
    }

    pub fn professor_index(&self, id: &str) -> Option<usize> {
        self.professor_index.get(id).copied()
    }

    pub fn activity_index(&self, id: &str) -> Option<usize> {
        self.activity_index.get(id).copied()
    }

    /// Rooms that may host `activity`, in problem order.
    pub fn rooms_accepting(&self, activity: usize) -> &[usize] {
        self.rooms_accepting[activity].get_or_init(|| {
            let id = &self.problem.activities[activity].id;
            self.problem
                .rooms
                .iter()
                .enumerate()
                .filter(|(_, r)| r.accepts(id))
                .map(|(i, _)| i)
                .collect()
        })
    }

    /// Activities `room` may host, in the room's own listing order.
    pub fn activities_accepted(&self, room: usize) -> &[usize] {
        self.activities_accepted[room].get_or_init(|| {
            self.problem.rooms[room]
                .activities
                .iter()
                .filter_map(|a| self.activity_index(a))
                .collect()
        })
    }

    /// Professors who may teach `activity`, in ascending index order.
    pub fn professors_accepting(&self, activity: usize) -> &[usize] {
        self.professors_accepting[activity].get_or_init(|| {
            let id = &self.problem.activities[activity].id;
            self.problem
                .professors
                .iter()
                .enumerate()
                .filter(|(_, p)| p.teaches(id))
                .map(|(i, _)| i)
                .collect()
        })
    }

    /// Whether `professor` may teach `activity`.
    pub fn teaches(&self, professor: usize, activity: usize) -> bool {
        self.professors_accepting(activity)
            .binary_search(&professor)
            .is_ok()
    }

    /// Number of rooms accepting `activity` (its scarcity).
    pub fn rooms_accepting_count(&self, activity: usize) -> usize {
        self.rooms_accepting(activity).len()
    }

    /// Number of activities `room` accepts.
    pub fn accepted_activity_count(&self, room: usize) -> usize {
        self.activities_accepted(room).len()
    }

    /// Number of professors who may teach `activity`.
    pub fn professors_accepting_count(&self, activity: usize) -> usize {
        self.professors_accepting(activity).len()
    }
}

fn index_of<'a>(ids: impl Iterator<Item = &'a String>) -> HashMap<String, usize> {
    ids.enumerate().map(|(i, id)| (id.clone(), i)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    fn sample_manager() -> ConstraintManager {
        let problem = TimetableProblem::new()
            .with_day("Monday")
            .with_interval(8, 10)
            .with_room(Room::new("EC105", 30).with_activity("PCOM").with_activity("IA"))
            .with_room(Room::new("EG324", 60).with_activity("IA"))
            .with_professor(Professor::new("Andrei").with_activity("IA"))
            .with_professor(Professor::new("Maria").with_activity("PCOM").with_activity("IA"))
            .with_activity(Activity::new("IA", 90))
            .with_activity(Activity::new("PCOM", 30));
        ConstraintManager::new(problem).unwrap()
    }

    #[test]
    fn test_index_lookup() {
        let m = sample_manager();
        assert_eq!(m.activity_index("PCOM"), Some(1));
        assert_eq!(m.room_index("EG324"), Some(1));
        assert_eq!(m.professor_index("Maria"), Some(1));
        assert_eq!(m.day_index("Monday"), Some(0));
        assert_eq!(m.activity_index("SO"), None);
        assert_eq!(m.total_students(), 120);
    }

    #[test]
    fn test_rooms_accepting() {
        let m = sample_manager();
        assert_eq!(m.rooms_accepting(0), &[0, 1]); // IA
        assert_eq!(m.rooms_accepting(1), &[0]); // PCOM
        assert_eq!(m.rooms_accepting_count(1), 1);
    }

    #[test]
    fn test_activities_accepted_keeps_room_order() {
        let m = sample_manager();
        assert_eq!(m.activities_accepted(0), &[1, 0]); // PCOM, IA
        assert_eq!(m.accepted_activity_count(1), 1);
    }

    #[test]
    fn test_professors_accepting() {
        let m = sample_manager();
        assert_eq!(m.professors_accepting(0), &[0, 1]);
        assert_eq!(m.professors_accepting(1), &[1]);
        assert!(m.teaches(1, 1));
        assert!(!m.teaches(0, 1));
        assert_eq!(m.professors_accepting_count(0), 2);
    }

    #[test]
    fn test_memoized_lookup_is_stable() {
        let m = sample_manager();
        let first = m.rooms_accepting(0).as_ptr();
        let second = m.rooms_accepting(0).as_ptr();
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_problem_rejected() {
        let problem = TimetableProblem::new()
            .with_day("Monday")
            .with_room(Room::new("R", 10).with_activity("missing"));
        let errors = ConstraintManager::new(problem).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::UnknownActivity));
    }
}
