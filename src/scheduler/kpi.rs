//! Timetable quality metrics (KPIs).
//!
//! Summarizes a search result for reporting and regression checks.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Assignments | Occupied (day, interval, room) slots |
//! | Seated Rate | Seated students / initial students |
//! | Preference Violations | Blocked-day (3) and blocked-interval (1) units |
//! | Pause Violations | Same-day gaps above a professor's limit |
//! | Slot Utilization | Assignments / slots |
//! | Load by Professor | Sessions per professor |

use std::collections::HashMap;

use super::SearchState;

/// Timetable performance indicators.
#[derive(Debug, Clone)]
pub struct TimetableKpi {
    /// Number of committed class sessions.
    pub assignments: usize,
    /// Students across all activities before the search.
    pub students_total: u64,
    /// Students with a seat.
    pub students_seated: u64,
    /// Students still without a seat.
    pub students_remaining: u64,
    /// Fraction of students seated (0.0..1.0).
    pub seated_rate: f64,
    /// Soft preference violation units.
    pub preference_violations: u64,
    /// Pause violations.
    pub pause_violations: u64,
    /// Fraction of grid slots in use (0.0..1.0).
    pub slot_utilization: f64,
    /// Sessions per professor ID.
    pub load_by_professor: HashMap<String, u32>,
}

impl TimetableKpi {
    /// Computes KPIs from a search result.
    ///
    /// A pending assignment is counted as if committed.
    pub fn calculate(state: &SearchState) -> Self {
        let mut state = state.clone();
        state.commit();

        let constraints = state.constraints();
        let students_total = constraints.total_students();
        let students_remaining = state.remaining_students();
        let students_seated = students_total.saturating_sub(students_remaining);
        let assignments = state.grid().assignment_count();
        let slots = state.grid().slot_count();
        let (preference_violations, pause_violations) = state.soft_violations();

        let load_by_professor = (0..constraints.professor_count())
            .map(|p| (constraints.professor(p).id.clone(), state.professor_load(p)))
            .collect();

        let seated_rate = if students_total == 0 {
            1.0
        } else {
            students_seated as f64 / students_total as f64
        };

        let slot_utilization = if slots == 0 {
            0.0
        } else {
            assignments as f64 / slots as f64
        };

        Self {
            assignments,
            students_total,
            students_seated,
            students_remaining,
            seated_rate,
            preference_violations,
            pause_violations,
            slot_utilization,
            load_by_professor,
        }
    }

    /// Whether the timetable meets the given quality thresholds.
    pub fn meets_thresholds(&self, min_seated_rate: f64, max_preference_violations: u64) -> bool {
        self.seated_rate >= min_seated_rate
            && self.preference_violations <= max_preference_violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Proposal, Slot};
    use crate::scheduler::fixtures;

    #[test]
    fn test_kpi_empty() {
        let state = fixtures::state(fixtures::small_week());
        let kpi = TimetableKpi::calculate(&state);

        assert_eq!(kpi.assignments, 0);
        assert_eq!(kpi.students_total, 150);
        assert_eq!(kpi.students_seated, 0);
        assert!((kpi.seated_rate - 0.0).abs() < 1e-10);
        assert!((kpi.slot_utilization - 0.0).abs() < 1e-10);
        assert_eq!(kpi.load_by_professor["P1"], 0);
    }

    #[test]
    fn test_kpi_partial() {
        let state = fixtures::state(fixtures::small_week())
            .choose_interval(Proposal::new(Slot::new(0, 0, 0), 0, 1))
            .choose_interval(Proposal::new(Slot::new(1, 0, 1), 0, 0));
        let kpi = TimetableKpi::calculate(&state);

        assert_eq!(kpi.assignments, 2);
        assert_eq!(kpi.students_seated, 90);
        assert_eq!(kpi.students_remaining, 60);
        assert!((kpi.seated_rate - 0.6).abs() < 1e-10);
        // 2 of 12 slots
        assert!((kpi.slot_utilization - 2.0 / 12.0).abs() < 1e-10);
        // P1 on Tuesday
        assert_eq!(kpi.preference_violations, 3);
        assert_eq!(kpi.load_by_professor["P1"], 2);
        assert_eq!(kpi.load_by_professor["P2"], 0);
    }

    #[test]
    fn test_meets_thresholds() {
        let state = fixtures::state(fixtures::single_slot())
            .choose_interval(Proposal::new(Slot::new(0, 0, 0), 0, 0));
        let kpi = TimetableKpi::calculate(&state);

        assert!(kpi.meets_thresholds(1.0, 0));
        assert!(!TimetableKpi::calculate(&fixtures::state(fixtures::single_slot()))
            .meets_thresholds(0.5, 0));
    }
}
