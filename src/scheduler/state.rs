//! Search state: a partial timetable plus the bookkeeping derived from it.
//!
//! # Lifecycle
//!
//! A state is built once from a [`ConstraintManager`], then branched with
//! [`SearchState::get_next_states`]. Each successor carries exactly one
//! *pending* [`Proposal`]: its counters already reflect the assignment,
//! but the grid does not. A driver calls [`SearchState::commit`] only on
//! the state it selects.
//!
//! # Sharing
//!
//! The grid and professor histories sit behind `Arc` and are written
//! through `Arc::make_mut`, so a clone never observes a later mutation
//! of its source (and vice versa). Siblings generated from the same
//! parent share storage until one of them commits.
//!
//! # Costs
//!
//! Two cost models are exposed:
//! - [`SearchState::eval_node`] for hill climbing (quadratic in unseated students)
//! - [`SearchState::g`] / [`SearchState::h`] for A*

use std::borrow::Cow;
use std::cmp::Reverse;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use rand::Rng;

use super::ConstraintManager;
use crate::models::{
    count_pause_violations, Grid, Interval, Preference, Proposal, ScheduledClass, Slot,
};
use crate::validation::{ValidationError, ValidationErrorKind};

/// Weight on squared unseated students in [`SearchState::eval_node`].
pub const REMAINING_SQUARED_WEIGHT: u64 = 50;

/// Cost of one assignment in [`SearchState::g`].
pub const STEP_COST: u64 = 4000;

/// Cost per unseated student in [`SearchState::h`].
pub const STUDENT_COST: u64 = 500;

/// Cost per preference violation unit in [`SearchState::h`].
pub const PREFERENCE_COST: u64 = 10_000;

/// Cost per pause violation in [`SearchState::h`].
pub const PAUSE_COST: u64 = 1000;

// eval_node soft weights: (preference, pause) before and after the late phase
const EARLY_SOFT_WEIGHTS: (u64, u64) = (100_000, 200);
const LATE_SOFT_WEIGHTS: (u64, u64) = (300_000, 1000);

// Late phase starts once fewer than 1/LATE_PHASE_DIVISOR of students remain.
const LATE_PHASE_DIVISOR: u64 = 5;

type History = Vec<(usize, Interval)>;

/// A node in the timetable search space.
#[derive(Clone)]
pub struct SearchState {
    constraints: Arc<ConstraintManager>,
    remaining: Vec<u32>,
    grid: Arc<Grid>,
    professor_load: Vec<u32>,
    pending: Option<Proposal>,
    history: Arc<Vec<History>>,
}

impl SearchState {
    /// Creates the root state: empty grid, every student unseated.
    pub fn new(constraints: Arc<ConstraintManager>) -> Self {
        let grid = Grid::empty(
            constraints.day_count(),
            constraints.interval_count(),
            constraints.room_count(),
        );
        let remaining = (0..constraints.activity_count())
            .map(|a| constraints.activity(a).students)
            .collect();
        let professors = constraints.professor_count();

        Self {
            remaining,
            grid: Arc::new(grid),
            professor_load: vec![0; professors],
            pending: None,
            history: Arc::new(vec![Vec::new(); professors]),
            constraints,
        }
    }

    /// Creates a state from a pre-filled grid.
    ///
    /// Every placement is replayed as if it had been chosen and committed,
    /// so counters and histories match the grid. Hard constraints are not
    /// re-checked.
    ///
    /// # Errors
    /// `InvalidGrid` if the grid shape or cell count differs from the
    /// problem, or a placement names an unknown professor or activity.
    pub fn with_grid(
        constraints: Arc<ConstraintManager>,
        grid: &Grid,
    ) -> Result<Self, ValidationError> {
        let expected = (
            constraints.day_count(),
            constraints.interval_count(),
            constraints.room_count(),
        );
        let actual = (grid.days(), grid.intervals(), grid.rooms());
        if expected != actual || grid.slot_count() != expected.0 * expected.1 * expected.2 {
            return Err(ValidationError::new(
                ValidationErrorKind::InvalidGrid,
                format!("Grid shape {actual:?} does not match problem shape {expected:?}"),
            ));
        }

        let mut state = Self::new(constraints);
        for (slot, placement) in grid.placements() {
            if placement.professor >= state.constraints.professor_count()
                || placement.activity >= state.constraints.activity_count()
            {
                return Err(ValidationError::new(
                    ValidationErrorKind::InvalidGrid,
                    format!("Placement at {slot:?} references an unknown professor or activity"),
                ));
            }
            state.reserve(Proposal { slot, placement });
            state.commit();
        }
        Ok(state)
    }

    /// The shared problem view.
    pub fn constraints(&self) -> &Arc<ConstraintManager> {
        &self.constraints
    }

    /// Committed assignments.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The uncommitted assignment, if any.
    pub fn pending(&self) -> Option<&Proposal> {
        self.pending.as_ref()
    }

    /// Unseated students for `activity`.
    pub fn remaining(&self, activity: usize) -> u32 {
        self.remaining[activity]
    }

    /// Unseated students per activity, keyed by activity ID, in problem order.
    pub fn remaining_per_activity(&self) -> Vec<(&str, u32)> {
        self.remaining
            .iter()
            .enumerate()
            .map(|(a, &left)| (self.constraints.activity(a).id.as_str(), left))
            .collect()
    }

    /// Total unseated students.
    pub fn remaining_students(&self) -> u64 {
        self.remaining.iter().map(|&r| u64::from(r)).sum()
    }

    /// Whether every student is seated.
    pub fn is_complete(&self) -> bool {
        self.remaining.iter().all(|&r| r == 0)
    }

    /// Sessions assigned to `professor`, pending one included.
    pub fn professor_load(&self, professor: usize) -> u32 {
        self.professor_load[professor]
    }

    /// Committed (day, interval) pairs for `professor`, sorted.
    pub fn history(&self, professor: usize) -> &[(usize, Interval)] {
        &self.history[professor]
    }

    /// Committed plus pending assignments.
    pub fn assignment_count(&self) -> usize {
        self.grid.assignment_count() + usize::from(self.pending.is_some())
    }

    /// Hard feasibility of placing `professor` teaching `activity` at
    /// (`day`, `interval`).
    ///
    /// All of the following must hold:
    /// 1. every index names an existing day, interval, activity and professor
    /// 2. the professor is below the load cap
    /// 3. the professor teaches the activity
    /// 4. nobody in the same (day, interval) is this professor
    /// 5. nobody in the same (day, interval) hosts this activity
    ///
    /// The pending assignment counts as occupying its slot.
    pub fn check_constraint(
        &self,
        day: usize,
        interval: usize,
        activity: usize,
        professor: usize,
    ) -> bool {
        let c = &self.constraints;
        if day >= c.day_count()
            || interval >= c.interval_count()
            || activity >= c.activity_count()
            || professor >= c.professor_count()
        {
            return false;
        }
        if self.professor_load[professor] >= self.constraints.max_professor_load() {
            return false;
        }
        if !self.constraints.teaches(professor, activity) {
            return false;
        }

        let pending = self
            .pending
            .filter(|p| p.slot.day == day && p.slot.interval == interval)
            .map(|p| p.placement);
        self.grid
            .placements_at(day, interval)
            .chain(pending)
            .all(|p| p.professor != professor && p.activity != activity)
    }

    /// Derives the successor holding `proposal` as its pending assignment.
    ///
    /// Any assignment already pending on `self` is committed in the
    /// successor first. The grid itself is left untouched.
    pub fn choose_interval(&self, proposal: Proposal) -> SearchState {
        let mut next = self.clone();
        next.commit();
        next.reserve(proposal);
        next
    }

    fn reserve(&mut self, proposal: Proposal) {
        let capacity = self.constraints.room(proposal.slot.room).capacity;
        let left = &mut self.remaining[proposal.placement.activity];
        *left = left.saturating_sub(capacity);
        self.professor_load[proposal.placement.professor] += 1;
        self.pending = Some(proposal);
    }

    /// Writes the pending assignment into the grid and the professor's
    /// history. Returns `false` if nothing was pending.
    pub fn commit(&mut self) -> bool {
        let Some(proposal) = self.pending.take() else {
            return false;
        };

        Arc::make_mut(&mut self.grid).commit(&proposal);

        let entry = (proposal.slot.day, self.constraints.interval(proposal.slot.interval));
        let history = &mut Arc::make_mut(&mut self.history)[proposal.placement.professor];
        let at = history.partition_point(|e| *e <= entry);
        history.insert(at, entry);
        true
    }

    /// Empty slots, excluding the one the pending assignment will fill.
    fn open_slots(&self) -> impl Iterator<Item = Slot> + '_ {
        let taken = self.pending.map(|p| p.slot);
        self.grid.empty_slots().filter(move |s| Some(*s) != taken)
    }

    /// Every legal successor that fills `slot`.
    ///
    /// Activities are tried scarcest first (fewest accepting rooms), then
    /// by most students still unseated.
    pub fn candidates_for_slot(&self, slot: Slot) -> Vec<SearchState> {
        let c = &self.constraints;
        let mut activities: Vec<usize> = c
            .activities_accepted(slot.room)
            .iter()
            .copied()
            .filter(|&a| self.remaining[a] > 0)
            .collect();
        activities.sort_by_key(|&a| (c.rooms_accepting_count(a), Reverse(self.remaining[a])));

        let mut batch = Vec::new();
        for activity in activities {
            for &professor in c.professors_accepting(activity) {
                if self.check_constraint(slot.day, slot.interval, activity, professor) {
                    batch.push(self.choose_interval(Proposal::new(slot, professor, activity)));
                }
            }
        }
        batch
    }

    /// Successors across all open slots.
    ///
    /// With probability `disruption_probability`, independently per slot,
    /// that slot's batch is replaced by one uniformly chosen member.
    pub fn get_next_states<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        disruption_probability: f64,
    ) -> Vec<SearchState> {
        let mut next = Vec::new();
        for slot in self.open_slots() {
            let mut batch = self.candidates_for_slot(slot);
            if batch.is_empty() {
                continue;
            }
            if disruption_probability > 0.0 && rng.random_bool(disruption_probability.min(1.0)) {
                let pick = rng.random_range(0..batch.len());
                next.push(batch.swap_remove(pick));
            } else {
                next.append(&mut batch);
            }
        }
        next
    }

    /// Soft constraint tallies over committed plus pending assignments.
    ///
    /// # Returns
    /// `(preference_units, pause_violations)`. Blocked days weigh 3 units
    /// and blocked intervals 1.
    pub fn soft_violations(&self) -> (u64, u64) {
        let c = &self.constraints;
        let pending = self.pending.map(|p| (p.slot, p.placement));

        let mut preference = 0u64;
        for (slot, placement) in self.grid.placements().chain(pending) {
            let day = c.day(slot.day);
            let interval = c.interval(slot.interval);
            preference += c
                .professor(placement.professor)
                .preferences
                .iter()
                .map(|p| u64::from(p.penalty(day, interval)))
                .sum::<u64>();
        }

        let mut pause = 0u64;
        for professor in 0..c.professor_count() {
            let mut limits = c
                .professor(professor)
                .preferences
                .iter()
                .filter_map(|p| match p {
                    Preference::MaxPause { hours } => Some(*hours),
                    _ => None,
                })
                .peekable();
            if limits.peek().is_none() {
                continue;
            }
            let history = self.history_with_pending(professor);
            for hours in limits {
                pause += count_pause_violations(hours, &*history) as u64;
            }
        }

        (preference, pause)
    }

    fn history_with_pending(&self, professor: usize) -> Cow<'_, [(usize, Interval)]> {
        let committed = &self.history[professor];
        match self.pending.filter(|p| p.placement.professor == professor) {
            Some(p) => {
                let entry = (p.slot.day, self.constraints.interval(p.slot.interval));
                let mut merged = committed.clone();
                let at = merged.partition_point(|e| *e <= entry);
                merged.insert(at, entry);
                Cow::Owned(merged)
            }
            None => Cow::Borrowed(committed),
        }
    }

    /// Hill-climbing cost. Lower is better.
    ///
    /// `remaining² × 50` plus a soft penalty whose weights rise once fewer
    /// than a fifth of all students remain unseated.
    pub fn eval_node(&self) -> u64 {
        let remaining = self.remaining_students();
        let (preference, pause) = self.soft_violations();
        let late = remaining.saturating_mul(LATE_PHASE_DIVISOR) < self.constraints.total_students();
        let (wp, wq) = if late {
            LATE_SOFT_WEIGHTS
        } else {
            EARLY_SOFT_WEIGHTS
        };
        remaining
            .saturating_mul(remaining)
            .saturating_mul(REMAINING_SQUARED_WEIGHT)
            .saturating_add(preference.saturating_mul(wp))
            .saturating_add(pause.saturating_mul(wq))
    }

    /// A* path cost: a fixed charge per assignment.
    pub fn g(&self) -> u64 {
        self.assignment_count() as u64 * STEP_COST
    }

    /// A* heuristic. Not admissible; it may overestimate.
    pub fn h(&self) -> u64 {
        let (preference, pause) = self.soft_violations();
        self.remaining_students()
            .saturating_mul(STUDENT_COST)
            .saturating_add(preference.saturating_mul(PREFERENCE_COST))
            .saturating_add(pause.saturating_mul(PAUSE_COST))
    }

    pub fn total_cost(&self) -> u64 {
        self.g().saturating_add(self.h())
    }

    /// Frontier key: total cost, then unseated students.
    pub fn priority(&self) -> (u64, u64) {
        (self.total_cost(), self.remaining_students())
    }

    /// Committed sessions resolved to names, in (day, interval, room) order.
    pub fn scheduled_classes(&self) -> Vec<ScheduledClass<'_>> {
        let c = &self.constraints;
        self.grid
            .placements()
            .map(|(slot, placement)| ScheduledClass {
                day: c.day(slot.day),
                interval: c.interval(slot.interval),
                room: &c.room(slot.room).id,
                professor: &c.professor(placement.professor).id,
                activity: &c.activity(placement.activity).id,
            })
            .collect()
    }
}

/// States are equal when their committed grids are.
impl PartialEq for SearchState {
    fn eq(&self, other: &Self) -> bool {
        self.grid == other.grid
    }
}

impl Eq for SearchState {}

impl Hash for SearchState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.grid.hash(state);
    }
}

impl fmt::Debug for SearchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchState")
            .field("remaining", &self.remaining)
            .field("assignments", &self.grid.assignment_count())
            .field("professor_load", &self.professor_load)
            .field("pending", &self.pending)
            .finish()
    }
}
