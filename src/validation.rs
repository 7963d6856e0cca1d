//! Input validation for timetabling problems.
//!
//! Checks structural integrity of the problem description before any
//! search state is built. Detects:
//! - Duplicate IDs (days, rooms, professors, activities)
//! - Rooms or professors referencing activities that don't exist
//! - Empty or overlapping teaching intervals
//!
//! The search itself assumes all of these hold and never re-checks them.

use crate::models::TimetableProblem;
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A room or professor references an activity that doesn't exist.
    UnknownActivity,
    /// An interval ends at or before its start.
    EmptyInterval,
    /// Two intervals share some hours.
    OverlappingInterval,
    /// A grid does not match the problem it is paired with.
    InvalidGrid,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validates a timetabling problem.
///
/// Checks:
/// 1. No duplicate day, room, professor or activity IDs
/// 2. Every activity a room accepts exists
/// 3. Every activity a professor teaches exists
/// 4. Every interval is non-empty
/// 5. No two intervals overlap
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_problem(problem: &TimetableProblem) -> ValidationResult {
    let mut errors = Vec::new();

    check_unique(
        "day",
        problem.days.iter().map(String::as_str),
        &mut errors,
    );
    check_unique(
        "room",
        problem.rooms.iter().map(|r| r.id.as_str()),
        &mut errors,
    );
    check_unique(
        "professor",
        problem.professors.iter().map(|p| p.id.as_str()),
        &mut errors,
    );
    let activity_ids = check_unique(
        "activity",
        problem.activities.iter().map(|a| a.id.as_str()),
        &mut errors,
    );

    // Activity references
    for room in &problem.rooms {
        for act in &room.activities {
            if !activity_ids.contains(act.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownActivity,
                    format!("Room '{}' accepts unknown activity '{}'", room.id, act),
                ));
            }
        }
    }
    for prof in &problem.professors {
        for act in &prof.activities {
            if !activity_ids.contains(act.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownActivity,
                    format!("Professor '{}' teaches unknown activity '{}'", prof.id, act),
                ));
            }
        }
    }

    // Interval shape
    for iv in &problem.intervals {
        if iv.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyInterval,
                format!("Interval {iv} is empty"),
            ));
        }
    }
    for (i, a) in problem.intervals.iter().enumerate() {
        for b in &problem.intervals[i + 1..] {
            if a == b {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateId,
                    format!("Duplicate interval: {a}"),
                ));
            } else if a.overlaps(b) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::OverlappingInterval,
                    format!("Intervals {a} and {b} overlap"),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_unique<'a>(
    what: &str,
    ids: impl Iterator<Item = &'a str>,
    errors: &mut Vec<ValidationError>,
) -> HashSet<&'a str> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate {what} ID: {id}"),
            ));
        }
    }
    seen
}
