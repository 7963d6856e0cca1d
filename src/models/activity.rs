//! Activity (course) model.
//!
//! An activity is a subject that must seat a fixed number of students
//! across one or more class sessions. Each session placed in a room
//! seats up to that room's capacity.

use serde::{Deserialize, Serialize};

/// A course activity to be timetabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Unique activity identifier.
    pub id: String,
    /// Number of students that must be seated.
    pub students: u32,
}

impl Activity {
    /// Creates a new activity.
    pub fn new(id: impl Into<String>, students: u32) -> Self {
        Self {
            id: id.into(),
            students,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_new() {
        let a = Activity::new("PCOM", 120);
        assert_eq!(a.id, "PCOM");
        assert_eq!(a.students, 120);
    }
}
