//! Room and professor models.
//!
//! Rooms and professors are the two resources every class session needs.
//! Both carry an allow-list of the activities they can host or teach.

use serde::{Deserialize, Serialize};

use super::constraint::deserialize_raw_preferences;
use super::{Preference, PreferenceParseError};

/// A teaching room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier.
    pub id: String,
    /// Number of students seated by one session in this room.
    pub capacity: u32,
    /// Activities this room may host.
    pub activities: Vec<String>,
}

impl Room {
    /// Creates a room with no accepted activities.
    pub fn new(id: impl Into<String>, capacity: u32) -> Self {
        Self {
            id: id.into(),
            capacity,
            activities: Vec::new(),
        }
    }

    /// Adds an accepted activity.
    pub fn with_activity(mut self, activity: impl Into<String>) -> Self {
        self.activities.push(activity.into());
        self
    }

    /// Whether this room may host `activity`.
    pub fn accepts(&self, activity: &str) -> bool {
        self.activities.iter().any(|a| a == activity)
    }
}

/// A professor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Professor {
    /// Unique professor identifier.
    pub id: String,
    /// Activities this professor may teach.
    pub activities: Vec<String>,
    /// Negative preferences (soft constraints).
    ///
    /// Deserialized from raw strings; positive entries are dropped.
    #[serde(default, deserialize_with = "deserialize_raw_preferences")]
    pub preferences: Vec<Preference>,
}

impl Professor {
    /// Creates a professor with no activities or preferences.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            activities: Vec::new(),
            preferences: Vec::new(),
        }
    }

    /// Adds a teachable activity.
    pub fn with_activity(mut self, activity: impl Into<String>) -> Self {
        self.activities.push(activity.into());
        self
    }

    /// Adds a parsed preference.
    pub fn with_preference(mut self, preference: Preference) -> Self {
        self.preferences.push(preference);
        self
    }

    /// Parses and adds a raw preference string (`"!Friday"`, `"!8-10"`, ...).
    ///
    /// Positive preferences are accepted and dropped.
    pub fn with_raw_preference(mut self, raw: &str) -> Result<Self, PreferenceParseError> {
        if let Some(preference) = Preference::parse(raw)? {
            self.preferences.push(preference);
        }
        Ok(self)
    }

    /// Whether this professor may teach `activity`.
    pub fn teaches(&self, activity: &str) -> bool {
        self.activities.iter().any(|a| a == activity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_builder() {
        let r = Room::new("EC105", 30)
            .with_activity("PCOM")
            .with_activity("IA");

        assert_eq!(r.id, "EC105");
        assert_eq!(r.capacity, 30);
        assert!(r.accepts("IA"));
        assert!(!r.accepts("SO"));
    }

    #[test]
    fn test_professor_builder() {
        let p = Professor::new("Andrei")
            .with_activity("IA")
            .with_activity("PCOM")
            .with_raw_preference("!Friday")
            .unwrap()
            .with_raw_preference("Monday")
            .unwrap()
            .with_preference(Preference::max_pause(2));

        assert!(p.teaches("IA"));
        assert!(!p.teaches("SO"));
        assert_eq!(p.preferences.len(), 2); // positive "Monday" dropped
        assert_eq!(p.preferences[1], Preference::max_pause(2));
    }

    #[test]
    fn test_professor_deserializes_raw_preferences() {
        let json = r#"{
            "id": "Andrei",
            "activities": ["IA"],
            "preferences": ["!Friday", "Monday", "!8-10", "!Pause > 2"]
        }"#;
        let p: Professor = serde_json::from_str(json).unwrap();
        assert_eq!(
            p.preferences,
            vec![
                Preference::day_blocked("Friday"),
                Preference::interval_blocked(8, 10),
                Preference::max_pause(2),
            ]
        );

        let round_trip: Professor =
            serde_json::from_str(&serde_json::to_string(&p).unwrap()).unwrap();
        assert_eq!(round_trip, p);
    }

    #[test]
    fn test_professor_rejects_malformed_preference() {
        let json = r#"{"id": "P", "activities": [], "preferences": ["!Pause > x"]}"#;
        assert!(serde_json::from_str::<Professor>(json).is_err());
    }

    #[test]
    fn test_professor_raw_preference_error() {
        assert!(Professor::new("P").with_raw_preference("!x-y").is_err());
    }
}
