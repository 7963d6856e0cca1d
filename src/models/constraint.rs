//! Professor preferences (soft constraints).
//!
//! Preferences arrive from the problem description as short strings and
//! are parsed once, at load time, into [`Preference`] variants:
//!
//! | Raw            | Variant                                   |
//! |----------------|-------------------------------------------|
//! | `!Friday`      | `DayBlocked { day: "Friday" }`            |
//! | `!14-20`       | `IntervalBlocked { start: 14, end: 20 }`  |
//! | `!Pause > 2`   | `MaxPause { hours: 2 }`                   |
//! | `Monday`       | positive preference, ignored              |
//!
//! Violating a preference never makes a timetable illegal; it only
//! degrades its score.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Interval;

/// Virtual end of the session preceding the first one of each day.
pub const DAY_START_HOUR: u32 = 8;

/// Penalty units for teaching inside a blocked interval range.
pub const INTERVAL_VIOLATION_WEIGHT: u32 = 1;

/// Penalty units for teaching on a blocked day.
pub const DAY_VIOLATION_WEIGHT: u32 = 3;

/// A negative professor preference.
///
/// Serializes as its raw string form (`"!Friday"`, `"!8-10"`,
/// `"!Pause > 2"`), so a problem description can carry preferences
/// exactly as the loader writes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Preference {
    /// The professor would rather not teach on this day.
    DayBlocked { day: String },
    /// The professor would rather not teach inside `[start, end]`.
    IntervalBlocked { start: u32, end: u32 },
    /// Longest tolerable same-day gap between consecutive sessions (hours).
    MaxPause { hours: u32 },
}

/// Error produced by a malformed preference string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferenceParseError {
    /// Nothing follows the leading `!`.
    Empty(String),
    /// `!start-end` whose bounds are not whole hours.
    InvalidRange(String),
    /// `> N` whose limit is missing or not a whole number.
    InvalidPause(String),
    /// No leading `!`: a positive preference, which constrains nothing.
    Positive(String),
}

impl fmt::Display for PreferenceParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty(raw) => write!(f, "empty preference: {raw:?}"),
            Self::InvalidRange(raw) => write!(f, "invalid interval range: {raw:?}"),
            Self::InvalidPause(raw) => write!(f, "invalid pause limit: {raw:?}"),
            Self::Positive(raw) => write!(f, "not a negative preference: {raw:?}"),
        }
    }
}

impl std::error::Error for PreferenceParseError {}

impl TryFrom<String> for Preference {
    type Error = PreferenceParseError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Preference::parse(&raw)?.ok_or(PreferenceParseError::Positive(raw))
    }
}

impl From<Preference> for String {
    fn from(preference: Preference) -> Self {
        preference.to_string()
    }
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DayBlocked { day } => write!(f, "!{day}"),
            Self::IntervalBlocked { start, end } => write!(f, "!{start}-{end}"),
            Self::MaxPause { hours } => write!(f, "!Pause > {hours}"),
        }
    }
}

/// Deserializes a list of raw preference strings, dropping positive ones.
///
/// Malformed negative preferences fail deserialization.
pub(crate) fn deserialize_raw_preferences<'de, D>(deserializer: D) -> Result<Vec<Preference>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    let mut preferences = Vec::with_capacity(raw.len());
    for entry in &raw {
        if let Some(preference) = Preference::parse(entry).map_err(serde::de::Error::custom)? {
            preferences.push(preference);
        }
    }
    Ok(preferences)
}

impl Preference {
    /// Creates a blocked-day preference.
    pub fn day_blocked(day: impl Into<String>) -> Self {
        Self::DayBlocked { day: day.into() }
    }

    /// Creates a blocked-interval-range preference.
    pub fn interval_blocked(start: u32, end: u32) -> Self {
        Self::IntervalBlocked { start, end }
    }

    /// Creates a maximum-pause preference.
    pub fn max_pause(hours: u32) -> Self {
        Self::MaxPause { hours }
    }

    /// Parses a raw preference string.
    ///
    /// Returns `Ok(None)` for positive preferences (no leading `!`), which
    /// carry no penalty.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_timetable::models::Preference;
    ///
    /// assert_eq!(
    ///     Preference::parse("!8-12").unwrap(),
    ///     Some(Preference::interval_blocked(8, 12))
    /// );
    /// assert_eq!(
    ///     Preference::parse("!Pause > 2").unwrap(),
    ///     Some(Preference::max_pause(2))
    /// );
    /// assert_eq!(Preference::parse("Monday").unwrap(), None);
    /// ```
    pub fn parse(raw: &str) -> Result<Option<Self>, PreferenceParseError> {
        let trimmed = raw.trim();
        let Some(body) = trimmed.strip_prefix('!') else {
            return Ok(None);
        };
        let body = body.trim();
        if body.is_empty() {
            return Err(PreferenceParseError::Empty(raw.to_string()));
        }

        if let Some((start, end)) = body.split_once('-') {
            let invalid = || PreferenceParseError::InvalidRange(raw.to_string());
            let start = start.trim().parse().map_err(|_| invalid())?;
            let end = end.trim().parse().map_err(|_| invalid())?;
            return Ok(Some(Self::IntervalBlocked { start, end }));
        }

        if let Some((_, after)) = body.split_once('>') {
            // The limit sits at the third token ("!Pause > 2").
            let token = trimmed
                .split_whitespace()
                .nth(2)
                .unwrap_or_else(|| after.trim());
            let hours = token
                .parse()
                .map_err(|_| PreferenceParseError::InvalidPause(raw.to_string()))?;
            return Ok(Some(Self::MaxPause { hours }));
        }

        Ok(Some(Self::DayBlocked {
            day: body.to_string(),
        }))
    }

    /// Penalty units this preference incurs for a session at (`day`, `interval`).
    ///
    /// Pause preferences are not per-session and always return 0; see
    /// [`count_pause_violations`].
    pub fn penalty(&self, day: &str, interval: Interval) -> u32 {
        match self {
            Self::DayBlocked { day: blocked } if blocked == day => DAY_VIOLATION_WEIGHT,
            Self::IntervalBlocked { start, end } if interval.within(*start, *end) => {
                INTERVAL_VIOLATION_WEIGHT
            }
            _ => 0,
        }
    }
}

/// Counts same-day gaps longer than `max_pause` in a professor's sessions.
///
/// `history` must be sorted by (day, interval). Each day starts with a
/// virtual session ending at [`DAY_START_HOUR`], so a late first session
/// also counts as a pause.
pub fn count_pause_violations<D: PartialEq>(max_pause: u32, history: &[(D, Interval)]) -> usize {
    let Some((first_day, _)) = history.first() else {
        return 0;
    };

    let mut day = first_day;
    let mut last_end = DAY_START_HOUR;
    let mut violations = 0;

    for (session_day, interval) in history {
        if session_day != day {
            day = session_day;
            last_end = DAY_START_HOUR;
        }
        let pause = i64::from(interval.start) - i64::from(last_end);
        if pause > i64::from(max_pause) {
            violations += 1;
        }
        last_end = interval.end;
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_day() {
        assert_eq!(
            Preference::parse("!Friday").unwrap(),
            Some(Preference::day_blocked("Friday"))
        );
    }

    #[test]
    fn test_parse_interval() {
        assert_eq!(
            Preference::parse("!14-20").unwrap(),
            Some(Preference::interval_blocked(14, 20))
        );
    }

    #[test]
    fn test_parse_pause() {
        assert_eq!(
            Preference::parse("!Pause > 3").unwrap(),
            Some(Preference::max_pause(3))
        );
        assert_eq!(
            Preference::parse("!>1").unwrap(),
            Some(Preference::max_pause(1))
        );
    }

    #[test]
    fn test_parse_positive_ignored() {
        assert_eq!(Preference::parse("Monday").unwrap(), None);
        assert_eq!(Preference::parse("8-12").unwrap(), None);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Preference::parse("!"),
            Err(PreferenceParseError::Empty(_))
        ));
        assert!(matches!(
            Preference::parse("!a-b"),
            Err(PreferenceParseError::InvalidRange(_))
        ));
        assert!(matches!(
            Preference::parse("!Pause > x"),
            Err(PreferenceParseError::InvalidPause(_))
        ));
    }

    #[test]
    fn test_penalty() {
        let day = Preference::day_blocked("Monday");
        assert_eq!(day.penalty("Monday", Interval::new(8, 10)), 3);
        assert_eq!(day.penalty("Tuesday", Interval::new(8, 10)), 0);

        let range = Preference::interval_blocked(8, 12);
        assert_eq!(range.penalty("Monday", Interval::new(10, 12)), 1);
        assert_eq!(range.penalty("Monday", Interval::new(12, 14)), 0);

        let pause = Preference::max_pause(2);
        assert_eq!(pause.penalty("Monday", Interval::new(8, 10)), 0);
    }

    #[test]
    fn test_pause_violations() {
        let history = vec![
            ("Mon", Interval::new(8, 10)),
            ("Mon", Interval::new(14, 16)),
            ("Mon", Interval::new(18, 20)),
        ];
        // Gaps of 4 and 2 hours
        assert_eq!(count_pause_violations(0, &history), 2);
        assert_eq!(count_pause_violations(2, &history), 1);
        assert_eq!(count_pause_violations(10, &history), 0);
    }

    #[test]
    fn test_pause_violations_reset_per_day() {
        let history = vec![
            ("Mon", Interval::new(8, 10)),
            ("Mon", Interval::new(14, 16)),
            ("Tue", Interval::new(12, 14)), // 4h after the virtual 8:00 start
        ];
        assert_eq!(count_pause_violations(2, &history), 2);
        assert_eq!(count_pause_violations(4, &history), 0);
    }

    #[test]
    fn test_display_parses_back() {
        for p in [
            Preference::day_blocked("Friday"),
            Preference::interval_blocked(14, 20),
            Preference::max_pause(3),
        ] {
            assert_eq!(Preference::parse(&p.to_string()).unwrap(), Some(p));
        }
    }

    #[test]
    fn test_serde_string_form() {
        let p: Preference = serde_json::from_str(r#""!Pause > 2""#).unwrap();
        assert_eq!(p, Preference::max_pause(2));
        assert_eq!(
            serde_json::to_string(&Preference::interval_blocked(8, 10)).unwrap(),
            r#""!8-10""#
        );
        assert!(serde_json::from_str::<Preference>(r#""Monday""#).is_err());
        assert!(serde_json::from_str::<Preference>(r#""!a-b""#).is_err());
    }

    #[test]
    fn test_pause_violations_empty() {
        let history: Vec<(&str, Interval)> = Vec::new();
        assert_eq!(count_pause_violations(0, &history), 0);
    }
}
