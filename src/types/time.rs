use crate::error::TimetableError;
use chrono::{NaiveTime, Timelike};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A minute-precision wall-clock time, serialized as "HH:MM"
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Minutes elapsed since midnight
    pub fn minutes_from_midnight(&self) -> u32 {
        self.0.num_seconds_from_midnight() / 60
    }

    /// Build from minutes since midnight; None past 24:00
    pub fn from_minutes(minutes: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0).map(Self)
    }

    /// Advance by a number of minutes; None if the result crosses midnight
    pub fn add_minutes(&self, minutes: u32) -> Option<Self> {
        Self::from_minutes(self.minutes_from_midnight() + minutes)
    }

    /// Whole minutes between `self` and a later time
    pub fn minutes_until(&self, later: TimeOfDay) -> i64 {
        later.minutes_from_midnight() as i64 - self.minutes_from_midnight() as i64
    }
}

/// Check whether the half-open intervals [a_start, a_end) and [b_start, b_end) overlap
pub fn overlaps(a_start: TimeOfDay, a_end: TimeOfDay, b_start: TimeOfDay, b_end: TimeOfDay) -> bool {
    a_start.max(b_start) < a_end.min(b_end)
}

impl FromStr for TimeOfDay {
    type Err = TimetableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(s.trim(), "%H:%M")
            .map(Self)
            .map_err(|_| TimetableError::InvalidTime(s.to_string()))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0.hour(), self.0.minute())
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn t(h: u32, m: u32) -> TimeOfDay {
        TimeOfDay::new(h, m).unwrap()
    }

    #[test]
    fn test_parse_and_format() {
        let parsed: TimeOfDay = "08:30".parse().unwrap();
        assert_eq!(parsed, t(8, 30));
        assert_eq!(parsed.to_string(), "08:30");
    }

    #[test]
    fn test_rejects_garbage() {
        assert!("25:00".parse::<TimeOfDay>().is_err());
        assert!("8h30".parse::<TimeOfDay>().is_err());
        assert!("".parse::<TimeOfDay>().is_err());
    }

    #[test]
    fn test_add_minutes_stops_at_midnight() {
        assert_eq!(t(9, 0).add_minutes(90), Some(t(10, 30)));
        assert_eq!(t(23, 30).add_minutes(60), None);
    }

    #[test]
    fn test_overlap_half_open() {
        // Adjacent intervals do not overlap
        assert!(!overlaps(t(8, 0), t(9, 0), t(9, 0), t(10, 0)));
        assert!(overlaps(t(8, 0), t(9, 1), t(9, 0), t(10, 0)));
        assert!(overlaps(t(8, 0), t(12, 0), t(9, 0), t(10, 0)));
    }

    proptest! {
        #[test]
        fn prop_display_roundtrips(h in 0u32..24, m in 0u32..60) {
            let time = t(h, m);
            let back: TimeOfDay = time.to_string().parse().unwrap();
            prop_assert_eq!(time, back);
        }

        #[test]
        fn prop_overlap_is_symmetric(a in 0u32..1440, b in 1u32..120, c in 0u32..1440, d in 1u32..120) {
            let (a1, a2) = (TimeOfDay::from_minutes(a.min(1439)).unwrap(),
                            TimeOfDay::from_minutes((a + b).min(1439)).unwrap());
            let (b1, b2) = (TimeOfDay::from_minutes(c.min(1439)).unwrap(),
                            TimeOfDay::from_minutes((c + d).min(1439)).unwrap());
            prop_assert_eq!(overlaps(a1, a2, b1, b2), overlaps(b1, b2, a1, a2));
        }
    }
}
