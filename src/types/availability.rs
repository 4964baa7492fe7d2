use super::{overlaps, TimeOfDay};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Availability windows per day label, e.g. {"Mon": [["08:00","17:00"]]}.
///
/// A resource with no availability record at all is always open; a resource
/// with a record is open only inside one of its listed windows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Availability(pub BTreeMap<String, Vec<(TimeOfDay, TimeOfDay)>>);

impl Availability {
    /// True if `[start, end]` fits inside some window for `day`
    pub fn contains(&self, day: &str, start: TimeOfDay, end: TimeOfDay) -> bool {
        self.0
            .get(day)
            .map(|windows| windows.iter().any(|(s, e)| *s <= start && end <= *e))
            .unwrap_or(false)
    }

    /// True if `[start, end]` overlaps some window for `day`
    pub fn intersects(&self, day: &str, start: TimeOfDay, end: TimeOfDay) -> bool {
        self.0
            .get(day)
            .map(|windows| windows.iter().any(|(s, e)| overlaps(*s, *e, start, end)))
            .unwrap_or(false)
    }
}

/// Containment check for optional availability: absent means always open
pub fn within_availability(
    avail: Option<&Availability>,
    day: &str,
    start: TimeOfDay,
    end: TimeOfDay,
) -> bool {
    match avail {
        None => true,
        Some(a) => a.contains(day, start, end),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> TimeOfDay {
        TimeOfDay::new(h, m).unwrap()
    }

    fn mon_morning() -> Availability {
        let mut map = BTreeMap::new();
        map.insert("Mon".to_string(), vec![(t(8, 0), t(12, 0))]);
        Availability(map)
    }

    #[test]
    fn test_absent_availability_is_open() {
        assert!(within_availability(None, "Mon", t(8, 0), t(9, 0)));
    }

    #[test]
    fn test_window_containment() {
        let avail = mon_morning();
        assert!(avail.contains("Mon", t(8, 0), t(12, 0)));
        assert!(avail.contains("Mon", t(9, 0), t(10, 0)));
        assert!(!avail.contains("Mon", t(11, 0), t(13, 0)));
        // No windows listed for Tue at all
        assert!(!avail.contains("Tue", t(9, 0), t(10, 0)));
    }

    #[test]
    fn test_json_shape() {
        let avail: Availability =
            serde_json::from_str(r#"{"Mon": [["08:00", "17:00"]]}"#).unwrap();
        assert!(avail.contains("Mon", t(8, 0), t(17, 0)));
    }
}
