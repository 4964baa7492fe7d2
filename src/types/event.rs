use super::{overlaps, CourseId, GroupId, LecturerId, RoomId, TimeOfDay, VersionId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable snapshot of one solve; all of its events carry the id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Version {
    pub id: VersionId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// One committed timetable entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimetableEvent {
    pub course_id: CourseId,
    pub room_id: RoomId,
    pub group_id: GroupId,
    pub lecturer_id: LecturerId,
    /// Day label from the configured week, e.g. "Mon"
    pub day: String,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub version_id: VersionId,
}

impl TimetableEvent {
    pub fn duration_minutes(&self) -> i64 {
        self.start.minutes_until(self.end)
    }

    /// Same day and intersecting [start, end) intervals
    pub fn clashes_with(&self, other: &TimetableEvent) -> bool {
        self.day == other.day && overlaps(self.start, self.end, other.start, other.end)
    }
}

/// Metadata about a completed solve
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveMetadata {
    pub generated_at: String,
    pub algorithm_version: String,
    /// Objective value: number of same-day course/group pairs incurred
    pub same_day_penalty: u32,
    pub solve_time_ms: u64,
    pub session_count: usize,
    pub candidate_count: usize,
}

impl Default for SolveMetadata {
    fn default() -> Self {
        Self {
            generated_at: String::new(),
            algorithm_version: String::new(),
            same_day_penalty: 0,
            solve_time_ms: 0,
            session_count: 0,
            candidate_count: 0,
        }
    }
}

/// The result of a successful solve: the committed events plus bookkeeping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveOutcome {
    pub version: Version,
    pub events: Vec<TimetableEvent>,
    pub metadata: SolveMetadata,
}

impl SolveOutcome {
    /// Events for one group, in stable (day used as-is) order of appearance
    pub fn events_for_group(&self, group_id: GroupId) -> Vec<&TimetableEvent> {
        self.events.iter().filter(|e| e.group_id == group_id).collect()
    }

    pub fn events_for_lecturer(&self, lecturer_id: LecturerId) -> Vec<&TimetableEvent> {
        self.events
            .iter()
            .filter(|e| e.lecturer_id == lecturer_id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(day: &str, start: (u32, u32), end: (u32, u32)) -> TimetableEvent {
        TimetableEvent {
            course_id: CourseId(1),
            room_id: RoomId(1),
            group_id: GroupId(1),
            lecturer_id: LecturerId(1),
            day: day.to_string(),
            start: TimeOfDay::new(start.0, start.1).unwrap(),
            end: TimeOfDay::new(end.0, end.1).unwrap(),
            version_id: VersionId(1),
        }
    }

    #[test]
    fn test_clash_requires_same_day() {
        let a = event("Mon", (9, 0), (11, 0));
        let b = event("Tue", (9, 0), (11, 0));
        assert!(!a.clashes_with(&b));

        let c = event("Mon", (10, 0), (12, 0));
        assert!(a.clashes_with(&c));
    }

    #[test]
    fn test_back_to_back_is_not_a_clash() {
        let a = event("Mon", (9, 0), (10, 0));
        let b = event("Mon", (10, 0), (11, 0));
        assert!(!a.clashes_with(&b));
    }
}
