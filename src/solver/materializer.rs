use crate::solver::feasibility::CandidateSet;
use crate::solver::grid::TimeGrid;
use crate::solver::ilp::PlacementSolution;
use crate::types::{Room, Session, TimetableEvent, VersionId};

/// Read the chosen placement of every session back into timetable events
/// tagged with the version id.
pub fn materialize_events(
    sessions: &[Session],
    candidates: &CandidateSet,
    solution: &PlacementSolution,
    rooms: &[Room],
    grid: &TimeGrid,
    version: VersionId,
) -> Vec<TimetableEvent> {
    sessions
        .iter()
        .zip(&solution.chosen)
        .map(|(session, &ci)| {
            let candidate = &candidates.candidates[ci];
            let first = grid.slot(candidate.start_slot);
            let last_slot = candidate.cover.last().copied().unwrap_or(candidate.start_slot);
            TimetableEvent {
                course_id: session.course_id,
                room_id: rooms[candidate.room].id,
                group_id: session.group_id,
                lecturer_id: session.lecturer_id,
                day: grid.day_label(first.day).to_string(),
                start: first.start,
                end: grid.slot(last_slot).end,
                version_id: version,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SolverConfig;
    use crate::solver::feasibility::Candidate;
    use crate::types::{
        CourseId, GroupId, LecturerId, Requirements, RoomId, SessionKind,
    };

    #[test]
    fn test_event_spans_full_candidate_cover() {
        let config = SolverConfig::default();
        let grid = TimeGrid::build(&config);
        let sessions = vec![Session {
            course_id: CourseId(3),
            group_id: GroupId(2),
            lecturer_id: LecturerId(9),
            minutes: 120,
            requirements: Requirements::default(),
            kind: SessionKind::Lecture,
        }];
        let rooms = vec![Room {
            id: RoomId(4),
            name: "LT-1".to_string(),
            capacity: 80,
            building: None,
            furniture_type: None,
            equipment: vec![],
            availability: None,
        }];
        let candidates = CandidateSet {
            candidates: vec![Candidate {
                session: 0,
                room: 0,
                start_slot: 10,
                day: grid.slot(10).day,
                cover: vec![10, 11],
            }],
            by_session: vec![vec![0]],
            ..CandidateSet::default()
        };
        let solution = PlacementSolution {
            chosen: vec![0],
            same_day_penalty: 0,
        };

        let events =
            materialize_events(&sessions, &candidates, &solution, &rooms, &grid, VersionId(5));
        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.room_id, RoomId(4));
        assert_eq!(event.day, "Tue");
        assert_eq!(event.start.to_string(), "09:00");
        assert_eq!(event.end.to_string(), "11:00");
        assert_eq!(event.version_id, VersionId(5));
        assert_eq!(event.duration_minutes(), 120);
    }
}
