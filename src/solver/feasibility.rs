use crate::config::SolverConfig;
use crate::solver::grid::TimeGrid;
use crate::types::{
    within_availability, GroupId, Lecturer, LecturerId, Room, Session, StudentGroup,
};
use log::{debug, warn};
use std::collections::HashMap;

/// One feasible (session, room, start-slot) placement with its memoized
/// base-slot coverage
#[derive(Debug, Clone)]
pub struct Candidate {
    pub session: usize,
    pub room: usize,
    pub start_slot: usize,
    /// Day index of the start slot
    pub day: usize,
    /// Base-slot indices occupied by the placement
    pub cover: Vec<usize>,
}

/// All feasible placements plus the inverted indices the constraint model
/// iterates: per session, per (room, base slot), per (group, base slot) and
/// per (lecturer, base slot) for lecture sessions only.
#[derive(Debug, Default)]
pub struct CandidateSet {
    pub candidates: Vec<Candidate>,
    pub by_session: Vec<Vec<usize>>,
    pub by_room_slot: HashMap<(usize, usize), Vec<usize>>,
    pub by_group_slot: HashMap<(GroupId, usize), Vec<usize>>,
    pub by_lecturer_slot: HashMap<(LecturerId, usize), Vec<usize>>,
}

impl CandidateSet {
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Number of base slots a session occupies; None when its duration is not a
/// positive multiple of the base slot length
pub fn session_span(minutes: u32, slot_minutes: u32) -> Option<usize> {
    if slot_minutes == 0 || minutes == 0 || minutes % slot_minutes != 0 {
        return None;
    }
    Some((minutes / slot_minutes) as usize)
}

/// Room eligibility per group: if the group fits somewhere, every room is
/// allowed (capacity is not re-checked); otherwise only the rooms tied for
/// maximum capacity. Oversubscription is tolerated by design.
pub fn allowed_rooms_per_group(
    groups: &[StudentGroup],
    rooms: &[Room],
) -> HashMap<GroupId, Vec<bool>> {
    let max_capacity = rooms.iter().map(|r| r.capacity).max().unwrap_or(0);
    groups
        .iter()
        .map(|g| {
            let fits_somewhere = rooms.iter().any(|r| r.capacity >= g.size);
            let allowed = rooms
                .iter()
                .map(|r| fits_somewhere || r.capacity == max_capacity)
                .collect();
            (g.id, allowed)
        })
        .collect()
}

/// Venue category rule: labs only in synthetic lab rooms, lectures never
fn venue_category_ok(is_lab: bool, room: &Room) -> bool {
    is_lab == room.is_virtual_lab()
}

/// Enumerate every feasible placement, building the inverted indices in the
/// same pass.
pub fn enumerate_candidates(
    sessions: &[Session],
    rooms: &[Room],
    groups: &[StudentGroup],
    lecturers: &[Lecturer],
    grid: &TimeGrid,
    config: &SolverConfig,
) -> CandidateSet {
    let group_map: HashMap<GroupId, &StudentGroup> = groups.iter().map(|g| (g.id, g)).collect();
    let lecturer_availability: HashMap<LecturerId, Option<&crate::types::Availability>> =
        lecturers.iter().map(|l| (l.id, l.availability.as_ref())).collect();
    let allowed = allowed_rooms_per_group(groups, rooms);

    let mut set = CandidateSet {
        by_session: vec![Vec::new(); sessions.len()],
        ..CandidateSet::default()
    };

    for (si, session) in sessions.iter().enumerate() {
        let Some(span) = session_span(session.minutes, config.slot_minutes) else {
            // Unsatisfiable duration; the empty disjunction surfaces it as
            // solver-level infeasibility
            warn!(
                "Session {} of course {} has duration {} not divisible by the {}-minute base slot",
                si, session.course_id, session.minutes, config.slot_minutes
            );
            continue;
        };

        let group = group_map.get(&session.group_id).copied();
        let friday_blocked = group.map(|g| g.is_project_year()).unwrap_or(false);
        let lec_avail = if session.is_lab() {
            // Labs do not consume lecturer time
            None
        } else {
            lecturer_availability
                .get(&session.lecturer_id)
                .copied()
                .flatten()
        };

        for (ri, room) in rooms.iter().enumerate() {
            if let Some(allowed_rooms) = allowed.get(&session.group_id) {
                if !allowed_rooms[ri] {
                    continue;
                }
            }
            if !venue_category_ok(session.is_lab(), room) {
                continue;
            }
            // Requirement match applies to lectures only
            if !session.is_lab()
                && !session
                    .requirements
                    .satisfied_by(room.furniture_type.as_deref(), &room.equipment)
            {
                continue;
            }

            for t in 0..grid.len() {
                let slot = grid.slot(t);
                if config.starts_in_lunch(slot.start) {
                    continue;
                }
                let day_label = grid.day_label(slot.day);
                if friday_blocked && day_label == "Fri" {
                    continue;
                }
                let Some(end) = grid.span_end(t, span) else {
                    continue;
                };
                if !within_availability(room.availability.as_ref(), day_label, slot.start, end) {
                    continue;
                }
                if !within_availability(lec_avail, day_label, slot.start, end) {
                    continue;
                }

                let cover: Vec<usize> = (t..t + span).collect();
                let ci = set.candidates.len();
                set.by_session[si].push(ci);
                for &b in &cover {
                    set.by_room_slot.entry((ri, b)).or_default().push(ci);
                    set.by_group_slot
                        .entry((session.group_id, b))
                        .or_default()
                        .push(ci);
                    if !session.is_lab() {
                        set.by_lecturer_slot
                            .entry((session.lecturer_id, b))
                            .or_default()
                            .push(ci);
                    }
                }
                set.candidates.push(Candidate {
                    session: si,
                    room: ri,
                    start_slot: t,
                    day: slot.day,
                    cover,
                });
            }
        }
    }

    debug!(
        "Enumerated {} candidates for {} sessions over {} rooms x {} slots",
        set.len(),
        sessions.len(),
        rooms.len(),
        grid.len()
    );
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        Availability, CourseId, LecturerId, Requirements, RoomId, SessionKind, TimeOfDay,
    };
    use std::collections::BTreeMap;

    fn room(id: u32, name: &str, capacity: u32) -> Room {
        Room {
            id: RoomId(id),
            name: name.to_string(),
            capacity,
            building: None,
            furniture_type: None,
            equipment: vec![],
            availability: None,
        }
    }

    fn group(id: u32, size: u32, year: Option<u8>) -> StudentGroup {
        StudentGroup {
            id: GroupId(id),
            name: format!("G{}", id),
            size,
            year,
            department: None,
            lecture_group: None,
            subgroup: None,
            track: None,
        }
    }

    fn lecturer(id: u32) -> Lecturer {
        Lecturer {
            id: LecturerId(id),
            name: format!("L{}", id),
            email: None,
            department: None,
            max_daily_load: None,
            availability: None,
        }
    }

    fn session(minutes: u32, kind: SessionKind) -> Session {
        Session {
            course_id: CourseId(1),
            group_id: GroupId(1),
            lecturer_id: LecturerId(1),
            minutes,
            requirements: Requirements::default(),
            kind,
        }
    }

    fn enumerate(
        sessions: &[Session],
        rooms: &[Room],
        groups: &[StudentGroup],
        lecturers: &[Lecturer],
        config: &SolverConfig,
    ) -> CandidateSet {
        let grid = TimeGrid::build(config);
        enumerate_candidates(sessions, rooms, groups, lecturers, &grid, config)
    }

    #[test]
    fn test_capacity_fallback_allows_all_rooms_when_group_fits() {
        let rooms = vec![room(1, "R1", 20), room(2, "R2", 100)];
        let groups = vec![group(1, 40, None)];
        let allowed = allowed_rooms_per_group(&groups, &rooms);
        // Group fits in R2, so even the too-small R1 is allowed
        assert_eq!(allowed[&GroupId(1)], vec![true, true]);
    }

    #[test]
    fn test_oversized_group_restricted_to_largest_rooms() {
        let rooms = vec![room(1, "R1", 100), room(2, "R2", 200), room(3, "R3", 200)];
        let groups = vec![group(1, 300, None)];
        let allowed = allowed_rooms_per_group(&groups, &rooms);
        assert_eq!(allowed[&GroupId(1)], vec![false, true, true]);
    }

    #[test]
    fn test_non_multiple_duration_yields_no_candidates() {
        let config = SolverConfig::default();
        let set = enumerate(
            &[session(90, SessionKind::Lecture)],
            &[room(1, "R1", 50)],
            &[group(1, 40, None)],
            &[lecturer(1)],
            &config,
        );
        assert!(set.by_session[0].is_empty());
    }

    #[test]
    fn test_lunch_start_excluded() {
        let config = SolverConfig::default();
        let set = enumerate(
            &[session(60, SessionKind::Lecture)],
            &[room(1, "R1", 50)],
            &[group(1, 40, None)],
            &[lecturer(1)],
            &config,
        );
        let grid = TimeGrid::build(&config);
        let lunch = TimeOfDay::new(13, 0).unwrap();
        assert!(!set.candidates.is_empty());
        assert!(set
            .candidates
            .iter()
            .all(|c| grid.slot(c.start_slot).start != lunch));
    }

    #[test]
    fn test_friday_blocked_for_year_five() {
        let config = SolverConfig::default();
        let set = enumerate(
            &[session(60, SessionKind::Lecture)],
            &[room(1, "R1", 50)],
            &[group(1, 40, Some(5))],
            &[lecturer(1)],
            &config,
        );
        let grid = TimeGrid::build(&config);
        assert!(!set.candidates.is_empty());
        assert!(set
            .candidates
            .iter()
            .all(|c| grid.day_label(c.day) != "Fri"));
    }

    #[test]
    fn test_venue_segregation() {
        let config = SolverConfig::default();
        let rooms = vec![room(1, "LT-1", 50), room(2, "LAB-G1", 50)];
        let sessions = vec![session(60, SessionKind::Lecture), session(180, SessionKind::Lab)];
        let set = enumerate(&sessions, &rooms, &[group(1, 40, None)], &[lecturer(1)], &config);

        assert!(set.by_session[0]
            .iter()
            .all(|&ci| set.candidates[ci].room == 0));
        assert!(!set.by_session[1].is_empty());
        assert!(set.by_session[1]
            .iter()
            .all(|&ci| set.candidates[ci].room == 1));
    }

    #[test]
    fn test_span_stays_within_one_day() {
        let config = SolverConfig::default();
        let set = enumerate(
            &[session(180, SessionKind::Lab)],
            &[room(1, "LAB-G1", 50)],
            &[group(1, 40, None)],
            &[lecturer(1)],
            &config,
        );
        let grid = TimeGrid::build(&config);
        for c in &set.candidates {
            assert_eq!(c.cover.len(), 3);
            assert!(c.cover.iter().all(|&b| grid.slot(b).day == c.day));
        }
        // Starting two slots before day end would cross into the next day
        assert!(set.candidates.iter().all(|c| c.start_slot % 9 <= 6));
    }

    #[test]
    fn test_lecture_requirements_enforced_labs_exempt() {
        let config = SolverConfig::default();
        let mut plain = room(1, "LT-1", 50);
        plain.furniture_type = Some("LECTURE".to_string());
        let mut equipped = room(2, "LT-2", 50);
        equipped.furniture_type = Some("LECTURE".to_string());
        equipped.equipment = vec!["PROJECTOR".to_string()];
        let lab_room = room(3, "LAB-G1", 50);

        let mut lecture = session(60, SessionKind::Lecture);
        lecture.requirements = Requirements {
            furniture_type: Some("lecture".to_string()),
            equipment: vec!["projector".to_string()],
        };
        let mut lab = session(180, SessionKind::Lab);
        // Lab requirements are not matched against the synthetic venue
        lab.requirements = Requirements {
            furniture_type: Some("SOMETHING".to_string()),
            equipment: vec!["IMPOSSIBLE".to_string()],
        };

        let set = enumerate(
            &[lecture, lab],
            &[plain, equipped, lab_room],
            &[group(1, 40, None)],
            &[lecturer(1)],
            &config,
        );
        assert!(set.by_session[0]
            .iter()
            .all(|&ci| set.candidates[ci].room == 1));
        assert!(!set.by_session[1].is_empty());
    }

    #[test]
    fn test_room_availability_containment() {
        let config = SolverConfig::default();
        let mut limited = room(1, "R1", 50);
        let mut windows = BTreeMap::new();
        windows.insert(
            "Mon".to_string(),
            vec![(TimeOfDay::new(8, 0).unwrap(), TimeOfDay::new(10, 0).unwrap())],
        );
        limited.availability = Some(Availability(windows));

        let set = enumerate(
            &[session(120, SessionKind::Lecture)],
            &[limited],
            &[group(1, 40, None)],
            &[lecturer(1)],
            &config,
        );
        let grid = TimeGrid::build(&config);
        // Only Monday 08:00-10:00 fits the two-slot block
        assert_eq!(set.candidates.len(), 1);
        let only = &set.candidates[0];
        assert_eq!(grid.day_label(only.day), "Mon");
        assert_eq!(grid.slot(only.start_slot).start.to_string(), "08:00");
    }

    #[test]
    fn test_lecturer_availability_ignored_for_labs() {
        let config = SolverConfig::default();
        let mut busy = lecturer(1);
        // Availability record present but empty: open nowhere
        busy.availability = Some(Availability(BTreeMap::new()));

        let rooms = vec![room(1, "LT-1", 50), room(2, "LAB-G1", 50)];
        let sessions = vec![session(60, SessionKind::Lecture), session(180, SessionKind::Lab)];
        let set = enumerate(&sessions, &rooms, &[group(1, 40, None)], &[busy], &config);

        assert!(set.by_session[0].is_empty());
        assert!(!set.by_session[1].is_empty());
    }

    #[test]
    fn test_inverted_indices_are_consistent() {
        let config = SolverConfig::default();
        let set = enumerate(
            &[session(120, SessionKind::Lecture)],
            &[room(1, "R1", 50)],
            &[group(1, 40, None)],
            &[lecturer(1)],
            &config,
        );
        for (key, cands) in &set.by_room_slot {
            for &ci in cands {
                assert!(set.candidates[ci].cover.contains(&key.1));
                assert_eq!(set.candidates[ci].room, key.0);
            }
        }
        let total_cover: usize = set.candidates.iter().map(|c| c.cover.len()).sum();
        let indexed: usize = set.by_room_slot.values().map(|v| v.len()).sum();
        assert_eq!(total_cover, indexed);
    }
}
