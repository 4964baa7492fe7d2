use crate::catalog::Catalog;
use crate::config::SolverConfig;
use crate::types::{within_availability, TimetableEvent};
use crate::validator::{is_lab_event, Severity, Violation};
use itertools::Itertools;
use std::collections::HashMap;

fn error(constraint: &str, message: String) -> Violation {
    Violation {
        constraint: constraint.to_string(),
        message,
        severity: Severity::Error,
    }
}

/// Check for overlapping events in the same room on the same day
pub fn check_room_overlaps(events: &[TimetableEvent], catalog: &Catalog) -> Vec<Violation> {
    let mut violations = Vec::new();

    for ((room_id, _), day_events) in &events
        .iter()
        .map(|e| ((e.room_id, e.day.clone()), e))
        .into_group_map()
    {
        for (a, b) in day_events.iter().tuple_combinations() {
            if a.clashes_with(b) {
                let name = catalog
                    .room(*room_id)
                    .map(|r| r.name.clone())
                    .unwrap_or_else(|| room_id.to_string());
                violations.push(error(
                    "NoRoomOverlap",
                    format!(
                        "Room '{}' double-booked on {} at {}-{} and {}-{}",
                        name, a.day, a.start, a.end, b.start, b.end
                    ),
                ));
            }
        }
    }

    violations
}

/// Check for overlapping events for the same group on the same day
pub fn check_group_overlaps(events: &[TimetableEvent], catalog: &Catalog) -> Vec<Violation> {
    let mut violations = Vec::new();

    for ((group_id, _), day_events) in &events
        .iter()
        .map(|e| ((e.group_id, e.day.clone()), e))
        .into_group_map()
    {
        for (a, b) in day_events.iter().tuple_combinations() {
            if a.clashes_with(b) {
                let name = catalog
                    .group(*group_id)
                    .map(|g| g.name.clone())
                    .unwrap_or_else(|| group_id.to_string());
                violations.push(error(
                    "NoGroupOverlap",
                    format!(
                        "Group '{}' double-booked on {} at {}-{} and {}-{}",
                        name, a.day, a.start, a.end, b.start, b.end
                    ),
                ));
            }
        }
    }

    violations
}

/// Check for overlapping non-lab events for the same lecturer.
///
/// Labs do not consume lecturer time and are exempt.
pub fn check_lecturer_overlaps(events: &[TimetableEvent], catalog: &Catalog) -> Vec<Violation> {
    let mut violations = Vec::new();

    for ((lecturer_id, _), day_events) in &events
        .iter()
        .filter(|e| !is_lab_event(e, catalog))
        .map(|e| ((e.lecturer_id, e.day.clone()), e))
        .into_group_map()
    {
        for (a, b) in day_events.iter().tuple_combinations() {
            if a.clashes_with(b) {
                let name = catalog
                    .lecturer(*lecturer_id)
                    .map(|l| l.name.clone())
                    .unwrap_or_else(|| lecturer_id.to_string());
                violations.push(error(
                    "NoLecturerOverlap",
                    format!(
                        "Lecturer '{}' double-booked on {} at {}-{} and {}-{}",
                        name, a.day, a.start, a.end, b.start, b.end
                    ),
                ));
            }
        }
    }

    violations
}

/// No event may start inside the reserved lunch window
pub fn check_lunch_rule(events: &[TimetableEvent], config: &SolverConfig) -> Vec<Violation> {
    events
        .iter()
        .filter(|e| config.starts_in_lunch(e.start))
        .map(|e| {
            error(
                "LunchExclusion",
                format!("Event on {} starts at {} inside the lunch window", e.day, e.start),
            )
        })
        .collect()
}

/// Year-5 groups reserve Friday for project work
pub fn check_friday_rule(events: &[TimetableEvent], catalog: &Catalog) -> Vec<Violation> {
    events
        .iter()
        .filter(|e| e.day == "Fri")
        .filter(|e| {
            catalog
                .group(e.group_id)
                .map(|g| g.is_project_year())
                .unwrap_or(false)
        })
        .map(|e| {
            error(
                "FridayProjectDay",
                format!("Year-5 group {} scheduled on Friday at {}", e.group_id, e.start),
            )
        })
        .collect()
}

/// Project courses are never assigned venues
pub fn check_project_rule(events: &[TimetableEvent], catalog: &Catalog) -> Vec<Violation> {
    events
        .iter()
        .filter(|e| {
            catalog
                .course(e.course_id)
                .map(|c| c.is_project)
                .unwrap_or(false)
        })
        .map(|e| {
            error(
                "NoProjectEvents",
                format!("Project course {} has a scheduled event on {}", e.course_id, e.day),
            )
        })
        .collect()
}

/// Labs sit only in synthetic lab venues; events in a lab venue must belong
/// to a lab-bearing course
pub fn check_venue_segregation(events: &[TimetableEvent], catalog: &Catalog) -> Vec<Violation> {
    let mut violations = Vec::new();

    for event in events {
        if !is_lab_event(event, catalog) {
            continue;
        }
        let has_lab = catalog
            .course(event.course_id)
            .map(|c| c.has_lab)
            .unwrap_or(false);
        if !has_lab {
            violations.push(error(
                "VenueSegregation",
                format!(
                    "Course {} without a lab occupies lab venue {} on {}",
                    event.course_id, event.room_id, event.day
                ),
            ));
        }
    }

    violations
}

/// Durations are positive multiples of the base slot and stay inside the
/// teaching day
pub fn check_duration_alignment(events: &[TimetableEvent], config: &SolverConfig) -> Vec<Violation> {
    let mut violations = Vec::new();

    for event in events {
        let duration = event.duration_minutes();
        let slot = config.slot_minutes as i64;
        if duration <= 0 || (slot > 0 && duration % slot != 0) {
            violations.push(error(
                "DurationAlignment",
                format!(
                    "Event on {} at {} lasts {} minutes, not a positive multiple of {}",
                    event.day, event.start, duration, config.slot_minutes
                ),
            ));
        }
        if event.start < config.day_start || event.end > config.day_end {
            violations.push(error(
                "DurationAlignment",
                format!(
                    "Event on {} at {}-{} leaves the teaching day",
                    event.day, event.start, event.end
                ),
            ));
        }
        if !config.week_days.contains(&event.day) {
            violations.push(error(
                "DurationAlignment",
                format!("Event day '{}' is not a configured working day", event.day),
            ));
        }
    }

    violations
}

/// Room availability must contain every event; lecturer availability applies
/// to lectures only
pub fn check_availability(events: &[TimetableEvent], catalog: &Catalog) -> Vec<Violation> {
    let mut violations = Vec::new();

    for event in events {
        if let Some(room) = catalog.room(event.room_id) {
            if !within_availability(room.availability.as_ref(), &event.day, event.start, event.end) {
                violations.push(error(
                    "RoomAvailability",
                    format!(
                        "Room '{}' is not available on {} at {}-{}",
                        room.name, event.day, event.start, event.end
                    ),
                ));
            }
        }
        if !is_lab_event(event, catalog) {
            if let Some(lecturer) = catalog.lecturer(event.lecturer_id) {
                if !within_availability(
                    lecturer.availability.as_ref(),
                    &event.day,
                    event.start,
                    event.end,
                ) {
                    violations.push(error(
                        "LecturerAvailability",
                        format!(
                            "Lecturer '{}' is not available on {} at {}-{}",
                            lecturer.name, event.day, event.start, event.end
                        ),
                    ));
                }
            }
        }
    }

    violations
}

/// Every schedulable course-group pair must have exactly the expanded number
/// of lecture and lab events
pub fn check_session_counts(events: &[TimetableEvent], catalog: &Catalog) -> Vec<Violation> {
    let mut violations = Vec::new();

    let mut lecture_counts: HashMap<(u32, u32), u32> = HashMap::new();
    let mut lab_counts: HashMap<(u32, u32), u32> = HashMap::new();
    for event in events {
        let key = (event.course_id.0, event.group_id.0);
        if is_lab_event(event, catalog) {
            *lab_counts.entry(key).or_insert(0) += 1;
        } else {
            *lecture_counts.entry(key).or_insert(0) += 1;
        }
    }

    for course in &catalog.courses {
        // Mirror the expander: projects and incomplete courses emit nothing
        if course.is_project || course.lecturers.is_empty() || course.groups.is_empty() {
            continue;
        }
        let year_hint = course.year_hint();

        for gid in &course.groups {
            let Some(group) = catalog.group(*gid) else {
                continue;
            };
            if let (Some(year), Some(hint)) = (group.year, year_hint) {
                if year != hint {
                    continue;
                }
            }

            let key = (course.id.0, gid.0);
            let expected_lectures = course.lecture_sessions_per_group();
            let actual_lectures = lecture_counts.get(&key).copied().unwrap_or(0);
            if actual_lectures != expected_lectures {
                violations.push(error(
                    "SessionCounts",
                    format!(
                        "Course '{}' group '{}': {} lecture events, expected {}",
                        course.code, group.name, actual_lectures, expected_lectures
                    ),
                ));
            }

            let expected_labs = if course.has_lab { course.lab_weekly_sessions } else { 0 };
            let actual_labs = lab_counts.get(&key).copied().unwrap_or(0);
            if actual_labs != expected_labs {
                violations.push(error(
                    "SessionCounts",
                    format!(
                        "Course '{}' group '{}': {} lab events, expected {}",
                        course.code, group.name, actual_labs, expected_labs
                    ),
                ));
            }
        }
    }

    violations
}
