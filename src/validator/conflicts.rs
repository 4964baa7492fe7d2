use crate::catalog::Catalog;
use crate::types::TimetableEvent;
use std::collections::BTreeSet;

/// Conflict check for a single event against the catalog and a set of
/// already-committed events; the interactive edit path calls this before
/// accepting a manual placement or move.
///
/// Pure and total: unknown references are skipped rather than failing, and
/// the result is a sorted, de-duplicated list of violations (empty when the
/// event is acceptable).
pub fn validate_event(
    event: &TimetableEvent,
    catalog: &Catalog,
    existing: &[TimetableEvent],
) -> Vec<String> {
    let mut errors = BTreeSet::new();

    let room = catalog.room(event.room_id);
    let group = catalog.group(event.group_id);
    let lecturer = catalog.lecturer(event.lecturer_id);
    let course = catalog.course(event.course_id);

    // Room capacity
    if let (Some(room), Some(group)) = (room, group) {
        if room.capacity < group.size {
            errors.insert("Room capacity is less than group size".to_string());
        }
    }

    // Lecture requirements against the room
    if let (Some(room), Some(course)) = (room, course) {
        if !course
            .requirements
            .furniture_matches(room.furniture_type.as_deref())
        {
            errors.insert("Room furniture type does not meet requirement".to_string());
        }
        if !course.requirements.equipment_subset_of(&room.equipment) {
            errors.insert("Room equipment does not meet requirement".to_string());
        }
    }

    // Availability windows
    if let Some(room) = room {
        if let Some(avail) = &room.availability {
            if !avail.contains(&event.day, event.start, event.end) {
                errors.insert("Room not available in selected slot".to_string());
            }
        }
    }
    if let Some(lecturer) = lecturer {
        if let Some(avail) = &lecturer.availability {
            if !avail.contains(&event.day, event.start, event.end) {
                errors.insert("Lecturer not available in selected slot".to_string());
            }
        }
    }

    // Double-bookings against existing events
    for other in existing {
        if other == event {
            continue;
        }
        if !event.clashes_with(other) {
            continue;
        }
        if other.room_id == event.room_id {
            errors.insert("Room already booked at that time".to_string());
        }
        if other.group_id == event.group_id {
            errors.insert("Group already has a class at that time".to_string());
        }
        if other.lecturer_id == event.lecturer_id {
            errors.insert("Lecturer already teaching at that time".to_string());
        }
    }

    errors.into_iter().collect()
}
