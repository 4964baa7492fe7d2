use crate::catalog::Catalog;
use crate::types::TimetableEvent;
use crate::validator::SoftScore;
use itertools::Itertools;

/// Calculate all soft constraint scores
pub fn calculate_soft_scores(events: &[TimetableEvent], catalog: &Catalog) -> Vec<SoftScore> {
    vec![
        score_day_spread(events),
        score_room_fit(events, catalog),
    ]
}

/// Score for spreading a course-group's sessions over distinct days.
///
/// Mirrors the solver objective: every pair of events sharing a course and
/// group placed on the same day costs a point.
fn score_day_spread(events: &[TimetableEvent]) -> SoftScore {
    let mut total_pairs = 0.0;
    let mut same_day = 0.0;

    for (_, bucket) in &events
        .iter()
        .map(|e| ((e.course_id, e.group_id), e))
        .into_group_map()
    {
        for (a, b) in bucket.iter().tuple_combinations() {
            total_pairs += 1.0;
            if a.day == b.day {
                same_day += 1.0;
            }
        }
    }

    SoftScore {
        constraint: "DaySpread".to_string(),
        score: total_pairs - same_day,
        max_score: total_pairs,
        details: format!("{} of {} session pairs share a day", same_day, total_pairs),
    }
}

/// Score for seating: oversubscribed rooms are tolerated by the capacity
/// fallback, but each one costs here
fn score_room_fit(events: &[TimetableEvent], catalog: &Catalog) -> SoftScore {
    let mut fitting = 0usize;

    for event in events {
        let room_capacity = catalog.room(event.room_id).map(|r| r.capacity).unwrap_or(0);
        let group_size = catalog.group(event.group_id).map(|g| g.size).unwrap_or(0);
        if room_capacity >= group_size {
            fitting += 1;
        }
    }

    SoftScore {
        constraint: "RoomFit".to_string(),
        score: fitting as f64,
        max_score: events.len() as f64,
        details: format!("{}/{} events seat their whole group", fitting, events.len()),
    }
}
