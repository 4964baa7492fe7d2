mod conflicts;
mod hard_constraints;
mod soft_constraints;

pub use conflicts::*;
pub use hard_constraints::*;
pub use soft_constraints::*;

use crate::catalog::Catalog;
use crate::config::SolverConfig;
use crate::types::TimetableEvent;
use std::collections::HashSet;

/// Result of validating one version's committed events
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub hard_violations: Vec<Violation>,
    pub soft_scores: Vec<SoftScore>,
    pub total_score: f64,
    pub statistics: TimetableStatistics,
}

/// A constraint violation
#[derive(Debug, Clone)]
pub struct Violation {
    pub constraint: String,
    pub message: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Severity {
    Error,
    Warning,
}

/// Score for a soft constraint
#[derive(Debug, Clone)]
pub struct SoftScore {
    pub constraint: String,
    pub score: f64,
    pub max_score: f64,
    pub details: String,
}

/// Statistics about a version's events
#[derive(Debug, Clone)]
pub struct TimetableStatistics {
    pub total_events: usize,
    pub lab_events: usize,
    pub groups_scheduled: usize,
    pub lecturers_scheduled: usize,
    pub rooms_used: usize,
    pub same_day_pairs: usize,
}

/// Validate the committed events of a single version against every hard
/// invariant, then score the soft constraints.
pub fn validate_events(
    events: &[TimetableEvent],
    catalog: &Catalog,
    config: &SolverConfig,
) -> ValidationReport {
    let mut hard_violations = Vec::new();

    hard_violations.extend(check_room_overlaps(events, catalog));
    hard_violations.extend(check_group_overlaps(events, catalog));
    hard_violations.extend(check_lecturer_overlaps(events, catalog));
    hard_violations.extend(check_lunch_rule(events, config));
    hard_violations.extend(check_friday_rule(events, catalog));
    hard_violations.extend(check_project_rule(events, catalog));
    hard_violations.extend(check_venue_segregation(events, catalog));
    hard_violations.extend(check_duration_alignment(events, config));
    hard_violations.extend(check_availability(events, catalog));
    hard_violations.extend(check_session_counts(events, catalog));

    let soft_scores = calculate_soft_scores(events, catalog);
    let statistics = calculate_statistics(events, catalog);

    let total_score = if hard_violations.iter().any(|v| v.severity == Severity::Error) {
        0.0
    } else {
        let soft_total: f64 = soft_scores.iter().map(|s| s.score).sum();
        let soft_max: f64 = soft_scores.iter().map(|s| s.max_score).sum();
        if soft_max > 0.0 {
            (soft_total / soft_max) * 100.0
        } else {
            100.0
        }
    };

    ValidationReport {
        is_valid: hard_violations.iter().all(|v| v.severity != Severity::Error),
        hard_violations,
        soft_scores,
        total_score,
        statistics,
    }
}

fn calculate_statistics(events: &[TimetableEvent], catalog: &Catalog) -> TimetableStatistics {
    let groups_scheduled: HashSet<_> = events.iter().map(|e| e.group_id).collect();
    let lecturers_scheduled: HashSet<_> = events.iter().map(|e| e.lecturer_id).collect();
    let rooms_used: HashSet<_> = events.iter().map(|e| e.room_id).collect();

    let lab_events = events
        .iter()
        .filter(|e| is_lab_event(e, catalog))
        .count();

    let mut same_day_pairs = 0;
    for (i, a) in events.iter().enumerate() {
        for b in &events[i + 1..] {
            if a.course_id == b.course_id && a.group_id == b.group_id && a.day == b.day {
                same_day_pairs += 1;
            }
        }
    }

    TimetableStatistics {
        total_events: events.len(),
        lab_events,
        groups_scheduled: groups_scheduled.len(),
        lecturers_scheduled: lecturers_scheduled.len(),
        rooms_used: rooms_used.len(),
        same_day_pairs,
    }
}

/// An event is a lab when it sits in a synthetic lab venue
pub fn is_lab_event(event: &TimetableEvent, catalog: &Catalog) -> bool {
    catalog
        .room(event.room_id)
        .map(|r| r.is_virtual_lab())
        .unwrap_or(false)
}
