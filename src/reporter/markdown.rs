use crate::catalog::Catalog;
use crate::config::SolverConfig;
use crate::types::{GroupId, SolveOutcome, TimetableEvent};
use crate::validator::ValidationReport;
use itertools::Itertools;

/// Generate a markdown report of the timetable
pub fn generate_markdown_report(
    outcome: &SolveOutcome,
    catalog: &Catalog,
    validation: &ValidationReport,
    config: &SolverConfig,
) -> String {
    let mut lines = vec![
        "# Timetable Report".to_string(),
        String::new(),
        format!("Version: {} (id {})", outcome.version.name, outcome.version.id),
        format!("Generated: {}", outcome.metadata.generated_at),
        format!("Algorithm: v{}", outcome.metadata.algorithm_version),
        format!("Solve time: {}ms", outcome.metadata.solve_time_ms),
        String::new(),
    ];

    // Summary
    lines.push("## Summary\n".to_string());
    lines.push("| Metric | Value |".to_string());
    lines.push("|--------|-------|".to_string());
    lines.push(format!(
        "| Total Events | {} |",
        validation.statistics.total_events
    ));
    lines.push(format!(
        "| Lab Events | {} |",
        validation.statistics.lab_events
    ));
    lines.push(format!(
        "| Groups Scheduled | {} |",
        validation.statistics.groups_scheduled
    ));
    lines.push(format!(
        "| Lecturers Scheduled | {} |",
        validation.statistics.lecturers_scheduled
    ));
    lines.push(format!("| Rooms Used | {} |", validation.statistics.rooms_used));
    lines.push(format!(
        "| Same-day Pairs | {} |",
        validation.statistics.same_day_pairs
    ));
    lines.push(format!(
        "| Overall Score | {:.1}/100 |",
        validation.total_score
    ));
    lines.push(String::new());

    // Validation status
    if validation.is_valid {
        lines.push("## Validation: ✅ PASSED\n".to_string());
    } else {
        lines.push("## Validation: ❌ FAILED\n".to_string());
        for violation in &validation.hard_violations {
            lines.push(format!(
                "- **{}**: {}",
                violation.constraint, violation.message
            ));
        }
        lines.push(String::new());
    }

    // Soft scores
    lines.push("## Soft Constraint Scores\n".to_string());
    for score in &validation.soft_scores {
        let pct = if score.max_score > 0.0 {
            (score.score / score.max_score) * 100.0
        } else {
            100.0
        };
        lines.push(format!(
            "- **{}**: {:.1}% ({})",
            score.constraint, pct, score.details
        ));
    }
    lines.push(String::new());

    // Per-group weekly breakdown
    lines.push("## Group Timetables\n".to_string());

    let by_group: Vec<(GroupId, Vec<&TimetableEvent>)> = outcome
        .events
        .iter()
        .map(|e| (e.group_id, e))
        .into_group_map()
        .into_iter()
        .sorted_by_key(|(gid, _)| *gid)
        .collect();

    for (group_id, mut events) in by_group {
        let group_name = catalog
            .group(group_id)
            .map(|g| g.name.clone())
            .unwrap_or_else(|| group_id.to_string());

        lines.push(format!("### {}\n", group_name));
        lines.push("| Day | Time | Course | Room | Lecturer |".to_string());
        lines.push("|-----|------|--------|------|----------|".to_string());

        events.sort_by_key(|e| (super::day_rank(&e.day, config), e.start));
        for event in events {
            let course = catalog
                .course(event.course_id)
                .map(|c| c.code.clone())
                .unwrap_or_else(|| event.course_id.to_string());
            let room = catalog
                .room(event.room_id)
                .map(|r| r.name.clone())
                .unwrap_or_else(|| event.room_id.to_string());
            let lecturer = catalog
                .lecturer(event.lecturer_id)
                .map(|l| l.name.clone())
                .unwrap_or_else(|| "TBD".to_string());

            lines.push(format!(
                "| {} | {}-{} | {} | {} | {} |",
                event.day, event.start, event.end, course, room, lecturer
            ));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}
