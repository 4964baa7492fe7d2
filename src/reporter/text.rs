use crate::catalog::Catalog;
use crate::types::SolveOutcome;
use crate::validator::ValidationReport;
use colored::Colorize;
use itertools::Itertools;

/// Generate a plain text report (with colors for terminal)
pub fn generate_text_report(
    outcome: &SolveOutcome,
    catalog: &Catalog,
    validation: &ValidationReport,
) -> String {
    let mut lines = Vec::new();

    lines.push("═".repeat(60));
    lines.push("               TIMETABLE REPORT".to_string());
    lines.push("═".repeat(60));
    lines.push(String::new());

    // Summary
    lines.push(format!(
        "Version:    {} (id {})",
        outcome.version.name, outcome.version.id
    ));
    lines.push(format!("Generated:  {}", outcome.metadata.generated_at));
    lines.push(format!("Solve Time: {}ms", outcome.metadata.solve_time_ms));
    lines.push(String::new());

    lines.push("─".repeat(40));
    lines.push("STATISTICS".to_string());
    lines.push("─".repeat(40));
    lines.push(format!(
        "  Events:        {}",
        validation.statistics.total_events
    ));
    lines.push(format!(
        "  Labs:          {}",
        validation.statistics.lab_events
    ));
    lines.push(format!(
        "  Groups:        {}",
        validation.statistics.groups_scheduled
    ));
    lines.push(format!(
        "  Lecturers:     {}",
        validation.statistics.lecturers_scheduled
    ));
    lines.push(format!(
        "  Rooms Used:    {}",
        validation.statistics.rooms_used
    ));
    lines.push(format!(
        "  Same-day:      {} pairs",
        validation.statistics.same_day_pairs
    ));
    lines.push(format!("  Score:         {:.1}/100", validation.total_score));
    lines.push(String::new());

    // Validation
    lines.push("─".repeat(40));
    if validation.is_valid {
        lines.push("VALIDATION: PASSED".green().to_string());
    } else {
        lines.push("VALIDATION: FAILED".red().to_string());
        for v in &validation.hard_violations {
            lines.push(format!("  ! {}: {}", v.constraint, v.message));
        }
    }
    lines.push("─".repeat(40));
    lines.push(String::new());

    // Room usage
    lines.push("ROOM USAGE".to_string());
    lines.push("─".repeat(40));

    let by_room: Vec<_> = outcome
        .events
        .iter()
        .map(|e| (e.room_id, e))
        .into_group_map()
        .into_iter()
        .sorted_by_key(|(rid, _)| *rid)
        .collect();

    for (room_id, events) in by_room {
        let room = catalog.room(room_id);
        let name = room.map(|r| r.name.clone()).unwrap_or_else(|| room_id.to_string());
        let capacity = room.map(|r| r.capacity).unwrap_or(0);

        let worst_fill = events
            .iter()
            .filter_map(|e| catalog.group(e.group_id))
            .map(|g| g.size)
            .max()
            .unwrap_or(0);

        let fill_indicator = if capacity > 0 && worst_fill > capacity {
            "●".red()
        } else if capacity > 0 && worst_fill * 10 >= capacity * 9 {
            "●".yellow()
        } else {
            "●".green()
        };

        lines.push(format!(
            "  {} {} | {} events | capacity {} | largest group {}",
            fill_indicator,
            name.bold(),
            events.len(),
            capacity,
            worst_fill
        ));
    }

    lines.push(String::new());
    lines.push("═".repeat(60));

    lines.join("\n")
}

/// Print a quick summary to stdout
pub fn print_summary(outcome: &SolveOutcome, validation: &ValidationReport) {
    println!();
    if validation.is_valid {
        println!("{}", "✓ Timetable generated successfully".green().bold());
    } else {
        println!("{}", "✗ Timetable has validation errors".red().bold());
    }
    println!();
    println!("  Version:   {}", outcome.version.name);
    println!("  Events:    {}", validation.statistics.total_events);
    println!("  Labs:      {}", validation.statistics.lab_events);
    println!("  Same-day:  {} pairs", validation.statistics.same_day_pairs);
    println!("  Score:     {:.1}/100", validation.total_score);
    println!("  Time:      {}ms", outcome.metadata.solve_time_ms);
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SolverConfig;
    use crate::types::{SolveMetadata, Version, VersionId};
    use crate::validator::validate_events;

    #[test]
    fn test_text_report_mentions_version_and_status() {
        let outcome = SolveOutcome {
            version: Version {
                id: VersionId(3),
                name: "sem1-draft".to_string(),
                created_at: chrono::Utc::now(),
            },
            events: vec![],
            metadata: SolveMetadata::default(),
        };
        let catalog = Catalog::default();
        let validation = validate_events(&outcome.events, &catalog, &SolverConfig::default());
        let report = generate_text_report(&outcome, &catalog, &validation);
        assert!(report.contains("sem1-draft"));
        assert!(report.contains("VALIDATION"));
    }
}
