mod json;
mod markdown;
mod text;

pub use json::*;
pub use markdown::*;
pub use text::*;

use crate::catalog::Catalog;
use crate::config::SolverConfig;
use crate::error::Result;
use crate::types::{GroupId, LecturerId, SolveOutcome, TimetableEvent};
use crate::validator::ValidationReport;
use std::fs;
use std::path::Path;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Text,
}

/// Generate all reports and write to output directory
pub fn generate_reports(
    outcome: &SolveOutcome,
    catalog: &Catalog,
    validation: &ValidationReport,
    config: &SolverConfig,
    output_dir: &Path,
    formats: &[OutputFormat],
) -> Result<()> {
    fs::create_dir_all(output_dir)?;

    for format in formats {
        match format {
            OutputFormat::Json => {
                let json = generate_json_report(outcome)?;
                fs::write(output_dir.join("timetable.json"), json)?;
            }
            OutputFormat::Markdown => {
                let md = generate_markdown_report(outcome, catalog, validation, config);
                fs::write(output_dir.join("timetable.md"), md)?;
            }
            OutputFormat::Text => {
                let txt = generate_text_report(outcome, catalog, validation);
                fs::write(output_dir.join("timetable.txt"), txt)?;
            }
        }
    }

    Ok(())
}

/// Position of a day label in the configured week, for stable ordering
fn day_rank(day: &str, config: &SolverConfig) -> usize {
    config
        .week_days
        .iter()
        .position(|d| d == day)
        .unwrap_or(usize::MAX)
}

/// Events sorted by week position then start time
fn sorted_events<'a>(
    events: &[&'a TimetableEvent],
    config: &SolverConfig,
) -> Vec<&'a TimetableEvent> {
    let mut sorted = events.to_vec();
    sorted.sort_by_key(|e| (day_rank(&e.day, config), e.start));
    sorted
}

fn describe_event(event: &TimetableEvent, catalog: &Catalog) -> String {
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
    format!(
        "{}-{}: {} in {} ({})",
        event.start, event.end, course, room, lecturer
    )
}

/// Generate one group's weekly schedule
pub fn generate_group_schedule(
    outcome: &SolveOutcome,
    catalog: &Catalog,
    config: &SolverConfig,
    group_id: GroupId,
) -> Option<String> {
    let group = catalog.group(group_id)?;

    let mut lines = vec![format!("# Schedule for group {} ({})", group.name, group.id)];
    if let Some(year) = group.year {
        lines.push(format!("Year: {}", year));
    }
    lines.push(String::new());

    let events = sorted_events(&outcome.events_for_group(group_id), config);
    if events.is_empty() {
        lines.push("No classes scheduled.".to_string());
    } else {
        for event in events {
            lines.push(format!("**{}** {}", event.day, describe_event(event, catalog)));
        }
    }

    Some(lines.join("\n"))
}

/// Generate one lecturer's weekly schedule
pub fn generate_lecturer_schedule(
    outcome: &SolveOutcome,
    catalog: &Catalog,
    config: &SolverConfig,
    lecturer_id: LecturerId,
) -> Option<String> {
    let lecturer = catalog.lecturer(lecturer_id)?;

    let mut lines = vec![
        format!("# Schedule for {} ({})", lecturer.name, lecturer.id),
        String::new(),
    ];

    let events = sorted_events(&outcome.events_for_lecturer(lecturer_id), config);
    if events.is_empty() {
        lines.push("No classes scheduled.".to_string());
    } else {
        lines.push(format!("## Teaching {} sessions\n", events.len()));
        for event in events {
            let group = catalog
                .group(event.group_id)
                .map(|g| g.name.clone())
                .unwrap_or_else(|| event.group_id.to_string());
            lines.push(format!(
                "- **{}** {} with {}",
                event.day,
                describe_event(event, catalog),
                group
            ));
        }
    }

    Some(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        CourseId, RoomId, SolveMetadata, StudentGroup, TimeOfDay, Version, VersionId,
    };

    fn outcome() -> SolveOutcome {
        SolveOutcome {
            version: Version {
                id: VersionId(1),
                name: "v1".to_string(),
                created_at: chrono::Utc::now(),
            },
            events: vec![
                TimetableEvent {
                    course_id: CourseId(1),
                    room_id: RoomId(1),
                    group_id: GroupId(1),
                    lecturer_id: LecturerId(1),
                    day: "Wed".to_string(),
                    start: TimeOfDay::new(9, 0).unwrap(),
                    end: TimeOfDay::new(10, 0).unwrap(),
                    version_id: VersionId(1),
                },
                TimetableEvent {
                    course_id: CourseId(1),
                    room_id: RoomId(1),
                    group_id: GroupId(1),
                    lecturer_id: LecturerId(1),
                    day: "Mon".to_string(),
                    start: TimeOfDay::new(11, 0).unwrap(),
                    end: TimeOfDay::new(12, 0).unwrap(),
                    version_id: VersionId(1),
                },
            ],
            metadata: SolveMetadata::default(),
        }
    }

    fn catalog() -> Catalog {
        Catalog {
            groups: vec![StudentGroup {
                id: GroupId(1),
                name: "3CSE".to_string(),
                size: 30,
                year: Some(3),
                department: None,
                lecture_group: None,
                subgroup: None,
                track: None,
            }],
            ..Catalog::default()
        }
    }

    #[test]
    fn test_group_schedule_orders_by_week_day() {
        let text = generate_group_schedule(
            &outcome(),
            &catalog(),
            &SolverConfig::default(),
            GroupId(1),
        )
        .unwrap();
        let mon = text.find("**Mon**").unwrap();
        let wed = text.find("**Wed**").unwrap();
        assert!(mon < wed);
    }

    #[test]
    fn test_unknown_group_yields_none() {
        let report = generate_group_schedule(
            &outcome(),
            &catalog(),
            &SolverConfig::default(),
            GroupId(99),
        );
        assert!(report.is_none());
    }
}
