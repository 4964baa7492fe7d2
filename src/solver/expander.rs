use crate::config::SolverConfig;
use crate::types::{Course, GroupId, Session, SessionKind, StudentGroup};
use log::debug;
use std::collections::HashMap;

/// Expand schedulable courses into atomic sessions.
///
/// Project courses are never scheduled into venues; courses with no groups
/// or no lecturers are skipped here and reported by catalog validation.
/// Groups whose year disagrees with the course code's year hint are dropped
/// for that course.
pub fn expand_sessions(
    courses: &[Course],
    groups: &[StudentGroup],
    config: &SolverConfig,
) -> Vec<Session> {
    let group_map: HashMap<GroupId, &StudentGroup> = groups.iter().map(|g| (g.id, g)).collect();
    let mut sessions = Vec::new();

    for course in courses {
        if course.is_project {
            continue;
        }
        let Some(lecturer) = course.primary_lecturer() else {
            continue;
        };
        if course.groups.is_empty() {
            continue;
        }

        let year_hint = course.year_hint();
        let attached: Vec<&StudentGroup> = course
            .groups
            .iter()
            .filter_map(|gid| group_map.get(gid).copied())
            .filter(|g| match (g.year, year_hint) {
                (Some(year), Some(hint)) => year == hint,
                _ => true,
            })
            .collect();

        let lecture_count = course.lecture_sessions_per_group();
        if lecture_count > 0 {
            for group in &attached {
                for _ in 0..lecture_count {
                    sessions.push(Session {
                        course_id: course.id,
                        group_id: group.id,
                        lecturer_id: lecturer,
                        minutes: course.session_minutes,
                        requirements: course.requirements.clone(),
                        kind: SessionKind::Lecture,
                    });
                }
            }
        }

        if course.has_lab && course.lab_weekly_sessions > 0 {
            let lab_minutes = if course.lab_session_minutes > 0 {
                course.lab_session_minutes
            } else {
                3 * config.slot_minutes
            };
            for group in &attached {
                for _ in 0..course.lab_weekly_sessions {
                    sessions.push(Session {
                        course_id: course.id,
                        group_id: group.id,
                        lecturer_id: lecturer,
                        minutes: lab_minutes,
                        requirements: course.lab_requirements.clone(),
                        kind: SessionKind::Lab,
                    });
                }
            }
        }
    }

    debug!(
        "Expanded {} courses into {} sessions",
        courses.len(),
        sessions.len()
    );
    sessions
}
