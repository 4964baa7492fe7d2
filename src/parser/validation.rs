use crate::catalog::Catalog;
use crate::config::SolverConfig;
use crate::error::Result;
use crate::types::{Course, GroupId, LecturerId};
use std::collections::{HashMap, HashSet};

/// Weekly teaching-hour ceilings used for overload warnings
const MAX_LECTURER_WEEKLY_HOURS: u32 = 18;
const MAX_GROUP_WEEKLY_HOURS: u32 = 30;

/// Validation result with collected errors and warnings
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }
}

/// Validate catalog data before a solve
pub fn validate_catalog(catalog: &Catalog, config: &SolverConfig) -> Result<ValidationResult> {
    let mut result = ValidationResult::default();

    check_duplicate_ids(catalog, &mut result);

    let group_ids: HashSet<GroupId> = catalog.groups.iter().map(|g| g.id).collect();
    let lecturer_ids: HashSet<LecturerId> = catalog.lecturers.iter().map(|l| l.id).collect();

    for course in &catalog.courses {
        for gid in &course.groups {
            if !group_ids.contains(gid) {
                result.add_error(format!(
                    "Course '{}' references unknown group {}",
                    course.code, gid
                ));
            }
        }
        for lid in &course.lecturers {
            if !lecturer_ids.contains(lid) {
                result.add_error(format!(
                    "Course '{}' references unknown lecturer {}",
                    course.code, lid
                ));
            }
        }

        if course.is_project {
            continue;
        }

        if course.lecturers.is_empty() {
            result.add_error(format!(
                "Course '{}' has no assigned lecturers and will be skipped",
                course.code
            ));
        }
        if course.groups.is_empty() {
            result.add_error(format!(
                "Course '{}' has no assigned groups and will be skipped",
                course.code
            ));
        }
        if course.weekly_hours == 0 && !course.has_lab {
            result.add_warning(format!("Course '{}' has no scheduled hours", course.code));
        }
        if course.has_lab && course.lab_weekly_sessions == 0 {
            result.add_error(format!(
                "Course '{}' has a lab but no weekly lab sessions",
                course.code
            ));
        }

        // The expander rounds the session count up; flag the extra minutes
        if course.weekly_hours > 0 && course.session_minutes > 0 {
            let minutes_needed = course.weekly_hours * 60;
            if minutes_needed % course.session_minutes != 0 {
                let scheduled = course.lecture_sessions_per_group() * course.session_minutes;
                result.add_warning(format!(
                    "Course '{}': {} weekly minutes round up to {} scheduled minutes",
                    course.code, minutes_needed, scheduled
                ));
            }
        }

        if config.slot_minutes > 0 {
            if course.session_minutes % config.slot_minutes != 0 {
                result.add_warning(format!(
                    "Course '{}' session length {} is not a multiple of the {}-minute slot",
                    course.code, course.session_minutes, config.slot_minutes
                ));
            }
            if course.has_lab
                && course.lab_session_minutes > 0
                && course.lab_session_minutes % config.slot_minutes != 0
            {
                result.add_warning(format!(
                    "Course '{}' lab length {} is not a multiple of the {}-minute slot",
                    course.code, course.lab_session_minutes, config.slot_minutes
                ));
            }
        }
    }

    check_room_capacity(catalog, &mut result);
    check_weekly_loads(catalog, &mut result);

    if !result.is_valid() {
        return Err(anyhow::anyhow!(
            "Validation failed with {} errors:\n{}",
            result.errors.len(),
            result.errors.join("\n")
        ));
    }

    Ok(result)
}

fn check_duplicate_ids(catalog: &Catalog, result: &mut ValidationResult) {
    let mut seen = HashSet::new();
    for room in &catalog.rooms {
        if !seen.insert(room.id) {
            result.add_error(format!("Duplicate room ID: {}", room.id));
        }
    }
    let mut seen = HashSet::new();
    for course in &catalog.courses {
        if !seen.insert(course.id) {
            result.add_error(format!("Duplicate course ID: {}", course.id));
        }
    }
    let mut seen = HashSet::new();
    for group in &catalog.groups {
        if !seen.insert(group.id) {
            result.add_error(format!("Duplicate group ID: {}", group.id));
        }
    }
    let mut seen = HashSet::new();
    for lecturer in &catalog.lecturers {
        if !seen.insert(lecturer.id) {
            result.add_error(format!("Duplicate lecturer ID: {}", lecturer.id));
        }
    }
}

fn check_room_capacity(catalog: &Catalog, result: &mut ValidationResult) {
    let max_capacity = catalog.rooms.iter().map(|r| r.capacity).max().unwrap_or(0);
    for group in &catalog.groups {
        if group.size > max_capacity {
            result.add_warning(format!(
                "Group '{}' ({} students) fits in no room (largest holds {}); \
                 the largest room will be oversubscribed",
                group.name, group.size, max_capacity
            ));
        }
    }
}

/// Weekly hours a course takes from each of its lecturers and groups
fn weekly_hours_of(course: &Course) -> u32 {
    let lab_minutes = course.lab_weekly_sessions * course.lab_session_minutes;
    course.weekly_hours + if course.has_lab { lab_minutes / 60 } else { 0 }
}

fn check_weekly_loads(catalog: &Catalog, result: &mut ValidationResult) {
    let mut lecturer_hours: HashMap<LecturerId, u32> = HashMap::new();
    let mut group_hours: HashMap<GroupId, u32> = HashMap::new();

    for course in &catalog.courses {
        if course.is_project {
            continue;
        }
        let hours = weekly_hours_of(course);
        if let Some(&lid) = course.lecturers.first() {
            *lecturer_hours.entry(lid).or_insert(0) += hours;
        }
        for &gid in &course.groups {
            *group_hours.entry(gid).or_insert(0) += hours;
        }
    }

    for (lid, hours) in lecturer_hours {
        if hours > MAX_LECTURER_WEEKLY_HOURS {
            let name = catalog
                .lecturer(lid)
                .map(|l| l.name.clone())
                .unwrap_or_else(|| lid.to_string());
            result.add_warning(format!(
                "Lecturer '{}' has {} weekly hours (max: {})",
                name, hours, MAX_LECTURER_WEEKLY_HOURS
            ));
        }
    }
    for (gid, hours) in group_hours {
        if hours > MAX_GROUP_WEEKLY_HOURS {
            let name = catalog
                .group(gid)
                .map(|g| g.name.clone())
                .unwrap_or_else(|| gid.to_string());
            result.add_warning(format!(
                "Group '{}' has {} weekly hours (max: {})",
                name, hours, MAX_GROUP_WEEKLY_HOURS
            ));
        }
    }
}
