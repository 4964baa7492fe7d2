use super::{CourseId, GroupId, LecturerId, Requirements};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Course code pattern whose trailing digits encode the study year, e.g. "CSE 3001"
fn code_year_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Z]{2,}\s*-?\s*(\d{4})$").unwrap())
}

/// Represents a course offering with its lecture and lab configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub department: Option<String>,

    /// Total lecture hours per week
    pub weekly_hours: u32,
    /// Duration of one lecture session in minutes
    #[serde(default = "default_session_minutes")]
    pub session_minutes: u32,
    /// Venue requirements for lecture sessions
    #[serde(default)]
    pub requirements: Requirements,
    /// Capstone/project courses are not assigned venues by the solver
    #[serde(default)]
    pub is_project: bool,

    #[serde(default)]
    pub has_lab: bool,
    /// Number of lab sessions per week
    #[serde(default)]
    pub lab_weekly_sessions: u32,
    /// Duration of each lab session in minutes; 0 means three base slots
    #[serde(default)]
    pub lab_session_minutes: u32,
    /// Venue requirements for lab sessions
    #[serde(default)]
    pub lab_requirements: Requirements,

    #[serde(default)]
    pub groups: Vec<GroupId>,
    #[serde(default)]
    pub lecturers: Vec<LecturerId>,
}

fn default_session_minutes() -> u32 {
    60
}

impl Course {
    /// Year level hinted by the course code (2xxx..5xxx schemes), if any.
    ///
    /// Groups whose year is set and disagrees with the hint are dropped
    /// for this course at session expansion.
    pub fn year_hint(&self) -> Option<u8> {
        let code = self.code.trim().to_uppercase();
        let captures = code_year_pattern().captures(&code)?;
        let digits = captures.get(1)?.as_str();
        match digits.as_bytes().first().map(|&b| b - b'0') {
            Some(y @ 1..=5) => Some(y),
            _ => None,
        }
    }

    /// First listed lecturer takes the course's sessions
    pub fn primary_lecturer(&self) -> Option<LecturerId> {
        self.lecturers.first().copied()
    }

    /// Number of lecture sessions per attached group, rounding minutes up
    pub fn lecture_sessions_per_group(&self) -> u32 {
        if self.weekly_hours == 0 || self.session_minutes == 0 {
            return 0;
        }
        let minutes_needed = self.weekly_hours * 60;
        minutes_needed.div_ceil(self.session_minutes).max(1)
    }
}
