use super::GroupId;
use serde::{Deserialize, Serialize};

/// Represents a cohort of students scheduled together
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentGroup {
    pub id: GroupId,
    pub name: String,
    pub size: u32,
    /// Study year (2..=5); general-stream groups may leave it unset
    #[serde(default)]
    pub year: Option<u8>,
    /// Owning department, e.g. GEN, AEN, CEE, EEE, MEC
    #[serde(default)]
    pub department: Option<String>,
    /// Year-2 lecture stream split (LG1/LG2); affects exports, not solving
    #[serde(default)]
    pub lecture_group: Option<String>,
    /// Lab/tutorial subgroup letter
    #[serde(default)]
    pub subgroup: Option<String>,
    /// Specialization track for years 4-5
    #[serde(default)]
    pub track: Option<String>,
}

impl StudentGroup {
    /// Year-5 groups reserve Friday for project work
    pub fn is_project_year(&self) -> bool {
        self.year == Some(5)
    }
}
