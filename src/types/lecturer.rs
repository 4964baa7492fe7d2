use super::{Availability, LecturerId};
use serde::{Deserialize, Serialize};

/// Represents a lecturer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lecturer {
    pub id: LecturerId,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    /// Maximum teaching minutes per day; informational, checked by catalog validation
    #[serde(default)]
    pub max_daily_load: Option<u32>,
    /// Availability windows; None means always open
    #[serde(default)]
    pub availability: Option<Availability>,
}
