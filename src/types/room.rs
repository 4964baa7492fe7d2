use super::{Availability, GroupId, RoomId};
use serde::{Deserialize, Serialize};

/// Name prefix that marks a synthetic lab venue
pub const VIRTUAL_LAB_PREFIX: &str = "LAB-";

/// Synthetic lab room name for a group
pub fn virtual_lab_name(group: GroupId) -> String {
    format!("LAB-G{}", group)
}

/// Represents a teaching venue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub capacity: u32,
    #[serde(default)]
    pub building: Option<String>,
    /// Normalized uppercase furniture category, e.g. "LECTURE" or "LAB"
    #[serde(default)]
    pub furniture_type: Option<String>,
    /// Uppercase equipment tags, e.g. ["PROJECTOR"]
    #[serde(default)]
    pub equipment: Vec<String>,
    /// Availability windows; None means always open
    #[serde(default)]
    pub availability: Option<Availability>,
}

impl Room {
    /// Synthetic per-group lab venues are recognized by name prefix
    pub fn is_virtual_lab(&self) -> bool {
        self.name.starts_with(VIRTUAL_LAB_PREFIX)
    }
}
