use serde::{Deserialize, Serialize};

/// Whether a session is a lecture or a lab block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionKind {
    Lecture,
    Lab,
}

impl SessionKind {
    pub fn is_lab(&self) -> bool {
        matches!(self, SessionKind::Lab)
    }
}

/// Venue requirements attached to a course's lecture or lab sessions.
///
/// Matching is case-insensitive: both sides are compared uppercased.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Requirements {
    #[serde(default)]
    pub furniture_type: Option<String>,
    #[serde(default)]
    pub equipment: Vec<String>,
}

impl Requirements {
    /// Furniture matches when no requirement is set, or the room's type equals it
    pub fn furniture_matches(&self, room_furniture: Option<&str>) -> bool {
        match self.furniture_type.as_deref() {
            None | Some("") => true,
            Some(required) => room_furniture
                .map(|have| have.eq_ignore_ascii_case(required))
                .unwrap_or(false),
        }
    }

    /// All required equipment tags appear in the room's equipment set
    pub fn equipment_subset_of(&self, room_equipment: &[String]) -> bool {
        self.equipment.iter().all(|needed| {
            room_equipment
                .iter()
                .any(|have| have.eq_ignore_ascii_case(needed))
        })
    }

    /// Full requirement match against a room's furniture and equipment
    pub fn satisfied_by(&self, room_furniture: Option<&str>, room_equipment: &[String]) -> bool {
        self.furniture_matches(room_furniture) && self.equipment_subset_of(room_equipment)
    }
}
