use super::{CourseId, GroupId, LecturerId, Requirements, SessionKind};
use serde::{Deserialize, Serialize};

/// One atomic teaching occurrence awaiting a (room, start-slot) placement.
///
/// A session binds exactly one group and one lecturer; its duration must be
/// a whole multiple of the base slot length to be placeable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub course_id: CourseId,
    pub group_id: GroupId,
    pub lecturer_id: LecturerId,
    pub minutes: u32,
    pub requirements: Requirements,
    pub kind: SessionKind,
}

impl Session {
    pub fn is_lab(&self) -> bool {
        self.kind.is_lab()
    }
}
