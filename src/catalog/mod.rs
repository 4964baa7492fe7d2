mod memory;

pub use memory::*;

use crate::error::Result;
use crate::types::{
    Availability, Course, CourseId, GroupId, Lecturer, LecturerId, Room, RoomId, StudentGroup,
    TimetableEvent, Version, VersionId,
};

/// A consistent read snapshot of the catalog, taken before variable creation
/// and never revalidated during a solve.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub rooms: Vec<Room>,
    pub courses: Vec<Course>,
    pub groups: Vec<StudentGroup>,
    pub lecturers: Vec<Lecturer>,
}

impl Catalog {
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub fn course(&self, id: CourseId) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    pub fn group(&self, id: GroupId) -> Option<&StudentGroup> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn lecturer(&self, id: LecturerId) -> Option<&Lecturer> {
        self.lecturers.iter().find(|l| l.id == id)
    }

    /// Case-insensitive room lookup by name
    pub fn room_by_name(&self, name: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.name.eq_ignore_ascii_case(name))
    }
}

/// A room to be created by the store, which assigns the id
#[derive(Debug, Clone)]
pub struct NewRoom {
    pub name: String,
    pub capacity: u32,
    pub furniture_type: Option<String>,
    pub equipment: Vec<String>,
    pub availability: Option<Availability>,
}

/// Read and write surface the solver needs from a catalog backend.
///
/// Reads happen once per solve (snapshot semantics). The only writes that
/// precede variable creation are synthetic lab rooms; committed events are
/// written in bulk under a freshly minted version id.
pub trait CatalogStore {
    fn snapshot(&self) -> Result<Catalog>;

    fn create_room(&mut self, room: NewRoom) -> Result<Room>;

    fn create_version(&mut self, name: &str) -> Result<Version>;

    fn latest_version(&self) -> Result<Option<Version>>;

    fn events_for_version(&self, version: VersionId) -> Result<Vec<TimetableEvent>>;

    /// Insert a batch atomically; any uniqueness collision rejects the whole batch
    fn commit_events(&mut self, events: Vec<TimetableEvent>) -> Result<()>;
}
