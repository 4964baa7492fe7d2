use super::{Catalog, CatalogStore, NewRoom};
use crate::error::{Result, TimetableError};
use crate::types::{Room, RoomId, TimeOfDay, TimetableEvent, Version, VersionId};
use std::collections::HashSet;

/// In-memory catalog backend.
///
/// Mirrors the uniqueness guarantees a relational store would enforce:
/// within a version, one event per (room, day, start), (lecturer, day,
/// start) and (group, day, start). A colliding batch is rejected whole,
/// the last line of defense against concurrent interactive writes.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    catalog: Catalog,
    versions: Vec<Version>,
    events: Vec<TimetableEvent>,
    next_room_id: u32,
    next_version_id: u32,
}

type SlotKey = (u32, u32, String, TimeOfDay);

impl InMemoryCatalog {
    pub fn new(catalog: Catalog) -> Self {
        let next_room_id = catalog.rooms.iter().map(|r| r.id.0 + 1).max().unwrap_or(1);
        Self {
            catalog,
            versions: Vec::new(),
            events: Vec::new(),
            next_room_id,
            next_version_id: 1,
        }
    }

    pub fn events(&self) -> &[TimetableEvent] {
        &self.events
    }

    fn slot_indices(&self) -> (HashSet<SlotKey>, HashSet<SlotKey>, HashSet<SlotKey>) {
        let mut rooms = HashSet::new();
        let mut lecturers = HashSet::new();
        let mut groups = HashSet::new();
        for e in &self.events {
            rooms.insert((e.version_id.0, e.room_id.0, e.day.clone(), e.start));
            lecturers.insert((e.version_id.0, e.lecturer_id.0, e.day.clone(), e.start));
            groups.insert((e.version_id.0, e.group_id.0, e.day.clone(), e.start));
        }
        (rooms, lecturers, groups)
    }
}

impl CatalogStore for InMemoryCatalog {
    fn snapshot(&self) -> Result<Catalog> {
        Ok(self.catalog.clone())
    }

    fn create_room(&mut self, room: NewRoom) -> Result<Room> {
        let created = Room {
            id: RoomId(self.next_room_id),
            name: room.name,
            capacity: room.capacity,
            building: None,
            furniture_type: room.furniture_type,
            equipment: room.equipment,
            availability: room.availability,
        };
        self.next_room_id += 1;
        self.catalog.rooms.push(created.clone());
        Ok(created)
    }

    fn create_version(&mut self, name: &str) -> Result<Version> {
        let version = Version {
            id: VersionId(self.next_version_id),
            name: name.to_string(),
            created_at: chrono::Utc::now(),
        };
        self.next_version_id += 1;
        self.versions.push(version.clone());
        Ok(version)
    }

    fn latest_version(&self) -> Result<Option<Version>> {
        Ok(self.versions.last().cloned())
    }

    fn events_for_version(&self, version: VersionId) -> Result<Vec<TimetableEvent>> {
        if !self.versions.iter().any(|v| v.id == version) {
            return Err(TimetableError::UnknownVersion(version.0).into());
        }
        Ok(self
            .events
            .iter()
            .filter(|e| e.version_id == version)
            .cloned()
            .collect())
    }

    fn commit_events(&mut self, events: Vec<TimetableEvent>) -> Result<()> {
        let (mut rooms, mut lecturers, mut groups) = self.slot_indices();

        // Validate the whole batch before touching the store
        for e in &events {
            if !rooms.insert((e.version_id.0, e.room_id.0, e.day.clone(), e.start)) {
                return Err(TimetableError::EventCollision {
                    index: "(room, day, start)",
                    day: e.day.clone(),
                    start: e.start.to_string(),
                }
                .into());
            }
            if !lecturers.insert((e.version_id.0, e.lecturer_id.0, e.day.clone(), e.start)) {
                return Err(TimetableError::EventCollision {
                    index: "(lecturer, day, start)",
                    day: e.day.clone(),
                    start: e.start.to_string(),
                }
                .into());
            }
            if !groups.insert((e.version_id.0, e.group_id.0, e.day.clone(), e.start)) {
                return Err(TimetableError::EventCollision {
                    index: "(group, day, start)",
                    day: e.day.clone(),
                    start: e.start.to_string(),
                }
                .into());
            }
        }

        self.events.extend(events);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CourseId, GroupId, LecturerId};

    fn event(room: u32, group: u32, day: &str, start_hour: u32) -> TimetableEvent {
        TimetableEvent {
            course_id: CourseId(1),
            room_id: RoomId(room),
            group_id: GroupId(group),
            lecturer_id: LecturerId(1),
            day: day.to_string(),
            start: TimeOfDay::new(start_hour, 0).unwrap(),
            end: TimeOfDay::new(start_hour + 1, 0).unwrap(),
            version_id: VersionId(1),
        }
    }

    #[test]
    fn test_versions_are_monotonic() {
        let mut store = InMemoryCatalog::new(Catalog::default());
        let v1 = store.create_version("draft").unwrap();
        let v2 = store.create_version("final").unwrap();
        assert!(v2.id.0 > v1.id.0);
        assert_eq!(store.latest_version().unwrap().unwrap().id, v2.id);
    }

    #[test]
    fn test_commit_rejects_room_collision_atomically() {
        let mut store = InMemoryCatalog::new(Catalog::default());
        store.create_version("v").unwrap();
        store.commit_events(vec![event(1, 1, "Mon", 8)]).unwrap();

        // Second batch collides on (room, day, start); groups differ
        let result = store.commit_events(vec![event(2, 2, "Mon", 9), event(1, 3, "Mon", 8)]);
        assert!(result.is_err());
        // Nothing from the failed batch landed
        assert_eq!(store.events().len(), 1);
    }

    #[test]
    fn test_indices_are_scoped_per_version() {
        let mut store = InMemoryCatalog::new(Catalog::default());
        store.commit_events(vec![event(1, 1, "Mon", 8)]).unwrap();

        // Same slot in a different version is a fresh solve, not a collision
        let mut next = event(1, 1, "Mon", 8);
        next.version_id = VersionId(2);
        store.commit_events(vec![next]).unwrap();
        assert_eq!(store.events().len(), 2);
    }

    #[test]
    fn test_commit_rejects_collision_within_batch() {
        let mut store = InMemoryCatalog::new(Catalog::default());
        let result = store.commit_events(vec![event(1, 1, "Mon", 8), event(1, 2, "Mon", 8)]);
        assert!(result.is_err());
        assert!(store.events().is_empty());
    }

    #[test]
    fn test_create_room_assigns_fresh_ids() {
        let mut store = InMemoryCatalog::new(Catalog::default());
        let room = store
            .create_room(NewRoom {
                name: "LAB-G1".to_string(),
                capacity: 40,
                furniture_type: Some("LAB".to_string()),
                equipment: vec![],
                availability: None,
            })
            .unwrap();
        let next = store
            .create_room(NewRoom {
                name: "LAB-G2".to_string(),
                capacity: 30,
                furniture_type: Some("LAB".to_string()),
                equipment: vec![],
                availability: None,
            })
            .unwrap();
        assert_ne!(room.id, next.id);
        assert_eq!(store.snapshot().unwrap().rooms.len(), 2);
    }
}
