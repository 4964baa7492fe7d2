use crate::catalog::{CatalogStore, NewRoom};
use crate::error::Result;
use crate::types::{virtual_lab_name, GroupId, Session, StudentGroup};
use itertools::Itertools;
use log::info;
use std::collections::HashMap;

/// Fallback capacity for a synthetic lab room when the group size is unknown
const DEFAULT_LAB_CAPACITY: u32 = 1000;

/// Ensure a synthetic `LAB-G<gid>` room exists for every group with at
/// least one lab session.
///
/// Lab rooms carry furniture type LAB, no equipment and no availability
/// windows (always open). They are persisted through the store so later
/// solves reuse them. Returns the number of rooms created.
pub fn ensure_lab_rooms(
    store: &mut dyn CatalogStore,
    sessions: &[Session],
    groups: &[StudentGroup],
) -> Result<usize> {
    let lab_groups: Vec<GroupId> = sessions
        .iter()
        .filter(|s| s.is_lab())
        .map(|s| s.group_id)
        .unique()
        .sorted()
        .collect();

    if lab_groups.is_empty() {
        return Ok(0);
    }

    let group_sizes: HashMap<GroupId, u32> = groups.iter().map(|g| (g.id, g.size)).collect();
    let existing = store.snapshot()?;
    let mut created = 0;

    for gid in lab_groups {
        let name = virtual_lab_name(gid);
        if existing.room_by_name(&name).is_some() {
            continue;
        }
        let capacity = match group_sizes.get(&gid) {
            Some(&size) if size > 0 => size,
            _ => DEFAULT_LAB_CAPACITY,
        };
        store.create_room(NewRoom {
            name,
            capacity,
            furniture_type: Some("LAB".to_string()),
            equipment: vec![],
            availability: None,
        })?;
        created += 1;
    }

    if created > 0 {
        info!("Created {} virtual lab rooms", created);
    }
    Ok(created)
}
