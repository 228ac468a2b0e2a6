//! Rooms and the arena that owns them during packing
//!
//! A room is an ordered list of possibly overlapping sections. Merging never
//! mutates a room: the arena allocates a fresh handle holding every absorbed
//! section and retires the old handles, so stale ids can be detected instead
//! of silently aliasing the merged room.

use core::fmt;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::cell::Coord;
use super::rect::Rect;

/// Stable room handle
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct RoomId(pub u32);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "room#{}", self.0)
    }
}

/// A room made of one or more rectangular sections
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Room {
    id: RoomId,
    sections: Vec<Rect>,
    /// Union of all section cells
    #[serde(skip)]
    cells: BTreeSet<Coord>,
}

impl Room {
    pub fn new(id: RoomId, sections: Vec<Rect>) -> Self {
        let cells = sections.iter().flat_map(Rect::cells).collect();
        Self {
            id,
            sections,
            cells,
        }
    }

    pub fn id(&self) -> RoomId {
        self.id
    }

    pub fn sections(&self) -> &[Rect] {
        &self.sections
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Unique occupied cells
    pub fn cells(&self) -> &BTreeSet<Coord> {
        &self.cells
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, c: Coord) -> bool {
        self.cells.contains(&c)
    }

    /// Widest overlap between `rect` and any single section of this room
    pub fn overlap_width(&self, rect: &Rect) -> i32 {
        self.sections
            .iter()
            .map(|s| s.overlap_width(rect))
            .max()
            .unwrap_or(0)
    }
}

/// Owns every room created during packing, live or superseded
#[derive(Debug, Clone, Default)]
pub struct RoomArena {
    rooms: Vec<Room>,
    retired: Vec<bool>,
}

impl RoomArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh room holding the given sections
    pub fn alloc(&mut self, sections: Vec<Rect>) -> RoomId {
        let id = RoomId(self.rooms.len() as u32);
        self.rooms.push(Room::new(id, sections));
        self.retired.push(false);
        id
    }

    pub fn get(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id.0 as usize)
    }

    pub fn is_live(&self, id: RoomId) -> bool {
        self.retired.get(id.0 as usize).is_some_and(|r| !r)
    }

    /// Replace `absorbed` rooms with one new room containing all their
    /// sections followed by `extra`. Returns the new handle.
    pub fn merge(&mut self, absorbed: &BTreeSet<RoomId>, extra: Rect) -> RoomId {
        let mut sections = Vec::new();
        for &id in absorbed {
            if let Some(room) = self.get(id) {
                sections.extend_from_slice(room.sections());
            }
            if let Some(flag) = self.retired.get_mut(id.0 as usize) {
                *flag = true;
            }
        }
        sections.push(extra);
        self.alloc(sections)
    }

    /// Consume the arena, keeping live rooms in id order
    pub fn into_live(self) -> Vec<Room> {
        self.rooms
            .into_iter()
            .zip(self.retired)
            .filter(|(_, retired)| !retired)
            .map(|(room, _)| room)
            .collect()
    }
}
