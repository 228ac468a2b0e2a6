//! Layout generation pipeline
//!
//! Contains the cell and room model, the generation stages, and the finished
//! layout they produce.

mod airlock;
mod cell;
mod extract;
mod generation;
mod hallway;
mod layout;
mod maze;
mod packer;
mod rect;
mod reduce;
mod room;

pub use airlock::{Airlock, place_airlocks};
pub use cell::{CellRef, Coord, Direction};
pub use extract::{extract_hallways, find_doors, flood_fill, linked_rooms};
pub use generation::{generate, generate_seeded};
pub use hallway::{Hallway, HallwayId, find_route};
pub use layout::{Layout, LayoutStats};
pub use maze::{CarvedGrid, carve_maze};
pub use packer::{PackedRooms, Rejection, RoomPacker, pack_rooms};
pub use rect::Rect;
pub use reduce::reduce_hallways;
pub use room::{Room, RoomArena, RoomId};
