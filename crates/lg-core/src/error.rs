//! Generation errors
//!
//! Every variant here is an internal invariant violation: the bookkeeping of
//! rooms, hallways or cells has been corrupted and the layout cannot be trusted.
//! Malformed configuration is not reported here; see [`crate::ConfigError`].

use thiserror::Error;

use crate::dungeon::{Coord, HallwayId};

/// Fatal errors that abort a layout generation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("hallway {hallway} has no path to its door at {door}")]
    UnreachableDoor { hallway: HallwayId, door: Coord },

    #[error("{remaining} room(s) could not be connected by any hallway candidate")]
    DisconnectedRooms { remaining: usize },

    #[error("cell {cell} is claimed twice")]
    CellConflict { cell: Coord },
}
