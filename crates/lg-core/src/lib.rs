//! lg-core: procedural level layout generation
//!
//! Packs rooms out of overlapping rectangular sections, carves a spanning maze
//! around them, reduces the maze to a connected set of hallways, and places
//! airlocks against room walls. Generation is a pure function of the
//! configuration and the seed.
//!
//! ```
//! use lg_core::{LayoutConfig, generate_seeded};
//!
//! let layout = generate_seeded(&LayoutConfig::default(), 42).unwrap();
//! assert!(layout.is_connected());
//! ```

pub mod config;
pub mod dungeon;
pub mod error;
pub mod rng;

pub use config::{ConfigError, DecayCurve, GRID_PADDING, LayoutConfig};
pub use dungeon::{
    Airlock, CellRef, Coord, Direction, Hallway, HallwayId, Layout, LayoutStats, Rect, Room,
    RoomId, generate, generate_seeded,
};
pub use error::GenerationError;
pub use rng::LayoutRng;
