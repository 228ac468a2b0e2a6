//! Layout generation
//!
//! Runs the stages in order: pack rooms, carve a maze over the padded grid,
//! extract hallway candidates from the maze, reduce them to a connected set,
//! place airlocks, and assemble the result.

use log::{debug, info};

use crate::config::LayoutConfig;
use crate::error::GenerationError;
use crate::rng::LayoutRng;

use super::airlock::place_airlocks;
use super::extract::extract_hallways;
use super::layout::Layout;
use super::maze::carve_maze;
use super::packer::pack_rooms;
use super::reduce::reduce_hallways;

/// Generate a layout, drawing every random choice from `rng`
///
/// The configuration is trusted; see [`LayoutConfig::validate`].
pub fn generate(config: &LayoutConfig, rng: &mut LayoutRng) -> Result<Layout, GenerationError> {
    let extent = config.extent();
    debug!(
        "generating {}x{} layout (seed {})",
        extent,
        extent,
        rng.seed()
    );

    let packed = pack_rooms(config, rng);
    let grid = carve_maze(extent, rng);
    let candidates = extract_hallways(&grid, &packed.index);
    let hallways = reduce_hallways(&candidates, config, rng)?;
    let airlocks = place_airlocks(&packed.rooms, &hallways, extent);

    let layout = Layout::assemble(config.clone(), packed.rooms, hallways, airlocks)?;
    info!("generated layout: {}", layout.stats());
    Ok(layout)
}

/// Generate a layout from a fresh generator seeded with `seed`
pub fn generate_seeded(config: &LayoutConfig, seed: u64) -> Result<Layout, GenerationError> {
    generate(config, &mut LayoutRng::new(seed))
}
