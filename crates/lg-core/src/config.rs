//! Generator configuration
//!
//! Handles the layout parameters, their derived quantities, and loading them
//! from JSON files.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Padding added around the cellular dimension on each axis
pub const GRID_PADDING: i32 = 4;

/// Errors produced while loading or validating a configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not access config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("`{field}` must be positive")]
    NonPositive { field: &'static str },

    #[error("min_sector_size ({min}) exceeds max_sector_size ({max})")]
    SectorSizeOrder { min: u32, max: u32 },

    #[error("max_sector_size ({max}) does not fit the cellular dimension ({dimension})")]
    SectorTooLarge { max: u32, dimension: i32 },

    #[error("`{field}` must lie within 0..=1, got {value}")]
    OutOfUnitRange { field: &'static str, value: f32 },

    #[error("max_room_size_scale {0} leaves no room for a single max-size sector")]
    RoomSizeScale(f32),
}

/// Sector size decay curve
///
/// Maps the consecutive-failure ratio (0..=1) to an interpolation factor
/// (0..=1) between the maximum and minimum sector size. Curves should be
/// monotonic; this is not enforced.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecayCurve {
    #[default]
    Linear,
    /// `t^exponent`; exponents below 1 shrink rooms early
    Power { exponent: f32 },
    SmoothStep,
    /// Piecewise-linear through `(t, value)` points sorted by `t`
    Piecewise { points: Vec<(f32, f32)> },
}

impl DecayCurve {
    /// Evaluate the curve, clamping both input and output to 0..=1
    pub fn sample(&self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let value = match self {
            DecayCurve::Linear => t,
            DecayCurve::Power { exponent } => t.powf(*exponent),
            DecayCurve::SmoothStep => t * t * (3.0 - 2.0 * t),
            DecayCurve::Piecewise { points } => piecewise(points, t),
        };
        if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 1.0)
        }
    }
}

fn piecewise(points: &[(f32, f32)], t: f32) -> f32 {
    let Some(&(first_t, first_v)) = points.first() else {
        return t;
    };
    if t <= first_t {
        return first_v;
    }
    for pair in points.windows(2) {
        let (t0, v0) = pair[0];
        let (t1, v1) = pair[1];
        if t <= t1 {
            if t1 <= t0 {
                return v1;
            }
            return v0 + (v1 - v0) * (t - t0) / (t1 - t0);
        }
    }
    points.last().map_or(t, |&(_, v)| v)
}

/// Layout generator parameters
///
/// All size fields are in generator cells. The generator does not validate
/// these; call [`LayoutConfig::validate`] before generating from untrusted input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Width of a hallway in world units
    pub hallway_width: u32,
    /// World scale in cell units
    pub world_scale: u32,
    /// Smallest sector side length
    pub min_sector_size: u32,
    /// Largest sector side length
    pub max_sector_size: u32,
    /// Merged rooms must stay below `max_sector_size² · max_room_size_scale` cells
    pub max_room_size_scale: f32,
    /// Minimum width of the overlap between a new sector and each room it merges into
    pub min_sector_overlap_width: u32,
    pub max_sections_per_room: u32,
    /// Probability of keeping each redundant hallway
    pub bonus_hallway_spawn_chance: f32,
    pub max_bonus_hallways: u32,
    /// 0 packs a single room, 1 keeps trying for up to 64 consecutive failures
    pub room_density: f32,
    pub sector_size_decay: DecayCurve,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            hallway_width: 1,
            world_scale: 24,
            min_sector_size: 3,
            max_sector_size: 11,
            max_room_size_scale: 2.0,
            min_sector_overlap_width: 3,
            max_sections_per_room: 3,
            bonus_hallway_spawn_chance: 0.15,
            max_bonus_hallways: 4,
            room_density: 0.6,
            sector_size_decay: DecayCurve::Linear,
        }
    }
}

impl LayoutConfig {
    /// Side length of the area rooms are packed into
    pub fn cellular_dimension(&self) -> i32 {
        (self.world_scale * (self.hallway_width + 1) + 1) as i32
    }

    /// Side length of the padded generator grid
    pub fn extent(&self) -> i32 {
        self.cellular_dimension() + GRID_PADDING
    }

    /// Consecutive placement failures after which packing stops
    pub fn max_consecutive_failures(&self) -> u32 {
        1 + (63.0 * self.room_density.clamp(0.0, 1.0)).floor() as u32
    }

    pub fn max_sector_area(&self) -> u32 {
        self.max_sector_size * self.max_sector_size
    }

    /// Exclusive upper bound on the unique cell count of a merged room
    pub fn max_room_cells(&self) -> usize {
        (self.max_sector_area() as f32 * self.max_room_size_scale).floor() as usize
    }

    /// Check the preconditions the generator relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("hallway_width", self.hallway_width),
            ("world_scale", self.world_scale),
            ("min_sector_size", self.min_sector_size),
            ("max_sector_size", self.max_sector_size),
            ("min_sector_overlap_width", self.min_sector_overlap_width),
            ("max_sections_per_room", self.max_sections_per_room),
        ];
        for (field, value) in positive {
            if value == 0 {
                return Err(ConfigError::NonPositive { field });
            }
        }

        if self.min_sector_size > self.max_sector_size {
            return Err(ConfigError::SectorSizeOrder {
                min: self.min_sector_size,
                max: self.max_sector_size,
            });
        }

        let dimension = self.cellular_dimension();
        if self.max_sector_size as i32 >= dimension {
            return Err(ConfigError::SectorTooLarge {
                max: self.max_sector_size,
                dimension,
            });
        }

        for (field, value) in [
            ("room_density", self.room_density),
            ("bonus_hallway_spawn_chance", self.bonus_hallway_spawn_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfUnitRange { field, value });
            }
        }

        // A lone max-size sector must still fit under the merged-room bound
        if self.max_room_size_scale.is_nan()
            || self.max_room_cells() <= self.max_sector_area() as usize
        {
            return Err(ConfigError::RoomSizeScale(self.max_room_size_scale));
        }

        Ok(())
    }

    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
