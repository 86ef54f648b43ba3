//! Game rules and arena geometry

use serde::{Deserialize, Serialize};

/// Tunables for one game session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub arena_width: f32,
    pub arena_height: f32,
    /// Player speed in arena units per second.
    pub movement_speed: f32,
    /// Edge length of the head, each body segment and each candy.
    pub segment_size: f32,
    pub border_thickness: f32,
    pub max_candies: u32,
    pub player_start: [f32; 2],
    pub rng_seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena_width: 600.0,
            arena_height: 600.0,
            movement_speed: 90.0,
            segment_size: 20.0,
            border_thickness: 20.0,
            max_candies: 5,
            player_start: [200.0, 200.0],
            rng_seed: 0x5EED,
        }
    }
}

impl GameConfig {
    /// Number of segment-sized cells that fit between the borders along
    /// each axis.
    pub fn playable_cells(&self) -> (u32, u32) {
        let cells = |extent: f32| {
            let inner = extent - 2.0 * self.border_thickness;
            if inner <= 0.0 || self.segment_size <= 0.0 {
                0
            } else {
                (inner / self.segment_size).floor() as u32
            }
        };
        (cells(self.arena_width), cells(self.arena_height))
    }
}
