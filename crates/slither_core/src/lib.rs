//! Slither Core
//!
//! Everything the snake simulation needs, free of windowing and GPU code:
//! - Archetype Entity Component System (ECS)
//! - Components and rectangle collision
//! - Movement, collision and candy-spawn systems plus their schedule
//! - Frame clocks, deterministic RNG and game configuration

pub mod collision;
pub mod color;
pub mod components;
pub mod config;
pub mod ecs;
pub mod game;
pub mod input;
pub mod math;
pub mod state;
pub mod systems;
pub mod time;

pub use config::GameConfig;
pub use glam;

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
