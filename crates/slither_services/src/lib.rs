//! Slither Services Layer
//!
//! Host-side services the simulation consumes: settings and keyboard state.

pub mod input;
pub mod settings;

pub use input::KeyboardState;
pub use settings::{Settings, SettingsError, WindowSettings};
