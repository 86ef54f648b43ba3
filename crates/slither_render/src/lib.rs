//! Slither Render System
//!
//! Draws the world through the [`Renderer`] trait. [`DrawSystem`] turns
//! components into draw calls; [`QuadBatch`] and [`QuadRenderer`] put them
//! on screen with wgpu.

pub mod backend;
pub mod draw;
pub mod error;
pub mod renderer;
pub mod window;

pub use backend::{QuadBatch, QuadRenderer, Vertex};
pub use draw::DrawSystem;
pub use error::RenderError;
pub use renderer::{DrawCommand, DrawList, Renderer};
pub use window::{window_attributes, WindowConfig};

pub use wgpu;
pub use winit;
