//! Window management
//!
//! Window creation via winit

use winit::window::{Window, WindowAttributes};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Snake".to_string(),
            width: 600,
            height: 600,
        }
    }
}

/// Create window attributes from config
///
/// In winit 0.30+ the window itself must be created inside the
/// `ApplicationHandler::resumed` callback.
pub fn window_attributes(config: &WindowConfig) -> WindowAttributes {
    Window::default_attributes()
        .with_title(config.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height))
        .with_resizable(true)
}
