//! Slither Runtime
//!
//! Binary that loads settings, opens the window and runs the game loop

mod app;
mod game;

use anyhow::{Context, Result};
use slither_services::settings::{Settings, SETTINGS_FILE};
use std::path::Path;
use tracing_subscriber::EnvFilter;
use winit::event_loop::{ControlFlow, EventLoop};

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Slither v{}", slither_core::VERSION);

    let settings = Settings::load_or_default(Path::new(SETTINGS_FILE))?;
    let game = game::Game::new(&settings.game).context("failed to set up the arena")?;

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = app::App::new(settings, game);
    event_loop.run_app(&mut app).context("event loop terminated abnormally")?;

    match app.into_error() {
        Some(err) => Err(err),
        None => {
            tracing::info!("Shutdown complete");
            Ok(())
        }
    }
}
