//! winit application handler

use crate::game::Game;
use anyhow::{Context, Error};
use slither_core::color::Color;
use slither_core::components::PlayerControlled;
use slither_core::input::Direction;
use slither_metrics::FrameTimer;
use slither_render::{window_attributes, QuadBatch, QuadRenderer, RenderError, WindowConfig};
use slither_services::{KeyboardState, Settings};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

const FPS_LOG_INTERVAL: u64 = 300;
const PROFILED_SYSTEMS: [&str; 3] = ["movement", "collision", "candy_spawn"];

pub struct App {
    settings: Settings,
    game: Game,
    keyboard: KeyboardState,
    batch: QuadBatch,
    frame_timer: FrameTimer,
    window: Option<Arc<Window>>,
    renderer: Option<QuadRenderer>,
    error: Option<Error>,
}

impl App {
    pub fn new(settings: Settings, game: Game) -> Self {
        let batch = QuadBatch::new(settings.game.arena_width, settings.game.arena_height);
        Self {
            settings,
            game,
            keyboard: KeyboardState::new(),
            batch,
            frame_timer: FrameTimer::new(120),
            window: None,
            renderer: None,
            error: None,
        }
    }

    /// The error that stopped the event loop, if any.
    pub fn into_error(self) -> Option<Error> {
        self.error
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: Error) {
        error!("{err:#}");
        self.error = Some(err);
        event_loop.exit();
    }

    fn open_window(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let config = WindowConfig {
            title: self.settings.window.title.clone(),
            width: self.settings.window.width,
            height: self.settings.window.height,
        };
        let window = Arc::new(
            event_loop
                .create_window(window_attributes(&config))
                .context("failed to create window")?,
        );
        let renderer = pollster::block_on(QuadRenderer::new(Arc::clone(&window)))
            .context("failed to initialise renderer")?;

        info!(title = %config.title, width = config.width, height = config.height, "window opened");
        self.window = Some(window);
        self.renderer = Some(renderer);
        Ok(())
    }

    fn on_key(&mut self, event: &KeyEvent) {
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };
        let pressed = event.state == ElementState::Pressed;

        if let Some(direction) = direction_for(code) {
            if pressed {
                self.keyboard.press(direction);
            } else {
                self.keyboard.release(direction);
            }
        } else if pressed && !event.repeat && matches!(code, KeyCode::KeyP | KeyCode::Escape) {
            self.game.toggle_pause();
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        self.batch.clear();
        if let Err(err) = self.game.frame(&self.keyboard, &mut self.batch) {
            self.fail(event_loop, err.context("simulation tick failed"));
            return;
        }

        if let Some(renderer) = self.renderer.as_mut() {
            match renderer.present(&self.batch, Color::AMBER) {
                Ok(()) => {}
                Err(RenderError::Surface(wgpu_error)) if is_out_of_memory(&wgpu_error) => {
                    self.fail(event_loop, Error::new(RenderError::Surface(wgpu_error)));
                    return;
                }
                Err(err) => warn!(%err, "frame dropped"),
            }
        }

        self.frame_timer.tick();
        if self.frame_timer.frames() > 0 && self.frame_timer.frames() % FPS_LOG_INTERVAL == 0 {
            self.log_stats();
        }
    }

    fn log_stats(&self) {
        let world = self.game.world();
        let length = world
            .get::<PlayerControlled>(self.game.player())
            .map_or(0, |player| player.body.len());
        let (min_ms, max_ms) = self.frame_timer.frame_time_range_ms();
        info!(
            fps = self.frame_timer.fps(),
            frame_ms = self.frame_timer.frame_time_ms(),
            min_ms,
            max_ms,
            entities = world.entity_count(),
            snake_length = length,
            ticks = self.game.counter().get("ticks"),
            elapsed_s = self.game.time().elapsed_seconds(),
            "frame stats"
        );
        let profiler = self.game.profiler();
        for name in PROFILED_SYSTEMS {
            debug!(
                system = name,
                last_us = profiler.last(name).as_micros() as u64,
                calls = profiler.calls(name),
                "system timing"
            );
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.open_window(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("close requested");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(size.width, size.height);
                }
            }
            WindowEvent::Focused(false) => self.keyboard.clear(),
            WindowEvent::KeyboardInput { event, .. } => self.on_key(&event),
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Arrow keys and WASD steer the snake.
fn direction_for(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::ArrowUp | KeyCode::KeyW => Some(Direction::Up),
        KeyCode::ArrowDown | KeyCode::KeyS => Some(Direction::Down),
        KeyCode::ArrowLeft | KeyCode::KeyA => Some(Direction::Left),
        KeyCode::ArrowRight | KeyCode::KeyD => Some(Direction::Right),
        _ => None,
    }
}

fn is_out_of_memory(err: &slither_render::wgpu::SurfaceError) -> bool {
    matches!(err, slither_render::wgpu::SurfaceError::OutOfMemory)
}
