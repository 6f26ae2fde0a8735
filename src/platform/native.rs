//! Native window via winit.
//!
//! Implements [`winit::application::ApplicationHandler`]: creates the window
//! and GPU surface on resume, forwards keys and clicks to the [`App`], and
//! runs one frame per redraw.

use std::sync::Arc;
use std::time::Instant;

use glam::Vec2;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use super::screen_to_world;
use crate::App;
use crate::input::Key;
use crate::renderer::{RenderState, draw};

/// Map a physical key to a lab key
pub fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Escape => Some(Key::Escape),
        KeyCode::Space => Some(Key::Space),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::F1 => Some(Key::F1),
        KeyCode::F2 => Some(Key::F2),
        KeyCode::KeyT => Some(Key::T),
        KeyCode::KeyP => Some(Key::P),
        _ => None,
    }
}

/// The state winit drives
pub struct NativeRunner {
    app: App,
    window: Option<Arc<Window>>,
    render_state: Option<RenderState>,
    started: Instant,
    last_frame: Option<Instant>,
    /// Cursor in physical pixels, origin top-left
    cursor: Vec2,
}

impl NativeRunner {
    pub fn new(app: App) -> Self {
        Self {
            app,
            window: None,
            render_state: None,
            started: Instant::now(),
            last_frame: None,
            cursor: Vec2::ZERO,
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let dt = self
            .last_frame
            .map(|last| now.duration_since(last).as_secs_f32())
            .unwrap_or(crate::consts::SIM_DT);
        self.last_frame = Some(now);
        let now_ms = now.duration_since(self.started).as_secs_f64() * 1000.0;

        let outcome = self.app.frame(dt, now_ms);
        if outcome.quit {
            log::info!("Quit requested, exiting.");
            event_loop.exit();
            return;
        }

        let Some(render_state) = self.render_state.as_mut() else {
            return;
        };
        let vertices = draw::frame(&self.app);
        match render_state.render(&vertices, !self.app.trippy()) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                render_state.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of GPU memory!");
                event_loop.exit();
            }
            Err(e) => {
                log::warn!("Surface error: {:?}", e);
            }
        }
    }
}

impl ApplicationHandler for NativeRunner {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let world = self.app.scene.bounds;
        let scale = self.app.settings.window_scale;
        let attrs = Window::default_attributes()
            .with_title(self.app.scene.kind.title())
            .with_inner_size(winit::dpi::LogicalSize::new(
                world.width * scale,
                world.height * scale,
            ));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .expect("Failed to create window"),
        );

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance
            .create_surface(window.clone())
            .expect("Failed to create surface");
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("Failed to get adapter");
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let size = window.inner_size();
        let render_state = pollster::block_on(RenderState::new(
            surface,
            &adapter,
            size.width.max(1),
            size.height.max(1),
            world,
            self.app.settings.vsync,
        ));

        self.render_state = Some(render_state);
        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Window close requested, exiting.");
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(render_state) = self.render_state.as_mut() {
                    render_state.resize(size.width, size.height);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed && !event.repeat {
                    if let PhysicalKey::Code(code) = event.physical_key {
                        if let Some(key) = map_key(code) {
                            self.app.key(key);
                        }
                    }
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vec2::new(position.x as f32, position.y as f32);
            }

            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: ElementState::Pressed,
                ..
            } => {
                if let Some(window) = &self.window {
                    let size = window.inner_size();
                    let point = screen_to_world(
                        self.cursor.x,
                        self.cursor.y,
                        (size.width as f32, size.height as f32),
                        &self.app.scene.bounds,
                    );
                    self.app.click(point);
                }
            }

            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

/// Open a window and run `app` until it quits
pub fn run(app: App) -> Result<(), winit::error::EventLoopError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut runner = NativeRunner::new(app);
    event_loop.run_app(&mut runner)
}
