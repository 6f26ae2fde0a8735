//! Browser runner
//!
//! Renders into the `#canvas` element. The scene comes from the URL hash
//! (`#meteors`, `#bench`, ...), falling back to the saved settings.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

use super::{screen_to_world, time_seed};
use crate::App;
use crate::consts::SIM_DT;
use crate::input::Key;
use crate::renderer::{RenderState, draw};
use crate::settings::Settings;
use crate::sim::SceneKind;

/// Browser-side state around the app
struct Lab {
    app: App,
    render_state: Option<RenderState>,
    last_time: f64,
    stopped: bool,
}

impl Lab {
    fn frame(&mut self, time: f64) {
        let dt = if self.last_time > 0.0 {
            ((time - self.last_time) / 1000.0) as f32
        } else {
            SIM_DT
        };
        self.last_time = time;

        let outcome = self.app.frame(dt, time);
        if outcome.quit {
            log::info!("Quit requested, stopping.");
            self.stopped = true;
            return;
        }

        let vertices = draw::frame(&self.app);
        let clear = !self.app.trippy();
        if let Some(render_state) = self.render_state.as_mut() {
            match render_state.render(&vertices, clear) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    render_state.reconfigure();
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }
    }
}

/// Scene named by the page's URL hash, if any
fn scene_from_hash(window: &web_sys::Window) -> Option<SceneKind> {
    let hash = window.location().hash().ok()?;
    SceneKind::from_str(hash.trim_start_matches('#'))
}

pub async fn run() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

    let window = web_sys::window().expect("no window");
    let document = window.document().expect("no document");

    let canvas: HtmlCanvasElement = document
        .get_element_by_id("canvas")
        .expect("no canvas")
        .dyn_into()
        .expect("not a canvas");

    let settings = Settings::load();
    let kind = scene_from_hash(&window).unwrap_or(settings.scene);
    let seed = settings.seed.unwrap_or_else(time_seed);
    document.set_title(kind.title());

    // Backing store at device resolution
    let dpr = window.device_pixel_ratio();
    let width = ((canvas.client_width() as f64 * dpr) as u32).max(1);
    let height = ((canvas.client_height() as f64 * dpr) as u32).max(1);
    canvas.set_width(width);
    canvas.set_height(height);

    let vsync = settings.vsync;
    let app = App::new(kind, seed, settings);
    let world = app.scene.bounds;
    let lab = Rc::new(RefCell::new(Lab {
        app,
        render_state: None,
        last_time: 0.0,
        stopped: false,
    }));

    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
        ..Default::default()
    });

    let surface = instance
        .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
        .expect("Failed to create surface");

    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        })
        .await
        .expect("Failed to get adapter");

    log::info!("Using adapter: {:?}", adapter.get_info().name);

    let render_state = RenderState::new(surface, &adapter, width, height, world, vsync).await;
    lab.borrow_mut().render_state = Some(render_state);

    setup_input_handlers(&canvas, lab.clone());
    request_animation_frame(lab);
}

fn setup_input_handlers(canvas: &HtmlCanvasElement, lab: Rc<RefCell<Lab>>) {
    // Keyboard
    {
        let lab = lab.clone();
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if let Some(key) = Key::from_dom(&event.key()) {
                // Keep F1, Space and Backspace away from the browser
                event.prevent_default();
                lab.borrow_mut().app.key(key);
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Left click
    {
        let lab = lab.clone();
        let target = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            if event.button() != 0 {
                return;
            }
            let mut lab = lab.borrow_mut();
            let world = lab.app.scene.bounds;
            let point = screen_to_world(
                event.offset_x() as f32,
                event.offset_y() as f32,
                (target.client_width() as f32, target.client_height() as f32),
                &world,
            );
            lab.app.click(point);
        });
        let _ = canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

fn request_animation_frame(lab: Rc<RefCell<Lab>>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let closure = Closure::once(move |time: f64| {
        lab_loop(lab, time);
    });
    let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
    closure.forget();
}

fn lab_loop(lab: Rc<RefCell<Lab>>, time: f64) {
    {
        let mut lab = lab.borrow_mut();
        lab.frame(time);
        if lab.stopped {
            return;
        }
    }
    request_animation_frame(lab);
}
