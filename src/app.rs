//! Frame driver shared by the native and web runners
//!
//! Feeds real frame time into a fixed-step accumulator, applies queued
//! input actions between frames and keeps the frame statistics.

use glam::Vec2;

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::input::{Key, action_for_key};
use crate::perf::{FrameStats, PerfGraph};
use crate::settings::Settings;
use crate::sim::{Action, ListMode, SceneEvent, SceneKind, SceneState, apply, tick};

/// Result of one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameOutcome {
    /// Simulation steps run this frame
    pub steps: u32,
    /// An action asked to close the lab
    pub quit: bool,
}

/// One running experiment
pub struct App {
    pub scene: SceneState,
    pub settings: Settings,
    accumulator: f32,
    stats: FrameStats,
    graph: PerfGraph,
    show_graph: bool,
    pending: Vec<Action>,
}

impl App {
    pub fn new(kind: SceneKind, seed: u64, settings: Settings) -> Self {
        let show_graph = settings.perf_graph && kind.shows_perf_graph();
        log::info!("Starting {} with seed {}", kind.title(), seed);
        if kind == SceneKind::MeteorField {
            log::info!("{}", crate::sim::MeteorStyle::default().as_str());
        }
        if kind == SceneKind::ListBench {
            log::info!("Single sprite list: {}", ListMode::default() == ListMode::Single);
        }
        Self {
            scene: SceneState::new(kind, seed),
            settings,
            accumulator: 0.0,
            stats: FrameStats::default(),
            graph: PerfGraph::default(),
            show_graph,
            pending: Vec::new(),
        }
    }

    /// Queue whatever `key` does in the current scene
    pub fn key(&mut self, key: Key) {
        if let Some(action) = action_for_key(self.scene.kind, key) {
            self.pending.push(action);
        }
    }

    /// Queue a click at a world point
    pub fn click(&mut self, point: Vec2) {
        if matches!(
            self.scene.kind,
            SceneKind::Sprites | SceneKind::MeteorField | SceneKind::ListBench
        ) {
            self.pending.push(Action::EjectAt(point));
        }
    }

    /// Run one rendered frame: apply queued actions, then as many fixed
    /// steps as `dt` seconds cover. `now_ms` is the frame's timestamp.
    pub fn frame(&mut self, dt: f32, now_ms: f64) -> FrameOutcome {
        let mut outcome = FrameOutcome::default();

        self.stats.record(now_ms);
        self.graph.push(self.stats.fps());

        for action in std::mem::take(&mut self.pending) {
            if self.handle(action) {
                outcome.quit = true;
            }
        }

        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);
        while self.accumulator >= SIM_DT && outcome.steps < MAX_SUBSTEPS {
            tick(&mut self.scene, SIM_DT);
            self.accumulator -= SIM_DT;
            outcome.steps += 1;
        }
        if outcome.steps == MAX_SUBSTEPS {
            // Drop the backlog rather than falling further behind
            self.accumulator = self.accumulator.min(SIM_DT);
        }

        self.scene.prepare_draw();
        outcome
    }

    /// Apply one action; returns true if it asks to quit
    fn handle(&mut self, action: Action) -> bool {
        match action {
            Action::ToggleTrippy => {
                self.settings.trippy = !self.settings.trippy;
                log::info!("Trippy mode: {}", self.settings.trippy);
                self.settings.save();
                false
            }
            Action::TogglePerfGraph => {
                self.show_graph = !self.show_graph;
                self.settings.perf_graph = self.show_graph;
                self.settings.save();
                false
            }
            _ => match apply(&mut self.scene, action) {
                Some(SceneEvent::Quit) => true,
                Some(SceneEvent::Report(counts)) => {
                    log::info!("{counts}");
                    false
                }
                Some(SceneEvent::MeteorStyleChanged(style)) => {
                    log::info!("{}", style.as_str());
                    false
                }
                Some(SceneEvent::ListModeChanged(mode)) => {
                    log::info!("Single sprite list: {}", mode == ListMode::Single);
                    false
                }
                None => false,
            },
        }
    }

    pub fn fps(&self) -> u32 {
        self.stats.fps()
    }

    /// Skip clearing the screen this frame
    pub fn trippy(&self) -> bool {
        self.scene.kind.allows_trippy() && self.settings.trippy
    }

    /// The FPS graph, if it is showing
    pub fn perf_graph(&self) -> Option<&PerfGraph> {
        self.show_graph.then_some(&self.graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(kind: SceneKind) -> App {
        App::new(kind, 7, Settings::default())
    }

    #[test]
    fn test_frame_runs_fixed_steps() {
        let mut app = app(SceneKind::Sprites);
        let outcome = app.frame(SIM_DT * 3.5, 16.0);
        assert_eq!(outcome.steps, 3);
        assert_eq!(app.scene.steps, 3);
        // Leftover half step carries into the next frame
        let outcome = app.frame(SIM_DT * 0.6, 32.0);
        assert_eq!(outcome.steps, 1);
    }

    #[test]
    fn test_long_frames_are_clamped() {
        let mut app = app(SceneKind::Sprites);
        let outcome = app.frame(5.0, 16.0);
        assert!(outcome.steps <= MAX_SUBSTEPS);
        let outcome = app.frame(0.0, 32.0);
        assert!(outcome.steps <= 1);
    }

    #[test]
    fn test_escape_quits() {
        let mut app = app(SceneKind::Drift);
        app.key(Key::Escape);
        assert!(app.frame(SIM_DT, 16.0).quit);
        assert!(!app.frame(SIM_DT, 32.0).quit);
    }

    #[test]
    fn test_toggles_flip_view_state() {
        let mut app = app(SceneKind::MeteorField);
        assert!(app.perf_graph().is_some());
        assert!(!app.trippy());
        app.key(Key::P);
        app.key(Key::T);
        app.frame(0.0, 16.0);
        assert!(app.perf_graph().is_none());
        assert!(app.trippy());
    }

    #[test]
    fn test_saved_trippy_ignored_without_t_binding() {
        let settings = Settings {
            trippy: true,
            ..Default::default()
        };
        for kind in [SceneKind::Sprites, SceneKind::Spiral, SceneKind::Drift] {
            let mut app = App::new(kind, 1, settings.clone());
            app.key(Key::T);
            app.frame(0.0, 16.0);
            assert!(!app.trippy(), "{kind:?} kept the previous frame");
        }
        let app = App::new(SceneKind::ListBench, 1, settings);
        assert!(app.trippy());
    }

    #[test]
    fn test_sprites_scene_has_no_graph() {
        let app = app(SceneKind::Sprites);
        assert!(app.perf_graph().is_none());
    }

    #[test]
    fn test_click_ejects_in_ship_scenes_only() {
        let mut app = app(SceneKind::MeteorField);
        for i in 0..60 {
            app.frame(SIM_DT, i as f64 * 16.0);
        }
        let target = app.scene.ships.get(0).map(|s| s.pos).unwrap_or_default();
        app.click(target);
        app.frame(0.0, 1000.0);
        assert!(!app.scene.pilots.is_empty());

        let mut spiral = self::app(SceneKind::Spiral);
        spiral.click(Vec2::ZERO);
        assert!(spiral.pending.is_empty());
    }
}
