//! Scene definitions and state
//!
//! Each scene is the same loop with different numbers: which lists are in
//! play, how often things spawn, and how ejecting a pilot behaves.

use std::fmt;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::list::{SpriteList, depth_order};
use super::spawner::Spawner;
use super::spiral::SpiralState;
use super::sprite::{Bounds, MeteorStyle, PilotRules, Sprite};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH, SPIRAL_SIZE};

/// Seconds between ship spawns
pub const SHIP_FREQUENCY_SECONDS: f32 = 0.15;
/// Seconds between meteor spawns
pub const METEOR_FREQUENCY_SECONDS: f32 = 0.3;
/// Meteor field population cap and batch size
pub const MAX_METEORS: usize = 2000;
pub const METEORS_TO_ADD: usize = 300;
/// List benchmark ship cap and batch size
pub const MAX_SHIPS: usize = 100;
pub const SHIPS_TO_ADD: usize = 10;
/// Steps between drifter launches
pub const DRIFTER_FRAMES: u32 = 5;
/// Per-step shrink of a tumbling ship in the meteor field
pub const TUMBLE_SHRINK: f32 = 0.01;

/// Which experiment to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SceneKind {
    /// Three rotating quarter-arc spirals
    Spiral,
    /// Ships crossing the screen, click to eject pilots
    #[default]
    Sprites,
    /// Ships over a dense meteor field
    MeteorField,
    /// Ships and pilots in one list or two
    ListBench,
    /// Ships launched from the centre in all directions
    Drift,
}

impl SceneKind {
    pub const ALL: [SceneKind; 5] = [
        SceneKind::Spiral,
        SceneKind::Sprites,
        SceneKind::MeteorField,
        SceneKind::ListBench,
        SceneKind::Drift,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SceneKind::Spiral => "spiral",
            SceneKind::Sprites => "sprites",
            SceneKind::MeteorField => "meteors",
            SceneKind::ListBench => "bench",
            SceneKind::Drift => "drift",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "spiral" => Some(SceneKind::Spiral),
            "sprites" | "sprite2" => Some(SceneKind::Sprites),
            "meteors" | "meteor" => Some(SceneKind::MeteorField),
            "bench" | "lists" => Some(SceneKind::ListBench),
            "drift" => Some(SceneKind::Drift),
            _ => None,
        }
    }

    /// Window title
    pub fn title(&self) -> &'static str {
        match self {
            SceneKind::Spiral => "Spiral",
            SceneKind::Sprites => "Sprite2: Scaling and sorting",
            SceneKind::MeteorField => "Sprite2: Meteor Performance",
            SceneKind::ListBench => "Sprite2: SpriteList Performance",
            SceneKind::Drift => "Move Sprite by Angle",
        }
    }

    /// World size for this scene
    pub fn bounds(&self) -> Bounds {
        match self {
            SceneKind::Spiral => Bounds::new(SPIRAL_SIZE, SPIRAL_SIZE),
            _ => Bounds::new(SCREEN_WIDTH, SCREEN_HEIGHT),
        }
    }

    /// Whether the FPS graph is on by default
    pub fn shows_perf_graph(&self) -> bool {
        matches!(self, SceneKind::MeteorField | SceneKind::ListBench)
    }

    /// Whether the scene can skip clearing between frames; only the scenes
    /// with a T binding can
    pub fn allows_trippy(&self) -> bool {
        matches!(self, SceneKind::MeteorField | SceneKind::ListBench)
    }
}

/// Where ejected pilots live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ListMode {
    /// Ships and pilots in separate lists, merged and sorted each frame
    #[default]
    Separate,
    /// Pilots share the ship list, which is sorted in place
    Single,
}

impl ListMode {
    pub fn toggled(self) -> Self {
        match self {
            ListMode::Separate => ListMode::Single,
            ListMode::Single => ListMode::Separate,
        }
    }
}

/// Per-scene tuning
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    /// Range of ship scales at spawn
    pub ship_scale: (f32, f32),
    pub pilot: PilotRules,
    /// Set the ship tumbling when its pilot ejects
    pub tumble_on_eject: bool,
    /// Per-step shrink of a tumbling ship
    pub tumble_shrink: Option<f32>,
    /// Tumbling ships cannot eject again
    pub guard_tumbling: bool,
}

impl SceneConfig {
    pub fn for_scene(kind: SceneKind) -> Self {
        let falling_pilot = PilotRules {
            start_factor: 1.0,
            max_factor: 2.0,
            growth_steps: 50.0,
            spin: (-5, 5),
            drift_factor: 0.5,
        };
        match kind {
            SceneKind::Sprites => Self {
                ship_scale: (0.1, 1.1),
                pilot: PilotRules {
                    start_factor: 0.5,
                    max_factor: 3.0,
                    growth_steps: 40.0,
                    spin: (1, 10),
                    drift_factor: 0.0,
                },
                tumble_on_eject: true,
                tumble_shrink: None,
                guard_tumbling: false,
            },
            SceneKind::ListBench => Self {
                ship_scale: (0.1, 1.0),
                pilot: falling_pilot,
                // Ships keep flying so both list modes see the same load
                tumble_on_eject: false,
                tumble_shrink: None,
                guard_tumbling: true,
            },
            SceneKind::MeteorField | SceneKind::Spiral | SceneKind::Drift => Self {
                ship_scale: (0.1, 1.0),
                pilot: falling_pilot,
                tumble_on_eject: true,
                tumble_shrink: Some(TUMBLE_SHRINK),
                guard_tumbling: true,
            },
        }
    }
}

/// Sprite totals for the F1 report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteCounts {
    pub kind: SceneKind,
    pub mode: ListMode,
    pub meteors: usize,
    pub ships: usize,
    pub pilots: usize,
    /// Everything in the ship list (ships and, in single mode, pilots)
    pub ship_list: usize,
    pub drifters: usize,
}

impl fmt::Display for SpriteCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.mode) {
            (SceneKind::Drift, _) => write!(f, "Drifters: {}", self.drifters),
            (SceneKind::Spiral, _) => write!(f, "Spirals: 3"),
            (SceneKind::Sprites, _) => write!(f, "Ships: {}", self.ship_list),
            (_, ListMode::Single) => write!(
                f,
                "Meteors: {} Ships: {} Total: {}",
                self.meteors, self.ships, self.ship_list
            ),
            (_, ListMode::Separate) => write!(
                f,
                "Meteors: {} Ships: {} Pilots: {}",
                self.meteors, self.ships, self.pilots
            ),
        }
    }
}

/// Everything one scene owns
#[derive(Debug, Clone)]
pub struct SceneState {
    pub kind: SceneKind,
    pub bounds: Bounds,
    /// Seed the RNG was created from
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Simulation seconds since start
    pub elapsed: f32,
    /// Simulation steps since start
    pub steps: u64,
    pub meteors: SpriteList,
    pub ships: SpriteList,
    pub pilots: SpriteList,
    pub drifters: SpriteList,
    pub(crate) meteor_spawner: Option<Spawner>,
    pub(crate) ship_spawner: Option<Spawner>,
    pub(crate) drifter_spawner: Option<Spawner>,
    pub meteor_style: MeteorStyle,
    pub list_mode: ListMode,
    pub spiral: SpiralState,
    pub config: SceneConfig,
}

impl SceneState {
    pub fn new(kind: SceneKind, seed: u64) -> Self {
        let (meteor_spawner, ship_spawner, drifter_spawner) = match kind {
            SceneKind::Spiral => (None, None, None),
            SceneKind::Sprites => (
                None,
                Some(Spawner::every_seconds(SHIP_FREQUENCY_SECONDS, 1)),
                None,
            ),
            SceneKind::MeteorField => (
                Some(
                    Spawner::every_seconds(METEOR_FREQUENCY_SECONDS, METEORS_TO_ADD)
                        .with_cap(MAX_METEORS),
                ),
                Some(Spawner::every_seconds(SHIP_FREQUENCY_SECONDS, 1)),
                None,
            ),
            SceneKind::ListBench => (
                Some(Spawner::every_seconds(METEOR_FREQUENCY_SECONDS, 1)),
                Some(Spawner::every_seconds(SHIP_FREQUENCY_SECONDS, SHIPS_TO_ADD).with_cap(MAX_SHIPS)),
                None,
            ),
            SceneKind::Drift => (None, None, Some(Spawner::every_frames(DRIFTER_FRAMES, 1))),
        };

        Self {
            kind,
            bounds: kind.bounds(),
            seed,
            rng: Pcg32::seed_from_u64(seed),
            elapsed: 0.0,
            steps: 0,
            meteors: SpriteList::new(),
            ships: SpriteList::new(),
            pilots: SpriteList::new(),
            drifters: SpriteList::new(),
            meteor_spawner,
            ship_spawner,
            drifter_spawner,
            meteor_style: MeteorStyle::default(),
            list_mode: ListMode::default(),
            spiral: SpiralState::default(),
            config: SceneConfig::for_scene(kind),
        }
    }

    pub fn counts(&self) -> SpriteCounts {
        SpriteCounts {
            kind: self.kind,
            mode: self.list_mode,
            meteors: self.meteors.len(),
            ships: self.ships.count_where(Sprite::is_ship),
            pilots: self.pilots.len() + self.ships.count_where(Sprite::is_pilot),
            ship_list: self.ships.len(),
            drifters: self.drifters.len(),
        }
    }

    /// Sort in place where the list mode draws straight from the ship list
    pub fn prepare_draw(&mut self) {
        if self.list_mode == ListMode::Single {
            self.ships.sort_by_scale();
        }
    }

    /// Sprites drawn before the depth-sorted layer, in list order
    pub fn background(&self) -> Vec<&Sprite> {
        self.meteors.iter().chain(self.drifters.iter()).collect()
    }

    /// Ships and pilots, farthest first. Call `prepare_draw` beforehand.
    pub fn foreground(&self) -> Vec<&Sprite> {
        match self.list_mode {
            ListMode::Single => self.ships.iter().collect(),
            ListMode::Separate => depth_order(&[&self.ships, &self.pilots]),
        }
    }

    /// Move pilots into the list the new mode expects
    pub fn set_list_mode(&mut self, mode: ListMode) {
        if mode == self.list_mode {
            return;
        }
        match mode {
            ListMode::Single => {
                let pilots = self.pilots.take_where(|_| true);
                self.ships.extend(pilots);
            }
            ListMode::Separate => {
                let pilots = self.ships.take_where(Sprite::is_pilot);
                self.pilots.extend(pilots);
            }
        }
        self.list_mode = mode;
    }
}
