//! Sprite entities and their per-step update rules
//!
//! Every sprite is a rectangle of `size` pixels (the size of the art it
//! stands in for) placed at `pos`, rotated by `angle` degrees and scaled
//! uniformly by `scale`. Each step adds the linear deltas in `motion`.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::rotate_degrees;

/// Visible region of the world, from the origin (bottom-left) to `size`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Axis-aligned box in world coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
}

impl Rect {
    /// True if no part of the box overlaps `bounds`
    pub fn is_outside(&self, bounds: &Bounds) -> bool {
        self.right < 0.0 || self.left > bounds.width || self.top < 0.0 || self.bottom > bounds.height
    }
}

/// Per-step deltas
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    pub dx: f32,
    pub dy: f32,
    pub dangle: f32,
    pub dscale: f32,
}

/// How a meteor is drawn and moved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MeteorStyle {
    /// Image meteor that spins as it moves
    #[default]
    Rotating,
    /// Image meteor without rotation
    Fixed,
    /// Plain grey disc
    Circle,
}

impl MeteorStyle {
    /// Next style in the F2 cycle
    pub fn next(self) -> Self {
        match self {
            MeteorStyle::Rotating => MeteorStyle::Fixed,
            MeteorStyle::Fixed => MeteorStyle::Circle,
            MeteorStyle::Circle => MeteorStyle::Rotating,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MeteorStyle::Rotating => "RotatingMeteor",
            MeteorStyle::Fixed => "NoRotationMeteor",
            MeteorStyle::Circle => "CircleMeteor",
        }
    }
}

/// Behaviour-specific sprite data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SpriteKind {
    /// Crosses left to right; bigger ships are nearer and faster
    Ship { tumbling: bool },
    /// Spins, grows to `max_scale`, then shrinks away
    Pilot { max_scale: f32 },
    /// Crosses right to left
    Meteor { style: MeteorStyle },
    /// Flies along its heading while slowly turning
    Drifter { speed: f32 },
}

/// Art a sprite stands in for; selects base size and colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Look {
    Ship(u8),
    Pilot(u8),
    Meteor(u8),
    Disc,
}

impl Look {
    pub const SHIP_VARIANTS: u8 = 5;
    pub const PILOT_VARIANTS: u8 = 6;
    pub const METEOR_VARIANTS: u8 = 4;

    /// Unscaled size in pixels. Ships point up (+y) at angle 0.
    pub fn base_size(&self) -> Vec2 {
        match self {
            Look::Ship(3) => Vec2::new(112.0, 75.0),
            Look::Ship(4) => Vec2::new(98.0, 75.0),
            Look::Ship(_) => Vec2::new(99.0, 75.0),
            Look::Pilot(0) | Look::Pilot(1) => Vec2::new(64.0, 64.0),
            Look::Pilot(_) => Vec2::new(96.0, 128.0),
            Look::Meteor(0) => Vec2::new(43.0, 43.0),
            Look::Meteor(1) => Vec2::new(45.0, 40.0),
            Look::Meteor(2) => Vec2::new(28.0, 28.0),
            Look::Meteor(_) => Vec2::new(29.0, 26.0),
            Look::Disc => Vec2::new(2.0, 2.0),
        }
    }
}

/// Rules for the pilot a ship ejects
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PilotRules {
    /// Starting scale relative to the ship's scale
    pub start_factor: f32,
    /// Peak scale relative to the ship's scale
    pub max_factor: f32,
    /// Steps taken to grow from start to peak
    pub growth_steps: f32,
    /// Inclusive range of the per-step spin (degrees)
    pub spin: (i32, i32),
    /// Horizontal drift relative to the ship's speed
    pub drift_factor: f32,
}

/// A visual element with a linear per-step update rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub pos: Vec2,
    /// Degrees, counter-clockwise
    pub angle: f32,
    pub scale: f32,
    /// Unscaled size in pixels
    pub size: Vec2,
    pub motion: Motion,
    pub kind: SpriteKind,
    pub look: Look,
}

impl Sprite {
    /// Ship entering just off the left edge at a random height
    pub fn ship<R: Rng>(rng: &mut R, bounds: &Bounds, scale_range: (f32, f32)) -> Self {
        let scale = rng.random_range(scale_range.0..scale_range.1);
        let look = Look::Ship(rng.random_range(0..Look::SHIP_VARIANTS));
        let mut ship = Self {
            pos: Vec2::new(0.0, random_height(rng, bounds)),
            // Art faces up; -90 faces right
            angle: -90.0,
            scale,
            size: look.base_size(),
            motion: Motion {
                dx: scale * 7.0,
                ..Default::default()
            },
            kind: SpriteKind::Ship { tumbling: false },
            look,
        };
        ship.pos.x = -1.0 - ship.half_extents().x;
        ship
    }

    /// Meteor entering just off the right edge at a random height
    pub fn meteor<R: Rng>(rng: &mut R, bounds: &Bounds, style: MeteorStyle) -> Self {
        let (scale, look, size, dangle) = match style {
            MeteorStyle::Circle => {
                let radius = rng.random_range(1..=8) as f32;
                (1.0, Look::Disc, Vec2::splat(radius * 2.0), 0.0)
            }
            MeteorStyle::Rotating | MeteorStyle::Fixed => {
                let look = Look::Meteor(rng.random_range(0..Look::METEOR_VARIANTS));
                let scale = rng.random_range(0.1..0.5);
                let dangle = if style == MeteorStyle::Rotating {
                    rng.random_range(-5..=5) as f32
                } else {
                    0.0
                };
                (scale, look, look.base_size(), dangle)
            }
        };
        // Nearer (bigger) meteors move faster
        let dx = match style {
            MeteorStyle::Circle => -size.x,
            _ => -scale * 20.0,
        };
        let mut meteor = Self {
            pos: Vec2::new(0.0, random_height(rng, bounds)),
            angle: 0.0,
            scale,
            size,
            motion: Motion {
                dx,
                dangle,
                ..Default::default()
            },
            kind: SpriteKind::Meteor { style },
            look,
        };
        meteor.pos.x = bounds.width + meteor.half_extents().x;
        meteor
    }

    /// Drifter launched from the centre in a random direction
    pub fn drifter<R: Rng>(rng: &mut R, bounds: &Bounds) -> Self {
        let look = Look::Ship(2);
        Self {
            pos: bounds.center(),
            angle: rng.random_range(0..=359) as f32,
            scale: rng.random::<f32>() + 0.2,
            size: look.base_size(),
            motion: Motion {
                dangle: rng.random::<f32>() - 0.5,
                ..Default::default()
            },
            kind: SpriteKind::Drifter {
                speed: rng.random::<f32>() * 4.0 + 1.0,
            },
            look,
        }
    }

    /// Build the pilot ejected from this sprite's position
    pub fn eject_pilot<R: Rng>(&self, rng: &mut R, rules: &PilotRules) -> Self {
        let look = Look::Pilot(rng.random_range(0..Look::PILOT_VARIANTS));
        let scale = self.scale * rules.start_factor;
        let max_scale = self.scale * rules.max_factor;
        Self {
            pos: self.pos,
            angle: rng.random_range(0..=359) as f32,
            scale,
            size: look.base_size(),
            motion: Motion {
                dx: self.motion.dx * rules.drift_factor,
                dy: 0.0,
                dangle: rng.random_range(rules.spin.0..=rules.spin.1) as f32,
                dscale: (max_scale - scale) / rules.growth_steps,
            },
            kind: SpriteKind::Pilot { max_scale },
            look,
        }
    }

    pub fn is_ship(&self) -> bool {
        matches!(self.kind, SpriteKind::Ship { .. })
    }

    pub fn is_pilot(&self) -> bool {
        matches!(self.kind, SpriteKind::Pilot { .. })
    }

    pub fn is_tumbling(&self) -> bool {
        matches!(self.kind, SpriteKind::Ship { tumbling: true })
    }

    /// Set a ship spinning, optionally shrinking it away.
    /// Returns false if this sprite is not a ship.
    pub fn tumble<R: Rng>(&mut self, rng: &mut R, shrink: Option<f32>) -> bool {
        let SpriteKind::Ship { tumbling } = &mut self.kind else {
            return false;
        };
        *tumbling = true;
        self.motion.dangle = rng.random_range(-5..=5) as f32;
        if let Some(dscale) = shrink {
            self.motion.dscale = -dscale;
        }
        true
    }

    /// Advance one step
    pub fn update(&mut self) {
        match self.kind {
            SpriteKind::Drifter { speed } => {
                // Heading is taken before this step's turn
                let heading = self.angle.to_radians();
                self.angle += self.motion.dangle;
                self.pos.x += -speed * heading.sin();
                self.pos.y += speed * heading.cos();
            }
            SpriteKind::Pilot { max_scale } => {
                self.angle += self.motion.dangle;
                self.scale += self.motion.dscale;
                self.pos.x += self.motion.dx;
                // Grow then shrink
                if self.scale > max_scale {
                    self.motion.dscale = -self.motion.dscale;
                }
            }
            SpriteKind::Ship { .. } | SpriteKind::Meteor { .. } => {
                self.pos.x += self.motion.dx;
                self.pos.y += self.motion.dy;
                self.angle += self.motion.dangle;
                self.scale += self.motion.dscale;
            }
        }
    }

    /// Removal predicate: false once the sprite has shrunk to nothing or
    /// left the visible region in its direction of travel
    pub fn is_alive(&self, bounds: &Bounds) -> bool {
        if self.scale <= 0.0 {
            return false;
        }
        let rect = self.bounds();
        match self.kind {
            SpriteKind::Ship { .. } | SpriteKind::Pilot { .. } => rect.left <= bounds.width,
            SpriteKind::Meteor { .. } => rect.right >= 0.0,
            SpriteKind::Drifter { .. } => !rect.is_outside(bounds),
        }
    }

    /// Half width/height of the rotated, scaled box
    pub fn half_extents(&self) -> Vec2 {
        let half = self.size * self.scale.abs() / 2.0;
        let rad = self.angle.to_radians();
        let (sin, cos) = (rad.sin().abs(), rad.cos().abs());
        Vec2::new(half.x * cos + half.y * sin, half.x * sin + half.y * cos)
    }

    /// Axis-aligned bounding box of the rotated sprite
    pub fn bounds(&self) -> Rect {
        let half = self.half_extents();
        Rect {
            left: self.pos.x - half.x,
            right: self.pos.x + half.x,
            bottom: self.pos.y - half.y,
            top: self.pos.y + half.y,
        }
    }

    /// Point-in-sprite test against the rotated rectangle
    pub fn contains_point(&self, point: Vec2) -> bool {
        let local = rotate_degrees(point - self.pos, -self.angle);
        let half = self.size * self.scale.abs() / 2.0;
        local.x.abs() <= half.x && local.y.abs() <= half.y
    }

    /// Corners of the rotated rectangle, counter-clockwise from bottom-left
    pub fn corners(&self) -> [Vec2; 4] {
        let half = self.size * self.scale / 2.0;
        [
            Vec2::new(-half.x, -half.y),
            Vec2::new(half.x, -half.y),
            Vec2::new(half.x, half.y),
            Vec2::new(-half.x, half.y),
        ]
        .map(|c| self.pos + rotate_degrees(c, self.angle))
    }
}

fn random_height<R: Rng>(rng: &mut R, bounds: &Bounds) -> f32 {
    rng.random_range(0..=bounds.height as i32) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const BOUNDS: Bounds = Bounds::new(800.0, 600.0);

    fn meteor_rules() -> PilotRules {
        PilotRules {
            start_factor: 1.0,
            max_factor: 2.0,
            growth_steps: 50.0,
            spin: (-5, 5),
            drift_factor: 0.5,
        }
    }

    #[test]
    fn test_ship_spawns_just_off_left_edge() {
        let mut rng = Pcg32::seed_from_u64(1);
        let ship = Sprite::ship(&mut rng, &BOUNDS, (0.1, 1.0));
        assert!((ship.bounds().right - -1.0).abs() < 1e-3);
        assert!(ship.is_alive(&BOUNDS));
        assert!((ship.motion.dx - ship.scale * 7.0).abs() < 1e-6);
        assert!(ship.pos.y >= 0.0 && ship.pos.y <= BOUNDS.height);
    }

    #[test]
    fn test_ship_removed_after_leaving_right_edge() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut ship = Sprite::ship(&mut rng, &BOUNDS, (0.5, 0.6));
        let mut steps = 0;
        while ship.is_alive(&BOUNDS) {
            ship.update();
            steps += 1;
            assert!(steps < 10_000, "ship never left the screen");
        }
        assert!(ship.bounds().left > BOUNDS.width);
    }

    #[test]
    fn test_meteor_spawns_off_right_edge_and_leaves_left() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut meteor = Sprite::meteor(&mut rng, &BOUNDS, MeteorStyle::Fixed);
        assert!((meteor.bounds().left - BOUNDS.width).abs() < 1e-3);
        assert_eq!(meteor.motion.dangle, 0.0);
        while meteor.is_alive(&BOUNDS) {
            meteor.update();
        }
        assert!(meteor.bounds().right < 0.0);
    }

    #[test]
    fn test_circle_meteor_speed_matches_width() {
        let mut rng = Pcg32::seed_from_u64(4);
        let meteor = Sprite::meteor(&mut rng, &BOUNDS, MeteorStyle::Circle);
        assert_eq!(meteor.look, Look::Disc);
        assert_eq!(meteor.motion.dx, -meteor.size.x);
        assert!(meteor.size.x >= 2.0 && meteor.size.x <= 16.0);
    }

    #[test]
    fn test_pilot_grows_reverses_once_and_dies() {
        let mut rng = Pcg32::seed_from_u64(5);
        let ship = Sprite::ship(&mut rng, &BOUNDS, (0.5, 0.6));
        let mut pilot = ship.eject_pilot(&mut rng, &meteor_rules());
        let SpriteKind::Pilot { max_scale } = pilot.kind else {
            panic!("not a pilot");
        };
        assert!((max_scale - ship.scale * 2.0).abs() < 1e-6);
        assert!((pilot.motion.dx - ship.motion.dx / 2.0).abs() < 1e-6);

        let mut reversals = 0;
        let mut last_sign = pilot.motion.dscale.signum();
        let mut peak: f32 = 0.0;
        // Keep the pilot on screen; only the scale matters here
        pilot.motion.dx = 0.0;
        pilot.pos = BOUNDS.center();
        while pilot.is_alive(&BOUNDS) {
            pilot.update();
            peak = peak.max(pilot.scale);
            if pilot.motion.dscale.signum() != last_sign {
                reversals += 1;
                last_sign = pilot.motion.dscale.signum();
            }
        }
        assert_eq!(reversals, 1);
        assert!(peak > max_scale);
        assert!(pilot.scale <= 0.0);
    }

    #[test]
    fn test_pilot_removed_past_right_edge() {
        let mut rng = Pcg32::seed_from_u64(8);
        let ship = Sprite::ship(&mut rng, &BOUNDS, (0.5, 0.6));
        let mut pilot = ship.eject_pilot(&mut rng, &meteor_rules());
        pilot.pos = Vec2::new(BOUNDS.width / 2.0, 300.0);
        assert!(pilot.is_alive(&BOUNDS));
        pilot.pos.x = BOUNDS.width + 100.0;
        assert!(pilot.scale > 0.0);
        assert!(!pilot.is_alive(&BOUNDS));
    }

    #[test]
    fn test_tumble_only_applies_to_ships() {
        let mut rng = Pcg32::seed_from_u64(6);
        let mut ship = Sprite::ship(&mut rng, &BOUNDS, (0.5, 0.6));
        assert!(ship.tumble(&mut rng, Some(0.01)));
        assert!(ship.is_tumbling());
        assert_eq!(ship.motion.dscale, -0.01);

        let mut meteor = Sprite::meteor(&mut rng, &BOUNDS, MeteorStyle::Rotating);
        assert!(!meteor.tumble(&mut rng, None));
    }

    #[test]
    fn test_shrinking_ship_dies_at_zero_scale() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut ship = Sprite::ship(&mut rng, &BOUNDS, (0.1, 0.2));
        ship.pos = BOUNDS.center();
        ship.motion.dx = 0.0;
        ship.tumble(&mut rng, Some(0.01));
        let mut steps = 0;
        while ship.is_alive(&BOUNDS) {
            ship.update();
            steps += 1;
        }
        assert!(ship.scale <= 0.0);
        assert!(steps <= 21);
    }

    #[test]
    fn test_drifter_moves_along_heading() {
        let mut rng = Pcg32::seed_from_u64(8);
        let mut drifter = Sprite::drifter(&mut rng, &BOUNDS);
        drifter.angle = 0.0;
        drifter.motion.dangle = 1.0;
        let SpriteKind::Drifter { speed } = drifter.kind else {
            panic!("not a drifter");
        };
        let start = drifter.pos;
        drifter.update();
        // Angle 0 heads straight up
        assert!((drifter.pos.x - start.x).abs() < 1e-4);
        assert!((drifter.pos.y - (start.y + speed)).abs() < 1e-4);
        assert_eq!(drifter.angle, 1.0);
    }

    #[test]
    fn test_contains_point_respects_rotation() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut ship = Sprite::ship(&mut rng, &BOUNDS, (1.0, 1.01));
        ship.pos = BOUNDS.center();
        ship.scale = 1.0;
        // Facing right, the ship is 75 wide and 99 tall on screen
        assert!(ship.contains_point(ship.pos + Vec2::new(0.0, 45.0)));
        assert!(!ship.contains_point(ship.pos + Vec2::new(45.0, 0.0)));
    }

    #[test]
    fn test_meteor_style_cycle() {
        let style = MeteorStyle::default();
        assert_eq!(style.next().next().next(), style);
    }
}
