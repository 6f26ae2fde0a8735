//! Quarter-arc spirals
//!
//! A spiral is built from quarter circles whose radii follow the Fibonacci
//! recurrence. After each quarter the centre moves by the previous radius
//! so consecutive arcs join up.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::direction_degrees;

/// Outline thickness of spiral arcs (pixels)
pub const ARC_THICKNESS: f32 = 5.0;
/// Quarter arcs drawn per spiral
pub const SPIRAL_STEPS: usize = 14;
/// Starting radius of each spiral
pub const SPIRAL_START_WIDTH: f32 = 2.0;
/// Degrees the spirals turn per step
pub const SPIRAL_TURN: f32 = 5.0;
/// Horizontal gap between the three spirals
pub const SPIRAL_SPACING: f32 = 100.0;

/// RGB colour, one byte per channel
pub type Rgb = [u8; 3];

/// Random bright colour (each channel in 100..=255)
pub fn random_colour<R: Rng>(rng: &mut R) -> Rgb {
    [
        rng.random_range(100..=255),
        rng.random_range(100..=255),
        rng.random_range(100..=255),
    ]
}

/// One arc outline to draw
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcStroke {
    pub center: Vec2,
    pub radius: f32,
    /// Degrees, counter-clockwise
    pub start_angle: f32,
    pub end_angle: f32,
    pub colour: Rgb,
    pub thickness: f32,
}

/// A quarter circle that walks outward one quarter at a time
#[derive(Debug, Clone, PartialEq)]
pub struct QuarterArc {
    pub center: Vec2,
    pub width: f32,
    pub previous_width: f32,
    pub start_angle: f32,
    pub end_angle: f32,
}

impl QuarterArc {
    pub fn new(center: Vec2, width: f32, angle: f32) -> Self {
        Self {
            center,
            width,
            previous_width: 0.0,
            start_angle: angle,
            end_angle: angle + 90.0,
        }
    }

    /// Emit the current quarter, then turn a quarter for the next one
    pub fn stroke(&mut self, colour: Rgb) -> ArcStroke {
        let stroke = ArcStroke {
            center: self.center,
            radius: self.width,
            start_angle: self.start_angle,
            end_angle: self.end_angle,
            colour,
            thickness: ARC_THICKNESS,
        };
        self.start_angle += 90.0;
        self.end_angle += 90.0;
        stroke
    }

    /// Shift the centre and grow the radius for the next quarter
    pub fn advance(&mut self) {
        let step = direction_degrees(self.end_angle + 90.0) * self.previous_width;
        // Whole pixels, ties to even
        self.center += Vec2::new(step.x.round_ties_even(), step.y.round_ties_even());
        let new_width = self.width + self.previous_width;
        self.previous_width = self.width;
        self.width = new_width;
    }
}

/// A full spiral in a single colour
#[derive(Debug, Clone, PartialEq)]
pub struct Spiral {
    pub arc: QuarterArc,
    pub colour: Rgb,
    pub steps: usize,
}

impl Spiral {
    pub fn new(center: Vec2, width: f32, angle: f32, steps: usize, colour: Rgb) -> Self {
        Self {
            arc: QuarterArc::new(center, width, angle),
            colour,
            steps,
        }
    }

    pub fn strokes(&self) -> Vec<ArcStroke> {
        let mut arc = self.arc.clone();
        (0..self.steps)
            .map(|_| {
                let stroke = arc.stroke(self.colour);
                arc.advance();
                stroke
            })
            .collect()
    }
}

/// Rotating three-spiral display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpiralState {
    /// Degrees; counts down and wraps back to 359
    pub start_angle: f32,
    /// Colour shared by the two arcs drawn step by step
    pub paired_colour: Rgb,
    /// Colour of the standalone spiral
    pub spiral_colour: Rgb,
}

impl Default for SpiralState {
    fn default() -> Self {
        Self {
            start_angle: 359.0,
            paired_colour: [255; 3],
            spiral_colour: [255; 3],
        }
    }
}

impl SpiralState {
    /// Turn the spirals and pick this step's colours
    pub fn step<R: Rng>(&mut self, rng: &mut R) {
        self.start_angle -= SPIRAL_TURN;
        if self.start_angle < 0.0 {
            self.start_angle = 359.0;
        }
        self.paired_colour = random_colour(rng);
        self.spiral_colour = random_colour(rng);
    }

    /// Strokes for the current frame around `center`
    pub fn strokes(&self, center: Vec2) -> Vec<ArcStroke> {
        let offset = Vec2::new(SPIRAL_SPACING, 0.0);
        let spiral = Spiral::new(
            center + offset,
            SPIRAL_START_WIDTH,
            self.start_angle,
            SPIRAL_STEPS,
            self.spiral_colour,
        );
        let mut strokes = spiral.strokes();

        let mut middle = QuarterArc::new(center, SPIRAL_START_WIDTH, self.start_angle);
        let mut left = QuarterArc::new(center - offset, SPIRAL_START_WIDTH, self.start_angle);
        for _ in 0..SPIRAL_STEPS {
            strokes.push(middle.stroke(self.paired_colour));
            middle.advance();
            strokes.push(left.stroke(self.paired_colour));
            left.advance();
        }
        strokes
    }
}
