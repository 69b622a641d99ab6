//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

/// 2D position in playfield space (world units, screen-oriented Cartesian).
/// x grows rightward, y grows downward; enemies descend toward +y.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// 2D velocity in playfield space (units per millisecond).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}

/// Simulation time tracking. Frames are variable-length; the host supplies
/// the elapsed milliseconds for each one.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of completed simulation frames.
    pub frame: u64,
    /// Total elapsed simulation time in milliseconds.
    pub elapsed_ms: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Heading toward another position in radians (0 = +x, grows toward +y).
    pub fn heading_to(&self, other: &Position) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// From a heading angle and a scalar speed.
    pub fn from_heading(heading: f64, speed: f64) -> Self {
        Self {
            x: heading.cos() * speed,
            y: heading.sin() * speed,
        }
    }

    /// Speed magnitude (units/ms).
    pub fn speed(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Heading in radians (0 = +x, grows toward +y).
    pub fn heading(&self) -> f64 {
        self.y.atan2(self.x)
    }
}

impl SimTime {
    /// Advance by one frame of `elapsed_ms` milliseconds.
    pub fn advance(&mut self, elapsed_ms: f64) {
        self.frame += 1;
        self.elapsed_ms += elapsed_ms;
    }
}

/// Wrap an angle into (-PI, PI]. Used when steering an aim angle toward a
/// target heading by a fraction of the error.
pub fn wrap_angle(mut angle: f64) -> f64 {
    use std::f64::consts::{PI, TAU};
    while angle > PI {
        angle -= TAU;
    }
    while angle <= -PI {
        angle += TAU;
    }
    angle
}
