//! Minimal coordinate types shared by the navigator and the rendering boundary.
//!
//! The core works on the ground plane (`x`, `z`); `y` is carried only so positions
//! can round-trip to the renderer unchanged.

use serde::{Deserialize, Serialize};

/// A point on the ground plane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GroundPoint {
    pub x: f64,
    pub z: f64,
}

impl GroundPoint {
    #[must_use]
    pub const fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        (other.x - self.x).hypot(other.z - self.z)
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.z.is_finite()
    }

    #[must_use]
    pub const fn at_height(self, y: f64) -> WorldPosition {
        WorldPosition::new(self.x, y, self.z)
    }
}

/// A 3D world coordinate as exchanged with the renderer (`[x, y, z]`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct WorldPosition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl WorldPosition {
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub const fn ground(self) -> GroundPoint {
        GroundPoint::new(self.x, self.z)
    }
}

impl From<[f64; 3]> for WorldPosition {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<WorldPosition> for [f64; 3] {
    fn from(value: WorldPosition) -> Self {
        [value.x, value.y, value.z]
    }
}
