use serde::{Deserialize, Serialize};

/// A 2D point in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Mirror `self` through `center`.
    pub fn reflect_about(&self, center: &Point) -> Self {
        Self {
            x: 2.0 * center.x - self.x,
            y: 2.0 * center.y - self.y,
        }
    }

    pub fn scale(&self, sx: f64, sy: f64) -> Self {
        Self {
            x: self.x * sx,
            y: self.y * sy,
        }
    }
}
