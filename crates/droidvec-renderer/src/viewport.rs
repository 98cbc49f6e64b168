use serde::{Deserialize, Serialize};

use droidvec_core::{Point, Scene};

/// Mapping from viewport coordinates to output pixels.
///
/// The two axes scale independently, so a non-square viewport is stretched to
/// fill the square output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportTransform {
    /// Pixels per viewport unit along X.
    pub scale_x: f64,
    /// Pixels per viewport unit along Y.
    pub scale_y: f64,
    /// Output width and height in pixels.
    pub target_size: u32,
}

impl ViewportTransform {
    /// Fit the scene's viewport into a `target_size` x `target_size` raster.
    ///
    /// The caller guarantees a positive viewport (see [`Scene::has_valid_viewport`]).
    pub fn fit(scene: &Scene, target_size: u32) -> Self {
        let target = target_size as f64;
        Self {
            scale_x: target / scene.viewport_width,
            scale_y: target / scene.viewport_height,
            target_size,
        }
    }

    /// Convert a viewport coordinate to an output pixel coordinate.
    pub fn to_pixel(&self, point: &Point) -> Point {
        point.scale(self.scale_x, self.scale_y)
    }

    /// Convert an output pixel coordinate back to viewport coordinates.
    pub fn to_viewport(&self, pixel: &Point) -> Point {
        pixel.scale(1.0 / self.scale_x, 1.0 / self.scale_y)
    }

    /// Whether the aspect ratio of the viewport survives the mapping.
    pub fn is_uniform(&self) -> bool {
        (self.scale_x - self.scale_y).abs() <= f64::EPSILON * self.scale_x.abs().max(1.0)
    }
}
