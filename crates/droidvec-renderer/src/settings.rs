use serde::{Deserialize, Serialize};

/// Output configuration for the preview renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Width and height of the square output raster, in pixels.
    pub target_size: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            target_size: 100, // preview canvas is 100x100
        }
    }
}

impl RenderSettings {
    pub fn with_target_size(target_size: u32) -> Self {
        Self { target_size }
    }
}
