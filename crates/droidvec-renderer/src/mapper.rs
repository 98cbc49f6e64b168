//! Scene to draw-op mapping.
//!
//! Output is one [`DrawOp::Scale`] followed by each shape's fill and stroke, in
//! scene order. A shape whose path data the interpreter rejects is logged and
//! skipped; it never stops the remaining shapes from rendering.

use std::sync::Arc;

use thiserror::Error;

use droidvec_core::{Scene, Shape};

use crate::draw_op::{DrawOp, RenderFrame, ShapeOutcome};
use crate::path::{PathDataParser, PathInterpreter};
use crate::settings::RenderSettings;
use crate::viewport::ViewportTransform;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Invalid viewport {width}x{height}: both dimensions must be positive")]
    InvalidViewport { width: f64, height: f64 },

    #[error("Target size must be at least one pixel")]
    InvalidTargetSize,
}

/// Map `scene` to draw ops for a `target_size` x `target_size` raster.
pub fn map_to_draw_ops(scene: &Scene, target_size: u32) -> Result<Vec<DrawOp>, RenderError> {
    Ok(map_with(scene, target_size, &PathDataParser)?.ops)
}

/// Map `scene` using `settings`, keeping per-shape outcomes.
pub fn render_frame(scene: &Scene, settings: &RenderSettings) -> Result<RenderFrame, RenderError> {
    map_with(scene, settings.target_size, &PathDataParser)
}

/// Map `scene` with a caller-supplied path interpreter.
pub fn map_with<I>(scene: &Scene, target_size: u32, interpreter: &I) -> Result<RenderFrame, RenderError>
where
    I: PathInterpreter + ?Sized,
{
    if target_size == 0 {
        return Err(RenderError::InvalidTargetSize);
    }
    if !scene.has_valid_viewport() {
        return Err(RenderError::InvalidViewport {
            width: scene.viewport_width,
            height: scene.viewport_height,
        });
    }

    let transform = ViewportTransform::fit(scene, target_size);
    let mut ops = vec![DrawOp::Scale {
        sx: transform.scale_x,
        sy: transform.scale_y,
    }];

    let outcomes = scene
        .shapes
        .iter()
        .enumerate()
        .map(|(index, shape)| map_shape(index, shape, interpreter, &mut ops))
        .collect();

    Ok(RenderFrame {
        transform,
        ops,
        outcomes,
    })
}

fn map_shape<I>(index: usize, shape: &Shape, interpreter: &I, ops: &mut Vec<DrawOp>) -> ShapeOutcome
where
    I: PathInterpreter + ?Sized,
{
    let fill = shape.effective_fill();
    let stroke = shape.effective_stroke();
    if fill.is_none() && stroke.is_none() {
        return ShapeOutcome::Invisible { index };
    }

    let geometry = match interpreter.interpret(&shape.path_data) {
        Ok(geometry) => Arc::new(geometry),
        Err(error) => {
            log::warn!("Failed to render path #{index} ({error}): {}", shape.path_data);
            return ShapeOutcome::Skipped { index, error };
        }
    };

    let before = ops.len();
    if let Some(color) = fill {
        ops.push(DrawOp::Fill {
            shape: index,
            geometry: Arc::clone(&geometry),
            color,
            rule: shape.fill_rule,
        });
    }
    if let Some(color) = stroke {
        ops.push(DrawOp::Stroke {
            shape: index,
            geometry,
            color,
            width: shape.stroke_width,
        });
    }

    ShapeOutcome::Drawn {
        index,
        ops: ops.len() - before,
    }
}
