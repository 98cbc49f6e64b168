use std::sync::Arc;

use serde::{Deserialize, Serialize};

use droidvec_core::{Color, FillRule};

use crate::path::{PathError, PathGeometry};
use crate::viewport::ViewportTransform;

/// One renderer-agnostic drawing instruction.
///
/// Path geometry is always in viewport coordinates; the leading
/// [`DrawOp::Scale`] maps it to pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    Scale {
        sx: f64,
        sy: f64,
    },
    Fill {
        /// Index of the source shape in the scene.
        shape: usize,
        geometry: Arc<PathGeometry>,
        /// Fill color with the shape's fill alpha already applied.
        color: Color,
        rule: FillRule,
    },
    Stroke {
        shape: usize,
        geometry: Arc<PathGeometry>,
        /// Stroke color with the shape's stroke alpha already applied.
        color: Color,
        width: f64,
    },
}

impl DrawOp {
    pub fn is_paint(&self) -> bool {
        !matches!(self, DrawOp::Scale { .. })
    }
}

/// What happened to each shape while mapping a scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ShapeOutcome {
    /// The shape produced `ops` fill/stroke operations.
    Drawn { index: usize, ops: usize },
    /// The shape has neither a fill nor a stroke.
    Invisible { index: usize },
    /// The path data was rejected; the shape produced no operations.
    Skipped { index: usize, error: PathError },
}

/// Complete output of mapping one scene.
#[derive(Debug, Clone, Serialize)]
pub struct RenderFrame {
    pub transform: ViewportTransform,
    pub ops: Vec<DrawOp>,
    pub outcomes: Vec<ShapeOutcome>,
}

impl RenderFrame {
    /// Shapes whose path data could not be interpreted.
    pub fn skipped(&self) -> impl Iterator<Item = (usize, &PathError)> {
        self.outcomes.iter().filter_map(|o| match o {
            ShapeOutcome::Skipped { index, error } => Some((*index, error)),
            _ => None,
        })
    }

    pub fn paint_op_count(&self) -> usize {
        self.ops.iter().filter(|op| op.is_paint()).count()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
