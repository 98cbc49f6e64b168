//! # droidvec Renderer
//!
//! Turns an extracted [`droidvec_core::Scene`] into an ordered list of
//! renderer-agnostic draw operations for a square output raster.
//!
//! The mapping emits a single scale transform from viewport coordinates to
//! pixels, then a fill and/or stroke per shape. Draw ops serialize to JSON for
//! web canvases and can be replayed against any [`DrawSurface`].

pub mod draw_op;
pub mod mapper;
pub mod path;
pub mod settings;
pub mod surface;
pub mod viewport;

pub use draw_op::{DrawOp, RenderFrame, ShapeOutcome};
pub use mapper::{map_to_draw_ops, map_with, render_frame, RenderError};
pub use path::{PathCommand, PathDataParser, PathError, PathGeometry, PathInterpreter};
pub use settings::RenderSettings;
pub use surface::{replay, CanvasScript, DrawSurface};
pub use viewport::ViewportTransform;
