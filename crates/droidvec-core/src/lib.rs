//! # droidvec Core
//!
//! Shared data model for previewing Android vector drawables: the extracted
//! scene, its shapes, resolved colors and fill rules.
//!
//! Both the extractor (`droidvec-io`) and the draw-op mapper
//! (`droidvec-renderer`) depend on these types only.

pub mod color;
pub mod geometry;
pub mod scene;

pub use color::Color;
pub use geometry::Point;
pub use scene::{FillRule, Scene, Shape, DEFAULT_INTRINSIC_SIZE};
