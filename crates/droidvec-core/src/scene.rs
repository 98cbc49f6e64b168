use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Intrinsic size used when a drawable does not declare `android:width`/`android:height`.
pub const DEFAULT_INTRINSIC_SIZE: f64 = 100.0;

/// Rule used to decide which regions of a self-intersecting outline are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

impl FillRule {
    /// Interpret an `android:fillType` value. Only `evenOdd` (any case) selects
    /// even-odd filling.
    pub fn from_attr(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("evenodd") {
            FillRule::EvenOdd
        } else {
            FillRule::NonZero
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FillRule::NonZero => "nonzero",
            FillRule::EvenOdd => "evenodd",
        }
    }
}

/// One drawable outline with its fill and stroke styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    /// Path mini-language string, kept verbatim.
    pub path_data: String,
    pub fill_color: Option<Color>,
    pub fill_alpha: f32,
    pub fill_rule: FillRule,
    pub stroke_color: Option<Color>,
    pub stroke_width: f64,
    pub stroke_alpha: f32,
}

impl Shape {
    pub fn new(path_data: &str) -> Self {
        Self {
            path_data: path_data.to_string(),
            fill_color: None,
            fill_alpha: 1.0,
            fill_rule: FillRule::NonZero,
            stroke_color: None,
            stroke_width: 0.0,
            stroke_alpha: 1.0,
        }
    }

    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill_color = Some(color);
        self
    }

    pub fn with_stroke(mut self, color: Color, width: f64) -> Self {
        self.stroke_color = Some(color);
        self.stroke_width = width;
        self
    }

    pub fn with_fill_rule(mut self, rule: FillRule) -> Self {
        self.fill_rule = rule;
        self
    }

    pub fn has_fill(&self) -> bool {
        self.fill_color.is_some()
    }

    pub fn has_stroke(&self) -> bool {
        self.stroke_color.is_some() && self.stroke_width > 0.0
    }

    /// Fill color with `fill_alpha` folded into the alpha channel.
    pub fn effective_fill(&self) -> Option<Color> {
        self.fill_color.map(|c| c.with_opacity(self.fill_alpha))
    }

    /// Stroke color with `stroke_alpha` folded into the alpha channel, or
    /// `None` when the shape is not stroked.
    pub fn effective_stroke(&self) -> Option<Color> {
        if !self.has_stroke() {
            return None;
        }
        self.stroke_color.map(|c| c.with_opacity(self.stroke_alpha))
    }
}

/// The structured result of reading a vector drawable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Declared display width (dp).
    pub intrinsic_width: f64,
    /// Declared display height (dp).
    pub intrinsic_height: f64,
    /// Width of the coordinate space the path data is authored in.
    pub viewport_width: f64,
    /// Height of the coordinate space the path data is authored in.
    pub viewport_height: f64,
    /// Shapes in paint order; later shapes draw on top.
    pub shapes: Vec<Shape>,
}

impl Scene {
    pub fn new(viewport_width: f64, viewport_height: f64) -> Self {
        Self {
            intrinsic_width: DEFAULT_INTRINSIC_SIZE,
            intrinsic_height: DEFAULT_INTRINSIC_SIZE,
            viewport_width,
            viewport_height,
            shapes: Vec::new(),
        }
    }

    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Both viewport dimensions are finite and strictly positive.
    pub fn has_valid_viewport(&self) -> bool {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        positive(self.viewport_width) && positive(self.viewport_height)
    }

    // ── Serialization ────────────────────────────────────────────────

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
