use droidvec_core::{Color, FillRule};

use crate::draw_op::DrawOp;
use crate::path::PathGeometry;

/// A 2D drawing target that draw ops can be replayed against.
pub trait DrawSurface {
    /// Apply a scale transform to everything drawn afterwards.
    fn scale(&mut self, sx: f64, sy: f64);

    fn fill_path(&mut self, path: &PathGeometry, color: Color, rule: FillRule);

    fn stroke_path(&mut self, path: &PathGeometry, color: Color, width: f64);
}

/// Play `ops` against `surface` in order.
pub fn replay(ops: &[DrawOp], surface: &mut dyn DrawSurface) {
    for op in ops {
        match op {
            DrawOp::Scale { sx, sy } => surface.scale(*sx, *sy),
            DrawOp::Fill {
                geometry,
                color,
                rule,
                ..
            } => surface.fill_path(geometry, *color, *rule),
            DrawOp::Stroke {
                geometry,
                color,
                width,
                ..
            } => surface.stroke_path(geometry, *color, *width),
        }
    }
}

/// Records draw calls as HTML canvas 2D statements against a context named
/// `ctx`, for previews rendered in a browser.
#[derive(Debug, Default)]
pub struct CanvasScript {
    lines: Vec<String>,
}

impl CanvasScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The recorded statements wrapped in `save()`/`restore()`.
    pub fn finish(self) -> String {
        let mut script = String::from("ctx.save();\n");
        for line in &self.lines {
            script.push_str(line);
            script.push('\n');
        }
        script.push_str("ctx.restore();\n");
        script
    }

    fn path_literal(path: &PathGeometry) -> String {
        // A JSON string is a valid JavaScript string literal.
        serde_json::Value::from(path.source()).to_string()
    }
}

impl DrawSurface for CanvasScript {
    fn scale(&mut self, sx: f64, sy: f64) {
        self.lines.push(format!("ctx.scale({sx}, {sy});"));
    }

    fn fill_path(&mut self, path: &PathGeometry, color: Color, rule: FillRule) {
        self.lines
            .push(format!("ctx.fillStyle = \"{}\";", color.to_css()));
        self.lines.push(format!(
            "ctx.fill(new Path2D({}), \"{}\");",
            Self::path_literal(path),
            rule.as_str()
        ));
    }

    fn stroke_path(&mut self, path: &PathGeometry, color: Color, width: f64) {
        self.lines
            .push(format!("ctx.strokeStyle = \"{}\";", color.to_css()));
        self.lines.push(format!("ctx.lineWidth = {width};"));
        self.lines.push(format!(
            "ctx.stroke(new Path2D({}));",
            Self::path_literal(path)
        ));
    }
}
