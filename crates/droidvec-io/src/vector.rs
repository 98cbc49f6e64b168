//! Android vector drawable reader.
//!
//! The reader does not build an XML tree. Vector drawables are a narrow,
//! tool-generated format, so the document is cut into one segment per
//! `<path` tag and each segment's attributes are located by name.
//!
//! ## Segment layout
//! `[header] <path[attributes]>[content] <path[attributes]/>[content] ...`
//!
//! The header carries the `<vector>` root attributes. A segment's content runs
//! from the end of its opening tag to the next `<path` and holds any nested
//! children, such as an `<aapt:attr>` gradient definition.

use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;

use droidvec_core::scene::DEFAULT_INTRINSIC_SIZE;
use droidvec_core::{Color, FillRule, Scene, Shape};

use crate::attributes::{self, find, first_color_literal, parse_number};

const SHAPE_TOKEN: &str = "<path";

// ── Errors ────────────────────────────────────────────────────────────

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractError {
    #[error("Empty input")]
    EmptyInput,

    #[error("Could not find android:viewportWidth or android:viewportHeight attributes.")]
    MissingViewport,

    #[error("No <path> elements with android:pathData found.")]
    NoPathsFound,

    #[error("Unexpected parsing error: {0}")]
    UnexpectedFailure(String),
}

/// Read a vector drawable document into a [`Scene`].
///
/// Never panics: any fault inside the reader is reported as
/// [`ExtractError::UnexpectedFailure`].
pub fn extract(raw: &str) -> Result<Scene, ExtractError> {
    VectorReader::new(raw).read()
}

fn contain_panics<F>(read: F) -> Result<Scene, ExtractError>
where
    F: FnOnce() -> Result<Scene, ExtractError>,
{
    panic::catch_unwind(AssertUnwindSafe(read)).unwrap_or_else(|payload| {
        let detail = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "extraction aborted".to_string());
        log::error!("Vector extraction panicked: {detail}");
        Err(ExtractError::UnexpectedFailure(detail))
    })
}

// ── Reader ────────────────────────────────────────────────────────────

pub struct VectorReader<'a> {
    source: &'a str,
}

/// One `<path` segment split at the end of its opening tag.
#[derive(Debug)]
struct ShapeSegment<'a> {
    attributes: &'a str,
    content: &'a str,
}

impl<'a> ShapeSegment<'a> {
    fn split(segment: &'a str) -> Self {
        match segment.find('>') {
            Some(end) => Self {
                attributes: segment[..end].trim_end().trim_end_matches('/'),
                content: &segment[end + 1..],
            },
            // Unterminated tag: everything left is attributes.
            None => Self {
                attributes: segment,
                content: "",
            },
        }
    }
}

impl<'a> VectorReader<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source }
    }

    /// Read the whole document. Faults are contained the same way as in
    /// [`extract`].
    pub fn read(&self) -> Result<Scene, ExtractError> {
        contain_panics(|| self.read_document())
    }

    fn read_document(&self) -> Result<Scene, ExtractError> {
        if self.source.trim().is_empty() {
            return Err(ExtractError::EmptyInput);
        }

        let mut segments = self.source.split(SHAPE_TOKEN);
        let header = segments.next().unwrap_or_default();

        let mut scene = self.read_root(header)?;

        for (index, segment) in segments.enumerate() {
            match self.read_shape(ShapeSegment::split(segment)) {
                Some(shape) => scene.add_shape(shape),
                None => log::debug!("Skipping <path> #{index}: no android:pathData"),
            }
        }

        if scene.shapes.is_empty() {
            return Err(ExtractError::NoPathsFound);
        }

        log::debug!(
            "Read vector {}x{} (viewport {}x{}) with {} shapes",
            scene.intrinsic_width,
            scene.intrinsic_height,
            scene.viewport_width,
            scene.viewport_height,
            scene.shape_count()
        );
        Ok(scene)
    }

    fn read_root(&self, header: &str) -> Result<Scene, ExtractError> {
        let (Some(vp_width), Some(vp_height)) = (
            find(&attributes::VIEWPORT_WIDTH, header),
            find(&attributes::VIEWPORT_HEIGHT, header),
        ) else {
            return Err(ExtractError::MissingViewport);
        };

        let mut scene = Scene::new(
            viewport_number("viewportWidth", vp_width)?,
            viewport_number("viewportHeight", vp_height)?,
        );
        scene.intrinsic_width = intrinsic_size("width", find(&attributes::WIDTH, header));
        scene.intrinsic_height = intrinsic_size("height", find(&attributes::HEIGHT, header));

        Ok(scene)
    }

    fn read_shape(&self, segment: ShapeSegment<'_>) -> Option<Shape> {
        let attrs = segment.attributes;

        let path_data = find(&attributes::PATH_DATA, attrs)?.trim();
        if path_data.is_empty() {
            return None;
        }

        let mut shape = Shape::new(path_data);
        shape.fill_color = find(&attributes::FILL_COLOR, attrs).map(resolve_color);
        shape.fill_alpha = alpha(find(&attributes::FILL_ALPHA, attrs));
        shape.fill_rule = find(&attributes::FILL_TYPE, attrs)
            .map(FillRule::from_attr)
            .unwrap_or_default();
        shape.stroke_color = find(&attributes::STROKE_COLOR, attrs).map(resolve_color);
        shape.stroke_width = find(&attributes::STROKE_WIDTH, attrs)
            .and_then(|v| number_or_warn("strokeWidth", v))
            .unwrap_or(0.0);
        shape.stroke_alpha = alpha(find(&attributes::STROKE_ALPHA, attrs));

        if needs_gradient_fallback(shape.fill_color) {
            if let Some(color) = gradient_fallback(segment.content, "fillColor") {
                shape.fill_color = Some(color);
            }
        }
        if shape.stroke_width > 0.0 && needs_gradient_fallback(shape.stroke_color) {
            if let Some(color) = gradient_fallback(segment.content, "strokeColor") {
                shape.stroke_color = Some(color);
            }
        }

        Some(shape)
    }
}

// ── Value resolution ──────────────────────────────────────────────────

fn viewport_number(name: &str, value: &str) -> Result<f64, ExtractError> {
    parse_number(value).ok_or_else(|| {
        ExtractError::UnexpectedFailure(format!("invalid android:{name} value '{value}'"))
    })
}

fn intrinsic_size(name: &str, value: Option<&str>) -> f64 {
    value
        .and_then(|v| number_or_warn(name, v))
        .unwrap_or(DEFAULT_INTRINSIC_SIZE)
}

fn number_or_warn(name: &str, value: &str) -> Option<f64> {
    let number = parse_number(value);
    if number.is_none() {
        log::warn!("Ignoring non-numeric android:{name} value '{value}'");
    }
    number
}

fn alpha(value: Option<&str>) -> f32 {
    value
        .and_then(|v| number_or_warn("alpha", v))
        .map(|a| a.clamp(0.0, 1.0) as f32)
        .unwrap_or(1.0)
}

fn resolve_color(value: &str) -> Color {
    if !Color::is_recognized(value) {
        log::warn!("Unrecognized color '{value}', using opaque black");
    }
    Color::normalize(value)
}

/// Gradient-painted paths usually carry no color attribute, or the
/// transparent placeholder `#00000000`.
fn needs_gradient_fallback(color: Option<Color>) -> bool {
    match color {
        None => true,
        Some(c) => c == Color::TRANSPARENT,
    }
}

/// Flatten a gradient to a single color. A content block that mentions
/// `attribute` yields its first literal color, wherever that color sits in
/// the block.
fn gradient_fallback(content: &str, attribute: &str) -> Option<Color> {
    if !content.contains(attribute) {
        return None;
    }
    let literal = first_color_literal(content)?;
    log::debug!("Using {literal} as flat substitute for {attribute} gradient");
    Some(Color::normalize(literal))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ICON: &str = r##"<vector xmlns:android="http://schemas.android.com/apk/res/android"
    android:width="200dp"
    android:height="200dp"
    android:viewportWidth="1024"
    android:viewportHeight="1024">
  <path
      android:pathData="M512,62C264.5,62 62,264.5 62,512s202.5,450 450,450c247.5,0 450,-202.5 450,-450S759.5,62 512,62z"
      android:fillColor="#272636"/>
</vector>"##;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_read_single_path_icon() {
        let scene = extract(ICON).unwrap();
        assert_eq!(scene.intrinsic_width, 200.0);
        assert_eq!(scene.intrinsic_height, 200.0);
        assert_eq!(scene.viewport_width, 1024.0);
        assert_eq!(scene.viewport_height, 1024.0);
        assert_eq!(scene.shape_count(), 1);

        let shape = &scene.shapes[0];
        assert!(shape.path_data.starts_with("M512,62C264.5"));
        assert_eq!(shape.fill_color, Some(Color::rgb(0x27, 0x26, 0x36)));
        assert_eq!(shape.fill_rule, FillRule::NonZero);
        assert!(!shape.has_stroke());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(extract(""), Err(ExtractError::EmptyInput));
        assert_eq!(extract("  \n\t "), Err(ExtractError::EmptyInput));
    }

    #[test]
    fn test_missing_viewport_wins_over_shapes() {
        let doc = r##"<vector android:width="24dp" android:viewportWidth="24">
            <path android:pathData="M0,0L24,24" android:fillColor="#FF0000"/>
            <path android:pathData="M0,24L24,0" android:fillColor="#00FF00"/>
        </vector>"##;
        assert_eq!(extract(doc), Err(ExtractError::MissingViewport));

        let doc = r#"<vector android:viewportHeight="24"></vector>"#;
        assert_eq!(extract(doc), Err(ExtractError::MissingViewport));
    }

    #[test]
    fn test_no_paths_found() {
        let doc = r##"<vector android:viewportWidth="24" android:viewportHeight="24">
            <path android:fillColor="#FF0000"/>
            <path android:pathData="" android:fillColor="#00FF00"/>
        </vector>"##;
        assert_eq!(extract(doc), Err(ExtractError::NoPathsFound));

        let doc = r#"<vector android:viewportWidth="24" android:viewportHeight="24"/>"#;
        assert_eq!(extract(doc), Err(ExtractError::NoPathsFound));
    }

    #[test]
    fn test_shapes_keep_source_order_and_skip_geometryless() {
        init_logger();
        let doc = r##"<vector android:viewportWidth='24' android:viewportHeight='24'>
            <path android:pathData="M1,1" android:fillColor="#110000"/>
            <path android:fillColor="#220000"/>
            <group android:name="g">
                <path android:pathData='M3,3' android:fillColor='#330000'/>
            </group>
            <path android:pathData="M4,4"></path>
        </vector>"##;
        let scene = extract(doc).unwrap();
        let data: Vec<&str> = scene.shapes.iter().map(|s| s.path_data.as_str()).collect();
        assert_eq!(data, vec!["M1,1", "M3,3", "M4,4"]);
        assert_eq!(scene.shapes[1].fill_color, Some(Color::rgb(0x33, 0, 0)));
        assert_eq!(scene.shapes[2].fill_color, None);
    }

    #[test]
    fn test_size_defaults_and_units() {
        let doc = r#"<vector android:viewportWidth="48" android:viewportHeight="32">
            <path android:pathData="M0,0"/></vector>"#;
        let scene = extract(doc).unwrap();
        assert_eq!(scene.intrinsic_width, 100.0);
        assert_eq!(scene.intrinsic_height, 100.0);
        assert_eq!(scene.viewport_width, 48.0);
        assert_eq!(scene.viewport_height, 32.0);

        let doc = r#"<vector android:width = "24dp" android:height='36px'
            android:viewportWidth = "24.0" android:viewportHeight="36.0">
            <path android:pathData="M0,0"/></vector>"#;
        let scene = extract(doc).unwrap();
        assert_eq!(scene.intrinsic_width, 24.0);
        assert_eq!(scene.intrinsic_height, 36.0);
    }

    #[test]
    fn test_non_numeric_viewport_is_unexpected_failure() {
        let doc = r#"<vector android:viewportWidth="@dimen/vp" android:viewportHeight="24">
            <path android:pathData="M0,0"/></vector>"#;
        match extract(doc) {
            Err(ExtractError::UnexpectedFailure(msg)) => assert!(msg.contains("viewportWidth")),
            other => panic!("expected unexpected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_style_attributes() {
        init_logger();
        let doc = r##"<vector android:viewportWidth="24" android:viewportHeight="24">
            <path
                android:pathData="M2,2h20v20h-20z"
                android:fillColor="#80FF0000"
                android:fillAlpha="0.5"
                android:fillType="evenOdd"
                android:strokeColor="#0000FF"
                android:strokeWidth="1.5"
                android:strokeAlpha="2"/>
        </vector>"##;
        let shape = &extract(doc).unwrap().shapes[0];
        assert_eq!(shape.fill_rule, FillRule::EvenOdd);
        assert_eq!(shape.fill_alpha, 0.5);
        let fill = shape.fill_color.unwrap();
        assert_eq!((fill.r, fill.g, fill.b), (255, 0, 0));
        assert!((fill.a - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(shape.stroke_color, Some(Color::rgb(0, 0, 255)));
        assert_eq!(shape.stroke_width, 1.5);
        assert_eq!(shape.stroke_alpha, 1.0);
    }

    #[test]
    fn test_malformed_values_fall_back() {
        init_logger();
        let doc = r##"<vector android:viewportWidth="24" android:viewportHeight="24">
            <path android:pathData="M0,0" android:fillColor="@color/accent"
                android:fillAlpha="half" android:strokeWidth="thick" android:strokeColor="#FFF"/>
        </vector>"##;
        let shape = &extract(doc).unwrap().shapes[0];
        assert_eq!(shape.fill_color, Some(Color::BLACK));
        assert_eq!(shape.fill_alpha, 1.0);
        assert_eq!(shape.stroke_width, 0.0);
        assert_eq!(shape.stroke_color, Some(Color::BLACK));
        assert!(!shape.has_stroke());
    }

    #[test]
    fn test_gradient_fallback_replaces_transparent_fill() {
        let doc = r##"<vector xmlns:aapt="http://schemas.android.com/aapt"
            android:viewportWidth="24" android:viewportHeight="24">
            <path android:pathData="M0,0h24v24h-24z" android:fillColor="#00000000">
                <aapt:attr name="android:fillColor">
                    <gradient android:type="linear" android:startX="0" android:endX="24">
                        <item android:offset="0" android:color="#FF1FA1FF"/>
                        <item android:offset="1" android:color="#FF000000"/>
                    </gradient>
                </aapt:attr>
            </path>
        </vector>"##;
        let shape = &extract(doc).unwrap().shapes[0];
        assert_eq!(shape.fill_color, Some(Color::rgb(0x1F, 0xA1, 0xFF)));
    }

    #[test]
    fn test_gradient_fallback_for_absent_fill_and_stroke() {
        let doc = r##"<vector android:viewportWidth="24" android:viewportHeight="24">
            <path android:pathData="M0,0L24,24" android:strokeWidth="2">
                <aapt:attr name="android:strokeColor">
                    <gradient android:startColor="#FF00FF00" android:endColor="#FF0000FF"/>
                </aapt:attr>
                <aapt:attr name="android:fillColor">
                    <gradient android:startColor="#FFFF0000" android:endColor="#FF0000FF"/>
                </aapt:attr>
            </path>
        </vector>"##;
        let shape = &extract(doc).unwrap().shapes[0];
        assert_eq!(shape.stroke_color, Some(Color::rgb(0, 0xFF, 0)));
        assert_eq!(shape.fill_color, Some(Color::rgb(0, 0xFF, 0)));
    }

    #[test]
    fn test_gradient_fallback_uses_first_color_in_content_block() {
        let doc = r##"<vector android:viewportWidth="24" android:viewportHeight="24">
            <path android:pathData="M0,0h24v24h-24z" android:fillColor="#00000000"
                android:strokeWidth="2">
                <aapt:attr name="android:strokeColor">
                    <gradient android:startColor="#FF00FF00" android:endColor="#FF000000"/>
                </aapt:attr>
                <aapt:attr name="android:fillColor">
                    <gradient android:startColor="#FFFF0000" android:endColor="#FF000000"/>
                </aapt:attr>
            </path>
        </vector>"##;
        let shape = &extract(doc).unwrap().shapes[0];
        assert_eq!(shape.fill_color, Some(Color::rgb(0, 0xFF, 0)));
        assert_eq!(shape.stroke_color, Some(Color::rgb(0, 0xFF, 0)));
    }

    #[test]
    fn test_panics_become_unexpected_failure() {
        init_logger();
        let result = contain_panics(|| panic!("segment table corrupted"));
        assert_eq!(
            result,
            Err(ExtractError::UnexpectedFailure(
                "segment table corrupted".to_string()
            ))
        );

        let result = contain_panics(|| Err(ExtractError::EmptyInput));
        assert_eq!(result, Err(ExtractError::EmptyInput));
    }

    #[test]
    fn test_reader_matches_extract() {
        assert_eq!(VectorReader::new(ICON).read(), extract(ICON));
        assert_eq!(VectorReader::new("").read(), Err(ExtractError::EmptyInput));
    }

    #[test]
    fn test_gradient_fallback_keeps_explicit_fill_and_skips_unstroked() {
        let doc = r##"<vector android:viewportWidth="24" android:viewportHeight="24">
            <path android:pathData="M0,0" android:fillColor="#123456">
                <aapt:attr name="android:fillColor"><gradient android:startColor="#FFFF0000"/></aapt:attr>
            </path>
            <path android:pathData="M1,1">
                <aapt:attr name="android:strokeColor"><gradient android:startColor="#FFFF0000"/></aapt:attr>
            </path>
            <path android:pathData="M2,2" android:fillColor="#00000000"/>
        </vector>"##;
        let scene = extract(doc).unwrap();
        assert_eq!(scene.shapes[0].fill_color, Some(Color::rgb(0x12, 0x34, 0x56)));
        assert_eq!(scene.shapes[1].stroke_color, None);
        assert_eq!(scene.shapes[1].fill_color, None);
        assert_eq!(scene.shapes[2].fill_color, Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_extraction_is_idempotent() {
        assert_eq!(extract(ICON), extract(ICON));
    }

    #[test]
    fn test_error_messages_are_human_readable() {
        assert_eq!(ExtractError::EmptyInput.to_string(), "Empty input");
        assert_eq!(
            ExtractError::NoPathsFound.to_string(),
            "No <path> elements with android:pathData found."
        );
        assert!(ExtractError::MissingViewport.to_string().contains("viewportWidth"));
    }
}
