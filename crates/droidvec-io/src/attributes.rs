//! Name-anchored attribute lookup over raw markup.
//!
//! Attributes are matched by name rather than by walking an XML tree. A name
//! must be preceded by whitespace, a namespace colon or the start of the
//! block, so `width` never matches inside `strokeWidth` or `viewportWidth`.
//! Values may use either quote style.

use std::sync::LazyLock;

use regex::Regex;

fn attr_regex(name: &str) -> Regex {
    let pattern = format!(
        r#"(?:^|[\s:]){}\s*=\s*(?:"([^"]*)"|'([^']*)')"#,
        regex::escape(name)
    );
    Regex::new(&pattern).unwrap()
}

macro_rules! attributes {
    ($($ident:ident => $name:literal),* $(,)?) => {
        $(
            pub(crate) static $ident: LazyLock<Regex> = LazyLock::new(|| attr_regex($name));
        )*
    };
}

attributes! {
    WIDTH => "width",
    HEIGHT => "height",
    VIEWPORT_WIDTH => "viewportWidth",
    VIEWPORT_HEIGHT => "viewportHeight",
    PATH_DATA => "pathData",
    FILL_COLOR => "fillColor",
    FILL_ALPHA => "fillAlpha",
    FILL_TYPE => "fillType",
    STROKE_COLOR => "strokeColor",
    STROKE_WIDTH => "strokeWidth",
    STROKE_ALPHA => "strokeAlpha",
}

/// A literal `#RRGGBB` or `#AARRGGBB` color anywhere in a block of markup.
static COLOR_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#(?:[0-9A-Fa-f]{8}|[0-9A-Fa-f]{6})\b").unwrap());

/// Value of the first occurrence of the attribute in `block`.
pub(crate) fn find<'a>(attr: &Regex, block: &'a str) -> Option<&'a str> {
    let caps = attr.captures(block)?;
    caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str())
}

/// First literal hex color in `block`.
pub(crate) fn first_color_literal(block: &str) -> Option<&str> {
    COLOR_LITERAL.find(block).map(|m| m.as_str())
}

/// Parse a numeric attribute value, dropping a trailing unit such as `dp`.
pub(crate) fn parse_number(value: &str) -> Option<f64> {
    let number = value
        .trim()
        .trim_end_matches(|c: char| c.is_ascii_alphabetic())
        .trim_end();
    number.parse::<f64>().ok().filter(|v| v.is_finite())
}
