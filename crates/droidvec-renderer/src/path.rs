//! Path data interpretation.
//!
//! Android `pathData` uses the SVG path mini-language. [`PathDataParser`]
//! turns it into absolute [`PathCommand`]s and rejects malformed input, the
//! way a drawing surface's native path constructor would.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use droidvec_core::Point;

// ── Commands ──────────────────────────────────────────────────────────

/// A path segment in absolute viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    QuadTo {
        control: Point,
        end: Point,
    },
    CubicTo {
        control1: Point,
        control2: Point,
        end: Point,
    },
    ArcTo {
        radius_x: f64,
        radius_y: f64,
        /// X-axis rotation in degrees.
        rotation: f64,
        large_arc: bool,
        sweep: bool,
        end: Point,
    },
    Close,
}

/// Interpreted geometry for one shape, together with the string it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathGeometry {
    source: String,
    commands: Vec<PathCommand>,
}

impl PathGeometry {
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Number of subpaths (one per moveto).
    pub fn subpath_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, PathCommand::MoveTo(_)))
            .count()
    }
}

impl FromStr for PathGeometry {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PathDataParser.interpret(s)
    }
}

// ── Errors ────────────────────────────────────────────────────────────

#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum PathError {
    #[error("Path data is empty")]
    Empty,

    #[error("Path data must start with a moveto command (offset {position})")]
    MissingMoveTo { position: usize },

    #[error("Unknown path command '{command}' at offset {position}")]
    UnknownCommand { command: char, position: usize },

    #[error("Missing or invalid argument for '{command}' at offset {position}")]
    MissingArgument { command: char, position: usize },

    #[error("Invalid arc flag at offset {position}")]
    InvalidArcFlag { position: usize },

    #[error("Unexpected character '{character}' at offset {position}")]
    UnexpectedCharacter { character: char, position: usize },
}

// ── Interpreter ───────────────────────────────────────────────────────

/// Turns a path string into geometry a drawing surface can consume.
pub trait PathInterpreter {
    fn interpret(&self, path_data: &str) -> Result<PathGeometry, PathError>;
}

/// The built-in path mini-language parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathDataParser;

impl PathInterpreter for PathDataParser {
    fn interpret(&self, path_data: &str) -> Result<PathGeometry, PathError> {
        let commands = PathBuilder::new(path_data).build()?;
        Ok(PathGeometry {
            source: path_data.to_string(),
            commands,
        })
    }
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            bytes: input.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn skip_separators(&mut self) {
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() || b == b',' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn starts_number(&self) -> bool {
        matches!(self.peek(), Some(b'0'..=b'9' | b'.' | b'-' | b'+'))
    }

    fn digits(&mut self) -> bool {
        let start = self.pos;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        self.pos > start
    }

    /// Read one number; `1.5.5` is two numbers and `-1-2` is two numbers.
    fn number(&mut self) -> Option<f64> {
        self.skip_separators();
        let start = self.pos;

        if matches!(self.peek(), Some(b'+' | b'-')) {
            self.pos += 1;
        }
        let mut has_digits = self.digits();
        if self.peek() == Some(b'.') {
            self.pos += 1;
            has_digits |= self.digits();
        }
        if !has_digits {
            self.pos = start;
            return None;
        }

        if matches!(self.peek(), Some(b'e' | b'E')) {
            let mark = self.pos;
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if !self.digits() {
                self.pos = mark;
            }
        }

        std::str::from_utf8(&self.bytes[start..self.pos])
            .ok()?
            .parse()
            .ok()
    }

    fn flag(&mut self) -> Result<bool, PathError> {
        self.skip_separators();
        let position = self.pos;
        match self.peek() {
            Some(b'0') => {
                self.pos += 1;
                Ok(false)
            }
            Some(b'1') => {
                self.pos += 1;
                Ok(true)
            }
            _ => Err(PathError::InvalidArcFlag { position }),
        }
    }
}

struct PathBuilder<'a> {
    cursor: Cursor<'a>,
    commands: Vec<PathCommand>,
    current: Point,
    subpath_start: Point,
    /// Second control point of the previous C/S segment.
    last_cubic: Option<Point>,
    /// Control point of the previous Q/T segment.
    last_quad: Option<Point>,
}

impl<'a> PathBuilder<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            cursor: Cursor::new(input),
            commands: Vec::new(),
            current: Point::default(),
            subpath_start: Point::default(),
            last_cubic: None,
            last_quad: None,
        }
    }

    fn build(mut self) -> Result<Vec<PathCommand>, PathError> {
        self.cursor.skip_separators();
        if self.cursor.at_end() {
            return Err(PathError::Empty);
        }

        let mut previous: Option<u8> = None;

        loop {
            self.cursor.skip_separators();
            let position = self.cursor.pos;
            let Some(byte) = self.cursor.peek() else {
                break;
            };

            let command = if byte.is_ascii_alphabetic() {
                self.cursor.pos += 1;
                byte
            } else if self.cursor.starts_number() {
                // Implicit repetition; extra moveto pairs are linetos.
                match previous {
                    Some(b'M') => b'L',
                    Some(b'm') => b'l',
                    Some(b'Z' | b'z') | None => {
                        return Err(PathError::UnexpectedCharacter {
                            character: byte as char,
                            position,
                        })
                    }
                    Some(prev) => prev,
                }
            } else {
                return Err(PathError::UnexpectedCharacter {
                    character: byte as char,
                    position,
                });
            };

            if self.commands.is_empty() && !matches!(command, b'M' | b'm') {
                return Err(PathError::MissingMoveTo { position });
            }

            self.segment(command, position)?;
            previous = Some(command);
        }

        Ok(self.commands)
    }

    fn arg(&mut self, command: u8) -> Result<f64, PathError> {
        let position = self.cursor.pos;
        self.cursor.number().ok_or(PathError::MissingArgument {
            command: command as char,
            position,
        })
    }

    fn point(&mut self, command: u8, relative: bool) -> Result<Point, PathError> {
        let x = self.arg(command)?;
        let y = self.arg(command)?;
        Ok(if relative {
            self.current.translate(x, y)
        } else {
            Point::new(x, y)
        })
    }

    fn segment(&mut self, command: u8, position: usize) -> Result<(), PathError> {
        let relative = command.is_ascii_lowercase();
        let mut cubic_control = None;
        let mut quad_control = None;

        match command.to_ascii_uppercase() {
            b'M' => {
                let end = self.point(command, relative)?;
                self.commands.push(PathCommand::MoveTo(end));
                self.current = end;
                self.subpath_start = end;
            }
            b'L' => {
                let end = self.point(command, relative)?;
                self.line_to(end);
            }
            b'H' => {
                let x = self.arg(command)?;
                let x = if relative { self.current.x + x } else { x };
                self.line_to(Point::new(x, self.current.y));
            }
            b'V' => {
                let y = self.arg(command)?;
                let y = if relative { self.current.y + y } else { y };
                self.line_to(Point::new(self.current.x, y));
            }
            b'C' => {
                let control1 = self.point(command, relative)?;
                let control2 = self.point(command, relative)?;
                let end = self.point(command, relative)?;
                self.curve_to(control1, control2, end);
                cubic_control = Some(control2);
            }
            b'S' => {
                let control1 = self
                    .last_cubic
                    .map_or(self.current, |c| c.reflect_about(&self.current));
                let control2 = self.point(command, relative)?;
                let end = self.point(command, relative)?;
                self.curve_to(control1, control2, end);
                cubic_control = Some(control2);
            }
            b'Q' => {
                let control = self.point(command, relative)?;
                let end = self.point(command, relative)?;
                self.quad_to(control, end);
                quad_control = Some(control);
            }
            b'T' => {
                let control = self
                    .last_quad
                    .map_or(self.current, |c| c.reflect_about(&self.current));
                let end = self.point(command, relative)?;
                self.quad_to(control, end);
                quad_control = Some(control);
            }
            b'A' => {
                let radius_x = self.arg(command)?.abs();
                let radius_y = self.arg(command)?.abs();
                let rotation = self.arg(command)?;
                let large_arc = self.cursor.flag()?;
                let sweep = self.cursor.flag()?;
                let end = self.point(command, relative)?;
                self.commands.push(PathCommand::ArcTo {
                    radius_x,
                    radius_y,
                    rotation,
                    large_arc,
                    sweep,
                    end,
                });
                self.current = end;
            }
            b'Z' => {
                self.commands.push(PathCommand::Close);
                self.current = self.subpath_start;
            }
            _ => {
                return Err(PathError::UnknownCommand {
                    command: command as char,
                    position,
                })
            }
        }

        self.last_cubic = cubic_control;
        self.last_quad = quad_control;
        Ok(())
    }

    fn line_to(&mut self, end: Point) {
        self.commands.push(PathCommand::LineTo(end));
        self.current = end;
    }

    fn curve_to(&mut self, control1: Point, control2: Point, end: Point) {
        self.commands.push(PathCommand::CubicTo {
            control1,
            control2,
            end,
        });
        self.current = end;
    }

    fn quad_to(&mut self, control: Point, end: Point) {
        self.commands.push(PathCommand::QuadTo { control, end });
        self.current = end;
    }
}
