//! Structural validation of shape documents
//!
//! Turns an arbitrary JSON value into a typed [`Canvas`], or rejects it.
//! The accepted universe is closed: every element must be an object matching
//! exactly one of circle, square rectangle, cornered rectangle or polygon, with
//! all required fields present, correctly typed, and nothing else.
//!
//! Errors carry the element index and field path so they can be logged.
//! Callers at the HTTP boundary are expected to collapse them into an opaque
//! failure.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::constants::{fields, kinds, limits};
use crate::types::{Canvas, Point, Rectangle, Shape};

static COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(limits::COLOR_PATTERN).expect("color pattern is a valid regex"));

/// Reasons a document fails the shape contract
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Invalid JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("Canvas must be a JSON array, got {found}")]
    NotAnArray { found: &'static str },

    #[error("Shape {index}: expected an object, got {found}")]
    NotAnObject { index: usize, found: &'static str },

    #[error("Shape {index}: missing required field '{field}'")]
    MissingField { index: usize, field: String },

    #[error("Shape {index}: unexpected field '{field}'")]
    UnexpectedField { index: usize, field: String },

    #[error("Shape {index}: field '{field}' must be {expected}")]
    WrongType {
        index: usize,
        field: String,
        expected: &'static str,
    },

    #[error("Shape {index}: unknown shape type '{kind}'")]
    UnknownKind { index: usize, kind: String },

    #[error("Shape {index}: color '{value}' is not in #RRGGBB format")]
    InvalidColor { index: usize, value: String },

    #[error("Shape {index}: field '{field}' must be strictly positive, got {value}")]
    NonPositive {
        index: usize,
        field: String,
        value: f64,
    },

    #[error("Shape {index}: polygon needs at least {min} vertices, got {count}")]
    TooFewVertices {
        index: usize,
        count: usize,
        min: usize,
    },

    #[error("Shape {index}: rectangle mixes width/height with bottom_right")]
    AmbiguousRectangle { index: usize },

    #[error("Shape {index}: rectangle needs either width/height or bottom_right")]
    NoRectangleEncoding { index: usize },
}

/// Parse JSON text and validate it as a canvas.
///
/// Returns the parsed value alongside the typed canvas so callers can hand
/// back exactly what was received.
pub fn parse_canvas(text: &str) -> Result<(Value, Canvas), SchemaError> {
    let value: Value = serde_json::from_str(text)?;
    let canvas = validate_canvas(&value)?;
    Ok((value, canvas))
}

/// Validate an already-parsed JSON value as a canvas.
///
/// An empty array is a valid canvas. Element order is preserved.
pub fn validate_canvas(value: &Value) -> Result<Canvas, SchemaError> {
    let items = value.as_array().ok_or(SchemaError::NotAnArray {
        found: json_type(value),
    })?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| validate_shape(index, item))
        .collect::<Result<Vec<_>, _>>()
        .map(Canvas)
}

fn validate_shape(index: usize, value: &Value) -> Result<Shape, SchemaError> {
    let object = value.as_object().ok_or(SchemaError::NotAnObject {
        index,
        found: json_type(value),
    })?;
    let reader = ObjectReader::new(index, object, "");

    let kind = match object.get(fields::TYPE) {
        Some(Value::String(kind)) => kind.as_str(),
        Some(_) => {
            return Err(SchemaError::WrongType {
                index,
                field: fields::TYPE.to_string(),
                expected: "a string",
            })
        }
        None => {
            return Err(SchemaError::MissingField {
                index,
                field: fields::TYPE.to_string(),
            })
        }
    };

    match kind {
        kinds::CIRCLE => {
            reader.closed(&[fields::TYPE, fields::COLOR, fields::CENTER, fields::RADIUS])?;
            Ok(Shape::Circle {
                color: reader.color()?,
                center: reader.point(fields::CENTER)?,
                radius: reader.positive(fields::RADIUS)?,
            })
        }
        kinds::RECTANGLE => validate_rectangle(&reader).map(Shape::Rectangle),
        kinds::POLYGON => {
            reader.closed(&[fields::TYPE, fields::COLOR, fields::VERTICES])?;
            Ok(Shape::Polygon {
                color: reader.color()?,
                vertices: reader.vertices()?,
            })
        }
        other => Err(SchemaError::UnknownKind {
            index,
            kind: other.to_string(),
        }),
    }
}

/// Rectangles are a `oneOf`: an object that carries fields of both encodings
/// matches neither, and is reported as ambiguous rather than resolved.
fn validate_rectangle(reader: &ObjectReader<'_>) -> Result<Rectangle, SchemaError> {
    let sized = reader.has(fields::WIDTH) || reader.has(fields::HEIGHT);
    let cornered = reader.has(fields::BOTTOM_RIGHT);

    match (sized, cornered) {
        (true, true) => Err(SchemaError::AmbiguousRectangle {
            index: reader.index,
        }),
        (false, false) => Err(SchemaError::NoRectangleEncoding {
            index: reader.index,
        }),
        (true, false) => {
            reader.closed(&[
                fields::TYPE,
                fields::COLOR,
                fields::TOP_LEFT,
                fields::WIDTH,
                fields::HEIGHT,
            ])?;
            Ok(Rectangle::Sized {
                color: reader.color()?,
                top_left: reader.point(fields::TOP_LEFT)?,
                width: reader.positive(fields::WIDTH)?,
                height: reader.positive(fields::HEIGHT)?,
            })
        }
        (false, true) => {
            reader.closed(&[
                fields::TYPE,
                fields::COLOR,
                fields::TOP_LEFT,
                fields::BOTTOM_RIGHT,
            ])?;
            Ok(Rectangle::Cornered {
                color: reader.color()?,
                top_left: reader.point(fields::TOP_LEFT)?,
                bottom_right: reader.point(fields::BOTTOM_RIGHT)?,
            })
        }
    }
}

/// Field accessor over one JSON object, tracking the shape index and the
/// path prefix for error reporting.
struct ObjectReader<'a> {
    index: usize,
    object: &'a Map<String, Value>,
    prefix: String,
}

impl<'a> ObjectReader<'a> {
    fn new(index: usize, object: &'a Map<String, Value>, prefix: &str) -> Self {
        Self {
            index,
            object,
            prefix: prefix.to_string(),
        }
    }

    fn path(&self, field: &str) -> String {
        if self.prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", self.prefix, field)
        }
    }

    fn has(&self, field: &str) -> bool {
        self.object.contains_key(field)
    }

    /// Require every listed field and reject anything else
    fn closed(&self, allowed: &[&str]) -> Result<(), SchemaError> {
        for field in allowed {
            if !self.has(field) {
                return Err(SchemaError::MissingField {
                    index: self.index,
                    field: self.path(field),
                });
            }
        }
        if let Some(extra) = self.object.keys().find(|key| !allowed.contains(&key.as_str())) {
            return Err(SchemaError::UnexpectedField {
                index: self.index,
                field: self.path(extra),
            });
        }
        Ok(())
    }

    fn get(&self, field: &str) -> Result<&'a Value, SchemaError> {
        self.object
            .get(field)
            .ok_or_else(|| SchemaError::MissingField {
                index: self.index,
                field: self.path(field),
            })
    }

    fn number(&self, field: &str) -> Result<f64, SchemaError> {
        self.get(field)?
            .as_f64()
            .ok_or_else(|| SchemaError::WrongType {
                index: self.index,
                field: self.path(field),
                expected: "a number",
            })
    }

    fn positive(&self, field: &str) -> Result<f64, SchemaError> {
        let value = self.number(field)?;
        if value > 0.0 {
            Ok(value)
        } else {
            Err(SchemaError::NonPositive {
                index: self.index,
                field: self.path(field),
                value,
            })
        }
    }

    fn color(&self) -> Result<String, SchemaError> {
        let value = self
            .get(fields::COLOR)?
            .as_str()
            .ok_or_else(|| SchemaError::WrongType {
                index: self.index,
                field: self.path(fields::COLOR),
                expected: "a string",
            })?;
        if COLOR_RE.is_match(value) {
            Ok(value.to_string())
        } else {
            Err(SchemaError::InvalidColor {
                index: self.index,
                value: value.to_string(),
            })
        }
    }

    fn point(&self, field: &str) -> Result<Point, SchemaError> {
        let path = self.path(field);
        point_at(self.index, self.get(field)?, &path)
    }

    fn vertices(&self) -> Result<Vec<Point>, SchemaError> {
        let items = self
            .get(fields::VERTICES)?
            .as_array()
            .ok_or_else(|| SchemaError::WrongType {
                index: self.index,
                field: self.path(fields::VERTICES),
                expected: "an array of points",
            })?;

        if items.len() < limits::MIN_POLYGON_VERTICES {
            return Err(SchemaError::TooFewVertices {
                index: self.index,
                count: items.len(),
                min: limits::MIN_POLYGON_VERTICES,
            });
        }

        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let path = format!("{}[{}]", self.path(fields::VERTICES), i);
                point_at(self.index, item, &path)
            })
            .collect()
    }
}

fn point_at(index: usize, value: &Value, path: &str) -> Result<Point, SchemaError> {
    let object = value.as_object().ok_or_else(|| SchemaError::WrongType {
        index,
        field: path.to_string(),
        expected: "an object with numeric x and y",
    })?;
    let reader = ObjectReader::new(index, object, path);
    reader.closed(&[fields::X, fields::Y])?;
    Ok(Point::new(reader.number(fields::X)?, reader.number(fields::Y)?))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
