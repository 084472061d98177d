//! Typed shape model
//!
//! These types are only ever produced by [`crate::schema::validate_canvas`], so
//! holding a [`Canvas`] means the structural contract already holds.

use serde::Serialize;

/// A point in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The two mutually exclusive rectangle encodings
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Rectangle {
    /// Square encoding: origin plus equal width and height
    Sized {
        color: String,
        top_left: Point,
        width: f64,
        height: f64,
    },
    /// General encoding: two opposite corners
    Cornered {
        color: String,
        top_left: Point,
        bottom_right: Point,
    },
}

impl Rectangle {
    pub fn color(&self) -> &str {
        match self {
            Self::Sized { color, .. } | Self::Cornered { color, .. } => color,
        }
    }

    pub fn top_left(&self) -> Point {
        match self {
            Self::Sized { top_left, .. } | Self::Cornered { top_left, .. } => *top_left,
        }
    }

    /// Opposite corner, computed for the sized encoding
    pub fn bottom_right(&self) -> Point {
        match self {
            Self::Sized {
                top_left,
                width,
                height,
                ..
            } => Point::new(top_left.x + width, top_left.y + height),
            Self::Cornered { bottom_right, .. } => *bottom_right,
        }
    }
}

/// A single drawable shape
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Circle {
        color: String,
        center: Point,
        radius: f64,
    },
    Rectangle(Rectangle),
    Polygon {
        color: String,
        vertices: Vec<Point>,
    },
}

/// Discriminator of a [`Shape`], used for logging and error context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Circle,
    Rectangle,
    Polygon,
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Circle => write!(f, "circle"),
            Self::Rectangle => write!(f, "rectangle"),
            Self::Polygon => write!(f, "polygon"),
        }
    }
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Circle { .. } => ShapeKind::Circle,
            Self::Rectangle(_) => ShapeKind::Rectangle,
            Self::Polygon { .. } => ShapeKind::Polygon,
        }
    }

    pub fn color(&self) -> &str {
        match self {
            Self::Circle { color, .. } | Self::Polygon { color, .. } => color,
            Self::Rectangle(rect) => rect.color(),
        }
    }
}

/// Ordered list of shapes. Index order is paint order: earlier shapes are
/// drawn first and end up below later ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Canvas(pub Vec<Shape>);

impl Canvas {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Shape> {
        self.0.iter()
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a Canvas {
    type Item = &'a Shape;
    type IntoIter = std::slice::Iter<'a, Shape>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Canvas dimensions in pixels; both are strictly positive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSize {
    width: u32,
    height: u32,
}

impl CanvasSize {
    /// Returns `None` when either dimension is zero
    pub fn new(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            None
        } else {
            Some(Self { width, height })
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the point lies inside `[0, width] × [0, height]`
    pub fn contains(&self, point: Point) -> bool {
        (0.0..=f64::from(self.width)).contains(&point.x)
            && (0.0..=f64::from(self.height)).contains(&point.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_size_rejects_zero() {
        assert!(CanvasSize::new(0, 10).is_none());
        assert!(CanvasSize::new(10, 0).is_none());
        assert!(CanvasSize::new(1, 1).is_some());
    }

    #[test]
    fn test_contains_is_inclusive() {
        let size = CanvasSize::new(100, 50).unwrap();
        assert!(size.contains(Point::new(0.0, 0.0)));
        assert!(size.contains(Point::new(100.0, 50.0)));
        assert!(!size.contains(Point::new(100.5, 10.0)));
        assert!(!size.contains(Point::new(10.0, -0.1)));
    }

    #[test]
    fn test_sized_rectangle_bottom_right() {
        let rect = Rectangle::Sized {
            color: "#000000".to_string(),
            top_left: Point::new(10.0, 20.0),
            width: 5.0,
            height: 5.0,
        };
        assert_eq!(rect.bottom_right(), Point::new(15.0, 25.0));
    }

    #[test]
    fn test_shape_serializes_with_type_tag() {
        let shape = Shape::Rectangle(Rectangle::Cornered {
            color: "#00FF00".to_string(),
            top_left: Point::new(1.0, 2.0),
            bottom_right: Point::new(3.0, 4.0),
        });
        let json = serde_json::to_value(&shape).unwrap();
        assert_eq!(json["type"], "rectangle");
        assert_eq!(json["bottom_right"]["x"], 3.0);
        assert!(json.get("width").is_none());
    }
}
