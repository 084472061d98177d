//! Geometry checks on a structurally valid canvas
//!
//! The structural schema cannot express rules that depend on the canvas size
//! or relate two fields of the same shape. Those rules are given to the model
//! as instructions, and checked here:
//! - every point lies within `[0, width] × [0, height]`
//! - a sized rectangle is a square and fits entirely inside the canvas
//! - a cornered rectangle has `bottom_right` strictly below and right of `top_left`
//!
//! Circles are checked by their center only; the disc may extend past the edge.

use serde::{Deserialize, Serialize};

use crate::types::{Canvas, CanvasSize, Point, Rectangle, Shape};

/// A geometry rule violated by one shape
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("Shape {index}: {what} ({x}, {y}) lies outside the {width}x{height} canvas")]
    OutOfBounds {
        index: usize,
        what: String,
        x: f64,
        y: f64,
        width: u32,
        height: u32,
    },

    #[error("Shape {index}: sized rectangle must be square, got {width}x{height}")]
    NotSquare { index: usize, width: f64, height: f64 },

    #[error("Shape {index}: bottom_right must be strictly greater than top_left on both axes")]
    InvertedCorners { index: usize },
}

/// How geometry violations on generated output are treated
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GeometryPolicy {
    /// Violations reject the canvas
    #[default]
    Enforce,
    /// Violations are logged and the canvas is accepted anyway
    Advisory,
}

impl std::str::FromStr for GeometryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "enforce" => Ok(Self::Enforce),
            "advisory" => Ok(Self::Advisory),
            other => Err(format!("unknown geometry policy '{}'", other)),
        }
    }
}

impl GeometryPolicy {
    /// Apply the policy to a canvas. Under `Advisory` every violation is
    /// logged and `Ok` is returned.
    pub fn apply(&self, canvas: &Canvas, size: CanvasSize) -> Result<(), GeometryError> {
        match self {
            Self::Enforce => check_geometry(canvas, size),
            Self::Advisory => {
                for violation in violations(canvas, size) {
                    log::warn!("Accepting canvas despite geometry violation: {}", violation);
                }
                Ok(())
            }
        }
    }
}

/// Check every shape; returns the first violation in paint order
pub fn check_geometry(canvas: &Canvas, size: CanvasSize) -> Result<(), GeometryError> {
    match violations(canvas, size).into_iter().next() {
        Some(violation) => Err(violation),
        None => Ok(()),
    }
}

/// Collect all violations (not just the first)
pub fn violations(canvas: &Canvas, size: CanvasSize) -> Vec<GeometryError> {
    let mut errors = Vec::new();
    for (index, shape) in canvas.iter().enumerate() {
        check_shape(index, shape, size, &mut errors);
    }
    errors
}

fn check_shape(index: usize, shape: &Shape, size: CanvasSize, errors: &mut Vec<GeometryError>) {
    match shape {
        Shape::Circle { center, .. } => check_point(index, "center", *center, size, errors),
        Shape::Rectangle(rect) => {
            if let Rectangle::Sized { width, height, .. } = rect {
                if width != height {
                    errors.push(GeometryError::NotSquare {
                        index,
                        width: *width,
                        height: *height,
                    });
                }
            }
            if let Rectangle::Cornered {
                top_left,
                bottom_right,
                ..
            } = rect
            {
                if bottom_right.x <= top_left.x || bottom_right.y <= top_left.y {
                    errors.push(GeometryError::InvertedCorners { index });
                }
            }
            check_point(index, "top_left", rect.top_left(), size, errors);
            check_point(index, "bottom_right", rect.bottom_right(), size, errors);
        }
        Shape::Polygon { vertices, .. } => {
            for (i, vertex) in vertices.iter().enumerate() {
                check_point(index, &format!("vertex {}", i), *vertex, size, errors);
            }
        }
    }
}

fn check_point(
    index: usize,
    what: &str,
    point: Point,
    size: CanvasSize,
    errors: &mut Vec<GeometryError>,
) {
    if !size.contains(point) {
        errors.push(GeometryError::OutOfBounds {
            index,
            what: what.to_string(),
            x: point.x,
            y: point.y,
            width: size.width(),
            height: size.height(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::validate_canvas;
    use serde_json::json;

    fn size() -> CanvasSize {
        CanvasSize::new(100, 80).unwrap()
    }

    fn canvas(value: serde_json::Value) -> Canvas {
        validate_canvas(&value).unwrap()
    }

    #[test]
    fn test_in_bounds_canvas_passes() {
        let c = canvas(json!([
            {"type": "circle", "color": "#FF0000", "center": {"x": 100, "y": 80}, "radius": 300},
            {"type": "rectangle", "color": "#FF0000", "top_left": {"x": 0, "y": 0}, "width": 80, "height": 80},
            {"type": "rectangle", "color": "#FF0000", "top_left": {"x": 10, "y": 10}, "bottom_right": {"x": 90, "y": 20}},
            {"type": "polygon", "color": "#FF0000", "vertices": [{"x": 0, "y": 0}, {"x": 100, "y": 0}, {"x": 50, "y": 80}]}
        ]));
        assert_eq!(check_geometry(&c, size()), Ok(()));
    }

    #[test]
    fn test_circle_center_out_of_bounds() {
        let c = canvas(json!([
            {"type": "circle", "color": "#FF0000", "center": {"x": 101, "y": 10}, "radius": 1}
        ]));
        assert!(matches!(
            check_geometry(&c, size()),
            Err(GeometryError::OutOfBounds { index: 0, .. })
        ));
    }

    #[test]
    fn test_square_overflowing_canvas() {
        let c = canvas(json!([
            {"type": "rectangle", "color": "#FF0000", "top_left": {"x": 50, "y": 50}, "width": 40, "height": 40}
        ]));
        match check_geometry(&c, size()) {
            Err(GeometryError::OutOfBounds { what, .. }) => assert_eq!(what, "bottom_right"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_sized_rectangle_must_be_square() {
        let c = canvas(json!([
            {"type": "rectangle", "color": "#FF0000", "top_left": {"x": 0, "y": 0}, "width": 10, "height": 20}
        ]));
        assert!(matches!(
            check_geometry(&c, size()),
            Err(GeometryError::NotSquare { .. })
        ));
    }

    #[test]
    fn test_inverted_corners() {
        let c = canvas(json!([
            {"type": "rectangle", "color": "#FF0000", "top_left": {"x": 50, "y": 10}, "bottom_right": {"x": 40, "y": 20}}
        ]));
        assert_eq!(
            check_geometry(&c, size()),
            Err(GeometryError::InvertedCorners { index: 0 })
        );
    }

    #[test]
    fn test_polygon_vertex_out_of_bounds() {
        let c = canvas(json!([
            {"type": "polygon", "color": "#FF0000", "vertices": [{"x": 0, "y": 0}, {"x": 10, "y": -1}, {"x": 5, "y": 5}]}
        ]));
        match check_geometry(&c, size()) {
            Err(GeometryError::OutOfBounds { what, .. }) => assert_eq!(what, "vertex 1"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_violations_collects_all() {
        let c = canvas(json!([
            {"type": "circle", "color": "#FF0000", "center": {"x": 500, "y": 10}, "radius": 1},
            {"type": "rectangle", "color": "#FF0000", "top_left": {"x": 0, "y": 0}, "width": 10, "height": 20}
        ]));
        assert_eq!(violations(&c, size()).len(), 2);
    }

    #[test]
    fn test_advisory_policy_accepts_out_of_bounds_output() {
        // Advisory mode deliberately keeps bounds as an instruction only.
        let c = canvas(json!([
            {"type": "circle", "color": "#FF0000", "center": {"x": 500, "y": 500}, "radius": 1}
        ]));
        assert!(GeometryPolicy::Advisory.apply(&c, size()).is_ok());
        assert!(GeometryPolicy::Enforce.apply(&c, size()).is_err());
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("enforce".parse::<GeometryPolicy>(), Ok(GeometryPolicy::Enforce));
        assert_eq!(" Advisory ".parse::<GeometryPolicy>(), Ok(GeometryPolicy::Advisory));
        assert!("strict".parse::<GeometryPolicy>().is_err());
        assert_eq!(GeometryPolicy::default(), GeometryPolicy::Enforce);
    }
}
