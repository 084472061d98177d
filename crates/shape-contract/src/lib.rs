//! Shape contract for generated canvases
//!
//! This library owns everything that decides what a valid canvas looks like:
//! - **types**: the typed shape model (circle, two rectangle encodings, polygon)
//! - **schema**: structural validation of arbitrary JSON into a [`Canvas`]
//! - **geometry**: canvas-bounds and rectangle-shape checks on a validated canvas
//! - **prompt**: the system instruction that tells a model how to produce a canvas
//!
//! # Example
//!
//! ```rust
//! use shape_contract::{build_shape_prompt, parse_canvas, CanvasSize};
//!
//! let size = CanvasSize::new(100, 100).unwrap();
//! let prompt = build_shape_prompt(size, None);
//! assert!(prompt.contains("0 ≤ x ≤ 100"));
//!
//! let (_raw, canvas) = parse_canvas(
//!     r##"[{"type":"circle","color":"#FF0000","center":{"x":50,"y":50},"radius":10}]"##,
//! )
//! .unwrap();
//! assert_eq!(canvas.len(), 1);
//! ```

pub mod constants;
pub mod geometry;
pub mod prompt;
pub mod schema;
pub mod types;

// Re-exports for convenience
pub use geometry::{check_geometry, GeometryError, GeometryPolicy};
pub use prompt::build_shape_prompt;
pub use schema::{parse_canvas, validate_canvas, SchemaError};
pub use types::{Canvas, CanvasSize, Point, Rectangle, Shape, ShapeKind};
