//! System prompt for shape generation
//!
//! Renders the instruction sent as the `system` message. The text states the
//! canvas bounds, the exact output formats, the draw-order rule, the color rule
//! and forbids anything but raw JSON. It is a pure function of its inputs; the
//! rules it states are enforced separately by the schema and geometry checks.

use crate::constants::limits::MIN_POLYGON_VERTICES;
use crate::types::CanvasSize;

/// Output formats, shared by both prompt variants
const SHAPE_FORMATS: &str = r##"1. Circle:
{
  "type": "circle",
  "color": "#RRGGBB",
  "center": { "x": number, "y": number },
  "radius": number
}

2. Square (a rectangle whose width equals its height):
{
  "type": "rectangle",
  "color": "#RRGGBB",
  "top_left": { "x": number, "y": number },
  "width": number,
  "height": number
}

3. Rectangle (any rectangle that is not a square):
{
  "type": "rectangle",
  "color": "#RRGGBB",
  "top_left": { "x": number, "y": number },
  "bottom_right": { "x": number, "y": number }
}

4. Polygon:
{
  "type": "polygon",
  "color": "#RRGGBB",
  "vertices": [
    { "x": number, "y": number },
    { "x": number, "y": number },
    { "x": number, "y": number },
    ...
  ]
}"##;

/// Build the system prompt for a canvas of the given size.
///
/// With `current_canvas` set, the prompt embeds that JSON verbatim and asks
/// for the complete updated canvas; without it, the model draws from scratch.
pub fn build_shape_prompt(size: CanvasSize, current_canvas: Option<&str>) -> String {
    let w = size.width();
    let h = size.height();

    let context = match current_canvas {
        Some(canvas) => format!(
            "The canvas currently contains these shapes, listed in drawing order:\n\
             {canvas}\n\n\
             Return the complete updated canvas: keep the existing shapes you do not \
             change, in their original order, and add or modify shapes as requested.\n\n"
        ),
        None => String::new(),
    };

    format!(
        "You are an assistant that generates only valid JSON, with no explanation and no text before or after it.

The canvas is {w} pixels wide and {h} pixels high.
Every coordinate (x, y) must satisfy:
0 ≤ x ≤ {w} and 0 ≤ y ≤ {h}.

{context}Return a JSON array. Each element of the array must be an object that follows **exactly** one of these formats:

{SHAPE_FORMATS}

Rules:
- Always return a JSON array, even when it contains a single element.
- The array is drawn in order: the first element is painted first and every later element is painted on top of the earlier ones.
- Colors must use the hexadecimal \"#RRGGBB\" format.
- All coordinates must stay inside the canvas (0 ≤ x ≤ {w}, 0 ≤ y ≤ {h}).
- Use format 2 only for squares: width and height must be equal, and top_left.x + width ≤ {w}, top_left.y + height ≤ {h}.
- Use format 3 for every other rectangle: bottom_right.x > top_left.x and bottom_right.y > top_left.y.
- Never give a rectangle both width/height and bottom_right.
- radius, width and height must be strictly positive numbers.
- A polygon has at least {MIN_POLYGON_VERTICES} vertices, listed in order around its boundary.
- Do not add any field that is not shown above.
- Do not include any text outside the JSON.
- Do not wrap the JSON in ```json and ``` markers."
    )
}
