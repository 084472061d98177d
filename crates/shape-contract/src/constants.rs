//! Contract constants
//!
//! Single source of truth for the field names and limits of the shape contract.
//! The schema validator and the prompt builder both read from here so the
//! instruction given to the model never drifts from what is enforced.

/// Field names used in shape objects
pub mod fields {
    pub const TYPE: &str = "type";
    pub const COLOR: &str = "color";
    pub const CENTER: &str = "center";
    pub const RADIUS: &str = "radius";
    pub const TOP_LEFT: &str = "top_left";
    pub const BOTTOM_RIGHT: &str = "bottom_right";
    pub const WIDTH: &str = "width";
    pub const HEIGHT: &str = "height";
    pub const VERTICES: &str = "vertices";
    pub const X: &str = "x";
    pub const Y: &str = "y";
}

/// Values of the `type` discriminator
pub mod kinds {
    pub const CIRCLE: &str = "circle";
    pub const RECTANGLE: &str = "rectangle";
    pub const POLYGON: &str = "polygon";
}

/// Numeric and format limits
pub mod limits {
    /// Minimum number of vertices in a polygon
    pub const MIN_POLYGON_VERTICES: usize = 3;
    /// Pattern every color string must match
    pub const COLOR_PATTERN: &str = "^#[0-9A-Fa-f]{6}$";
}
