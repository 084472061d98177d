//! Shape generation pipeline
//!
//! One request moves through four states:
//! 1. **Receive**: the decoded [`DrawRequest`] is checked for a usable canvas size
//! 2. **Validate-Input**: a supplied `current_canvas` must pass the shape schema
//!    and (under [`GeometryPolicy::Enforce`]) fit the canvas
//! 3. **Generate**: the system prompt and the user text go to the model
//! 4. **Validate-Output**: the reply must parse as JSON, pass the schema, and
//!    (under [`GeometryPolicy::Enforce`]) fit the canvas
//!
//! Every failure is terminal for the request. Transient transport failures are
//! retried inside the gateway; unusable model output never is.

use inference::{GatewayError, SharedGateway};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shape_contract::{
    build_shape_prompt, parse_canvas, validate_canvas, Canvas, CanvasSize, GeometryError,
    GeometryPolicy, SchemaError,
};

use crate::constants::limits::LOGGED_OUTPUT_CHARS;

/// Inbound generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawRequest {
    /// Free-text drawing instruction from the user
    pub prompt: String,
    /// JSON text of the canvas being edited; absent when drawing from scratch
    #[serde(default)]
    pub current_canvas: Option<String>,
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
}

/// Why model output could not be used
#[derive(Debug, thiserror::Error)]
pub enum GenerationFailure {
    #[error("Model call failed: {0}")]
    Model(#[from] GatewayError),

    #[error("Model output is not valid JSON: {0}")]
    MalformedOutput(#[source] serde_json::Error),

    #[error("Model output breaks the shape schema: {0}")]
    NonConformingOutput(#[source] SchemaError),

    #[error("Model output breaks canvas geometry: {0}")]
    OutOfBounds(#[source] GeometryError),
}

/// Terminal pipeline outcomes other than success
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid current canvas: {0}")]
    InvalidCanvas(#[source] SchemaError),

    #[error("Current canvas breaks canvas geometry: {0}")]
    InvalidCanvasGeometry(#[source] GeometryError),

    #[error("Generation failed: {0}")]
    GenerationFailure(#[from] GenerationFailure),
}

/// Runs requests against a shared gateway. Holds no per-request state.
pub struct ShapePipeline {
    gateway: SharedGateway,
    geometry: GeometryPolicy,
}

impl ShapePipeline {
    pub fn new(gateway: SharedGateway, geometry: GeometryPolicy) -> Self {
        Self { gateway, geometry }
    }

    pub fn gateway(&self) -> &SharedGateway {
        &self.gateway
    }

    /// Run one request to completion.
    ///
    /// On success returns the model's JSON array exactly as parsed: shapes
    /// are not reordered, deduplicated or rewritten.
    pub async fn run(&self, request: &DrawRequest) -> Result<Value, PipelineError> {
        // Receive
        let size = CanvasSize::new(request.width, request.height).ok_or_else(|| {
            PipelineError::BadRequest(format!(
                "canvas size must be positive, got {}x{}",
                request.width, request.height
            ))
        })?;

        // Validate-Input
        // The caller's text goes into the prompt as sent; re-serializing the
        // parsed value would reorder object keys.
        let canvas_context = request.current_canvas.as_deref();
        if let Some(text) = canvas_context {
            let (_, canvas) = parse_canvas(text).map_err(PipelineError::InvalidCanvas)?;
            self.geometry
                .apply(&canvas, size)
                .map_err(PipelineError::InvalidCanvasGeometry)?;
            log::debug!("Current canvas: {}", describe(&canvas));
        }

        // Generate
        let system_prompt = build_shape_prompt(size, canvas_context);
        let output = self
            .gateway
            .complete(&system_prompt, &request.prompt)
            .await
            .map_err(GenerationFailure::Model)?;

        // Validate-Output
        validate_output(&output, size, self.geometry).map_err(|err| {
            log::warn!("Rejected model output: {}", truncate_for_log(&output));
            PipelineError::from(err)
        })
    }
}

/// One-line summary for logs, e.g. `3 shapes: circle #FF0000, polygon #00FF00, ...`
fn describe(canvas: &Canvas) -> String {
    let shapes: Vec<String> = canvas
        .iter()
        .map(|shape| format!("{} {}", shape.kind(), shape.color()))
        .collect();
    format!("{} shapes: {}", canvas.len(), shapes.join(", "))
}

fn truncate_for_log(text: &str) -> String {
    match text.char_indices().nth(LOGGED_OUTPUT_CHARS) {
        Some((cut, _)) => format!("{}... ({} bytes total)", &text[..cut], text.len()),
        None => text.to_string(),
    }
}

/// Parse and check raw model output against the shape contract
pub fn validate_output(
    output: &str,
    size: CanvasSize,
    geometry: GeometryPolicy,
) -> Result<Value, GenerationFailure> {
    let value: Value = serde_json::from_str(output).map_err(GenerationFailure::MalformedOutput)?;
    let canvas = validate_canvas(&value).map_err(GenerationFailure::NonConformingOutput)?;
    geometry
        .apply(&canvas, size)
        .map_err(GenerationFailure::OutOfBounds)?;
    log::debug!("Model produced {}", describe(&canvas));
    Ok(value)
}
