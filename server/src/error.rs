//! HTTP error mapping
//!
//! Clients only ever see a short `{"detail": ...}` body. The underlying cause
//! is logged by the handler and not echoed back.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::constants::messages;
use crate::pipeline::PipelineError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Body could not be decoded into a request
    #[error("Rejected request body: {0}")]
    Rejected(#[from] JsonRejection),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid current canvas")]
    InvalidCanvas,

    #[error("Internal error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Rejected(rejection) => rejection.status(),
            Self::BadRequest(_) | Self::InvalidCanvas => StatusCode::BAD_REQUEST,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn detail(&self) -> String {
        match self {
            Self::Rejected(rejection) => rejection.body_text(),
            Self::BadRequest(reason) => reason.clone(),
            Self::InvalidCanvas => messages::INVALID_CANVAS.to_string(),
            Self::Internal => messages::INTERNAL_ERROR.to_string(),
        }
    }
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::BadRequest(reason) => Self::BadRequest(reason),
            PipelineError::InvalidCanvas(_) | PipelineError::InvalidCanvasGeometry(_) => {
                Self::InvalidCanvas
            }
            PipelineError::GenerationFailure(_) => Self::Internal,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "detail": self.detail() }))).into_response()
    }
}
