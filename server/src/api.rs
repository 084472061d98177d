//! HTTP surface
//!
//! `POST /api` (and `/api/`) runs the shape pipeline. `GET /api/health`
//! reports liveness and the configured backend. Anything else is served from
//! the built frontend, falling back to `index.html` for client-side routes.

use std::path::Path;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use uuid::Uuid;

use crate::constants::routes;
use crate::error::ApiError;
use crate::pipeline::{DrawRequest, PipelineError, ShapePipeline};

/// Shared state for Axum handlers
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ShapePipeline>,
}

impl AppState {
    pub fn new(pipeline: ShapePipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}

/// Build the application router.
///
/// With `static_dir` set, unmatched paths are served from that directory.
pub fn build_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route(routes::API, post(draw_handler))
        .route(routes::API_SLASH, post(draw_handler))
        .route(routes::HEALTH, get(health_handler));

    if let Some(dir) = static_dir {
        let frontend = ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")));
        router = router.fallback_service(frontend);
    }

    router.layer(cors).with_state(state)
}

// --- Axum Handlers ---

async fn draw_handler(
    State(state): State<AppState>,
    payload: Result<Json<DrawRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let request_id = Uuid::new_v4();

    let Json(request) = payload.map_err(|rejection| {
        log::info!("[{}] Rejected request body: {}", request_id, rejection.body_text());
        ApiError::from(rejection)
    })?;

    log::info!(
        "[{}] Draw request: {}x{}, {} current canvas, prompt {} chars",
        request_id,
        request.width,
        request.height,
        if request.current_canvas.is_some() { "with" } else { "no" },
        request.prompt.chars().count()
    );

    match state.pipeline.run(&request).await {
        Ok(shapes) => {
            log::info!(
                "[{}] Returning {} shapes",
                request_id,
                shapes.as_array().map_or(0, Vec::len)
            );
            Ok(Json(shapes))
        }
        Err(err) => {
            match &err {
                PipelineError::BadRequest(_)
                | PipelineError::InvalidCanvas(_)
                | PipelineError::InvalidCanvasGeometry(_) => {
                    log::info!("[{}] {}", request_id, err)
                }
                PipelineError::GenerationFailure(_) => log::error!("[{}] {}", request_id, err),
            }
            Err(err.into())
        }
    }
}

async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let gateway = state.pipeline.gateway();
    Json(json!({
        "status": "ok",
        "backend": gateway.backend_name(),
        "model": gateway.model(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{gateway_with, FixedBackend};
    use shape_contract::GeometryPolicy;

    const RED_CIRCLE: &str =
        r##"[{"type":"circle","color":"#FF0000","center":{"x":50,"y":50},"radius":10}]"##;

    async fn spawn_app(backend: FixedBackend, static_dir: Option<&Path>) -> String {
        let pipeline = ShapePipeline::new(gateway_with(backend), GeometryPolicy::Enforce);
        let app = build_router(AppState::new(pipeline), static_dir);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn draw_body(current_canvas: Option<&str>) -> Value {
        let mut body = json!({ "prompt": "draw a red circle", "width": 100, "height": 100 });
        if let Some(canvas) = current_canvas {
            body["current_canvas"] = json!(canvas);
        }
        body
    }

    #[tokio::test]
    async fn test_valid_generation_returns_shapes() {
        let base = spawn_app(FixedBackend::text(RED_CIRCLE), None).await;
        let response = reqwest::Client::new()
            .post(format!("{}/api", base))
            .json(&draw_body(None))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, serde_json::from_str::<Value>(RED_CIRCLE).unwrap());
    }

    #[tokio::test]
    async fn test_trailing_slash_route() {
        let base = spawn_app(FixedBackend::text(RED_CIRCLE), None).await;
        let response = reqwest::Client::new()
            .post(format!("{}/api/", base))
            .json(&draw_body(None))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn test_unusable_output_is_opaque_500() {
        for output in [
            "not json",
            r#"[{"type":"circle","color":"red","center":{"x":50,"y":50},"radius":10}]"#,
        ] {
            let base = spawn_app(FixedBackend::text(output), None).await;
            let response = reqwest::Client::new()
                .post(format!("{}/api", base))
                .json(&draw_body(None))
                .send()
                .await
                .unwrap();

            assert_eq!(response.status(), 500);
            let body: Value = response.json().await.unwrap();
            assert_eq!(body, json!({ "detail": "Internal error" }));
        }
    }

    #[tokio::test]
    async fn test_invalid_current_canvas_is_400() {
        let backend = FixedBackend::text(RED_CIRCLE);
        let calls = backend.calls();
        let base = spawn_app(backend, None).await;
        let canvas = r##"[{"type":"polygon","color":"#00FF00","vertices":[{"x":0,"y":0}]}]"##;

        let response = reqwest::Client::new()
            .post(format!("{}/api", base))
            .json(&draw_body(Some(canvas)))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 400);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({ "detail": "Invalid current_canvas" }));
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_current_canvas_is_accepted() {
        let base = spawn_app(FixedBackend::text(RED_CIRCLE), None).await;
        let response = reqwest::Client::new()
            .post(format!("{}/api", base))
            .json(&draw_body(Some("[]")))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn test_missing_fields_are_rejected() {
        let base = spawn_app(FixedBackend::text(RED_CIRCLE), None).await;
        let response = reqwest::Client::new()
            .post(format!("{}/api", base))
            .json(&json!({ "prompt": "no size" }))
            .send()
            .await
            .unwrap();

        assert!(response.status().is_client_error());
        let body: Value = response.json().await.unwrap();
        assert!(body["detail"].is_string());
    }

    #[tokio::test]
    async fn test_zero_width_is_400() {
        let base = spawn_app(FixedBackend::text(RED_CIRCLE), None).await;
        let mut body = draw_body(None);
        body["width"] = json!(0);
        let response = reqwest::Client::new()
            .post(format!("{}/api", base))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 400);
    }

    #[tokio::test]
    async fn test_health_reports_backend() {
        let base = spawn_app(FixedBackend::text(RED_CIRCLE), None).await;
        let body: Value = reqwest::get(format!("{}/api/health", base))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["backend"], "fixed");
        assert_eq!(body["model"], "mistral-large-latest");
    }

    #[tokio::test]
    async fn test_static_frontend_with_index_fallback() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<html>canvas</html>").unwrap();
        std::fs::write(dir.path().join("app.js"), "console.log(1)").unwrap();
        let base = spawn_app(FixedBackend::text(RED_CIRCLE), Some(dir.path())).await;

        let script = reqwest::get(format!("{}/app.js", base)).await.unwrap();
        assert_eq!(script.status(), 200);
        assert_eq!(script.text().await.unwrap(), "console.log(1)");

        let root = reqwest::get(format!("{}/", base)).await.unwrap();
        assert_eq!(root.text().await.unwrap(), "<html>canvas</html>");

        let deep_link = reqwest::get(format!("{}/drawings/42", base)).await.unwrap();
        assert_eq!(deep_link.status(), 200);
        assert_eq!(deep_link.text().await.unwrap(), "<html>canvas</html>");
    }
}
