//! Local stand-in for a provider HTTP API

use axum::Router;

/// Serve `app` on a free localhost port and return its base URL
pub(crate) async fn spawn_provider(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}
