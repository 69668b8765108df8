//! Local HTTP server for installed course content.

use crate::core::report::ReportSink;
use crate::core::resolver::{is_safe_relative, resolve_content_path};
use crate::error::{CourseError, Result};
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Router;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceExt;
use tower_http::services::ServeFile;

/// Every request goes through the fallback handler; there are no routes.
pub fn create_router(content_root: PathBuf) -> Router {
    Router::new()
        .fallback(serve_content)
        .with_state(Arc::new(content_root))
}

async fn serve_content(State(root): State<Arc<PathBuf>>, request: Request) -> Response {
    let Ok(decoded) = urlencoding::decode(request.uri().path()) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let relative = resolve_content_path(&decoded, &root);
    tracing::debug!(uri = %request.uri(), resolved = %relative.display(), "content request");

    if !is_safe_relative(&relative) {
        return StatusCode::NOT_FOUND.into_response();
    }

    let path = root.join(&relative);
    let is_file = tokio::fs::metadata(&path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false);
    if !is_file {
        tracing::debug!(path = %path.display(), "not found");
        return StatusCode::NOT_FOUND.into_response();
    }

    match ServeFile::new(path).oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}

/// Serves `content_root` on `localhost:<port>` until Ctrl+C.
pub async fn start_course_server(
    content_root: PathBuf,
    port: u16,
    sink: &mut dyn ReportSink,
) -> Result<()> {
    let address = SocketAddr::from((Ipv4Addr::LOCALHOST, port));
    let listener = TcpListener::bind(address).await?;

    tracing::info!(address = %address, root = %content_root.display(), "course server listening");

    sink.info(&format!("🚀 Starting course on http://localhost:{port}"));
    sink.info("");
    sink.info("⌨️ To stop course, hit Control + C on your keyboard.");

    axum::serve(listener, create_router(content_root))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .map_err(|e| CourseError::server_error(e.to_string()))?;

    tracing::info!("course server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http;

    fn content_root() -> tempfile::TempDir {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join("index.html"), "<h1>Welcome</h1>").unwrap();
        std::fs::create_dir_all(root.path().join("lessons/annotations")).unwrap();
        std::fs::write(root.path().join("lessons/annotations.html"), "<h1>Annotations</h1>").unwrap();
        std::fs::write(root.path().join("lessons/première leçon.html"), "<h1>Leçon</h1>").unwrap();
        root
    }

    async fn get(router: Router, uri: &str) -> Response {
        router
            .oneshot(http::Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_root_serves_index() {
        let root = content_root();
        let response = get(create_router(root.path().to_path_buf()), "/").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_extensionless_path_serves_html() {
        let root = content_root();
        let response = get(create_router(root.path().to_path_buf()), "/lessons/annotations").await;
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap();
        assert!(content_type.to_str().unwrap().starts_with("text/html"));
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let root = content_root();
        let response = get(create_router(root.path().to_path_buf()), "/nope").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_parent_traversal_is_404() {
        let root = content_root();
        let response = get(create_router(root.path().to_path_buf()), "/../Cargo.toml").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_percent_encoded_path_is_decoded() {
        let root = content_root();
        let response = get(
            create_router(root.path().to_path_buf()),
            "/lessons/premi%C3%A8re%20le%C3%A7on.html",
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_encoded_parent_traversal_is_404() {
        let root = content_root();
        let response = get(create_router(root.path().to_path_buf()), "/%2E%2E/Cargo.toml").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
