//! Axum router configuration with middleware.
//!
//! All routes are under `/api/v1/`.
//! Middleware: CORS, tracing.
//!
//! A built front end is served from `STAYON_WEB_DIR` (default `web/dist`).
//! API routes take priority; unknown paths fall through to `index.html`.
//! If the directory does not exist, only the API is served.

use axum::Router;
use axum::routing::{delete, get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Environment variable naming the static front-end directory.
pub const WEB_DIR_ENV: &str = "STAYON_WEB_DIR";

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/topics", get(handlers::topics::get_topics))
        // Case workflow
        .route("/session", get(handlers::session::get_session))
        .route(
            "/session/scenario",
            post(handlers::session::generate_scenario),
        )
        .route("/session/script", post(handlers::session::submit_case))
        .route("/session/messages", post(handlers::session::ask_follow_up))
        .route(
            "/session/outbound",
            post(handlers::session::generate_outbound),
        )
        .route("/session/new-case", post(handlers::session::new_case))
        .route("/session/logout", post(handlers::session::logout))
        // Transcripts
        .route(
            "/session/transcripts",
            get(handlers::transcript::list_transcripts)
                .post(handlers::transcript::save_transcript),
        )
        .route(
            "/session/transcripts/{file}/load",
            post(handlers::transcript::load_transcript),
        )
        .route(
            "/session/transcripts/{file}",
            delete(handlers::transcript::delete_transcript),
        );

    let mut router = Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let web_dir = std::env::var(WEB_DIR_ENV).unwrap_or_else(|_| "web/dist".to_string());
    if std::path::Path::new(&web_dir).exists() {
        let index_path = format!("{web_dir}/index.html");
        let serve_dir = ServeDir::new(&web_dir).fallback(ServeFile::new(index_path));
        router = router.fallback_service(serve_dir);
        tracing::info!(path = %web_dir, "Static front end enabled");
    }

    router
}

/// GET /health - Simple health check endpoint (no session required).
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use crate::state::testing::test_state;

    async fn call(
        router: &Router,
        method: &str,
        uri: &str,
        session_id: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(id) = session_id {
            request = request.header(header::AUTHORIZATION, format!("Bearer {id}"));
        }
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn health_needs_no_session() {
        let tmp = TempDir::new().unwrap();
        let router = build_router(test_state(tmp.path(), &[]));

        let (status, body) = call(&router, "GET", "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn session_routes_reject_unknown_tokens() {
        let tmp = TempDir::new().unwrap();
        let router = build_router(test_state(tmp.path(), &[]));

        let (status, body) = call(&router, "GET", "/api/v1/session", Some("nope"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["errors"][0]["code"], "UNAUTHORIZED");

        let (status, _) = call(&router, "GET", "/api/v1/session", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn full_case_lifecycle_over_http() {
        let tmp = TempDir::new().unwrap();
        let router = build_router(test_state(tmp.path(), &["SCRIPT"]));

        let (status, body) = call(
            &router,
            "POST",
            "/api/v1/login",
            None,
            Some(json!({ "name": "홍길동", "code": "1234" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let session_id = body["data"]["session_id"].as_str().unwrap().to_string();
        let sid = Some(session_id.as_str());

        let (status, body) = call(&router, "GET", "/api/v1/session", sid, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["page"], "input");
        assert_eq!(body["data"]["user_folder"], "홍길동_1234");

        let (status, body) = call(
            &router,
            "POST",
            "/api/v1/session/script",
            sid,
            Some(json!({
                "customer_name": "Hong",
                "situation_text": "A friend's agency offered a cheaper plan",
                "urgency_tier": "high",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["outcome"]["type"], "script_ready");
        assert_eq!(body["data"]["session"]["page"], "chatbot");

        let (status, body) = call(&router, "POST", "/api/v1/session/transcripts", sid, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["outcome"]["type"], "saved");
        let filename = body["data"]["outcome"]["filename"].as_str().unwrap().to_string();
        assert!(filename.starts_with("Hong_"));
        assert!(tmp.path().join("홍길동_1234").join(&filename).exists());

        let (status, body) =
            call(&router, "GET", "/api/v1/session/transcripts?search=hong", sid, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["outcome"]["files"], json!([filename.clone()]));

        let load_uri = format!("/api/v1/session/transcripts/{filename}/load");
        let (status, body) = call(&router, "POST", &load_uri, sid, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["outcome"]["type"], "loaded");
        assert_eq!(body["data"]["session"]["current_file"], filename.as_str());

        let delete_uri = format!("/api/v1/session/transcripts/{filename}");
        let (status, body) = call(&router, "DELETE", &delete_uri, sid, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["outcome"]["outcome"], "deleted");
        assert!(!tmp.path().join("홍길동_1234").join(&filename).exists());

        let (status, body) = call(&router, "POST", &load_uri, sid, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["errors"][0]["message"].is_string());

        let (status, _) = call(&router, "POST", "/api/v1/session/logout", sid, None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = call(&router, "GET", "/api/v1/session", sid, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
