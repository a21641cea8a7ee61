// Shared helpers for API tests: a router over a fresh in-memory store,
// plus request/response plumbing.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use bookshelf::db::{create_test_pool, initialize_database};
use bookshelf::{CatalogState, HttpServer};

pub fn router() -> Router {
    let pool = Arc::new(create_test_pool().expect("test pool"));
    {
        let conn = pool.get().expect("pooled connection");
        initialize_database(&conn).expect("schema");
    }
    HttpServer::new(Arc::new(CatalogState::new(pool))).router()
}

pub async fn send(router: &Router, method: &str, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request");
    router.clone().oneshot(request).await.expect("response")
}

pub async fn send_json(router: &Router, method: &str, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request");
    router.clone().oneshot(request).await.expect("response")
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}

pub fn location_header(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("Location header")
        .to_str()
        .expect("ascii header")
        .to_string()
}
