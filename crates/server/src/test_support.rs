use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, header},
};
use db::DBService;
use tower::ServiceExt;

use crate::{AppState, http};

pub async fn test_state() -> AppState {
    let db = DBService::new("sqlite::memory:").await.unwrap();
    AppState::new(db)
}

pub async fn test_app() -> (AppState, Router) {
    let state = test_state().await;
    let app = http::router(state.clone());
    (state, app)
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Submits `form` as `application/x-www-form-urlencoded`, optionally with a
/// Referer header.
pub async fn post_form(
    app: &Router,
    uri: &str,
    form: &[(&str, &str)],
    referer: Option<&str>,
) -> Response<Body> {
    let body = form
        .iter()
        .map(|(key, value)| format!("{}={}", encode(key), encode(value)))
        .collect::<Vec<_>>()
        .join("&");
    let mut request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(referer) = referer {
        request = request.header(header::REFERER, referer);
    }
    app.clone()
        .oneshot(request.body(Body::from(body)).unwrap())
        .await
        .unwrap()
}

pub async fn send(app: &Router, method: &str, uri: &str, referer: Option<&str>) -> Response<Body> {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(referer) = referer {
        request = request.header(header::REFERER, referer);
    }
    app.clone()
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

fn encode(raw: &str) -> String {
    url::form_urlencoded::byte_serialize(raw.as_bytes()).collect()
}
