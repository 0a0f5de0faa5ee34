use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

pub mod assets;
pub mod health;
pub mod home;
pub mod projects;
pub mod tasks;

/// Re-rendered form after a rejected submission.
pub(crate) fn invalid_form(html: String) -> Response {
    (StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response()
}
