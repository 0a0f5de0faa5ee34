use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use db::{
    DbErr,
    models::{project::ProjectError, task::TaskError},
};
use thiserror::Error;

use crate::views;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Project(#[from] ProjectError),
    #[error(transparent)]
    Task(#[from] TaskError),
    #[error(transparent)]
    Database(#[from] DbErr),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Project(err) => match err {
                ProjectError::ProjectNotFound => StatusCode::NOT_FOUND,
                ProjectError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Task(err) => match err {
                TaskError::TaskNotFound | TaskError::ProjectNotFound => StatusCode::NOT_FOUND,
                TaskError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Database(db_err) => match db_err {
                DbErr::RecordNotFound(_) => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        let message = if status_code.is_server_error() {
            tracing::error!(error = %self, "Request failed");
            "Something went wrong while handling this request.".to_string()
        } else {
            match &self {
                ApiError::Project(err) => err.to_string(),
                ApiError::Task(err) => err.to_string(),
                ApiError::NotFound(msg) | ApiError::MethodNotAllowed(msg) => msg.clone(),
                _ => self.to_string(),
            }
        };

        (status_code, Html(views::error_page(status_code, &message))).into_response()
    }
}
