use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

use crate::errors::AppError;

// The IntoResponse trait implementation converts AppError into a well-formed HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // Authentication errors redirect to the login page
            AppError::Auth(msg) => {
                Redirect::to(&format!("/login?error={}", urlencoding::encode(&msg)))
                    .into_response()
            }

            AppError::NotFound(what) => {
                (StatusCode::NOT_FOUND, format!("{} not found", what)).into_response()
            }

            AppError::Forbidden => (StatusCode::FORBIDDEN, "Access denied").into_response(),

            // Storage errors are internal server errors
            AppError::Redis(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", e),
            )
                .into_response(),

            AppError::Serialization(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", e),
            )
                .into_response(),

            // Template files live on disk; failing to read one is a server error
            AppError::File(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("File error: {}", e),
            )
                .into_response(),
        }
    }
}
