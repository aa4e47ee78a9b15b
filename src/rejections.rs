use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::html;

use crate::views;

/// Failures surfaced at the handler boundary. Collaborator failures never
/// land here: the service layer downgrades them to outcome variants that the
/// handlers render as notices next to the affected action.
#[derive(Debug)]
pub enum AppError {
    /// A local precondition failed. Never the result of a collaborator call.
    Validation(&'static str),
    Internal(&'static str),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, message) = match self {
            AppError::Validation(message) => (StatusCode::UNPROCESSABLE_ENTITY, message),
            AppError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        let page = views::page(
            "Error",
            html! {
                h1 { (message) }
            },
        );

        (code, page).into_response()
    }
}

pub trait ResultExt<T> {
    /// Log the error and turn it into an internal `AppError`.
    fn reject(self, context: &'static str) -> Result<T, AppError>;
    /// Log the error and turn it into a validation `AppError`.
    fn reject_input(self, context: &'static str) -> Result<T, AppError>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
    fn reject(self, context: &'static str) -> Result<T, AppError> {
        self.map_err(|e| {
            tracing::error!("{context}: {e}");
            AppError::Internal(context)
        })
    }

    fn reject_input(self, context: &'static str) -> Result<T, AppError> {
        self.map_err(|e| {
            tracing::warn!("{context}: {e}");
            AppError::Validation(context)
        })
    }
}
