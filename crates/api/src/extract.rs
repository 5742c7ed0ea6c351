//! JSON body extractor that rejects in the API's `{"error","code"}` shape.
//!
//! Handlers import [`Json`] from here instead of `axum::Json`. Malformed
//! bodies, wrong field types and missing content types all become a 400
//! [`AppError::BadRequest`] instead of axum's plain-text 4xx.

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::AppError;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(status = %rejection.status(), "Rejected request body");
        AppError::BadRequest(body_message(&rejection))
    }
}

/// Client-facing message for a rejected body. Serde's "missing field `x`"
/// is reworded to match the handlers' own required-field errors.
fn body_message(rejection: &JsonRejection) -> String {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let detail = err.body_text();
            match missing_field_name(&detail) {
                Some(field) => format!("The field '{field}' is required"),
                None => format!("Invalid request body: {}", strip_prefix(&detail)),
            }
        }
        JsonRejection::JsonSyntaxError(_) => "The request body is not valid JSON".to_string(),
        JsonRejection::MissingJsonContentType(_) => {
            "Expected a request with `Content-Type: application/json`".to_string()
        }
        other => other.body_text(),
    }
}

fn missing_field_name(detail: &str) -> Option<&str> {
    let rest = detail.split("missing field `").nth(1)?;
    rest.split('`').next()
}

/// Drop axum's "Failed to deserialize ... target type: " preamble.
fn strip_prefix(detail: &str) -> &str {
    detail.split_once("target type: ").map_or(detail, |(_, rest)| rest)
}
