//! Path extractor that reports bad parameters as [`ApiError`]

use axum::extract::path::ErrorKind;
use axum::extract::rejection::PathRejection;
use axum::extract::FromRequestParts;

use super::ApiError;

/// Same as `axum::extract::Path` with a JSON error body on rejection.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

fn expected(ty: &str) -> &str {
    match ty {
        "i8" | "i16" | "i32" | "i64" | "u8" | "u16" | "u32" | "u64" | "isize" | "usize" => {
            "integer"
        }
        other => other,
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        let message = match &rejection {
            PathRejection::FailedToDeserializePathParams(err) => match err.kind() {
                ErrorKind::ParseErrorAtKey {
                    key,
                    value,
                    expected_type,
                } => format!(
                    "Invalid parameter '{}': expected type {} but got '{}'",
                    key,
                    expected(expected_type),
                    value
                ),
                ErrorKind::ParseError {
                    value,
                    expected_type,
                } => format!(
                    "Invalid parameter 'id': expected type {} but got '{}'",
                    expected(expected_type),
                    value
                ),
                ErrorKind::ParseErrorAtIndex {
                    value,
                    expected_type,
                    ..
                } => format!(
                    "Invalid parameter: expected type {} but got '{}'",
                    expected(expected_type),
                    value
                ),
                _ => err.body_text(),
            },
            other => other.body_text(),
        };
        ApiError::bad_request(message)
    }
}
