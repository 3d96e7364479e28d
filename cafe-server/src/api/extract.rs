//! Request body extraction

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use shared::error::{AppError, ErrorCode};

/// JSON body extractor rejecting with the standard error envelope
///
/// Malformed JSON, a missing `Content-Type` and bodies that do not match the
/// target type all become 400 `InvalidRequest`.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;
        Ok(Self(value))
    }
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    let reason = match &rejection {
        JsonRejection::JsonDataError(_) => "invalid_field",
        JsonRejection::JsonSyntaxError(_) => "malformed_json",
        JsonRejection::MissingJsonContentType(_) => "content_type",
        _ => "unreadable_body",
    };
    tracing::debug!(reason, error = %rejection.body_text(), "Rejected request body");
    AppError::with_message(ErrorCode::InvalidRequest, rejection.body_text())
        .with_detail("reason", reason)
}
