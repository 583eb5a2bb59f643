//! Request Extractors

use axum::Json;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::error::{AuthError, INVALID_BODY_MESSAGE};

/// JSON request body where an empty body reads as `{}`
///
/// Lets a bare `POST` surface the per-field "required" messages. Any
/// non-empty body must be a JSON object; the `Content-Type` is not checked.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!(rejection = %rejection.body_text(), "Unreadable request body");
            AuthError::Validation(vec![INVALID_BODY_MESSAGE.to_string()])
        })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }

        let Json(value) = Json::<T>::from_bytes(&bytes)?;
        Ok(Self(value))
    }
}
