//! Error conversions
//!
//! Maps [`AppError`] onto the HTTP wire format (feature `axum`).
//!
//! Body shapes:
//! - field errors present: `{"errors": ["...", ...]}`
//! - otherwise: `{"error": "..."}`

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for super::app_error::AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = if self.errors().is_empty() {
            serde_json::json!({ "error": self.message() })
        } else {
            serde_json::json!({ "errors": self.errors() })
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(all(test, feature = "axum"))]
mod tests {
    use super::super::app_error::AppError;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use http_body_util::BodyExt;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_single_message_body() {
        let (status, body) = body_json(AppError::unauthorized("Invalid credentials.")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, serde_json::json!({ "error": "Invalid credentials." }));
    }

    #[tokio::test]
    async fn test_field_errors_body() {
        let err = AppError::unprocessable("invalid")
            .with_errors(["Please enter a username.", "Please enter a password."]);
        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body,
            serde_json::json!({
                "errors": ["Please enter a username.", "Please enter a password."]
            })
        );
    }

    #[tokio::test]
    async fn test_internal_error_body() {
        let err = AppError::internal("An error occurred. Please try again.");
        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            serde_json::json!({ "error": "An error occurred. Please try again." })
        );
    }
}
