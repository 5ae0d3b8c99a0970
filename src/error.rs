use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use thiserror::Error;

/// Terminal failure of a single gateway request. Every variant renders as
/// a JSON envelope; none escape the handler boundary as a transport fault.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Missing or mismatching `x-api-key`.
    #[error("invalid API key")]
    Auth,

    /// Bad method, content type, or missing parameters.
    #[error("{message}")]
    Validation { message: String },

    /// Upstream replied with a body that is not valid JSON.
    #[error("upstream did not return valid JSON")]
    UpstreamProtocol,

    /// Upstream replied with a non-success status. The status is passed
    /// through to the caller unchanged.
    #[error("upstream returned status {status}")]
    Upstream { status: u16, details: Value },

    /// Anything else: network failure, malformed request body, missing
    /// fields in places that should have them.
    #[error("{details}")]
    Internal { details: String },
}

impl GatewayError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self::Internal {
            details: details.into(),
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        Self::Internal {
            details: err.to_string(),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            GatewayError::Auth => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": true, "message": "Invalid API Key" }),
            ),
            GatewayError::Validation { message } => (
                StatusCode::BAD_REQUEST,
                json!({ "error": true, "message": message }),
            ),
            GatewayError::UpstreamProtocol => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": true,
                    "message": "Translation failed.",
                    "details": "OpenRouter did not return valid JSON.",
                }),
            ),
            GatewayError::Upstream { status, details } => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                json!({
                    "error": true,
                    "message": "OpenRouter API error.",
                    "details": details,
                }),
            ),
            GatewayError::Internal { details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": true,
                    "message": "Translation failed.",
                    "details": details,
                }),
            ),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn render(err: GatewayError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn auth_error_is_401_with_message() {
        let (status, body) = render(GatewayError::Auth).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], true);
        assert_eq!(body["message"], "Invalid API Key");
    }

    #[tokio::test]
    async fn validation_error_is_400_with_given_message() {
        let (status, body) = render(GatewayError::validation(
            "Invalid Request Method or Content-Type",
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid Request Method or Content-Type");
    }

    #[tokio::test]
    async fn upstream_error_propagates_status_and_details() {
        let (status, body) = render(GatewayError::Upstream {
            status: 429,
            details: json!({ "code": 429, "message": "rate limited" }),
        })
        .await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["message"], "OpenRouter API error.");
        assert_eq!(body["details"]["code"], 429);
    }

    #[tokio::test]
    async fn protocol_error_is_500_translation_failed() {
        let (status, body) = render(GatewayError::UpstreamProtocol).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Translation failed.");
    }

    #[tokio::test]
    async fn internal_error_is_500_with_details() {
        let (status, body) = render(GatewayError::internal("connection refused")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Translation failed.");
        assert_eq!(body["details"], "connection refused");
    }

    #[tokio::test]
    async fn bogus_upstream_status_falls_back_to_502() {
        let (status, _) = render(GatewayError::Upstream {
            status: 1,
            details: Value::Null,
        })
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }
}
