// Copyright (c) 2025 fanmetrics
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::aggregator::BasicStatsError;
use crate::domain::payload::SourceFailure;
use crate::utils::validators::ValidationError;

/// 应用错误类型
///
/// 对外统一为带稳定错误码的结构化错误对象，不暴露内部细节
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl AppError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn unknown_source(source: &str) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "UNKNOWN_SOURCE",
            format!("unsupported source: {source}"),
        )
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL", message)
    }

    pub fn code(&self) -> &'static str {
        self.code
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "success": false,
            "error": {
                "code": self.code,
                "message": self.message,
            }
        }));
        (self.status, body).into_response()
    }
}

impl From<ValidationError> for AppError {
    fn from(error: ValidationError) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error.code(), error.to_string())
    }
}

impl From<SourceFailure> for AppError {
    fn from(failure: SourceFailure) -> Self {
        // Upstream pages failing us is a gateway-class condition.
        Self::new(StatusCode::BAD_GATEWAY, failure.code, failure.message)
    }
}

impl From<BasicStatsError> for AppError {
    fn from(error: BasicStatsError) -> Self {
        match error {
            BasicStatsError::Primary(failure) => AppError::from(failure),
            BasicStatsError::AllFailed(inner) => Self::new(
                StatusCode::BAD_GATEWAY,
                "ALL_SOURCES_FAILED",
                inner.to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_bad_requests() {
        let error = AppError::from(ValidationError::EmptyIdentity);
        assert_eq!(error.status, StatusCode::BAD_REQUEST);
        assert_eq!(error.code(), "INVALID_IDENTITY");
    }

    #[test]
    fn test_source_failures_are_gateway_errors() {
        let error = AppError::from(SourceFailure {
            code: "TIMEOUT",
            message: "navigation timed out".to_string(),
        });
        assert_eq!(error.status, StatusCode::BAD_GATEWAY);
        assert_eq!(error.code(), "TIMEOUT");
    }
}
