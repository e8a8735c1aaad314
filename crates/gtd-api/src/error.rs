//! # API Error Types
//!
//! Unified error handling for the REST and GraphQL layers.

use async_graphql::{Error as GraphQLError, ErrorExtensions};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use gtd_analytics::AnalyticsError;
use gtd_dataset::DatasetError;
use thiserror::Error;

/// API-level errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    #[error("Analytics error: {0}")]
    Analytics(#[from] AnalyticsError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Analytics(AnalyticsError::InsufficientSample { .. } | AnalyticsError::NoData) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::InvalidConfig(_) | Self::Dataset(_) | Self::Analytics(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get error code for response bodies and GraphQL extensions
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Dataset(_) => "DATASET_ERROR",
            Self::Analytics(AnalyticsError::InsufficientSample { .. }) => "INSUFFICIENT_SAMPLE",
            Self::Analytics(AnalyticsError::NoData) => "NO_DATA",
            Self::Analytics(_) => "ANALYTICS_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> GraphQLError {
        GraphQLError::new(self.to_string()).extend_with(|_, e| {
            e.set("code", self.error_code());
            e.set("status", self.status_code().as_u16());

            if let Self::Analytics(AnalyticsError::InsufficientSample { group, size }) = self {
                e.set("group", *group);
                e.set("size", *size as u64);
            }
        })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, code = self.error_code(), "Request failed");
        } else {
            tracing::warn!(error = %self, code = self.error_code(), "Request rejected");
        }

        let body = serde_json::json!({
            "error": {
                "message": self.to_string(),
                "code": self.error_code(),
            }
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_hypothesis_is_unprocessable() {
        let err = ApiError::from(AnalyticsError::InsufficientSample {
            group: "high",
            size: 1,
        });
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.error_code(), "INSUFFICIENT_SAMPLE");
    }

    #[test]
    fn test_other_failures_are_internal() {
        let err = ApiError::from(AnalyticsError::Conversion("bad".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ApiError::Internal("x".into()).error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_graphql_extensions_carry_code() {
        let err = ApiError::from(AnalyticsError::NoData).extend();
        let ext = err.extensions.unwrap();
        assert_eq!(ext.get("code"), Some(&async_graphql::Value::from("NO_DATA")));
    }
}
