use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};

use crate::{ordering::OrderError, store::StoreError};

/// Every way a request can fail. Rendered as `{"error": "<message>"}`.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("malformed payload: {0}")]
    Decode(String),

    #[error("{0}")]
    Validation(String),

    #[error("not authenticated")]
    Unauthenticated,

    #[error("incorrect email or password")]
    InvalidCredentials,

    #[error("insufficient privileges: requires admin role")]
    Forbidden,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unprocessable(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Decode(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthenticated | ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(%status, error = %self, "Request failed");
        } else {
            debug!(%status, error = %self, "Request rejected");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// A failed write is reported as unprocessable; the store does not tell us more.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Unprocessable(err.to_string())
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::Validation(msg) => ApiError::Validation(msg),
            OrderError::NotFound(_) => ApiError::NotFound(err.to_string()),
            OrderError::UnknownMenuItem(_) | OrderError::Store(_) => {
                ApiError::Unprocessable(err.to_string())
            }
            OrderError::Compensation { .. } => ApiError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_errors_map_to_statuses() {
        let cases = [
            (OrderError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (OrderError::UnknownMenuItem(3), StatusCode::UNPROCESSABLE_ENTITY),
            (OrderError::NotFound(3), StatusCode::NOT_FOUND),
            (
                OrderError::Store(StoreError::Constraint("FOREIGN KEY constraint failed".into())),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                OrderError::Compensation {
                    order_id: 1,
                    source: StoreError::NotFound("order"),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }
}
