use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::catalog::error::CatalogError;

/// HTTP mapping of catalog errors.
///
/// Every error status carries a JSON body of the shape
/// `{"errors": ["..."]}`; validation responses list the complete set of
/// violated rules in rule order. Internal failures are logged server-side
/// and return a bare 500.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(Vec<String>),
    NotFound(String),
    Conflict(String),
    Internal,
}

#[derive(Serialize)]
struct ErrorResponse {
    errors: Vec<String>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(vec![message.into()])
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn into_errors(self) -> Vec<String> {
        match self {
            ApiError::BadRequest(errors) => errors,
            ApiError::NotFound(message) | ApiError::Conflict(message) => vec![message],
            ApiError::Internal => Vec::new(),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(failures) => ApiError::BadRequest(failures),
            CatalogError::DuplicateId => ApiError::Conflict("product exists".to_string()),
            CatalogError::NotFound => ApiError::NotFound("product not found".to_string()),
            CatalogError::EmptyIdentity => ApiError::bad_request(err.to_string()),
            CatalogError::SubscriberNotFound(_) => ApiError::NotFound(err.to_string()),
            CatalogError::Storage(storage_err) => {
                // Log the real error but keep it out of the response body.
                tracing::error!("storage error: {storage_err}");
                ApiError::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let errors = self.into_errors();
        if errors.is_empty() {
            status.into_response()
        } else {
            (status, Json(ErrorResponse { errors })).into_response()
        }
    }
}
