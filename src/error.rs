use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

use crate::db::location_store::StoreError;

/// Failures of the location operations.
///
/// Status codes follow the contract existing clients rely on: anything that
/// fails to resolve a location (missing ids or query values, unknown ids,
/// store errors while reading, updating or deleting) is a 404, while a
/// rejected payload or a failed insert is a 400.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("{0}")]
    MissingParameter(&'static str),
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{0}")]
    InvalidPayload(String),
    #[error("{0}")]
    CreateFailed(StoreError),
    #[error("{0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Serialize)]
pub struct ErrorMessage {
    pub message: String,
}

impl ResponseError for LocationError {
    fn status_code(&self) -> StatusCode {
        match self {
            LocationError::InvalidPayload(_) | LocationError::CreateFailed(_) => {
                StatusCode::BAD_REQUEST
            }
            LocationError::MissingParameter(_)
            | LocationError::NotFound(_)
            | LocationError::Store(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let LocationError::Store(e) | LocationError::CreateFailed(e) = self {
            log::error!("Location store error: {}", e);
        }
        HttpResponse::build(self.status_code()).json(ErrorMessage {
            message: self.to_string(),
        })
    }
}
