use actix_web::error::BlockingError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::warn;
use thiserror::Error;

use crate::network::AddressError;
use crate::node::NodeError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Node(#[from] NodeError),
    #[error("worker pool unavailable")]
    Blocking(#[from] BlockingError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Node(NodeError::Address(AddressError::Invalid { .. })) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Node(NodeError::StaleTip) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        warn!("API - request failed: {self}");
        HttpResponse::build(self.status_code()).body(self.to_string())
    }
}
