use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("daerah dan makanan wajib diisi")]
    MissingFields,

    #[error("Malformed payload")]
    MalformedPayload,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::MissingFields | AppError::MalformedPayload => StatusCode::BAD_REQUEST,
            AppError::Store(ref e) => {
                error!("Store request failed: {e}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
