use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::db::StoreError;
use crate::services::token::TokenError;

pub type ApiResult<T> = Result<T, ApiError>;

/// `Json` extractor whose rejection is an `ApiError`, so a body that fails to parse
/// answers 400 with the usual `{ "message": ... }` shape.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

/// Every way a request can be turned away. Authorization and validation failures are
/// answered by the gate that detects them; only `Unexpected` reaches the 500 path.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Permission denied, not token found")]
    MissingToken,
    #[error("{0}")]
    TokenMalformed(String),
    #[error("Token expired, please log in again")]
    TokenExpired,
    #[error("Permission denied, not an admin user")]
    NotAdmin,
    #[error("Permission denied, not the owner of the ticket")]
    NotOwner,
    #[error("User was not found, please register")]
    PrincipalNotFound,
    #[error("Invalid credentials, you shall not pass!")]
    BadCredentials,
    #[error("{0}")]
    MissingFields(String),
    #[error("{0}")]
    ResourceNotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Something went wrong")]
    Unexpected(anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingToken | ApiError::NotAdmin | ApiError::NotOwner => StatusCode::FORBIDDEN,
            ApiError::TokenMalformed(_) | ApiError::TokenExpired | ApiError::BadCredentials => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::PrincipalNotFound | ApiError::ResourceNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MissingFields(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(value: TokenError) -> Self {
        match value {
            TokenError::Malformed(reason) => ApiError::TokenMalformed(reason),
            TokenError::Expired => ApiError::TokenExpired,
            TokenError::Signing(reason) => ApiError::Unexpected(anyhow::anyhow!("token signing failed: {reason}")),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Duplicate(email) => ApiError::Conflict(format!("Email {email} is already registered")),
            StoreError::Database(e) => ApiError::Unexpected(e.into()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        ApiError::MissingFields(value.body_text())
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(value: anyhow::Error) -> Self {
        ApiError::Unexpected(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Unexpected(cause) => {
                tracing::error!(error = %cause, "unexpected failure while handling request");
                json!({ "message": self.to_string(), "error": cause.to_string() })
            }
            _ => json!({ "message": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}
