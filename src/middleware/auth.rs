use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::{error::ApiError, models::auth::AuthenticatedUser, AppState};

/// Requires a valid token in the raw `Authorization` header (no `Bearer ` prefix) and
/// attaches the decoded identity to the request.
pub async fn restricted(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = {
        let raw = request
            .headers()
            .get(header::AUTHORIZATION)
            .ok_or(ApiError::MissingToken)?;
        let token = raw
            .to_str()
            .map_err(|_| ApiError::TokenMalformed("invalid authorization header".into()))?
            .trim();
        if token.is_empty() {
            return Err(ApiError::MissingToken);
        }
        state.tokens.verify(token).map_err(|e| {
            tracing::debug!(error = %e, "token rejected");
            ApiError::from(e)
        })?
    };

    request.extensions_mut().insert(AuthenticatedUser::from(claims));
    Ok(next.run(request).await)
}

/// Reads the identity attached by `restricted`. Handlers behind that gate may assume it
/// is present; anywhere else the request is treated as carrying no token.
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(ApiError::MissingToken)
    }
}
