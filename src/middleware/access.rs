//! Role and ownership gates. Each runs after `restricted` and either forwards the
//! request or answers it directly.

use axum::{
    extract::{Path, Request, State},
    middleware::Next,
    response::Response,
};

use crate::{error::ApiError, models::auth::AuthenticatedUser, AppState};

pub async fn admin_access(user: AuthenticatedUser, request: Request, next: Next) -> Result<Response, ApiError> {
    if !user.is_admin() {
        tracing::debug!(subject = user.subject, role = %user.role, "admin route denied");
        return Err(ApiError::NotAdmin);
    }
    Ok(next.run(request).await)
}

/// Ticket owner or any admin. The owner lookup completes before the decision.
pub async fn ticket_access(
    State(state): State<AppState>,
    Path(ticket_id): Path<i64>,
    user: AuthenticatedUser,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !user.is_admin() {
        let owner = state
            .store
            .ticket_owner(ticket_id)
            .await?
            .ok_or_else(|| ticket_missing(ticket_id))?;
        if owner != user.subject {
            tracing::debug!(subject = user.subject, ticket_id, "ticket access denied: not owner");
            return Err(ApiError::NotOwner);
        }
    }
    Ok(next.run(request).await)
}

/// 404s before any authentication when the ticket does not exist.
pub async fn ticket_presence(
    State(state): State<AppState>,
    Path(ticket_id): Path<i64>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if state.store.ticket_owner(ticket_id).await?.is_none() {
        return Err(ticket_missing(ticket_id));
    }
    Ok(next.run(request).await)
}

/// For routes keyed by a customer id: that customer or any admin.
pub fn require_self_or_admin(user: &AuthenticatedUser, customer_id: i64) -> Result<(), ApiError> {
    if user.is_admin() || user.subject == customer_id {
        Ok(())
    } else {
        Err(ApiError::NotOwner)
    }
}

pub fn ticket_missing(ticket_id: i64) -> ApiError {
    ApiError::ResourceNotFound(format!("Ticket with id of {ticket_id} does not exist!"))
}
