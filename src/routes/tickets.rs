use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::{
    error::{ApiError, ApiResult, AppJson},
    middleware::access::{require_self_or_admin, ticket_missing},
    models::{
        auth::AuthenticatedUser,
        principal::PrincipalKind,
        ticket::{AssignTicketRequest, CreateTicketRequest, Ticket, TicketChanges},
    },
    AppState,
};

/// Admin only.
pub async fn list_tickets(State(state): State<AppState>) -> ApiResult<Json<Vec<Ticket>>> {
    Ok(Json(state.store.list_tickets().await?))
}

pub async fn list_customer_tickets(
    State(state): State<AppState>,
    Path(customer_id): Path<i64>,
    user: AuthenticatedUser,
) -> ApiResult<Json<Vec<Ticket>>> {
    require_self_or_admin(&user, customer_id)?;
    Ok(Json(state.store.list_customer_tickets(customer_id).await?))
}

/// Owner or admin, enforced by `ticket_access`.
pub async fn get_ticket(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<Ticket>> {
    state
        .store
        .get_ticket(id)
        .await?
        .map(Json)
        .ok_or_else(|| ticket_missing(id))
}

pub async fn create_ticket(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    AppJson(body): AppJson<CreateTicketRequest>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    if body.subject.trim().is_empty() || body.body.trim().is_empty() {
        return Err(ApiError::MissingFields(
            "A ticket needs a subject and a body".into(),
        ));
    }

    let customer_id = if user.is_admin() {
        body.customer_id.ok_or_else(|| {
            ApiError::MissingFields("customer_id is required when an employee opens a ticket".into())
        })?
    } else {
        user.subject
    };
    if state
        .store
        .get_principal(PrincipalKind::Customer, customer_id)
        .await?
        .is_none()
    {
        return Err(ApiError::ResourceNotFound(format!(
            "Customer with id of {customer_id} does not exist!"
        )));
    }

    let ticket = state.store.create_ticket(&body.into_new_ticket(customer_id)).await?;
    tracing::info!(ticket_id = ticket.id, customer_id, opened_by = user.subject, "ticket created");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": format!("A new ticket with id: {} was created!", ticket.id),
            "ticket": ticket,
        })),
    ))
}

/// Owner or admin.
pub async fn update_ticket(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    AppJson(changes): AppJson<TicketChanges>,
) -> ApiResult<Json<Ticket>> {
    if changes.is_empty() {
        return Err(ApiError::MissingFields(
            "Please provide at least one change to make".into(),
        ));
    }
    state
        .store
        .update_ticket(id, &changes)
        .await?
        .map(Json)
        .ok_or_else(|| ticket_missing(id))
}

/// Owner or admin.
pub async fn delete_ticket(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<Value>> {
    let deleted = state
        .store
        .delete_ticket(id)
        .await?
        .ok_or_else(|| ticket_missing(id))?;

    Ok(Json(json!({
        "deleted": deleted,
        "message": format!("Ticket with id {id} has been deleted"),
    })))
}

/// Admin only, after the presence check.
pub async fn assign_ticket(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    AppJson(body): AppJson<AssignTicketRequest>,
) -> ApiResult<Json<Value>> {
    let employee = state
        .store
        .get_principal(PrincipalKind::Employee, body.employee_id)
        .await?
        .ok_or_else(|| {
            ApiError::ResourceNotFound(format!("Employee with id of {} does not exist!", body.employee_id))
        })?;

    let ticket = state
        .store
        .assign_ticket(id, employee.id)
        .await?
        .ok_or_else(|| ticket_missing(id))?;

    Ok(Json(json!({
        "message": format!(
            "The ticket has been assigned with a new employee, {} will be taking care of the ticket with the id of {id}",
            employee.display_name()
        ),
        "ticket": ticket,
    })))
}
