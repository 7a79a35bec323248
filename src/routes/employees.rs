//! Employee administration. Every route here sits behind `restricted` + `admin_access`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::{
    error::{ApiResult, AppJson},
    models::principal::{PrincipalKind, PrincipalProfile, RegisterRequest, UpdatePrincipalRequest},
    services::principals::PrincipalService,
    AppState,
};

const KIND: PrincipalKind = PrincipalKind::Employee;

pub async fn list_employees(State(state): State<AppState>) -> ApiResult<Json<Vec<PrincipalProfile>>> {
    let employees = PrincipalService::list(state.store.as_ref(), KIND).await?;
    Ok(Json(employees.into_iter().map(Into::into).collect()))
}

pub async fn get_employee(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<PrincipalProfile>> {
    let employee = PrincipalService::get(state.store.as_ref(), KIND, id).await?;
    Ok(Json(employee.into()))
}

/// Any `role` in the body is ignored; this endpoint only creates employees.
pub async fn create_employee(
    State(state): State<AppState>,
    AppJson(body): AppJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<PrincipalProfile>)> {
    let employee = PrincipalService::create(state.store.as_ref(), &state.hasher, KIND, &body).await?;
    tracing::info!(id = employee.id, "employee created");
    Ok((StatusCode::CREATED, Json(employee.into())))
}

pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    AppJson(body): AppJson<UpdatePrincipalRequest>,
) -> ApiResult<Json<PrincipalProfile>> {
    let employee = PrincipalService::update(state.store.as_ref(), &state.hasher, KIND, id, &body).await?;
    Ok(Json(employee.into()))
}

pub async fn delete_employee(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<Value>> {
    let employee = PrincipalService::delete(state.store.as_ref(), KIND, id).await?;
    Ok(Json(json!({
        "deleted": PrincipalProfile::from(employee),
        "message": format!("Employee with id {id} has been deleted"),
    })))
}
