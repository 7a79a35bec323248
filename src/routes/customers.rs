use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::{
    error::{ApiResult, AppJson},
    middleware::access::require_self_or_admin,
    models::{
        auth::AuthenticatedUser,
        principal::{PrincipalKind, PrincipalProfile, UpdatePrincipalRequest},
    },
    services::principals::PrincipalService,
    AppState,
};

const KIND: PrincipalKind = PrincipalKind::Customer;

/// Admin only.
pub async fn list_customers(State(state): State<AppState>) -> ApiResult<Json<Vec<PrincipalProfile>>> {
    let customers = PrincipalService::list(state.store.as_ref(), KIND).await?;
    Ok(Json(customers.into_iter().map(Into::into).collect()))
}

/// The customer themselves or an admin.
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    user: AuthenticatedUser,
) -> ApiResult<Json<PrincipalProfile>> {
    require_self_or_admin(&user, id)?;
    let customer = PrincipalService::get(state.store.as_ref(), KIND, id).await?;
    Ok(Json(customer.into()))
}

/// Admin only.
pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    AppJson(body): AppJson<UpdatePrincipalRequest>,
) -> ApiResult<Json<PrincipalProfile>> {
    let customer = PrincipalService::update(state.store.as_ref(), &state.hasher, KIND, id, &body).await?;
    Ok(Json(customer.into()))
}

/// Admin only. The customer's tickets go with them.
pub async fn delete_customer(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<Value>> {
    let customer = PrincipalService::delete(state.store.as_ref(), KIND, id).await?;
    Ok(Json(json!({
        "deleted": PrincipalProfile::from(customer),
        "message": format!("Customer with id {id} has been deleted"),
    })))
}
