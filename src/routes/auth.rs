use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::{ApiResult, AppJson},
    models::{
        auth::{LoginRequest, LoginResponse},
        principal::{PrincipalProfile, RegisterRequest},
    },
    services::auth::AuthService,
    AppState,
};

pub async fn register(
    State(state): State<AppState>,
    AppJson(body): AppJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<PrincipalProfile>)> {
    let principal = AuthService::register(state.store.as_ref(), &state.hasher, &body).await?;
    Ok((StatusCode::CREATED, Json(principal.into())))
}

pub async fn login(
    State(state): State<AppState>,
    AppJson(body): AppJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    AuthService::login(state.store.as_ref(), &state.hasher, &state.tokens, &body)
        .await
        .map(Json)
}
