use std::sync::Arc;

use axum::{
    http::{header, Method},
    middleware::{from_fn, from_fn_with_state},
    routing::{get, patch, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::{
    config::Config,
    db::Store,
    middleware::{
        access::{admin_access, ticket_access, ticket_presence},
        auth::restricted,
    },
    routes,
    services::{password::CredentialHasher, token::TokenCodec},
};

/// Application state shared across all handlers and gates.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub tokens: Arc<TokenCodec>,
    pub hasher: CredentialHasher,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, tokens: TokenCodec, hasher: CredentialHasher) -> Self {
        Self {
            store,
            tokens: Arc::new(tokens),
            hasher,
        }
    }

    pub fn from_config(config: &Config, store: Arc<dyn Store>) -> Self {
        Self::new(
            store,
            TokenCodec::new(&config.token_secret),
            CredentialHasher::new(config.bcrypt_cost),
        )
    }
}

/// Builds the full API. Gate order per route: presence (if any), then authentication,
/// then role or ownership.
pub fn router(state: AppState) -> Router {
    let authenticated = from_fn_with_state(state.clone(), restricted);
    let admin_only = ServiceBuilder::new()
        .layer(from_fn_with_state(state.clone(), restricted))
        .layer(from_fn(admin_access));
    let owner_or_admin = ServiceBuilder::new()
        .layer(from_fn_with_state(state.clone(), restricted))
        .layer(from_fn_with_state(state.clone(), ticket_access));
    let assignment = ServiceBuilder::new()
        .layer(from_fn_with_state(state.clone(), ticket_presence))
        .layer(from_fn_with_state(state.clone(), restricted))
        .layer(from_fn(admin_access));

    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(Any);

    Router::new()
        .route("/", get(routes::health::index))
        .route("/health", get(routes::health::health_check))
        // Auth
        .route("/api/auth/register", post(routes::auth::register))
        .route("/api/auth/login", post(routes::auth::login))
        // Tickets
        .route(
            "/api/tickets",
            get(routes::tickets::list_tickets).route_layer(admin_only.clone()),
        )
        .route(
            "/api/tickets",
            post(routes::tickets::create_ticket).route_layer(authenticated.clone()),
        )
        .route(
            "/api/tickets/customer/{id}",
            get(routes::tickets::list_customer_tickets).route_layer(authenticated.clone()),
        )
        .route(
            "/api/tickets/{id}",
            get(routes::tickets::get_ticket)
                .put(routes::tickets::update_ticket)
                .delete(routes::tickets::delete_ticket)
                .route_layer(owner_or_admin),
        )
        .route(
            "/api/tickets/{id}",
            patch(routes::tickets::assign_ticket).route_layer(assignment),
        )
        // Customers
        .route(
            "/api/customers",
            get(routes::customers::list_customers).route_layer(admin_only.clone()),
        )
        .route(
            "/api/customers/{id}",
            get(routes::customers::get_customer).route_layer(authenticated),
        )
        .route(
            "/api/customers/{id}",
            put(routes::customers::update_customer)
                .delete(routes::customers::delete_customer)
                .route_layer(admin_only.clone()),
        )
        // Employees
        .route(
            "/api/employees",
            get(routes::employees::list_employees)
                .post(routes::employees::create_employee)
                .route_layer(admin_only.clone()),
        )
        .route(
            "/api/employees/{id}",
            get(routes::employees::get_employee)
                .put(routes::employees::update_employee)
                .delete(routes::employees::delete_employee)
                .route_layer(admin_only),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
