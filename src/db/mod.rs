pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use thiserror::Error;

use crate::models::{
    principal::{NewPrincipal, Principal, PrincipalChanges, PrincipalKind},
    ticket::{NewTicket, Ticket, TicketChanges},
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email '{0}' already exists")]
    Duplicate(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence for customers, employees and tickets.
///
/// Lookups return `Ok(None)` when the record does not exist. Every principal operation
/// is scoped by `PrincipalKind`, so callers pick the store once and pass the tag along.
#[async_trait]
pub trait Store: Send + Sync {
    async fn ping(&self) -> StoreResult<()>;

    // ── Principals ──────────────────────────────────────────────────────────
    async fn create_principal(&self, kind: PrincipalKind, new: &NewPrincipal) -> StoreResult<Principal>;
    async fn list_principals(&self, kind: PrincipalKind) -> StoreResult<Vec<Principal>>;
    async fn get_principal(&self, kind: PrincipalKind, id: i64) -> StoreResult<Option<Principal>>;
    async fn find_principal_by_email(&self, kind: PrincipalKind, email: &str) -> StoreResult<Option<Principal>>;
    /// Fetches only the stored digest for `email`.
    async fn password_hash(&self, kind: PrincipalKind, email: &str) -> StoreResult<Option<String>>;
    async fn update_principal(
        &self,
        kind: PrincipalKind,
        id: i64,
        changes: &PrincipalChanges,
    ) -> StoreResult<Option<Principal>>;
    async fn delete_principal(&self, kind: PrincipalKind, id: i64) -> StoreResult<Option<Principal>>;

    // ── Tickets ─────────────────────────────────────────────────────────────
    async fn create_ticket(&self, new: &NewTicket) -> StoreResult<Ticket>;
    async fn list_tickets(&self) -> StoreResult<Vec<Ticket>>;
    async fn list_customer_tickets(&self, customer_id: i64) -> StoreResult<Vec<Ticket>>;
    async fn get_ticket(&self, id: i64) -> StoreResult<Option<Ticket>>;
    /// Owning customer id of a ticket.
    async fn ticket_owner(&self, id: i64) -> StoreResult<Option<i64>>;
    async fn update_ticket(&self, id: i64, changes: &TicketChanges) -> StoreResult<Option<Ticket>>;
    async fn assign_ticket(&self, id: i64, employee_id: i64) -> StoreResult<Option<Ticket>>;
    async fn delete_ticket(&self, id: i64) -> StoreResult<Option<Ticket>>;
}

pub async fn create_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Run the migrations embedded from ./migrations/
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
