use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use super::{Store, StoreError, StoreResult};
use crate::models::{
    principal::{NewPrincipal, Principal, PrincipalChanges, PrincipalKind},
    ticket::{NewTicket, Ticket, TicketChanges},
};

const PRINCIPAL_COLUMNS: &str = "id, first_name, last_name, email, password_hash";
const TICKET_COLUMNS: &str = "id, customer_id, employee_id, subject, body, date, status, priority";

/// Row shape shared by the `customers` and `employees` tables.
#[derive(Debug, FromRow)]
struct PrincipalRow {
    id: i64,
    first_name: String,
    last_name: String,
    email: String,
    password_hash: String,
}

impl PrincipalRow {
    fn into_principal(self, kind: PrincipalKind) -> Principal {
        Principal {
            kind,
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            password_hash: self.password_hash,
        }
    }
}

fn map_unique(e: sqlx::Error, email: &str) -> StoreError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Duplicate(email.to_string()),
        _ => StoreError::Database(e),
    }
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn create_principal(&self, kind: PrincipalKind, new: &NewPrincipal) -> StoreResult<Principal> {
        let table = kind.table();
        let row = sqlx::query_as::<_, PrincipalRow>(&format!(
            "INSERT INTO {table} (first_name, last_name, email, password_hash)
             VALUES ($1, $2, $3, $4)
             RETURNING {PRINCIPAL_COLUMNS}"
        ))
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(&new.email)
        .bind(&new.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique(e, &new.email))?;
        Ok(row.into_principal(kind))
    }

    async fn list_principals(&self, kind: PrincipalKind) -> StoreResult<Vec<Principal>> {
        let table = kind.table();
        let rows = sqlx::query_as::<_, PrincipalRow>(&format!(
            "SELECT {PRINCIPAL_COLUMNS} FROM {table} ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(|r| r.into_principal(kind)).collect())
    }

    async fn get_principal(&self, kind: PrincipalKind, id: i64) -> StoreResult<Option<Principal>> {
        let table = kind.table();
        let row = sqlx::query_as::<_, PrincipalRow>(&format!(
            "SELECT {PRINCIPAL_COLUMNS} FROM {table} WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| r.into_principal(kind)))
    }

    async fn find_principal_by_email(&self, kind: PrincipalKind, email: &str) -> StoreResult<Option<Principal>> {
        let table = kind.table();
        let row = sqlx::query_as::<_, PrincipalRow>(&format!(
            "SELECT {PRINCIPAL_COLUMNS} FROM {table} WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| r.into_principal(kind)))
    }

    async fn password_hash(&self, kind: PrincipalKind, email: &str) -> StoreResult<Option<String>> {
        let table = kind.table();
        let hash: Option<String> =
            sqlx::query_scalar(&format!("SELECT password_hash FROM {table} WHERE email = $1"))
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;
        Ok(hash)
    }

    async fn update_principal(
        &self,
        kind: PrincipalKind,
        id: i64,
        changes: &PrincipalChanges,
    ) -> StoreResult<Option<Principal>> {
        let table = kind.table();
        let row = sqlx::query_as::<_, PrincipalRow>(&format!(
            "UPDATE {table} SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                email = COALESCE($4, email),
                password_hash = COALESCE($5, password_hash)
             WHERE id = $1
             RETURNING {PRINCIPAL_COLUMNS}"
        ))
        .bind(id)
        .bind(&changes.first_name)
        .bind(&changes.last_name)
        .bind(&changes.email)
        .bind(&changes.password_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique(e, changes.email.as_deref().unwrap_or_default()))?;
        Ok(row.map(|r| r.into_principal(kind)))
    }

    async fn delete_principal(&self, kind: PrincipalKind, id: i64) -> StoreResult<Option<Principal>> {
        let table = kind.table();
        let row = sqlx::query_as::<_, PrincipalRow>(&format!(
            "DELETE FROM {table} WHERE id = $1 RETURNING {PRINCIPAL_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| r.into_principal(kind)))
    }

    async fn create_ticket(&self, new: &NewTicket) -> StoreResult<Ticket> {
        let ticket = sqlx::query_as::<_, Ticket>(&format!(
            "INSERT INTO tickets (customer_id, subject, body, status, priority)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {TICKET_COLUMNS}"
        ))
        .bind(new.customer_id)
        .bind(&new.subject)
        .bind(&new.body)
        .bind(&new.status)
        .bind(&new.priority)
        .fetch_one(&self.pool)
        .await?;
        Ok(ticket)
    }

    async fn list_tickets(&self) -> StoreResult<Vec<Ticket>> {
        let tickets = sqlx::query_as::<_, Ticket>(&format!("SELECT {TICKET_COLUMNS} FROM tickets ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;
        Ok(tickets)
    }

    async fn list_customer_tickets(&self, customer_id: i64) -> StoreResult<Vec<Ticket>> {
        let tickets = sqlx::query_as::<_, Ticket>(&format!(
            "SELECT {TICKET_COLUMNS} FROM tickets WHERE customer_id = $1 ORDER BY id"
        ))
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(tickets)
    }

    async fn get_ticket(&self, id: i64) -> StoreResult<Option<Ticket>> {
        let ticket = sqlx::query_as::<_, Ticket>(&format!("SELECT {TICKET_COLUMNS} FROM tickets WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(ticket)
    }

    async fn ticket_owner(&self, id: i64) -> StoreResult<Option<i64>> {
        let owner: Option<i64> = sqlx::query_scalar("SELECT customer_id FROM tickets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(owner)
    }

    async fn update_ticket(&self, id: i64, changes: &TicketChanges) -> StoreResult<Option<Ticket>> {
        let ticket = sqlx::query_as::<_, Ticket>(&format!(
            "UPDATE tickets SET
                subject = COALESCE($2, subject),
                body = COALESCE($3, body),
                status = COALESCE($4, status),
                priority = COALESCE($5, priority)
             WHERE id = $1
             RETURNING {TICKET_COLUMNS}"
        ))
        .bind(id)
        .bind(&changes.subject)
        .bind(&changes.body)
        .bind(&changes.status)
        .bind(&changes.priority)
        .fetch_optional(&self.pool)
        .await?;
        Ok(ticket)
    }

    async fn assign_ticket(&self, id: i64, employee_id: i64) -> StoreResult<Option<Ticket>> {
        let ticket = sqlx::query_as::<_, Ticket>(&format!(
            "UPDATE tickets SET employee_id = $2 WHERE id = $1 RETURNING {TICKET_COLUMNS}"
        ))
        .bind(id)
        .bind(employee_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(ticket)
    }

    async fn delete_ticket(&self, id: i64) -> StoreResult<Option<Ticket>> {
        let ticket = sqlx::query_as::<_, Ticket>(&format!(
            "DELETE FROM tickets WHERE id = $1 RETURNING {TICKET_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(ticket)
    }
}
