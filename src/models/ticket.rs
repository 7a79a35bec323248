use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const DEFAULT_PRIORITY: &str = "Low";
pub const DEFAULT_STATUS: &str = "new";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Ticket {
    pub id: i64,
    pub customer_id: i64,
    pub employee_id: Option<i64>,
    pub subject: String,
    pub body: String,
    pub date: DateTime<Utc>,
    pub status: String,
    pub priority: String,
}

#[derive(Debug, Clone)]
pub struct NewTicket {
    pub customer_id: i64,
    pub subject: String,
    pub body: String,
    pub status: String,
    pub priority: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TicketChanges {
    pub subject: Option<String>,
    pub body: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
}

impl TicketChanges {
    pub fn is_empty(&self) -> bool {
        self.subject.is_none() && self.body.is_none() && self.status.is_none() && self.priority.is_none()
    }
}

// Request DTOs
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateTicketRequest {
    /// Only honoured for admins; customers always own the tickets they open.
    pub customer_id: Option<i64>,
    pub subject: String,
    pub body: String,
    pub status: Option<String>,
    pub priority: Option<String>,
}

impl CreateTicketRequest {
    pub fn into_new_ticket(self, customer_id: i64) -> NewTicket {
        NewTicket {
            customer_id,
            subject: self.subject,
            body: self.body,
            status: non_empty_or(self.status, DEFAULT_STATUS),
            priority: non_empty_or(self.priority, DEFAULT_PRIORITY),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AssignTicketRequest {
    pub employee_id: i64,
}

fn non_empty_or(value: Option<String>, fallback: &str) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}
