//! In-process store.
//!
//! Used by the test suites and as the fallback when no `DATABASE_URL` is configured.
//! Data lives only as long as the process.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{Store, StoreError, StoreResult};
use crate::models::{
    principal::{NewPrincipal, Principal, PrincipalChanges, PrincipalKind},
    ticket::{NewTicket, Ticket, TicketChanges},
};

#[derive(Default)]
struct Tables {
    customers: BTreeMap<i64, Principal>,
    employees: BTreeMap<i64, Principal>,
    tickets: BTreeMap<i64, Ticket>,
    next_customer_id: i64,
    next_employee_id: i64,
    next_ticket_id: i64,
}

impl Tables {
    fn principals(&self, kind: PrincipalKind) -> &BTreeMap<i64, Principal> {
        match kind {
            PrincipalKind::Customer => &self.customers,
            PrincipalKind::Employee => &self.employees,
        }
    }

    fn principals_mut(&mut self, kind: PrincipalKind) -> &mut BTreeMap<i64, Principal> {
        match kind {
            PrincipalKind::Customer => &mut self.customers,
            PrincipalKind::Employee => &mut self.employees,
        }
    }

    fn next_principal_id(&mut self, kind: PrincipalKind) -> i64 {
        let counter = match kind {
            PrincipalKind::Customer => &mut self.next_customer_id,
            PrincipalKind::Employee => &mut self.next_employee_id,
        };
        *counter += 1;
        *counter
    }

    fn email_taken(&self, kind: PrincipalKind, email: &str, except: Option<i64>) -> bool {
        self.principals(kind)
            .values()
            .any(|p| p.email == email && Some(p.id) != except)
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn create_principal(&self, kind: PrincipalKind, new: &NewPrincipal) -> StoreResult<Principal> {
        let mut t = self.tables.write().await;
        if t.email_taken(kind, &new.email, None) {
            return Err(StoreError::Duplicate(new.email.clone()));
        }
        let id = t.next_principal_id(kind);
        let principal = Principal {
            kind,
            id,
            first_name: new.first_name.clone(),
            last_name: new.last_name.clone(),
            email: new.email.clone(),
            password_hash: new.password_hash.clone(),
        };
        t.principals_mut(kind).insert(id, principal.clone());
        Ok(principal)
    }

    async fn list_principals(&self, kind: PrincipalKind) -> StoreResult<Vec<Principal>> {
        Ok(self.tables.read().await.principals(kind).values().cloned().collect())
    }

    async fn get_principal(&self, kind: PrincipalKind, id: i64) -> StoreResult<Option<Principal>> {
        Ok(self.tables.read().await.principals(kind).get(&id).cloned())
    }

    async fn find_principal_by_email(&self, kind: PrincipalKind, email: &str) -> StoreResult<Option<Principal>> {
        Ok(self
            .tables
            .read()
            .await
            .principals(kind)
            .values()
            .find(|p| p.email == email)
            .cloned())
    }

    async fn password_hash(&self, kind: PrincipalKind, email: &str) -> StoreResult<Option<String>> {
        Ok(self
            .tables
            .read()
            .await
            .principals(kind)
            .values()
            .find(|p| p.email == email)
            .map(|p| p.password_hash.clone()))
    }

    async fn update_principal(
        &self,
        kind: PrincipalKind,
        id: i64,
        changes: &PrincipalChanges,
    ) -> StoreResult<Option<Principal>> {
        let mut t = self.tables.write().await;
        if let Some(email) = &changes.email {
            if t.email_taken(kind, email, Some(id)) {
                return Err(StoreError::Duplicate(email.clone()));
            }
        }
        let Some(p) = t.principals_mut(kind).get_mut(&id) else {
            return Ok(None);
        };
        if let Some(v) = &changes.first_name {
            p.first_name = v.clone();
        }
        if let Some(v) = &changes.last_name {
            p.last_name = v.clone();
        }
        if let Some(v) = &changes.email {
            p.email = v.clone();
        }
        if let Some(v) = &changes.password_hash {
            p.password_hash = v.clone();
        }
        Ok(Some(p.clone()))
    }

    async fn delete_principal(&self, kind: PrincipalKind, id: i64) -> StoreResult<Option<Principal>> {
        let mut t = self.tables.write().await;
        let removed = t.principals_mut(kind).remove(&id);
        if removed.is_some() {
            match kind {
                PrincipalKind::Customer => t.tickets.retain(|_, ticket| ticket.customer_id != id),
                PrincipalKind::Employee => t
                    .tickets
                    .values_mut()
                    .filter(|ticket| ticket.employee_id == Some(id))
                    .for_each(|ticket| ticket.employee_id = None),
            }
        }
        Ok(removed)
    }

    async fn create_ticket(&self, new: &NewTicket) -> StoreResult<Ticket> {
        let mut t = self.tables.write().await;
        t.next_ticket_id += 1;
        let ticket = Ticket {
            id: t.next_ticket_id,
            customer_id: new.customer_id,
            employee_id: None,
            subject: new.subject.clone(),
            body: new.body.clone(),
            date: Utc::now(),
            status: new.status.clone(),
            priority: new.priority.clone(),
        };
        t.tickets.insert(ticket.id, ticket.clone());
        Ok(ticket)
    }

    async fn list_tickets(&self) -> StoreResult<Vec<Ticket>> {
        Ok(self.tables.read().await.tickets.values().cloned().collect())
    }

    async fn list_customer_tickets(&self, customer_id: i64) -> StoreResult<Vec<Ticket>> {
        Ok(self
            .tables
            .read()
            .await
            .tickets
            .values()
            .filter(|t| t.customer_id == customer_id)
            .cloned()
            .collect())
    }

    async fn get_ticket(&self, id: i64) -> StoreResult<Option<Ticket>> {
        Ok(self.tables.read().await.tickets.get(&id).cloned())
    }

    async fn ticket_owner(&self, id: i64) -> StoreResult<Option<i64>> {
        Ok(self.tables.read().await.tickets.get(&id).map(|t| t.customer_id))
    }

    async fn update_ticket(&self, id: i64, changes: &TicketChanges) -> StoreResult<Option<Ticket>> {
        let mut t = self.tables.write().await;
        let Some(ticket) = t.tickets.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(v) = &changes.subject {
            ticket.subject = v.clone();
        }
        if let Some(v) = &changes.body {
            ticket.body = v.clone();
        }
        if let Some(v) = &changes.status {
            ticket.status = v.clone();
        }
        if let Some(v) = &changes.priority {
            ticket.priority = v.clone();
        }
        Ok(Some(ticket.clone()))
    }

    async fn assign_ticket(&self, id: i64, employee_id: i64) -> StoreResult<Option<Ticket>> {
        let mut t = self.tables.write().await;
        Ok(t.tickets.get_mut(&id).map(|ticket| {
            ticket.employee_id = Some(employee_id);
            ticket.clone()
        }))
    }

    async fn delete_ticket(&self, id: i64) -> StoreResult<Option<Ticket>> {
        Ok(self.tables.write().await.tickets.remove(&id))
    }
}
