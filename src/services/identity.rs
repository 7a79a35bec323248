use crate::db::{Store, StoreResult};
use crate::models::principal::{Principal, PrincipalKind};

/// Locates stored principals and their credentials.
pub struct IdentityService;

impl IdentityService {
    /// Digest only, from the store selected by `kind`. The full record is not loaded.
    pub async fn find_credential_hash(
        store: &dyn Store,
        email: &str,
        kind: PrincipalKind,
    ) -> StoreResult<Option<String>> {
        store.password_hash(kind, email).await
    }

    /// Customers first, then employees.
    pub async fn find_principal_by_email(store: &dyn Store, email: &str) -> StoreResult<Option<Principal>> {
        if let Some(customer) = store.find_principal_by_email(PrincipalKind::Customer, email).await? {
            return Ok(Some(customer));
        }
        store.find_principal_by_email(PrincipalKind::Employee, email).await
    }

    pub async fn find_principal(
        store: &dyn Store,
        email: &str,
        kind: PrincipalKind,
    ) -> StoreResult<Option<Principal>> {
        store.find_principal_by_email(kind, email).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::models::principal::NewPrincipal;

    async fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        for (kind, email, hash) in [
            (PrincipalKind::Customer, "both@test.tst", "customer-digest"),
            (PrincipalKind::Employee, "both@test.tst", "employee-digest"),
            (PrincipalKind::Employee, "lucy@test.tst", "lucy-digest"),
        ] {
            store
                .create_principal(
                    kind,
                    &NewPrincipal {
                        first_name: "First".into(),
                        last_name: "Last".into(),
                        email: email.into(),
                        password_hash: hash.into(),
                    },
                )
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn claimed_role_selects_the_credential_store() {
        let store = seeded().await;
        let customer = IdentityService::find_credential_hash(&store, "both@test.tst", PrincipalKind::Customer)
            .await
            .unwrap();
        let employee = IdentityService::find_credential_hash(&store, "both@test.tst", PrincipalKind::Employee)
            .await
            .unwrap();
        assert_eq!(customer.as_deref(), Some("customer-digest"));
        assert_eq!(employee.as_deref(), Some("employee-digest"));
        assert!(IdentityService::find_credential_hash(&store, "lucy@test.tst", PrincipalKind::Customer)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn existence_check_prefers_customers_then_employees() {
        let store = seeded().await;
        let both = IdentityService::find_principal_by_email(&store, "both@test.tst")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(both.kind, PrincipalKind::Customer);

        let lucy = IdentityService::find_principal_by_email(&store, "lucy@test.tst")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(lucy.kind, PrincipalKind::Employee);

        assert!(IdentityService::find_principal_by_email(&store, "nobody@test.tst")
            .await
            .unwrap()
            .is_none());
    }
}
