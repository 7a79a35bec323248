use crate::{
    db::Store,
    error::{ApiError, ApiResult},
    models::principal::{NewPrincipal, Principal, PrincipalChanges, PrincipalKind, RegisterRequest, UpdatePrincipalRequest},
    services::{password::CredentialHasher, validation},
};

/// Administrative CRUD over either principal store.
pub struct PrincipalService;

impl PrincipalService {
    pub async fn list(store: &dyn Store, kind: PrincipalKind) -> ApiResult<Vec<Principal>> {
        Ok(store.list_principals(kind).await?)
    }

    pub async fn get(store: &dyn Store, kind: PrincipalKind, id: i64) -> ApiResult<Principal> {
        store
            .get_principal(kind, id)
            .await?
            .ok_or_else(|| not_found(kind, id))
    }

    pub async fn create(
        store: &dyn Store,
        hasher: &CredentialHasher,
        kind: PrincipalKind,
        req: &RegisterRequest,
    ) -> ApiResult<Principal> {
        validation::registration(req)?;
        let new = NewPrincipal {
            first_name: req.first_name.trim().to_string(),
            last_name: req.last_name.trim().to_string(),
            email: req.email.trim().to_string(),
            password_hash: hasher.hash(&req.password)?,
        };
        Ok(store.create_principal(kind, &new).await?)
    }

    pub async fn update(
        store: &dyn Store,
        hasher: &CredentialHasher,
        kind: PrincipalKind,
        id: i64,
        req: &UpdatePrincipalRequest,
    ) -> ApiResult<Principal> {
        validation::principal_update(req)?;
        let changes = PrincipalChanges {
            first_name: req.first_name.as_deref().map(|s| s.trim().to_string()),
            last_name: req.last_name.as_deref().map(|s| s.trim().to_string()),
            email: req.email.as_deref().map(|s| s.trim().to_string()),
            password_hash: req.password.as_deref().map(|p| hasher.hash(p)).transpose()?,
        };
        if changes.is_empty() {
            return Err(ApiError::MissingFields(
                "Please provide at least one change to make".into(),
            ));
        }
        store
            .update_principal(kind, id, &changes)
            .await?
            .ok_or_else(|| not_found(kind, id))
    }

    pub async fn delete(store: &dyn Store, kind: PrincipalKind, id: i64) -> ApiResult<Principal> {
        store
            .delete_principal(kind, id)
            .await?
            .ok_or_else(|| not_found(kind, id))
    }
}

fn not_found(kind: PrincipalKind, id: i64) -> ApiError {
    let label = match kind {
        PrincipalKind::Customer => "Customer",
        PrincipalKind::Employee => "Employee",
    };
    ApiError::ResourceNotFound(format!("{label} with id of {id} does not exist!"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    fn req(email: &str) -> RegisterRequest {
        RegisterRequest {
            first_name: "Freddie".into(),
            last_name: "Maco".into(),
            email: email.into(),
            password: "hunter22".into(),
            role: None,
        }
    }

    #[tokio::test]
    async fn update_rehashes_a_new_password() {
        let store = MemoryStore::new();
        let hasher = CredentialHasher::new(4);
        let e = PrincipalService::create(&store, &hasher, PrincipalKind::Employee, &req("f@test.tst"))
            .await
            .unwrap();

        let changes = UpdatePrincipalRequest {
            password: Some("new-password".into()),
            ..Default::default()
        };
        let updated = PrincipalService::update(&store, &hasher, PrincipalKind::Employee, e.id, &changes)
            .await
            .unwrap();
        assert!(hasher.verify("new-password", &updated.password_hash));
        assert!(!hasher.verify("hunter22", &updated.password_hash));
    }

    #[tokio::test]
    async fn empty_update_is_rejected() {
        let store = MemoryStore::new();
        let hasher = CredentialHasher::new(4);
        let err = PrincipalService::update(
            &store,
            &hasher,
            PrincipalKind::Customer,
            1,
            &UpdatePrincipalRequest::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::MissingFields(_)));
    }

    #[tokio::test]
    async fn missing_records_are_not_found() {
        let store = MemoryStore::new();
        let err = PrincipalService::delete(&store, PrincipalKind::Customer, 99).await.unwrap_err();
        assert_eq!(err.to_string(), "Customer with id of 99 does not exist!");
    }
}
