use crate::{
    db::Store,
    error::{ApiError, ApiResult},
    models::{
        auth::{LoginRequest, LoginResponse, TokenSubject},
        principal::{Principal, PrincipalKind, RegisterRequest},
    },
    services::{
        identity::IdentityService, password::CredentialHasher, principals::PrincipalService, token::TokenCodec,
    },
};

const CREDENTIALS_MISSING: &str = "Username or Password missing, please make sure to add username and password";
const CREDENTIALS_UNKNOWN: &str = "Error, username or password incorrect";

pub struct AuthService;

impl AuthService {
    /// Login: existence check, then credential fetch and verification, then token issue.
    /// Nothing is written; a dropped future leaves no trace.
    pub async fn login(
        store: &dyn Store,
        hasher: &CredentialHasher,
        tokens: &TokenCodec,
        req: &LoginRequest,
    ) -> ApiResult<LoginResponse> {
        let email = req.email.trim();
        if email.is_empty() || req.password.is_empty() {
            return Err(ApiError::MissingFields(CREDENTIALS_MISSING.into()));
        }
        let kind = PrincipalKind::from_claimed_role(req.role.as_deref());

        let existing = IdentityService::find_principal_by_email(store, email)
            .await?
            .ok_or(ApiError::PrincipalNotFound)?;

        let digest = IdentityService::find_credential_hash(store, email, kind)
            .await?
            .ok_or_else(|| ApiError::MissingFields(CREDENTIALS_UNKNOWN.into()))?;

        if !hasher.verify(&req.password, &digest) {
            tracing::warn!(?kind, "login rejected: password mismatch");
            return Err(ApiError::BadCredentials);
        }

        // The existence check may have matched the other store; claims come from the
        // principal whose credential was just verified.
        let principal = if existing.kind == kind {
            existing
        } else {
            IdentityService::find_principal(store, email, kind)
                .await?
                .ok_or_else(|| ApiError::MissingFields(CREDENTIALS_UNKNOWN.into()))?
        };

        let token = tokens.issue(&Self::token_subject(&principal))?;
        tracing::info!(subject = principal.id, role = %principal.role(), "login succeeded");

        Ok(LoginResponse {
            message: format!("Welcome back {}", principal.first_name),
            token,
        })
    }

    /// Registration stores into the employee table only when `role == "admin"`.
    pub async fn register(
        store: &dyn Store,
        hasher: &CredentialHasher,
        req: &RegisterRequest,
    ) -> ApiResult<Principal> {
        let kind = PrincipalKind::from_claimed_role(req.role.as_deref());
        let principal = PrincipalService::create(store, hasher, kind, req).await?;
        tracing::info!(id = principal.id, ?kind, "principal registered");
        Ok(principal)
    }

    pub fn token_subject(principal: &Principal) -> TokenSubject {
        TokenSubject {
            subject: principal.id,
            name: principal.display_name(),
            role: principal.role(),
        }
    }
}
