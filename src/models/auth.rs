use serde::{Deserialize, Serialize};

use super::principal::Role;

/// Claims embedded in the signed access token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub subject: i64,
    pub name: String,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

/// Identity to be signed into a token; expiry is added by the codec.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenSubject {
    pub subject: i64,
    pub name: String,
    pub role: Role,
}

/// Extracted from the validated token and attached to the request by `restricted`.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub subject: i64,
    pub name: String,
    pub role: Role,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl From<Claims> for AuthenticatedUser {
    fn from(c: Claims) -> Self {
        Self {
            subject: c.subject,
            name: c.name,
            role: c.role,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub role: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}
