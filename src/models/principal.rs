use serde::{Deserialize, Serialize};

/// Role carried in issued tokens. Always derived from the principal kind.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[serde(alias = "regular user")]
    User,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Role::User => "user",
            Role::Admin => "admin",
        };
        write!(f, "{s}")
    }
}

/// Which store a principal lives in. Resolved once at the request boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrincipalKind {
    Customer,
    Employee,
}

impl PrincipalKind {
    /// Maps a caller-declared role onto a store. Only `"admin"` selects employees;
    /// anything else (including no role at all) is a customer.
    pub fn from_claimed_role(role: Option<&str>) -> Self {
        match role.map(str::trim) {
            Some("admin") => PrincipalKind::Employee,
            _ => PrincipalKind::Customer,
        }
    }

    pub fn role(self) -> Role {
        match self {
            PrincipalKind::Customer => Role::User,
            PrincipalKind::Employee => Role::Admin,
        }
    }

    pub fn table(self) -> &'static str {
        match self {
            PrincipalKind::Customer => "customers",
            PrincipalKind::Employee => "employees",
        }
    }
}

/// A stored customer or employee.
#[derive(Debug, Clone)]
pub struct Principal {
    pub kind: PrincipalKind,
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
}

impl Principal {
    pub fn role(&self) -> Role {
        self.kind.role()
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Insert payload for either store. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewPrincipal {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, Default)]
pub struct PrincipalChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

impl PrincipalChanges {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.password_hash.is_none()
    }
}

// Request/Response DTOs
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdatePrincipalRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Outbound view of a principal. Never carries the password hash.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrincipalProfile {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
}

impl From<Principal> for PrincipalProfile {
    fn from(p: Principal) -> Self {
        Self {
            role: p.role(),
            id: p.id,
            first_name: p.first_name,
            last_name: p.last_name,
            email: p.email,
        }
    }
}
