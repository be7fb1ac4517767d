use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::user::errors::EmailError;

/// User record as loaded for authentication.
///
/// Carries the password hash, so it never leaves the service boundary;
/// outward listings use [`UserSummary`].
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub password_hash: String,
    pub roles: Vec<Role>,
    pub last_access: DateTime<Utc>,
}

/// User as exposed by listings: no credential material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub id: UserId,
    pub email: String,
    pub last_access: DateTime<Utc>,
    pub roles: Vec<Role>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub i32);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Role unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(pub i32);

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Named permission group.
///
/// Field names match the aggregated JSON produced by the user queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    #[serde(rename = "role_id")]
    pub id: RoleId,
    #[serde(rename = "role_name")]
    pub name: String,
}

impl From<&Role> for auth::RoleClaim {
    fn from(role: &Role) -> Self {
        auth::RoleClaim::new(role.id.0, role.name.clone())
    }
}

/// Action a role may be allowed to perform on a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    Create,
    Read,
    Update,
    Delete,
}

impl Permission {
    pub const ALL: [Permission; 4] = [
        Permission::Create,
        Permission::Read,
        Permission::Update,
        Permission::Delete,
    ];
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Permission::Create => "create",
            Permission::Read => "read",
            Permission::Update => "update",
            Permission::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// One row of the permission matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRight {
    pub role_id: RoleId,
    pub section: String,
    pub route: String,
    pub can_create: bool,
    pub can_read: bool,
    pub can_update: bool,
    pub can_delete: bool,
}

impl RoleRight {
    pub fn allows(&self, permission: Permission) -> bool {
        match permission {
            Permission::Create => self.can_create,
            Permission::Read => self.can_read,
            Permission::Update => self.can_update,
            Permission::Delete => self.can_delete,
        }
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to create a new user.
///
/// `role_id` is both the caller's role checked by the gate and the role
/// assigned to the new user.
#[derive(Debug, Clone)]
pub struct CreateUserCommand {
    pub name: String,
    pub email: EmailAddress,
    pub password: String,
    pub role_id: RoleId,
}

impl CreateUserCommand {
    pub fn new(name: String, email: EmailAddress, password: String, role_id: RoleId) -> Self {
        Self {
            name,
            email,
            password,
            role_id,
        }
    }
}

/// Command to overwrite an existing user and replace its role assignment.
#[derive(Debug, Clone)]
pub struct UpdateUserCommand {
    pub user_id: UserId,
    pub name: String,
    pub email: EmailAddress,
    pub password: String,
    pub role_id: RoleId,
}

impl UpdateUserCommand {
    pub fn new(
        user_id: UserId,
        name: String,
        email: EmailAddress,
        password: String,
        role_id: RoleId,
    ) -> Self {
        Self {
            user_id,
            name,
            email,
            password,
            role_id,
        }
    }
}

/// Cache key under which the session for `token` is recorded.
pub fn session_key(token: &str) -> String {
    format!("session:{}", token)
}
