use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Role entry carried inside a session token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoleClaim {
    pub role_id: i32,
    pub role_name: String,
}

impl RoleClaim {
    pub fn new(role_id: i32, role_name: impl Into<String>) -> Self {
        Self {
            role_id,
            role_name: role_name.into(),
        }
    }
}

/// Session token payload.
///
/// Identifies the authenticated user by id and email and lists the roles
/// assigned at login time. No expiration claim is emitted; session lifetime
/// is owned by the session store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// User identifier
    pub id: i32,

    /// Login email
    pub email: String,

    /// Roles assigned to the user, possibly empty
    #[serde(default)]
    pub roles: Vec<RoleClaim>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub iat: Option<i64>,
}

impl Claims {
    /// Create claims for a user, stamped with the current time as `iat`.
    pub fn for_user(id: i32, email: impl Into<String>, roles: Vec<RoleClaim>) -> Self {
        Self {
            id,
            email: email.into(),
            roles,
            iat: Some(Utc::now().timestamp()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_user() {
        let claims = Claims::for_user(7, "alice@example.com", vec![RoleClaim::new(1, "admin")]);

        assert_eq!(claims.id, 7);
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.roles, vec![RoleClaim::new(1, "admin")]);
        assert!(claims.iat.is_some());
    }

    #[test]
    fn test_empty_roles() {
        let claims = Claims::for_user(1, "nobody@example.com", Vec::new());
        assert!(claims.roles.is_empty());
    }
}
