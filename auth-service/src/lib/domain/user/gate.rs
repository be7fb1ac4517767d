use std::sync::Arc;

use crate::domain::user::models::Permission;
use crate::domain::user::models::RoleId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;

/// Authorization check run before every mutating user operation.
pub struct AuthorizationGate<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
}

impl<UR> AuthorizationGate<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>) -> Self {
        Self { repository }
    }

    /// Look up whether `role_id` holds `permission`.
    ///
    /// The role's governing permission row decides, whatever section it is
    /// filed under. A role with no permission row is not permitted.
    ///
    /// # Errors
    /// * `Repository` - The permission lookup itself failed
    pub async fn check_permission(
        &self,
        role_id: RoleId,
        permission: Permission,
    ) -> Result<bool, UserError> {
        let right = self.repository.find_role_right(role_id).await?;

        Ok(right.is_some_and(|right| right.allows(permission)))
    }

    /// Succeed only if `role_id` holds `permission`.
    ///
    /// Denial and lookup failure both yield `Unauthorized`; the difference
    /// is only visible in the logs.
    pub async fn authorize(&self, role_id: RoleId, permission: Permission) -> Result<(), UserError> {
        match self.check_permission(role_id, permission).await {
            Ok(true) => Ok(()),
            Ok(false) => {
                tracing::warn!(role_id = %role_id, permission = %permission, "Permission denied");
                Err(UserError::Unauthorized)
            }
            Err(e) => {
                tracing::error!(
                    role_id = %role_id,
                    permission = %permission,
                    error = %e,
                    "Permission lookup failed"
                );
                Err(UserError::Unauthorized)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::mocks::MockTestUserRepository;
    use crate::domain::user::models::RoleRight;

    fn right(role_id: RoleId, create: bool, update: bool) -> RoleRight {
        RoleRight {
            role_id,
            section: "users".to_string(),
            route: "/users".to_string(),
            can_create: create,
            can_read: true,
            can_update: update,
            can_delete: false,
        }
    }

    #[tokio::test]
    async fn test_missing_row_denies_every_permission() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_role_right()
            .withf(|role_id| *role_id == RoleId(9))
            .times(Permission::ALL.len())
            .returning(|_| Ok(None));

        let gate = AuthorizationGate::new(Arc::new(repository));

        for permission in Permission::ALL {
            let allowed = gate
                .check_permission(RoleId(9), permission)
                .await
                .expect("lookup should succeed");
            assert!(!allowed, "{} should be denied", permission);
        }
    }

    #[tokio::test]
    async fn test_check_permission_reads_named_flag() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_role_right()
            .returning(|role_id| Ok(Some(right(role_id, true, false))));

        let gate = AuthorizationGate::new(Arc::new(repository));

        assert!(gate.check_permission(RoleId(1), Permission::Create).await.unwrap());
        assert!(gate.check_permission(RoleId(1), Permission::Read).await.unwrap());
        assert!(!gate.check_permission(RoleId(1), Permission::Update).await.unwrap());
        assert!(!gate.check_permission(RoleId(1), Permission::Delete).await.unwrap());
    }

    #[tokio::test]
    async fn test_check_permission_propagates_lookup_failure() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_role_right()
            .times(1)
            .returning(|_| Err(UserError::Repository("connection reset".to_string())));

        let gate = AuthorizationGate::new(Arc::new(repository));

        let result = gate.check_permission(RoleId(1), Permission::Create).await;
        assert!(matches!(result, Err(UserError::Repository(_))));
    }

    #[tokio::test]
    async fn test_authorize_merges_denial_and_failure() {
        let mut denying = MockTestUserRepository::new();
        denying
            .expect_find_role_right()
            .returning(|role_id| Ok(Some(right(role_id, false, false))));

        let mut failing = MockTestUserRepository::new();
        failing
            .expect_find_role_right()
            .returning(|_| Err(UserError::Repository("timeout".to_string())));

        let denied = AuthorizationGate::new(Arc::new(denying))
            .authorize(RoleId(2), Permission::Create)
            .await;
        let failed = AuthorizationGate::new(Arc::new(failing))
            .authorize(RoleId(2), Permission::Create)
            .await;

        assert!(matches!(denied, Err(UserError::Unauthorized)));
        assert!(matches!(failed, Err(UserError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_row_under_any_section_governs() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_find_role_right().returning(|role_id| {
            Ok(Some(RoleRight {
                section: "admin".to_string(),
                route: "/settings".to_string(),
                ..right(role_id, true, false)
            }))
        });

        let gate = AuthorizationGate::new(Arc::new(repository));

        assert!(gate.authorize(RoleId(1), Permission::Create).await.is_ok());
    }

    #[tokio::test]
    async fn test_authorize_allows_granted_permission() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_role_right()
            .returning(|role_id| Ok(Some(right(role_id, false, true))));

        let gate = AuthorizationGate::new(Arc::new(repository));

        assert!(gate.authorize(RoleId(3), Permission::Update).await.is_ok());
    }
}
