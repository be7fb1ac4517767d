use async_trait::async_trait;
use mockall::mock;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::RoleId;
use crate::domain::user::models::RoleRight;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserSummary;
use crate::user::errors::SessionStoreError;
use crate::user::errors::UserError;
use crate::user::ports::SessionStore;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

mock! {
    pub TestUserRepository {}

    #[async_trait]
    impl UserRepository for TestUserRepository {
        async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
        async fn list_all(&self) -> Result<Vec<UserSummary>, UserError>;
        async fn find_role_right(&self, role_id: RoleId) -> Result<Option<RoleRight>, UserError>;
        async fn create(&self, command: &CreateUserCommand, password_hash: &str) -> Result<UserId, UserError>;
        async fn update(&self, command: &UpdateUserCommand, password_hash: &str) -> Result<(), UserError>;
        async fn delete(&self, user_id: UserId) -> Result<(), UserError>;
    }
}

mock! {
    pub TestSessionStore {}

    #[async_trait]
    impl SessionStore for TestSessionStore {
        async fn store(&self, key: &str, email: &str) -> Result<(), SessionStoreError>;
        async fn find(&self, key: &str) -> Result<Option<String>, SessionStoreError>;
    }
}

mock! {
    pub TestUserService {}

    #[async_trait]
    impl UserServicePort for TestUserService {
        async fn login(&self, email: &str, password: &str) -> Result<String, UserError>;
        async fn list_users(&self) -> Result<Vec<UserSummary>, UserError>;
        async fn create_user(&self, command: CreateUserCommand) -> Result<UserId, UserError>;
        async fn update_user(&self, command: UpdateUserCommand) -> Result<(), UserError>;
        async fn delete_user(&self, role_id: RoleId, user_id: UserId) -> Result<(), UserError>;
        async fn validate_session(&self, token: &str) -> Result<auth::Claims, UserError>;
    }
}
