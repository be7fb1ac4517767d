use async_trait::async_trait;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::RoleId;
use crate::domain::user::models::RoleRight;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserSummary;
use crate::user::errors::SessionStoreError;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Authenticate by email and password and open a session.
    ///
    /// # Returns
    /// Signed session token
    ///
    /// # Errors
    /// * `Unauthorized` - Unknown email, failed lookup, or wrong password
    /// * `Token` - Token could not be signed
    /// * `SessionStore` - Credentials were valid but the session was not recorded
    async fn login(&self, email: &str, password: &str) -> Result<String, UserError>;

    /// List every user with their roles, ordered by id.
    ///
    /// # Errors
    /// * `Repository` - Storage failed or returned undecodable role data
    async fn list_users(&self) -> Result<Vec<UserSummary>, UserError>;

    /// Create a user if `command.role_id` holds the create right.
    ///
    /// # Returns
    /// Identifier of the new user
    ///
    /// # Errors
    /// * `Unauthorized` - Role lacks the right, or the right could not be looked up
    /// * `Hashing` - Password could not be hashed
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Repository` - Storage failed; nothing was written
    async fn create_user(&self, command: CreateUserCommand) -> Result<UserId, UserError>;

    /// Overwrite a user and replace its role if `command.role_id` holds the update right.
    ///
    /// # Errors
    /// * `Unauthorized` - Role lacks the right, or the right could not be looked up
    /// * `NotFound` - User does not exist
    /// * `Hashing` - Password could not be hashed
    /// * `EmailAlreadyExists` - New email belongs to another user
    /// * `Repository` - Storage failed; nothing was written
    async fn update_user(&self, command: UpdateUserCommand) -> Result<(), UserError>;

    /// Delete a user and its role assignments if `role_id` holds the delete right.
    ///
    /// # Errors
    /// * `Unauthorized` - Role lacks the right, or the right could not be looked up
    /// * `NotFound` - User does not exist
    /// * `Repository` - Storage failed; nothing was removed
    async fn delete_user(&self, role_id: RoleId, user_id: UserId) -> Result<(), UserError>;

    /// Resolve a session token to its claims.
    ///
    /// The token must verify against the signing secret and a session
    /// recorded for it must exist under the same email.
    ///
    /// # Errors
    /// * `Unauthorized` - Any verification or lookup failure
    async fn validate_session(&self, token: &str) -> Result<auth::Claims, UserError>;
}

/// Persistence operations for users, roles and the permission matrix.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Retrieve a user and its roles by login email.
    ///
    /// # Returns
    /// Optional user (None if not found)
    ///
    /// # Errors
    /// * `Repository` - Storage failed or role data was malformed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Retrieve all users with their roles, ordered by id.
    ///
    /// Users without role assignments carry an empty role list.
    ///
    /// # Errors
    /// * `Repository` - Storage failed or role data was malformed
    async fn list_all(&self) -> Result<Vec<UserSummary>, UserError>;

    /// Retrieve the permission row governing `role_id`.
    ///
    /// When the role has several rows, the first by section then route governs.
    ///
    /// # Returns
    /// Optional row (None if the role has no entry)
    ///
    /// # Errors
    /// * `Repository` - Storage failed
    async fn find_role_right(&self, role_id: RoleId) -> Result<Option<RoleRight>, UserError>;

    /// Insert a user and its role assignment in one transaction.
    ///
    /// # Arguments
    /// * `command` - User fields and role to assign
    /// * `password_hash` - Already-hashed password
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Repository` - Storage failed
    async fn create(
        &self,
        command: &CreateUserCommand,
        password_hash: &str,
    ) -> Result<UserId, UserError>;

    /// Overwrite a user and replace its role assignment in one transaction.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `EmailAlreadyExists` - New email belongs to another user
    /// * `Repository` - Storage failed
    async fn update(&self, command: &UpdateUserCommand, password_hash: &str)
        -> Result<(), UserError>;

    /// Remove role assignments, then the user, in one transaction.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Repository` - Storage failed
    async fn delete(&self, user_id: UserId) -> Result<(), UserError>;
}

/// Key-value store holding session records.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// Record `email` as the identity behind `key`.
    ///
    /// # Errors
    /// * `ConnectionFailed` - Store unreachable
    /// * `WriteFailed` - Store rejected the write
    async fn store(&self, key: &str, email: &str) -> Result<(), SessionStoreError>;

    /// Look up the identity recorded under `key`.
    ///
    /// # Errors
    /// * `ConnectionFailed` - Store unreachable
    /// * `ReadFailed` - Store rejected the read
    async fn find(&self, key: &str) -> Result<Option<String>, SessionStoreError>;
}
