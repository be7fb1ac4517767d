use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::Claims;

use crate::domain::user::gate::AuthorizationGate;
use crate::domain::user::models::session_key;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::Permission;
use crate::domain::user::models::RoleId;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserSummary;
use crate::user::errors::UserError;
use crate::user::ports::SessionStore;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for login and user management.
///
/// Holds no per-request state; every operation is a single pass over the
/// injected repository, session store and authenticator.
pub struct UserService<UR, SS>
where
    UR: UserRepository,
    SS: SessionStore,
{
    repository: Arc<UR>,
    session_store: Arc<SS>,
    gate: AuthorizationGate<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR, SS> UserService<UR, SS>
where
    UR: UserRepository,
    SS: SessionStore,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User, role and permission persistence
    /// * `session_store` - Session cache
    /// * `authenticator` - Password hasher and token signer built from the configured secret
    pub fn new(
        repository: Arc<UR>,
        session_store: Arc<SS>,
        authenticator: Arc<Authenticator>,
    ) -> Self {
        Self {
            gate: AuthorizationGate::new(Arc::clone(&repository)),
            repository,
            session_store,
            authenticator,
        }
    }

    /// Argon2 is CPU-bound, so it runs on the blocking pool.
    async fn hash_password(&self, password: &str) -> Result<String, UserError> {
        let authenticator = Arc::clone(&self.authenticator);
        let password = password.to_string();

        tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
            .await
            .map_err(|e| UserError::Hashing(format!("Password hashing task failed: {e}")))?
            .map_err(UserError::from)
    }
}

#[async_trait]
impl<UR, SS> UserServicePort for UserService<UR, SS>
where
    UR: UserRepository,
    SS: SessionStore,
{
    async fn login(&self, email: &str, password: &str) -> Result<String, UserError> {
        let user = match self.repository.find_by_email(email).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                tracing::info!("Login rejected: unknown email");
                return Err(UserError::Unauthorized);
            }
            Err(e) => {
                tracing::error!(error = %e, "Login rejected: user lookup failed");
                return Err(UserError::Unauthorized);
            }
        };

        let claims = Claims::for_user(
            user.id.0,
            user.email.clone(),
            user.roles.iter().map(Into::into).collect(),
        );

        let authenticator = Arc::clone(&self.authenticator);
        let password = password.to_string();
        let stored_hash = user.password_hash.clone();
        let result = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&password, &stored_hash, &claims)
        })
        .await
        .map_err(|e| UserError::Hashing(format!("Password verification task failed: {e}")))?
        .map_err(|e| match e {
            AuthenticationError::InvalidCredentials => {
                tracing::info!(user_id = %user.id, "Login rejected: invalid credentials");
                UserError::Unauthorized
            }
            AuthenticationError::JwtError(err) => UserError::Token(err.to_string()),
        })?;

        self.session_store
            .store(&session_key(&result.access_token), &user.email)
            .await
            .map_err(|e| {
                tracing::error!(
                    user_id = %user.id,
                    error = %e,
                    "Credentials accepted but session could not be recorded"
                );
                UserError::from(e)
            })?;

        tracing::info!(user_id = %user.id, "Login succeeded");

        Ok(result.access_token)
    }

    async fn list_users(&self) -> Result<Vec<UserSummary>, UserError> {
        self.repository.list_all().await
    }

    async fn create_user(&self, command: CreateUserCommand) -> Result<UserId, UserError> {
        self.gate.authorize(command.role_id, Permission::Create).await?;

        let password_hash = self.hash_password(&command.password).await?;

        let user_id = self.repository.create(&command, &password_hash).await?;

        tracing::info!(user_id = %user_id, role_id = %command.role_id, "User created");

        Ok(user_id)
    }

    async fn update_user(&self, command: UpdateUserCommand) -> Result<(), UserError> {
        self.gate.authorize(command.role_id, Permission::Update).await?;

        let password_hash = self.hash_password(&command.password).await?;

        self.repository.update(&command, &password_hash).await?;

        tracing::info!(user_id = %command.user_id, role_id = %command.role_id, "User updated");

        Ok(())
    }

    async fn delete_user(&self, role_id: RoleId, user_id: UserId) -> Result<(), UserError> {
        self.gate.authorize(role_id, Permission::Delete).await?;

        self.repository.delete(user_id).await?;

        tracing::info!(user_id = %user_id, "User deleted");

        Ok(())
    }

    async fn validate_session(&self, token: &str) -> Result<Claims, UserError> {
        let claims = self.authenticator.validate_token(token).map_err(|e| {
            tracing::warn!(error = %e, "Session token rejected");
            UserError::Unauthorized
        })?;

        match self.session_store.find(&session_key(token)).await {
            Ok(Some(email)) if email == claims.email => Ok(claims),
            Ok(_) => {
                tracing::warn!(user_id = claims.id, "No matching session for token");
                Err(UserError::Unauthorized)
            }
            Err(e) => {
                tracing::error!(user_id = claims.id, error = %e, "Session lookup failed");
                Err(UserError::Unauthorized)
            }
        }
    }
}
