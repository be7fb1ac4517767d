use tonic::Status;

use crate::domain::user::models::Role;
use crate::domain::user::models::UserSummary;
use crate::user::errors::UserError;

pub mod create_user;
pub mod delete_user;
pub mod list_users;
pub mod login;
pub mod update_user;

impl From<&Role> for crate::proto::Role {
    fn from(role: &Role) -> Self {
        Self {
            role_id: role.id.to_string(),
            role_name: role.name.clone(),
        }
    }
}

impl From<UserSummary> for crate::proto::User {
    fn from(user: UserSummary) -> Self {
        Self {
            email: user.email,
            last_access: user.last_access.to_rfc3339(),
            roles: user.roles.iter().map(Into::into).collect(),
        }
    }
}

/// Map domain failures onto gRPC status codes.
///
/// Infrastructure causes are logged here and replaced by a generic message.
impl From<UserError> for Status {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Unauthorized => Status::unauthenticated("unauthorized"),
            UserError::InvalidEmail(_) => Status::invalid_argument(err.to_string()),
            UserError::NotFound(_) => Status::not_found(err.to_string()),
            UserError::EmailAlreadyExists(_) => Status::already_exists(err.to_string()),
            UserError::SessionStore(_) => {
                tracing::error!(error = %err, "Session store failure");
                Status::unavailable("session could not be recorded")
            }
            UserError::Repository(_) | UserError::Hashing(_) | UserError::Token(_) => {
                tracing::error!(error = %err, "Internal failure");
                Status::internal("internal error")
            }
        }
    }
}
