use std::sync::Arc;

use tonic::Status;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::RoleId;
use crate::domain::user::ports::UserServicePort;
use crate::proto::CreateUserRequest;
use crate::proto::CreateUserResponse;
use crate::user::errors::UserError;

pub async fn create_user<S: UserServicePort>(
    service: Arc<S>,
    request: CreateUserRequest,
) -> Result<CreateUserResponse, Status> {
    let command = try_into_command(request)?;

    let user_id = service.create_user(command).await?;

    Ok(CreateUserResponse { user_id: user_id.0 })
}

fn try_into_command(request: CreateUserRequest) -> Result<CreateUserCommand, UserError> {
    let email = EmailAddress::new(request.email)?;
    Ok(CreateUserCommand::new(
        request.name,
        email,
        request.password,
        RoleId(request.role_id),
    ))
}
