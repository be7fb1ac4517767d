use std::sync::Arc;

use tonic::Status;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::RoleId;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::proto::UpdateUserRequest;
use crate::proto::UpdateUserResponse;
use crate::user::errors::UserError;

pub async fn update_user<S: UserServicePort>(
    service: Arc<S>,
    request: UpdateUserRequest,
) -> Result<UpdateUserResponse, Status> {
    let command = try_into_command(request)?;

    service.update_user(command).await?;

    Ok(UpdateUserResponse {
        message: "User updated successfully".to_string(),
    })
}

fn try_into_command(request: UpdateUserRequest) -> Result<UpdateUserCommand, UserError> {
    let email = EmailAddress::new(request.email)?;
    Ok(UpdateUserCommand::new(
        UserId(request.user_id),
        request.name,
        email,
        request.password,
        RoleId(request.role_id),
    ))
}
