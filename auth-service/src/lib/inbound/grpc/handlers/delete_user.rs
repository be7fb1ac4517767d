use std::sync::Arc;

use tonic::Status;

use crate::domain::user::models::RoleId;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::proto::DeleteUserRequest;
use crate::proto::DeleteUserResponse;

pub async fn delete_user<S: UserServicePort>(
    service: Arc<S>,
    request: DeleteUserRequest,
) -> Result<DeleteUserResponse, Status> {
    service
        .delete_user(RoleId(request.role_id), UserId(request.user_id))
        .await?;

    Ok(DeleteUserResponse {
        message: "User deleted successfully".to_string(),
    })
}
