use std::sync::Arc;

use tonic::Status;

use crate::domain::user::ports::UserServicePort;
use crate::proto::GetUsersRequest;
use crate::proto::GetUsersResponse;

pub async fn list_users<S: UserServicePort>(
    service: Arc<S>,
    _request: GetUsersRequest,
) -> Result<GetUsersResponse, Status> {
    let users = service.list_users().await?;

    Ok(GetUsersResponse {
        users: users.into_iter().map(Into::into).collect(),
    })
}
