use std::sync::Arc;

use tonic::Request;
use tonic::Response;
use tonic::Status;

use super::handlers::create_user;
use super::handlers::delete_user;
use super::handlers::list_users;
use super::handlers::login;
use super::handlers::update_user;
use crate::domain::user::ports::UserServicePort;
use crate::proto::auth_service_server::AuthService as AuthServiceProto;
use crate::proto::CreateUserRequest;
use crate::proto::CreateUserResponse;
use crate::proto::DeleteUserRequest;
use crate::proto::DeleteUserResponse;
use crate::proto::GetUsersRequest;
use crate::proto::GetUsersResponse;
use crate::proto::LoginRequest;
use crate::proto::LoginResponse;
use crate::proto::UpdateUserRequest;
use crate::proto::UpdateUserResponse;

pub struct AuthGrpcService<S>
where
    S: UserServicePort,
{
    service: Arc<S>,
}

impl<S> AuthGrpcService<S>
where
    S: UserServicePort,
{
    pub fn new(service: Arc<S>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl<S> AuthServiceProto for AuthGrpcService<S>
where
    S: UserServicePort,
{
    async fn login(
        &self,
        request: Request<LoginRequest>,
    ) -> Result<Response<LoginResponse>, Status> {
        let response = login::login(self.service.clone(), request.into_inner()).await?;
        Ok(Response::new(response))
    }

    async fn get_all_users(
        &self,
        request: Request<GetUsersRequest>,
    ) -> Result<Response<GetUsersResponse>, Status> {
        let response = list_users::list_users(self.service.clone(), request.into_inner()).await?;
        Ok(Response::new(response))
    }

    async fn create_user(
        &self,
        request: Request<CreateUserRequest>,
    ) -> Result<Response<CreateUserResponse>, Status> {
        let response =
            create_user::create_user(self.service.clone(), request.into_inner()).await?;
        Ok(Response::new(response))
    }

    async fn update_user(
        &self,
        request: Request<UpdateUserRequest>,
    ) -> Result<Response<UpdateUserResponse>, Status> {
        let response =
            update_user::update_user(self.service.clone(), request.into_inner()).await?;
        Ok(Response::new(response))
    }

    async fn delete_user(
        &self,
        request: Request<DeleteUserRequest>,
    ) -> Result<Response<DeleteUserResponse>, Status> {
        let response =
            delete_user::delete_user(self.service.clone(), request.into_inner()).await?;
        Ok(Response::new(response))
    }
}
