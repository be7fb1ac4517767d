use std::sync::Arc;

use tonic::Status;

use crate::domain::user::ports::UserServicePort;
use crate::proto::LoginRequest;
use crate::proto::LoginResponse;

pub async fn login<S: UserServicePort>(
    service: Arc<S>,
    request: LoginRequest,
) -> Result<LoginResponse, Status> {
    let access_token = service.login(&request.email, &request.password).await?;

    Ok(LoginResponse { access_token })
}

#[cfg(test)]
mod tests {
    use tonic::Code;

    use super::*;
    use crate::domain::user::mocks::MockTestUserService;
    use crate::user::errors::SessionStoreError;
    use crate::user::errors::UserError;

    fn request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_returns_token() {
        let mut service = MockTestUserService::new();
        service
            .expect_login()
            .withf(|email, password| email == "alice@example.com" && password == "secret")
            .times(1)
            .returning(|_, _| Ok("header.payload.signature".to_string()));

        let response = login(Arc::new(service), request("alice@example.com", "secret"))
            .await
            .expect("login should succeed");

        assert_eq!(response.access_token, "header.payload.signature");
    }

    #[tokio::test]
    async fn test_login_rejected() {
        let mut service = MockTestUserService::new();
        service
            .expect_login()
            .returning(|_, _| Err(UserError::Unauthorized));

        let status = login(Arc::new(service), request("alice@example.com", "wrong"))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::Unauthenticated);
        assert_eq!(status.message(), "unauthorized");
    }

    #[tokio::test]
    async fn test_login_session_failure_is_not_unauthenticated() {
        let mut service = MockTestUserService::new();
        service.expect_login().returning(|_, _| {
            Err(UserError::SessionStore(SessionStoreError::ConnectionFailed(
                "refused".to_string(),
            )))
        });

        let status = login(Arc::new(service), request("alice@example.com", "secret"))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::Unavailable);
    }
}
