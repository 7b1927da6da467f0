use crate::auth::password::verify_password;
use crate::auth::{AuthError, AuthResponse, JwtService, LoginRequest, UserRole};
use crate::services::UserService;

/// Credential checks and token issuance for the editorial surface.
#[derive(Debug, Clone)]
pub struct AuthService {
    user_service: UserService,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(user_service: UserService, jwt_service: JwtService) -> Self {
        Self {
            user_service,
            jwt_service,
        }
    }

    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, AuthError> {
        let user = self
            .user_service
            .get_user_by_email(&request.email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(&request.password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let role = UserRole::from_str(&user.role).unwrap_or(UserRole::Member);
        let access_token = self
            .jwt_service
            .create_access_token(user.id, &user.email, role)?;

        Ok(AuthResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.jwt_service.access_token_expires_in_seconds(),
            user: user.into(),
        })
    }
}
