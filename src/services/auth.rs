use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::auth::policy::{ROLE_ADMIN, ROLE_USER};
use crate::auth::{generate_jwt, Claims, JwtError};
use crate::config;
use crate::database::models::user::{LoginRequest, RegisterRequest, User};
use crate::database::repository::{OwnerDirectory, UserRepository};
use crate::database::DatabaseError;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("{0}")]
    Validation(String),
    #[error("email already registered: {0}")]
    EmailTaken(String),
    #[error(transparent)]
    Token(#[from] JwtError),
    #[error(transparent)]
    Hash(#[from] bcrypt::BcryptError),
    #[error(transparent)]
    Store(#[from] DatabaseError),
}

#[derive(Debug, Serialize)]
pub struct LoginOutcome {
    pub token: String,
    pub user: User,
    pub expires_in: u64,
}

pub struct AuthService {
    users: UserRepository,
    directory: Arc<dyn OwnerDirectory>,
}

impl AuthService {
    pub fn new(users: UserRepository, directory: Arc<dyn OwnerDirectory>) -> Self {
        Self { users, directory }
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<User, AuthServiceError> {
        validate_email_format(&request.email).map_err(AuthServiceError::Validation)?;
        validate_username_format(&request.username).map_err(AuthServiceError::Validation)?;
        validate_password(&request.password).map_err(AuthServiceError::Validation)?;

        let role = request.role.unwrap_or_else(|| ROLE_USER.to_string());
        if role != ROLE_ADMIN && role != ROLE_USER {
            return Err(AuthServiceError::Validation(format!(
                "Role must be '{}' or '{}'",
                ROLE_ADMIN, ROLE_USER
            )));
        }

        if self.users.find_by_email(&request.email).await?.is_some() {
            return Err(AuthServiceError::EmailTaken(request.email));
        }

        let cost = config::config().security.bcrypt_cost;
        let password_hash = bcrypt::hash(&request.password, cost)?;

        let user = self
            .users
            .create(&request.email, &request.username, &password_hash, &role)
            .await?;

        tracing::info!("Registered user '{}' with role '{}'", user.username, user.role);
        Ok(user)
    }

    /// Verify credentials and issue a token. The claims carry the linked
    /// alumni number so later requests don't need to look it up for the
    /// ownership check.
    pub async fn login(&self, request: LoginRequest) -> Result<LoginOutcome, AuthServiceError> {
        let user = self
            .users
            .find_by_email(&request.email)
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        if !bcrypt::verify(&request.password, &user.password_hash)? {
            return Err(AuthServiceError::InvalidCredentials);
        }

        let number = self.directory.owner_key_for_user(user.id).await?;

        let claims = Claims::new(user.id, user.username.clone(), user.role.clone(), number);
        let token = generate_jwt(claims)?;

        let expires_in = config::config().security.jwt_expiry_hours * 3600;

        tracing::info!("User '{}' logged in", user.username);
        Ok(LoginOutcome {
            token,
            user,
            expires_in,
        })
    }
}

/// Validate username format and requirements
fn validate_username_format(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username cannot be empty".to_string());
    }

    if username.len() < 3 {
        return Err("Username must be at least 3 characters".to_string());
    }

    if username.len() > 50 {
        return Err("Username must be less than 50 characters".to_string());
    }

    // Allow alphanumeric, underscore, hyphen
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
    {
        return Err(
            "Username can only contain letters, numbers, underscore, and hyphen".to_string(),
        );
    }

    // Must start with alphanumeric
    if !username.chars().next().unwrap().is_alphanumeric() {
        return Err("Username must start with a letter or number".to_string());
    }

    Ok(())
}

/// Basic email format check
fn validate_email_format(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }

    if !email.contains('@') || !email.contains('.') {
        return Err("Invalid email format".to_string());
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

const MIN_PASSWORD_LENGTH: usize = 8;

fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        ));
    }
    Ok(())
}
