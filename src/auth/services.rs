use std::sync::Arc;

use axum::extract::FromRef;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};

use crate::{
    auth::{
        claims::Claims,
        jwt::JwtKeys,
        password::{hash_password_blocking, verify_password_blocking},
        repo::UserStore,
        repo_types::User,
    },
    error::AppError,
    state::AppState,
};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub(crate) fn require(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    Ok(())
}

/// Registration, login, password rotation and token verification on top of
/// a [`UserStore`].
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    keys: JwtKeys,
}

impl FromRef<AppState> for AuthService {
    fn from_ref(state: &AppState) -> Self {
        Self::new(state.users.clone(), JwtKeys::from_ref(state))
    }
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, keys: JwtKeys) -> Self {
        Self { users, keys }
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<User, AppError> {
        require(name, "Name")?;
        require(email, "Email")?;
        require(password, "Password")?;

        let email = normalize_email(email);
        if !is_valid_email(&email) {
            warn!(email = %email, "invalid email");
            return Err(AppError::validation("Invalid email"));
        }

        if self.users.find_by_email(&email).await?.is_some() {
            warn!(email = %email, "email already registered");
            return Err(AppError::Conflict("Email already registered".into()));
        }

        let hash = hash_password_blocking(password.to_string()).await?;
        let user = self.users.create(name.trim(), &email, &hash).await?;
        info!(user_id = user.id, email = %user.email, "user registered");
        Ok(user)
    }

    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, AppError> {
        require(email, "Email")?;
        require(password, "Password")?;

        let email = normalize_email(email);
        let user = self.users.find_by_email(&email).await?;
        let hash = user.as_ref().map(|u| u.password_hash.clone());
        let ok = verify_password_blocking(password.to_string(), hash).await?;

        let user = match (user, ok) {
            (Some(u), true) => u,
            (Some(u), false) => {
                warn!(user_id = u.id, "login invalid password");
                return Err(AppError::InvalidCredentials);
            }
            (None, _) => {
                warn!(email = %email, "login unknown email");
                return Err(AppError::InvalidCredentials);
            }
        };

        let token = self.keys.sign(user.id)?;
        info!(user_id = user.id, "user logged in");
        Ok(token)
    }

    /// Rotates the caller's own password; `email` must be the caller's.
    pub async fn change_password(
        &self,
        user_id: i64,
        email: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        require(email, "Email")?;
        require(new_password, "New password")?;

        let email = normalize_email(email);
        let hash = hash_password_blocking(new_password.to_string()).await?;
        if !self.users.update_password(user_id, &email, &hash).await? {
            warn!(user_id, email = %email, "change password for unknown email");
            return Err(AppError::not_found("Email not found"));
        }
        info!(user_id, "password changed");
        Ok(())
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        self.keys.verify(token)
    }
}
