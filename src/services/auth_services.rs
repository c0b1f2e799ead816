// src/services/auth_services.rs - credential checks and session lifecycle

use std::sync::Arc;

use log::{debug, info};
use thiserror::Error;

use super::password::{hash_password_async, verify_password_async};
use super::session_store::{Session, SessionStore};
use crate::models::{NewUser, User};
use crate::repositories::{Storage, StorageError};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("username already taken: {0}")]
    UsernameTaken(String),
    #[error("password hashing error: {0}")]
    Hashing(String),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Clone)]
pub struct AuthService {
    storage: Arc<dyn Storage>,
    sessions: Arc<dyn SessionStore>,
    pub cookie_name: String,
    pub cookie_secure: bool,
}

impl AuthService {
    pub fn new(
        storage: Arc<dyn Storage>,
        sessions: Arc<dyn SessionStore>,
        cookie_name: impl Into<String>,
        cookie_secure: bool,
    ) -> Self {
        Self {
            storage,
            sessions,
            cookie_name: cookie_name.into(),
            cookie_secure,
        }
    }

    pub fn sessions(&self) -> &Arc<dyn SessionStore> {
        &self.sessions
    }

    /// Create the account and log it in straight away.
    pub async fn register(&self, username: &str, password: &str) -> Result<(User, Session), AuthError> {
        if self.storage.get_user_by_username(username).await.is_some() {
            return Err(AuthError::UsernameTaken(username.to_string()));
        }

        let password_hash = hash_password_async(password.to_string()).await?;
        let user = self
            .storage
            .create_user(NewUser {
                username: username.to_string(),
                password_hash,
            })
            .await
            .map_err(|e| match e {
                StorageError::DuplicateUsername(name) => AuthError::UsernameTaken(name),
                other => AuthError::Storage(other),
            })?;

        info!("registered user {} ({})", user.id, user.username);
        let session = self.sessions.create(user.id);
        Ok((user, session))
    }

    /// Unknown usernames and wrong passwords fail the same way.
    pub async fn verify(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let user = match self.storage.get_user_by_username(username).await {
            Some(user) => user,
            None => {
                debug!("login attempt for unknown user {}", username);
                return Err(AuthError::InvalidCredentials);
            }
        };

        verify_password_async(password.to_string(), user.password.clone()).await?;
        Ok(user)
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<(User, Session), AuthError> {
        let user = self.verify(username, password).await?;
        let session = self.sessions.create(user.id);
        info!("user {} logged in", user.id);
        Ok((user, session))
    }

    pub async fn current_user(&self, session_id: &str) -> Option<User> {
        let user_id = self.sessions.resolve(session_id)?;
        self.storage.get_user(user_id).await
    }

    pub fn logout(&self, session_id: &str) {
        self.sessions.destroy(session_id);
    }
}
