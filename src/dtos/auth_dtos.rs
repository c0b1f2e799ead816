use serde::Deserialize;

use super::require_text;

const MAX_USERNAME_CHARS: usize = 64;
const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Deserialize)]
pub struct RegisterIn {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginIn {
    pub username: String,
    pub password: String,
}

impl RegisterIn {
    pub fn validate(&self) -> Result<(), String> {
        require_text("username", &self.username, Some(MAX_USERNAME_CHARS))?;
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(format!(
                "Password must be at least {} characters long",
                MIN_PASSWORD_LEN
            ));
        }
        Ok(())
    }

    pub fn username(&self) -> &str {
        self.username.trim()
    }
}

impl LoginIn {
    pub fn validate(&self) -> Result<(), String> {
        require_text("username", &self.username, Some(MAX_USERNAME_CHARS))?;
        if self.password.is_empty() {
            return Err("password is required".to_string());
        }
        Ok(())
    }

    pub fn username(&self) -> &str {
        self.username.trim()
    }
}
