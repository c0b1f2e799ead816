// src/middleware/auth_extractor.rs - resolve the logged-in user from the session id

use actix_web::{Error, FromRequest, HttpRequest, dev::Payload, http::header, web};
use futures::future::LocalBoxFuture;
use log::debug;

use crate::error::ApiError;
use crate::models::User;
use crate::services::auth_services::AuthService;

/// Hasil extractor - user yang sudah terautentikasi
pub struct AuthenticatedUser {
    pub user: User,
    pub session_id: String,
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<AuthenticatedUser, Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let svc = req.app_data::<web::Data<AuthService>>().cloned();
        let candidates = svc
            .as_ref()
            .map(|svc| session_ids_from_request(req, &svc.cookie_name))
            .unwrap_or_default();

        Box::pin(async move { authenticate(svc, candidates).await.map_err(Error::from) })
    }
}

/// The first candidate that resolves to a user wins, so a stale cookie does not mask a
/// valid bearer session.
async fn authenticate(
    svc: Option<web::Data<AuthService>>,
    candidates: Vec<String>,
) -> Result<AuthenticatedUser, ApiError> {
    let svc = svc.ok_or_else(|| ApiError::Internal("AuthService is not registered".into()))?;

    for session_id in candidates {
        if let Some(user) = svc.current_user(&session_id).await {
            return Ok(AuthenticatedUser { user, session_id });
        }
    }

    debug!("rejected request without a live session");
    Err(ApiError::Unauthorized)
}

/// Session ids carried by the request: the cookie first, then `Authorization: Bearer <id>`.
pub fn session_ids_from_request(req: &HttpRequest, cookie_name: &str) -> Vec<String> {
    let mut ids = Vec::with_capacity(2);

    if let Some(cookie) = req.cookie(cookie_name) {
        let value = cookie.value().trim();
        if !value.is_empty() {
            ids.push(value.to_string());
        }
    }

    let bearer = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());
    if let Some(token) = bearer {
        if !ids.iter().any(|id| id == token) {
            ids.push(token.to_string());
        }
    }

    ids
}
