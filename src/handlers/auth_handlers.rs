use actix_web::{HttpRequest, HttpResponse, cookie::Cookie, get, post, web};
use log::debug;
use serde::Serialize;

use crate::AppState;
use crate::dtos::auth::{LoginIn, RegisterIn};
use crate::error::ApiError;
use crate::middleware::auth_extractor::{AuthenticatedUser, session_ids_from_request};
use crate::services::auth_services::AuthService;
use crate::services::session_store::Session;

/// Echoes the session id for clients that do not keep cookies.
pub const SESSION_HEADER: &str = "X-Session-Id";

#[derive(Serialize)]
struct StatusResponse {
    status: &'static str,
    message: &'static str,
}

fn session_cookie(svc: &AuthService, session: &Session) -> Cookie<'static> {
    Cookie::build(svc.cookie_name.clone(), session.id.clone())
        .path("/")
        .http_only(true)
        .same_site(actix_web::cookie::SameSite::Lax)
        .secure(svc.cookie_secure)
        .max_age(actix_web::cookie::time::Duration::seconds(
            svc.sessions().ttl().num_seconds(),
        ))
        .finish()
}

/// POST /api/register
/// Creates the account and logs it in.
#[post("/register")]
pub async fn register(
    svc: web::Data<AuthService>,
    body: web::Json<RegisterIn>,
) -> Result<HttpResponse, ApiError> {
    body.validate().map_err(ApiError::Validation)?;

    let (user, session) = svc.register(body.username(), &body.password).await?;

    Ok(HttpResponse::Created()
        .cookie(session_cookie(&svc, &session))
        .insert_header((SESSION_HEADER, session.id))
        .json(user))
}

/// POST /api/login
#[post("/login")]
pub async fn login(
    svc: web::Data<AuthService>,
    body: web::Json<LoginIn>,
) -> Result<HttpResponse, ApiError> {
    body.validate().map_err(ApiError::Validation)?;

    let (user, session) = svc.login(body.username(), &body.password).await?;

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(&svc, &session))
        .insert_header((SESSION_HEADER, session.id))
        .json(user))
}

/// POST /api/logout
/// Always succeeds; ends every session the request carried.
#[post("/logout")]
pub async fn logout(req: HttpRequest, svc: web::Data<AuthService>) -> HttpResponse {
    for session_id in session_ids_from_request(&req, &svc.cookie_name) {
        svc.logout(&session_id);
        debug!("session ended");
    }

    let mut removal = Cookie::build(svc.cookie_name.clone(), "").path("/").finish();
    removal.make_removal();

    HttpResponse::Ok().cookie(removal).json(StatusResponse {
        status: "success",
        message: "Logged out",
    })
}

/// GET /api/user
/// The logged-in user.
#[get("/user")]
pub async fn current_user(auth: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(auth.user)
}

/// GET /api/users/{id}
/// Public author lookup used to render post and comment bylines.
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let user = state
        .storage
        .get_user(path.into_inner())
        .await
        .ok_or(ApiError::NotFound("user"))?;
    Ok(HttpResponse::Ok().json(user))
}
