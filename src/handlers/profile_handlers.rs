// src/handlers/profile_handlers.rs
use actix_web::{HttpResponse, get, patch, web};
use log::info;

use crate::AppState;
use crate::dtos::profile_dtos::UpdateProfileDTO;
use crate::error::ApiError;
use crate::middleware::auth_extractor::AuthenticatedUser;

/// GET /api/profile
#[get("/profile")]
pub async fn get_profile(auth: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(auth.user)
}

/// PATCH /api/profile
/// Merges bio/avatarUrl; fields missing from the body keep their value.
#[patch("/profile")]
pub async fn update_profile(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    body: web::Json<UpdateProfileDTO>,
) -> Result<HttpResponse, ApiError> {
    let patch = body.into_inner().into_patch().map_err(ApiError::Validation)?;

    let user = state.storage.update_user(auth.user.id, patch).await?;
    info!("user {} updated profile", user.id);
    Ok(HttpResponse::Ok().json(user))
}
