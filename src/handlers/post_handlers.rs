// src/handlers/post_handlers.rs - blog post CRUD

use actix_web::{HttpResponse, delete, get, patch, post, web};
use log::{info, warn};

use crate::AppState;
use crate::dtos::post_dtos::{CreatePostDTO, UpdatePostDTO};
use crate::error::ApiError;
use crate::middleware::auth_extractor::AuthenticatedUser;
use crate::models::Post;

async fn load_owned_post(
    state: &AppState,
    auth: &AuthenticatedUser,
    post_id: i64,
) -> Result<Post, ApiError> {
    let post = state
        .storage
        .get_post(post_id)
        .await
        .ok_or(ApiError::NotFound("post"))?;

    if post.author_id != auth.user.id {
        warn!(
            "user {} tried to modify post {} owned by {}",
            auth.user.id, post.id, post.author_id
        );
        return Err(ApiError::Forbidden);
    }
    Ok(post)
}

/// POST /api/posts
#[post("/posts")]
pub async fn create_post(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    body: web::Json<CreatePostDTO>,
) -> Result<HttpResponse, ApiError> {
    let new_post = body
        .into_inner()
        .into_new_post(auth.user.id)
        .map_err(ApiError::Validation)?;

    let post = state.storage.create_post(new_post).await?;
    info!("user {} created post {}", auth.user.id, post.id);
    Ok(HttpResponse::Created().json(post))
}

/// GET /api/posts
/// Newest first.
#[get("/posts")]
pub async fn list_posts(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.storage.get_posts().await)
}

/// GET /api/posts/{id}
#[get("/posts/{id}")]
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let post = state
        .storage
        .get_post(path.into_inner())
        .await
        .ok_or(ApiError::NotFound("post"))?;
    Ok(HttpResponse::Ok().json(post))
}

/// PATCH /api/posts/{id}
/// Author only.
#[patch("/posts/{id}")]
pub async fn update_post(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<i64>,
    body: web::Json<UpdatePostDTO>,
) -> Result<HttpResponse, ApiError> {
    let post = load_owned_post(&state, &auth, path.into_inner()).await?;
    let patch = body.into_inner().into_patch().map_err(ApiError::Validation)?;

    let updated = state.storage.update_post(post.id, patch).await?;
    info!("user {} updated post {}", auth.user.id, updated.id);
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/posts/{id}
/// Author only; takes the post's comments with it.
#[delete("/posts/{id}")]
pub async fn delete_post(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let post = load_owned_post(&state, &auth, path.into_inner()).await?;

    state.storage.delete_post(post.id).await;
    info!("user {} deleted post {}", auth.user.id, post.id);
    Ok(HttpResponse::NoContent().finish())
}
