use actix_web::{HttpResponse, delete, get, post, web};
use log::info;

use crate::AppState;
use crate::dtos::comment_dtos::CreateCommentDTO;
use crate::error::ApiError;
use crate::middleware::auth_extractor::AuthenticatedUser;

/// GET /api/posts/{id}/comments
/// Oldest first; an unknown post simply has no comments.
#[get("/posts/{id}/comments")]
pub async fn list_comments(state: web::Data<AppState>, path: web::Path<i64>) -> HttpResponse {
    HttpResponse::Ok().json(state.storage.get_comments(path.into_inner()).await)
}

/// POST /api/posts/{id}/comments
#[post("/posts/{id}/comments")]
pub async fn create_comment(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<i64>,
    body: web::Json<CreateCommentDTO>,
) -> Result<HttpResponse, ApiError> {
    let new_comment = body
        .into_inner()
        .into_new_comment(path.into_inner(), auth.user.id)
        .map_err(ApiError::Validation)?;

    let comment = state.storage.create_comment(new_comment).await?;
    info!(
        "user {} commented on post {} (comment {})",
        auth.user.id, comment.post_id, comment.id
    );
    Ok(HttpResponse::Created().json(comment))
}

/// DELETE /api/comments/{id}
// TODO: enforce comment ownership; any logged-in user can currently delete any comment.
#[delete("/comments/{id}")]
pub async fn delete_comment(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<i64>,
) -> HttpResponse {
    let comment_id = path.into_inner();
    state.storage.delete_comment(comment_id).await;
    info!("user {} deleted comment {}", auth.user.id, comment_id);
    HttpResponse::NoContent().finish()
}
