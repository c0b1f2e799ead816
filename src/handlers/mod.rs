pub mod auth_handlers;
pub mod comment_handlers;
pub mod post_handlers;
pub mod profile_handlers;

use actix_web::web;

use crate::error::ApiError;

/// Registers every `/api` route plus the JSON body error handler.
pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::Validation(format!("Invalid request body: {}", err)).into()
    });

    cfg.service(
        web::scope("/api")
            .app_data(json_config)
            .service(auth_handlers::register)          // POST /api/register
            .service(auth_handlers::login)             // POST /api/login
            .service(auth_handlers::logout)            // POST /api/logout
            .service(auth_handlers::current_user)      // GET /api/user
            .service(auth_handlers::get_user)          // GET /api/users/{id}
            .service(profile_handlers::get_profile)    // GET /api/profile
            .service(profile_handlers::update_profile) // PATCH /api/profile
            .service(post_handlers::create_post)       // POST /api/posts
            .service(post_handlers::list_posts)        // GET /api/posts
            .service(post_handlers::get_post)          // GET /api/posts/{id}
            .service(post_handlers::update_post)       // PATCH /api/posts/{id}
            .service(post_handlers::delete_post)       // DELETE /api/posts/{id}
            .service(comment_handlers::list_comments)  // GET /api/posts/{id}/comments
            .service(comment_handlers::create_comment) // POST /api/posts/{id}/comments
            .service(comment_handlers::delete_comment), // DELETE /api/comments/{id}
    );
}
