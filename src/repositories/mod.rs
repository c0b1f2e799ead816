pub mod mem_storage;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Comment, NewComment, NewPost, NewUser, Post, PostPatch, User, UserPatch};

pub use mem_storage::MemStorage;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },
    #[error("username already taken: {0}")]
    DuplicateUsername(String),
}

/// Data store contract for users, posts and comments.
///
/// Every method is async so a database-backed store can slot in behind the same
/// handlers; the in-memory implementation completes immediately.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn get_user(&self, id: i64) -> Option<User>;
    async fn get_user_by_username(&self, username: &str) -> Option<User>;
    async fn create_user(&self, user: NewUser) -> Result<User, StorageError>;
    async fn update_user(&self, id: i64, patch: UserPatch) -> Result<User, StorageError>;

    async fn create_post(&self, post: NewPost) -> Result<Post, StorageError>;
    async fn get_post(&self, id: i64) -> Option<Post>;
    /// Newest first.
    async fn get_posts(&self) -> Vec<Post>;
    async fn update_post(&self, id: i64, patch: PostPatch) -> Result<Post, StorageError>;
    /// Removes the post together with all of its comments.
    async fn delete_post(&self, id: i64);

    async fn create_comment(&self, comment: NewComment) -> Result<Comment, StorageError>;
    /// Oldest first.
    async fn get_comments(&self, post_id: i64) -> Vec<Comment>;
    async fn delete_comment(&self, id: i64);
}
