// src/repositories/mem_storage.rs - in-memory implementation of `Storage`

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;

use super::{Storage, StorageError};
use crate::models::{Comment, NewComment, NewPost, NewUser, Post, PostPatch, User, UserPatch};

#[derive(Default)]
struct Tables {
    users: HashMap<i64, User>,
    posts: HashMap<i64, Post>,
    comments: HashMap<i64, Comment>,
    next_ids: NextIds,
}

struct NextIds {
    user: i64,
    post: i64,
    comment: i64,
}

impl Default for NextIds {
    fn default() -> Self {
        Self { user: 1, post: 1, comment: 1 }
    }
}

fn bump(counter: &mut i64) -> i64 {
    let id = *counter;
    *counter += 1;
    id
}

/// All tables sit behind one lock so multi-table operations (post deletion cascading
/// into comments) are applied in a single step.
#[derive(Default)]
pub struct MemStorage {
    tables: RwLock<Tables>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }

    // Poisoning is ignored: every mutation below is a single insert/remove/retain.
    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Storage for MemStorage {
    async fn get_user(&self, id: i64) -> Option<User> {
        self.read().users.get(&id).cloned()
    }

    async fn get_user_by_username(&self, username: &str) -> Option<User> {
        self.read()
            .users
            .values()
            .find(|u| u.username == username)
            .cloned()
    }

    async fn create_user(&self, user: NewUser) -> Result<User, StorageError> {
        let mut tables = self.write();
        if tables.users.values().any(|u| u.username == user.username) {
            return Err(StorageError::DuplicateUsername(user.username));
        }

        let id = bump(&mut tables.next_ids.user);
        let created = User {
            id,
            username: user.username,
            password: user.password_hash,
            bio: None,
            avatar_url: None,
        };
        tables.users.insert(id, created.clone());
        Ok(created)
    }

    async fn update_user(&self, id: i64, patch: UserPatch) -> Result<User, StorageError> {
        let mut tables = self.write();
        let user = tables
            .users
            .get_mut(&id)
            .ok_or(StorageError::NotFound { entity: "user", id })?;
        user.apply(patch);
        Ok(user.clone())
    }

    async fn create_post(&self, post: NewPost) -> Result<Post, StorageError> {
        let mut tables = self.write();
        if !tables.users.contains_key(&post.author_id) {
            return Err(StorageError::NotFound { entity: "user", id: post.author_id });
        }

        let id = bump(&mut tables.next_ids.post);
        let created = Post {
            id,
            title: post.title,
            content: post.content,
            image_url: post.image_url,
            author_id: post.author_id,
            created_at: Utc::now(),
        };
        tables.posts.insert(id, created.clone());
        Ok(created)
    }

    async fn get_post(&self, id: i64) -> Option<Post> {
        self.read().posts.get(&id).cloned()
    }

    async fn get_posts(&self) -> Vec<Post> {
        let mut posts: Vec<Post> = self.read().posts.values().cloned().collect();
        posts.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        posts
    }

    async fn update_post(&self, id: i64, patch: PostPatch) -> Result<Post, StorageError> {
        let mut tables = self.write();
        let post = tables
            .posts
            .get_mut(&id)
            .ok_or(StorageError::NotFound { entity: "post", id })?;
        post.apply(patch);
        Ok(post.clone())
    }

    async fn delete_post(&self, id: i64) {
        let mut tables = self.write();
        tables.posts.remove(&id);
        tables.comments.retain(|_, c| c.post_id != id);
    }

    async fn create_comment(&self, comment: NewComment) -> Result<Comment, StorageError> {
        let mut tables = self.write();
        if !tables.posts.contains_key(&comment.post_id) {
            return Err(StorageError::NotFound { entity: "post", id: comment.post_id });
        }
        if !tables.users.contains_key(&comment.author_id) {
            return Err(StorageError::NotFound { entity: "user", id: comment.author_id });
        }

        let id = bump(&mut tables.next_ids.comment);
        let created = Comment {
            id,
            content: comment.content,
            post_id: comment.post_id,
            author_id: comment.author_id,
            created_at: Utc::now(),
        };
        tables.comments.insert(id, created.clone());
        Ok(created)
    }

    async fn get_comments(&self, post_id: i64) -> Vec<Comment> {
        let mut comments: Vec<Comment> = self
            .read()
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        comments
    }

    async fn delete_comment(&self, id: i64) {
        self.write().comments.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn user(store: &MemStorage, name: &str) -> User {
        store
            .create_user(NewUser {
                username: name.into(),
                password_hash: "hash".into(),
            })
            .await
            .unwrap()
    }

    async fn post(store: &MemStorage, author_id: i64, title: &str) -> Post {
        store
            .create_post(NewPost {
                title: title.into(),
                content: "<p>body</p>".into(),
                image_url: None,
                author_id,
            })
            .await
            .unwrap()
    }

    async fn comment(store: &MemStorage, post_id: i64, author_id: i64, content: &str) -> Comment {
        store
            .create_comment(NewComment {
                content: content.into(),
                post_id,
                author_id,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn ids_are_monotonic_per_entity() {
        let store = MemStorage::new();
        let alice = user(&store, "alice").await;
        let bob = user(&store, "bob").await;
        assert_eq!((alice.id, bob.id), (1, 2));

        let p1 = post(&store, alice.id, "one").await;
        let p2 = post(&store, alice.id, "two").await;
        assert_eq!((p1.id, p2.id), (1, 2));

        let c1 = comment(&store, p1.id, bob.id, "nice").await;
        assert_eq!(c1.id, 1);
        assert_eq!(c1.post_id, 1);
    }

    #[tokio::test]
    async fn new_users_start_with_empty_profile() {
        let store = MemStorage::new();
        let alice = user(&store, "alice").await;
        assert!(alice.bio.is_none());
        assert!(alice.avatar_url.is_none());
        assert_eq!(store.get_user_by_username("alice").await.unwrap().id, alice.id);
        assert!(store.get_user_by_username("Alice").await.is_none());
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let store = MemStorage::new();
        user(&store, "alice").await;
        let err = store
            .create_user(NewUser {
                username: "alice".into(),
                password_hash: "other".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::DuplicateUsername(name) if name == "alice"));
    }

    #[tokio::test]
    async fn update_user_merges_fields() {
        let store = MemStorage::new();
        let alice = user(&store, "alice").await;
        store
            .update_user(
                alice.id,
                UserPatch {
                    bio: None,
                    avatar_url: Some(Some("https://img.example/a.png".into())),
                },
            )
            .await
            .unwrap();
        let updated = store
            .update_user(
                alice.id,
                UserPatch {
                    bio: Some(Some("writer".into())),
                    avatar_url: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.bio.as_deref(), Some("writer"));
        assert_eq!(updated.avatar_url.as_deref(), Some("https://img.example/a.png"));
        assert_eq!(updated.username, "alice");
    }

    #[tokio::test]
    async fn update_missing_user_fails() {
        let store = MemStorage::new();
        let err = store.update_user(42, UserPatch::default()).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound { entity: "user", id: 42 }));
    }

    #[tokio::test]
    async fn posts_are_listed_newest_first() {
        let store = MemStorage::new();
        let alice = user(&store, "alice").await;
        for title in ["a", "b", "c", "d"] {
            post(&store, alice.id, title).await;
        }

        let titles: Vec<String> = store.get_posts().await.into_iter().map(|p| p.title).collect();
        assert_eq!(titles, vec!["d", "c", "b", "a"]);
    }

    #[tokio::test]
    async fn post_requires_existing_author() {
        let store = MemStorage::new();
        let err = store
            .create_post(NewPost {
                title: "t".into(),
                content: "c".into(),
                image_url: None,
                author_id: 7,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound { entity: "user", id: 7 }));
        assert!(store.get_posts().await.is_empty());
    }

    #[tokio::test]
    async fn update_post_keeps_identity_fields() {
        let store = MemStorage::new();
        let alice = user(&store, "alice").await;
        let original = post(&store, alice.id, "draft").await;

        let updated = store
            .update_post(
                original.id,
                PostPatch {
                    title: Some("final".into()),
                    content: None,
                    image_url: Some(Some("https://img.example/p.png".into())),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "final");
        assert_eq!(updated.content, original.content);
        assert_eq!(updated.author_id, original.author_id);
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.image_url.as_deref(), Some("https://img.example/p.png"));
    }

    #[tokio::test]
    async fn delete_post_cascades_to_comments() {
        let store = MemStorage::new();
        let alice = user(&store, "alice").await;
        let bob = user(&store, "bob").await;
        let doomed = post(&store, alice.id, "doomed").await;
        let kept = post(&store, alice.id, "kept").await;
        comment(&store, doomed.id, bob.id, "first").await;
        comment(&store, doomed.id, alice.id, "second").await;
        let survivor = comment(&store, kept.id, bob.id, "stays").await;

        store.delete_post(doomed.id).await;

        assert!(store.get_post(doomed.id).await.is_none());
        assert!(store.get_comments(doomed.id).await.is_empty());
        let remaining = store.get_comments(kept.id).await;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, survivor.id);
    }

    #[tokio::test]
    async fn comments_are_listed_oldest_first_per_post() {
        let store = MemStorage::new();
        let alice = user(&store, "alice").await;
        let p1 = post(&store, alice.id, "one").await;
        let p2 = post(&store, alice.id, "two").await;
        comment(&store, p1.id, alice.id, "a").await;
        comment(&store, p2.id, alice.id, "elsewhere").await;
        comment(&store, p1.id, alice.id, "b").await;
        comment(&store, p1.id, alice.id, "c").await;

        let contents: Vec<String> = store
            .get_comments(p1.id)
            .await
            .into_iter()
            .map(|c| c.content)
            .collect();
        assert_eq!(contents, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn comment_on_missing_post_fails() {
        let store = MemStorage::new();
        let alice = user(&store, "alice").await;
        let err = store
            .create_comment(NewComment {
                content: "hello?".into(),
                post_id: 3,
                author_id: alice.id,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound { entity: "post", id: 3 }));
    }

    #[tokio::test]
    async fn delete_comment_is_unconditional() {
        let store = MemStorage::new();
        let alice = user(&store, "alice").await;
        let p = post(&store, alice.id, "one").await;
        let c = comment(&store, p.id, alice.id, "bye").await;

        store.delete_comment(c.id).await;
        store.delete_comment(c.id).await;
        store.delete_comment(999).await;

        assert!(store.get_comments(p.id).await.is_empty());
    }
}
