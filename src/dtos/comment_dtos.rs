use serde::Deserialize;

use super::require_text;
use crate::models::NewComment;

/// The target post always comes from the URL; a `postId` in the body is ignored.
#[derive(Debug, Deserialize)]
pub struct CreateCommentDTO {
    pub content: String,
}

impl CreateCommentDTO {
    pub fn into_new_comment(self, post_id: i64, author_id: i64) -> Result<NewComment, String> {
        require_text("content", &self.content, None)?;
        Ok(NewComment {
            content: self.content.trim().to_string(),
            post_id,
            author_id,
        })
    }
}
