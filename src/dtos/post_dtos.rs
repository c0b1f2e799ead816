use serde::Deserialize;

use super::{double_option, normalize_url, require_text};
use crate::models::{NewPost, PostPatch};

const MAX_TITLE_CHARS: usize = 200;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostDTO {
    pub title: String,
    /// HTML from the rich-text editor, stored as-is.
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostDTO {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub image_url: Option<Option<String>>,
}

impl CreatePostDTO {
    pub fn into_new_post(self, author_id: i64) -> Result<NewPost, String> {
        require_text("title", &self.title, Some(MAX_TITLE_CHARS))?;
        require_text("content", &self.content, None)?;
        let image_url = normalize_url("imageUrl", self.image_url)?;

        Ok(NewPost {
            title: self.title.trim().to_string(),
            content: self.content,
            image_url,
            author_id,
        })
    }
}

impl UpdatePostDTO {
    pub fn into_patch(self) -> Result<PostPatch, String> {
        if let Some(title) = &self.title {
            require_text("title", title, Some(MAX_TITLE_CHARS))?;
        }
        if let Some(content) = &self.content {
            require_text("content", content, None)?;
        }
        let image_url = match self.image_url {
            Some(url) => Some(normalize_url("imageUrl", url)?),
            None => None,
        };

        Ok(PostPatch {
            title: self.title.map(|t| t.trim().to_string()),
            content: self.content,
            image_url,
        })
    }
}
