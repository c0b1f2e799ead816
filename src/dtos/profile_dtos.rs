use serde::Deserialize;

use super::{double_option, normalize_url};
use crate::models::UserPatch;

const MAX_BIO_CHARS: usize = 1000;

/// Only bio and avatar are editable; anything else in the body is dropped.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileDTO {
    #[serde(default, deserialize_with = "double_option")]
    pub bio: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub avatar_url: Option<Option<String>>,
}

impl UpdateProfileDTO {
    pub fn into_patch(self) -> Result<UserPatch, String> {
        let bio = match self.bio {
            Some(Some(bio)) if bio.chars().count() > MAX_BIO_CHARS => {
                return Err(format!("Bio must be at most {} characters", MAX_BIO_CHARS));
            }
            Some(Some(bio)) if bio.trim().is_empty() => Some(None),
            other => other,
        };
        let avatar_url = match self.avatar_url {
            Some(url) => Some(normalize_url("avatarUrl", url)?),
            None => None,
        };

        Ok(UserPatch { bio, avatar_url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bio_only_leaves_avatar_untouched() {
        let dto: UpdateProfileDTO = serde_json::from_value(json!({"bio": "hello"})).unwrap();
        let patch = dto.into_patch().unwrap();
        assert_eq!(patch.bio, Some(Some("hello".to_string())));
        assert!(patch.avatar_url.is_none());
    }

    #[test]
    fn empty_strings_clear_fields() {
        let dto: UpdateProfileDTO =
            serde_json::from_value(json!({"bio": "", "avatarUrl": ""})).unwrap();
        let patch = dto.into_patch().unwrap();
        assert_eq!(patch.bio, Some(None));
        assert_eq!(patch.avatar_url, Some(None));
    }

    #[test]
    fn rejects_non_http_avatar() {
        let dto: UpdateProfileDTO =
            serde_json::from_value(json!({"avatarUrl": "ftp://files/me.png"})).unwrap();
        assert!(dto.into_patch().is_err());
    }

    #[test]
    fn rejects_long_bio() {
        let dto: UpdateProfileDTO =
            serde_json::from_value(json!({"bio": "x".repeat(1001)})).unwrap();
        assert_eq!(
            dto.into_patch().unwrap_err(),
            "Bio must be at most 1000 characters"
        );

        let at_limit: UpdateProfileDTO =
            serde_json::from_value(json!({"bio": "x".repeat(1000)})).unwrap();
        assert!(at_limit.into_patch().is_ok());
    }
}
