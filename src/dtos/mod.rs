pub mod auth_dtos;
pub mod comment_dtos;
pub mod post_dtos;
pub mod profile_dtos;
// alias supaya dapat dipanggil sebagai `crate::dtos::auth`
pub use auth_dtos as auth;

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer};

static HTTP_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://\S+$").expect("url pattern compiles"));

/// Lets a patch tell "field absent" (`None`) apart from "field set to null" (`Some(None)`).
/// Use together with `#[serde(default)]`.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Empty or blank means "no URL"; anything else has to be an http(s) URL.
pub(crate) fn normalize_url(field: &str, value: Option<String>) -> Result<Option<String>, String> {
    match value.map(|v| v.trim().to_string()) {
        None => Ok(None),
        Some(v) if v.is_empty() => Ok(None),
        Some(v) if HTTP_URL.is_match(&v) => Ok(Some(v)),
        Some(_) => Err(format!("{} must be an http(s) URL", field)),
    }
}

pub(crate) fn require_text(field: &str, value: &str, max_chars: Option<usize>) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} is required", field));
    }
    if let Some(max) = max_chars {
        if value.chars().count() > max {
            return Err(format!("{} must be at most {} characters", field, max));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_normalization() {
        assert_eq!(normalize_url("imageUrl", None), Ok(None));
        assert_eq!(normalize_url("imageUrl", Some("   ".into())), Ok(None));
        assert_eq!(
            normalize_url("imageUrl", Some(" https://img.example/x.png ".into())),
            Ok(Some("https://img.example/x.png".into()))
        );
        assert!(normalize_url("imageUrl", Some("javascript:alert(1)".into())).is_err());
        assert!(normalize_url("imageUrl", Some("http://has space".into())).is_err());
    }

    #[test]
    fn text_requirements() {
        assert!(require_text("title", "Hi", Some(200)).is_ok());
        assert_eq!(require_text("title", "  ", None), Err("title is required".into()));
        assert!(require_text("title", &"x".repeat(201), Some(200)).is_err());
    }
}
