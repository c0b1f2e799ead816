use serde::Serialize;

/// A registered account. `password` holds the argon2 PHC string and never leaves the server.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

/// Struct untuk membuat user baru (password sudah di-hash)
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}

/// Partial profile update. Outer `None` leaves the field alone, `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub bio: Option<Option<String>>,
    pub avatar_url: Option<Option<String>>,
}

impl User {
    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(bio) = patch.bio {
            self.bio = bio;
        }
        if let Some(avatar_url) = patch.avatar_url {
            self.avatar_url = avatar_url;
        }
    }
}
