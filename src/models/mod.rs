pub mod comment;
pub mod post;
pub mod user;

pub use comment::{Comment, NewComment};
pub use post::{NewPost, Post, PostPatch};
pub use user::{NewUser, User, UserPatch};
