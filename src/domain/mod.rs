//! Domain primitives shared by services and the web layer.

pub mod slug;

pub use slug::slugify;

use crate::models::user::User;

/// The authenticated user on whose behalf a service call runs.
///
/// Built once per request from the session and passed explicitly into every
/// service operation that needs to know who is acting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: i32,
    pub email: String,
}

impl From<User> for Actor {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
        }
    }
}
