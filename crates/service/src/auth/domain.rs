use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registration input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterInput {
    pub username: String,
    pub name: String,
    pub password: String,
}

/// Login input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// Public view of a user. This is what other records embed as `owner`, `user`,
/// `author` or `created_by`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    #[serde(rename = "uuid")]
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub profile_picture: Option<String>,
}

impl From<models::user::Model> for AuthUser {
    fn from(m: models::user::Model) -> Self {
        Self { id: m.id, username: m.username, name: m.name, profile_picture: m.profile_picture }
    }
}

/// Stored user together with its password hash. Never serialized.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user: AuthUser,
    pub password_hash: String,
}

/// Data handed to the repository when creating a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub password_hash: String,
    pub profile_picture: Option<String>,
}

/// Register/login result. The token is the user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: AuthUser,
    pub token: String,
}

impl AuthSession {
    pub fn for_user(user: AuthUser) -> Self {
        let token = user.id.to_string();
        Self { user, token }
    }
}
