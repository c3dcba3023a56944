use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{AuthUser, Credentials, NewUser};
use super::errors::AuthError;

/// Repository abstraction for auth-related persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_credentials_by_username(&self, username: &str) -> Result<Option<Credentials>, AuthError>;
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AuthError>;
    /// Insert a user; a taken username yields `AuthError::Conflict`.
    async fn create_user(&self, user: NewUser) -> Result<AuthUser, AuthError>;
}
