use sea_orm::{DatabaseConnection, EntityTrait};
use uuid::Uuid;

use crate::auth::domain::{AuthUser, Credentials, NewUser};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_credentials_by_username(&self, username: &str) -> Result<Option<Credentials>, AuthError> {
        let res = models::user::find_by_username(&self.db, username).await?;
        Ok(res.map(|u| {
            let password_hash = u.password.clone();
            Credentials { user: u.into(), password_hash }
        }))
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AuthError> {
        let res = models::user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(AuthUser::from))
    }

    async fn create_user(&self, user: NewUser) -> Result<AuthUser, AuthError> {
        let created = models::user::create(&self.db, user.id, &user.username, &user.name, &user.password_hash, user.profile_picture).await?;
        Ok(created.into())
    }
}
