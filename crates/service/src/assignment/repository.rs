use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder};
use uuid::Uuid;

use models::{assignment, user};

use crate::auth::domain::AuthUser;
use crate::errors::ServiceError;

#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    async fn insert(&self, author_id: Uuid, new: assignment::NewAssignment) -> Result<assignment::Model, ServiceError>;
    async fn find(&self, id: Uuid) -> Result<Option<assignment::Model>, ServiceError>;
    async fn save(&self, a: assignment::Model) -> Result<assignment::Model, ServiceError>;
    /// Non-deleted assignments of a classroom, newest first, with their authors.
    async fn list_for_class(&self, class_id: &str) -> Result<Vec<(assignment::Model, Option<AuthUser>)>, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmAssignmentRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl AssignmentRepository for SeaOrmAssignmentRepository {
    async fn insert(&self, author_id: Uuid, new: assignment::NewAssignment) -> Result<assignment::Model, ServiceError> {
        Ok(assignment::create(&self.db, author_id, new).await?)
    }

    async fn find(&self, id: Uuid) -> Result<Option<assignment::Model>, ServiceError> {
        Ok(assignment::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn save(&self, a: assignment::Model) -> Result<assignment::Model, ServiceError> {
        Ok(a.into_active_model().reset_all().update(&self.db).await?)
    }

    async fn list_for_class(&self, class_id: &str) -> Result<Vec<(assignment::Model, Option<AuthUser>)>, ServiceError> {
        let rows = assignment::Entity::find()
            .filter(assignment::Column::ClassId.eq(class_id))
            .filter(assignment::Column::IsDeleted.eq(false))
            .order_by_desc(assignment::Column::CreatedAt)
            .find_also_related(user::Entity)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(|(a, u)| (a, u.map(AuthUser::from))).collect())
    }
}
