//! Classroom comment stream.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use models::{comment, user};

use crate::auth::domain::AuthUser;
use crate::classroom::repository::ClassroomRepository;
use crate::errors::ServiceError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddCommentInput {
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentDetail {
    #[serde(flatten)]
    pub comment: comment::Model,
    pub author: Option<AuthUser>,
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn insert(&self, author_id: Uuid, class_id: &str, content: &str) -> Result<comment::Model, ServiceError>;
    /// Oldest first.
    async fn list_for_class(&self, class_id: &str) -> Result<Vec<(comment::Model, Option<AuthUser>)>, ServiceError>;
}

pub struct SeaOrmCommentRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl CommentRepository for SeaOrmCommentRepository {
    async fn insert(&self, author_id: Uuid, class_id: &str, content: &str) -> Result<comment::Model, ServiceError> {
        Ok(comment::create(&self.db, author_id, class_id, content).await?)
    }

    async fn list_for_class(&self, class_id: &str) -> Result<Vec<(comment::Model, Option<AuthUser>)>, ServiceError> {
        let rows = comment::Entity::find()
            .filter(comment::Column::ClassId.eq(class_id))
            .order_by_asc(comment::Column::CreatedAt)
            .order_by_asc(comment::Column::Id)
            .find_also_related(user::Entity)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(|(c, u)| (c, u.map(AuthUser::from))).collect())
    }
}

pub struct CommentService<R: CommentRepository + ?Sized, C: ClassroomRepository + ?Sized> {
    repo: Arc<R>,
    classrooms: Arc<C>,
}

impl<R: CommentRepository + ?Sized, C: ClassroomRepository + ?Sized> CommentService<R, C> {
    pub fn new(repo: Arc<R>, classrooms: Arc<C>) -> Self { Self { repo, classrooms } }

    /// Post to a classroom. The owner and active members may comment.
    #[instrument(skip(self, input), fields(author_id = %author_id, class_id = %class_id))]
    pub async fn add(&self, author_id: Uuid, class_id: &str, input: AddCommentInput) -> Result<comment::Model, ServiceError> {
        comment::validate_content(&input.content)?;
        let class = self
            .classrooms
            .find_classroom(class_id)
            .await?
            .filter(|c| !c.is_deleted)
            .ok_or_else(|| ServiceError::not_found("classroom"))?;
        let allowed = class.owner_id == author_id
            || self
                .classrooms
                .find_membership(author_id, class_id)
                .await?
                .map(|m| !m.is_removed)
                .unwrap_or(false);
        if !allowed {
            return Err(ServiceError::forbidden());
        }
        let created = self.repo.insert(author_id, class_id, &input.content).await?;
        info!(comment_id = created.id, class_id = %class_id, "comment_added");
        Ok(created)
    }

    pub async fn list(&self, class_id: &str) -> Result<Vec<CommentDetail>, ServiceError> {
        self.classrooms
            .find_classroom(class_id)
            .await?
            .filter(|c| !c.is_deleted)
            .ok_or_else(|| ServiceError::not_found("classroom"))?;
        let rows = self.repo.list_for_class(class_id).await?;
        Ok(rows.into_iter().map(|(comment, author)| CommentDetail { comment, author }).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classroom::domain::{CreateClassroomInput, JoinClassroomInput};
    use crate::classroom::ClassroomService;
    use crate::mock::MockStore;

    #[tokio::test]
    async fn members_comment_and_read_in_order() {
        let store = Arc::new(MockStore::default());
        let owner = store.add_user("host", "Host");
        let student = store.add_user("pupil", "Pupil");
        let outsider = store.add_user("outsider", "Outsider");

        let classrooms = ClassroomService::new(store.clone());
        let class = classrooms
            .create(owner, CreateClassroomInput { class_name: "Poetry".into(), description: None, shared: true })
            .await
            .unwrap();
        classrooms
            .join(student, JoinClassroomInput { class_id: class.class_id.clone(), role: None })
            .await
            .unwrap();

        let svc = CommentService::new(store.clone(), store.clone());
        svc.add(owner, &class.class_id, AddCommentInput { content: "welcome".into() }).await.unwrap();
        svc.add(student, &class.class_id, AddCommentInput { content: "thanks".into() }).await.unwrap();

        let err = svc.add(outsider, &class.class_id, AddCommentInput { content: "hi".into() }).await.unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
        let empty = svc.add(owner, &class.class_id, AddCommentInput { content: " ".into() }).await;
        assert!(empty.is_err());

        let listed = svc.list(&class.class_id).await.unwrap();
        let texts: Vec<_> = listed.iter().map(|c| c.comment.content.as_str()).collect();
        assert_eq!(texts, vec!["welcome", "thanks"]);
        assert_eq!(listed[1].author.as_ref().map(|u| u.id), Some(student));

        assert!(matches!(svc.list("00000").await, Err(ServiceError::NotFound(_))));
    }
}
