use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, LoaderTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use models::classroom_collaborator::Role;
use models::{classroom, classroom_collaborator, user};

use crate::auth::domain::AuthUser;
use crate::classroom::domain::NewClassroom;
use crate::classroom::repository::ClassroomRepository;
use crate::errors::ServiceError;

pub struct SeaOrmClassroomRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl ClassroomRepository for SeaOrmClassroomRepository {
    async fn find_classroom(&self, class_id: &str) -> Result<Option<classroom::Model>, ServiceError> {
        Ok(classroom::Entity::find_by_id(class_id.to_string()).one(&self.db).await?)
    }

    async fn create_with_owner(&self, new: NewClassroom) -> Result<classroom::Model, ServiceError> {
        let txn = self.db.begin().await?;
        let created = classroom::create(&txn, &new.class_id, &new.class_name, new.description, new.shared, new.owner_id).await?;
        classroom_collaborator::create(&txn, new.owner_id, &new.class_id, Role::Teacher).await?;
        txn.commit().await?;
        Ok(created)
    }

    async fn save_classroom(&self, class: classroom::Model) -> Result<classroom::Model, ServiceError> {
        let am = class.into_active_model().reset_all();
        Ok(am.update(&self.db).await?)
    }

    async fn list_owned(&self, owner_id: Uuid) -> Result<Vec<classroom::Model>, ServiceError> {
        Ok(classroom::Entity::find()
            .filter(classroom::Column::OwnerId.eq(owner_id))
            .filter(classroom::Column::IsDeleted.eq(false))
            .order_by_asc(classroom::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    async fn list_memberships(&self, user_id: Uuid) -> Result<Vec<(classroom_collaborator::Model, classroom::Model)>, ServiceError> {
        let rows = classroom_collaborator::Entity::find()
            .filter(classroom_collaborator::Column::UserId.eq(user_id))
            .filter(classroom_collaborator::Column::IsRemoved.eq(false))
            .order_by_asc(classroom_collaborator::Column::JoinedAt)
            .find_also_related(classroom::Entity)
            .all(&self.db)
            .await?;
        Ok(rows
            .into_iter()
            .filter_map(|(m, c)| c.filter(|c| !c.is_deleted).map(|c| (m, c)))
            .collect())
    }

    async fn list_members(&self, class_id: &str) -> Result<Vec<(classroom_collaborator::Model, Option<AuthUser>)>, ServiceError> {
        let members = classroom_collaborator::Entity::find()
            .filter(classroom_collaborator::Column::ClassId.eq(class_id))
            .filter(classroom_collaborator::Column::IsRemoved.eq(false))
            .order_by_asc(classroom_collaborator::Column::JoinedAt)
            .all(&self.db)
            .await?;
        let users = members.load_one(user::Entity, &self.db).await?;
        Ok(members
            .into_iter()
            .zip(users)
            .map(|(m, u)| (m, u.map(AuthUser::from)))
            .collect())
    }

    async fn find_membership(&self, user_id: Uuid, class_id: &str) -> Result<Option<classroom_collaborator::Model>, ServiceError> {
        Ok(classroom_collaborator::Entity::find_by_id((user_id, class_id.to_string()))
            .one(&self.db)
            .await?)
    }

    async fn insert_membership(&self, membership: classroom_collaborator::Model) -> Result<classroom_collaborator::Model, ServiceError> {
        let created = classroom_collaborator::create(&self.db, membership.user_id, &membership.class_id, membership.role).await?;
        Ok(created)
    }

    async fn save_membership(&self, membership: classroom_collaborator::Model) -> Result<classroom_collaborator::Model, ServiceError> {
        let am = membership.into_active_model().reset_all();
        Ok(am.update(&self.db).await?)
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<AuthUser>, ServiceError> {
        Ok(user::Entity::find_by_id(id).one(&self.db).await?.map(AuthUser::from))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::assignment::{domain::CreateAssignmentInput, repository::SeaOrmAssignmentRepository, AssignmentService};
    use crate::auth::{domain::RegisterInput, repo::seaorm::SeaOrmAuthRepository, AuthService};
    use crate::classroom::domain::{CreateClassroomInput, JoinClassroomInput};
    use crate::classroom::ClassroomService;
    use crate::profile_picture::NoPictures;
    use crate::test_support::{get_db, unique_username};

    #[tokio::test]
    async fn classroom_flow_against_postgres() -> anyhow::Result<()> {
        let Some(db) = get_db().await else { return Ok(()) };

        let auth = AuthService::new(Arc::new(SeaOrmAuthRepository { db: db.clone() }), Arc::new(NoPictures));
        let owner = auth
            .register(RegisterInput { username: unique_username("pg_owner"), name: "Owner".into(), password: "pw".into() })
            .await?
            .user;
        let student = auth
            .register(RegisterInput { username: unique_username("pg_student"), name: "Student".into(), password: "pw".into() })
            .await?
            .user;

        let classroom_repo = Arc::new(SeaOrmClassroomRepository { db: db.clone() });
        let classrooms = ClassroomService::new(classroom_repo.clone());
        let class = classrooms
            .create(owner.id, CreateClassroomInput { class_name: "PG Class".into(), description: None, shared: false })
            .await?;

        classrooms.join(student.id, JoinClassroomInput { class_id: class.class_id.clone(), role: None }).await?;
        classrooms.exit(student.id, &class.class_id, student.id).await?;
        let back = classrooms
            .join(student.id, JoinClassroomInput { class_id: class.class_id.clone(), role: Some("teacher".into()) })
            .await?;
        assert_eq!(back.role, Role::Teacher);

        let members = classrooms.members(&class.class_id).await?;
        assert_eq!(members.teachers.len(), 2);
        assert!(members.teachers.iter().all(|m| m.user.is_some()));

        let assignments = AssignmentService::new(Arc::new(SeaOrmAssignmentRepository { db: db.clone() }), classroom_repo);
        assignments
            .create(
                student.id,
                CreateAssignmentInput {
                    title: "Lab report".into(),
                    kind: None,
                    description: None,
                    link: None,
                    class_id: class.class_id.clone(),
                },
            )
            .await?;
        let listed = assignments.list(&class.class_id).await?;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].created_by.as_ref().map(|u| u.id), Some(student.id));

        // Cascades remove the classroom, memberships and assignments
        user::Entity::delete_by_id(owner.id).exec(&db).await?;
        user::Entity::delete_by_id(student.id).exec(&db).await?;
        Ok(())
    }
}
