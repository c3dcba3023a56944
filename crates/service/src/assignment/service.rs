use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use models::assignment;
use models::classroom_collaborator::Role;

use super::domain::{AssignmentDetail, AssignmentPatch, CreateAssignmentInput};
use super::repository::AssignmentRepository;
use crate::classroom::repository::ClassroomRepository;
use crate::errors::ServiceError;

/// Application service for assignments. Reads classrooms and memberships
/// through the classroom repository for its permission checks.
pub struct AssignmentService<R: AssignmentRepository + ?Sized, C: ClassroomRepository + ?Sized> {
    repo: Arc<R>,
    classrooms: Arc<C>,
}

impl<R: AssignmentRepository + ?Sized, C: ClassroomRepository + ?Sized> AssignmentService<R, C> {
    pub fn new(repo: Arc<R>, classrooms: Arc<C>) -> Self { Self { repo, classrooms } }

    /// Only active teachers of a live classroom may post.
    #[instrument(skip(self, input), fields(author_id = %author_id, class_id = %input.class_id))]
    pub async fn create(&self, author_id: Uuid, input: CreateAssignmentInput) -> Result<assignment::Model, ServiceError> {
        let new: assignment::NewAssignment = input.into();
        new.validate()?;

        let class = self
            .classrooms
            .find_classroom(&new.class_id)
            .await?
            .filter(|c| !c.is_deleted)
            .ok_or_else(|| ServiceError::not_found("classroom"))?;
        let is_teacher = self
            .classrooms
            .find_membership(author_id, &class.class_id)
            .await?
            .map(|m| !m.is_removed && m.role == Role::Teacher)
            .unwrap_or(false);
        if !is_teacher {
            return Err(ServiceError::forbidden());
        }

        let created = self.repo.insert(author_id, new).await?;
        info!(assignment_id = %created.id, class_id = %created.class_id, "assignment_created");
        Ok(created)
    }

    /// Author-only partial update; `is_deleted = true` soft-deletes.
    #[instrument(skip(self, patch), fields(user_id = %user_id, assignment_id = %id))]
    pub async fn edit(&self, user_id: Uuid, id: Uuid, patch: AssignmentPatch) -> Result<assignment::Model, ServiceError> {
        let current = self.repo.find(id).await?.ok_or_else(|| ServiceError::not_found("assignment"))?;
        if current.author_id != user_id {
            return Err(ServiceError::forbidden());
        }
        let saved = self.repo.save(patch.apply(current)?).await?;
        info!(assignment_id = %saved.id, is_deleted = saved.is_deleted, "assignment_edited");
        Ok(saved)
    }

    pub async fn list(&self, class_id: &str) -> Result<Vec<AssignmentDetail>, ServiceError> {
        let rows = self.repo.list_for_class(class_id).await?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let classroom = self.classrooms.find_classroom(class_id).await?;
        Ok(rows
            .into_iter()
            .map(|(assignment, created_by)| AssignmentDetail { assignment, classroom: classroom.clone(), created_by })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classroom::domain::{CreateClassroomInput, JoinClassroomInput};
    use crate::classroom::ClassroomService;
    use crate::mock::MockStore;

    struct Fixture {
        store: Arc<MockStore>,
        classrooms: ClassroomService<MockStore>,
        svc: AssignmentService<MockStore, MockStore>,
        teacher: Uuid,
        student: Uuid,
        class_id: String,
    }

    async fn fixture() -> Fixture {
        let store = Arc::new(MockStore::default());
        let teacher = store.add_user("teach", "Teacher");
        let student = store.add_user("learn", "Student");
        let classrooms = ClassroomService::new(store.clone());
        let class = classrooms
            .create(teacher, CreateClassroomInput { class_name: "Maths".into(), description: None, shared: false })
            .await
            .unwrap();
        classrooms
            .join(student, JoinClassroomInput { class_id: class.class_id.clone(), role: None })
            .await
            .unwrap();
        let svc = AssignmentService::new(store.clone(), store.clone());
        Fixture { store, classrooms, svc, teacher, student, class_id: class.class_id }
    }

    fn input(class_id: &str, title: &str) -> CreateAssignmentInput {
        CreateAssignmentInput {
            title: title.into(),
            kind: Some("homework".into()),
            description: None,
            link: Some("https://example.com/hw".into()),
            class_id: class_id.into(),
        }
    }

    #[tokio::test]
    async fn teacher_creates_and_lists_newest_first() {
        let f = fixture().await;
        f.svc.create(f.teacher, input(&f.class_id, "first")).await.unwrap();
        f.svc.create(f.teacher, input(&f.class_id, "second")).await.unwrap();

        let listed = f.svc.list(&f.class_id).await.unwrap();
        let titles: Vec<_> = listed.iter().map(|d| d.assignment.title.as_str()).collect();
        assert_eq!(titles, vec!["second", "first"]);
        assert_eq!(listed[0].created_by.as_ref().map(|u| u.id), Some(f.teacher));
        assert_eq!(listed[0].classroom.as_ref().map(|c| c.class_id.as_str()), Some(f.class_id.as_str()));
    }

    #[tokio::test]
    async fn students_and_strangers_cannot_create() {
        let f = fixture().await;
        let stranger = f.store.add_user("stranger", "Stranger");
        assert!(matches!(f.svc.create(f.student, input(&f.class_id, "x")).await, Err(ServiceError::Forbidden(_))));
        assert!(matches!(f.svc.create(stranger, input(&f.class_id, "x")).await, Err(ServiceError::Forbidden(_))));
        assert!(matches!(f.svc.create(f.teacher, input("00000", "x")).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn removed_teacher_cannot_create() {
        let f = fixture().await;
        f.classrooms.exit(f.teacher, &f.class_id, f.teacher).await.unwrap();
        assert!(matches!(f.svc.create(f.teacher, input(&f.class_id, "x")).await, Err(ServiceError::Forbidden(_))));
    }

    #[tokio::test]
    async fn create_validates_fields() {
        let f = fixture().await;
        assert!(f.svc.create(f.teacher, input(&f.class_id, "  ")).await.is_err());
        let mut bad_link = input(&f.class_id, "t");
        bad_link.link = Some("ftp://example.com".into());
        assert!(f.svc.create(f.teacher, bad_link).await.is_err());
    }

    #[tokio::test]
    async fn edit_is_author_only_and_soft_deletes() {
        let f = fixture().await;
        let a = f.svc.create(f.teacher, input(&f.class_id, "draft")).await.unwrap();

        let err = f.svc.edit(f.student, a.id, AssignmentPatch::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
        let missing = f.svc.edit(f.teacher, Uuid::new_v4(), AssignmentPatch::default()).await.unwrap_err();
        assert_eq!(missing.to_string(), "assignment not found");

        let renamed = f
            .svc
            .edit(f.teacher, a.id, AssignmentPatch { title: Some("final".into()), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(renamed.title, "final");

        f.svc
            .edit(f.teacher, a.id, AssignmentPatch { is_deleted: Some(true), ..Default::default() })
            .await
            .unwrap();
        assert!(f.svc.list(&f.class_id).await.unwrap().is_empty());
    }
}
