use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use models::classroom_collaborator::Role;
use models::errors::ModelError;
use models::{classroom, classroom_collaborator};

use super::domain::{
    ClassroomDetail, ClassroomListing, ClassroomMembers, ClassroomPatch, CreateClassroomInput, JoinClassroomInput,
    JoinedClassroom, Member, NewClassroom, OwnedClassroom,
};
use super::repository::ClassroomRepository;
use crate::errors::ServiceError;

/// Upper bound on fresh class ids drawn before giving up.
const MAX_CLASS_ID_ATTEMPTS: usize = 16;

pub struct ClassroomService<R: ClassroomRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: ClassroomRepository + ?Sized> ClassroomService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Create a classroom owned by `owner_id`; the owner becomes its first teacher.
    #[instrument(skip(self, input), fields(owner_id = %owner_id))]
    pub async fn create(&self, owner_id: Uuid, input: CreateClassroomInput) -> Result<classroom::Model, ServiceError> {
        classroom::validate_class_name(&input.class_name)?;
        for _ in 0..MAX_CLASS_ID_ATTEMPTS {
            let class_id = classroom::generate_class_id();
            if self.repo.find_classroom(&class_id).await?.is_some() {
                debug!(class_id = %class_id, "class id taken, drawing another");
                continue;
            }
            let new = NewClassroom {
                class_id,
                class_name: input.class_name.trim().to_string(),
                description: input.description.clone(),
                shared: input.shared,
                owner_id,
            };
            match self.repo.create_with_owner(new).await {
                Ok(created) => {
                    info!(class_id = %created.class_id, owner_id = %owner_id, "classroom_created");
                    return Ok(created);
                }
                // 并发下被抢占，换一个 id 重试
                Err(ServiceError::Model(ModelError::Duplicate(_))) => continue,
                Err(e) => return Err(e),
            }
        }
        Err(ServiceError::Conflict("could not allocate a class id".into()))
    }

    /// Owned classrooms plus active memberships split by role.
    #[instrument(skip(self))]
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<ClassroomListing, ServiceError> {
        let mut listing = ClassroomListing::default();
        for class in self.repo.list_owned(user_id).await? {
            let collaborators = self.repo.list_members(&class.class_id).await?.into_iter().map(|(m, _)| m).collect();
            listing.own.push(OwnedClassroom { classroom: class, collaborators });
        }
        for (membership, classroom) in self.repo.list_memberships(user_id).await? {
            let joined = JoinedClassroom { membership, classroom };
            match joined.membership.role {
                Role::Student => listing.joined_as_student.push(joined),
                Role::Teacher => listing.joined_as_teacher.push(joined),
            }
        }
        Ok(listing)
    }

    pub async fn get(&self, class_id: &str) -> Result<ClassroomDetail, ServiceError> {
        let class = self.live_classroom(class_id).await?;
        let owner = self.repo.find_user(class.owner_id).await?;
        Ok(ClassroomDetail { classroom: class, owner })
    }

    /// Owner-only partial update. `is_deleted = true` soft-deletes the classroom.
    #[instrument(skip(self, patch), fields(user_id = %user_id, class_id = %class_id))]
    pub async fn edit(&self, user_id: Uuid, class_id: &str, patch: ClassroomPatch) -> Result<classroom::Model, ServiceError> {
        let class = self
            .repo
            .find_classroom(class_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("classroom"))?;
        if class.owner_id != user_id {
            return Err(ServiceError::forbidden());
        }
        let updated = self.repo.save_classroom(patch.apply(class)?).await?;
        info!(class_id = %updated.class_id, is_deleted = updated.is_deleted, "classroom_updated");
        Ok(updated)
    }

    /// Enroll the user. A previously removed membership is reactivated with the requested role.
    #[instrument(skip(self, input), fields(user_id = %user_id, class_id = %input.class_id))]
    pub async fn join(&self, user_id: Uuid, input: JoinClassroomInput) -> Result<classroom_collaborator::Model, ServiceError> {
        let role = match input.role.as_deref() {
            Some(raw) if !raw.trim().is_empty() => Role::parse(raw)?,
            _ => Role::Student,
        };
        let class = self.live_classroom(input.class_id.trim()).await?;

        let membership = match self.repo.find_membership(user_id, &class.class_id).await? {
            Some(existing) if !existing.is_removed => {
                return Err(ServiceError::Conflict("you are already a member of this classroom".into()));
            }
            Some(mut removed) => {
                removed.is_removed = false;
                removed.role = role;
                removed.joined_at = Utc::now().into();
                self.repo.save_membership(removed).await?
            }
            None => {
                self.repo
                    .insert_membership(classroom_collaborator::Model {
                        user_id,
                        class_id: class.class_id.clone(),
                        role,
                        is_removed: false,
                        joined_at: Utc::now().into(),
                    })
                    .await?
            }
        };
        info!(user_id = %user_id, class_id = %membership.class_id, role = %membership.role, "classroom_joined");
        Ok(membership)
    }

    /// Soft-remove `member_id` from the classroom. Allowed for the member and the owner.
    #[instrument(skip(self), fields(caller = %caller, member_id = %member_id))]
    pub async fn exit(&self, caller: Uuid, class_id: &str, member_id: Uuid) -> Result<classroom_collaborator::Model, ServiceError> {
        let class = self
            .repo
            .find_classroom(class_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("classroom"))?;
        if caller != member_id && class.owner_id != caller {
            return Err(ServiceError::forbidden());
        }
        let mut membership = self
            .repo
            .find_membership(member_id, class_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("member"))?;
        membership.is_removed = true;
        let saved = self.repo.save_membership(membership).await?;
        info!(class_id = %class_id, member_id = %member_id, "classroom_exited");
        Ok(saved)
    }

    pub async fn members(&self, class_id: &str) -> Result<ClassroomMembers, ServiceError> {
        let class = self
            .repo
            .find_classroom(class_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("could not get classroom".into()))?;
        let mut students = Vec::new();
        let mut teachers = Vec::new();
        for (membership, user) in self.repo.list_members(class_id).await? {
            let member = Member { membership, user };
            match member.membership.role {
                Role::Student => students.push(member),
                Role::Teacher => teachers.push(member),
            }
        }
        Ok(ClassroomMembers { owner_id: class.owner_id, students, teachers })
    }

    async fn live_classroom(&self, class_id: &str) -> Result<classroom::Model, ServiceError> {
        self.repo
            .find_classroom(class_id)
            .await?
            .filter(|c| !c.is_deleted)
            .ok_or_else(|| ServiceError::not_found("classroom"))
    }
}
