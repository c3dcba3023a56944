use async_trait::async_trait;
use uuid::Uuid;

use models::{classroom, classroom_collaborator};

use super::domain::NewClassroom;
use crate::auth::domain::AuthUser;
use crate::errors::ServiceError;

/// Persistence for classrooms and memberships.
#[async_trait]
pub trait ClassroomRepository: Send + Sync {
    /// Lookup by id, soft-deleted rows included.
    async fn find_classroom(&self, class_id: &str) -> Result<Option<classroom::Model>, ServiceError>;
    /// Insert the classroom and the owner's teacher membership atomically.
    async fn create_with_owner(&self, new: NewClassroom) -> Result<classroom::Model, ServiceError>;
    async fn save_classroom(&self, class: classroom::Model) -> Result<classroom::Model, ServiceError>;
    /// Classrooms owned by the user that are not soft-deleted.
    async fn list_owned(&self, owner_id: Uuid) -> Result<Vec<classroom::Model>, ServiceError>;
    /// Active memberships of the user in classrooms that are not soft-deleted.
    async fn list_memberships(&self, user_id: Uuid) -> Result<Vec<(classroom_collaborator::Model, classroom::Model)>, ServiceError>;
    /// Active memberships of a classroom with their users.
    async fn list_members(&self, class_id: &str) -> Result<Vec<(classroom_collaborator::Model, Option<AuthUser>)>, ServiceError>;
    async fn find_membership(&self, user_id: Uuid, class_id: &str) -> Result<Option<classroom_collaborator::Model>, ServiceError>;
    async fn insert_membership(&self, membership: classroom_collaborator::Model) -> Result<classroom_collaborator::Model, ServiceError>;
    async fn save_membership(&self, membership: classroom_collaborator::Model) -> Result<classroom_collaborator::Model, ServiceError>;
    async fn find_user(&self, id: Uuid) -> Result<Option<AuthUser>, ServiceError>;
}
