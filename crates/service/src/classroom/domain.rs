use serde::{Deserialize, Serialize};
use uuid::Uuid;

use models::{classroom, classroom_collaborator};

use crate::auth::domain::AuthUser;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClassroomInput {
    pub class_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub shared: bool,
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassroomPatch {
    pub class_name: Option<String>,
    pub description: Option<String>,
    pub done: Option<bool>,
    pub shared: Option<bool>,
    pub is_deleted: Option<bool>,
}

impl ClassroomPatch {
    pub fn apply(self, mut class: classroom::Model) -> Result<classroom::Model, models::errors::ModelError> {
        if let Some(name) = self.class_name {
            classroom::validate_class_name(&name)?;
            class.class_name = name.trim().to_string();
        }
        if let Some(description) = self.description {
            class.description = Some(description);
        }
        if let Some(done) = self.done {
            class.done = done;
        }
        if let Some(shared) = self.shared {
            class.shared = shared;
        }
        if let Some(is_deleted) = self.is_deleted {
            class.is_deleted = is_deleted;
        }
        Ok(class)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinClassroomInput {
    pub class_id: String,
    /// `teacher` or `student`; defaults to `student`.
    #[serde(default)]
    pub role: Option<String>,
}

/// Row data for a new classroom plus its owner.
#[derive(Debug, Clone)]
pub struct NewClassroom {
    pub class_id: String,
    pub class_name: String,
    pub description: Option<String>,
    pub shared: bool,
    pub owner_id: Uuid,
}

#[derive(Debug, Clone, Serialize)]
pub struct OwnedClassroom {
    #[serde(flatten)]
    pub classroom: classroom::Model,
    pub collaborators: Vec<classroom_collaborator::Model>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JoinedClassroom {
    #[serde(flatten)]
    pub membership: classroom_collaborator::Model,
    pub classroom: classroom::Model,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ClassroomListing {
    pub own: Vec<OwnedClassroom>,
    pub joined_as_student: Vec<JoinedClassroom>,
    pub joined_as_teacher: Vec<JoinedClassroom>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassroomDetail {
    #[serde(flatten)]
    pub classroom: classroom::Model,
    pub owner: Option<AuthUser>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Member {
    #[serde(flatten)]
    pub membership: classroom_collaborator::Model,
    pub user: Option<AuthUser>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassroomMembers {
    pub owner_id: Uuid,
    pub students: Vec<Member>,
    pub teachers: Vec<Member>,
}
