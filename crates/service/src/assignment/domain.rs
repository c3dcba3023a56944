use serde::{Deserialize, Serialize};

use models::{assignment, classroom};

use crate::auth::domain::AuthUser;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAssignmentInput {
    pub title: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    pub class_id: String,
}

impl From<CreateAssignmentInput> for assignment::NewAssignment {
    fn from(i: CreateAssignmentInput) -> Self {
        Self {
            title: i.title,
            kind: i.kind,
            description: i.description,
            link: i.link.filter(|l| !l.trim().is_empty()),
            class_id: i.class_id.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssignmentPatch {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub is_deleted: Option<bool>,
}

impl AssignmentPatch {
    pub fn apply(self, mut a: assignment::Model) -> Result<assignment::Model, models::errors::ModelError> {
        if let Some(title) = self.title {
            assignment::validate_title(&title)?;
            a.title = title.trim().to_string();
        }
        if let Some(kind) = self.kind {
            a.kind = Some(kind);
        }
        if let Some(description) = self.description {
            a.description = Some(description);
        }
        if let Some(link) = self.link {
            assignment::validate_link(&link)?;
            a.link = Some(link);
        }
        if let Some(is_deleted) = self.is_deleted {
            a.is_deleted = is_deleted;
        }
        Ok(a)
    }
}

/// Assignment with its classroom and author embedded.
#[derive(Debug, Clone, Serialize)]
pub struct AssignmentDetail {
    #[serde(flatten)]
    pub assignment: assignment::Model,
    pub classroom: Option<classroom::Model>,
    pub created_by: Option<AuthUser>,
}
