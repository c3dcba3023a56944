use rand::Rng;
use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::{assignment, classroom_collaborator, comment, user};

pub const CLASS_NAME_MAX_LEN: usize = 128;
/// Class ids are five digit numbers handed out to students as join codes.
pub const CLASS_ID_MIN: u32 = 10_000;
pub const CLASS_ID_MAX: u32 = 99_999;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "classrooms")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub class_id: String,
    pub class_name: String,
    pub description: Option<String>,
    pub done: bool,
    pub owner_id: Uuid,
    pub is_deleted: bool,
    pub shared: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Owner,
    Collaborators,
    Comments,
    Assignments,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Owner => Entity::belongs_to(user::Entity)
                .from(Column::OwnerId)
                .to(user::Column::Id)
                .into(),
            Relation::Collaborators => Entity::has_many(classroom_collaborator::Entity).into(),
            Relation::Comments => Entity::has_many(comment::Entity).into(),
            Relation::Assignments => Entity::has_many(assignment::Entity).into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<classroom_collaborator::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Collaborators.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Draw a candidate class id; callers check it against existing rows.
pub fn generate_class_id() -> String {
    rand::thread_rng().gen_range(CLASS_ID_MIN..=CLASS_ID_MAX).to_string()
}

pub fn validate_class_name(name: &str) -> Result<(), ModelError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ModelError::Validation("class_name required".into()));
    }
    if trimmed.chars().count() > CLASS_NAME_MAX_LEN {
        return Err(ModelError::Validation(format!("class_name longer than {CLASS_NAME_MAX_LEN} characters")));
    }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    class_id: &str,
    class_name: &str,
    description: Option<String>,
    shared: bool,
    owner_id: Uuid,
) -> Result<Model, ModelError> {
    validate_class_name(class_name)?;
    let am = ActiveModel {
        class_id: Set(class_id.to_string()),
        class_name: Set(class_name.trim().to_string()),
        description: Set(description),
        done: Set(false),
        owner_id: Set(owner_id),
        is_deleted: Set(false),
        shared: Set(shared),
        created_at: Set(Utc::now().into()),
    };
    Ok(am.insert(db).await?)
}
