use sea_orm::{entity::prelude::*, ConnectionTrait, QueryFilter, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::{assignment, classroom, classroom_collaborator, comment};

pub const USERNAME_MAX_LEN: usize = 64;
pub const NAME_MAX_LEN: usize = 128;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    pub name: String,
    /// Argon2 PHC string; never leaves the service layer.
    #[serde(skip_serializing)]
    pub password: String,
    pub profile_picture: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Classrooms,
    Collaborations,
    Comments,
    Assignments,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Classrooms => Entity::has_many(classroom::Entity).into(),
            Relation::Collaborations => Entity::has_many(classroom_collaborator::Entity).into(),
            Relation::Comments => Entity::has_many(comment::Entity).into(),
            Relation::Assignments => Entity::has_many(assignment::Entity).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_username(username: &str) -> Result<(), ModelError> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err(ModelError::Validation("username required".into()));
    }
    if trimmed.chars().count() > USERNAME_MAX_LEN {
        return Err(ModelError::Validation(format!("username longer than {USERNAME_MAX_LEN} characters")));
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err(ModelError::Validation("username must not contain whitespace".into()));
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ModelError::Validation("name required".into()));
    }
    if trimmed.chars().count() > NAME_MAX_LEN {
        return Err(ModelError::Validation(format!("name longer than {NAME_MAX_LEN} characters")));
    }
    Ok(())
}

/// Insert a user. `password_hash` must already be hashed.
pub async fn create<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    username: &str,
    name: &str,
    password_hash: &str,
    profile_picture: Option<String>,
) -> Result<Model, ModelError> {
    validate_username(username)?;
    validate_name(name)?;
    if password_hash.is_empty() {
        return Err(ModelError::Validation("password hash required".into()));
    }
    let am = ActiveModel {
        id: Set(id),
        username: Set(username.trim().to_string()),
        name: Set(name.trim().to_string()),
        password: Set(password_hash.to_string()),
        profile_picture: Set(profile_picture),
        created_at: Set(Utc::now().into()),
    };
    Ok(am.insert(db).await?)
}

pub async fn find_by_username<C: ConnectionTrait>(db: &C, username: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find()
        .filter(Column::Username.eq(username.trim()))
        .one(db)
        .await?)
}
