use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::{classroom, user};

pub const TITLE_MAX_LEN: usize = 255;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "assignments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub link: Option<String>,
    pub class_id: String,
    pub author_id: Uuid,
    pub is_deleted: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Classroom,
    Author,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Classroom => Entity::belongs_to(classroom::Entity)
                .from(Column::ClassId)
                .to(classroom::Column::ClassId)
                .into(),
            Relation::Author => Entity::belongs_to(user::Entity)
                .from(Column::AuthorId)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl Related<classroom::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Classroom.def()
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_title(title: &str) -> Result<(), ModelError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ModelError::Validation("title required".into()));
    }
    if trimmed.chars().count() > TITLE_MAX_LEN {
        return Err(ModelError::Validation(format!("title longer than {TITLE_MAX_LEN} characters")));
    }
    Ok(())
}

pub fn validate_link(link: &str) -> Result<(), ModelError> {
    if !(link.starts_with("http://") || link.starts_with("https://")) {
        return Err(ModelError::Validation("link must start with http(s)".into()));
    }
    Ok(())
}

/// Fields supplied by the author when creating an assignment.
#[derive(Clone, Debug, Default)]
pub struct NewAssignment {
    pub title: String,
    pub kind: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub class_id: String,
}

impl NewAssignment {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_title(&self.title)?;
        if let Some(link) = self.link.as_deref() {
            validate_link(link)?;
        }
        Ok(())
    }
}

pub async fn create<C: ConnectionTrait>(db: &C, author_id: Uuid, input: NewAssignment) -> Result<Model, ModelError> {
    input.validate()?;
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(input.title.trim().to_string()),
        kind: Set(input.kind),
        description: Set(input.description),
        link: Set(input.link),
        class_id: Set(input.class_id),
        author_id: Set(author_id),
        is_deleted: Set(false),
        created_at: Set(Utc::now().into()),
    };
    Ok(am.insert(db).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_assignment_validation() {
        let ok = NewAssignment {
            title: "Essay".into(),
            link: Some("https://docs.example.com/essay".into()),
            class_id: "12345".into(),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());

        let no_title = NewAssignment { title: " ".into(), ..ok.clone() };
        assert!(no_title.validate().is_err());

        let bad_link = NewAssignment { link: Some("javascript:alert(1)".into()), ..ok };
        assert!(bad_link.validate().is_err());
    }

    #[test]
    fn kind_serializes_as_type() {
        let m = Model {
            id: Uuid::nil(),
            title: "Quiz".into(),
            kind: Some("quiz".into()),
            description: None,
            link: None,
            class_id: "10001".into(),
            author_id: Uuid::nil(),
            is_deleted: false,
            created_at: Utc::now().into(),
        };
        let v = serde_json::to_value(&m).unwrap();
        assert_eq!(v["type"], "quiz");
        assert!(v.get("kind").is_none());
    }
}
