//! In-memory repositories for tests and doc examples.
//!
//! One `MockStore` backs every repository trait so that data written through
//! one service is visible to the others.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use models::classroom_collaborator::Role;
use models::{assignment, classroom, classroom_collaborator, comment};

use crate::assignment::repository::AssignmentRepository;
use crate::auth::domain::{AuthUser, Credentials, NewUser};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;
use crate::classroom::domain::NewClassroom;
use crate::classroom::repository::ClassroomRepository;
use crate::comment::CommentRepository;
use crate::errors::ServiceError;

#[derive(Default)]
pub struct MockStore {
    users: Mutex<HashMap<Uuid, Credentials>>,
    classrooms: Mutex<HashMap<String, classroom::Model>>,
    memberships: Mutex<Vec<classroom_collaborator::Model>>, // insertion order = joined order
    assignments: Mutex<Vec<assignment::Model>>,
    comments: Mutex<Vec<comment::Model>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockStore {
    /// Seed a user directly, bypassing hashing. Returns its id.
    pub fn add_user(&self, username: &str, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        let user = AuthUser { id, username: username.to_string(), name: name.to_string(), profile_picture: None };
        lock(&self.users).insert(id, Credentials { user, password_hash: String::new() });
        id
    }

    fn user(&self, id: Uuid) -> Option<AuthUser> {
        lock(&self.users).get(&id).map(|c| c.user.clone())
    }
}

#[async_trait]
impl AuthRepository for MockStore {
    async fn find_credentials_by_username(&self, username: &str) -> Result<Option<Credentials>, AuthError> {
        Ok(lock(&self.users).values().find(|c| c.user.username == username).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AuthError> {
        Ok(self.user(id))
    }

    async fn create_user(&self, new: NewUser) -> Result<AuthUser, AuthError> {
        let mut users = lock(&self.users);
        if users.values().any(|c| c.user.username == new.username) {
            return Err(AuthError::Conflict);
        }
        let user = AuthUser { id: new.id, username: new.username, name: new.name, profile_picture: new.profile_picture };
        users.insert(user.id, Credentials { user: user.clone(), password_hash: new.password_hash });
        Ok(user)
    }
}

#[async_trait]
impl ClassroomRepository for MockStore {
    async fn find_classroom(&self, class_id: &str) -> Result<Option<classroom::Model>, ServiceError> {
        Ok(lock(&self.classrooms).get(class_id).cloned())
    }

    async fn create_with_owner(&self, new: NewClassroom) -> Result<classroom::Model, ServiceError> {
        let mut classrooms = lock(&self.classrooms);
        if classrooms.contains_key(&new.class_id) {
            return Err(ServiceError::Model(models::errors::ModelError::Duplicate(new.class_id)));
        }
        let now = Utc::now();
        let class = classroom::Model {
            class_id: new.class_id.clone(),
            class_name: new.class_name,
            description: new.description,
            done: false,
            owner_id: new.owner_id,
            is_deleted: false,
            shared: new.shared,
            created_at: now.into(),
        };
        classrooms.insert(new.class_id.clone(), class.clone());
        lock(&self.memberships).push(classroom_collaborator::Model {
            user_id: new.owner_id,
            class_id: new.class_id,
            role: Role::Teacher,
            is_removed: false,
            joined_at: now.into(),
        });
        Ok(class)
    }

    async fn save_classroom(&self, class: classroom::Model) -> Result<classroom::Model, ServiceError> {
        lock(&self.classrooms).insert(class.class_id.clone(), class.clone());
        Ok(class)
    }

    async fn list_owned(&self, owner_id: Uuid) -> Result<Vec<classroom::Model>, ServiceError> {
        let mut owned: Vec<_> = lock(&self.classrooms)
            .values()
            .filter(|c| c.owner_id == owner_id && !c.is_deleted)
            .cloned()
            .collect();
        owned.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(owned)
    }

    async fn list_memberships(&self, user_id: Uuid) -> Result<Vec<(classroom_collaborator::Model, classroom::Model)>, ServiceError> {
        let classrooms = lock(&self.classrooms);
        Ok(lock(&self.memberships)
            .iter()
            .filter(|m| m.user_id == user_id && !m.is_removed)
            .filter_map(|m| {
                classrooms
                    .get(&m.class_id)
                    .filter(|c| !c.is_deleted)
                    .map(|c| (m.clone(), c.clone()))
            })
            .collect())
    }

    async fn list_members(&self, class_id: &str) -> Result<Vec<(classroom_collaborator::Model, Option<AuthUser>)>, ServiceError> {
        let active: Vec<_> = lock(&self.memberships)
            .iter()
            .filter(|m| m.class_id == class_id && !m.is_removed)
            .cloned()
            .collect();
        Ok(active.into_iter().map(|m| {
            let user = self.user(m.user_id);
            (m, user)
        }).collect())
    }

    async fn find_membership(&self, user_id: Uuid, class_id: &str) -> Result<Option<classroom_collaborator::Model>, ServiceError> {
        Ok(lock(&self.memberships)
            .iter()
            .find(|m| m.user_id == user_id && m.class_id == class_id)
            .cloned())
    }

    async fn insert_membership(&self, membership: classroom_collaborator::Model) -> Result<classroom_collaborator::Model, ServiceError> {
        let mut memberships = lock(&self.memberships);
        if memberships.iter().any(|m| m.user_id == membership.user_id && m.class_id == membership.class_id) {
            return Err(ServiceError::Model(models::errors::ModelError::Duplicate("membership".into())));
        }
        memberships.push(membership.clone());
        Ok(membership)
    }

    async fn save_membership(&self, membership: classroom_collaborator::Model) -> Result<classroom_collaborator::Model, ServiceError> {
        let mut memberships = lock(&self.memberships);
        match memberships
            .iter_mut()
            .find(|m| m.user_id == membership.user_id && m.class_id == membership.class_id)
        {
            Some(slot) => *slot = membership.clone(),
            None => memberships.push(membership.clone()),
        }
        Ok(membership)
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<AuthUser>, ServiceError> {
        Ok(self.user(id))
    }
}

#[async_trait]
impl AssignmentRepository for MockStore {
    async fn insert(&self, author_id: Uuid, new: assignment::NewAssignment) -> Result<assignment::Model, ServiceError> {
        new.validate()?;
        let created = assignment::Model {
            id: Uuid::new_v4(),
            title: new.title.trim().to_string(),
            kind: new.kind,
            description: new.description,
            link: new.link,
            class_id: new.class_id,
            author_id,
            is_deleted: false,
            created_at: Utc::now().into(),
        };
        lock(&self.assignments).push(created.clone());
        Ok(created)
    }

    async fn find(&self, id: Uuid) -> Result<Option<assignment::Model>, ServiceError> {
        Ok(lock(&self.assignments).iter().find(|a| a.id == id).cloned())
    }

    async fn save(&self, a: assignment::Model) -> Result<assignment::Model, ServiceError> {
        let mut assignments = lock(&self.assignments);
        match assignments.iter_mut().find(|x| x.id == a.id) {
            Some(slot) => *slot = a.clone(),
            None => return Err(ServiceError::not_found("assignment")),
        }
        Ok(a)
    }

    async fn list_for_class(&self, class_id: &str) -> Result<Vec<(assignment::Model, Option<AuthUser>)>, ServiceError> {
        let rows: Vec<_> = lock(&self.assignments)
            .iter()
            .rev()
            .filter(|a| a.class_id == class_id && !a.is_deleted)
            .cloned()
            .collect();
        Ok(rows.into_iter().map(|a| {
            let author = self.user(a.author_id);
            (a, author)
        }).collect())
    }
}

#[async_trait]
impl CommentRepository for MockStore {
    async fn insert(&self, author_id: Uuid, class_id: &str, content: &str) -> Result<comment::Model, ServiceError> {
        comment::validate_content(content)?;
        let mut comments = lock(&self.comments);
        let created = comment::Model {
            id: comments.len() as i32 + 1,
            content: content.trim().to_string(),
            author_id,
            class_id: class_id.to_string(),
            created_at: Utc::now().into(),
        };
        comments.push(created.clone());
        Ok(created)
    }

    async fn list_for_class(&self, class_id: &str) -> Result<Vec<(comment::Model, Option<AuthUser>)>, ServiceError> {
        let rows: Vec<_> = lock(&self.comments).iter().filter(|c| c.class_id == class_id).cloned().collect();
        Ok(rows.into_iter().map(|c| {
            let author = self.user(c.author_id);
            (c, author)
        }).collect())
    }
}
