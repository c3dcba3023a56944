use std::sync::Arc;

use sea_orm::DatabaseConnection;

use service::assignment::repository::{AssignmentRepository, SeaOrmAssignmentRepository};
use service::assignment::AssignmentService;
use service::auth::repo::seaorm::SeaOrmAuthRepository;
use service::auth::repository::AuthRepository;
use service::auth::AuthService;
use service::classroom::repo::seaorm::SeaOrmClassroomRepository;
use service::classroom::repository::ClassroomRepository;
use service::classroom::ClassroomService;
use service::comment::{CommentRepository, CommentService, SeaOrmCommentRepository};
use service::mock::MockStore;
use service::profile_picture::ProfilePictureProvider;

pub type SharedAuth = AuthService<dyn AuthRepository>;
pub type SharedClassrooms = ClassroomService<dyn ClassroomRepository>;
pub type SharedAssignments = AssignmentService<dyn AssignmentRepository, dyn ClassroomRepository>;
pub type SharedComments = CommentService<dyn CommentRepository, dyn ClassroomRepository>;

/// Services shared by every handler.
#[derive(Clone)]
pub struct ServerState {
    pub auth: Arc<SharedAuth>,
    pub classrooms: Arc<SharedClassrooms>,
    pub assignments: Arc<SharedAssignments>,
    pub comments: Arc<SharedComments>,
}

impl ServerState {
    pub fn new(
        users: Arc<dyn AuthRepository>,
        classrooms: Arc<dyn ClassroomRepository>,
        assignments: Arc<dyn AssignmentRepository>,
        comments: Arc<dyn CommentRepository>,
        pictures: Arc<dyn ProfilePictureProvider>,
    ) -> Self {
        Self {
            auth: Arc::new(AuthService::new(users, pictures)),
            classrooms: Arc::new(ClassroomService::new(Arc::clone(&classrooms))),
            assignments: Arc::new(AssignmentService::new(assignments, Arc::clone(&classrooms))),
            comments: Arc::new(CommentService::new(comments, classrooms)),
        }
    }

    /// SeaORM repositories over one connection pool.
    pub fn with_database(db: DatabaseConnection, pictures: Arc<dyn ProfilePictureProvider>) -> Self {
        Self::new(
            Arc::new(SeaOrmAuthRepository { db: db.clone() }),
            Arc::new(SeaOrmClassroomRepository { db: db.clone() }),
            Arc::new(SeaOrmAssignmentRepository { db: db.clone() }),
            Arc::new(SeaOrmCommentRepository { db }),
            pictures,
        )
    }

    /// Everything backed by one in-memory store.
    pub fn in_memory(store: Arc<MockStore>, pictures: Arc<dyn ProfilePictureProvider>) -> Self {
        Self::new(store.clone(), store.clone(), store.clone(), store, pictures)
    }
}
