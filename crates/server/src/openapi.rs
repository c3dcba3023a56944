use axum::Json;
use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct RegisterRequest { pub username: String, pub name: String, pub password: String }

#[derive(ToSchema)]
pub struct LoginRequest { pub username: String, pub password: String }

#[derive(ToSchema)]
pub struct CreateClassroomRequest {
    pub class_name: String,
    pub description: Option<String>,
    pub shared: Option<bool>,
}

#[derive(ToSchema)]
pub struct ClassroomPatchRequest {
    pub class_name: Option<String>,
    pub description: Option<String>,
    pub done: Option<bool>,
    pub shared: Option<bool>,
    pub is_deleted: Option<bool>,
}

#[derive(ToSchema)]
pub struct JoinClassroomRequest {
    pub class_id: String,
    /// `teacher` or `student`
    pub role: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct CreateAssignmentRequest {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub class_id: String,
}

#[derive(Serialize, ToSchema)]
pub struct AssignmentPatchRequest {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub is_deleted: Option<bool>,
}

#[derive(ToSchema)]
pub struct AddCommentRequest { pub content: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::users::register,
        crate::routes::users::login,
        crate::routes::users::get_user,
        crate::routes::classrooms::create,
        crate::routes::classrooms::list,
        crate::routes::classrooms::get,
        crate::routes::classrooms::edit,
        crate::routes::classrooms::join,
        crate::routes::classrooms::exit,
        crate::routes::classrooms::members,
        crate::routes::assignments::create,
        crate::routes::assignments::edit,
        crate::routes::assignments::list,
        crate::routes::comments::add,
        crate::routes::comments::list,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequest,
            LoginRequest,
            CreateClassroomRequest,
            ClassroomPatchRequest,
            JoinClassroomRequest,
            CreateAssignmentRequest,
            AssignmentPatchRequest,
            AddCommentRequest,
        )
    ),
    tags(
        (name = "health"),
        (name = "users"),
        (name = "classrooms"),
        (name = "assignments"),
        (name = "comments")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
