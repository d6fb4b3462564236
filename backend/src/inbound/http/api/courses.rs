//! Courses API handlers.
//!
//! ```text
//! GET    /api/courses
//! POST   /api/courses        {"name":"Pizza","price":299,"image":"/images/pizza.jpg"}
//! GET    /api/courses/{id}
//! PUT    /api/courses/{id}
//! DELETE /api/courses/{id}
//! ```

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{Course, DomainError, NewCourse};
use crate::inbound::http::api::Message;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

pub(crate) const COURSE_NOT_FOUND: &str = "Course not found";

/// Request body for creating or updating a course.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CoursePayload {
    pub name: String,
    pub price: i32,
    #[serde(default)]
    pub image: String,
}

impl TryFrom<CoursePayload> for NewCourse {
    type Error = DomainError;

    fn try_from(payload: CoursePayload) -> Result<Self, Self::Error> {
        NewCourse::try_from_parts(&payload.name, payload.price, &payload.image)
            .map_err(|err| DomainError::invalid_request(err.to_string()))
    }
}

#[utoipa::path(
    get,
    path = "/api/courses",
    responses(
        (status = 200, description = "All courses", body = [Course]),
        (status = 500, description = "Backend failure", body = ErrorBody)
    ),
    tags = ["courses"],
    operation_id = "listCourses"
)]
#[get("/courses")]
pub async fn list_courses(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Course>>> {
    Ok(web::Json(state.courses.courses().await?))
}

#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CoursePayload,
    responses(
        (status = 201, description = "Course created", body = Course),
        (status = 400, description = "Invalid name or price", body = ErrorBody),
        (status = 500, description = "Backend failure", body = ErrorBody)
    ),
    tags = ["courses"],
    operation_id = "createCourse"
)]
#[post("/courses")]
pub async fn create_course(
    state: web::Data<HttpState>,
    payload: web::Json<CoursePayload>,
) -> ApiResult<HttpResponse> {
    let course = NewCourse::try_from(payload.into_inner())?;
    let created = state.courses.create_course(&course).await?;
    Ok(HttpResponse::Created().json(created))
}

#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    params(("id" = i32, Path, description = "Course id")),
    responses(
        (status = 200, description = "The course", body = Course),
        (status = 404, description = "No such course", body = ErrorBody),
        (status = 500, description = "Backend failure", body = ErrorBody)
    ),
    tags = ["courses"],
    operation_id = "getCourse"
)]
#[get("/courses/{id}")]
pub async fn get_course(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Course>> {
    let course = state
        .courses
        .course_by_id(path.into_inner())
        .await?
        .ok_or_else(|| DomainError::not_found(COURSE_NOT_FOUND))?;
    Ok(web::Json(course))
}

#[utoipa::path(
    put,
    path = "/api/courses/{id}",
    params(("id" = i32, Path, description = "Course id")),
    request_body = CoursePayload,
    responses(
        (status = 200, description = "The updated course", body = Course),
        (status = 400, description = "Invalid name or price", body = ErrorBody),
        (status = 404, description = "No such course", body = ErrorBody),
        (status = 500, description = "Backend failure", body = ErrorBody)
    ),
    tags = ["courses"],
    operation_id = "updateCourse"
)]
#[put("/courses/{id}")]
pub async fn update_course(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<CoursePayload>,
) -> ApiResult<web::Json<Course>> {
    let id = path.into_inner();
    let course = NewCourse::try_from(payload.into_inner())?;
    state.courses.update_course(id, &course).await?;
    let updated = state
        .courses
        .course_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found(COURSE_NOT_FOUND))?;
    Ok(web::Json(updated))
}

#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    params(("id" = i32, Path, description = "Course id")),
    responses(
        (status = 200, description = "Deleted (idempotent)", body = Message),
        (status = 500, description = "Backend failure", body = ErrorBody)
    ),
    tags = ["courses"],
    operation_id = "deleteCourse"
)]
#[delete("/courses/{id}")]
pub async fn delete_course(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Message>> {
    state.courses.delete_course(path.into_inner()).await?;
    Ok(web::Json(Message::new("Course deleted successfully")))
}
