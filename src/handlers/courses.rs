//! # 강좌/강의 HTTP 핸들러
//!
//! ## 공개 라우트 (`/api/v1/courses`)
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | `GET` | `/` | 공개된 강좌 목록 |
//! | `GET` | `/{course_id}` | 공개된 강좌 상세 |
//!
//! ## 강사 라우트 (`/api/v1/instructor/courses`, instructor/admin)
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | `POST` | `/` | 강좌 생성 |
//! | `GET` | `/` | 내 강좌 목록 |
//! | `PATCH` | `/{course_id}` | 강좌 수정 |
//! | `DELETE` | `/{course_id}` | 강좌와 강의 삭제 |
//! | `POST` | `/{course_id}/lectures` | 강의 추가 |
//! | `GET` | `/{course_id}/lectures` | 강의 목록 |

use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::domain::dto::common::ApiResponse;
use crate::domain::dto::courses::{CourseResponse, CreateCourseRequest, UpdateCourseRequest};
use crate::domain::dto::lectures::{CreateLectureRequest, LectureResponse};
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::state::AppState;

fn course_list(courses: Vec<crate::domain::entities::courses::Course>) -> Vec<CourseResponse> {
    courses.into_iter().map(CourseResponse::from).collect()
}

pub async fn list_published(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let courses = state.courses.list_published().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::data(course_list(courses))))
}

pub async fn get_published(
    state: web::Data<AppState>,
    course_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let course = state.courses.get_published(&course_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::data(CourseResponse::from(course))))
}

pub async fn create_course(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    payload: web::Json<CreateCourseRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let course = state.courses.create(&user.user_id, payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::with_message(
        "Course created successfully",
        CourseResponse::from(course),
    )))
}

pub async fn list_own_courses(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let courses = state.courses.list_for_instructor(&user.user_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::data(course_list(courses))))
}

pub async fn update_course(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    course_id: web::Path<String>,
    payload: web::Json<UpdateCourseRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let course = state
        .courses
        .update(&user.user_id, &course_id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        "Course updated successfully",
        CourseResponse::from(course),
    )))
}

pub async fn delete_course(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    course_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    state.courses.delete(&user.user_id, &course_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("Course deleted successfully")))
}

pub async fn add_lecture(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    course_id: web::Path<String>,
    payload: web::Json<CreateLectureRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let lecture = state
        .courses
        .add_lecture(&user.user_id, &course_id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::with_message(
        "Lecture added successfully",
        LectureResponse::from(lecture),
    )))
}

pub async fn list_lectures(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    course_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let lectures = state.courses.list_lectures(&user.user_id, &course_id).await?;
    let lectures: Vec<LectureResponse> = lectures.into_iter().map(LectureResponse::from).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::data(lectures)))
}
