//! 강좌와 강의 관리 서비스
//!
//! 공개 목록 조회와 강사용 관리 기능을 함께 제공합니다. 강사용 기능은 모두
//! 강좌 소유자 확인을 거칩니다.

use std::sync::Arc;

use log::info;
use mongodb::bson::{doc, oid::ObjectId, to_bson, Document};

use crate::domain::dto::courses::{CreateCourseRequest, UpdateCourseRequest};
use crate::domain::dto::lectures::CreateLectureRequest;
use crate::domain::entities::courses::Course;
use crate::domain::entities::lectures::Lecture;
use crate::errors::{AppError, ErrorContext};
use crate::repositories::courses::CourseRepository;
use crate::repositories::lectures::LectureRepository;
use crate::repositories::parse_object_id;
use crate::repositories::users::UserRepository;

pub struct CourseService {
    courses: Arc<CourseRepository>,
    lectures: Arc<LectureRepository>,
    users: Arc<UserRepository>,
}

impl CourseService {
    pub fn new(
        courses: Arc<CourseRepository>,
        lectures: Arc<LectureRepository>,
        users: Arc<UserRepository>,
    ) -> Self {
        Self { courses, lectures, users }
    }

    /// 공개된 강좌 목록
    pub async fn list_published(&self) -> Result<Vec<Course>, AppError> {
        self.courses.find_published().await
    }

    /// 공개된 강좌 단건. 비공개 강좌는 없는 것과 같게 404
    pub async fn get_published(&self, course_id: &str) -> Result<Course, AppError> {
        let id = parse_object_id(course_id, "course")?;

        self.courses
            .find_published_by_id(&id)
            .await?
            .ok_or_else(course_not_found)
    }

    /// 강좌 생성 후 강사의 `created_courses`에 기록
    pub async fn create(&self, instructor_id: &str, request: CreateCourseRequest) -> Result<Course, AppError> {
        let instructor = parse_object_id(instructor_id, "user")?;

        let mut course = Course::new(
            request.title.trim().to_string(),
            request.category.trim().to_string(),
            request.price,
            request.thumbnail,
            instructor,
        );
        course.sub_title = request.sub_title;
        course.description = request.description;
        course.level = request.level.unwrap_or_default();

        let course = self.courses.create(course).await?;

        if let Some(course_id) = course.id.as_ref() {
            self.users.add_created_course(&instructor, course_id).await?;
        }

        info!("📚 강좌 생성: {} (instructor={})", course.title, instructor_id);
        Ok(course)
    }

    /// 강사 본인의 강좌 목록 (비공개 포함)
    pub async fn list_for_instructor(&self, instructor_id: &str) -> Result<Vec<Course>, AppError> {
        let instructor = parse_object_id(instructor_id, "user")?;

        self.courses.find_by_instructor(&instructor).await
    }

    /// 전달된 필드만 갱신
    pub async fn update(
        &self,
        instructor_id: &str,
        course_id: &str,
        request: UpdateCourseRequest,
    ) -> Result<Course, AppError> {
        let course = self.owned_course(instructor_id, course_id).await?;

        if request.is_empty() {
            return Ok(course);
        }

        let changes = update_document(request)?;
        let id = course.id.ok_or_else(course_not_found)?;

        self.courses
            .update(&id, changes)
            .await?
            .ok_or_else(course_not_found)
    }

    /// 강좌와 소속 강의를 삭제
    ///
    /// 여러 문서에 걸친 작업이지만 트랜잭션 없이 순서대로 수행합니다.
    pub async fn delete(&self, instructor_id: &str, course_id: &str) -> Result<(), AppError> {
        let course = self.owned_course(instructor_id, course_id).await?;
        let id = course.id.ok_or_else(course_not_found)?;

        let removed_lectures = self.lectures.delete_by_course(&id).await?;

        if !self.courses.delete(&id).await? {
            return Err(course_not_found());
        }

        self.users.remove_created_course(&course.instructor, &id).await?;

        info!("🗑️ 강좌 삭제: {} (강의 {}개 함께 삭제)", course_id, removed_lectures);
        Ok(())
    }

    /// 강의 추가
    ///
    /// 순서를 지정하지 않으면 현재 강의 수 다음 번호를 사용하고,
    /// 강좌의 `total_lectures`와 `total_duration`을 함께 갱신합니다.
    pub async fn add_lecture(
        &self,
        instructor_id: &str,
        course_id: &str,
        request: CreateLectureRequest,
    ) -> Result<Lecture, AppError> {
        let course = self.owned_course(instructor_id, course_id).await?;
        let id = course.id.ok_or_else(course_not_found)?;

        let order = request.order.unwrap_or_else(|| next_lecture_order(&course));

        let mut lecture = Lecture::new(
            id,
            request.title.trim().to_string(),
            request.video_url,
            request.public_id,
            request.duration,
            order,
        );
        lecture.description = request.description;
        lecture.is_preview = request.is_preview;

        let lecture = self.lectures.create(lecture).await?;

        if let Some(lecture_id) = lecture.id.as_ref() {
            self.courses.attach_lecture(&id, lecture_id, lecture.duration).await?;
        }

        Ok(lecture)
    }

    /// 강좌의 강의 목록 (`order` 순)
    pub async fn list_lectures(&self, instructor_id: &str, course_id: &str) -> Result<Vec<Lecture>, AppError> {
        let course = self.owned_course(instructor_id, course_id).await?;
        let id = course.id.ok_or_else(course_not_found)?;

        self.lectures.find_by_course(&id).await
    }

    /// 강좌를 조회하고 요청자가 소유자인지 확인합니다.
    async fn owned_course(&self, instructor_id: &str, course_id: &str) -> Result<Course, AppError> {
        let instructor = parse_object_id(instructor_id, "user")?;
        let id = parse_object_id(course_id, "course")?;

        let course = self.courses.find_by_id(&id).await?.ok_or_else(course_not_found)?;

        if !course.is_owned_by(&instructor) {
            return Err(AppError::Forbidden(
                "You are not allowed to modify this course".to_string(),
            ));
        }

        Ok(course)
    }
}

fn course_not_found() -> AppError {
    AppError::NotFound("Course not found".to_string())
}

fn next_lecture_order(course: &Course) -> u32 {
    course.total_lectures.max(course.lectures.len() as u32) + 1
}

/// 수정 요청을 `$set` 문서로 변환
fn update_document(request: UpdateCourseRequest) -> Result<Document, AppError> {
    let mut changes = doc! {};

    if let Some(title) = request.title {
        changes.insert("title", title.trim());
    }
    if let Some(sub_title) = request.sub_title {
        changes.insert("sub_title", sub_title);
    }
    if let Some(description) = request.description {
        changes.insert("description", description);
    }
    if let Some(category) = request.category {
        changes.insert("category", category.trim());
    }
    if let Some(level) = request.level {
        changes.insert("level", to_bson(&level).context("Failed to encode course level")?);
    }
    if let Some(price) = request.price {
        changes.insert("price", price);
    }
    if let Some(thumbnail) = request.thumbnail {
        changes.insert("thumbnail", thumbnail);
    }
    if let Some(is_published) = request.is_published {
        changes.insert("is_published", is_published);
    }

    Ok(changes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::courses::CourseLevel;

    fn course() -> Course {
        Course::new(
            "Rust".to_string(),
            "programming".to_string(),
            10.0,
            "rust.png".to_string(),
            ObjectId::new(),
        )
    }

    #[test]
    fn test_next_lecture_order() {
        let mut course = course();
        assert_eq!(next_lecture_order(&course), 1);

        course.total_lectures = 3;
        course.lectures = vec![ObjectId::new(); 3];
        assert_eq!(next_lecture_order(&course), 4);
    }

    #[test]
    fn test_update_document_contains_only_given_fields() {
        let request = UpdateCourseRequest {
            title: Some("  Advanced Rust ".to_string()),
            level: Some(CourseLevel::Advanced),
            is_published: Some(true),
            ..Default::default()
        };

        let changes = update_document(request).unwrap();

        assert_eq!(changes.len(), 3);
        assert_eq!(changes.get_str("title").unwrap(), "Advanced Rust");
        assert_eq!(changes.get_str("level").unwrap(), "advanced");
        assert!(changes.get_bool("is_published").unwrap());
        assert!(changes.get("price").is_none());
    }
}
