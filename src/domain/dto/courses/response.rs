use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::dto::common::to_utc;
use crate::domain::entities::courses::{Course, CourseLevel};

/// 강좌 응답 DTO
///
/// 수강생 목록 대신 수강생 수만 노출합니다.
#[derive(Debug, Clone, Serialize)]
pub struct CourseResponse {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: String,
    pub level: CourseLevel,
    pub price: f64,
    pub thumbnail: String,
    pub instructor: String,
    pub is_published: bool,
    pub lectures: Vec<String>,
    pub total_lectures: u32,
    pub total_duration: f64,
    pub total_students: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id_string().unwrap_or_default(),
            title: course.title,
            sub_title: course.sub_title,
            description: course.description,
            category: course.category,
            level: course.level,
            price: course.price,
            thumbnail: course.thumbnail,
            instructor: course.instructor.to_hex(),
            is_published: course.is_published,
            lectures: course.lectures.iter().map(|id| id.to_hex()).collect(),
            total_lectures: course.total_lectures,
            total_duration: course.total_duration,
            total_students: course.enrolled_students.len(),
            created_at: to_utc(course.created_at),
            updated_at: to_utc(course.updated_at),
        }
    }
}
