//! 강의 요청/응답 DTO

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::dto::common::to_utc;
use crate::domain::entities::lectures::Lecture;
use crate::utils::string_utils::deserialize_optional_string;

/// 강의 추가 요청
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLectureRequest {
    #[validate(length(min = 1, max = 100, message = "Lecture title is required and cannot exceed 100 characters"))]
    pub title: String,

    #[validate(length(max = 500, message = "Lecture description cannot exceed 500 characters"))]
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub description: Option<String>,

    #[validate(length(min = 1, message = "Lecture video URL is required"))]
    pub video_url: String,

    #[validate(range(min = 0.0, message = "Lecture duration cannot be negative"))]
    #[serde(default)]
    pub duration: f64,

    #[validate(length(min = 1, message = "Lecture public ID is required"))]
    pub public_id: String,

    #[serde(default)]
    pub is_preview: bool,

    /// 지정하지 않으면 강좌의 마지막 순서 다음
    pub order: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LectureResponse {
    pub id: String,
    pub course: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub video_url: String,
    pub duration: f64,
    pub public_id: String,
    pub is_preview: bool,
    pub order: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Lecture> for LectureResponse {
    fn from(lecture: Lecture) -> Self {
        Self {
            id: lecture.id.map(|id| id.to_hex()).unwrap_or_default(),
            course: lecture.course.to_hex(),
            title: lecture.title,
            description: lecture.description,
            video_url: lecture.video_url,
            duration: lecture.duration,
            public_id: lecture.public_id,
            is_preview: lecture.is_preview,
            order: lecture.order,
            created_at: to_utc(lecture.created_at),
            updated_at: to_utc(lecture.updated_at),
        }
    }
}
