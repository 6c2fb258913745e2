use serde::Deserialize;
use validator::Validate;

use crate::domain::entities::courses::CourseLevel;
use crate::utils::string_utils::deserialize_optional_string;

/// 강좌 생성 요청
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCourseRequest {
    #[validate(length(min = 1, max = 100, message = "Course title is required and cannot exceed 100 characters"))]
    pub title: String,

    #[validate(length(max = 200, message = "Course subtitle cannot exceed 200 characters"))]
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub sub_title: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub description: Option<String>,

    #[validate(length(min = 1, message = "Course category is required"))]
    pub category: String,

    pub level: Option<CourseLevel>,

    #[validate(range(min = 0.0, message = "Course price cannot be negative"))]
    pub price: f64,

    #[validate(length(min = 1, message = "Course thumbnail is required"))]
    pub thumbnail: String,
}

/// 강좌 수정 요청. 전달된 필드만 변경됩니다.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateCourseRequest {
    #[validate(length(min = 1, max = 100, message = "Course title cannot exceed 100 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 200, message = "Course subtitle cannot exceed 200 characters"))]
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub sub_title: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub description: Option<String>,

    #[validate(length(min = 1, message = "Course category cannot be empty"))]
    pub category: Option<String>,

    pub level: Option<CourseLevel>,

    #[validate(range(min = 0.0, message = "Course price cannot be negative"))]
    pub price: Option<f64>,

    #[validate(length(min = 1, message = "Course thumbnail cannot be empty"))]
    pub thumbnail: Option<String>,

    pub is_published: Option<bool>,
}

impl UpdateCourseRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.sub_title.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.level.is_none()
            && self.price.is_none()
            && self.thumbnail.is_none()
            && self.is_published.is_none()
    }
}
