use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::dto::common::to_utc;
use crate::domain::entities::courses::Course;
use crate::domain::entities::users::{User, UserRole};

/// 사용자 응답 DTO
///
/// 비밀번호 해시는 포함하지 않습니다.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub avatar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub last_active: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let User {
            id,
            name,
            email,
            role,
            avatar,
            bio,
            last_active,
            created_at,
            updated_at,
            ..
        } = user;

        Self {
            id: id.map(|id| id.to_hex()).unwrap_or_default(),
            name,
            email,
            role,
            avatar,
            bio,
            last_active: to_utc(last_active),
            created_at: to_utc(created_at),
            updated_at: to_utc(updated_at),
        }
    }
}

/// 프로필 화면에 함께 보여주는 강좌 요약
#[derive(Debug, Clone, Serialize)]
pub struct CourseSummary {
    pub id: String,
    pub title: String,
    pub thumbnail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&Course> for CourseSummary {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id_string().unwrap_or_default(),
            title: course.title.clone(),
            thumbnail: course.thumbnail.clone(),
            description: course.description.clone(),
        }
    }
}

/// 수강 중인 강좌. 강좌 문서가 삭제되었다면 `course`는 `null`
#[derive(Debug, Clone, Serialize)]
pub struct EnrollmentResponse {
    pub course: Option<CourseSummary>,
    pub enrolled_at: DateTime<Utc>,
}

/// 내 프로필 응답 DTO
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub enrolled_courses: Vec<EnrollmentResponse>,
    pub created_courses: Vec<String>,
    pub total_enrolled_courses: usize,
}

impl ProfileResponse {
    /// 사용자 문서와 수강 강좌 문서로 프로필을 조립합니다.
    ///
    /// # Arguments
    ///
    /// * `user` - 프로필 주인
    /// * `courses` - `user.enrolled_courses`가 가리키는 강좌들 (순서 무관)
    pub fn new(user: User, courses: &[Course]) -> Self {
        let enrolled_courses = user
            .enrolled_courses
            .iter()
            .map(|entry| EnrollmentResponse {
                course: courses
                    .iter()
                    .find(|course| course.id.as_ref() == Some(&entry.course))
                    .map(CourseSummary::from),
                enrolled_at: to_utc(entry.enrolled_at),
            })
            .collect();

        let created_courses = user.created_courses.iter().map(|id| id.to_hex()).collect();
        let total_enrolled_courses = user.total_enrolled_courses();

        Self {
            user: UserResponse::from(user),
            enrolled_courses,
            created_courses,
            total_enrolled_courses,
        }
    }
}
