//! User Entity Implementation
//!
//! 수강생, 강사, 관리자를 모두 표현하는 사용자 엔티티입니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 기본 프로필 이미지
pub const DEFAULT_AVATAR: &str = "default-avatar.png";

/// 사용자 역할
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Student,
    Instructor,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Student => "student",
            UserRole::Instructor => "instructor",
            UserRole::Admin => "admin",
        }
    }
}

/// 수강 등록 정보
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrolledCourse {
    pub course: ObjectId,
    pub enrolled_at: DateTime,
}

/// 사용자 엔티티
///
/// `users` 컬렉션에 저장됩니다. 이메일은 항상 소문자로 저장되며 유니크 인덱스를 가집니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    /// 사용자 이메일 (unique, 소문자)
    pub email: String,
    /// bcrypt 해시. 응답 DTO로 절대 복사되지 않습니다.
    pub password_hash: String,
    #[serde(default)]
    pub role: UserRole,
    pub avatar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default)]
    pub enrolled_courses: Vec<EnrolledCourse>,
    #[serde(default)]
    pub created_courses: Vec<ObjectId>,
    pub last_active: DateTime,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl User {
    /// 새 사용자 생성
    ///
    /// 이메일 정규화와 비밀번호 해싱은 호출자(서비스 계층)가 끝낸 상태여야 합니다.
    pub fn new(name: String, email: String, password_hash: String, role: UserRole) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            name,
            email,
            password_hash,
            role,
            avatar: DEFAULT_AVATAR.to_string(),
            bio: None,
            enrolled_courses: Vec::new(),
            created_courses: Vec::new(),
            last_active: now,
            created_at: now,
            updated_at: now,
        }
    }

    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    pub fn is_enrolled_in(&self, course_id: &ObjectId) -> bool {
        self.enrolled_courses.iter().any(|entry| &entry.course == course_id)
    }

    pub fn total_enrolled_courses(&self) -> usize {
        self.enrolled_courses.len()
    }
}
