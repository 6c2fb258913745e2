//! # 사용자 관리 서비스 구현
//!
//! 회원 가입, 로그인, 프로필 조회를 담당합니다.
//!
//! ```text
//! handlers::users ──▶ UserService ──▶ UserRepository   (users)
//!                                └──▶ CourseRepository (프로필의 수강 강좌)
//! ```
//!
//! ## 보안 설계 원칙
//!
//! - **bcrypt 해싱**: 환경별 cost (`PasswordConfig::bcrypt_cost`)
//! - **동일한 실패 메시지**: 이메일이 없든 비밀번호가 틀리든 `"Invalid email or password"`
//! - **민감 정보 제거**: 응답 DTO에는 비밀번호 해시가 없음

use std::sync::Arc;
use std::time::Instant;

use bcrypt::{hash, verify};
use log::{info, warn};

use crate::config::PasswordConfig;
use crate::domain::dto::users::{CreateUserRequest, LoginRequest, ProfileResponse};
use crate::domain::entities::users::User;
use crate::errors::{AppError, ErrorContext};
use crate::repositories::courses::CourseRepository;
use crate::repositories::parse_object_id;
use crate::repositories::users::UserRepository;
use crate::utils::string_utils::normalize_email;

/// 로그인 실패 시 공통 메시지
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";

/// 사용자 관리 비즈니스 로직 서비스
///
/// ## 에러 처리 전략
///
/// - **ValidationError**: 이메일 중복 (`"User already exists"`)
/// - **AuthenticationError**: 로그인 실패
/// - **NotFound**: 프로필 조회 시 사용자 없음
pub struct UserService {
    users: Arc<UserRepository>,
    courses: Arc<CourseRepository>,
}

impl UserService {
    pub fn new(users: Arc<UserRepository>, courses: Arc<CourseRepository>) -> Self {
        Self { users, courses }
    }

    /// 새 사용자 계정 생성
    ///
    /// 1. 이메일 정규화 및 중복 확인
    /// 2. bcrypt 해싱 (환경별 cost)
    /// 3. 저장 후 `last_active` 갱신
    ///
    /// 요청 DTO의 `validate()`는 호출 전에 끝나 있어야 합니다.
    pub async fn signup(&self, request: CreateUserRequest) -> Result<User, AppError> {
        let start = Instant::now();
        let email = normalize_email(&request.email);

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::ValidationError("User already exists".to_string()));
        }

        let password_hash = hash_password(&request.password, PasswordConfig::bcrypt_cost())?;

        let user = User::new(
            request.name.trim().to_string(),
            email,
            password_hash,
            request.role.unwrap_or_default(),
        );
        let user = self.users.create(user).await?;

        if let Some(id) = user.id.as_ref() {
            self.users.touch_last_active(id).await?;
        }

        info!("👤 회원 가입 완료: {} ({:?})", user.email, start.elapsed());
        Ok(user)
    }

    /// 이메일/비밀번호 로그인
    pub async fn signin(&self, request: LoginRequest) -> Result<User, AppError> {
        let email = normalize_email(&request.email);

        let Some(user) = self.users.find_by_email(&email).await? else {
            warn!("🔒 로그인 실패 (존재하지 않는 이메일): {}", email);
            return Err(AppError::AuthenticationError(INVALID_CREDENTIALS_MESSAGE.to_string()));
        };

        if !verify_password(&request.password, &user.password_hash)? {
            warn!("🔒 로그인 실패 (비밀번호 불일치): {}", email);
            return Err(AppError::AuthenticationError(INVALID_CREDENTIALS_MESSAGE.to_string()));
        }

        if let Some(id) = user.id.as_ref() {
            self.users.touch_last_active(id).await?;
        }

        info!("🔓 로그인 성공: {}", email);
        Ok(user)
    }

    /// 내 프로필 조회 (수강 강좌 요약 포함)
    pub async fn profile(&self, user_id: &str) -> Result<ProfileResponse, AppError> {
        let object_id = parse_object_id(user_id, "user")?;

        let user = self
            .users
            .find_by_id(&object_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let course_ids: Vec<_> = user.enrolled_courses.iter().map(|entry| entry.course).collect();
        let courses = self.courses.find_by_ids(&course_ids).await?;

        Ok(ProfileResponse::new(user, &courses))
    }
}

fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    hash(password, cost).context("Failed to hash password")
}

/// 저장된 해시가 손상된 경우에도 인증 실패가 아니라 내부 에러로 처리합니다.
fn verify_password(password: &str, password_hash: &str) -> Result<bool, AppError> {
    verify(password, password_hash).context("Failed to verify password")
}
