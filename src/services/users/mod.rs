//! 사용자 관리 서비스 모듈
//!
//! 회원 가입, 로그인, 프로필 조회 비즈니스 로직을 제공합니다.
//!
//! # Security
//!
//! - bcrypt 비밀번호 해싱
//! - 이메일 정규화 및 중복 방지
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::users::UserService;
//!
//! let user_service = UserService::new(user_repo.clone(), course_repo.clone());
//! let user = user_service.signup(request).await?;
//! ```

pub mod user_service;

pub use user_service::UserService;
