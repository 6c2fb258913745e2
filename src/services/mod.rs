//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 `main`에서 리포지토리를 주입받아 한 번 생성되고,
//! `AppState`를 통해 핸들러에 공유됩니다.
//!
//! # Features
//!
//! - 회원 가입, 로그인, 프로필 조회
//! - JWT 토큰 발급/검증
//! - 강좌와 강의 관리
//! - 구매 생성과 완료 처리
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::{auth::TokenService, users::UserService};
//!
//! let tokens = TokenService::from_env()?;
//! let user_service = UserService::new(user_repo.clone(), course_repo.clone());
//! ```

pub mod auth;
pub mod courses;
pub mod purchases;
pub mod users;
