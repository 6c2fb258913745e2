//! 인증 서비스 모듈
//!
//! JWT 토큰 발급/검증과 인증 게이트용 사용자 조회 인터페이스를 제공합니다.
//!
//! # Security
//!
//! - HMAC-SHA256 토큰 서명
//! - 토큰은 HttpOnly, SameSite=Strict 쿠키로만 전달
//! - 검증 실패 원인(만료, 서명 불일치, 형식 오류)은 클라이언트에 구분하지 않음
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::TokenService;
//!
//! let tokens = TokenService::from_env()?;
//! let token = tokens.issue_token(&user_id)?;
//! let claims = tokens.verify_token(&token)?;
//! ```

pub mod token_service;
pub mod user_lookup;

pub use token_service::*;
pub use user_lookup::UserLookup;
