//! 미들웨어 모듈
//!
//! ActixWeb 요청 처리 파이프라인에서 사용되는 미들웨어들을 제공합니다.
//!
//! # 제공 미들웨어
//!
//! ### 인증 미들웨어 (AuthMiddleware)
//! - `token` 쿠키의 JWT 검증
//! - 토큰 주인이 아직 존재하는지 확인
//! - 사용자 정보를 request extension에 저장
//! - 선택적 역할 요구사항
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::web;
//! use crate::middlewares::AuthMiddleware;
//!
//! let gate = AuthMiddleware::new(state.tokens.clone(), state.user_lookup());
//!
//! web::scope("/api/v1/purchases")
//!     .wrap(gate.clone())
//!     .route("", web::get().to(list_purchases));
//! ```

pub mod auth_middleware;
mod auth_inner;

// 미들웨어 재export
pub use auth_middleware::AuthMiddleware;
