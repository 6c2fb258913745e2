//! # Domain Models Module
//!
//! 영속되지 않는 도메인 모델과 값 객체를 정의합니다.
//!
//! ## Entities vs Models 구분
//!
//! - **Entities** (`../entities/`): MongoDB에 저장되며 고유 ID를 가지는 문서
//! - **Models** (`./`): 요청 처리 중에만 존재하는 값 객체
//!
//! ## 모듈 구성
//!
//! ```text
//! models/
//! ├── auth/    ← 인증된 사용자, 역할 요구사항
//! └── token/   ← JWT 클레임
//! ```

pub mod auth;
pub mod token;
