//! # Domain Layer Module
//!
//! 도메인 계층을 구성하는 핵심 모듈입니다.
//!
//! ## 아키텍처 개요
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── Entities  - MongoDB 문서 (User, Course, Lecture, Purchase)
//! ├── DTOs      - API 요청/응답 계약
//! └── Models    - 요청 처리 중에만 쓰이는 값 객체 (인증 사용자, JWT 클레임)
//!      │
//!      ▼
//! Application Layer (Services)
//!      │
//!      ▼
//! Infrastructure Layer (Repositories, DB)
//! ```
//!
//! ## 사용자 등록 플로우
//!
//! ```rust,ignore
//! use validator::Validate;
//! use crate::domain::dto::users::{CreateUserRequest, UserResponse};
//!
//! // 1. DTO 검증
//! request.validate()?;
//!
//! // 2. 서비스에서 엔티티 생성 및 저장
//! let user = user_service.signup(request).await?;
//!
//! // 3. 응답 DTO로 변환
//! let response = UserResponse::from(user);
//! ```

pub mod dto;
pub mod entities;
pub mod models;
