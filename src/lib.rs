//! 강좌 마켓플레이스 백엔드
//!
//! 사용자, 강좌, 강의, 구매 리소스를 REST API로 제공하는 서비스입니다.
//! MongoDB 연결은 재시도와 재연결을 담당하는 연결 관리자가 소유하고,
//! 인증은 `token` 쿠키의 JWT로 처리합니다.
//!
//! # Features
//!
//! - **연결 관리**: 고정 간격 재시도, 연결 끊김 시 재연결, SIGTERM 정상 종료
//! - **JWT 인증**: HttpOnly 쿠키 기반 인증 게이트와 역할 검사
//! - **강좌/강의**: 강사용 관리 기능과 공개 조회
//! - **구매**: 대기 중인 구매 생성과 완료 시 수강 등록
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트 + 인증 게이트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청 검증 / 응답 변환
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 데이터 액세스
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ ConnectionMgr   │ ← MongoDB 연결 수명주기
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use course_market_backend::db::{DatabaseManager, DatabaseSettings, MongoConnector, RetryPolicy};
//!
//! let db = Arc::new(DatabaseManager::new(
//!     MongoConnector::new(),
//!     DatabaseSettings::from_env(),
//!     RetryPolicy::from_env(),
//! ));
//! db.connect().await?;
//! ```

pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod middlewares;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
