//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들입니다. 핸들러는 요청 DTO 검증과
//! 응답 형식 변환만 담당하고, 비즈니스 규칙은 서비스 계층에 둡니다.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Handlers (이 모듈) - HTTP 엔드포인트 처리         ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   Services - 비즈니스 로직                        ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   Repositories - 데이터 접근                     ← Repository Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! 모든 핸들러는 `web::Data<AppState>`로 서비스에 접근하고,
//! 인증이 필요한 핸들러는 [`AuthenticatedUser`](crate::domain::models::auth::AuthenticatedUser)
//! 추출자를 받습니다.
//!
//! ## 응답 형식
//!
//! - 성공: `{ "success": true, "message"?: ..., "data"?: ... }`
//! - 실패: `{ "status": "fail" | "error", "message": ... }`
//!
//! ## 모듈 구성
//!
//! - **`health`**: 헬스체크 (`GET /health`)
//! - **`users`**: 회원 가입, 로그인, 로그아웃, 프로필
//! - **`courses`**: 공개 강좌 조회, 강사용 강좌/강의 관리
//! - **`purchases`**: 구매 생성, 조회, 완료

pub mod courses;
pub mod health;
pub mod purchases;
pub mod users;
