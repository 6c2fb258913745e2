//! # Data Transfer Objects (DTO) Module
//!
//! API 경계에서 주고받는 요청/응답 구조를 정의합니다.
//!
//! ## 설계 원칙
//!
//! - **요청 DTO**: `serde::Deserialize` + `validator::Validate`. 핸들러에서 `validate()?`로 검증
//! - **응답 DTO**: 엔티티에서 `From`으로 변환. 민감한 정보(비밀번호 해시 등)는 제외
//! - **공통 형식**: 성공 응답은 [`common::ApiResponse`]로 감쌉니다
//!
//! ## 모듈 구조
//!
//! ```text
//! dto/
//! ├── common/     # ApiResponse, 시각 변환
//! ├── users/      # 가입, 로그인, 프로필
//! ├── courses/    # 강좌 생성/수정/응답
//! ├── lectures/   # 강의 추가/응답
//! └── purchases/  # 구매 생성/응답
//! ```

pub mod common;
pub mod courses;
pub mod lectures;
pub mod purchases;
pub mod users;
