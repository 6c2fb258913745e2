//! 에러 처리 모듈
//!
//! [`errors::AppError`]가 HTTP 경계의 유일한 에러 변환 지점입니다.
//! 데이터베이스 연결 수명주기 에러는 [`crate::db::ConnectionError`]에 따로 정의됩니다.

pub mod errors;

pub use errors::*;
