//! 공통 유틸리티 함수 모듈
//!
//! # Modules
//!
//! - [`string_utils`] - 이메일 정규화, 선택적 문자열 정리
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::utils::string_utils::normalize_email;
//!
//! let email = normalize_email("  Ada@Example.com ");
//! ```

pub mod string_utils;
