//! # Authentication Configuration Module
//!
//! JWT 서명 키, 토큰 만료 시간, 인증 쿠키 이름을 관리합니다.
//!
//! ## 필수 환경 변수
//!
//! ```bash
//! export SECRET_KEY="your-super-secret-key"   # 또는 JWT_SECRET
//! export JWT_EXPIRATION_HOURS="24"
//! ```

use std::env;

/// 인증 토큰을 담는 쿠키 이름
pub const TOKEN_COOKIE_NAME: &str = "token";

/// JWT 토큰 설정
pub struct JwtConfig;

impl JwtConfig {
    /// 토큰 서명에 사용하는 비밀 키
    ///
    /// `SECRET_KEY`를 우선 확인하고, 없으면 `JWT_SECRET`을 사용합니다.
    /// 기본값은 없으며, 누락 시 서버 기동이 중단됩니다.
    pub fn secret() -> Option<String> {
        env::var("SECRET_KEY")
            .or_else(|_| env::var("JWT_SECRET"))
            .ok()
            .filter(|secret| !secret.is_empty())
    }

    /// 토큰 만료 시간 (시간 단위). 기본값: 24
    pub fn expiration_hours() -> i64 {
        env::var("JWT_EXPIRATION_HOURS")
            .ok()
            .and_then(|s| s.parse::<i64>().ok())
            .filter(|hours| *hours > 0)
            .unwrap_or(24)
    }
}
