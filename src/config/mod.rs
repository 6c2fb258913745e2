//! # Configuration Module
//!
//! 환경 변수 기반 설정값을 중앙에서 관리합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 서버, 데이터베이스, CORS, Rate Limiting 설정
//! - [`auth_config`] - JWT 및 인증 쿠키 설정
//!
//! 설정 접근자는 호출 시점에 환경 변수를 읽습니다. 연결 관리자처럼 상태를 가진
//! 컴포넌트는 기동 시 한 번 읽은 값을 소유한 구조체
//! ([`crate::db::DatabaseSettings`], [`crate::db::RetryPolicy`])로 주입받습니다.
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 필수
//! export MONGO_URI="mongodb://localhost:27017/lms"
//! export SECRET_KEY="your-super-secret-key"
//!
//! # 선택
//! export PORT="3000"
//! export NODE_ENV="development"        # development, test, staging, production
//! export CLIENT_URL="http://localhost:5173"
//! export BCRYPT_COST="12"              # 4-15 범위
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
