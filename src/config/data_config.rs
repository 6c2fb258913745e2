//! 데이터 및 서버 설정 관리 모듈
//!
//! 실행 환경, 서버 바인딩, 데이터베이스 연결, CORS, Rate Limiting 설정을 관리합니다.

use std::convert::Infallible;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 개발 환경 - 상세 로그, 요청 로거, 에러 상세 노출
    Development,
    /// 테스트 환경 - 자동화된 테스트용 설정
    Test,
    /// 스테이징 환경 - 프로덕션 유사 환경
    Staging,
    /// 프로덕션 환경 - 내부 에러 마스킹
    Production,
}

impl Environment {
    /// 현재 실행 환경을 감지합니다.
    ///
    /// `ENVIRONMENT` 또는 `NODE_ENV` 환경 변수를 확인하며,
    /// 설정되지 않은 경우 `Production`을 기본값으로 사용합니다.
    pub fn current() -> Self {
        let name = env::var("ENVIRONMENT")
            .or_else(|_| env::var("NODE_ENV"))
            .unwrap_or_else(|_| "production".to_string());

        let Ok(environment) = name.parse::<Self>();
        environment
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    /// 로그 필터 기본값
    ///
    /// 개발 환경에서는 드라이버 디버그 로그까지 출력합니다.
    pub fn default_log_filter(&self) -> &'static str {
        match self {
            Environment::Development => "debug,mongodb=debug,actix_web=debug",
            _ => "info,actix_web=info",
        }
    }
}

/// 알 수 없는 값은 `Production`으로 해석하므로 파싱은 실패하지 않습니다.
impl FromStr for Environment {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        })
    }
}

/// 패스워드 해싱 설정
pub struct PasswordConfig;

impl PasswordConfig {
    /// 현재 환경에 맞는 bcrypt cost를 반환합니다.
    ///
    /// `BCRYPT_COST`가 4-15 범위면 그 값을, 아니면 환경별 기본값을 사용합니다.
    pub fn bcrypt_cost() -> u32 {
        env::var("BCRYPT_COST")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .filter(|cost| (4..=15).contains(cost))
            .unwrap_or_else(|| Self::bcrypt_cost_for_env(&Environment::current()))
    }

    /// 특정 환경에 대한 bcrypt cost를 반환합니다.
    ///
    /// - Development/Test: 4 (빠른 처리)
    /// - Staging: 10
    /// - Production: 12
    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development | Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }
}

/// 서버 바인딩 설정
pub struct ServerConfig;

impl ServerConfig {
    /// 서버가 바인딩할 포트를 반환합니다. 기본값: 3000
    pub fn port() -> u16 {
        env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000)
    }

    /// 서버가 바인딩할 호스트 주소를 반환합니다. 기본값: "0.0.0.0"
    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string())
    }

    /// JSON 요청 본문 최대 크기 (10 KiB)
    pub const JSON_BODY_LIMIT: usize = 10 * 1024;
}

/// 데이터베이스 연결 설정
///
/// 연결 문자열은 필수값이며 기본값이 없습니다.
/// 누락 여부는 [`crate::db::ConnectionManager::connect`]가 판단합니다.
pub struct DatabaseConfig;

impl DatabaseConfig {
    /// MongoDB 연결 문자열 (`MONGO_URI`, 없으면 `MONGODB_URI`)
    pub fn uri() -> Option<String> {
        env::var("MONGO_URI")
            .or_else(|_| env::var("MONGODB_URI"))
            .ok()
            .filter(|uri| !uri.trim().is_empty())
    }

    /// 명시적으로 지정된 데이터베이스 이름
    pub fn database_name() -> Option<String> {
        env::var("DATABASE_NAME").ok().filter(|name| !name.trim().is_empty())
    }

    /// 연결 실패 시 최대 재시도 횟수. 기본값: 3
    pub fn max_retries() -> u32 {
        env::var("DB_MAX_RETRIES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3)
    }

    /// 재시도 간격. 기본값: 5초
    pub fn retry_interval() -> Duration {
        let secs = env::var("DB_RETRY_INTERVAL_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5);

        Duration::from_secs(secs)
    }
}

/// CORS 설정
pub struct CorsConfig;

impl CorsConfig {
    /// 허용할 클라이언트 오리진. 기본값: "http://localhost:5173"
    pub fn client_url() -> String {
        env::var("CLIENT_URL").unwrap_or_else(|_| "http://localhost:5173".to_string())
    }
}

/// `/api` 경로 Rate Limiting 설정
#[derive(Debug, Clone, PartialEq)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimitConfig {
    /// 환경변수에서 Rate Limiting 설정을 로드합니다.
    ///
    /// * `RATE_LIMIT_PER_SECOND` - 토큰 보충 속도 (기본값: 1)
    /// * `RATE_LIMIT_BURST_SIZE` - 버스트 허용량 (기본값: 100)
    ///
    /// 파싱에 실패하면 경고 후 기본값을 사용합니다.
    pub fn from_env() -> Self {
        let per_second = env::var("RATE_LIMIT_PER_SECOND")
            .map(|raw| {
                raw.parse::<u64>().unwrap_or_else(|e| {
                    log::warn!("RATE_LIMIT_PER_SECOND 파싱 실패: {}. 기본값 1 사용", e);
                    1
                })
            })
            .unwrap_or(1);

        let burst_size = env::var("RATE_LIMIT_BURST_SIZE")
            .map(|raw| {
                raw.parse::<u32>().unwrap_or_else(|e| {
                    log::warn!("RATE_LIMIT_BURST_SIZE 파싱 실패: {}. 기본값 100 사용", e);
                    100
                })
            })
            .unwrap_or(100);

        Self { per_second, burst_size }
    }
}
