//! JWT 토큰 관리 서비스 구현
//!
//! 사용자 ID를 담은 HS256 서명 토큰의 발급과 검증, 그리고 토큰을 담는
//! `token` 쿠키 생성을 담당합니다.

use actix_web::cookie::{time, Cookie, SameSite};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::config::{Environment, JwtConfig, TOKEN_COOKIE_NAME};
use crate::domain::models::token::TokenClaims;
use crate::errors::AppError;

/// 토큰 검증 실패 시 클라이언트에게 보여주는 메시지
pub const TOKEN_ERROR_MESSAGE: &str = "JWT token error";

/// JWT 토큰 관리 서비스
///
/// 서명 키는 생성 시 한 번 고정되며 프로세스 수명 동안 바뀌지 않습니다.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiration: Duration,
    secure_cookie: bool,
}

impl TokenService {
    /// 새 토큰 서비스 생성
    ///
    /// # Arguments
    ///
    /// * `secret` - HMAC 서명 키
    /// * `expiration` - 토큰 유효 기간
    pub fn new(secret: &str, expiration: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiration,
            secure_cookie: false,
        }
    }

    /// 환경 변수에서 토큰 서비스를 구성합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - `SECRET_KEY`/`JWT_SECRET` 미설정
    pub fn from_env() -> Result<Self, AppError> {
        let secret = JwtConfig::secret().ok_or_else(|| {
            AppError::InternalError("SECRET_KEY is not defined in env variables".to_string())
        })?;

        let mut service = Self::new(&secret, Duration::hours(JwtConfig::expiration_hours()));
        service.secure_cookie = Environment::current().is_production();
        Ok(service)
    }

    /// 토큰 유효 기간 (초)
    pub fn expiration_seconds(&self) -> i64 {
        self.expiration.num_seconds()
    }

    /// 사용자를 위한 JWT 토큰 생성
    ///
    /// # Arguments
    ///
    /// * `user_id` - 토큰 주체가 될 사용자 ID
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 서명 실패
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let token = token_service.issue_token(&user_id)?;
    /// let cookie = token_service.session_cookie(token);
    /// ```
    pub fn issue_token(&self, user_id: &str) -> Result<String, AppError> {
        let now = Utc::now();

        let claims = TokenClaims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + self.expiration).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))
    }

    /// JWT 토큰 검증 및 클레임 추출
    ///
    /// 형식 오류, 서명 불일치, 만료를 구분하지 않고 모두 같은 인증 에러로 돌려줍니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 검증 실패
    pub fn verify_token(&self, token: &str) -> Result<TokenClaims, AppError> {
        decode::<TokenClaims>(token, &self.decoding_key, &Validation::default())
            .map(|token_data| token_data.claims)
            .map_err(|e| {
                log::debug!("토큰 검증 실패: {:?}", e.kind());
                AppError::AuthenticationError(TOKEN_ERROR_MESSAGE.to_string())
            })
    }

    /// 토큰을 담은 인증 쿠키
    ///
    /// HttpOnly, SameSite=Strict이며 토큰과 같은 수명을 가집니다.
    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build(TOKEN_COOKIE_NAME, token)
            .http_only(true)
            .same_site(SameSite::Strict)
            .path("/")
            .secure(self.secure_cookie)
            .max_age(time::Duration::seconds(self.expiration_seconds()))
            .finish()
    }

    /// 로그아웃 시 인증 쿠키를 즉시 만료시키는 쿠키
    pub fn cleared_cookie(&self) -> Cookie<'static> {
        Cookie::build(TOKEN_COOKIE_NAME, "")
            .http_only(true)
            .same_site(SameSite::Strict)
            .path("/")
            .secure(self.secure_cookie)
            .max_age(time::Duration::ZERO)
            .finish()
    }
}
