//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! 모든 핸들러 레벨 실패는 [`AppError`] 하나로 모입니다.
//! `actix_web::ResponseError` 구현이 상태 코드와 에러 응답 형식을 결정하며,
//! 운영 에러(operational)와 예상치 못한 내부 에러를 구분합니다.
//!
//! ## 응답 형식
//!
//! ```json
//! { "status": "fail", "message": "You are not logged in" }
//! ```
//!
//! - 4xx 응답은 `status: "fail"`, 5xx 응답은 `status: "error"`
//! - 내부 에러 메시지는 개발 환경이 아니면 `"Internal Server Error"`로 가려집니다
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::AppError;
//!
//! async fn find_course(id: &str) -> Result<Course, AppError> {
//!     repo.find_by_id(id)
//!         .await?
//!         .ok_or_else(|| AppError::NotFound("Course not found".to_string()))
//! }
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;
use crate::config::Environment;

/// 예상치 못한 에러를 외부에 노출할 때 사용하는 고정 메시지
pub const MASKED_ERROR_MESSAGE: &str = "Internal Server Error";

/// 애플리케이션 전역 에러 타입
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("{0}")]
    ValidationError(String),

    /// 리소스 찾을 수 없음 에러 (404 Not Found)
    #[error("{0}")]
    NotFound(String),

    /// 충돌/중복 에러 (409 Conflict)
    #[error("{0}")]
    ConflictError(String),

    /// 자격 증명 누락 또는 검증 실패 (401 Unauthorized)
    #[error("{0}")]
    AuthenticationError(String),

    /// 자격 증명은 유효하지만 대상 사용자가 더 이상 없음 (401 Unauthorized)
    #[error("{0}")]
    Unauthorized(String),

    /// 권한 부족 에러 (403 Forbidden)
    #[error("{0}")]
    Forbidden(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

/// 에러 응답 본문
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// 4xx는 `fail`, 5xx는 `error`
    pub status: &'static str,
    pub message: String,
    /// 개발 환경에서만 채워지는 내부 상세 정보
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl AppError {
    /// 운영 에러 여부
    ///
    /// 운영 에러는 사용자에게 보여줄 메시지와 상태 코드가 정해진 실패입니다.
    /// 그 외(데이터베이스, 내부 에러)는 예상치 못한 장애로 취급합니다.
    pub fn is_operational(&self) -> bool {
        !matches!(self, AppError::DatabaseError(_) | AppError::InternalError(_))
    }

    /// 응답 본문을 생성합니다.
    ///
    /// # Arguments
    ///
    /// * `expose_internal` - 예상치 못한 에러의 원본 메시지를 노출할지 여부
    pub fn to_body(&self, expose_internal: bool) -> ErrorBody {
        let status = if self.status_code().is_client_error() { "fail" } else { "error" };

        if self.is_operational() {
            return ErrorBody {
                status,
                message: self.to_string(),
                detail: None,
            };
        }

        ErrorBody {
            status,
            message: MASKED_ERROR_MESSAGE.to_string(),
            detail: expose_internal.then(|| self.to_string()),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::AuthenticationError(_) | AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::DatabaseError(_) | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 예상치 못한 에러는 여기서 한 번 로깅됩니다.
    fn error_response(&self) -> HttpResponse {
        let development = Environment::current().is_development();

        if !self.is_operational() {
            log::error!("💥 처리되지 않은 에러: {}", self);
        }

        HttpResponse::build(self.status_code()).json(self.to_body(development))
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(e: mongodb::error::Error) -> Self {
        AppError::DatabaseError(e.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::ValidationError(e.to_string())
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("Email is required".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_authentication_errors_are_unauthorized() {
        let missing = AppError::AuthenticationError("You are not logged in".to_string());
        let gone = AppError::Unauthorized("Unauthorized".to_string());

        assert_eq!(missing.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(gone.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_forbidden_and_not_found_status() {
        assert_eq!(AppError::Forbidden("no".to_string()).status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::NotFound("gone".to_string()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::ConflictError("dup".to_string()).status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_client_errors_use_fail_status() {
        let body = AppError::NotFound("Course not found".to_string()).to_body(false);

        assert_eq!(body.status, "fail");
        assert_eq!(body.message, "Course not found");
        assert!(body.detail.is_none());
    }

    #[test]
    fn test_internal_errors_are_masked_outside_development() {
        let error = AppError::DatabaseError("connection reset by peer".to_string());

        let masked = error.to_body(false);
        assert_eq!(masked.status, "error");
        assert_eq!(masked.message, MASKED_ERROR_MESSAGE);
        assert!(masked.detail.is_none());

        let exposed = error.to_body(true);
        assert_eq!(exposed.message, MASKED_ERROR_MESSAGE);
        assert!(exposed.detail.unwrap().contains("connection reset by peer"));
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("Additional context");

        match app_result {
            Err(AppError::InternalError(msg)) => {
                assert!(msg.contains("Additional context"));
                assert!(msg.contains("original error"));
            }
            other => panic!("Expected InternalError, got {:?}", other),
        }
    }
}
