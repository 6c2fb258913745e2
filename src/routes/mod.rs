//! API 라우트 설정 모듈
//!
//! RESTful API 엔드포인트들을 기능별로 그룹화하여 등록합니다.
//!
//! # Auth Middleware Usage
//!
//! 인증 게이트는 [`AppState::gate`]로 만들고, 라우트에 따라 다른 레벨을 적용합니다.
//!
//! ## 인증 불필요 (Public 라우트)
//! ```rust,ignore
//! cfg.service(
//!     web::scope("/v1/courses")
//!         .route("", web::get().to(handlers::courses::list_published))
//! );
//! ```
//!
//! ## 인증 필요 + 역할 기반 권한 검증
//! ```rust,ignore
//! cfg.service(
//!     web::scope("/v1/instructor/courses")
//!         .wrap(state.gate().with_any_role(&[UserRole::Instructor, UserRole::Admin]))
//! );
//! ```

use actix_web::error::JsonPayloadError;
use actix_web::{web, HttpRequest, HttpResponse, Scope};
use serde_json::json;

use crate::config::ServerConfig;
use crate::domain::entities::users::UserRole;
use crate::errors::AppError;
use crate::handlers;
use crate::state::AppState;

/// 모든 라우트를 설정합니다
///
/// 헬스체크는 루트에, 나머지는 [`api_scope`] 아래에 등록됩니다.
///
/// # Examples
///
/// ```rust,ignore
/// use actix_web::{web, App};
///
/// let app = App::new().configure(|cfg| configure_all_routes(cfg, &state));
/// ```
pub fn configure_all_routes(cfg: &mut web::ServiceConfig, state: &AppState) {
    cfg.service(handlers::health::health_check);
    cfg.service(api_scope(state));
}

/// `/api` 스코프
///
/// 속도 제한처럼 API에만 적용할 미들웨어는 호출자가 이 스코프에 씌웁니다.
pub fn api_scope(state: &AppState) -> Scope {
    web::scope("/api").configure(|cfg| {
        configure_user_routes(cfg, state);
        configure_course_routes(cfg);
        configure_instructor_routes(cfg, state);
        configure_purchase_routes(cfg, state);
    })
}

/// 사용자 계정 라우트
///
/// - `POST /api/v1/users/signup`, `/signin`, `/signout` - 공개
/// - `GET /api/v1/users/profile` - 인증 필요
fn configure_user_routes(cfg: &mut web::ServiceConfig, state: &AppState) {
    cfg.service(
        web::scope("/v1/users")
            .service(handlers::users::signup)
            .service(handlers::users::signin)
            .service(handlers::users::signout)
            .service(
                web::resource("/profile")
                    .wrap(state.gate())
                    .route(web::get().to(handlers::users::profile)),
            ),
    );
}

/// 공개 강좌 조회 라우트
fn configure_course_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/v1/courses")
            .route("", web::get().to(handlers::courses::list_published))
            .route("/{course_id}", web::get().to(handlers::courses::get_published)),
    );
}

/// 강사용 강좌 관리 라우트 (instructor 또는 admin)
fn configure_instructor_routes(cfg: &mut web::ServiceConfig, state: &AppState) {
    cfg.service(
        web::scope("/v1/instructor/courses")
            .wrap(state.gate().with_any_role(&[UserRole::Instructor, UserRole::Admin]))
            .service(
                web::resource("")
                    .route(web::get().to(handlers::courses::list_own_courses))
                    .route(web::post().to(handlers::courses::create_course)),
            )
            .service(
                web::resource("/{course_id}")
                    .route(web::patch().to(handlers::courses::update_course))
                    .route(web::delete().to(handlers::courses::delete_course)),
            )
            .service(
                web::resource("/{course_id}/lectures")
                    .route(web::get().to(handlers::courses::list_lectures))
                    .route(web::post().to(handlers::courses::add_lecture)),
            ),
    );
}

/// 구매 라우트 (로그인 필요)
fn configure_purchase_routes(cfg: &mut web::ServiceConfig, state: &AppState) {
    cfg.service(
        web::scope("/v1/purchases")
            .wrap(state.gate())
            .service(handlers::purchases::create_purchase)
            .service(handlers::purchases::list_purchases)
            .service(handlers::purchases::get_purchase)
            .service(handlers::purchases::complete_purchase),
    );
}

/// JSON 본문 추출 설정
///
/// 본문은 10 KiB로 제한되며, 파싱 실패는 공통 에러 형식으로 응답합니다.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(ServerConfig::JSON_BODY_LIMIT)
        .error_handler(|err, _req| {
            let message = match &err {
                JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
                    "Request body is too large".to_string()
                }
                JsonPayloadError::ContentType => "Content type must be application/json".to_string(),
                other => format!("Invalid JSON payload: {}", other),
            };

            AppError::ValidationError(message).into()
        })
}

/// 등록되지 않은 경로에 대한 JSON 404 응답
pub async fn not_found(req: HttpRequest) -> HttpResponse {
    log::debug!("라우트 없음: {} {}", req.method(), req.path());

    HttpResponse::NotFound().json(json!({
        "status": "error",
        "message": "Route not found !!",
    }))
}
