//! # 사용자 계정 HTTP 핸들러
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `POST` | `/api/v1/users/signup` | 회원 가입 후 쿠키 발급 | 201 Created |
//! | `POST` | `/api/v1/users/signin` | 로그인 후 쿠키 발급 | 200 OK |
//! | `POST` | `/api/v1/users/signout` | 쿠키 삭제 | 200 OK |
//! | `GET` | `/api/v1/users/profile` | 내 프로필 (인증 필요) | 200 OK |
//!
//! 토큰은 응답 본문이 아니라 HttpOnly `token` 쿠키로만 전달됩니다.

use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::domain::dto::common::ApiResponse;
use crate::domain::dto::users::{CreateUserRequest, LoginRequest, UserResponse};
use crate::domain::entities::users::User;
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::state::AppState;

#[post("/signup")]
pub async fn signup(
    state: web::Data<AppState>,
    payload: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let user = state.users.signup(payload.into_inner()).await?;

    session_response(&state, user, "User created successfully", HttpResponse::Created())
}

#[post("/signin")]
pub async fn signin(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let user = state.users.signin(payload.into_inner()).await?;
    let message = format!("Welcome back {}", user.name);

    session_response(&state, user, message, HttpResponse::Ok())
}

#[post("/signout")]
pub async fn signout(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok()
        .cookie(state.tokens.cleared_cookie())
        .json(ApiResponse::message("Signed out successfully"))
}

/// 인증 게이트 뒤에서만 등록됩니다.
pub async fn profile(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let profile = state.users.profile(&user.user_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::data(profile)))
}

/// 토큰을 발급해 쿠키로 내려주는 공통 응답
fn session_response(
    state: &AppState,
    user: User,
    message: impl Into<String>,
    mut builder: actix_web::HttpResponseBuilder,
) -> Result<HttpResponse, AppError> {
    let user_id = user
        .id_string()
        .ok_or_else(|| AppError::InternalError("user has no id".to_string()))?;
    let token = state.tokens.issue_token(&user_id)?;

    Ok(builder
        .cookie(state.tokens.session_cookie(token))
        .json(ApiResponse::with_message(message, UserResponse::from(user))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TOKEN_COOKIE_NAME;
    use crate::state::tests::disconnected_state;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_signout_clears_cookie() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(disconnected_state()))
                .service(web::scope("/api/v1/users").service(signout)),
        )
        .await;

        let req = test::TestRequest::post().uri("/api/v1/users/signout").to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);

        let cookie = res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == TOKEN_COOKIE_NAME)
            .expect("token cookie should be set");
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(actix_web::cookie::time::Duration::ZERO));

        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Signed out successfully");
    }

    #[actix_web::test]
    async fn test_signup_validation_runs_before_database() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(disconnected_state()))
                .service(web::scope("/api/v1/users").service(signup)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/users/signup")
            .set_json(serde_json::json!({
                "name": "Ada",
                "email": "not-an-email",
                "password": "correct-horse"
            }))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["status"], "fail");
    }

    #[actix_web::test]
    async fn test_signin_without_database_is_masked_server_error() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(disconnected_state()))
                .service(web::scope("/api/v1/users").service(signin)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/users/signin")
            .set_json(serde_json::json!({ "email": "ada@example.com", "password": "secret" }))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["status"], "error");
    }
}
