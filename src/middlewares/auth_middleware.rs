//! 쿠키 기반 JWT 인증 미들웨어
//!
//! `token` 쿠키의 JWT를 검증하고, 토큰의 사용자가 아직 존재하는지 확인한 뒤
//! [`AuthenticatedUser`](crate::domain::models::auth::AuthenticatedUser)를
//! request extensions에 저장합니다. 실패하면 내부 서비스는 호출되지 않습니다.
//!
//! | 상황 | 응답 |
//! |------|------|
//! | 쿠키 없음 | 401 `You are not logged in` |
//! | 토큰 형식 오류/만료/서명 불일치 | 401 `JWT token error` |
//! | 사용자 삭제됨 | 401 `Unauthorized` |
//! | 역할 부족 | 403 |
//! | 사용자 조회 실패 | 500 |

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::domain::entities::users::UserRole;
use crate::domain::models::auth::RequiredRole;
use crate::middlewares::auth_inner::AuthMiddlewareService;
use crate::services::auth::{TokenService, UserLookup};

/// JWT 인증 미들웨어
#[derive(Clone)]
pub struct AuthMiddleware {
    tokens: Arc<TokenService>,
    users: Arc<dyn UserLookup>,
    /// 접근에 필요한 역할 (선택사항)
    required_role: Option<RequiredRole>,
}

impl AuthMiddleware {
    /// 로그인한 사용자면 누구나 통과하는 미들웨어 생성
    pub fn new(tokens: Arc<TokenService>, users: Arc<dyn UserLookup>) -> Self {
        Self {
            tokens,
            users,
            required_role: None,
        }
    }

    /// 역할 요구사항 추가
    pub fn with_role(mut self, required_role: RequiredRole) -> Self {
        self.required_role = Some(required_role);
        self
    }

    /// 복수 역할 중 하나 요구
    pub fn with_any_role(self, roles: &[UserRole]) -> Self {
        self.with_role(RequiredRole::Any(roles.to_vec()))
    }
}

/// ActixWeb Transform trait 구현
impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            tokens: self.tokens.clone(),
            users: self.users.clone(),
            required_role: self.required_role.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TOKEN_COOKIE_NAME;
    use crate::domain::models::auth::AuthenticatedUser;
    use crate::errors::AppError;
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App, HttpResponse};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    const USER_ID: &str = "65f0c0ffee0000000000beef";

    #[derive(Default)]
    struct InMemoryUsers {
        users: Mutex<HashMap<String, UserRole>>,
    }

    impl InMemoryUsers {
        fn with(user_id: &str, role: UserRole) -> Arc<Self> {
            let users = Self::default();
            users.users.lock().unwrap().insert(user_id.to_string(), role);
            Arc::new(users)
        }

        fn remove(&self, user_id: &str) {
            self.users.lock().unwrap().remove(user_id);
        }
    }

    #[async_trait]
    impl UserLookup for InMemoryUsers {
        async fn find_identity(&self, user_id: &str) -> Result<Option<AuthenticatedUser>, AppError> {
            Ok(self.users.lock().unwrap().get(user_id).map(|role| AuthenticatedUser {
                user_id: user_id.to_string(),
                role: *role,
            }))
        }
    }

    struct BrokenStore;

    #[async_trait]
    impl UserLookup for BrokenStore {
        async fn find_identity(&self, _user_id: &str) -> Result<Option<AuthenticatedUser>, AppError> {
            Err(AppError::DatabaseError("connection reset".to_string()))
        }
    }

    fn tokens() -> Arc<TokenService> {
        Arc::new(TokenService::new("gate-secret", chrono::Duration::hours(1)))
    }

    async fn protected(user: AuthenticatedUser, invoked: web::Data<AtomicBool>) -> HttpResponse {
        invoked.store(true, Ordering::SeqCst);
        HttpResponse::Ok().json(serde_json::json!({ "user_id": user.user_id }))
    }

    macro_rules! gated_app {
        ($gate:expr, $invoked:expr) => {
            test::init_service(
                App::new().app_data($invoked.clone()).service(
                    web::resource("/protected")
                        .wrap($gate)
                        .route(web::get().to(protected)),
                ),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_missing_cookie_is_rejected_before_handler() {
        let invoked = web::Data::new(AtomicBool::new(false));
        let gate = AuthMiddleware::new(tokens(), InMemoryUsers::with(USER_ID, UserRole::Student));
        let app = gated_app!(gate, invoked);

        let res = test::call_service(&app, test::TestRequest::get().uri("/protected").to_request()).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["status"], "fail");
        assert_eq!(body["message"], "You are not logged in");
        assert!(!invoked.load(Ordering::SeqCst));
    }

    #[actix_web::test]
    async fn test_valid_token_reaches_handler() {
        let invoked = web::Data::new(AtomicBool::new(false));
        let tokens = tokens();
        let token = tokens.issue_token(USER_ID).unwrap();
        let gate = AuthMiddleware::new(tokens, InMemoryUsers::with(USER_ID, UserRole::Student));
        let app = gated_app!(gate, invoked);

        let req = test::TestRequest::get()
            .uri("/protected")
            .cookie(Cookie::new(TOKEN_COOKIE_NAME, token))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["user_id"], USER_ID);
        assert!(invoked.load(Ordering::SeqCst));
    }

    #[actix_web::test]
    async fn test_invalid_token_is_rejected() {
        let invoked = web::Data::new(AtomicBool::new(false));
        let gate = AuthMiddleware::new(tokens(), InMemoryUsers::with(USER_ID, UserRole::Student));
        let app = gated_app!(gate, invoked);

        let req = test::TestRequest::get()
            .uri("/protected")
            .cookie(Cookie::new(TOKEN_COOKIE_NAME, "garbage"))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "JWT token error");
        assert!(!invoked.load(Ordering::SeqCst));
    }

    #[actix_web::test]
    async fn test_expired_token_is_rejected() {
        let invoked = web::Data::new(AtomicBool::new(false));
        let expired = TokenService::new("gate-secret", chrono::Duration::seconds(-120))
            .issue_token(USER_ID)
            .unwrap();
        let gate = AuthMiddleware::new(tokens(), InMemoryUsers::with(USER_ID, UserRole::Student));
        let app = gated_app!(gate, invoked);

        let req = test::TestRequest::get()
            .uri("/protected")
            .cookie(Cookie::new(TOKEN_COOKIE_NAME, expired))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(!invoked.load(Ordering::SeqCst));
    }

    #[actix_web::test]
    async fn test_deleted_user_is_unauthorized() {
        let invoked = web::Data::new(AtomicBool::new(false));
        let tokens = tokens();
        let token = tokens.issue_token(USER_ID).unwrap();
        let users = InMemoryUsers::with(USER_ID, UserRole::Student);
        let gate = AuthMiddleware::new(tokens, users.clone());
        let app = gated_app!(gate, invoked);

        users.remove(USER_ID);

        let req = test::TestRequest::get()
            .uri("/protected")
            .cookie(Cookie::new(TOKEN_COOKIE_NAME, token))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "Unauthorized");
        assert!(!invoked.load(Ordering::SeqCst));
    }

    #[actix_web::test]
    async fn test_cleared_cookie_is_treated_as_signed_out() {
        let invoked = web::Data::new(AtomicBool::new(false));
        let tokens = tokens();
        let cleared = tokens.cleared_cookie();
        let gate = AuthMiddleware::new(tokens, InMemoryUsers::with(USER_ID, UserRole::Student));
        let app = gated_app!(gate, invoked);

        let req = test::TestRequest::get()
            .uri("/protected")
            .cookie(cleared)
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(!invoked.load(Ordering::SeqCst));
    }

    #[actix_web::test]
    async fn test_role_requirement_is_enforced() {
        let invoked = web::Data::new(AtomicBool::new(false));
        let tokens = tokens();
        let token = tokens.issue_token(USER_ID).unwrap();
        let gate = AuthMiddleware::new(tokens, InMemoryUsers::with(USER_ID, UserRole::Student))
            .with_any_role(&[UserRole::Instructor, UserRole::Admin]);
        let app = gated_app!(gate, invoked);

        let req = test::TestRequest::get()
            .uri("/protected")
            .cookie(Cookie::new(TOKEN_COOKIE_NAME, token))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        assert!(!invoked.load(Ordering::SeqCst));
    }

    #[actix_web::test]
    async fn test_lookup_failure_is_internal_error() {
        let invoked = web::Data::new(AtomicBool::new(false));
        let tokens = tokens();
        let token = tokens.issue_token(USER_ID).unwrap();
        let gate = AuthMiddleware::new(tokens, Arc::new(BrokenStore));
        let app = gated_app!(gate, invoked);

        let req = test::TestRequest::get()
            .uri("/protected")
            .cookie(Cookie::new(TOKEN_COOKIE_NAME, token))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!invoked.load(Ordering::SeqCst));
    }
}
