//! AuthMiddleware 인증 로직의 핵심적인 기능
use std::rc::Rc;
use std::sync::Arc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;

use crate::config::TOKEN_COOKIE_NAME;
use crate::domain::models::auth::{AuthenticatedUser, RequiredRole};
use crate::errors::AppError;
use crate::services::auth::{TokenService, UserLookup};

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub tokens: Arc<TokenService>,
    pub users: Arc<dyn UserLookup>,
    pub required_role: Option<RequiredRole>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let tokens = self.tokens.clone();
        let users = self.users.clone();
        let required_role = self.required_role.clone();

        Box::pin(async move {
            match authenticate(&req, &tokens, users.as_ref(), required_role.as_ref()).await {
                Ok(user) => {
                    log::debug!("인증 성공: 사용자 ID {}", user.user_id);
                    req.extensions_mut().insert(user);

                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(err) => {
                    log::warn!("인증 실패 [{}]: {}", req.path(), err);

                    let response = err.error_response();
                    let (req, _) = req.into_parts();
                    Ok(ServiceResponse::new(req, response).map_into_right_body())
                }
            }
        })
    }
}

/// 쿠키의 토큰을 검증하고 현재 사용자를 확인합니다.
///
/// 검사 순서: 쿠키 존재 → 토큰 검증 → 사용자 존재 → 역할
async fn authenticate(
    req: &ServiceRequest,
    tokens: &TokenService,
    users: &dyn UserLookup,
    required_role: Option<&RequiredRole>,
) -> Result<AuthenticatedUser, AppError> {
    let token = req
        .cookie(TOKEN_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::AuthenticationError("You are not logged in".to_string()))?;

    let claims = tokens.verify_token(&token)?;

    let user = users
        .find_identity(&claims.sub)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string()))?;

    if let Some(required) = required_role {
        if !required.is_satisfied(user.role) {
            log::warn!(
                "권한 부족: 사용자 ID {} ({:?}), 필요 권한: {:?}",
                user.user_id, user.role, required
            );
            return Err(AppError::Forbidden(
                "You do not have permission to perform this action".to_string(),
            ));
        }
    }

    Ok(user)
}
