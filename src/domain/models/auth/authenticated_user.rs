use std::future::{ready, Ready};

use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::domain::entities::users::UserRole;
use crate::errors::AppError;

/// 인증 게이트를 통과한 요청의 사용자 정보
///
/// 토큰 검증과 사용자 존재 확인이 모두 끝난 뒤에만 request extensions에 저장됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// 사용자 고유 ID (ObjectId 16진수 문자열)
    pub user_id: String,

    /// 조회 시점의 사용자 역할
    pub role: UserRole,
}

impl AuthenticatedUser {
    pub fn has_role(&self, role: UserRole) -> bool {
        self.role == role
    }

    /// 여러 역할 중 하나라도 보유하고 있는지 확인
    pub fn has_any_role(&self, roles: &[UserRole]) -> bool {
        roles.contains(&self.role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(UserRole::Admin)
    }
}

/// ActixWeb FromRequest trait 구현
///
/// 게이트가 적용되지 않은 라우트에서 사용하면 401을 반환합니다.
impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(
                AppError::AuthenticationError("You are not logged in".to_string()).into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticated_user_roles() {
        let instructor = AuthenticatedUser {
            user_id: "65f0c0ffee0000000000beef".to_string(),
            role: UserRole::Instructor,
        };

        assert!(instructor.has_role(UserRole::Instructor));
        assert!(instructor.has_any_role(&[UserRole::Admin, UserRole::Instructor]));
        assert!(!instructor.has_any_role(&[UserRole::Admin]));
        assert!(!instructor.is_admin());
    }
}
