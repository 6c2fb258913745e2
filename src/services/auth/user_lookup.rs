//! 인증 게이트가 사용하는 사용자 조회 인터페이스

use async_trait::async_trait;

use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::AppError;

/// 토큰의 사용자 ID로 현재 사용자를 찾는 조회기
///
/// 게이트는 저장소 구현을 모르고 이 trait만 의존합니다.
#[async_trait]
pub trait UserLookup: Send + Sync {
    /// 사용자 ID로 인증 정보를 조회합니다.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(_))` - 사용자가 존재
    /// * `Ok(None)` - 사용자가 삭제되었거나 ID 형식이 잘못됨
    /// * `Err(_)` - 조회 자체가 실패
    async fn find_identity(&self, user_id: &str) -> Result<Option<AuthenticatedUser>, AppError>;
}
