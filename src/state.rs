//! 핸들러가 공유하는 애플리케이션 상태
//!
//! `main`에서 한 번 조립되어 `web::Data<AppState>`로 모든 워커에 공유됩니다.
//! 연결 관리자, 리포지토리, 서비스가 모두 명시적으로 주입됩니다.

use std::sync::Arc;

use crate::db::DatabaseManager;
use crate::errors::AppError;
use crate::middlewares::AuthMiddleware;
use crate::repositories::courses::CourseRepository;
use crate::repositories::lectures::LectureRepository;
use crate::repositories::purchases::PurchaseRepository;
use crate::repositories::users::UserRepository;
use crate::repositories::init_indexes;
use crate::services::auth::{TokenService, UserLookup};
use crate::services::courses::CourseService;
use crate::services::purchases::PurchaseService;
use crate::services::users::UserService;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseManager>,
    pub tokens: Arc<TokenService>,
    pub users: Arc<UserService>,
    pub courses: Arc<CourseService>,
    pub purchases: Arc<PurchaseService>,
    user_repo: Arc<UserRepository>,
    course_repo: Arc<CourseRepository>,
    lecture_repo: Arc<LectureRepository>,
    purchase_repo: Arc<PurchaseRepository>,
}

impl AppState {
    /// 연결 관리자와 토큰 서비스로 리포지토리와 서비스를 조립합니다.
    pub fn new(db: Arc<DatabaseManager>, tokens: Arc<TokenService>) -> Self {
        let user_repo = Arc::new(UserRepository::new(db.clone()));
        let course_repo = Arc::new(CourseRepository::new(db.clone()));
        let lecture_repo = Arc::new(LectureRepository::new(db.clone()));
        let purchase_repo = Arc::new(PurchaseRepository::new(db.clone()));

        let users = Arc::new(UserService::new(user_repo.clone(), course_repo.clone()));
        let courses = Arc::new(CourseService::new(
            course_repo.clone(),
            lecture_repo.clone(),
            user_repo.clone(),
        ));
        let purchases = Arc::new(PurchaseService::new(
            purchase_repo.clone(),
            course_repo.clone(),
            user_repo.clone(),
        ));

        Self {
            db,
            tokens,
            users,
            courses,
            purchases,
            user_repo,
            course_repo,
            lecture_repo,
            purchase_repo,
        }
    }

    /// 인증 게이트가 사용하는 사용자 조회 구현
    pub fn user_lookup(&self) -> Arc<dyn UserLookup> {
        self.user_repo.clone()
    }

    /// 로그인만 요구하는 인증 게이트
    pub fn gate(&self) -> AuthMiddleware {
        AuthMiddleware::new(self.tokens.clone(), self.user_lookup())
    }

    pub async fn init_indexes(&self) -> Result<(), AppError> {
        init_indexes(
            &self.user_repo,
            &self.course_repo,
            &self.lecture_repo,
            &self.purchase_repo,
        )
        .await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::db::{DatabaseSettings, MongoConnector, RetryPolicy};

    /// 연결되지 않은 데이터베이스를 가진 테스트용 상태
    pub(crate) fn disconnected_state() -> AppState {
        let db = Arc::new(DatabaseManager::new(
            MongoConnector::new(),
            DatabaseSettings::with_uri("mongodb://127.0.0.1:27017/lms_test"),
            RetryPolicy::default(),
        ));
        let tokens = Arc::new(TokenService::new("state-secret", chrono::Duration::hours(1)));

        AppState::new(db, tokens)
    }

    #[test]
    fn test_state_starts_disconnected() {
        let state = disconnected_state();

        assert!(!state.db.status().is_connected);
        assert!(state.db.database().is_none());
    }
}
