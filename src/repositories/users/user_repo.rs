//! # 사용자 리포지토리 구현
//!
//! `users` 컬렉션의 데이터 액세스를 담당합니다.
//!
//! ## 인덱스
//!
//! - `email_unique`: 이메일 유니크
//! - `created_at_desc`: 가입일 역순

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId, DateTime};
use mongodb::options::IndexOptions;
use mongodb::{Collection, IndexModel};

use crate::db::DatabaseManager;
use crate::domain::entities::users::User;
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::repositories::{collection, is_duplicate_key};
use crate::services::auth::UserLookup;

/// 사용자 데이터 액세스 리포지토리
///
/// ## 에러 처리
///
/// - **DatabaseError**: 연결 끊김, 쿼리 실행 오류
/// - **ValidationError**: 이메일 중복 (가입 경합으로 유니크 인덱스에 걸린 경우)
pub struct UserRepository {
    db: Arc<DatabaseManager>,
}

impl UserRepository {
    pub const COLLECTION: &'static str = "users";

    pub fn new(db: Arc<DatabaseManager>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Result<Collection<User>, AppError> {
        collection(&self.db, Self::COLLECTION)
    }

    /// 이메일 주소로 사용자 조회
    ///
    /// # 인자
    ///
    /// * `email` - 소문자로 정규화된 이메일 주소
    ///
    /// # 반환값
    ///
    /// * `Ok(Some(User))` - 사용자를 찾은 경우
    /// * `Ok(None)` - 해당 이메일의 사용자가 없는 경우
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.collection()?.find_one(doc! { "email": email }).await?)
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, AppError> {
        Ok(self.collection()?.find_one(doc! { "_id": *id }).await?)
    }

    /// 새 사용자 저장
    ///
    /// 유니크 인덱스 위반은 `"User already exists"` 검증 에러로 변환됩니다.
    pub async fn create(&self, mut user: User) -> Result<User, AppError> {
        let result = self
            .collection()?
            .insert_one(&user)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    AppError::ValidationError("User already exists".to_string())
                } else {
                    AppError::from(e)
                }
            })?;

        user.id = result.inserted_id.as_object_id();
        Ok(user)
    }

    /// 마지막 활동 시각 갱신
    pub async fn touch_last_active(&self, id: &ObjectId) -> Result<(), AppError> {
        self.collection()?
            .update_one(
                doc! { "_id": *id },
                doc! { "$set": { "last_active": DateTime::now() } },
            )
            .await?;

        Ok(())
    }

    /// 수강 등록 기록 추가
    ///
    /// 이미 등록된 강좌면 아무것도 바꾸지 않습니다.
    pub async fn add_enrollment(&self, user_id: &ObjectId, course_id: &ObjectId) -> Result<(), AppError> {
        let now = DateTime::now();

        self.collection()?
            .update_one(
                doc! { "_id": *user_id, "enrolled_courses.course": { "$ne": *course_id } },
                doc! {
                    "$push": { "enrolled_courses": { "course": *course_id, "enrolled_at": now } },
                    "$set": { "updated_at": now },
                },
            )
            .await?;

        Ok(())
    }

    /// 강사가 만든 강좌 기록
    pub async fn add_created_course(&self, user_id: &ObjectId, course_id: &ObjectId) -> Result<(), AppError> {
        self.collection()?
            .update_one(
                doc! { "_id": *user_id },
                doc! {
                    "$addToSet": { "created_courses": *course_id },
                    "$set": { "updated_at": DateTime::now() },
                },
            )
            .await?;

        Ok(())
    }

    pub async fn remove_created_course(&self, user_id: &ObjectId, course_id: &ObjectId) -> Result<(), AppError> {
        self.collection()?
            .update_one(
                doc! { "_id": *user_id },
                doc! { "$pull": { "created_courses": *course_id } },
            )
            .await?;

        Ok(())
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        self.collection()?
            .create_indexes([email_index, created_at_index])
            .await?;

        Ok(())
    }
}

#[async_trait]
impl UserLookup for UserRepository {
    async fn find_identity(&self, user_id: &str) -> Result<Option<AuthenticatedUser>, AppError> {
        // 형식이 맞지 않는 ID는 존재하지 않는 사용자와 같게 취급
        let Ok(object_id) = ObjectId::parse_str(user_id) else {
            return Ok(None);
        };

        Ok(self.find_by_id(&object_id).await?.map(|user| AuthenticatedUser {
            user_id: user_id.to_string(),
            role: user.role,
        }))
    }
}
