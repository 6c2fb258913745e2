//! 강좌 구매 리포지토리 (`course_purchases` 컬렉션)

use std::sync::Arc;

use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, DateTime};
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Collection, IndexModel};

use crate::db::DatabaseManager;
use crate::domain::entities::purchases::Purchase;
use crate::errors::AppError;
use crate::repositories::collection;

pub struct PurchaseRepository {
    db: Arc<DatabaseManager>,
}

impl PurchaseRepository {
    pub const COLLECTION: &'static str = "course_purchases";

    pub fn new(db: Arc<DatabaseManager>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Result<Collection<Purchase>, AppError> {
        collection(&self.db, Self::COLLECTION)
    }

    pub async fn create(&self, mut purchase: Purchase) -> Result<Purchase, AppError> {
        let result = self.collection()?.insert_one(&purchase).await?;

        purchase.id = result.inserted_id.as_object_id();
        Ok(purchase)
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Purchase>, AppError> {
        Ok(self.collection()?.find_one(doc! { "_id": *id }).await?)
    }

    /// 사용자의 구매 기록 (최신순)
    pub async fn find_by_user(&self, user_id: &ObjectId) -> Result<Vec<Purchase>, AppError> {
        let cursor = self
            .collection()?
            .find(doc! { "user": *user_id })
            .sort(doc! { "created_at": -1 })
            .await?;

        Ok(cursor.try_collect().await?)
    }

    /// 대기 중인 구매를 완료 상태로 바꿉니다.
    ///
    /// 이미 완료되었거나 다른 상태면 `None`을 돌려줍니다.
    pub async fn mark_completed(&self, id: &ObjectId) -> Result<Option<Purchase>, AppError> {
        Ok(self
            .collection()?
            .find_one_and_update(
                doc! { "_id": *id, "status": "pending" },
                doc! { "$set": { "status": "completed", "updated_at": DateTime::now() } },
            )
            .return_document(ReturnDocument::After)
            .await?)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let user_course_index = IndexModel::builder()
            .keys(doc! { "user": 1, "course": 1 })
            .options(IndexOptions::builder()
                .name("user_course".to_string())
                .build())
            .build();

        let status_index = IndexModel::builder()
            .keys(doc! { "status": 1 })
            .options(IndexOptions::builder()
                .name("status".to_string())
                .build())
            .build();

        self.collection()?
            .create_indexes([user_course_index, status_index])
            .await?;

        Ok(())
    }
}
