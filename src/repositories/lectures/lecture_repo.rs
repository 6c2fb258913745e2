//! 강의 리포지토리 (`lectures` 컬렉션)

use std::sync::Arc;

use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::IndexOptions;
use mongodb::{Collection, IndexModel};

use crate::db::DatabaseManager;
use crate::domain::entities::lectures::Lecture;
use crate::errors::AppError;
use crate::repositories::collection;

pub struct LectureRepository {
    db: Arc<DatabaseManager>,
}

impl LectureRepository {
    pub const COLLECTION: &'static str = "lectures";

    pub fn new(db: Arc<DatabaseManager>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Result<Collection<Lecture>, AppError> {
        collection(&self.db, Self::COLLECTION)
    }

    pub async fn create(&self, mut lecture: Lecture) -> Result<Lecture, AppError> {
        let result = self.collection()?.insert_one(&lecture).await?;

        lecture.id = result.inserted_id.as_object_id();
        Ok(lecture)
    }

    /// 강좌의 강의 목록 (`order` 오름차순)
    pub async fn find_by_course(&self, course_id: &ObjectId) -> Result<Vec<Lecture>, AppError> {
        let cursor = self
            .collection()?
            .find(doc! { "course": *course_id })
            .sort(doc! { "order": 1 })
            .await?;

        Ok(cursor.try_collect().await?)
    }

    /// 강좌 삭제 시 소속 강의를 모두 삭제합니다.
    pub async fn delete_by_course(&self, course_id: &ObjectId) -> Result<u64, AppError> {
        let result = self
            .collection()?
            .delete_many(doc! { "course": *course_id })
            .await?;

        Ok(result.deleted_count)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let course_order_index = IndexModel::builder()
            .keys(doc! { "course": 1, "order": 1 })
            .options(IndexOptions::builder()
                .name("course_order".to_string())
                .build())
            .build();

        self.collection()?.create_index(course_order_index).await?;

        Ok(())
    }
}
