//! 강좌 리포지토리 (`courses` 컬렉션)

use std::sync::Arc;

use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, DateTime, Document};
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Collection, IndexModel};

use crate::db::DatabaseManager;
use crate::domain::entities::courses::Course;
use crate::errors::AppError;
use crate::repositories::collection;

pub struct CourseRepository {
    db: Arc<DatabaseManager>,
}

impl CourseRepository {
    pub const COLLECTION: &'static str = "courses";

    pub fn new(db: Arc<DatabaseManager>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Result<Collection<Course>, AppError> {
        collection(&self.db, Self::COLLECTION)
    }

    pub async fn create(&self, mut course: Course) -> Result<Course, AppError> {
        let result = self.collection()?.insert_one(&course).await?;

        course.id = result.inserted_id.as_object_id();
        Ok(course)
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Course>, AppError> {
        Ok(self.collection()?.find_one(doc! { "_id": *id }).await?)
    }

    /// 공개된 강좌만 조회
    pub async fn find_published_by_id(&self, id: &ObjectId) -> Result<Option<Course>, AppError> {
        Ok(self
            .collection()?
            .find_one(doc! { "_id": *id, "is_published": true })
            .await?)
    }

    /// 공개된 강좌 목록 (최신순)
    pub async fn find_published(&self) -> Result<Vec<Course>, AppError> {
        let cursor = self
            .collection()?
            .find(doc! { "is_published": true })
            .sort(doc! { "created_at": -1 })
            .await?;

        Ok(cursor.try_collect().await?)
    }

    /// 강사가 만든 강좌 목록 (공개 여부 무관, 최신순)
    pub async fn find_by_instructor(&self, instructor: &ObjectId) -> Result<Vec<Course>, AppError> {
        let cursor = self
            .collection()?
            .find(doc! { "instructor": *instructor })
            .sort(doc! { "created_at": -1 })
            .await?;

        Ok(cursor.try_collect().await?)
    }

    /// 여러 강좌를 한 번에 조회 (프로필의 수강 목록 채우기용)
    pub async fn find_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<Course>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let cursor = self
            .collection()?
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .await?;

        Ok(cursor.try_collect().await?)
    }

    /// 변경할 필드만 `$set`으로 갱신하고 갱신된 문서를 돌려줍니다.
    pub async fn update(&self, id: &ObjectId, mut changes: Document) -> Result<Option<Course>, AppError> {
        changes.insert("updated_at", DateTime::now());

        Ok(self
            .collection()?
            .find_one_and_update(doc! { "_id": *id }, doc! { "$set": changes })
            .return_document(ReturnDocument::After)
            .await?)
    }

    pub async fn delete(&self, id: &ObjectId) -> Result<bool, AppError> {
        let result = self.collection()?.delete_one(doc! { "_id": *id }).await?;

        Ok(result.deleted_count > 0)
    }

    /// 강의 추가에 따라 강의 목록과 합계를 갱신합니다.
    pub async fn attach_lecture(
        &self,
        course_id: &ObjectId,
        lecture_id: &ObjectId,
        duration: f64,
    ) -> Result<Option<Course>, AppError> {
        Ok(self
            .collection()?
            .find_one_and_update(
                doc! { "_id": *course_id },
                doc! {
                    "$push": { "lectures": *lecture_id },
                    "$inc": { "total_lectures": 1, "total_duration": duration },
                    "$set": { "updated_at": DateTime::now() },
                },
            )
            .return_document(ReturnDocument::After)
            .await?)
    }

    /// 수강생 추가 (중복 없음)
    pub async fn add_student(&self, course_id: &ObjectId, user_id: &ObjectId) -> Result<(), AppError> {
        self.collection()?
            .update_one(
                doc! { "_id": *course_id },
                doc! { "$addToSet": { "enrolled_students": *user_id } },
            )
            .await?;

        Ok(())
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let instructor_index = IndexModel::builder()
            .keys(doc! { "instructor": 1, "created_at": -1 })
            .options(IndexOptions::builder()
                .name("instructor_created_at".to_string())
                .build())
            .build();

        let published_index = IndexModel::builder()
            .keys(doc! { "is_published": 1, "created_at": -1 })
            .options(IndexOptions::builder()
                .name("published_created_at".to_string())
                .build())
            .build();

        self.collection()?
            .create_indexes([instructor_index, published_index])
            .await?;

        Ok(())
    }
}
