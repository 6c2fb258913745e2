//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 각 리포지토리는 `Arc<DatabaseManager>`를 주입받아 요청 시점의 연결 핸들로
//! 컬렉션에 접근합니다. 연결이 끊겨 있으면 `AppError::DatabaseError`를 돌려줍니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::users::UserRepository;
//!
//! let user_repo = UserRepository::new(db.clone());
//! let user = user_repo.find_by_email("user@example.com").await?;
//! ```

use log::info;
use mongodb::bson::oid::ObjectId;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::Collection;

use crate::db::DatabaseManager;
use crate::errors::AppError;

pub mod courses;
pub mod lectures;
pub mod purchases;
pub mod users;

/// 현재 연결에서 컬렉션 핸들을 가져옵니다.
pub(crate) fn collection<T: Send + Sync>(
    db: &DatabaseManager,
    name: &str,
) -> Result<Collection<T>, AppError> {
    db.database()
        .map(|database| database.collection::<T>(name))
        .ok_or_else(|| AppError::DatabaseError("database is not connected".to_string()))
}

/// 경로 파라미터 등의 ID 문자열을 ObjectId로 변환합니다.
pub fn parse_object_id(id: &str, label: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::ValidationError(format!("Invalid {} id", label)))
}

/// 유니크 인덱스 위반(E11000) 여부
pub(crate) fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    matches!(
        *error.kind,
        ErrorKind::Write(WriteFailure::WriteError(ref write_error)) if write_error.code == 11000
    )
}

/// 모든 컬렉션의 인덱스를 생성합니다.
///
/// 이미 존재하는 인덱스는 MongoDB가 무시하므로 기동할 때마다 호출해도 안전합니다.
pub async fn init_indexes(
    users: &users::UserRepository,
    courses: &courses::CourseRepository,
    lectures: &lectures::LectureRepository,
    purchases: &purchases::PurchaseRepository,
) -> Result<(), AppError> {
    users.create_indexes().await?;
    courses.create_indexes().await?;
    lectures.create_indexes().await?;
    purchases.create_indexes().await?;

    info!("📇 MongoDB 인덱스 준비 완료");
    Ok(())
}
