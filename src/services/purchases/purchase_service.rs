//! 강좌 구매 서비스
//!
//! 구매는 `pending`으로 생성되고, 완료 처리 시점에 수강 등록이 이루어집니다.
//! 결제 금액은 항상 강좌 가격을 따릅니다.

use std::sync::Arc;

use log::info;

use crate::domain::dto::purchases::{CreatePurchaseRequest, DEFAULT_CURRENCY};
use crate::domain::entities::purchases::{Purchase, PurchaseStatus};
use crate::domain::entities::users::User;
use crate::errors::AppError;
use crate::repositories::courses::CourseRepository;
use crate::repositories::parse_object_id;
use crate::repositories::purchases::PurchaseRepository;
use crate::repositories::users::UserRepository;

pub struct PurchaseService {
    purchases: Arc<PurchaseRepository>,
    courses: Arc<CourseRepository>,
    users: Arc<UserRepository>,
}

impl PurchaseService {
    pub fn new(
        purchases: Arc<PurchaseRepository>,
        courses: Arc<CourseRepository>,
        users: Arc<UserRepository>,
    ) -> Self {
        Self { purchases, courses, users }
    }

    /// 대기 중인 구매 생성
    ///
    /// # Errors
    ///
    /// * `NotFound` - 공개된 강좌가 아님
    /// * `ConflictError` - 이미 수강 중
    pub async fn create(&self, user_id: &str, request: CreatePurchaseRequest) -> Result<Purchase, AppError> {
        let user = self.find_user(user_id).await?;
        let course_id = parse_object_id(&request.course_id, "course")?;

        let course = self
            .courses
            .find_published_by_id(&course_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

        ensure_not_enrolled(&user, &course_id)?;

        let user_object_id = user.id.ok_or_else(user_not_found)?;
        let currency = request
            .currency
            .map(|currency| currency.to_uppercase())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

        let mut purchase = Purchase::pending(
            course_id,
            user_object_id,
            course.price,
            currency,
            request.payment_method,
            request.payment_id,
        );
        purchase.metadata = request.metadata;

        let purchase = self.purchases.create(purchase).await?;

        info!("🧾 구매 생성: course={} user={} amount={}", request.course_id, user_id, purchase.amount);
        Ok(purchase)
    }

    /// 내 구매 기록
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<Purchase>, AppError> {
        let user_id = parse_object_id(user_id, "user")?;

        self.purchases.find_by_user(&user_id).await
    }

    /// 구매 단건. 본인 구매가 아니면 404
    pub async fn get_for_user(&self, user_id: &str, purchase_id: &str) -> Result<Purchase, AppError> {
        let user_id = parse_object_id(user_id, "user")?;
        let purchase_id = parse_object_id(purchase_id, "purchase")?;

        self.purchases
            .find_by_id(&purchase_id)
            .await?
            .filter(|purchase| purchase.belongs_to(&user_id))
            .ok_or_else(purchase_not_found)
    }

    /// 구매 완료 처리 후 강좌와 사용자 양쪽에 수강 등록
    pub async fn complete(&self, user_id: &str, purchase_id: &str) -> Result<Purchase, AppError> {
        let purchase = self.get_for_user(user_id, purchase_id).await?;

        if purchase.status != PurchaseStatus::Pending {
            return Err(AppError::ConflictError(format!(
                "Purchase is already {}",
                purchase.status.as_str()
            )));
        }

        let id = purchase.id.ok_or_else(purchase_not_found)?;

        // 동시에 완료 요청이 들어온 경우 한쪽만 통과
        let completed = self
            .purchases
            .mark_completed(&id)
            .await?
            .ok_or_else(|| AppError::ConflictError("Purchase is no longer pending".to_string()))?;

        self.courses.add_student(&completed.course, &completed.user).await?;
        self.users.add_enrollment(&completed.user, &completed.course).await?;

        info!("🎓 수강 등록 완료: purchase={} user={}", purchase_id, user_id);
        Ok(completed)
    }

    async fn find_user(&self, user_id: &str) -> Result<User, AppError> {
        let id = parse_object_id(user_id, "user")?;

        self.users.find_by_id(&id).await?.ok_or_else(user_not_found)
    }
}

fn user_not_found() -> AppError {
    AppError::NotFound("User not found".to_string())
}

fn purchase_not_found() -> AppError {
    AppError::NotFound("Purchase not found".to_string())
}

fn ensure_not_enrolled(user: &User, course_id: &mongodb::bson::oid::ObjectId) -> Result<(), AppError> {
    if user.is_enrolled_in(course_id) {
        return Err(AppError::ConflictError(
            "You are already enrolled in this course".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::users::{EnrolledCourse, UserRole};
    use mongodb::bson::{oid::ObjectId, DateTime};

    #[test]
    fn test_enrolled_user_cannot_buy_again() {
        let course_id = ObjectId::new();
        let mut user = User::new(
            "Ada".to_string(),
            "ada@example.com".to_string(),
            "hash".to_string(),
            UserRole::Student,
        );

        assert!(ensure_not_enrolled(&user, &course_id).is_ok());

        user.enrolled_courses.push(EnrolledCourse {
            course: course_id,
            enrolled_at: DateTime::now(),
        });

        match ensure_not_enrolled(&user, &course_id) {
            Err(AppError::ConflictError(message)) => {
                assert_eq!(message, "You are already enrolled in this course")
            }
            other => panic!("Expected ConflictError, got {:?}", other),
        }
    }
}
