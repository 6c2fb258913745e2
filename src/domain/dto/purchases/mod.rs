//! 강좌 구매 요청/응답 DTO

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::dto::common::to_utc;
use crate::domain::entities::purchases::{Purchase, PurchaseStatus};

/// 통화를 지정하지 않은 구매 요청의 기본 통화
pub const DEFAULT_CURRENCY: &str = "USD";

/// 구매 생성 요청
///
/// 결제 금액은 요청이 아닌 강좌 가격에서 결정됩니다.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePurchaseRequest {
    #[validate(length(equal = 24, message = "Invalid course id"))]
    pub course_id: String,

    #[validate(length(min = 1, message = "Payment method is required"))]
    pub payment_method: String,

    #[validate(length(min = 1, message = "Payment ID is required"))]
    pub payment_id: String,

    #[validate(length(equal = 3, message = "Currency must be a 3-letter code"))]
    pub currency: Option<String>,

    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PurchaseResponse {
    pub id: String,
    pub course: String,
    pub user: String,
    pub amount: f64,
    pub currency: String,
    pub status: PurchaseStatus,
    pub payment_method: String,
    pub payment_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_reason: Option<String>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Purchase> for PurchaseResponse {
    fn from(purchase: Purchase) -> Self {
        Self {
            id: purchase.id.map(|id| id.to_hex()).unwrap_or_default(),
            course: purchase.course.to_hex(),
            user: purchase.user.to_hex(),
            amount: purchase.amount,
            currency: purchase.currency,
            status: purchase.status,
            payment_method: purchase.payment_method,
            payment_id: purchase.payment_id,
            refund_id: purchase.refund_id,
            refund_amount: purchase.refund_amount,
            refund_reason: purchase.refund_reason,
            metadata: purchase.metadata,
            created_at: to_utc(purchase.created_at),
            updated_at: to_utc(purchase.updated_at),
        }
    }
}
