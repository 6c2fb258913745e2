use std::collections::HashMap;

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 결제 상태
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseStatus {
    #[default]
    Pending,
    Completed,
    Failed,
    Refunded,
}

impl PurchaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PurchaseStatus::Pending => "pending",
            PurchaseStatus::Completed => "completed",
            PurchaseStatus::Failed => "failed",
            PurchaseStatus::Refunded => "refunded",
        }
    }
}

/// 강좌 구매 기록 (`course_purchases` 컬렉션)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Purchase {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub course: ObjectId,
    pub user: ObjectId,
    pub amount: f64,
    pub currency: String,
    #[serde(default)]
    pub status: PurchaseStatus,
    pub payment_method: String,
    pub payment_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_reason: Option<String>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Purchase {
    /// 대기 상태의 구매 기록을 생성합니다.
    pub fn pending(
        course: ObjectId,
        user: ObjectId,
        amount: f64,
        currency: String,
        payment_method: String,
        payment_id: String,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            course,
            user,
            amount,
            currency,
            status: PurchaseStatus::Pending,
            payment_method,
            payment_id,
            refund_id: None,
            refund_amount: None,
            refund_reason: None,
            metadata: HashMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn belongs_to(&self, user_id: &ObjectId) -> bool {
        &self.user == user_id
    }
}
