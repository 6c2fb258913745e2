//! # 강좌 구매 HTTP 핸들러 (`/api/v1/purchases`, 인증 필요)
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `POST` | `/` | 대기 중인 구매 생성 | 201 Created |
//! | `GET` | `/` | 내 구매 기록 | 200 OK |
//! | `GET` | `/{purchase_id}` | 구매 상세 | 200 OK |
//! | `POST` | `/{purchase_id}/complete` | 결제 완료 및 수강 등록 | 200 OK |

use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::domain::dto::common::ApiResponse;
use crate::domain::dto::purchases::{CreatePurchaseRequest, PurchaseResponse};
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::AppError;
use crate::state::AppState;

#[post("")]
pub async fn create_purchase(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    payload: web::Json<CreatePurchaseRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let purchase = state.purchases.create(&user.user_id, payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::with_message(
        "Purchase created successfully",
        PurchaseResponse::from(purchase),
    )))
}

#[get("")]
pub async fn list_purchases(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let purchases: Vec<PurchaseResponse> = state
        .purchases
        .list_for_user(&user.user_id)
        .await?
        .into_iter()
        .map(PurchaseResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::data(purchases)))
}

#[get("/{purchase_id}")]
pub async fn get_purchase(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    purchase_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let purchase = state.purchases.get_for_user(&user.user_id, &purchase_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::data(PurchaseResponse::from(purchase))))
}

#[post("/{purchase_id}/complete")]
pub async fn complete_purchase(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    purchase_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let purchase = state.purchases.complete(&user.user_id, &purchase_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        "Purchase completed successfully",
        PurchaseResponse::from(purchase),
    )))
}
