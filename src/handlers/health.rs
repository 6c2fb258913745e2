//! 헬스체크 핸들러

use actix_web::{get, web, HttpResponse};
use serde_json::json;

use crate::state::AppState;

/// 서비스 정보와 데이터베이스 연결 상태
///
/// 데이터베이스가 끊겨 있어도 200을 돌려주며, 상태는 `database` 필드로 확인합니다.
#[get("/health")]
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let database = state.db.status();

    HttpResponse::Ok().json(json!({
        "status": if database.is_connected { "healthy" } else { "degraded" },
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "database": database,
    }))
}
