use mongodb::bson::DateTime;
use serde::Serialize;

/// 성공 응답 공통 형식
///
/// ```json
/// { "success": true, "message": "Signed out successfully" }
/// { "success": true, "data": { ... } }
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// 데이터 없이 메시지만 담은 응답
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// BSON 시각을 JSON 응답용 UTC 시각으로 변환합니다.
pub fn to_utc(value: DateTime) -> chrono::DateTime<chrono::Utc> {
    chrono::DateTime::from_timestamp_millis(value.timestamp_millis()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_only_response_omits_data() {
        let json = serde_json::to_value(ApiResponse::message("Signed out successfully")).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Signed out successfully");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_data_response_omits_message() {
        let json = serde_json::to_value(ApiResponse::data(vec![1, 2, 3])).unwrap();

        assert_eq!(json["data"], serde_json::json!([1, 2, 3]));
        assert!(json.get("message").is_none());
    }

    #[test]
    fn test_to_utc_keeps_millis() {
        let value = DateTime::from_millis(1_700_000_000_123);

        assert_eq!(to_utc(value).timestamp_millis(), 1_700_000_000_123);
    }
}
