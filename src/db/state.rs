//! 데이터베이스 연결 상태 스냅샷

use serde::Serialize;

/// 연결 수명주기 단계
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadyState {
    Disconnected,
    Connecting,
    Connected,
    Disconnecting,
    /// 재시도 예산을 모두 소진한 최종 상태
    Failed,
}

/// 연결 관리자가 소유하는 상태
///
/// 외부에는 [`crate::db::ConnectionManager::status`]가 돌려주는 복사본으로만 노출됩니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectionState {
    pub is_connected: bool,
    pub host: Option<String>,
    pub name: Option<String>,
    pub ready_state: ReadyState,
    /// 현재 재시도 시퀀스에서 소비한 재시도 횟수. 연결 성공 시 0으로 돌아갑니다.
    pub retry_count: u32,
}

impl Default for ConnectionState {
    fn default() -> Self {
        Self {
            is_connected: false,
            host: None,
            name: None,
            ready_state: ReadyState::Disconnected,
            retry_count: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_disconnected() {
        let state = ConnectionState::default();

        assert!(!state.is_connected);
        assert_eq!(state.ready_state, ReadyState::Disconnected);
        assert_eq!(state.retry_count, 0);
    }

    #[test]
    fn test_ready_state_serializes_lowercase() {
        let json = serde_json::to_value(ConnectionState::default()).unwrap();

        assert_eq!(json["ready_state"], "disconnected");
        assert_eq!(json["is_connected"], false);
    }
}
