//! 드라이버 SDAM 이벤트를 연결 이벤트로 번역
//!
//! 연결 관리자가 반응하는 사건은 세 가지뿐입니다.
//!
//! | 드라이버 이벤트 | 조건 | 연결 이벤트 |
//! |-----------------|------|-------------|
//! | `TopologyDescriptionChanged` | 데이터를 가진 서버가 있다가 모두 사라짐 | `Disconnected` (재연결) |
//! | `ServerDescriptionChanged` | 데이터를 가진 서버가 에러와 함께 빠짐 | `Error` |
//! | `ServerDescriptionChanged` | 빠졌던 서버가 다시 데이터를 가진 서버가 됨 | `Recovered` |
//!
//! 복제 세트의 멤버 하나가 하트비트에 실패해도 주 서버가 살아있다면 클라이언트를 교체하지 않습니다.

use mongodb::event::sdam::SdamEvent;
use mongodb::ServerType;

use super::events::{ConnectionEventKind, EventSender};

/// 읽기/쓰기를 받을 수 있는 서버 종류인지 확인합니다.
pub fn is_data_bearing(server_type: ServerType) -> bool {
    matches!(
        server_type,
        ServerType::Standalone
            | ServerType::Mongos
            | ServerType::RsPrimary
            | ServerType::RsSecondary
            | ServerType::LoadBalancer
    )
}

/// 토폴로지 전체의 변화를 판정합니다.
///
/// 데이터를 가진 서버 수가 1 이상에서 0으로 떨어질 때만 끊김으로 봅니다.
/// 최초 탐색 중(처음부터 0)에는 아무 이벤트도 만들지 않습니다.
pub fn classify_topology_change(previous_available: usize, current_available: usize) -> Option<ConnectionEventKind> {
    (previous_available > 0 && current_available == 0).then(|| ConnectionEventKind::Disconnected {
        reason: format!("no data-bearing server left (previously {})", previous_available),
    })
}

/// 서버 하나의 상태 변화를 판정합니다.
pub fn classify_server_change(
    address: &str,
    previous: ServerType,
    current: ServerType,
    error: Option<String>,
) -> Option<ConnectionEventKind> {
    match (is_data_bearing(previous), is_data_bearing(current)) {
        (true, false) => Some(ConnectionEventKind::Error {
            message: format!(
                "{} is no longer available: {}",
                address,
                error.unwrap_or_else(|| format!("{:?} -> {:?}", previous, current))
            ),
        }),
        (false, true) => Some(ConnectionEventKind::Recovered {
            address: address.to_string(),
        }),
        _ => None,
    }
}

/// 드라이버 이벤트 하나를 번역합니다. 관심 없는 이벤트는 `None`
pub fn classify_sdam_event(event: &SdamEvent) -> Option<ConnectionEventKind> {
    match event {
        SdamEvent::TopologyDescriptionChanged(changed) => {
            let previous = changed
                .previous_description
                .servers()
                .values()
                .filter(|server| is_data_bearing(server.server_type()))
                .count();
            let current = changed
                .new_description
                .servers()
                .values()
                .filter(|server| is_data_bearing(server.server_type()))
                .count();

            classify_topology_change(previous, current)
        }
        SdamEvent::ServerDescriptionChanged(changed) => classify_server_change(
            &changed.address.to_string(),
            changed.previous_description.server_type(),
            changed.new_description.server_type(),
            changed.new_description.error().map(|e| e.to_string()),
        ),
        _ => None,
    }
}

/// 번역된 이벤트를 연결 관리자에게 보냅니다.
pub fn forward(events: &EventSender, kind: Option<ConnectionEventKind>) {
    if let Some(kind) = kind {
        events.publish(kind);
    }
}
