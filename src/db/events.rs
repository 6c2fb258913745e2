//! 드라이버 토폴로지 이벤트를 연결 관리자로 전달하는 채널 타입

use tokio::sync::mpsc::UnboundedSender;

/// 연결 관리자가 구독하는 이벤트 종류
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionEventKind {
    /// 서버와의 연결이 끊어짐. 재연결을 시작합니다.
    Disconnected { reason: String },
    /// 연결은 유지되지만 오류가 보고됨. 연결 플래그만 내립니다.
    Error { message: String },
    /// 에러로 빠졌던 서버가 돌아옴. 연결 플래그를 다시 올립니다.
    Recovered { address: String },
}

/// 특정 연결 세대(generation)에서 발생한 이벤트
///
/// 세대 번호로 이미 교체된 이전 클라이언트가 뒤늦게 보낸 이벤트를 걸러냅니다.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionEvent {
    pub generation: u64,
    pub kind: ConnectionEventKind,
}

/// 커넥터에 전달되는 이벤트 발행 핸들
///
/// 드라이버 콜백은 동기 함수이므로 unbounded 채널을 사용합니다.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: UnboundedSender<ConnectionEvent>,
    generation: u64,
}

impl EventSender {
    pub fn new(tx: UnboundedSender<ConnectionEvent>, generation: u64) -> Self {
        Self { tx, generation }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn disconnected(&self, reason: impl Into<String>) {
        self.publish(ConnectionEventKind::Disconnected { reason: reason.into() });
    }

    pub fn error(&self, message: impl Into<String>) {
        self.publish(ConnectionEventKind::Error { message: message.into() });
    }

    pub fn publish(&self, kind: ConnectionEventKind) {
        // 수신측이 사라졌다면 프로세스가 종료 중이므로 무시합니다.
        let _ = self.tx.send(ConnectionEvent {
            generation: self.generation,
            kind,
        });
    }
}
