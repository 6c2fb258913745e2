//! 데이터베이스 연결 수명주기 관리자
//!
//! 하나의 프로세스에는 하나의 [`ConnectionManager`]만 존재하며,
//! `main`에서 생성된 뒤 `Arc`로 리포지토리와 헬스 체크에 주입됩니다.
//!
//! ## 상태 전이
//!
//! ```text
//! disconnected ──connect──▶ connecting ──성공──▶ connected
//!                               │                  │
//!                        재시도 소진            끊김 이벤트
//!                               ▼                  ▼
//!                            failed         disconnected ──▶ connecting
//!
//! (모든 상태) ──close──▶ disconnecting ──▶ disconnected
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! let manager = Arc::new(DatabaseManager::new(
//!     MongoConnector::new(),
//!     DatabaseSettings::from_env(),
//!     RetryPolicy::from_env(),
//! ));
//!
//! manager.connect().await?;
//! let supervisor = manager.clone().supervise();
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use log::{debug, error, info, warn};
use thiserror::Error;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use crate::config::DatabaseConfig;
use super::connector::{Connector, DatabaseSettings, MongoConnector};
use super::events::{ConnectionEvent, ConnectionEventKind, EventSender};
use super::state::{ConnectionState, ReadyState};

/// 연결 수명주기 에러
///
/// 모든 변형은 치명적이며, 프로세스 종료 코드 1로 이어집니다.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("Database configuration error: {0}")]
    Config(String),

    #[error("Database connection error: {0}")]
    Connect(String),

    #[error("Failed to connect to database after {attempts} attempts: {last_error}")]
    RetriesExhausted { attempts: u32, last_error: String },

    #[error("Error closing database connection: {0}")]
    Close(String),
}

impl ConnectionError {
    pub fn exit_code(&self) -> i32 {
        1
    }
}

/// 고정 간격 재시도 정책
///
/// 지수 백오프나 지터 없이 `interval`만큼 기다린 뒤 다시 시도합니다.
/// 최초 시도 1회 + 재시도 `max_retries`회가 하나의 연결 시퀀스입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub interval: Duration,
}

impl RetryPolicy {
    pub fn from_env() -> Self {
        Self {
            max_retries: DatabaseConfig::max_retries(),
            interval: DatabaseConfig::retry_interval(),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            interval: Duration::from_secs(5),
        }
    }
}

/// 운영 환경 연결 관리자
pub type DatabaseManager = ConnectionManager<MongoConnector>;

/// 단일 데이터베이스 연결의 수명주기를 소유하는 컴포넌트
pub struct ConnectionManager<C: Connector> {
    connector: C,
    settings: DatabaseSettings,
    policy: RetryPolicy,
    state: RwLock<ConnectionState>,
    /// 현재 살아있는 연결과 그 세대 번호
    active: RwLock<Option<(u64, C::Handle)>>,
    generation: AtomicU64,
    events_tx: UnboundedSender<ConnectionEvent>,
    events_rx: Mutex<Option<UnboundedReceiver<ConnectionEvent>>>,
    /// 연결 시퀀스 동시 실행 방지
    connect_lock: tokio::sync::Mutex<()>,
}

impl<C: Connector> ConnectionManager<C> {
    pub fn new(connector: C, settings: DatabaseSettings, policy: RetryPolicy) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        Self {
            connector,
            settings,
            policy,
            state: RwLock::new(ConnectionState::default()),
            active: RwLock::new(None),
            generation: AtomicU64::new(0),
            events_tx,
            events_rx: Mutex::new(Some(events_rx)),
            connect_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// 현재 연결 상태의 복사본을 반환합니다.
    pub fn status(&self) -> ConnectionState {
        self.state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// 현재 연결 핸들. 연결되지 않았다면 `None`
    pub fn handle(&self) -> Option<C::Handle> {
        self.active
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .as_ref()
            .map(|(_, handle)| handle.clone())
    }

    /// 데이터베이스에 연결합니다.
    ///
    /// 실패하면 정책에 따라 고정 간격으로 재시도하며, 재시도 횟수는 매 호출마다 0부터 시작합니다.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - 연결 성공, `retry_count`는 0
    /// * `Err(ConnectionError::Config)` - 연결 문자열 없음. 시도하지 않습니다.
    /// * `Err(ConnectionError::RetriesExhausted)` - 최대 재시도 후에도 실패
    pub async fn connect(&self) -> Result<(), ConnectionError> {
        let _sequence = self.connect_lock.lock().await;

        if self.settings.uri.is_none() {
            error!("❌ MONGO_URI 환경 변수가 설정되지 않았습니다");
            self.update_state(|state| state.ready_state = ReadyState::Failed);
            return Err(ConnectionError::Config(
                "Mongo DB URI is not defined in env variables".to_string(),
            ));
        }

        self.update_state(|state| state.retry_count = 0);

        loop {
            self.update_state(|state| state.ready_state = ReadyState::Connecting);

            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            let events = EventSender::new(self.events_tx.clone(), generation);

            match self.connector.open(&self.settings, events).await {
                Ok(connection) => {
                    *self.active.write().unwrap_or_else(|poisoned| poisoned.into_inner()) =
                        Some((generation, connection.handle));

                    self.update_state(|state| {
                        state.is_connected = true;
                        state.host = Some(connection.host.clone());
                        state.name = Some(connection.name.clone());
                        state.ready_state = ReadyState::Connected;
                        state.retry_count = 0;
                    });

                    info!("🔗 데이터베이스 연결됨: {} @ {}", connection.name, connection.host);
                    return Ok(());
                }
                Err(e) => {
                    error!("❌ 데이터베이스 연결 실패: {}", e);

                    let retry_count = self.status().retry_count;
                    if retry_count >= self.policy.max_retries {
                        self.update_state(|state| {
                            state.is_connected = false;
                            state.ready_state = ReadyState::Failed;
                        });

                        error!(
                            "💥 {}회 재시도 후에도 데이터베이스에 연결하지 못했습니다",
                            self.policy.max_retries
                        );
                        return Err(ConnectionError::RetriesExhausted {
                            attempts: retry_count + 1,
                            last_error: e.to_string(),
                        });
                    }

                    let attempt = retry_count + 1;
                    self.update_state(|state| {
                        state.is_connected = false;
                        state.retry_count = attempt;
                    });

                    warn!(
                        "🔄 연결 재시도 {}/{} ({:?} 후)",
                        attempt, self.policy.max_retries, self.policy.interval
                    );
                    tokio::time::sleep(self.policy.interval).await;
                }
            }
        }
    }

    /// 연결을 닫습니다.
    ///
    /// 상태는 `disconnecting`을 거쳐 `disconnected`로 끝나며, 닫기에 실패해도 핸들은 폐기됩니다.
    pub async fn close(&self) -> Result<(), ConnectionError> {
        self.update_state(|state| state.ready_state = ReadyState::Disconnecting);

        let result = match self.take_active() {
            Some((_, handle)) => self.connector.close(handle).await,
            None => Ok(()),
        };

        self.update_state(|state| {
            state.is_connected = false;
            state.ready_state = ReadyState::Disconnected;
        });

        result
    }

    /// 연결 이벤트를 구독하는 백그라운드 태스크를 시작합니다.
    ///
    /// 재연결 시퀀스가 재시도를 모두 소진하면 태스크는 에러와 함께 끝나며,
    /// 호출자는 이를 치명적 실패로 처리해야 합니다.
    /// 이벤트 수신기는 하나뿐이므로 두 번째 호출은 즉시 끝나는 태스크를 반환합니다.
    pub fn supervise(self: Arc<Self>) -> JoinHandle<Result<(), ConnectionError>> {
        let receiver = self
            .events_rx
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();

        tokio::spawn(async move {
            let Some(mut events) = receiver else {
                warn!("⚠️ 연결 감시 태스크가 이미 실행 중입니다");
                return Ok(());
            };

            while let Some(event) = events.recv().await {
                self.handle_event(event).await?;
            }

            Ok(())
        })
    }

    async fn handle_event(&self, event: ConnectionEvent) -> Result<(), ConnectionError> {
        match event.kind {
            ConnectionEventKind::Disconnected { reason } => {
                // 살아있는 세대의 첫 끊김 이벤트만 재연결을 시작합니다.
                let Some((_, stale)) = self.take_active_if(event.generation) else {
                    debug!("이전 연결 세대 {}의 끊김 이벤트 무시", event.generation);
                    return Ok(());
                };

                warn!("⚠️ 데이터베이스 연결 끊김: {}", reason);
                self.update_state(|state| {
                    state.is_connected = false;
                    state.ready_state = ReadyState::Disconnected;
                });

                if let Err(e) = self.connector.close(stale).await {
                    warn!("이전 연결 정리 실패: {}", e);
                }

                info!("🔄 데이터베이스 재연결 시도");
                self.connect().await.inspect_err(|e| {
                    error!("💥 데이터베이스 재연결 실패: {}", e);
                })
            }
            ConnectionEventKind::Error { message } => {
                if self.is_active(event.generation) {
                    error!("❌ 데이터베이스 연결 에러: {}", message);
                    self.update_state(|state| state.is_connected = false);
                }
                Ok(())
            }
            ConnectionEventKind::Recovered { address } => {
                if self.is_active(event.generation) {
                    self.update_state(|state| {
                        if state.ready_state == ReadyState::Connected && !state.is_connected {
                            info!("✅ 데이터베이스 서버 복구: {}", address);
                            state.is_connected = true;
                        }
                    });
                }
                Ok(())
            }
        }
    }

    fn update_state(&self, apply: impl FnOnce(&mut ConnectionState)) {
        let mut state = self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        apply(&mut state);
    }

    fn is_active(&self, generation: u64) -> bool {
        self.active
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .as_ref()
            .is_some_and(|(active, _)| *active == generation)
    }

    fn take_active(&self) -> Option<(u64, C::Handle)> {
        self.active
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take()
    }

    fn take_active_if(&self, generation: u64) -> Option<(u64, C::Handle)> {
        let mut active = self.active.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        if active.as_ref().is_some_and(|(current, _)| *current == generation) {
            active.take()
        } else {
            None
        }
    }
}

impl ConnectionManager<MongoConnector> {
    /// 리포지토리가 사용하는 MongoDB 데이터베이스 인스턴스
    pub fn database(&self) -> Option<mongodb::Database> {
        self.handle().map(|handle| handle.database())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::db::connector::Connection;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicBool, AtomicUsize};

    /// 미리 정한 결과를 순서대로 돌려주는 커넥터
    #[derive(Default)]
    pub(crate) struct ScriptState {
        outcomes: Mutex<VecDeque<bool>>,
        /// 스크립트 소진 후 결과
        fallback: AtomicBool,
        pub attempts: AtomicUsize,
        pub closes: AtomicUsize,
        pub fail_close: AtomicBool,
        senders: Mutex<Vec<EventSender>>,
    }

    impl ScriptState {
        pub(crate) fn last_sender(&self) -> EventSender {
            self.senders.lock().unwrap().last().cloned().unwrap()
        }

        pub(crate) fn push(&self, outcomes: &[bool]) {
            self.outcomes.lock().unwrap().extend(outcomes.iter().copied());
        }
    }

    pub(crate) struct ScriptedConnector(pub Arc<ScriptState>);

    impl ScriptedConnector {
        pub(crate) fn new(outcomes: &[bool], fallback: bool) -> (Self, Arc<ScriptState>) {
            let state = Arc::new(ScriptState::default());
            state.push(outcomes);
            state.fallback.store(fallback, Ordering::SeqCst);
            (Self(state.clone()), state)
        }
    }

    #[async_trait]
    impl Connector for ScriptedConnector {
        type Handle = u64;

        async fn open(
            &self,
            _settings: &DatabaseSettings,
            events: EventSender,
        ) -> Result<Connection<u64>, ConnectionError> {
            self.0.attempts.fetch_add(1, Ordering::SeqCst);

            let outcome = self
                .0
                .outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| self.0.fallback.load(Ordering::SeqCst));

            if !outcome {
                return Err(ConnectionError::Connect("connection refused".to_string()));
            }

            let generation = events.generation();
            self.0.senders.lock().unwrap().push(events);

            Ok(Connection {
                handle: generation,
                host: "localhost:27017".to_string(),
                name: "lms_test".to_string(),
            })
        }

        async fn close(&self, _handle: u64) -> Result<(), ConnectionError> {
            self.0.closes.fetch_add(1, Ordering::SeqCst);

            if self.0.fail_close.load(Ordering::SeqCst) {
                return Err(ConnectionError::Close("socket already closed".to_string()));
            }
            Ok(())
        }
    }

    pub(crate) fn manager(outcomes: &[bool], fallback: bool) -> (Arc<ConnectionManager<ScriptedConnector>>, Arc<ScriptState>) {
        let (connector, state) = ScriptedConnector::new(outcomes, fallback);
        let manager = ConnectionManager::new(
            connector,
            DatabaseSettings::with_uri("mongodb://localhost:27017/lms_test"),
            RetryPolicy::default(),
        );
        (Arc::new(manager), state)
    }

    async fn wait_until(condition: impl Fn() -> bool) {
        for _ in 0..200 {
            if condition() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        panic!("condition not reached");
    }

    #[tokio::test(start_paused = true)]
    async fn test_connects_on_first_attempt() {
        let (manager, script) = manager(&[true], false);

        manager.connect().await.unwrap();

        let status = manager.status();
        assert!(status.is_connected);
        assert_eq!(status.ready_state, ReadyState::Connected);
        assert_eq!(status.host.as_deref(), Some("localhost:27017"));
        assert_eq!(status.name.as_deref(), Some("lms_test"));
        assert_eq!(script.attempts.load(Ordering::SeqCst), 1);
        assert!(manager.handle().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_failures_then_success_resets_retry_count() {
        let (manager, script) = manager(&[false, false, true], false);

        manager.connect().await.unwrap();

        let status = manager.status();
        assert!(status.is_connected);
        assert_eq!(status.retry_count, 0);
        assert_eq!(script.attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_on_last_allowed_retry() {
        let (manager, script) = manager(&[false, false, false, true], false);

        manager.connect().await.unwrap();

        assert!(manager.status().is_connected);
        assert_eq!(script.attempts.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_retries_are_fatal() {
        let (manager, script) = manager(&[], false);

        let error = manager.connect().await.unwrap_err();

        assert!(matches!(error, ConnectionError::RetriesExhausted { attempts: 4, .. }));
        assert_eq!(error.exit_code(), 1);
        assert_eq!(script.attempts.load(Ordering::SeqCst), 4);

        let status = manager.status();
        assert!(!status.is_connected);
        assert_eq!(status.ready_state, ReadyState::Failed);
        assert_eq!(status.retry_count, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_wait_fixed_interval() {
        let (manager, _script) = manager(&[false, false, false, true], false);
        let started = tokio::time::Instant::now();

        manager.connect().await.unwrap();

        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(15));
        assert!(elapsed < Duration::from_secs(16));
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_uri_makes_no_attempt() {
        let (connector, script) = ScriptedConnector::new(&[true], true);
        let manager = ConnectionManager::new(connector, DatabaseSettings::default(), RetryPolicy::default());

        let error = manager.connect().await.unwrap_err();

        assert!(matches!(error, ConnectionError::Config(_)));
        assert_eq!(error.exit_code(), 1);
        assert_eq!(script.attempts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_disconnect_triggers_reconnect_with_fresh_budget() {
        let (manager, script) = manager(&[true], true);
        manager.connect().await.unwrap();
        let _supervisor = manager.clone().supervise();

        script.push(&[false, false, false]);
        script.last_sender().disconnected("server heartbeat failed");

        wait_until(|| script.attempts.load(Ordering::SeqCst) == 5 && manager.status().is_connected).await;

        let status = manager.status();
        assert_eq!(status.ready_state, ReadyState::Connected);
        assert_eq!(status.retry_count, 0);
        assert_eq!(script.closes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reconnect_exhaustion_ends_supervisor_with_error() {
        let (manager, script) = manager(&[true], false);
        manager.connect().await.unwrap();
        let supervisor = manager.clone().supervise();

        script.last_sender().disconnected("server heartbeat failed");

        let result = supervisor.await.unwrap();
        assert!(matches!(result, Err(ConnectionError::RetriesExhausted { .. })));
        assert_eq!(manager.status().ready_state, ReadyState::Failed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_generation_events_are_ignored() {
        let (manager, script) = manager(&[true, true], true);
        manager.connect().await.unwrap();
        let first = script.last_sender();
        let _supervisor = manager.clone().supervise();

        first.disconnected("heartbeat failed");
        wait_until(|| script.attempts.load(Ordering::SeqCst) == 2 && manager.status().is_connected).await;

        first.disconnected("late duplicate");
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(script.attempts.load(Ordering::SeqCst), 2);
        assert!(manager.status().is_connected);
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_event_only_lowers_connected_flag() {
        let (manager, script) = manager(&[true], true);
        manager.connect().await.unwrap();
        let _supervisor = manager.clone().supervise();

        script.last_sender().error("write concern timeout");
        wait_until(|| !manager.status().is_connected).await;

        assert_eq!(manager.status().ready_state, ReadyState::Connected);
        assert_eq!(script.attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_recovered_member_restores_connected_flag() {
        let (manager, script) = manager(&[true], true);
        manager.connect().await.unwrap();
        let _supervisor = manager.clone().supervise();
        let sender = script.last_sender();

        sender.error("db-2:27017 is no longer available: connection refused");
        wait_until(|| !manager.status().is_connected).await;

        sender.publish(ConnectionEventKind::Recovered {
            address: "db-2:27017".to_string(),
        });
        wait_until(|| manager.status().is_connected).await;

        assert_eq!(script.attempts.load(Ordering::SeqCst), 1);
        assert_eq!(script.closes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_recovery_after_close_is_ignored() {
        let (manager, script) = manager(&[true], true);
        manager.connect().await.unwrap();
        let _supervisor = manager.clone().supervise();
        let sender = script.last_sender();

        manager.close().await.unwrap();
        sender.publish(ConnectionEventKind::Recovered {
            address: "localhost:27017".to_string(),
        });
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert!(!manager.status().is_connected);
        assert_eq!(manager.status().ready_state, ReadyState::Disconnected);
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_transitions_to_disconnected() {
        let (manager, script) = manager(&[true], false);
        manager.connect().await.unwrap();

        manager.close().await.unwrap();

        let status = manager.status();
        assert!(!status.is_connected);
        assert_eq!(status.ready_state, ReadyState::Disconnected);
        assert_eq!(script.closes.load(Ordering::SeqCst), 1);
        assert!(manager.handle().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_disconnect_after_close_does_not_reconnect() {
        let (manager, script) = manager(&[true], true);
        manager.connect().await.unwrap();
        let _supervisor = manager.clone().supervise();

        manager.close().await.unwrap();
        script.last_sender().disconnected("socket closed");
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(script.attempts.load(Ordering::SeqCst), 1);
        assert_eq!(manager.status().ready_state, ReadyState::Disconnected);
    }

    #[tokio::test]
    async fn test_second_supervisor_exits_immediately() {
        let (manager, _script) = manager(&[true], true);
        let _first = manager.clone().supervise();

        let second = manager.clone().supervise().await.unwrap();
        assert!(second.is_ok());
    }
}
