//! 종료 신호 처리
//!
//! 신호 리스너는 기동 직후 [`TerminationSignal::install`]로 등록하고,
//! 연결 시도와 서버 실행 등 모든 단계에서 같은 리스너를 기다립니다.

use std::future::Future;
use std::io;

use log::{error, info};
use tokio::task::JoinError;

use super::connector::Connector;
use super::manager::{ConnectionError, ConnectionManager};

/// SIGTERM 또는 Ctrl-C 리스너
///
/// 등록 시점부터 받은 신호는 `recv`를 기다리기 전이라도 보존됩니다.
pub struct TerminationSignal {
    #[cfg(unix)]
    streams: Option<(tokio::signal::unix::Signal, tokio::signal::unix::Signal)>,
}

impl TerminationSignal {
    /// 신호 핸들러를 등록합니다. tokio 런타임 안에서 호출해야 합니다.
    pub fn install() -> Self {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};

            let streams = match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
                (Ok(terminate), Ok(interrupt)) => Some((terminate, interrupt)),
                (Err(e), _) | (_, Err(e)) => {
                    error!("종료 신호 핸들러 등록 실패, Ctrl-C만 처리합니다: {}", e);
                    None
                }
            };

            Self { streams }
        }

        #[cfg(not(unix))]
        {
            Self {}
        }
    }

    /// 다음 종료 신호를 기다립니다.
    pub async fn recv(&mut self) {
        #[cfg(unix)]
        if let Some((terminate, interrupt)) = self.streams.as_mut() {
            tokio::select! {
                _ = terminate.recv() => info!("🛑 SIGTERM 수신"),
                _ = interrupt.recv() => info!("🛑 Ctrl-C 수신"),
            }
            return;
        }

        let _ = tokio::signal::ctrl_c().await;
        info!("🛑 Ctrl-C 수신");
    }
}

/// 기동 단계 작업을 종료 신호와 경쟁시킵니다.
///
/// 신호가 먼저 오면 작업 future를 버리고 `None`을 돌려줍니다.
pub async fn unless_terminated<T, W>(termination: T, work: W) -> Option<W::Output>
where
    T: Future<Output = ()>,
    W: Future,
{
    tokio::select! {
        biased;
        _ = termination => None,
        output = work => Some(output),
    }
}

/// 서버 실행을 끝낸 원인
#[derive(Debug)]
pub enum ShutdownCause {
    /// SIGTERM 또는 Ctrl-C
    Terminated,
    /// 연결 감시 태스크가 끝남
    SupervisorEnded(String),
    /// HTTP 서버가 스스로 멈춤
    ServerStopped(io::Result<()>),
}

impl ShutdownCause {
    /// 처리 중인 요청을 마저 끝내고 멈출지 여부
    pub fn is_graceful(&self) -> bool {
        matches!(self, ShutdownCause::Terminated)
    }
}

/// 종료 신호, 연결 감시 태스크, HTTP 서버 중 먼저 끝나는 쪽을 기다립니다.
pub async fn wait_for_shutdown<T, S, V>(termination: T, supervisor: S, server: V) -> ShutdownCause
where
    T: Future<Output = ()>,
    S: Future<Output = Result<Result<(), ConnectionError>, JoinError>>,
    V: Future<Output = io::Result<()>>,
{
    tokio::select! {
        biased;
        _ = termination => ShutdownCause::Terminated,
        outcome = supervisor => ShutdownCause::SupervisorEnded(match outcome {
            Ok(Err(e)) => format!("데이터베이스 재연결 실패: {}", e),
            Ok(Ok(())) => "연결 감시가 예기치 않게 종료되었습니다".to_string(),
            Err(e) => format!("연결 감시 작업 실패: {}", e),
        }),
        outcome = server => ShutdownCause::ServerStopped(outcome),
    }
}

/// 연결을 닫고 종료 원인에 맞는 프로세스 종료 코드를 정합니다.
///
/// 신호나 서버의 정상 종료는 닫기 결과(0 또는 1)를, 그 밖의 원인은 항상 1을 돌려줍니다.
pub async fn exit_code_for<C: Connector>(cause: &ShutdownCause, manager: &ConnectionManager<C>) -> i32 {
    let code = close_for_exit(manager).await;

    match cause {
        ShutdownCause::Terminated | ShutdownCause::ServerStopped(Ok(())) => code,
        ShutdownCause::SupervisorEnded(reason) => {
            error!("❌ {}", reason);
            code.max(1)
        }
        ShutdownCause::ServerStopped(Err(e)) => {
            error!("❌ HTTP 서버 오류: {}", e);
            1
        }
    }
}

/// 연결을 닫고 프로세스 종료 코드를 돌려줍니다.
///
/// 에러는 로그로만 남기며 호출자에게 전파하지 않습니다.
///
/// # Returns
///
/// * `0` - 정상적으로 닫힘
/// * `1` - 닫기 실패
pub async fn close_for_exit<C: Connector>(manager: &ConnectionManager<C>) -> i32 {
    match manager.close().await {
        Ok(()) => {
            info!("👋 애플리케이션 종료로 데이터베이스 연결을 닫았습니다");
            0
        }
        Err(e) => {
            error!("❌ {}", e);
            e.exit_code()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::manager::tests::manager;
    use crate::db::state::ReadyState;
    use std::sync::atomic::Ordering;
    use std::time::Duration;
    use tokio::sync::oneshot;

    #[tokio::test(start_paused = true)]
    async fn test_clean_close_exits_zero() {
        let (manager, _script) = manager(&[true], false);
        manager.connect().await.unwrap();

        assert_eq!(close_for_exit(&manager).await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_close_exits_one() {
        let (manager, script) = manager(&[true], false);
        manager.connect().await.unwrap();
        script.fail_close.store(true, Ordering::SeqCst);

        assert_eq!(close_for_exit(&manager).await, 1);
        assert!(!manager.status().is_connected);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_installed_listener_receives_sigterm() {
        let mut termination = TerminationSignal::install();

        let status = std::process::Command::new("sh")
            .arg("-c")
            .arg(format!("kill -TERM {}", std::process::id()))
            .status()
            .unwrap();
        assert!(status.success());

        tokio::time::timeout(Duration::from_secs(5), termination.recv())
            .await
            .expect("SIGTERM should reach the listener");
    }

    #[tokio::test(start_paused = true)]
    async fn test_signal_during_connect_retries_stops_attempts() {
        let (manager, script) = manager(&[], false);
        let (signal_tx, signal_rx) = oneshot::channel::<()>();

        let startup = tokio::spawn({
            let manager = manager.clone();
            async move {
                let termination = async {
                    let _ = signal_rx.await;
                };
                unless_terminated(termination, manager.connect()).await
            }
        });

        // 첫 시도 실패 후 재시도 대기 중에 신호 도착
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(script.attempts.load(Ordering::SeqCst), 1);
        signal_tx.send(()).unwrap();

        assert!(startup.await.unwrap().is_none());
        assert_eq!(close_for_exit(&manager).await, 0);

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(script.attempts.load(Ordering::SeqCst), 1);
        assert_eq!(manager.status().ready_state, ReadyState::Disconnected);
    }

    #[tokio::test(start_paused = true)]
    async fn test_startup_work_finishes_without_signal() {
        let (manager, _script) = manager(&[true], false);

        let result = unless_terminated(std::future::pending(), manager.connect()).await;

        assert!(matches!(result, Some(Ok(()))));
        assert!(manager.status().is_connected);
    }

    #[tokio::test(start_paused = true)]
    async fn test_termination_wins_over_running_server() {
        let (manager, _script) = manager(&[true], false);
        manager.connect().await.unwrap();
        let (signal_tx, signal_rx) = oneshot::channel::<()>();
        let supervisor = manager.clone().supervise();

        signal_tx.send(()).unwrap();
        let cause = wait_for_shutdown(
            async {
                let _ = signal_rx.await;
            },
            supervisor,
            std::future::pending::<io::Result<()>>(),
        )
        .await;

        assert!(matches!(cause, ShutdownCause::Terminated));
        assert!(cause.is_graceful());
        assert_eq!(exit_code_for(&cause, &manager).await, 0);
        assert!(!manager.status().is_connected);
    }

    #[tokio::test(start_paused = true)]
    async fn test_termination_with_failed_close_exits_one() {
        let (manager, script) = manager(&[true], false);
        manager.connect().await.unwrap();
        script.fail_close.store(true, Ordering::SeqCst);

        assert_eq!(exit_code_for(&ShutdownCause::Terminated, &manager).await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_reconnect_ends_server_with_exit_one() {
        let (manager, script) = manager(&[true], false);
        manager.connect().await.unwrap();
        let supervisor = manager.clone().supervise();

        script.last_sender().disconnected("no data-bearing server left");
        let cause = wait_for_shutdown(
            std::future::pending(),
            supervisor,
            std::future::pending::<io::Result<()>>(),
        )
        .await;

        assert!(matches!(cause, ShutdownCause::SupervisorEnded(_)));
        assert!(!cause.is_graceful());
        assert_eq!(exit_code_for(&cause, &manager).await, 1);
    }

    #[tokio::test]
    async fn test_server_exit_reports_its_outcome() {
        let (manager, _script) = manager(&[], false);

        let clean = wait_for_shutdown(
            std::future::pending(),
            std::future::pending(),
            async { Ok::<(), io::Error>(()) },
        )
        .await;
        assert_eq!(exit_code_for(&clean, &manager).await, 0);

        let failed = ShutdownCause::ServerStopped(Err(io::Error::other("accept loop died")));
        assert_eq!(exit_code_for(&failed, &manager).await, 1);
    }

    #[tokio::test]
    async fn test_close_without_connection_exits_zero() {
        let (manager, _script) = manager(&[], false);

        assert_eq!(close_for_exit(&manager).await, 0);
    }
}
