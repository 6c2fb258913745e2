//! 데이터베이스 연결 생성/해제 추상화
//!
//! [`Connector`]는 재시도 정책과 실제 드라이버를 분리합니다.
//! 운영 환경에서는 [`MongoConnector`]를 사용합니다.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use mongodb::bson::doc;
use mongodb::event::command::CommandEvent;
use mongodb::event::sdam::SdamEvent;
use mongodb::event::EventHandler;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};

use crate::config::{DatabaseConfig, Environment};
use super::events::EventSender;
use super::topology;
use super::manager::ConnectionError;

/// URI와 환경 변수 모두에 데이터베이스 이름이 없을 때 사용하는 이름
pub const DEFAULT_DATABASE_NAME: &str = "lms";

/// 연결 생성에 필요한 설정
///
/// 기동 시 한 번 읽어 연결 관리자가 소유합니다.
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    /// 연결 문자열. 없으면 연결을 시도하지 않습니다.
    pub uri: Option<String>,
    pub database_name: Option<String>,
    pub app_name: String,
    pub max_pool_size: u32,
    pub server_selection_timeout: Duration,
    /// 초기 ping 명령 대기 한도
    pub socket_timeout: Duration,
    /// 드라이버 명령 디버그 로그 여부
    pub log_commands: bool,
}

impl DatabaseSettings {
    pub fn from_env() -> Self {
        Self {
            uri: DatabaseConfig::uri(),
            database_name: DatabaseConfig::database_name(),
            log_commands: Environment::current().is_development(),
            ..Self::default()
        }
    }

    pub fn with_uri(uri: impl Into<String>) -> Self {
        Self {
            uri: Some(uri.into()),
            ..Self::default()
        }
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            uri: None,
            database_name: None,
            app_name: "course_market_backend".to_string(),
            max_pool_size: 10,
            server_selection_timeout: Duration::from_secs(5),
            socket_timeout: Duration::from_secs(45),
            log_commands: false,
        }
    }
}

/// 성공적으로 열린 연결
#[derive(Debug, Clone)]
pub struct Connection<H> {
    pub handle: H,
    pub host: String,
    pub name: String,
}

/// 데이터베이스 연결을 열고 닫는 구현체
///
/// `open`은 한 번의 시도만 수행합니다. 재시도는 호출자(연결 관리자)의 책임입니다.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    /// 리포지토리가 사용하는 연결 핸들
    type Handle: Clone + Send + Sync + 'static;

    /// 연결을 한 번 시도합니다.
    ///
    /// # Arguments
    ///
    /// * `settings` - 연결 설정
    /// * `events` - 연결 이후 발생하는 토폴로지 이벤트를 보낼 핸들
    async fn open(
        &self,
        settings: &DatabaseSettings,
        events: EventSender,
    ) -> Result<Connection<Self::Handle>, ConnectionError>;

    /// 연결을 닫습니다.
    async fn close(&self, handle: Self::Handle) -> Result<(), ConnectionError>;
}

/// MongoDB 연결 핸들
///
/// 드라이버 `Client`는 내부적으로 커넥션 풀을 공유하므로 복제 비용이 작습니다.
#[derive(Clone, Debug)]
pub struct MongoHandle {
    client: Client,
    database_name: String,
}

impl MongoHandle {
    pub fn database(&self) -> Database {
        self.client.database(&self.database_name)
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }
}

/// MongoDB 드라이버 기반 커넥터
#[derive(Debug, Default, Clone)]
pub struct MongoConnector;

impl MongoConnector {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Connector for MongoConnector {
    type Handle = MongoHandle;

    async fn open(
        &self,
        settings: &DatabaseSettings,
        events: EventSender,
    ) -> Result<Connection<MongoHandle>, ConnectionError> {
        let uri = settings
            .uri
            .as_deref()
            .ok_or_else(|| ConnectionError::Config("MONGO_URI is not defined".to_string()))?;

        let mut options = ClientOptions::parse(uri)
            .await
            .map_err(|e| ConnectionError::Connect(e.to_string()))?;

        options.app_name = Some(settings.app_name.clone());
        options.max_pool_size = Some(settings.max_pool_size);
        options.server_selection_timeout = Some(settings.server_selection_timeout);
        options.connect_timeout = Some(settings.server_selection_timeout);

        let generation = events.generation();
        options.sdam_event_handler = Some(EventHandler::callback(move |event: SdamEvent| {
            topology::forward(&events, topology::classify_sdam_event(&event));
        }));

        if settings.log_commands {
            options.command_event_handler = Some(EventHandler::callback(|event: CommandEvent| {
                if let CommandEvent::Started(started) = event {
                    debug!("🍃 {}.{}", started.db, started.command_name);
                }
            }));
        }

        let name = settings
            .database_name
            .clone()
            .or_else(|| options.default_database.clone())
            .unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_string());

        let host = options
            .hosts
            .first()
            .map(|address| address.to_string())
            .unwrap_or_default();

        let client = Client::with_options(options)
            .map_err(|e| ConnectionError::Connect(e.to_string()))?;

        let database = client.database(&name);
        let ping = tokio::time::timeout(settings.socket_timeout, async {
            database.run_command(doc! { "ping": 1 }).await
        })
        .await;

        let failure = match ping {
            Ok(Ok(_)) => None,
            Ok(Err(e)) => Some(e.to_string()),
            Err(_) => Some(format!("ping timed out after {:?}", settings.socket_timeout)),
        };

        if let Some(message) = failure {
            drop(database);
            client.shutdown().await;
            return Err(ConnectionError::Connect(message));
        }

        info!("✅ MongoDB 연결 성공: {} ({}) [세대 {}]", name, host, generation);

        Ok(Connection {
            handle: MongoHandle {
                client,
                database_name: name.clone(),
            },
            host,
            name,
        })
    }

    async fn close(&self, handle: MongoHandle) -> Result<(), ConnectionError> {
        handle.client.shutdown().await;
        Ok(())
    }
}
