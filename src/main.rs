//! 강좌 마켓플레이스 백엔드 메인 애플리케이션
//!
//! 데이터베이스 연결을 맺고 연결 감시를 시작한 뒤 HTTP 서버를 구동합니다.
//! SIGTERM(또는 Ctrl-C)을 받으면 기동 중이든 실행 중이든 연결을 닫은 후 종료 코드와 함께 끝납니다.

use std::process;
use std::sync::Arc;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};

use course_market_backend::config::{CorsConfig, Environment, RateLimitConfig, ServerConfig};
use course_market_backend::db::{
    close_for_exit, exit_code_for, unless_terminated, wait_for_shutdown, DatabaseManager,
    DatabaseSettings, MongoConnector, RetryPolicy, ShutdownCause, TerminationSignal,
};
use course_market_backend::handlers::health::health_check;
use course_market_backend::routes::{api_scope, json_config, not_found};
use course_market_backend::services::auth::TokenService;
use course_market_backend::state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 환경 설정 및 로깅 초기화
    let env_source = load_env_file();
    let environment = Environment::current();
    init_logging(&environment);

    info!("🚀 강좌 마켓플레이스 백엔드 시작중... ({:?}, {})", environment, env_source);

    // 연결 재시도 중에도 종료 신호를 받을 수 있도록 가장 먼저 등록
    let mut termination = TerminationSignal::install();

    let tokens = match TokenService::from_env() {
        Ok(tokens) => Arc::new(tokens),
        Err(e) => {
            error!("❌ 토큰 서비스 설정 실패: {}", e);
            process::exit(1);
        }
    };

    let db = Arc::new(DatabaseManager::new(
        MongoConnector::new(),
        DatabaseSettings::from_env(),
        RetryPolicy::from_env(),
    ));

    match unless_terminated(termination.recv(), db.connect()).await {
        Some(Ok(())) => {}
        Some(Err(e)) => {
            error!("❌ 데이터베이스 연결 실패: {}", e);
            process::exit(e.exit_code());
        }
        None => {
            warn!("🛑 기동 중 종료 신호를 받았습니다");
            process::exit(close_for_exit(&db).await);
        }
    }

    let state = AppState::new(db.clone(), tokens);

    match unless_terminated(termination.recv(), state.init_indexes()).await {
        Some(Ok(())) => {}
        Some(Err(e)) => warn!("⚠️ 인덱스 생성 실패 (계속 진행): {}", e),
        None => {
            warn!("🛑 기동 중 종료 신호를 받았습니다");
            process::exit(close_for_exit(&db).await);
        }
    }

    let mut supervisor = db.clone().supervise();

    let bind_address = (ServerConfig::host(), ServerConfig::port());

    let rate_limit = RateLimitConfig::from_env();
    let Some(governor_conf) = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit.per_second)
        .burst_size(rate_limit.burst_size)
        .use_headers()
        .finish()
    else {
        error!("❌ Rate Limiting 설정이 올바르지 않습니다: {:?}", rate_limit);
        process::exit(close_for_exit(&db).await.max(1));
    };

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit.per_second, rate_limit.burst_size
    );

    let development = environment.is_development();
    let app_state = web::Data::new(state.clone());

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .app_data(json_config())
            .wrap(middleware::Condition::new(development, middleware::Logger::default()))
            .wrap(configure_cors())
            .wrap(security_headers())
            .wrap(middleware::NormalizePath::trim())
            .service(health_check)
            .service(api_scope(&state).wrap(Governor::new(&governor_conf)))
            .default_service(web::to(not_found))
    })
    // 종료 신호는 직접 처리
    .disable_signals()
    .bind(bind_address.clone());

    let server = match server {
        Ok(server) => server.run(),
        Err(e) => {
            error!("❌ {}:{} 바인딩 실패: {}", bind_address.0, bind_address.1, e);
            close_for_exit(&db).await;
            process::exit(1);
        }
    };

    info!("🌐 서버가 http://{}:{} 에서 실행중입니다", bind_address.0, bind_address.1);
    info!("📍 Health check: http://{}:{}/health", bind_address.0, bind_address.1);

    let server_handle = server.handle();

    let cause = wait_for_shutdown(termination.recv(), &mut supervisor, server).await;

    if !matches!(cause, ShutdownCause::ServerStopped(_)) {
        info!("🛑 서버를 정리합니다 ({:?})", cause);
        server_handle.stop(cause.is_graceful()).await;
    }

    let exit_code = exit_code_for(&cause, &db).await;

    supervisor.abort();
    info!("👋 종료 코드 {}", exit_code);
    process::exit(exit_code);
}

/// 환경별 설정 파일을 로드합니다
///
/// `PROFILE` 환경변수에 따라 `.env.{PROFILE}`을 읽고, 없으면 `.env`로 대체합니다.
/// 로거가 초기화되기 전이므로 결과는 문자열로 돌려줍니다.
///
/// ```bash
/// PROFILE=dev cargo run    # .env.dev
/// PROFILE=prod cargo run   # .env.prod
/// ```
fn load_env_file() -> String {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());
    let filename = format!(".env.{}", profile);

    match dotenv::from_filename(&filename) {
        Ok(_) => format!("{} 로드됨", filename),
        Err(_) => match dotenv() {
            Ok(_) => format!("{} 없음, 기본 .env 로드됨", filename),
            Err(_) => "환경 파일 없음, 프로세스 환경변수 사용".to_string(),
        },
    }
}

/// 로깅 시스템을 초기화합니다
///
/// `RUST_LOG`가 없으면 환경별 기본 필터를 사용합니다.
///
/// ```bash
/// RUST_LOG=course_market_backend::db=debug cargo run
/// ```
fn init_logging(environment: &Environment) {
    env_logger::init_from_env(Env::default().default_filter_or(environment.default_log_filter()));
}

/// 클라이언트 도메인만 허용하는 CORS 설정 (쿠키 전송 허용)
fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin(&CorsConfig::client_url())
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "HEAD", "OPTIONS"])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .supports_credentials()
        .max_age(3600)
}

/// 모든 응답에 붙는 보안 헤더
fn security_headers() -> middleware::DefaultHeaders {
    middleware::DefaultHeaders::new()
        .add((header::X_CONTENT_TYPE_OPTIONS, "nosniff"))
        .add((header::X_FRAME_OPTIONS, "SAMEORIGIN"))
        .add((header::REFERRER_POLICY, "no-referrer"))
        .add(("X-DNS-Prefetch-Control", "off"))
}
