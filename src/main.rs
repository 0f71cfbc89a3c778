//! Architect.io 로그인 게이트웨이 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동하고 로그인 플로우를 초기화합니다.
//! 프로바이더 SDK를 로드한 뒤, UI가 플로우를 구동할 수 있는 REST API를 제공합니다.

use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};

use architect_auth::config::{BackendConfig, ClientRegistration, Environment, FlowSettings, ServerConfig};
use architect_auth::core::SdkRegistry;
use architect_auth::domain::Provider;
use architect_auth::errors::AuthFlowError;
use architect_auth::routes::configure_all_routes;
use architect_auth::services::flow::{AuthFlow, LogNavigator};
use architect_auth::services::profile::HttpProfileFetcher;
use architect_auth::services::provider::{HttpDiscoveryLoader, IdentityProviderClient};
use architect_auth::services::session::HttpBootstrapClient;
use architect_auth::utils::display_terminal::{print_boxed_title, print_final_summary, print_provider_status};

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 환경 설정 및 로깅 초기화
    let environment = Environment::current();
    load_env_file(environment);
    init_logging(environment);

    info!("🚀 Architect.io 로그인 게이트웨이 시작중... ({:?})", environment);

    let flow = Arc::new(build_flow().map_err(|e| {
        error!("플로우 구성 실패: {}", e);
        io::Error::other(e.to_string())
    })?);

    initialize_providers(&flow).await;

    let result = start_http_server(Arc::clone(&flow)).await;

    flow.teardown();
    info!("👋 로그인 게이트웨이 종료");
    result
}

/// 환경 변수로부터 로그인 플로우를 구성합니다
///
/// 클라이언트 ID가 없는 프로바이더는 등록되지 않으며 UI에서 비활성 버튼으로 표시됩니다.
///
/// # Errors
///
/// * `ProfileFetchError` / `BootstrapError` - HTTP 클라이언트 생성 실패
fn build_flow() -> Result<AuthFlow, AuthFlowError> {
    let settings = FlowSettings::from_env();
    info!(
        "플로우 설정: role={}, consent_timeout={:?}, request_timeout={:?}, redirect={} ({:?})",
        settings.role,
        settings.consent_timeout,
        settings.request_timeout,
        settings.landing_path,
        settings.redirect_delay
    );
    let request_timeout = settings.request_timeout;

    let clients = Provider::ALL
        .iter()
        .filter_map(|provider| ClientRegistration::from_env(*provider))
        .map(IdentityProviderClient::new)
        .collect::<Vec<_>>();

    let session_uri = BackendConfig::session_uri();
    info!("📡 세션 엔드포인트: {}", session_uri);

    Ok(AuthFlow::new(
        settings,
        clients,
        Arc::new(HttpProfileFetcher::from_env(request_timeout)?),
        Arc::new(HttpBootstrapClient::new(session_uri, request_timeout)?),
        Arc::new(LogNavigator),
    ))
}

/// 프로바이더 SDK를 로드하고 결과를 터미널에 출력합니다
///
/// 로드에 실패해도 서버는 계속 실행되며, 해당 프로바이더만 "사용할 수 없음"이 됩니다.
async fn initialize_providers(flow: &AuthFlow) {
    print_boxed_title("PROVIDER INITIALIZATION");

    let available = flow
        .initialize_providers(&SdkRegistry::global(), Arc::new(HttpDiscoveryLoader::new()))
        .await;

    let providers = flow.providers();
    print_provider_status(&providers);
    print_final_summary(available, providers.len());

    if available == 0 {
        warn!("사용 가능한 로그인 프로바이더가 없습니다. UI에는 로그인을 사용할 수 없음으로 표시됩니다");
    }
}

/// HTTP 서버를 구성하고 실행합니다
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
///
/// # Examples
///
/// ```rust,ignore
/// // 서버는 HOST:PORT (기본 127.0.0.1:8080)에서 실행됩니다
/// // Health check: http://127.0.0.1:8080/health
/// // API 엔드포인트: http://127.0.0.1:8080/api/v1/auth/*
/// ```
async fn start_http_server(flow: Arc<AuthFlow>) -> io::Result<()> {
    let bind_address = format!("{}:{}", ServerConfig::host(), ServerConfig::port());
    let origins = ServerConfig::ui_origins();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);
    info!("📍 Sign-in API: http://{}/api/v1/auth", bind_address);
    info!("🔓 허용 Origin: {:?}", origins);

    let flow = web::Data::from(flow);

    HttpServer::new(move || {
        App::new()
            .app_data(flow.clone())
            .wrap(configure_cors(&origins))
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_all_routes)
    })
    .bind(bind_address)?
    .workers(1)
    .run()
    .await
}

/// 프로필별 env 파일을 로드합니다
///
/// # Environment Variables
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
///
/// # Examples
///
/// ```bash
/// PROFILE=prod cargo run
/// ```
fn load_env_file(environment: Environment) {
    match environment.env_file() {
        Some(file) => match dotenv::from_filename(file) {
            Ok(_) => info!("{} 파일 로드 됨", file),
            Err(e) => error!("{} 파일 로드 실패: {}", file, e),
        },
        None => {
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// # Environment Variables
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: 프로필별, 예: "info,actix_web=info")
///
/// # Examples
///
/// ```bash
/// RUST_LOG=architect_auth::services::flow=debug cargo run
/// ```
fn init_logging(environment: Environment) {
    env_logger::init_from_env(Env::default().default_filter_or(environment.default_log_filter()));
}

/// UI Origin에 대해 자격 증명(쿠키)을 허용하는 CORS 설정
fn configure_cors(origins: &[String]) -> Cors {
    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .supports_credentials()
        .max_age(3600)
}
