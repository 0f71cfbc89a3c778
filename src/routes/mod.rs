//! API 라우트 설정 모듈
//!
//! 로그인 플로우 엔드포인트와 헬스체크 엔드포인트를 등록합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//!
//! let app = App::new()
//!     .app_data(web::Data::from(flow))
//!     .configure(configure_all_routes);
//! ```

use crate::handlers;
use actix_web::web;
use serde_json::json;

/// 모든 라우트를 설정합니다
///
/// # Arguments
///
/// * `cfg` - Actix-web 서비스 설정 객체
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check);

    configure_auth_routes(cfg);
}

/// 로그인 플로우 라우트를 설정합니다
///
/// # Available Routes
///
/// - `GET /api/v1/auth/state` - 플로우 스냅샷
/// - `POST /api/v1/auth/providers/{provider}/select` - 프로바이더 선택, 동의 URL 반환
/// - `POST /api/v1/auth/callback` - 프로바이더 콜백 전달
/// - `POST /api/v1/auth/consent/cancel` - 동의 팝업 닫힘
/// - `POST /api/v1/auth/retry` - 에러 배너 닫기
/// - `POST /api/v1/auth/mode/toggle` - 로그인 / 회원가입 전환
/// - `POST /api/v1/auth/leave` - 화면 이탈
///
/// # Examples
///
/// ```bash
/// curl -X POST http://localhost:8080/api/v1/auth/providers/google/select
///
/// curl -X POST http://localhost:8080/api/v1/auth/callback \
///   -H "Content-Type: application/json" \
///   -d '{"state":"google.1.5f0c...","access_token":"ya29..."}'
/// ```
fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            .service(handlers::auth::get_state)
            .service(handlers::auth::select_provider)
            .service(handlers::auth::provider_callback)
            .service(handlers::auth::cancel_consent)
            .service(handlers::auth::retry)
            .service(handlers::auth::toggle_mode)
            .service(handlers::auth::leave),
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// ```bash
/// curl http://localhost:8080/health
/// ```
///
/// Response:
/// ```json
/// {
///   "status": "healthy",
///   "service": "architect_auth",
///   "version": "0.1.0",
///   "timestamp": "2025-01-01T00:00:00Z"
/// }
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::flow::test_support::{happy_collaborators, harness};
    use actix_web::{test, App};
    use serde_json::Value;

    #[actix_web::test]
    async fn test_health_and_auth_scope_are_registered() {
        let (profiles, bootstrap) = happy_collaborators();
        let h = harness(profiles, bootstrap).await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(h.flow.clone()))
                .configure(configure_all_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "architect_auth");

        let req = test::TestRequest::get().uri("/api/v1/auth/state").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }
}
