//! Sign-in Flow HTTP Handlers
//!
//! UI가 로그인 플로우를 구동하는 엔드포인트입니다. 모든 핸들러는
//! `web::Data<AuthFlow>`를 받아 플로우 연산 하나를 호출하고 결과를 JSON으로 돌려줍니다.
//!
//! # UI 시나리오
//!
//! 1. `GET /state`로 버튼 상태를 그림
//! 2. `POST /providers/google/select` → `consent_url`을 팝업으로 엶
//! 3. 콜백 페이지가 fragment를 `POST /callback`으로 전달
//! 4. `GET /state`를 폴링하다 `redirect_to`가 생기면 이동
use actix_web::{get, post, web, HttpResponse};
use log::{debug, info};

use crate::domain::dto::consent::ProviderCallback;
use crate::domain::dto::snapshot::{CallbackResponse, FlowOutcome};
use crate::domain::models::provider::Provider;
use crate::errors::errors::AuthFlowError;
use crate::services::flow::auth_flow::AuthFlow;

/// 현재 플로우 스냅샷
///
/// # Endpoint
/// `GET /state`
#[get("/state")]
pub async fn get_state(flow: web::Data<AuthFlow>) -> HttpResponse {
    HttpResponse::Ok().json(flow.snapshot())
}

/// 프로바이더 선택. 새 시도를 시작하고 동의 화면 URL을 돌려줍니다.
///
/// # Endpoint
/// `POST /providers/{provider}/select`
///
/// # Response
///
/// ```json
/// {
///   "provider": "google",
///   "consent_url": "https://accounts.google.com/o/oauth2/v2/auth?client_id=...",
///   "state": "google.3.5f0c..."
/// }
/// ```
#[post("/providers/{provider}/select")]
pub async fn select_provider(
    flow: web::Data<AuthFlow>,
    path: web::Path<String>,
) -> Result<HttpResponse, AuthFlowError> {
    let provider = path.into_inner().parse::<Provider>()?;
    let consent = flow.select_provider(provider)?;

    Ok(HttpResponse::Ok().json(consent))
}

/// 프로바이더 콜백 전달
///
/// 활성 시도의 콜백이 아니면 409 (`StaleAttempt`).
/// 응답 전에 연결이 끊겨도 시도는 서버에서 계속 진행되므로 UI는 `/state`로 결과를 확인합니다.
///
/// # Endpoint
/// `POST /callback`
#[post("/callback")]
pub async fn provider_callback(
    flow: web::Data<AuthFlow>,
    payload: web::Json<ProviderCallback>,
) -> Result<HttpResponse, AuthFlowError> {
    let outcome = flow.on_provider_callback(payload.into_inner()).await;
    if outcome == FlowOutcome::Discarded {
        debug!("폐기된 콜백");
        return Err(AuthFlowError::StaleAttempt);
    }

    Ok(HttpResponse::Ok().json(CallbackResponse {
        outcome,
        snapshot: flow.snapshot(),
    }))
}

/// 동의 팝업이 닫힘
///
/// # Endpoint
/// `POST /consent/cancel`
#[post("/consent/cancel")]
pub async fn cancel_consent(flow: web::Data<AuthFlow>) -> Result<HttpResponse, AuthFlowError> {
    flow.cancel_consent()?;
    Ok(HttpResponse::Ok().json(flow.snapshot()))
}

/// 에러 배너 닫기
///
/// # Endpoint
/// `POST /retry`
#[post("/retry")]
pub async fn retry(flow: web::Data<AuthFlow>) -> Result<HttpResponse, AuthFlowError> {
    flow.retry()?;
    Ok(HttpResponse::Ok().json(flow.snapshot()))
}

/// # Endpoint
/// `POST /mode/toggle`
#[post("/mode/toggle")]
pub async fn toggle_mode(flow: web::Data<AuthFlow>) -> Result<HttpResponse, AuthFlowError> {
    flow.toggle_mode()?;
    Ok(HttpResponse::Ok().json(flow.snapshot()))
}

/// 화면 이탈. 진행 중인 시도와 예약된 리다이렉트를 취소합니다.
///
/// # Endpoint
/// `POST /leave`
#[post("/leave")]
pub async fn leave(flow: web::Data<AuthFlow>) -> HttpResponse {
    flow.leave();
    info!("UI가 로그인 화면을 떠났습니다");
    HttpResponse::Ok().json(flow.snapshot())
}
