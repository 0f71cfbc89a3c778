//! 로그인 플로우 전역에서 사용하는 에러 시스템
//!
//! 프로바이더 초기화부터 세션 부트스트랩까지, 로그인 시도의 각 단계에서
//! 발생할 수 있는 실패를 하나의 열거형으로 표현합니다.
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 UI 게이트웨이의
//! HTTP 응답으로 자동 변환됩니다.
//!
//! ## 단계별 분류
//!
//! | AuthFlowError | 단계 | 복구 가능 | HTTP Status |
//! |---------------|------|-----------|-------------|
//! | `InitializationError` | - | 아니오 (새로고침 필요) | 503 |
//! | `NotInitializedError` | - | 예 | 503 |
//! | `UserCancelledError` | consent | 예 (조용히 Idle 복귀) | 400 |
//! | `ConsentError` | consent | 예 | 502 |
//! | `ConsentTimeout` | consent | 예 | 504 |
//! | `ProfileFetchError` | profile | 예 | 502 |
//! | `BootstrapError` | bootstrap | 예 | 502 |
//! | `BackendRejectedError` | bootstrap | 예 | 502 |
//! | `InvalidTransition` | - | - | 409 |
//! | `UnsupportedProvider` | - | - | 400 |
//! | `StaleAttempt` | - | - | 409 |
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::errors::AuthFlowError;
//!
//! let response = http.get(url).bearer_auth(token.secret()).send().await
//!     .map_err(|e| AuthFlowError::ProfileFetchError {
//!         status: None,
//!         reason: e.to_string(),
//!     })?;
//! ```

use thiserror::Error;

use crate::domain::models::phase::FlowStage;
use crate::domain::models::provider::Provider;

/// 로그인 플로우 에러 타입
///
/// 에러 메시지에는 프로바이더 액세스 토큰 원문이 절대 포함되지 않아야 합니다.
/// 토큰이 필요한 로그는 [`crate::utils::token_utils::fingerprint`]를 사용합니다.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuthFlowError {
    /// 프로바이더 SDK(디스커버리 문서)를 끝내 불러오지 못함
    ///
    /// 해당 프로세스 생명주기 동안 영구 실패로 취급되며,
    /// UI에는 "로그인을 사용할 수 없음"으로 표시됩니다.
    #[error("Initialization error: {0}")]
    InitializationError(String),

    /// 초기화가 끝나기 전에 토큰 요청이 들어옴
    #[error("Provider client not initialized: {0}")]
    NotInitializedError(Provider),

    /// 사용자가 동의 창을 닫거나 거부함
    #[error("User cancelled the consent dialog")]
    UserCancelledError,

    /// 프로바이더가 콜백으로 에러를 돌려줌
    #[error("Consent error: {0}")]
    ConsentError(String),

    /// 동의 창이 열린 뒤 제한 시간 안에 콜백이 오지 않음
    #[error("Consent timed out")]
    ConsentTimeout,

    /// 프로바이더 프로필 조회 실패 (네트워크, non-2xx, 응답 형식 오류)
    #[error("Profile fetch error (status: {status:?}): {reason}")]
    ProfileFetchError { status: Option<u16>, reason: String },

    /// 백엔드 세션 엔드포인트 호출 중 네트워크 실패
    #[error("Bootstrap error: {0}")]
    BootstrapError(String),

    /// 백엔드가 요청을 거절했거나 응답 본문이 올바르지 않음
    #[error("Backend rejected session bootstrap (status: {status:?}): {reason}")]
    BackendRejectedError { status: Option<u16>, reason: String },

    /// 현재 플로우 상태에서 허용되지 않는 동작
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Unsupported provider: {0}")]
    UnsupportedProvider(String),

    /// 더 이상 활성 상태가 아닌 시도에 대한 요청
    #[error("Stale attempt")]
    StaleAttempt,
}

impl AuthFlowError {
    /// 에러가 발생한 플로우 단계를 반환합니다.
    ///
    /// 단계에 속하지 않는 에러(초기화, 잘못된 전이 등)는 `None`입니다.
    pub fn stage(&self) -> Option<FlowStage> {
        match self {
            AuthFlowError::UserCancelledError
            | AuthFlowError::ConsentError(_)
            | AuthFlowError::ConsentTimeout => Some(FlowStage::Consent),
            AuthFlowError::ProfileFetchError { .. } => Some(FlowStage::Profile),
            AuthFlowError::BootstrapError(_) | AuthFlowError::BackendRejectedError { .. } => {
                Some(FlowStage::Bootstrap)
            }
            _ => None,
        }
    }

    /// 사용자가 버튼을 다시 눌러 재시도할 수 있는지 여부
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, AuthFlowError::InitializationError(_))
    }

    /// 에러와 함께 전달된 HTTP 상태 코드 (로그용)
    pub fn status(&self) -> Option<u16> {
        match self {
            AuthFlowError::ProfileFetchError { status, .. }
            | AuthFlowError::BackendRejectedError { status, .. } => *status,
            _ => None,
        }
    }
}

impl actix_web::ResponseError for AuthFlowError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AuthFlowError::UnsupportedProvider(_) | AuthFlowError::UserCancelledError => {
                StatusCode::BAD_REQUEST
            }
            AuthFlowError::InvalidTransition(_) | AuthFlowError::StaleAttempt => StatusCode::CONFLICT,
            AuthFlowError::InitializationError(_) | AuthFlowError::NotInitializedError(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AuthFlowError::ConsentTimeout => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::BAD_GATEWAY,
        }
    }

    /// 모든 에러 응답은 `{"error": ..., "stage": ...}` 형식을 따릅니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        actix_web::HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string(),
            "stage": self.stage(),
        }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type FlowResult<T> = Result<T, AuthFlowError>;
