//! UI 뷰 모델 DTO
//!
//! UI는 [`FlowSnapshot`]만 보고 버튼 활성화, 로딩 표시, 에러 배너,
//! 성공 화면, 리다이렉트를 결정합니다.

use serde::Serialize;

use crate::domain::models::phase::{AuthMode, FlowFailure, FlowPhase, FlowStage};
use crate::domain::models::profile::Profile;
use crate::domain::models::provider::Provider;
use crate::domain::models::user::{Role, User};

/// 프로바이더 버튼 하나의 상태
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderAvailability {
    pub provider: Provider,
    pub name: &'static str,
    /// SDK 초기화가 끝나 로그인을 시작할 수 있는지 여부
    pub available: bool,
}

/// 플로우의 현재 상태
#[derive(Debug, Clone, Serialize)]
pub struct FlowSnapshot {
    pub phase: FlowPhase,
    pub mode: AuthMode,

    /// 로그인 전에는 요청 역할, 성공 후에는 백엔드가 정한 역할
    pub role: Role,

    pub selected_provider: Option<Provider>,

    /// 로딩 스피너를 표시할 버튼
    pub loading_provider: Option<Provider>,

    pub buttons_enabled: bool,

    /// 사용 가능한 프로바이더가 하나도 없으면 false ("로그인을 사용할 수 없음")
    pub sign_in_available: bool,

    pub providers: Vec<ProviderAvailability>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<FlowFailure>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
}

/// 프로바이더 콜백 하나를 처리한 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "stage", rename_all = "snake_case")]
pub enum FlowOutcome {
    /// 활성 시도가 아니어서 무시됨
    Discarded,
    /// 사용자가 동의를 취소하여 Idle로 복귀
    Cancelled,
    /// 해당 단계에서 실패하여 Error로 전이
    Failed(FlowStage),
    /// Success 도달
    Succeeded,
}

/// `POST /callback` 응답
///
/// ```json
/// { "outcome": "failed", "stage": "profile", "snapshot": { "phase": "error", ... } }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct CallbackResponse {
    #[serde(flatten)]
    pub outcome: FlowOutcome,
    pub snapshot: FlowSnapshot,
}
