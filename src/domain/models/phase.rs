//! 로그인 플로우 상태 모델
//!
//! ```text
//! Idle ──select──► ProviderConsentPending ──token──► ProfileFetching ──profile──► Bootstrapping ──user──► Success ──delay──► Redirected
//!  ▲                      │                               │                            │
//!  │                      └────────── failure ────────────┴────────────────────────────┴──► Error
//!  └──────────────────────────────── retry / provider select ◄─────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::errors::AuthFlowError;

/// 플로우 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowPhase {
    #[default]
    Idle,
    ProviderConsentPending,
    ProfileFetching,
    Bootstrapping,
    Success,
    /// 리다이렉트까지 끝난 종료 상태
    Redirected,
    Error,
}

impl FlowPhase {
    /// 네트워크 단계가 진행 중인지 여부 (로딩 표시, 버튼 비활성화)
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            FlowPhase::ProviderConsentPending | FlowPhase::ProfileFetching | FlowPhase::Bootstrapping
        )
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, FlowPhase::Success | FlowPhase::Redirected)
    }
}

/// 실패가 발생할 수 있는 단계
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowStage {
    Consent,
    Profile,
    Bootstrap,
}

impl FlowStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlowStage::Consent => "consent",
            FlowStage::Profile => "profile",
            FlowStage::Bootstrap => "bootstrap",
        }
    }
}

/// 로그인 / 회원가입 모드
///
/// 플로우 자체는 동일하고 성공 메시지만 달라집니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    #[default]
    SignIn,
    SignUp,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            AuthMode::SignIn => AuthMode::SignUp,
            AuthMode::SignUp => AuthMode::SignIn,
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            AuthMode::SignIn => "로그인되었습니다! 대시보드로 이동합니다...",
            AuthMode::SignUp => "계정이 생성되었습니다! 대시보드로 이동합니다...",
        }
    }
}

/// `Error` 상태에 진입할 때 기록되는 실패 정보
///
/// `message`는 UI에 그대로 노출되므로 단계별 고정 문구만 사용합니다.
/// 원인 상세는 로그에만 남깁니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowFailure {
    pub stage: FlowStage,
    pub message: String,
    pub retryable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl FlowFailure {
    pub fn from_error(stage: FlowStage, error: &AuthFlowError) -> Self {
        let message = match (stage, error) {
            (_, AuthFlowError::ConsentTimeout) => {
                "로그인 응답 시간이 초과되었습니다. 다시 시도해주세요."
            }
            (FlowStage::Consent, _) => "로그인 동의 과정이 완료되지 않았습니다. 다시 시도해주세요.",
            (FlowStage::Profile, _) => "프로필 정보를 가져오지 못했습니다. 다시 시도해주세요.",
            (FlowStage::Bootstrap, _) => {
                "로그인 세션을 만들지 못했습니다. 잠시 후 다시 시도해주세요."
            }
        };

        Self {
            stage,
            message: message.to_string(),
            retryable: error.is_recoverable(),
            status: error.status(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_flight_phases() {
        assert!(FlowPhase::ProviderConsentPending.is_in_flight());
        assert!(FlowPhase::Bootstrapping.is_in_flight());
        assert!(!FlowPhase::Idle.is_in_flight());
        assert!(!FlowPhase::Error.is_in_flight());
        assert!(FlowPhase::Redirected.is_authenticated());
    }

    #[test]
    fn test_failure_message_does_not_leak_reason() {
        let error = AuthFlowError::ProfileFetchError {
            status: Some(401),
            reason: "invalid token ya29.secret".to_string(),
        };
        let failure = FlowFailure::from_error(FlowStage::Profile, &error);

        assert_eq!(failure.stage, FlowStage::Profile);
        assert_eq!(failure.status, Some(401));
        assert!(failure.retryable);
        assert!(!failure.message.contains("ya29"));
    }

    #[test]
    fn test_auth_mode_toggle() {
        assert_eq!(AuthMode::SignIn.toggled(), AuthMode::SignUp);
        assert_eq!(AuthMode::SignUp.toggled().toggled(), AuthMode::SignUp);
    }
}
