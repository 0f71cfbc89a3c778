//! # Identity Provider Client
//!
//! 프로바이더 토큰 클라이언트를 감쌉니다. OAuth 2.0 implicit 플로우로
//! 고정된 scope 집합에 대한 단기 액세스 토큰을 받습니다.
//!
//! ## 생명주기
//!
//! ```text
//! Uninitialized ──initialize()──► Ready ──teardown()──► Uninitialized
//!        │
//!        └── SDK 로드 실패 ──► Unavailable (영구, "로그인을 사용할 수 없음")
//! ```
//!
//! - `initialize`는 멱등입니다. 이미 Ready면 아무 일도 하지 않고, SDK가
//!   다른 클라이언트에 의해 이미 로드되어 있으면 다시 로드하지 않습니다.
//! - `request_access_token`은 초기화 전에 호출되면 `NotInitializedError`를 반환합니다.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use log::{debug, error, info, warn};

use crate::config::provider_config::ClientRegistration;
use crate::core::sdk_registry::{ProviderSdk, SdkLease, SdkLoader, SdkRegistry};
use crate::domain::dto::consent::{ConsentRequest, ProviderCallback};
use crate::domain::models::provider::Provider;
use crate::domain::models::token::AccessToken;
use crate::errors::errors::AuthFlowError;

/// 사용자가 동의를 취소했음을 뜻하는 프로바이더 에러 코드
const CANCELLATION_CODES: [&str; 4] = [
    "access_denied",
    "popup_closed",
    "popup_closed_by_user",
    "user_cancelled",
];

enum ClientState {
    Uninitialized,
    Ready { sdk: Arc<ProviderSdk>, _lease: SdkLease },
    Unavailable { _lease: SdkLease },
}

pub struct IdentityProviderClient {
    registration: ClientRegistration,
    state: Mutex<ClientState>,
}

impl IdentityProviderClient {
    pub fn new(registration: ClientRegistration) -> Self {
        Self {
            registration,
            state: Mutex::new(ClientState::Uninitialized),
        }
    }

    pub fn provider(&self) -> Provider {
        self.registration.provider
    }

    pub fn registration(&self) -> &ClientRegistration {
        &self.registration
    }

    /// 토큰 클라이언트를 초기화합니다.
    ///
    /// # Returns
    ///
    /// * `true` - 토큰을 요청할 수 있는 상태
    /// * `false` - SDK를 불러오지 못함. 이 클라이언트는 이후로도 사용할 수 없습니다
    pub async fn initialize(
        &self,
        registry: &Arc<SdkRegistry>,
        loader: Arc<dyn SdkLoader>,
        load_timeout: Duration,
    ) -> bool {
        let provider = self.provider();
        {
            match &*self.lock_state() {
                ClientState::Ready { .. } => {
                    debug!("[{}] 토큰 클라이언트가 이미 초기화되어 있습니다", provider);
                    return true;
                }
                ClientState::Unavailable { .. } => return false,
                ClientState::Uninitialized => {}
            }
        }

        info!(
            "[{}] 토큰 클라이언트 초기화 중 (scope: {})",
            provider,
            self.registration.scope_string()
        );

        let (lease, sdk) = registry
            .acquire(&self.registration.discovery_uri, loader, load_timeout)
            .await;

        let mut state = self.lock_state();
        if matches!(*state, ClientState::Ready { .. }) {
            // 동시에 들어온 다른 initialize가 먼저 끝났음. 여분의 lease는 여기서 반납됩니다.
            return true;
        }

        match sdk {
            Some(sdk) => {
                info!("[{}] 토큰 클라이언트 초기화 완료", provider);
                *state = ClientState::Ready { sdk, _lease: lease };
                true
            }
            None => {
                error!("[{}] SDK를 사용할 수 없어 로그인을 비활성화합니다", provider);
                *state = ClientState::Unavailable { _lease: lease };
                false
            }
        }
    }

    /// 동의 화면 URL을 만듭니다. UI가 이 URL을 팝업으로 열면 프로바이더 동의 화면이 뜹니다.
    ///
    /// # Errors
    ///
    /// * `NotInitializedError` - 아직 초기화되지 않음
    /// * `InitializationError` - 초기화가 실패하여 사용할 수 없음
    pub fn request_access_token(&self, state: &str) -> Result<ConsentRequest, AuthFlowError> {
        match &*self.lock_state() {
            ClientState::Uninitialized => Err(AuthFlowError::NotInitializedError(self.provider())),
            ClientState::Unavailable { .. } => Err(AuthFlowError::InitializationError(format!(
                "{} 로그인을 사용할 수 없습니다",
                self.provider().display_name()
            ))),
            ClientState::Ready { sdk, .. } => Ok(self.build_consent_request(sdk, state)),
        }
    }

    fn build_consent_request(&self, sdk: &ProviderSdk, state: &str) -> ConsentRequest {
        let scope = self.registration.scope_string();
        let params = [
            ("client_id", self.registration.client_id.as_str()),
            ("redirect_uri", self.registration.redirect_uri.as_str()),
            ("response_type", "token"),
            ("scope", scope.as_str()),
            ("state", state),
            ("include_granted_scopes", "true"),
            ("prompt", "select_account"),
        ];

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        let separator = if sdk.authorization_endpoint.contains('?') { '&' } else { '?' };

        ConsentRequest {
            provider: self.provider(),
            consent_url: format!("{}{}{}", sdk.authorization_endpoint, separator, query_string),
            state: state.to_string(),
        }
    }

    /// 프로바이더 콜백을 액세스 토큰으로 변환합니다.
    ///
    /// # Errors
    ///
    /// * `UserCancelledError` - 사용자가 동의 창을 닫거나 거부함
    /// * `ConsentError` - 그 외 프로바이더 에러 또는 토큰 누락
    pub fn accept_callback(&self, callback: &ProviderCallback) -> Result<AccessToken, AuthFlowError> {
        if let Some(code) = callback.error.as_deref() {
            if CANCELLATION_CODES.contains(&code) {
                return Err(AuthFlowError::UserCancelledError);
            }
            let description = callback.error_description.as_deref().unwrap_or("");
            warn!("[{}] 프로바이더 에러: {} {}", self.provider(), code, description);
            return Err(AuthFlowError::ConsentError(code.to_string()));
        }

        match callback.access_token.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => {
                let missing = self.missing_scopes(callback);
                if !missing.is_empty() {
                    warn!("[{}] 일부 scope가 허용되지 않았습니다: {}", self.provider(), missing.join(" "));
                }
                debug!("[{}] 토큰 유효 시간: {:?}초", self.provider(), callback.expires_in);
                Ok(AccessToken::new(token))
            }
            _ => Err(AuthFlowError::ConsentError("access_token 누락".to_string())),
        }
    }

    /// 요청했지만 콜백의 `scope`에 없는 항목. 프로바이더가 `scope`를 돌려주지 않으면 비어 있습니다.
    pub fn missing_scopes(&self, callback: &ProviderCallback) -> Vec<String> {
        let Some(granted) = callback.scope.as_deref() else {
            return Vec::new();
        };
        let granted = granted.split_whitespace().collect::<Vec<_>>();

        self.registration
            .scopes
            .iter()
            .filter(|scope| !granted.contains(&scope.as_str()))
            .cloned()
            .collect()
    }

    pub fn is_available(&self) -> bool {
        matches!(*self.lock_state(), ClientState::Ready { .. })
    }

    /// SDK lease를 반납하고 초기화 전 상태로 돌아갑니다.
    pub fn teardown(&self) {
        let mut state = self.lock_state();
        if !matches!(*state, ClientState::Uninitialized) {
            debug!("[{}] 토큰 클라이언트 해제", self.provider());
        }
        *state = ClientState::Uninitialized;
    }

    fn lock_state(&self) -> MutexGuard<'_, ClientState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
