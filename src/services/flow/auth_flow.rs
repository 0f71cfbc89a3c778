//! # Auth Flow State Machine
//!
//! 로그인 시도 하나를 처음부터 끝까지 조율합니다.
//!
//! ```text
//! select_provider ──► ProviderConsentPending ──callback──► ProfileFetching ──► Bootstrapping ──► Success
//!                              │                                  │                  │              │
//!                      cancel → Idle                        실패 → Error       실패 → Error    지연 후
//!                      timeout → Error(consent)                                                     ▼
//!                                                                                              Redirected
//! ```
//!
//! ## 동시성 규칙
//!
//! - 상태는 `std::sync::Mutex` 안에 있고, 잠금은 `.await`를 넘어 유지되지 않습니다
//! - 비동기 단계가 끝날 때마다 시도 순번을 다시 확인하고, 활성 시도가 아니면 결과를 버립니다
//! - 다른 프로바이더를 선택하면 진행 중인 시도는 무효가 됩니다
//! - 콜백 이후의 프로필, 세션 단계는 요청과 분리된 task에서 실행됩니다.
//!   콜백 요청이 중간에 끊겨도 시도는 끝까지 진행되고, 결과는 스냅샷으로 확인합니다
//! - 프로필, 세션 요청은 각각 `request_timeout` 안에 끝나지 않으면 해당 단계의 에러가 됩니다
//! - 동의 타임아웃, 리다이렉트 지연, 단계 task는 다른 시도 선택이나 화면 이탈 시 중단됩니다
//!
//! # Examples
//!
//! ```rust,ignore
//! let consent = flow.select_provider(Provider::Google)?;
//! // UI가 consent.consent_url을 팝업으로 열고, 콜백 fragment를 돌려줌
//! let outcome = flow.on_provider_callback(callback).await;
//! let snapshot = flow.snapshot();
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures_util::future::join_all;
use log::{debug, info, warn};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::config::flow_config::FlowSettings;
use crate::core::attempt::{AttemptId, AttemptSequence, AttemptToken};
use crate::core::sdk_registry::{SdkLoader, SdkRegistry};
use crate::domain::dto::consent::{ConsentRequest, ProviderCallback};
use crate::domain::dto::snapshot::{FlowOutcome, FlowSnapshot, ProviderAvailability};
use crate::domain::models::phase::{AuthMode, FlowFailure, FlowPhase, FlowStage};
use crate::domain::models::provider::Provider;
use crate::domain::models::session::AuthSession;
use crate::domain::models::token::AccessToken;
use crate::errors::errors::{AuthFlowError, FlowResult};
use crate::services::flow::navigator::Navigator;
use crate::services::profile::profile_fetcher::ProfileFetcher;
use crate::services::provider::identity_client::IdentityProviderClient;
use crate::services::session::bootstrap_client::SessionBootstrap;

#[derive(Default)]
struct FlowInner {
    sequence: AttemptSequence,
    phase: FlowPhase,
    mode: AuthMode,
    session: Option<AuthSession>,
    /// 동의 화면에 실어 보낸 `state`. 콜백 하나가 소비합니다.
    pending_token: Option<AttemptToken>,
    failure: Option<FlowFailure>,
    redirected_to: Option<String>,
    consent_timer: Option<JoinHandle<()>>,
    /// 프로필 → 세션 단계를 실행 중인 task
    step_task: Option<JoinHandle<()>>,
    redirect_timer: Option<JoinHandle<()>>,
}

impl FlowInner {
    fn abort_tasks(&mut self) {
        let tasks = [
            self.consent_timer.take(),
            self.step_task.take(),
            self.redirect_timer.take(),
        ];
        for task in tasks.into_iter().flatten() {
            task.abort();
        }
    }

    /// 모드를 제외한 시도 상태를 비웁니다.
    fn reset_to_idle(&mut self) {
        self.phase = FlowPhase::Idle;
        self.session = None;
        self.pending_token = None;
        self.failure = None;
        self.redirected_to = None;
    }

    fn fail(&mut self, stage: FlowStage, error: &AuthFlowError) {
        self.phase = FlowPhase::Error;
        self.pending_token = None;
        self.failure = Some(FlowFailure::from_error(stage, error));
    }

    /// `attempt`가 여전히 활성 시도이고 플로우가 `phase`에 머물러 있는지
    fn is_active(&self, attempt: AttemptId, phase: FlowPhase) -> bool {
        self.sequence.is_current(attempt) && self.phase == phase
    }
}

fn lock_inner(inner: &Mutex<FlowInner>) -> MutexGuard<'_, FlowInner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct AuthFlow {
    settings: FlowSettings,
    clients: HashMap<Provider, Arc<IdentityProviderClient>>,
    profile_fetcher: Arc<dyn ProfileFetcher>,
    session_bootstrap: Arc<dyn SessionBootstrap>,
    navigator: Arc<dyn Navigator>,
    inner: Arc<Mutex<FlowInner>>,
}

impl AuthFlow {
    pub fn new(
        settings: FlowSettings,
        clients: Vec<IdentityProviderClient>,
        profile_fetcher: Arc<dyn ProfileFetcher>,
        session_bootstrap: Arc<dyn SessionBootstrap>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let clients = clients
            .into_iter()
            .map(|client| (client.provider(), Arc::new(client)))
            .collect();

        Self {
            settings,
            clients,
            profile_fetcher,
            session_bootstrap,
            navigator,
            inner: Arc::new(Mutex::new(FlowInner::default())),
        }
    }

    /// 등록된 모든 토큰 클라이언트를 동시에 초기화합니다.
    ///
    /// # Returns
    ///
    /// 사용 가능한 프로바이더 수. 0이면 로그인을 사용할 수 없습니다.
    pub async fn initialize_providers(&self, registry: &Arc<SdkRegistry>, loader: Arc<dyn SdkLoader>) -> usize {
        let load_timeout = self.settings.sdk_load_timeout;
        let results = join_all(
            self.clients
                .values()
                .map(|client| client.initialize(registry, Arc::clone(&loader), load_timeout)),
        )
        .await;

        results.into_iter().filter(|ready| *ready).count()
    }

    /// 프로바이더 버튼을 눌렀을 때 호출됩니다.
    ///
    /// 진행 중인 시도가 있으면 그 시도를 무효화하고 새 시도를 시작합니다.
    /// 반환된 동의 URL을 UI가 열어야 하며, 동의 타임아웃이 이 시점부터 흐릅니다.
    ///
    /// tokio 런타임 안에서 호출해야 합니다.
    ///
    /// # Errors
    ///
    /// * `UnsupportedProvider` - 등록되지 않은 프로바이더
    /// * `NotInitializedError` / `InitializationError` - 토큰 클라이언트를 사용할 수 없음
    /// * `InvalidTransition` - 이미 로그인이 끝난 상태
    pub fn select_provider(&self, provider: Provider) -> FlowResult<ConsentRequest> {
        let client = self
            .clients
            .get(&provider)
            .ok_or_else(|| AuthFlowError::UnsupportedProvider(provider.to_string()))?;

        let mut inner = lock_inner(&self.inner);
        if inner.phase.is_authenticated() {
            return Err(AuthFlowError::InvalidTransition(format!(
                "{:?} 상태에서는 프로바이더를 선택할 수 없습니다",
                inner.phase
            )));
        }

        let token = AttemptToken::issue(provider, inner.sequence.peek_next());
        let consent = client.request_access_token(&token.encode())?;

        if inner.phase.is_in_flight() {
            if let Some(previous) = &inner.session {
                info!(
                    "[{}] 진행 중인 시도 {} 를 {} 시도로 대체합니다",
                    previous.provider, previous.attempt, provider
                );
            }
        }
        inner.abort_tasks();

        let attempt = inner.sequence.begin();
        inner.reset_to_idle();
        inner.phase = FlowPhase::ProviderConsentPending;
        inner.session = Some(AuthSession::new(provider, attempt));
        inner.pending_token = Some(token);
        inner.consent_timer = Some(self.spawn_consent_timeout(attempt));

        info!("[{}] 시도 {} 시작: 동의 대기", provider, attempt);
        Ok(consent)
    }

    fn spawn_consent_timeout(&self, attempt: AttemptId) -> JoinHandle<()> {
        let inner = Arc::clone(&self.inner);
        let timeout = self.settings.consent_timeout;

        tokio::spawn(async move {
            tokio::time::sleep(timeout).await;

            let mut inner = lock_inner(&inner);
            if !inner.is_active(attempt, FlowPhase::ProviderConsentPending) {
                return;
            }
            warn!("stage=consent 시도 {} 동의 시간 초과 ({:?})", attempt, timeout);
            inner.consent_timer = None;
            inner.fail(FlowStage::Consent, &AuthFlowError::ConsentTimeout);
        })
    }

    /// 프로바이더 콜백을 처리하고 시도를 끝까지 진행합니다.
    ///
    /// 토큰 단계는 이 자리에서 처리하고, 프로필 → 세션 단계는 별도 task로 넘깁니다.
    /// 반환값은 그 task의 결과입니다. 호출한 쪽이 기다리기를 그만두어도
    /// (HTTP 연결 끊김 등) task는 계속 실행되어 시도를 성공이나 에러로 끝냅니다.
    pub async fn on_provider_callback(&self, callback: ProviderCallback) -> FlowOutcome {
        let (outcome_tx, outcome_rx) = oneshot::channel();

        {
            let mut inner = lock_inner(&self.inner);

            let matched = inner
                .pending_token
                .as_ref()
                .is_some_and(|pending| pending.matches(&callback.state));
            if !matched {
                debug!("활성 시도가 아닌 콜백을 무시합니다");
                return FlowOutcome::Discarded;
            }

            let Some((provider, attempt)) = inner.session.as_ref().map(|s| (s.provider, s.attempt)) else {
                return FlowOutcome::Discarded;
            };
            inner.pending_token = None;
            if let Some(timer) = inner.consent_timer.take() {
                timer.abort();
            }

            let Some(client) = self.clients.get(&provider) else {
                return FlowOutcome::Discarded;
            };

            let token = match client.accept_callback(&callback) {
                Ok(token) => token,
                Err(AuthFlowError::UserCancelledError) => {
                    info!("[{}] 시도 {} 사용자가 동의를 취소했습니다", provider, attempt);
                    inner.sequence.invalidate();
                    inner.reset_to_idle();
                    return FlowOutcome::Cancelled;
                }
                Err(e) => {
                    warn!("[{}] stage=consent 시도 {} 실패: {}", provider, attempt, e);
                    inner.fail(FlowStage::Consent, &e);
                    return FlowOutcome::Failed(FlowStage::Consent);
                }
            };

            if let Some(session) = inner.session.as_mut() {
                session.access_token = Some(token.clone());
            }
            inner.phase = FlowPhase::ProfileFetching;
            debug!("[{}] 시도 {} 토큰 수신 ({})", provider, attempt, token.fingerprint());

            let steps = self.steps();
            inner.step_task = Some(tokio::spawn(async move {
                let outcome = steps.run(provider, attempt, token).await;
                // 기다리는 쪽이 이미 떠났으면 결과는 스냅샷으로만 남습니다
                let _ = outcome_tx.send(outcome);
            }));
        }

        // 송신 측이 사라졌다면 task가 중단된 것 (다른 시도 선택, 화면 이탈)
        outcome_rx.await.unwrap_or(FlowOutcome::Discarded)
    }

    fn steps(&self) -> AttemptSteps {
        AttemptSteps {
            settings: self.settings.clone(),
            profile_fetcher: Arc::clone(&self.profile_fetcher),
            session_bootstrap: Arc::clone(&self.session_bootstrap),
            navigator: Arc::clone(&self.navigator),
            inner: Arc::clone(&self.inner),
        }
    }

    /// UI가 동의 창이 닫혔다고 알려온 경우. 에러 없이 Idle로 돌아갑니다.
    ///
    /// # Errors
    ///
    /// * `InvalidTransition` - 동의 대기 중이 아님
    pub fn cancel_consent(&self) -> FlowResult<()> {
        let mut inner = lock_inner(&self.inner);
        if inner.phase != FlowPhase::ProviderConsentPending {
            return Err(AuthFlowError::InvalidTransition(format!(
                "{:?} 상태에서는 동의를 취소할 수 없습니다",
                inner.phase
            )));
        }

        info!("동의 창이 닫혀 시도를 취소합니다");
        inner.abort_tasks();
        inner.sequence.invalidate();
        inner.reset_to_idle();
        Ok(())
    }

    /// 에러 배너를 닫고 Idle로 돌아갑니다.
    ///
    /// # Errors
    ///
    /// * `InvalidTransition` - Error 상태가 아님
    pub fn retry(&self) -> FlowResult<()> {
        let mut inner = lock_inner(&self.inner);
        if inner.phase != FlowPhase::Error {
            return Err(AuthFlowError::InvalidTransition(format!(
                "{:?} 상태에서는 재시도할 수 없습니다",
                inner.phase
            )));
        }

        inner.reset_to_idle();
        Ok(())
    }

    /// 로그인 / 회원가입 모드를 전환합니다. 진행 중이거나 로그인이 끝난 뒤에는 전환할 수 없습니다.
    pub fn toggle_mode(&self) -> FlowResult<AuthMode> {
        let mut inner = lock_inner(&self.inner);
        if inner.phase.is_in_flight() || inner.phase.is_authenticated() {
            return Err(AuthFlowError::InvalidTransition(format!(
                "{:?} 상태에서는 모드를 바꿀 수 없습니다",
                inner.phase
            )));
        }

        inner.mode = inner.mode.toggled();
        Ok(inner.mode)
    }

    /// 화면 이탈. 진행 중인 시도와 예약된 리다이렉트를 모두 취소합니다.
    pub fn leave(&self) {
        let mut inner = lock_inner(&self.inner);
        if inner.phase != FlowPhase::Idle {
            info!("화면 이탈: {:?} 상태의 시도를 정리합니다", inner.phase);
        }
        inner.abort_tasks();
        inner.sequence.invalidate();
        inner.reset_to_idle();
    }

    /// 화면 이탈 후 모든 토큰 클라이언트의 SDK lease를 반납합니다.
    pub fn teardown(&self) {
        self.leave();
        for client in self.clients.values() {
            client.teardown();
        }
    }

    pub fn current_attempt(&self) -> Option<AttemptId> {
        let inner = lock_inner(&self.inner);
        inner
            .session
            .as_ref()
            .map(|session| session.attempt)
            .filter(|attempt| inner.sequence.is_current(*attempt))
    }

    pub fn providers(&self) -> Vec<ProviderAvailability> {
        Provider::ALL
            .iter()
            .map(|provider| ProviderAvailability {
                provider: *provider,
                name: provider.display_name(),
                available: self.clients.get(provider).is_some_and(|client| client.is_available()),
            })
            .collect()
    }

    pub fn snapshot(&self) -> FlowSnapshot {
        let providers = self.providers();
        let sign_in_available = providers.iter().any(|entry| entry.available);

        let inner = lock_inner(&self.inner);
        let phase = inner.phase;
        let session = inner.session.as_ref();
        let user = session.and_then(|s| s.application_user.clone());

        FlowSnapshot {
            phase,
            mode: inner.mode,
            role: user
                .as_ref()
                .map(|u| u.role.clone())
                .unwrap_or_else(|| self.settings.role.clone()),
            selected_provider: session.map(|s| s.provider),
            loading_provider: session.map(|s| s.provider).filter(|_| phase.is_in_flight()),
            buttons_enabled: sign_in_available && !phase.is_in_flight() && !phase.is_authenticated(),
            sign_in_available,
            providers,
            profile: session.and_then(|s| s.profile.clone()),
            user,
            error: inner.failure.clone().filter(|_| phase == FlowPhase::Error),
            message: phase.is_authenticated().then(|| inner.mode.success_message().to_string()),
            redirect_to: inner.redirected_to.clone(),
        }
    }
}

impl Drop for AuthFlow {
    fn drop(&mut self) {
        lock_inner(&self.inner).abort_tasks();
    }
}

/// 토큰을 받은 뒤의 단계를 실행하는 데 필요한 것들의 소유 사본
struct AttemptSteps {
    settings: FlowSettings,
    profile_fetcher: Arc<dyn ProfileFetcher>,
    session_bootstrap: Arc<dyn SessionBootstrap>,
    navigator: Arc<dyn Navigator>,
    inner: Arc<Mutex<FlowInner>>,
}

impl AttemptSteps {
    /// 프로필 → 세션 순서로 실행합니다. 각 단계가 끝날 때 시도가 여전히 활성인지 확인합니다.
    async fn run(self, provider: Provider, attempt: AttemptId, token: AccessToken) -> FlowOutcome {
        let request_timeout = self.settings.request_timeout;

        let profile_result = tokio::time::timeout(request_timeout, self.profile_fetcher.fetch_profile(provider, &token))
            .await
            .unwrap_or_else(|_| {
                Err(AuthFlowError::ProfileFetchError {
                    status: None,
                    reason: format!("프로필 요청 시간 초과 ({:?})", request_timeout),
                })
            });

        let profile = {
            let mut inner = lock_inner(&self.inner);
            if !inner.is_active(attempt, FlowPhase::ProfileFetching) {
                debug!("[{}] 시도 {} 프로필 결과 폐기 (대체됨)", provider, attempt);
                return FlowOutcome::Discarded;
            }

            match profile_result {
                Ok(profile) => {
                    if let Some(session) = inner.session.as_mut() {
                        session.profile = Some(profile.clone());
                    }
                    inner.phase = FlowPhase::Bootstrapping;
                    profile
                }
                Err(e) => {
                    warn!("[{}] stage=profile 시도 {} 실패: {}", provider, attempt, e);
                    inner.step_task = None;
                    inner.fail(FlowStage::Profile, &e);
                    return FlowOutcome::Failed(FlowStage::Profile);
                }
            }
        };

        let bootstrap_result = tokio::time::timeout(
            request_timeout,
            self.session_bootstrap.bootstrap(&profile, &self.settings.role, &token),
        )
        .await
        .unwrap_or_else(|_| {
            Err(AuthFlowError::BootstrapError(format!(
                "세션 요청 시간 초과 ({:?})",
                request_timeout
            )))
        });

        let mut inner = lock_inner(&self.inner);
        if !inner.is_active(attempt, FlowPhase::Bootstrapping) {
            debug!("[{}] 시도 {} 세션 결과 폐기 (대체됨)", provider, attempt);
            return FlowOutcome::Discarded;
        }
        inner.step_task = None;

        match bootstrap_result {
            Ok(user) => {
                info!(
                    "[{}] 시도 {} 로그인 성공: {} (role={})",
                    provider, attempt, profile.email, user.role
                );
                if let Some(session) = inner.session.as_mut() {
                    session.application_user = Some(user);
                }
                inner.phase = FlowPhase::Success;
                inner.redirect_timer = Some(self.spawn_redirect(attempt));
                FlowOutcome::Succeeded
            }
            Err(e) => {
                warn!("[{}] stage=bootstrap 시도 {} 실패: {}", provider, attempt, e);
                inner.fail(FlowStage::Bootstrap, &e);
                FlowOutcome::Failed(FlowStage::Bootstrap)
            }
        }
    }

    fn spawn_redirect(&self, attempt: AttemptId) -> JoinHandle<()> {
        let inner = Arc::clone(&self.inner);
        let navigator = Arc::clone(&self.navigator);
        let delay = self.settings.redirect_delay;
        let destination = self.settings.landing_path.clone();

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            {
                let mut inner = lock_inner(&inner);
                if !inner.is_active(attempt, FlowPhase::Success) {
                    return;
                }
                inner.phase = FlowPhase::Redirected;
                inner.redirected_to = Some(destination.clone());
                inner.redirect_timer = None;
            }

            navigator.navigate(&destination);
        })
    }
}
