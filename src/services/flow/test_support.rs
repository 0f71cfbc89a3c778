//! 테스트용 협력 객체
//!
//! 네트워크 없이 플로우를 구동하기 위한 가짜 SDK 로더, 프로필 조회기,
//! 세션 부트스트랩, 내비게이터를 제공합니다.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Notify;

use crate::config::flow_config::FlowSettings;
use crate::config::provider_config::{ClientRegistration, APPLE_DEFAULT_SCOPES, GOOGLE_DEFAULT_SCOPES};
use crate::core::sdk_registry::{ProviderSdk, SdkLoader, SdkRegistry};
use crate::domain::dto::discovery::DiscoveryDocument;
use crate::domain::models::profile::Profile;
use crate::domain::models::provider::Provider;
use crate::domain::models::token::AccessToken;
use crate::domain::models::user::{Role, User};
use crate::errors::errors::AuthFlowError;
use crate::services::flow::auth_flow::AuthFlow;
use crate::services::flow::navigator::Navigator;
use crate::services::profile::profile_fetcher::ProfileFetcher;
use crate::services::provider::identity_client::IdentityProviderClient;
use crate::services::session::bootstrap_client::SessionBootstrap;

enum LoaderBehavior {
    Ready,
    Failing,
    Hanging,
}

pub(crate) struct FakeSdkLoader {
    behavior: LoaderBehavior,
    loads: AtomicUsize,
}

impl FakeSdkLoader {
    pub(crate) fn ready() -> Self {
        Self::with(LoaderBehavior::Ready)
    }

    pub(crate) fn failing() -> Self {
        Self::with(LoaderBehavior::Failing)
    }

    /// 끝나지 않는 로드 (타임아웃 테스트용)
    pub(crate) fn hanging() -> Self {
        Self::with(LoaderBehavior::Hanging)
    }

    fn with(behavior: LoaderBehavior) -> Self {
        Self {
            behavior,
            loads: AtomicUsize::new(0),
        }
    }

    pub(crate) fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SdkLoader for FakeSdkLoader {
    async fn load(&self, source: &str) -> Result<ProviderSdk, AuthFlowError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            LoaderBehavior::Ready => Ok(DiscoveryDocument {
                issuer: "https://accounts.example.test".to_string(),
                authorization_endpoint: "https://accounts.example.test/o/oauth2/v2/auth".to_string(),
                scopes_supported: vec!["openid".to_string(), "email".to_string()],
            }),
            LoaderBehavior::Failing => Err(AuthFlowError::InitializationError(format!(
                "script failed to load: {}",
                source
            ))),
            LoaderBehavior::Hanging => {
                std::future::pending::<()>().await;
                unreachable!()
            }
        }
    }
}

pub(crate) fn registration(provider: Provider) -> ClientRegistration {
    let scopes = match provider {
        Provider::Google => GOOGLE_DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect(),
        Provider::Apple => APPLE_DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect(),
    };

    ClientRegistration {
        provider,
        client_id: format!("test-{}-client", provider),
        scopes,
        discovery_uri: format!("https://accounts.example.test/{}/.well-known/openid-configuration", provider),
        redirect_uri: "http://localhost:3000/auth/callback".to_string(),
    }
}

pub(crate) fn profile(email: &str, name: &str) -> Profile {
    Profile {
        email: email.to_string(),
        name: name.to_string(),
        picture: None,
    }
}

pub(crate) fn user(id: i64, role: &str) -> User {
    serde_json::from_value(json!({ "id": id, "role": role })).unwrap()
}

/// 미리 정해둔 결과를 돌려주는 프로필 조회기
///
/// `gated`로 만들면 요청이 들어온 뒤 `release`가 호출될 때까지 응답을 붙잡습니다.
pub(crate) struct ScriptedProfileFetcher {
    result: Mutex<Result<Profile, AuthFlowError>>,
    calls: AtomicUsize,
    providers: Mutex<Vec<Provider>>,
    tokens: Mutex<Vec<String>>,
    gate: Option<Notify>,
    entered: Notify,
}

impl ScriptedProfileFetcher {
    pub(crate) fn returning(result: Result<Profile, AuthFlowError>) -> Self {
        Self {
            result: Mutex::new(result),
            calls: AtomicUsize::new(0),
            providers: Mutex::new(Vec::new()),
            tokens: Mutex::new(Vec::new()),
            gate: None,
            entered: Notify::new(),
        }
    }

    pub(crate) fn gated(result: Result<Profile, AuthFlowError>) -> Self {
        Self {
            gate: Some(Notify::new()),
            ..Self::returning(result)
        }
    }

    pub(crate) fn set_result(&self, result: Result<Profile, AuthFlowError>) {
        *self.result.lock().unwrap() = result;
    }

    /// 요청이 조회기에 도달할 때까지 기다립니다.
    pub(crate) async fn wait_entered(&self) {
        self.entered.notified().await;
    }

    pub(crate) fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn providers(&self) -> Vec<Provider> {
        self.providers.lock().unwrap().clone()
    }

    pub(crate) fn tokens(&self) -> Vec<String> {
        self.tokens.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProfileFetcher for ScriptedProfileFetcher {
    async fn fetch_profile(&self, provider: Provider, token: &AccessToken) -> Result<Profile, AuthFlowError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.providers.lock().unwrap().push(provider);
        self.tokens.lock().unwrap().push(token.secret().to_string());
        self.entered.notify_one();

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        self.result.lock().unwrap().clone()
    }
}

/// 미리 정해둔 사용자를 돌려주는 세션 부트스트랩. `gated`는 조회기와 같은 방식으로 동작합니다.
pub(crate) struct ScriptedBootstrap {
    result: Mutex<Result<User, AuthFlowError>>,
    calls: AtomicUsize,
    requests: Mutex<Vec<(Profile, Role)>>,
    gate: Option<Notify>,
    entered: Notify,
}

impl ScriptedBootstrap {
    pub(crate) fn returning(result: Result<User, AuthFlowError>) -> Self {
        Self {
            result: Mutex::new(result),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            gate: None,
            entered: Notify::new(),
        }
    }

    pub(crate) fn gated(result: Result<User, AuthFlowError>) -> Self {
        Self {
            gate: Some(Notify::new()),
            ..Self::returning(result)
        }
    }

    pub(crate) fn set_result(&self, result: Result<User, AuthFlowError>) {
        *self.result.lock().unwrap() = result;
    }

    pub(crate) async fn wait_entered(&self) {
        self.entered.notified().await;
    }

    pub(crate) fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn requests(&self) -> Vec<(Profile, Role)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionBootstrap for ScriptedBootstrap {
    async fn bootstrap(&self, profile: &Profile, role: &Role, _provider_token: &AccessToken) -> Result<User, AuthFlowError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push((profile.clone(), role.clone()));
        self.entered.notify_one();

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        self.result.lock().unwrap().clone()
    }
}

#[derive(Default)]
pub(crate) struct RecordingNavigator {
    destinations: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub(crate) fn destinations(&self) -> Vec<String> {
        self.destinations.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, destination: &str) {
        self.destinations.lock().unwrap().push(destination.to_string());
    }
}

pub(crate) struct FlowHarness {
    pub(crate) flow: Arc<AuthFlow>,
    pub(crate) profiles: Arc<ScriptedProfileFetcher>,
    pub(crate) bootstrap: Arc<ScriptedBootstrap>,
    pub(crate) navigator: Arc<RecordingNavigator>,
    pub(crate) registry: Arc<SdkRegistry>,
}

/// Google, Apple 클라이언트가 모두 초기화된 플로우
pub(crate) async fn harness(profiles: ScriptedProfileFetcher, bootstrap: ScriptedBootstrap) -> FlowHarness {
    harness_with(FlowSettings::default(), profiles, bootstrap, Arc::new(FakeSdkLoader::ready())).await
}

pub(crate) async fn harness_with(
    settings: FlowSettings,
    profiles: ScriptedProfileFetcher,
    bootstrap: ScriptedBootstrap,
    loader: Arc<FakeSdkLoader>,
) -> FlowHarness {
    let profiles = Arc::new(profiles);
    let bootstrap = Arc::new(bootstrap);
    let navigator = Arc::new(RecordingNavigator::default());
    let registry = Arc::new(SdkRegistry::new());

    let clients = Provider::ALL
        .iter()
        .map(|provider| IdentityProviderClient::new(registration(*provider)))
        .collect();

    let flow = Arc::new(AuthFlow::new(
        settings,
        clients,
        profiles.clone(),
        bootstrap.clone(),
        navigator.clone(),
    ));
    flow.initialize_providers(&registry, loader).await;

    FlowHarness {
        flow,
        profiles,
        bootstrap,
        navigator,
        registry,
    }
}

/// 성공 경로용 기본 조회기/부트스트랩
pub(crate) fn happy_collaborators() -> (ScriptedProfileFetcher, ScriptedBootstrap) {
    (
        ScriptedProfileFetcher::returning(Ok(profile("a@b.com", "A B"))),
        ScriptedBootstrap::returning(Ok(user(1, "student"))),
    )
}
