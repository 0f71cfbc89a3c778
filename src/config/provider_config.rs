//! # Provider Configuration Module
//!
//! 프로바이더별 OAuth 클라이언트 등록 정보를 환경 변수에서 읽어옵니다.
//!
//! ## 환경 변수
//!
//! ```bash
//! # Google (필수: CLIENT_ID)
//! export GOOGLE_CLIENT_ID="173852556484-xxxx.apps.googleusercontent.com"
//! export GOOGLE_SCOPES="https://www.googleapis.com/auth/userinfo.profile https://www.googleapis.com/auth/userinfo.email"
//! export GOOGLE_DISCOVERY_URI="https://accounts.google.com/.well-known/openid-configuration"
//! export GOOGLE_USERINFO_URI="https://www.googleapis.com/oauth2/v2/userinfo"
//!
//! # Apple (CLIENT_ID, USERINFO_URI가 모두 있어야 활성화)
//! export APPLE_CLIENT_ID="io.architect.web"
//! export APPLE_USERINFO_URI="https://api.architect.io/apple/userinfo"
//!
//! # 공통
//! export OAUTH_REDIRECT_URI="http://localhost:3000/auth/callback"
//! ```

use std::env;

use crate::domain::models::provider::Provider;

/// Google 기본 scope: 프로필, 이메일, 그리고 영상 업로드 권한
pub const GOOGLE_DEFAULT_SCOPES: [&str; 3] = [
    "https://www.googleapis.com/auth/userinfo.profile",
    "https://www.googleapis.com/auth/userinfo.email",
    "https://www.googleapis.com/auth/youtube.upload",
];

pub const APPLE_DEFAULT_SCOPES: [&str; 2] = ["name", "email"];

/// 프로바이더 설정 접근자
///
/// 환경 변수 이름은 `{PROVIDER}_{KEY}` 규칙을 따릅니다.
pub struct ProviderConfig;

impl ProviderConfig {
    fn var(provider: Provider, key: &str) -> Option<String> {
        let name = format!("{}_{}", provider.as_str().to_uppercase(), key);
        env::var(name).ok().filter(|v| !v.trim().is_empty())
    }

    pub fn client_id(provider: Provider) -> Option<String> {
        Self::var(provider, "CLIENT_ID")
    }

    /// 공백으로 구분된 scope 목록
    pub fn scopes(provider: Provider) -> Vec<String> {
        match Self::var(provider, "SCOPES") {
            Some(raw) => raw.split_whitespace().map(str::to_string).collect(),
            None => match provider {
                Provider::Google => GOOGLE_DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect(),
                Provider::Apple => APPLE_DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect(),
            },
        }
    }

    pub fn discovery_uri(provider: Provider) -> String {
        Self::var(provider, "DISCOVERY_URI").unwrap_or_else(|| match provider {
            Provider::Google => "https://accounts.google.com/.well-known/openid-configuration".to_string(),
            Provider::Apple => "https://appleid.apple.com/.well-known/openid-configuration".to_string(),
        })
    }

    /// 프로필 조회 엔드포인트
    ///
    /// Apple은 공개 userinfo 엔드포인트가 없으므로 기본값이 없습니다.
    pub fn userinfo_uri(provider: Provider) -> Option<String> {
        Self::var(provider, "USERINFO_URI").or_else(|| match provider {
            Provider::Google => Some("https://www.googleapis.com/oauth2/v2/userinfo".to_string()),
            Provider::Apple => None,
        })
    }

    pub fn redirect_uri() -> String {
        env::var("OAUTH_REDIRECT_URI").unwrap_or_else(|_| "http://localhost:3000/auth/callback".to_string())
    }
}

/// 토큰 클라이언트 하나의 등록 정보
#[derive(Debug, Clone, PartialEq)]
pub struct ClientRegistration {
    pub provider: Provider,
    pub client_id: String,
    pub scopes: Vec<String>,
    pub discovery_uri: String,
    pub redirect_uri: String,
}

impl ClientRegistration {
    /// 환경 변수에서 등록 정보를 읽습니다.
    ///
    /// 클라이언트 ID나 userinfo 엔드포인트가 없으면 해당 프로바이더는 비활성화되고 `None`을 반환합니다.
    pub fn from_env(provider: Provider) -> Option<Self> {
        let Some(client_id) = ProviderConfig::client_id(provider) else {
            log::warn!("{} 클라이언트 ID가 설정되지 않아 비활성화합니다", provider.display_name());
            return None;
        };
        if ProviderConfig::userinfo_uri(provider).is_none() {
            log::warn!("{} userinfo 엔드포인트가 설정되지 않아 비활성화합니다", provider.display_name());
            return None;
        }

        Some(Self {
            provider,
            client_id,
            scopes: ProviderConfig::scopes(provider),
            discovery_uri: ProviderConfig::discovery_uri(provider),
            redirect_uri: ProviderConfig::redirect_uri(),
        })
    }

    /// OAuth `scope` 파라미터 값 (공백 구분)
    pub fn scope_string(&self) -> String {
        self.scopes.join(" ")
    }
}
