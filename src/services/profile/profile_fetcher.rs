//! # Profile Fetcher
//!
//! 액세스 토큰으로 프로바이더 userinfo 엔드포인트를 호출해
//! 정규화된 [`Profile`]을 돌려줍니다.
//!
//! 실패하면 `ProfileFetchError`를 반환하며, 플로우는 그 자리에서 멈춥니다.
//! 부분적이거나 빈 프로필을 다음 단계로 넘기는 일은 없습니다.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error};

use crate::config::provider_config::ProviderConfig;
use crate::domain::dto::userinfo::ProviderUserInfo;
use crate::domain::models::profile::Profile;
use crate::domain::models::provider::Provider;
use crate::domain::models::token::AccessToken;
use crate::errors::errors::AuthFlowError;
use crate::utils::string_utils::truncate_for_log;

#[async_trait]
pub trait ProfileFetcher: Send + Sync {
    async fn fetch_profile(&self, provider: Provider, token: &AccessToken) -> Result<Profile, AuthFlowError>;
}

/// userinfo 엔드포인트를 HTTP로 호출하는 구현
pub struct HttpProfileFetcher {
    http: reqwest::Client,
    endpoints: HashMap<Provider, String>,
}

impl HttpProfileFetcher {
    /// # Errors
    ///
    /// HTTP 클라이언트를 만들지 못하면 `ProfileFetchError`
    pub fn new(endpoints: HashMap<Provider, String>, request_timeout: Duration) -> Result<Self, AuthFlowError> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| AuthFlowError::ProfileFetchError {
                status: None,
                reason: format!("HTTP 클라이언트 생성 실패: {}", e),
            })?;

        Ok(Self { http, endpoints })
    }

    /// 설정된 모든 프로바이더의 userinfo 엔드포인트로 생성합니다.
    pub fn from_env(request_timeout: Duration) -> Result<Self, AuthFlowError> {
        let endpoints = Provider::ALL
            .iter()
            .filter_map(|provider| ProviderConfig::userinfo_uri(*provider).map(|uri| (*provider, uri)))
            .collect();
        Self::new(endpoints, request_timeout)
    }
}

#[async_trait]
impl ProfileFetcher for HttpProfileFetcher {
    async fn fetch_profile(&self, provider: Provider, token: &AccessToken) -> Result<Profile, AuthFlowError> {
        let endpoint = self.endpoints.get(&provider).ok_or_else(|| AuthFlowError::ProfileFetchError {
            status: None,
            reason: format!("{} userinfo 엔드포인트가 설정되지 않았습니다", provider),
        })?;

        debug!("[{}] 프로필 조회: {} (token={})", provider, endpoint, token.fingerprint());

        let response = self
            .http
            .get(endpoint)
            .bearer_auth(token.secret())
            .send()
            .await
            .map_err(|e| {
                error!("[{}] stage=profile 요청 실패: {}", provider, e);
                AuthFlowError::ProfileFetchError {
                    status: None,
                    reason: format!("프로필 요청 실패: {}", e),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(
                "[{}] stage=profile status={} body={}",
                provider,
                status.as_u16(),
                truncate_for_log(&error_text, 200)
            );
            return Err(AuthFlowError::ProfileFetchError {
                status: Some(status.as_u16()),
                reason: format!("프로필 조회 실패: HTTP {}", status.as_u16()),
            });
        }

        let info = response.json::<ProviderUserInfo>().await.map_err(|e| {
            error!("[{}] stage=profile 응답 파싱 실패: {}", provider, e);
            AuthFlowError::ProfileFetchError {
                status: Some(status.as_u16()),
                reason: format!("프로필 응답 파싱 실패: {}", e),
            }
        })?;

        info.into_profile().map_err(|reason| {
            error!("[{}] stage=profile 프로필 검증 실패: {}", provider, reason);
            AuthFlowError::ProfileFetchError {
                status: Some(status.as_u16()),
                reason,
            }
        })
    }
}
