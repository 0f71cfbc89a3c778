//! # Session Bootstrap Client
//!
//! 검증된 프로필과 요청 역할을 백엔드 세션 엔드포인트에 보내
//! 애플리케이션 사용자(세션)를 받아옵니다.
//!
//! ```text
//! POST {BACKEND_SESSION_URI}
//! Content-Type: application/json
//! Cookie: (cookie store)
//!
//! { "email": "a@b.com", "fullName": "A B", "role": "student" }
//!
//! 200 OK
//! { "user": { "id": 1, "role": "student", ... } }
//! ```
//!
//! 응답의 `user.role`이 이후 모든 권한 판단의 기준입니다.
//! 요청한 역할과 다를 수 있습니다.

use std::time::Duration;

use async_trait::async_trait;
use log::{error, info};

use crate::domain::dto::bootstrap::{BootstrapRequest, BootstrapResponse};
use crate::domain::models::profile::Profile;
use crate::domain::models::token::AccessToken;
use crate::domain::models::user::{Role, User};
use crate::errors::errors::AuthFlowError;
use crate::utils::string_utils::truncate_for_log;

#[async_trait]
pub trait SessionBootstrap: Send + Sync {
    async fn bootstrap(&self, profile: &Profile, role: &Role, provider_token: &AccessToken) -> Result<User, AuthFlowError>;
}

/// 쿠키 기반 세션을 사용하는 HTTP 구현
pub struct HttpBootstrapClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpBootstrapClient {
    /// # Errors
    ///
    /// HTTP 클라이언트(쿠키 저장소 포함)를 만들지 못하면 `BootstrapError`
    pub fn new(endpoint: impl Into<String>, request_timeout: Duration) -> Result<Self, AuthFlowError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(request_timeout)
            .build()
            .map_err(|e| AuthFlowError::BootstrapError(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl SessionBootstrap for HttpBootstrapClient {
    async fn bootstrap(&self, profile: &Profile, role: &Role, provider_token: &AccessToken) -> Result<User, AuthFlowError> {
        info!(
            "세션 부트스트랩 요청: {} (role={}, token={})",
            profile.email,
            role,
            provider_token.fingerprint()
        );

        let body = BootstrapRequest {
            email: &profile.email,
            full_name: &profile.name,
            role: role.as_str(),
        };

        let response = self
            .http
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("stage=bootstrap 요청 실패: {}", e);
                AuthFlowError::BootstrapError(format!("세션 요청 실패: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(
                "stage=bootstrap status={} body={}",
                status.as_u16(),
                truncate_for_log(&error_text, 200)
            );
            return Err(AuthFlowError::BackendRejectedError {
                status: Some(status.as_u16()),
                reason: format!("세션 생성 거절: HTTP {}", status.as_u16()),
            });
        }

        let parsed = response.json::<BootstrapResponse>().await.map_err(|e| {
            error!("stage=bootstrap 응답 파싱 실패: {}", e);
            AuthFlowError::BackendRejectedError {
                status: Some(status.as_u16()),
                reason: format!("세션 응답 파싱 실패: {}", e),
            }
        })?;

        let user = parsed.user.ok_or_else(|| {
            error!("stage=bootstrap 응답에 user가 없습니다");
            AuthFlowError::BackendRejectedError {
                status: Some(status.as_u16()),
                reason: "세션 응답에 user가 없습니다".to_string(),
            }
        })?;

        if user.role != *role {
            info!("백엔드가 역할을 {} → {} 로 결정했습니다", role, user.role);
        }

        Ok(user)
    }
}
