//! OpenID 디스커버리 문서 로더
//!
//! [`SdkLoader`]의 운영용 구현입니다. 프로바이더의
//! `/.well-known/openid-configuration`을 받아와 동의 화면 엔드포인트를 얻습니다.

use async_trait::async_trait;

use crate::core::sdk_registry::{ProviderSdk, SdkLoader};
use crate::errors::errors::AuthFlowError;

pub struct HttpDiscoveryLoader {
    http: reqwest::Client,
}

impl HttpDiscoveryLoader {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }
}

impl Default for HttpDiscoveryLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SdkLoader for HttpDiscoveryLoader {
    async fn load(&self, source: &str) -> Result<ProviderSdk, AuthFlowError> {
        let response = self
            .http
            .get(source)
            .send()
            .await
            .map_err(|e| AuthFlowError::InitializationError(format!("디스커버리 요청 실패: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthFlowError::InitializationError(format!(
                "디스커버리 응답 오류: HTTP {}",
                status.as_u16()
            )));
        }

        response
            .json::<ProviderSdk>()
            .await
            .map_err(|e| AuthFlowError::InitializationError(format!("디스커버리 문서 파싱 실패: {}", e)))
    }
}
