//! 동의 화면 요청/콜백 DTO
//!
//! 토큰 클라이언트는 implicit 플로우(`response_type=token`)를 사용하므로
//! 프로바이더는 리다이렉트 URI의 fragment로 결과를 돌려줍니다.
//! fragment는 서버로 전송되지 않기 때문에 UI의 콜백 페이지가
//! fragment를 파싱해 [`ProviderCallback`] 형태로 게이트웨이에 POST 합니다.

use serde::{Deserialize, Serialize};

use crate::domain::models::provider::Provider;

/// UI가 팝업으로 열어야 할 동의 화면
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsentRequest {
    pub provider: Provider,

    /// 프로바이더 동의 화면 전체 URL
    pub consent_url: String,

    /// 이번 시도의 OAuth `state`. 콜백에 그대로 돌아와야 합니다.
    pub state: String,
}

/// 프로바이더 콜백 fragment
///
/// 성공 시 `access_token`이, 실패 시 `error`가 채워집니다.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderCallback {
    pub state: String,

    #[serde(default)]
    pub access_token: Option<String>,

    #[serde(default)]
    pub expires_in: Option<u64>,

    #[serde(default)]
    pub scope: Option<String>,

    #[serde(default)]
    pub error: Option<String>,

    #[serde(default)]
    pub error_description: Option<String>,
}

impl ProviderCallback {
    pub fn granted(state: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            access_token: Some(access_token.into()),
            ..Self::default()
        }
    }

    pub fn failed(state: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            error: Some(error.into()),
            ..Self::default()
        }
    }
}
