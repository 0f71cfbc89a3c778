//! OpenID 디스커버리 문서 DTO
//!
//! 프로바이더 SDK를 "로드"한다는 것은 이 문서를 받아오는 것을 의미합니다.
//! 동의 화면 URL(`authorization_endpoint`)은 여기서 얻습니다.

use serde::Deserialize;

/// `/.well-known/openid-configuration` 응답 중 사용하는 필드
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DiscoveryDocument {
    pub issuer: String,

    pub authorization_endpoint: String,

    #[serde(default)]
    pub scopes_supported: Vec<String>,
}
