use serde::{Deserialize, Serialize};
use validator::Validate;

/// 프로바이더가 돌려준 사용자 프로필
///
/// 한 번 조회된 뒤에는 변경되지 않습니다.
/// 원본 userinfo 응답은 [`crate::domain::dto::userinfo::ProviderUserInfo`]를 거쳐
/// 정규화된 뒤 이 타입이 됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Profile {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub name: String,

    /// 프로필 이미지 URL
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(url)]
    pub picture: Option<String>,
}
