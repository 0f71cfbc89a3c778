use crate::core::attempt::AttemptId;
use crate::domain::models::profile::Profile;
use crate::domain::models::provider::Provider;
use crate::domain::models::token::AccessToken;
use crate::domain::models::user::User;

/// 로그인 시도 하나의 메모리 내 세션
///
/// 플로우가 단독으로 소유하며, 다른 시도가 시작되거나 사용자가 화면을 떠나면 버려집니다.
/// 어떤 필드도 디스크나 쿠키에 저장하지 않습니다.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub provider: Provider,
    pub attempt: AttemptId,
    pub access_token: Option<AccessToken>,
    pub profile: Option<Profile>,
    pub application_user: Option<User>,
}

impl AuthSession {
    pub fn new(provider: Provider, attempt: AttemptId) -> Self {
        Self {
            provider,
            attempt,
            access_token: None,
            profile: None,
            application_user: None,
        }
    }
}
