use std::fmt;

use crate::utils::token_utils::fingerprint;

/// 프로바이더가 발급한 단기 액세스 토큰
///
/// `Debug`와 `Display`는 원문 대신 SHA-256 지문만 출력합니다.
/// 원문이 필요한 곳(Authorization 헤더)에서만 [`AccessToken::secret`]을 사용하세요.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }

    pub fn fingerprint(&self) -> String {
        fingerprint(&self.0)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccessToken({})", self.fingerprint())
    }
}

impl fmt::Display for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fingerprint())
    }
}
