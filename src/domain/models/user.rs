use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 애플리케이션 역할 (`student`, `instructor`, ...)
///
/// 로그인 요청 시에는 UI가 요청한 역할을 보내지만,
/// 로그인 이후의 권한 판단에는 항상 백엔드가 돌려준 역할을 사용합니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Role(String);

impl Role {
    pub const STUDENT: &'static str = "student";

    pub fn student() -> Self {
        Self(Self::STUDENT.to_string())
    }

    /// 역할 문자열을 검증합니다. 공백을 제거하고 소문자로 정규화합니다.
    pub fn parse(value: &str) -> Result<Self, String> {
        let normalized = value.trim().to_lowercase();
        if normalized.is_empty() {
            return Err("역할은 비어 있을 수 없습니다".to_string());
        }
        if !normalized.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
            return Err(format!("허용되지 않는 역할 이름: {}", value));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::student()
    }
}

impl TryFrom<String> for Role {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.0
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 세션 부트스트랩 서비스가 돌려준 애플리케이션 사용자
///
/// 이 크레이트는 `id`와 `role`만 해석하며, 나머지 필드는 그대로 보존합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// 백엔드 식별자 (숫자, ObjectId 문자열 등 형식 불문)
    #[serde(alias = "_id")]
    pub id: Value,

    pub role: Role,

    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}
