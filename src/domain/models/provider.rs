use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::errors::AuthFlowError;

/// 지원하는 외부 ID 프로바이더
///
/// UI의 로그인 버튼 하나가 프로바이더 하나에 대응합니다.
/// JSON 및 URL 경로에서는 소문자(`"google"`, `"apple"`)로 표현됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Google,
    Apple,
}

impl Provider {
    /// 버튼 표시 순서대로 나열한 전체 프로바이더
    pub const ALL: [Provider; 2] = [Provider::Google, Provider::Apple];

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Google => "google",
            Provider::Apple => "apple",
        }
    }

    /// 사용자에게 보여줄 이름 ("Continue with Google")
    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::Google => "Google",
            Provider::Apple => "Apple",
        }
    }
}

impl FromStr for Provider {
    type Err = AuthFlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "google" => Ok(Provider::Google),
            "apple" => Ok(Provider::Apple),
            _ => Err(AuthFlowError::UnsupportedProvider(s.to_string())),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
