//! # Flow Configuration Module
//!
//! 로그인 플로우의 시간 제한, 리다이렉트 대상, 요청 역할,
//! 그리고 백엔드 세션 엔드포인트를 관리합니다.
//!
//! | 환경 변수 | 기본값 |
//! |-----------|--------|
//! | `AUTH_CONSENT_TIMEOUT_SECS` | `60` |
//! | `AUTH_REDIRECT_DELAY_MS` | `2000` |
//! | `AUTH_LANDING_PATH` | `/dashboard` |
//! | `AUTH_DEFAULT_ROLE` | `student` |
//! | `AUTH_SDK_LOAD_TIMEOUT_SECS` | `10` |
//! | `AUTH_REQUEST_TIMEOUT_SECS` | `15` |
//! | `BACKEND_SESSION_URI` | `http://localhost:3000/api/auth/loginwithgoogle` |

use std::env;
use std::str::FromStr;
use std::time::Duration;

use log::error;

use crate::domain::models::user::Role;

fn parse_env<T: FromStr>(name: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw.trim().parse::<T>().unwrap_or_else(|e| {
            error!("{} 파싱 실패: {}. 기본값 사용", name, e);
            default
        }),
        Err(_) => default,
    }
}

/// 플로우 시간/대상 설정 접근자
pub struct FlowConfig;

impl FlowConfig {
    /// 동의 창을 연 뒤 콜백을 기다리는 최대 시간
    pub fn consent_timeout() -> Duration {
        Duration::from_secs(parse_env("AUTH_CONSENT_TIMEOUT_SECS", 60u64))
    }

    /// 성공 화면을 보여준 뒤 리다이렉트하기까지의 지연
    pub fn redirect_delay() -> Duration {
        Duration::from_millis(parse_env("AUTH_REDIRECT_DELAY_MS", 2000u64))
    }

    pub fn landing_path() -> String {
        env::var("AUTH_LANDING_PATH").unwrap_or_else(|_| "/dashboard".to_string())
    }

    /// 로그인 시 요청할 역할. 잘못된 값이면 `student`
    pub fn default_role() -> Role {
        match env::var("AUTH_DEFAULT_ROLE") {
            Ok(raw) => Role::parse(&raw).unwrap_or_else(|e| {
                error!("AUTH_DEFAULT_ROLE 파싱 실패: {}. student 사용", e);
                Role::student()
            }),
            Err(_) => Role::student(),
        }
    }

    /// 프로바이더 SDK(디스커버리 문서) 로드 제한 시간
    pub fn sdk_load_timeout() -> Duration {
        Duration::from_secs(parse_env("AUTH_SDK_LOAD_TIMEOUT_SECS", 10u64))
    }

    /// 프로필 조회, 세션 부트스트랩 요청 하나의 최대 대기 시간
    pub fn request_timeout() -> Duration {
        Duration::from_secs(parse_env("AUTH_REQUEST_TIMEOUT_SECS", 15u64))
    }
}

/// 백엔드 세션 엔드포인트 설정
pub struct BackendConfig;

impl BackendConfig {
    pub fn session_uri() -> String {
        env::var("BACKEND_SESSION_URI")
            .unwrap_or_else(|_| "http://localhost:3000/api/auth/loginwithgoogle".to_string())
    }
}

/// 플로우 인스턴스 하나에 적용되는 설정
#[derive(Debug, Clone, PartialEq)]
pub struct FlowSettings {
    pub role: Role,
    pub consent_timeout: Duration,
    pub redirect_delay: Duration,
    pub landing_path: String,
    pub sdk_load_timeout: Duration,
    pub request_timeout: Duration,
}

impl FlowSettings {
    pub fn from_env() -> Self {
        Self {
            role: FlowConfig::default_role(),
            consent_timeout: FlowConfig::consent_timeout(),
            redirect_delay: FlowConfig::redirect_delay(),
            landing_path: FlowConfig::landing_path(),
            sdk_load_timeout: FlowConfig::sdk_load_timeout(),
            request_timeout: FlowConfig::request_timeout(),
        }
    }
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            role: Role::student(),
            consent_timeout: Duration::from_secs(60),
            redirect_delay: Duration::from_millis(2000),
            landing_path: "/dashboard".to_string(),
            sdk_load_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(15),
        }
    }
}
