use std::env;

/// 게이트웨이 실행 프로필 (`PROFILE`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// `.env.dev`, 상세 로그
    Development,
    /// `.env.prod`
    Production,
    /// 기본 `.env`
    Default,
}

impl Environment {
    /// `PROFILE` 환경 변수로 현재 프로필을 결정합니다. 없으면 `dev`.
    pub fn current() -> Self {
        Self::parse(&env::var("PROFILE").unwrap_or_else(|_| "dev".to_string()))
    }

    pub fn parse(profile: &str) -> Self {
        match profile.trim().to_lowercase().as_str() {
            "dev" | "development" => Environment::Development,
            "prod" | "production" => Environment::Production,
            _ => Environment::Default,
        }
    }

    /// 로드할 env 파일 이름. `None`이면 기본 `.env`
    pub fn env_file(&self) -> Option<&'static str> {
        match self {
            Environment::Development => Some(".env.dev"),
            Environment::Production => Some(".env.prod"),
            Environment::Default => None,
        }
    }

    /// `RUST_LOG`가 없을 때 사용할 로그 필터
    pub fn default_log_filter(&self) -> &'static str {
        match self {
            Environment::Development => "debug,actix_web=info",
            _ => "info,actix_web=info",
        }
    }
}

/// 게이트웨이 HTTP 서버 설정
pub struct ServerConfig;

impl ServerConfig {
    pub fn port() -> u16 {
        env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .unwrap_or(8080)
    }

    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string())
    }

    /// CORS 허용 Origin 목록 (`UI_ORIGINS`, 쉼표 구분)
    pub fn ui_origins() -> Vec<String> {
        env::var("UI_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parse() {
        assert_eq!(Environment::parse("PROD"), Environment::Production);
        assert_eq!(Environment::parse("dev"), Environment::Development);
        assert_eq!(Environment::parse("local"), Environment::Default);
        assert_eq!(Environment::Default.env_file(), None);
        assert_eq!(Environment::Production.env_file(), Some(".env.prod"));
    }
}
