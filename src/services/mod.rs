//! 로그인 플로우의 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 각 서비스는 trait 뒤에 숨겨져 있어, 플로우는 HTTP 구현 대신
//! 테스트용 구현으로 교체해 구동할 수 있습니다.
//!
//! # Modules
//!
//! - [`provider`] - 프로바이더 토큰 클라이언트와 SDK 로더
//! - [`profile`] - 액세스 토큰으로 프로필 조회
//! - [`session`] - 백엔드 세션 부트스트랩
//! - [`flow`] - 위 세 단계를 순서대로 조율하는 상태 기계
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::flow::{AuthFlow, LogNavigator};
//! use crate::services::profile::HttpProfileFetcher;
//! use crate::services::session::HttpBootstrapClient;
//!
//! let settings = FlowSettings::from_env();
//! let timeout = settings.request_timeout;
//! let flow = AuthFlow::new(
//!     settings,
//!     clients,
//!     Arc::new(HttpProfileFetcher::from_env(timeout)?),
//!     Arc::new(HttpBootstrapClient::new(BackendConfig::session_uri(), timeout)?),
//!     Arc::new(LogNavigator),
//! );
//! ```

pub mod flow;
pub mod profile;
pub mod provider;
pub mod session;
