//! # Configuration Module
//!
//! 로그인 게이트웨이의 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값들을 중앙집중식으로 관리하며,
//! `main`에서 `.env.{PROFILE}` 파일을 먼저 로드합니다.
//!
//! ## 모듈 구성
//!
//! - [`provider_config`] - 프로바이더 OAuth 클라이언트 등록 정보
//! - [`flow_config`] - 플로우 시간 제한, 리다이렉트, 역할, 백엔드 엔드포인트
//! - [`server_config`] - HTTP 서버 바인딩과 CORS Origin
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{ClientRegistration, FlowSettings};
//! use crate::domain::Provider;
//!
//! let settings = FlowSettings::from_env();
//! let google = ClientRegistration::from_env(Provider::Google);
//! ```

pub mod flow_config;
pub mod provider_config;
pub mod server_config;

pub use flow_config::*;
pub use provider_config::*;
pub use server_config::*;
