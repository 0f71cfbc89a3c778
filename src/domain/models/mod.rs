//! 도메인 모델
//!
//! 로그인 시도 동안 메모리에서만 살아있는 값들입니다.
//!
//! - [`provider`] - 지원 프로바이더 (Google, Apple)
//! - [`token`] - 지문만 노출하는 액세스 토큰
//! - [`profile`] - 정규화된 프로바이더 프로필
//! - [`user`] - 백엔드가 돌려준 사용자와 역할
//! - [`session`] - 시도 하나의 세션
//! - [`phase`] - 플로우 상태, 실패 단계, 로그인 모드

pub mod phase;
pub mod profile;
pub mod provider;
pub mod session;
pub mod token;
pub mod user;

pub use phase::*;
pub use profile::*;
pub use provider::*;
pub use session::*;
pub use token::*;
pub use user::*;
