//! 로그인 플로우 상태 기계 모듈
//!
//! - [`auth_flow`] - 시도 하나를 토큰 → 프로필 → 세션 → 리다이렉트까지 조율
//! - [`navigator`] - 로그인 성공 후 화면 이동

pub mod auth_flow;
pub mod navigator;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth_flow::*;
pub use navigator::*;
