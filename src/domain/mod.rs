//! 도메인 계층
//!
//! - [`models`] - 로그인 시도 동안 메모리에서만 사용하는 모델
//! - [`dto`] - 프로바이더, 백엔드, UI와 주고받는 데이터

pub mod dto;
pub mod models;

pub use dto::*;
pub use models::*;
