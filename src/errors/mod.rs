//! 에러 타입 모듈
//!
//! - [`errors`] - 로그인 플로우 에러 분류와 HTTP 응답 매핑

pub mod errors;

pub use errors::*;
