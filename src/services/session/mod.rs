//! 세션 부트스트랩 서비스 모듈
//!
//! - [`bootstrap_client`] - `SessionBootstrap` trait과 쿠키 기반 HTTP 구현

pub mod bootstrap_client;

pub use bootstrap_client::*;
