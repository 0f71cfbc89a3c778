//! 프로바이더 프로필 조회 서비스 모듈
//!
//! - [`profile_fetcher`] - `ProfileFetcher` trait과 HTTP 구현

pub mod profile_fetcher;

pub use profile_fetcher::*;
