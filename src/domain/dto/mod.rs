//! 외부와 주고받는 데이터 전송 객체
//!
//! - [`discovery`] - 프로바이더 OpenID 디스커버리 문서
//! - [`consent`] - 동의 화면 요청과 프로바이더 콜백
//! - [`userinfo`] - 프로바이더 userinfo 응답
//! - [`bootstrap`] - 백엔드 세션 엔드포인트 요청/응답
//! - [`snapshot`] - UI 뷰 모델

pub mod bootstrap;
pub mod consent;
pub mod discovery;
pub mod snapshot;
pub mod userinfo;

pub use bootstrap::*;
pub use consent::*;
pub use discovery::*;
pub use snapshot::*;
pub use userinfo::*;
