//! # Core Module
//!
//! 플로우 전반에서 공유하는 기반 기능입니다.
//!
//! ### [`sdk_registry`] - 프로세스 전역 SDK 보관소
//! - **단일 로드**: 같은 프로바이더 SDK는 동시 요청이 있어도 한 번만 로드
//! - **참조 카운트**: 마지막 사용자가 해제할 때 슬롯 제거
//! - **조용한 실패**: 로드 실패는 로그만 남기고 `None`으로 전달
//!
//! ### [`attempt`] - 로그인 시도 순번
//! - **단조 증가 순번**: 새 시도가 시작되면 이전 시도는 자동으로 무효
//! - **OAuth state**: 순번과 nonce를 `state`에 실어 늦은 콜백을 걸러냄
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use crate::core::{AttemptSequence, AttemptToken, SdkRegistry};
//!
//! let registry = SdkRegistry::global();
//! let (lease, sdk) = registry.acquire(&discovery_uri, loader, timeout).await;
//!
//! let mut sequence = AttemptSequence::default();
//! let attempt = sequence.begin();
//! let state = AttemptToken::issue(Provider::Google, attempt).encode();
//! ```

pub mod attempt;
pub mod sdk_registry;

pub use attempt::*;
pub use sdk_registry::*;
