//! 프로바이더 연동 서비스 모듈
//!
//! - [`identity_client`] - 토큰 클라이언트 (초기화, 동의 URL, 콜백 해석)
//! - [`sdk_loader`] - 디스커버리 문서를 가져오는 운영용 SDK 로더
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::provider::{HttpDiscoveryLoader, IdentityProviderClient};
//!
//! let client = IdentityProviderClient::new(registration);
//! let ready = client
//!     .initialize(&SdkRegistry::global(), Arc::new(HttpDiscoveryLoader::new()), timeout)
//!     .await;
//! let consent = client.request_access_token(&state)?;
//! ```

pub mod identity_client;
pub mod sdk_loader;

pub use identity_client::*;
pub use sdk_loader::*;
