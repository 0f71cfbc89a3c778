//! # Provider SDK Registry
//!
//! 프로세스 전역에서 공유되는 프로바이더 SDK(디스커버리 문서) 보관소입니다.
//! 브라우저에서 `<script>` 태그를 한 번만 주입하고 여러 컴포넌트가 공유하는 것과 같은 역할을 합니다.
//!
//! ## 동작 방식
//!
//! ```text
//! acquire(source) ──► 슬롯 있음? ──yes──► holders += 1, 진행 중/완료된 로드 공유
//!                        │
//!                        no
//!                        ▼
//!                  로드 시작 (timeout 포함) + 슬롯 등록 (holders = 1)
//!
//! SdkLease drop ──► holders -= 1 ──► 0 이면 슬롯 제거 (teardown)
//! ```
//!
//! - 같은 source에 대한 로드는 동시 요청이 몇 개든 **한 번만** 실행됩니다
//! - 로드 실패/타임아웃은 로그만 남기고 `None`을 공유합니다 (패닉 없음)
//! - 실패한 슬롯도 마지막 lease가 해제될 때까지 유지되어, 같은 수명 동안 재시도하지 않습니다

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::{BoxFuture, FutureExt, Shared};
use log::{debug, error, info};
use once_cell::sync::Lazy;

use crate::domain::dto::discovery::DiscoveryDocument;
use crate::errors::errors::AuthFlowError;

/// 로드된 프로바이더 SDK
pub type ProviderSdk = DiscoveryDocument;

/// SDK를 실제로 가져오는 주체
///
/// 운영 환경에서는 [`crate::services::provider::HttpDiscoveryLoader`]를 사용합니다.
#[async_trait]
pub trait SdkLoader: Send + Sync {
    async fn load(&self, source: &str) -> Result<ProviderSdk, AuthFlowError>;
}

type SharedLoad = Shared<BoxFuture<'static, Option<Arc<ProviderSdk>>>>;

struct SdkSlot {
    load: SharedLoad,
    holders: usize,
}

/// 참조 카운트 기반 SDK 보관소
pub struct SdkRegistry {
    slots: Mutex<HashMap<String, SdkSlot>>,
}

static GLOBAL_REGISTRY: Lazy<Arc<SdkRegistry>> = Lazy::new(|| Arc::new(SdkRegistry::new()));

impl SdkRegistry {
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// 프로세스 전역 보관소
    pub fn global() -> Arc<SdkRegistry> {
        Arc::clone(&GLOBAL_REGISTRY)
    }

    /// SDK 사용권을 획득하고 로드 결과를 기다립니다.
    ///
    /// 반환된 [`SdkLease`]를 들고 있는 동안 슬롯이 유지됩니다.
    /// 로드에 실패했으면 두 번째 값이 `None`입니다.
    pub async fn acquire(
        self: &Arc<Self>,
        source: &str,
        loader: Arc<dyn SdkLoader>,
        load_timeout: Duration,
    ) -> (SdkLease, Option<Arc<ProviderSdk>>) {
        let load = {
            let mut slots = self.lock_slots();
            match slots.get_mut(source) {
                Some(slot) => {
                    slot.holders += 1;
                    debug!("SDK 재사용: {} (holders={})", source, slot.holders);
                    slot.load.clone()
                }
                None => {
                    info!("📦 SDK 로드 시작: {}", source);
                    let load = Self::start_load(source.to_string(), loader, load_timeout);
                    slots.insert(
                        source.to_string(),
                        SdkSlot {
                            load: load.clone(),
                            holders: 1,
                        },
                    );
                    load
                }
            }
        };

        let lease = SdkLease {
            registry: Arc::clone(self),
            source: source.to_string(),
        };

        (lease, load.await)
    }

    fn start_load(source: String, loader: Arc<dyn SdkLoader>, load_timeout: Duration) -> SharedLoad {
        async move {
            match tokio::time::timeout(load_timeout, loader.load(&source)).await {
                Ok(Ok(sdk)) => {
                    info!("✅ SDK 로드 완료: {} (issuer: {})", source, sdk.issuer);
                    Some(Arc::new(sdk))
                }
                Ok(Err(e)) => {
                    error!("SDK 로드 실패: {} - {}", source, e);
                    None
                }
                Err(_) => {
                    error!("SDK 로드 시간 초과 ({:?}): {}", load_timeout, source);
                    None
                }
            }
        }
        .boxed()
        .shared()
    }

    /// 현재 source를 붙잡고 있는 lease 수
    pub fn holders(&self, source: &str) -> usize {
        self.lock_slots().get(source).map_or(0, |slot| slot.holders)
    }

    /// source에 대한 슬롯(주입된 스크립트)이 존재하는지
    pub fn contains(&self, source: &str) -> bool {
        self.lock_slots().contains_key(source)
    }

    fn release(&self, source: &str) {
        let mut slots = self.lock_slots();
        let remove = match slots.get_mut(source) {
            Some(slot) => {
                slot.holders = slot.holders.saturating_sub(1);
                slot.holders == 0
            }
            None => false,
        };

        if remove {
            slots.remove(source);
            info!("SDK 해제: {}", source);
        }
    }

    fn lock_slots(&self) -> MutexGuard<'_, HashMap<String, SdkSlot>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SdkRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// SDK 사용권. drop 시 참조 카운트가 감소합니다.
pub struct SdkLease {
    registry: Arc<SdkRegistry>,
    source: String,
}

impl fmt::Debug for SdkLease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SdkLease").field("source", &self.source).finish()
    }
}

impl Drop for SdkLease {
    fn drop(&mut self) {
        self.registry.release(&self.source);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::flow::test_support::FakeSdkLoader;

    const SOURCE: &str = "https://accounts.example.test/.well-known/openid-configuration";

    #[tokio::test]
    async fn test_repeated_acquire_loads_once() {
        let registry = Arc::new(SdkRegistry::new());
        let loader = Arc::new(FakeSdkLoader::ready());

        let (first, sdk_a) = registry.acquire(SOURCE, loader.clone(), Duration::from_secs(1)).await;
        let (second, sdk_b) = registry.acquire(SOURCE, loader.clone(), Duration::from_secs(1)).await;

        assert!(sdk_a.is_some());
        assert!(sdk_b.is_some());
        assert_eq!(loader.load_count(), 1);
        assert_eq!(registry.holders(SOURCE), 2);

        drop(first);
        assert_eq!(registry.holders(SOURCE), 1);
        assert!(registry.contains(SOURCE));

        drop(second);
        assert!(!registry.contains(SOURCE));
    }

    #[tokio::test]
    async fn test_concurrent_acquire_shares_single_load() {
        let registry = Arc::new(SdkRegistry::new());
        let loader = Arc::new(FakeSdkLoader::ready());

        let ((_a, sdk_a), (_b, sdk_b)) = futures_util::future::join(
            registry.acquire(SOURCE, loader.clone(), Duration::from_secs(1)),
            registry.acquire(SOURCE, loader.clone(), Duration::from_secs(1)),
        )
        .await;

        assert_eq!(loader.load_count(), 1);
        assert_eq!(sdk_a, sdk_b);
    }

    #[tokio::test]
    async fn test_failed_load_yields_none() {
        let registry = Arc::new(SdkRegistry::new());
        let loader = Arc::new(FakeSdkLoader::failing());

        let (_lease, sdk) = registry.acquire(SOURCE, loader.clone(), Duration::from_secs(1)).await;
        let (_again, sdk_again) = registry.acquire(SOURCE, loader.clone(), Duration::from_secs(1)).await;

        assert!(sdk.is_none());
        assert!(sdk_again.is_none());
        assert_eq!(loader.load_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_load_times_out() {
        let registry = Arc::new(SdkRegistry::new());
        let loader = Arc::new(FakeSdkLoader::hanging());

        let (_lease, sdk) = registry.acquire(SOURCE, loader, Duration::from_secs(10)).await;

        assert!(sdk.is_none());
    }
}
