use super::merchant::MerchantIdentity;
use super::payload::Payload;
use crate::error::Result;
use async_trait::async_trait;

/// Holds the most recently generated payload for each merchant identity.
///
/// Every successful store overwrites exactly one slot; there is no eviction
/// or deletion. Concurrent writers to the same identity are last-write-wins.
#[async_trait]
pub trait PayloadCache: Send + Sync {
    async fn store(&self, identity: MerchantIdentity, payload: Payload) -> Result<()>;
    async fn latest(&self, identity: MerchantIdentity) -> Result<Option<Payload>>;
}

/// Source of wall-clock time in milliseconds since the Unix epoch.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> u64;
}

pub type PayloadCacheBox = Box<dyn PayloadCache>;
pub type PayloadCacheFactory = Box<dyn Fn() -> PayloadCacheBox + Send + Sync>;
pub type ClockBox = Box<dyn Clock>;
