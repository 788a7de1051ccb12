use crate::domain::merchant::MerchantIdentity;
use crate::domain::payload::Payload;
use crate::domain::ports::PayloadCache;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

const SLOTS: usize = MerchantIdentity::ALL.len();

/// A thread-safe in-memory cache of the latest payload per identity.
///
/// Uses `Arc<RwLock<[Option<Payload>; 6]>>`, one slot per identity, all unset
/// at construction. Contents live for the lifetime of the process.
#[derive(Default, Clone)]
pub struct InMemoryPayloadCache {
    slots: Arc<RwLock<[Option<Payload>; SLOTS]>>,
}

impl InMemoryPayloadCache {
    /// Creates a cache with every slot empty.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PayloadCache for InMemoryPayloadCache {
    async fn store(&self, identity: MerchantIdentity, payload: Payload) -> Result<()> {
        let mut slots = self.slots.write().await;
        slots[identity.index()] = Some(payload);
        Ok(())
    }

    async fn latest(&self, identity: MerchantIdentity) -> Result<Option<Payload>> {
        let slots = self.slots.read().await;
        Ok(slots[identity.index()].clone())
    }
}
