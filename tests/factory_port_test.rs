use khqr_gen::build_payload_at;
use khqr_gen::domain::amount::TransactionAmount;
use khqr_gen::domain::merchant::MerchantIdentity;
use khqr_gen::domain::ports::{PayloadCacheBox, PayloadCacheFactory};
use khqr_gen::infrastructure::in_memory::InMemoryPayloadCache;
use rust_decimal_macros::dec;

#[tokio::test]
async fn test_factory_instantiation() {
    let factory: PayloadCacheFactory =
        Box::new(|| Box::new(InMemoryPayloadCache::new()) as PayloadCacheBox);

    let cache = factory();
    let payload = build_payload_at(
        MerchantIdentity::Id1,
        TransactionAmount::new(dec!(4.2)).unwrap(),
        1_700_000_000_000,
    );

    cache.store(MerchantIdentity::Id1, payload.clone()).await.unwrap();
    assert_eq!(cache.latest(MerchantIdentity::Id1).await.unwrap(), Some(payload));
}

#[tokio::test]
async fn test_factory_instances_are_independent() {
    let factory: PayloadCacheFactory =
        Box::new(|| Box::new(InMemoryPayloadCache::new()) as PayloadCacheBox);

    let first = factory();
    let second = factory();
    let payload = build_payload_at(
        MerchantIdentity::Id2,
        TransactionAmount::new(dec!(1)).unwrap(),
        1_700_000_000_000,
    );

    first.store(MerchantIdentity::Id2, payload).await.unwrap();
    assert!(second.latest(MerchantIdentity::Id2).await.unwrap().is_none());
}
