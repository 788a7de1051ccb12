use crate::domain::amount::TransactionAmount;
use crate::domain::merchant::MerchantIdentity;
use crate::domain::payload::{Payload, build_payload_at};
use crate::domain::ports::{ClockBox, PayloadCacheBox};
use crate::error::{KhqrError, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

/// A request to generate a payload, as carried by HTTP bodies and CLI input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateRequest {
    /// Amount exactly as supplied: a JSON number or a numeric string.
    #[serde(default)]
    pub amount: Value,
    #[serde(default)]
    pub id: Option<String>,
}

impl GenerateRequest {
    pub fn new(amount: impl Into<Value>, id: Option<&str>) -> Self {
        Self {
            amount: amount.into(),
            id: id.map(str::to_string),
        }
    }
}

/// The result of a successful generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQr {
    pub id: MerchantIdentity,
    pub qr_string: Payload,
    pub md5_hash: String,
    /// Echo of the requested amount.
    pub amount: Value,
    /// Generation time, RFC 3339 with millisecond precision.
    pub timestamp: String,
}

/// Generates payloads and keeps the latest one per merchant identity.
///
/// The service owns its cache and clock. Amount and identity validation happen
/// here; the payload builder itself trusts its inputs.
pub struct KhqrService {
    cache: PayloadCacheBox,
    clock: ClockBox,
}

impl KhqrService {
    pub fn new(cache: PayloadCacheBox, clock: ClockBox) -> Self {
        Self { cache, clock }
    }

    /// Validates the request, builds the payload and stores it as the latest
    /// for its identity.
    pub async fn generate(&self, request: GenerateRequest) -> Result<GeneratedQr> {
        let amount = TransactionAmount::from_json(&request.amount)?;
        let identity = parse_identity(request.id.as_deref())?;

        let millis = self.clock.now_millis();
        let payload = build_payload_at(identity, amount, millis);
        let md5_hash = payload.md5_hex();

        self.cache.store(identity, payload.clone()).await?;
        info!(id = %identity, amount = %amount, checksum = payload.checksum(), "payload generated");

        Ok(GeneratedQr {
            id: identity,
            qr_string: payload,
            md5_hash,
            amount: request.amount,
            timestamp: iso_timestamp(millis),
        })
    }

    /// Returns the latest payload generated for `id` (default `ID1`).
    pub async fn latest(&self, id: Option<&str>) -> Result<Payload> {
        let identity = parse_identity(id)?;
        match self.cache.latest(identity).await? {
            Some(payload) => Ok(payload),
            None => {
                debug!(id = %identity, "no payload cached");
                Err(KhqrError::NotFound(identity))
            }
        }
    }
}

/// Strict identity parsing for caller input: absent or empty means `ID1`.
fn parse_identity(id: Option<&str>) -> Result<MerchantIdentity> {
    match id {
        Some(tag) if !tag.is_empty() => tag.parse(),
        _ => Ok(MerchantIdentity::default()),
    }
}

fn iso_timestamp(millis: u64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis as i64)
        .unwrap_or_else(Utc::now)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::SteppingClock;
    use crate::infrastructure::in_memory::InMemoryPayloadCache;
    use serde_json::json;

    fn service() -> KhqrService {
        KhqrService::new(
            Box::new(InMemoryPayloadCache::new()),
            Box::new(SteppingClock::starting_at(1_700_000_000_000)),
        )
    }

    #[tokio::test]
    async fn test_generate_defaults_to_first_identity() {
        let service = service();
        let qr = service.generate(GenerateRequest::new(12, None)).await.unwrap();

        assert_eq!(qr.id, MerchantIdentity::Id1);
        assert_eq!(qr.qr_string.checksum(), "A7B9");
        assert_eq!(qr.md5_hash, "439df5b8eff5fd7b4c760c857e3c1feb");
        assert_eq!(qr.amount, json!(12));
        assert_eq!(qr.timestamp, "2023-11-14T22:13:20.000Z");
    }

    #[tokio::test]
    async fn test_generate_stores_latest() {
        let service = service();
        let qr = service
            .generate(GenerateRequest::new("5", Some("id3")))
            .await
            .unwrap();

        assert_eq!(qr.id, MerchantIdentity::Id3);
        assert_eq!(service.latest(Some("ID3")).await.unwrap(), qr.qr_string);
        assert!(matches!(
            service.latest(None).await,
            Err(KhqrError::NotFound(MerchantIdentity::Id1))
        ));
        assert!(matches!(
            service.latest(Some("")).await,
            Err(KhqrError::NotFound(MerchantIdentity::Id1))
        ));
    }

    #[tokio::test]
    async fn test_latest_is_last_write() {
        let service = service();
        service.generate(GenerateRequest::new(1, Some("ID2"))).await.unwrap();
        let second = service.generate(GenerateRequest::new(2, Some("ID2"))).await.unwrap();

        assert_eq!(service.latest(Some("id2")).await.unwrap(), second.qr_string);
    }

    #[tokio::test]
    async fn test_generate_rejects_bad_input() {
        let service = service();
        assert!(matches!(
            service.generate(GenerateRequest::new("abc", None)).await,
            Err(KhqrError::InvalidAmount(_))
        ));
        assert!(matches!(
            service.generate(GenerateRequest::default()).await,
            Err(KhqrError::InvalidAmount(_))
        ));
        assert!(matches!(
            service.generate(GenerateRequest::new(10, Some("ID7"))).await,
            Err(KhqrError::InvalidIdentity(_))
        ));
        assert!(matches!(
            service.latest(Some("bogus")).await,
            Err(KhqrError::InvalidIdentity(_))
        ));
    }

    #[tokio::test]
    async fn test_request_deserialization() {
        let request: GenerateRequest = serde_json::from_str(r#"{"amount": "9.5"}"#).unwrap();
        assert_eq!(request.amount, json!("9.5"));
        assert!(request.id.is_none());

        let empty: GenerateRequest = serde_json::from_str("{}").unwrap();
        assert!(empty.amount.is_null());
    }
}
