//! KHQR payload assembly.
//!
//! Field order: format indicator, initiation method, merchant account,
//! category code, currency, amount, country, merchant name, city, timestamp,
//! then the `63` checksum field.

use super::amount::TransactionAmount;
use super::checksum::compute_checksum;
use super::merchant::MerchantIdentity;
use super::ports::Clock;
use super::tlv::TlvWriter;
use crate::error::{KhqrError, Result};
use crate::infrastructure::clock::SystemClock;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const TAG_FORMAT_INDICATOR: u8 = 0;
pub const TAG_INITIATION_METHOD: u8 = 1;
pub const TAG_CATEGORY_CODE: u8 = 52;
pub const TAG_CURRENCY: u8 = 53;
pub const TAG_AMOUNT: u8 = 54;
pub const TAG_COUNTRY: u8 = 58;
pub const TAG_CITY: u8 = 60;

pub const FORMAT_INDICATOR: &str = "01";
/// Dynamic QR (one payment per code).
pub const INITIATION_METHOD: &str = "12";
pub const CATEGORY_CODE: &str = "5999";
/// ISO 4217 numeric code for USD.
pub const CURRENCY_USD: &str = "840";
pub const COUNTRY_CODE: &str = "KH";
pub const MERCHANT_CITY: &str = "PHNOM PENH";

/// Header of the merchant account segment. The declared length (21) and the
/// inner sub-tag length (17) are part of the deployed format and do not match
/// the 21-byte account id that follows.
pub const MERCHANT_ACCOUNT_HEADER: &str = "29210017";
/// Header of the merchant name segment; the declared length is fixed at 12.
pub const MERCHANT_NAME_HEADER: &str = "5912";
/// Header of the timestamp segment: tag 99, length 17, sub-tag 00, length 13.
pub const TIMESTAMP_HEADER: &str = "99170013";
/// Checksum field tag and length, included in the checksummed data.
pub const CHECKSUM_HEADER: &str = "6304";

const CHECKSUM_LEN: usize = 4;

/// A complete, self-verifying KHQR payload string.
///
/// Deserialization runs [`verify_payload`], so every `Payload` ends with a
/// valid checksum field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Payload(String);

impl Payload {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// The trailing 4-digit checksum.
    pub fn checksum(&self) -> &str {
        self.0.get(self.split_at()..).unwrap_or_default()
    }

    /// Everything up to and including the checksum field header.
    pub fn checksummed_data(&self) -> &str {
        self.0.get(..self.split_at()).unwrap_or_default()
    }

    fn split_at(&self) -> usize {
        self.0.len().saturating_sub(CHECKSUM_LEN)
    }

    /// Lowercase hex MD5 of the payload, used as an integrity digest.
    pub fn md5_hex(&self) -> String {
        format!("{:x}", md5::compute(self.0.as_bytes()))
    }

    pub fn verify(&self) -> Result<()> {
        verify_payload(&self.0)
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Payload {
    type Error = KhqrError;

    fn try_from(value: String) -> Result<Self> {
        verify_payload(&value)?;
        Ok(Self(value))
    }
}

impl From<Payload> for String {
    fn from(payload: Payload) -> Self {
        payload.0
    }
}

impl AsRef<str> for Payload {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Builds the payload for `identity` and `amount` stamped with the current time.
pub fn build_payload(identity: MerchantIdentity, amount: TransactionAmount) -> Payload {
    build_payload_at(identity, amount, SystemClock.now_millis())
}

/// Builds the payload stamped with `timestamp_ms` (milliseconds since the Unix epoch).
pub fn build_payload_at(
    identity: MerchantIdentity,
    amount: TransactionAmount,
    timestamp_ms: u64,
) -> Payload {
    let mut writer = TlvWriter::new();
    writer
        .field(TAG_FORMAT_INDICATOR, FORMAT_INDICATOR)
        .field(TAG_INITIATION_METHOD, INITIATION_METHOD)
        .raw(MERCHANT_ACCOUNT_HEADER)
        .raw(identity.guid())
        .field(TAG_CATEGORY_CODE, CATEGORY_CODE)
        .field(TAG_CURRENCY, CURRENCY_USD)
        .field(TAG_AMOUNT, &amount.formatted())
        .field(TAG_COUNTRY, COUNTRY_CODE)
        .raw(MERCHANT_NAME_HEADER)
        .raw(&identity.display_name())
        .field(TAG_CITY, MERCHANT_CITY)
        .raw(TIMESTAMP_HEADER)
        .raw(&timestamp_ms.to_string())
        .raw(CHECKSUM_HEADER);

    let mut data = writer.finish();
    let crc = compute_checksum(&data);
    data.push_str(&crc);
    Payload(data)
}

/// Checks that `payload` ends with `6304` + the checksum of everything before it.
pub fn verify_payload(payload: &str) -> Result<()> {
    let split = payload
        .len()
        .checked_sub(CHECKSUM_LEN)
        .filter(|&at| payload.is_char_boundary(at))
        .ok_or(KhqrError::MissingChecksum)?;
    let (data, found) = payload.split_at(split);
    if !data.ends_with(CHECKSUM_HEADER) {
        return Err(KhqrError::MissingChecksum);
    }
    let expected = compute_checksum(data);
    if expected != found {
        return Err(KhqrError::ChecksumMismatch {
            expected,
            found: found.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const FIXED_MS: u64 = 1_700_000_000_000;

    fn amount(value: rust_decimal::Decimal) -> TransactionAmount {
        TransactionAmount::new(value).unwrap()
    }

    #[test]
    fn test_known_payload_id1() {
        let payload = build_payload_at(MerchantIdentity::Id1, amount(dec!(12)), FIXED_MS);
        assert_eq!(
            payload.as_str(),
            "00020101021229210017lyouy_sochea_id1@aclb520459995303840540512.005802KH\
             5912Sochea Lyouy - ID16010PHNOM PENH9917001317000000000006304A7B9"
        );
        assert_eq!(payload.checksum(), "A7B9");
    }

    #[test]
    fn test_known_payload_with_leading_zero_checksum() {
        let payload = build_payload_at(MerchantIdentity::Id3, amount(dec!(1250.5)), FIXED_MS);
        assert!(payload.as_str().contains("54061250.50"));
        assert_eq!(payload.checksum(), "0F09");
    }

    #[test]
    fn test_amount_field() {
        let payload = build_payload_at(MerchantIdentity::Id2, amount(dec!(12)), FIXED_MS);
        assert!(payload.as_str().contains("540512.00"));
    }

    #[test]
    fn test_payload_is_self_verifying() {
        let payload = build_payload(MerchantIdentity::Id6, amount(dec!(3.5)));
        assert!(payload.checksummed_data().ends_with(CHECKSUM_HEADER));
        assert_eq!(compute_checksum(payload.checksummed_data()), payload.checksum());
        payload.verify().unwrap();
    }

    #[test]
    fn test_unknown_tag_falls_back_to_first_guid() {
        let identity = MerchantIdentity::resolve("ID42");
        let payload = build_payload_at(identity, amount(dec!(1)), FIXED_MS);
        assert!(payload.as_str().contains("29210017lyouy_sochea_id1@aclb"));
    }

    #[test]
    fn test_timestamp_changes_payload() {
        let a = build_payload_at(MerchantIdentity::Id1, amount(dec!(5)), FIXED_MS);
        let b = build_payload_at(MerchantIdentity::Id1, amount(dec!(5)), FIXED_MS + 1);
        assert_ne!(a, b);
        assert_ne!(a.checksum(), b.checksum());
    }

    #[test]
    fn test_md5_digest() {
        let payload = build_payload_at(MerchantIdentity::Id1, amount(dec!(12)), FIXED_MS);
        assert_eq!(payload.md5_hex(), "439df5b8eff5fd7b4c760c857e3c1feb");
    }

    #[test]
    fn test_verify_detects_tampering() {
        let payload = build_payload_at(MerchantIdentity::Id1, amount(dec!(12)), FIXED_MS);
        let tampered = payload.as_str().replace("12.00", "13.00");
        assert!(matches!(
            verify_payload(&tampered),
            Err(KhqrError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn test_verify_requires_checksum_field() {
        assert!(matches!(verify_payload("abc"), Err(KhqrError::MissingChecksum)));
        assert!(matches!(verify_payload("000201FFFF"), Err(KhqrError::MissingChecksum)));
        assert!(matches!(verify_payload("ééé"), Err(KhqrError::MissingChecksum)));
    }

    #[test]
    fn test_deserialize_verifies_checksum() {
        assert!(serde_json::from_str::<Payload>("\"ab\"").is_err());
        assert!(serde_json::from_str::<Payload>("\"\"").is_err());

        let payload = build_payload_at(MerchantIdentity::Id1, amount(dec!(12)), FIXED_MS);
        let tampered = format!("\"{}\"", payload.as_str().replace("12.00", "13.00"));
        assert!(serde_json::from_str::<Payload>(&tampered).is_err());

        let json = serde_json::to_string(&payload).unwrap();
        assert_eq!(json, format!("\"{payload}\""));
        let parsed: Payload = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, payload);
        assert_eq!(parsed.checksum(), "A7B9");
    }

    #[test]
    fn test_try_from_string() {
        assert!(matches!(
            Payload::try_from("ab".to_string()),
            Err(KhqrError::MissingChecksum)
        ));
        let payload = build_payload_at(MerchantIdentity::Id4, amount(dec!(2)), FIXED_MS);
        assert_eq!(Payload::try_from(String::from(payload.clone())).unwrap(), payload);
    }
}
