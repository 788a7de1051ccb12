use crate::error::KhqrError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Owner name shared by every merchant display name.
pub const MERCHANT_OWNER: &str = "Sochea Lyouy";

/// One of the fixed merchant identities a payload can be issued for.
///
/// The set is closed: each variant maps to exactly one globally unique
/// account identifier and one display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MerchantIdentity {
    #[default]
    Id1,
    Id2,
    Id3,
    Id4,
    Id5,
    Id6,
}

impl MerchantIdentity {
    pub const ALL: [MerchantIdentity; 6] = [
        MerchantIdentity::Id1,
        MerchantIdentity::Id2,
        MerchantIdentity::Id3,
        MerchantIdentity::Id4,
        MerchantIdentity::Id5,
        MerchantIdentity::Id6,
    ];

    /// The symbolic tag, e.g. `ID3`.
    pub fn tag(self) -> &'static str {
        match self {
            MerchantIdentity::Id1 => "ID1",
            MerchantIdentity::Id2 => "ID2",
            MerchantIdentity::Id3 => "ID3",
            MerchantIdentity::Id4 => "ID4",
            MerchantIdentity::Id5 => "ID5",
            MerchantIdentity::Id6 => "ID6",
        }
    }

    /// The Bakong account identifier placed in the merchant account field.
    pub fn guid(self) -> &'static str {
        match self {
            MerchantIdentity::Id1 => "lyouy_sochea_id1@aclb",
            MerchantIdentity::Id2 => "lyouy_sochea_id2@aclb",
            MerchantIdentity::Id3 => "lyouy_sochea_id3@aclb",
            MerchantIdentity::Id4 => "lyouy_sochea_id4@aclb",
            MerchantIdentity::Id5 => "lyouy_sochea_id5@aclb",
            MerchantIdentity::Id6 => "lyouy_sochea_id6@aclb",
        }
    }

    pub fn display_name(self) -> String {
        format!("{MERCHANT_OWNER} - {}", self.tag())
    }

    /// Position of this identity's slot in fixed-size tables.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Lenient lookup: unknown tags fall back to `ID1` instead of failing.
    pub fn resolve(tag: &str) -> Self {
        tag.parse().unwrap_or_default()
    }
}

impl FromStr for MerchantIdentity {
    type Err = KhqrError;

    /// Strict, case-insensitive parse of `ID1`..`ID6`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MerchantIdentity::ALL
            .into_iter()
            .find(|id| id.tag().eq_ignore_ascii_case(s))
            .ok_or_else(|| KhqrError::InvalidIdentity(s.to_string()))
    }
}

impl fmt::Display for MerchantIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Comma separated list of the accepted tags, used in error messages.
pub fn valid_tags() -> String {
    MerchantIdentity::ALL
        .iter()
        .map(|id| id.tag())
        .collect::<Vec<_>>()
        .join(", ")
}
