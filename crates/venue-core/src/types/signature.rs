//! Recoverable ECDSA signature in the venue's `{r, s, v}` wire form.

use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Error, Result};

/// Signature triple as submitted to the venue.
///
/// `r` and `s` travel as minimal `0x` hex strings, `v` as 27 or 28.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature {
    #[serde(with = "u256_hex")]
    pub r: U256,
    #[serde(with = "u256_hex")]
    pub s: U256,
    pub v: u8,
}

impl Signature {
    /// Parity bit of the recovery id.
    pub fn y_parity(&self) -> bool {
        self.v == 28
    }

    pub fn to_alloy(&self) -> alloy_primitives::Signature {
        alloy_primitives::Signature::new(self.r, self.s, self.y_parity())
    }

    /// Parse a 65-byte `0x` hex signature as returned by wallets.
    pub fn from_hex(raw: &str) -> Result<Self> {
        let bytes = hex::decode(raw.trim().trim_start_matches("0x")).map_err(Error::signing)?;
        let signature = alloy_primitives::Signature::from_raw(&bytes).map_err(Error::signing)?;
        Ok(signature.into())
    }

    /// 65-byte `0x` hex encoding (`r ‖ s ‖ v`).
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.to_alloy().as_bytes()))
    }

    /// Recover the signing address from the digest this signature covers.
    pub fn recover_address(&self, digest: &B256) -> Result<Address> {
        self.to_alloy()
            .recover_address_from_prehash(digest)
            .map_err(Error::signing)
    }
}

impl From<alloy_primitives::Signature> for Signature {
    fn from(signature: alloy_primitives::Signature) -> Self {
        Self {
            r: signature.r(),
            s: signature.s(),
            v: if signature.v() { 28 } else { 27 },
        }
    }
}

mod u256_hex {
    use super::*;

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{:x}", value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<U256, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let digits = raw.trim_start_matches("0x");
        U256::from_str_radix(digits, 16).map_err(serde::de::Error::custom)
    }
}
