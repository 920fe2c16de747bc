//! Serde helpers for venue wire formats.
//!
//! The venue hashes addresses as lowercase hex strings, so every address
//! that lands inside an action goes through [`lower_address`].

use alloy_primitives::Address;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serializer};

/// Lowercase `0x`-prefixed hex form of an address.
pub fn address_to_wire(address: &Address) -> String {
    format!("0x{}", hex::encode(address.as_slice()))
}

/// Format a decimal the way the venue expects prices and sizes.
///
/// Rounds to 8 decimal places and strips trailing zeros; negative zero
/// collapses to `"0"`.
pub fn decimal_to_wire(value: Decimal) -> String {
    let normalized = value.round_dp(8).normalize();
    if normalized.is_zero() {
        return "0".to_string();
    }
    normalized.to_string()
}

pub mod lower_address {
    use super::*;

    pub fn serialize<S: Serializer>(address: &Address, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&address_to_wire(address))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Address, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.trim().parse::<Address>().map_err(serde::de::Error::custom)
    }
}

pub mod lower_address_opt {
    use super::*;

    pub fn serialize<S: Serializer>(
        address: &Option<Address>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match address {
            Some(address) => serializer.serialize_str(&address_to_wire(address)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Address>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        raw.map(|s| s.trim().parse::<Address>().map_err(serde::de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize, Deserialize)]
    struct Holder {
        #[serde(with = "lower_address")]
        addr: Address,
    }

    #[test]
    fn test_address_serializes_lowercase() {
        let address: Address = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".parse().unwrap();
        let json = serde_json::to_string(&Holder { addr: address }).unwrap();
        assert_eq!(json, r#"{"addr":"0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"}"#);

        let back: Holder = serde_json::from_str(&json).unwrap();
        assert_eq!(back.addr, address);
    }

    #[test]
    fn test_decimal_to_wire() {
        assert_eq!(decimal_to_wire(Decimal::new(10500, 2)), "105");
        assert_eq!(decimal_to_wire(Decimal::new(2, 1)), "0.2");
        assert_eq!(decimal_to_wire(Decimal::new(123456789012, 11)), "1.23456789");
        assert_eq!(decimal_to_wire(Decimal::new(0, 3)), "0");
        assert_eq!(decimal_to_wire(-Decimal::new(0, 3)), "0");
    }
}
