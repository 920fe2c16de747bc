//! The request body submitted to the exchange endpoint.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use super::action::Action;
use super::serde_util::lower_address_opt;
use super::signature::Signature;

/// One signature for single-signer requests, a list for forwarded
/// multi-sig wrappers that arrive already signed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnvelopeSignature {
    Single(Signature),
    Many(Vec<Signature>),
}

impl EnvelopeSignature {
    pub fn as_single(&self) -> Option<&Signature> {
        match self {
            EnvelopeSignature::Single(sig) => Some(sig),
            EnvelopeSignature::Many(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            EnvelopeSignature::Single(_) => 1,
            EnvelopeSignature::Many(sigs) => sigs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Signature> for EnvelopeSignature {
    fn from(value: Signature) -> Self {
        EnvelopeSignature::Single(value)
    }
}

/// Signed action ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedEnvelope {
    pub action: Action,
    pub nonce: u64,
    pub signature: EnvelopeSignature,
    #[serde(
        default,
        with = "lower_address_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub vault_address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_after: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ScheduleCancel;
    use alloy_primitives::U256;

    fn sig() -> Signature {
        Signature {
            r: U256::from(1u64),
            s: U256::from(2u64),
            v: 27,
        }
    }

    #[test]
    fn test_optionals_omitted() {
        let envelope = SignedEnvelope {
            action: Action::ScheduleCancel(ScheduleCancel { time: None }),
            nonce: 10,
            signature: sig().into(),
            vault_address: None,
            expires_after: None,
        };
        let json = serde_json::to_string(&envelope).unwrap();
        assert_eq!(
            json,
            r#"{"action":{"type":"scheduleCancel"},"nonce":10,"signature":{"r":"0x1","s":"0x2","v":27}}"#
        );
    }

    #[test]
    fn test_vault_and_expiry_camel_case() {
        let vault: Address = "0xAbCdEf0000000000000000000000000000000001".parse().unwrap();
        let envelope = SignedEnvelope {
            action: Action::Noop,
            nonce: 1,
            signature: EnvelopeSignature::Many(vec![sig(), sig()]),
            vault_address: Some(vault),
            expires_after: Some(99),
        };
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["vaultAddress"], "0xabcdef0000000000000000000000000000000001");
        assert_eq!(value["expiresAfter"], 99);
        assert_eq!(value["signature"].as_array().unwrap().len(), 2);

        let back: SignedEnvelope = serde_json::from_value(value).unwrap();
        assert_eq!(back, envelope);
        assert_eq!(back.signature.len(), 2);
        assert!(back.signature.as_single().is_none());
    }
}
