//! EIP-712 type descriptions for user-signed actions.
//!
//! Each user-signed action tag has a statically declared field list. The
//! multi-sig variant of a schema is derived with [`extend_types_for_multi_sig`],
//! which returns a new list and never touches the static tables.

use alloy_dyn_abi::TypedData;
use alloy_primitives::{Address, B256};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::domain::{parse_chain_id, Eip712Domain};
use crate::types::serde_util::address_to_wire;
use crate::types::{Action, ActionKind};
use crate::{Error, Result};

/// Name of the chain-identification field every user-signed schema leads with.
pub const CHAIN_FIELD: &str = "hyperliquidChain";

pub const PAYLOAD_MULTI_SIG_USER_FIELD: &str = "payloadMultiSigUser";
pub const OUTER_SIGNER_FIELD: &str = "outerSigner";

/// One `{name, type}` entry of an EIP-712 struct definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eip712Field {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

impl Eip712Field {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// Primary type name plus its ordered fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eip712Schema {
    pub primary_type: String,
    pub fields: Vec<Eip712Field>,
}

impl Eip712Schema {
    fn from_static(primary_type: &str, fields: &[(&str, &str)]) -> Self {
        Self {
            primary_type: primary_type.to_string(),
            fields: fields
                .iter()
                .map(|(name, ty)| Eip712Field::new(*name, *ty))
                .collect(),
        }
    }

    /// The same schema with the multi-sig fields spliced in.
    pub fn for_multi_sig(&self) -> Self {
        Self {
            primary_type: self.primary_type.clone(),
            fields: extend_types_for_multi_sig(&self.fields),
        }
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }
}

const USD_SEND: &[(&str, &str)] = &[
    ("hyperliquidChain", "string"),
    ("destination", "string"),
    ("amount", "string"),
    ("time", "uint64"),
];

const SPOT_SEND: &[(&str, &str)] = &[
    ("hyperliquidChain", "string"),
    ("destination", "string"),
    ("token", "string"),
    ("amount", "string"),
    ("time", "uint64"),
];

const WITHDRAW: &[(&str, &str)] = &[
    ("hyperliquidChain", "string"),
    ("destination", "string"),
    ("amount", "string"),
    ("time", "uint64"),
];

const USD_CLASS_TRANSFER: &[(&str, &str)] = &[
    ("hyperliquidChain", "string"),
    ("amount", "string"),
    ("toPerp", "bool"),
    ("nonce", "uint64"),
];

const SEND_ASSET: &[(&str, &str)] = &[
    ("hyperliquidChain", "string"),
    ("destination", "string"),
    ("sourceDex", "string"),
    ("destinationDex", "string"),
    ("token", "string"),
    ("amount", "string"),
    ("fromSubAccount", "string"),
    ("nonce", "uint64"),
];

const APPROVE_AGENT: &[(&str, &str)] = &[
    ("hyperliquidChain", "string"),
    ("agentAddress", "address"),
    ("agentName", "string"),
    ("nonce", "uint64"),
];

const APPROVE_BUILDER_FEE: &[(&str, &str)] = &[
    ("hyperliquidChain", "string"),
    ("maxFeeRate", "string"),
    ("builder", "address"),
    ("nonce", "uint64"),
];

const TOKEN_DELEGATE: &[(&str, &str)] = &[
    ("hyperliquidChain", "string"),
    ("validator", "address"),
    ("wei", "uint64"),
    ("isUndelegate", "bool"),
    ("nonce", "uint64"),
];

const C_DEPOSIT: &[(&str, &str)] = &[
    ("hyperliquidChain", "string"),
    ("wei", "uint64"),
    ("nonce", "uint64"),
];

const C_WITHDRAW: &[(&str, &str)] = &[
    ("hyperliquidChain", "string"),
    ("wei", "uint64"),
    ("nonce", "uint64"),
];

const CONVERT_TO_MULTI_SIG_USER: &[(&str, &str)] = &[
    ("hyperliquidChain", "string"),
    ("signers", "string"),
    ("nonce", "uint64"),
];

const SEND_MULTI_SIG: &[(&str, &str)] = &[
    ("hyperliquidChain", "string"),
    ("multiSigActionHash", "bytes32"),
    ("nonce", "uint64"),
];

/// Declared EIP-712 schema for a user-signed action tag.
pub fn user_signed_schema(kind: ActionKind) -> Result<Eip712Schema> {
    let (primary_type, fields) = match kind {
        ActionKind::UsdSend => ("HyperliquidTransaction:UsdSend", USD_SEND),
        ActionKind::SpotSend => ("HyperliquidTransaction:SpotSend", SPOT_SEND),
        ActionKind::Withdraw3 => ("HyperliquidTransaction:Withdraw", WITHDRAW),
        ActionKind::UsdClassTransfer => ("HyperliquidTransaction:UsdClassTransfer", USD_CLASS_TRANSFER),
        ActionKind::SendAsset => ("HyperliquidTransaction:SendAsset", SEND_ASSET),
        ActionKind::ApproveAgent => ("HyperliquidTransaction:ApproveAgent", APPROVE_AGENT),
        ActionKind::ApproveBuilderFee => ("HyperliquidTransaction:ApproveBuilderFee", APPROVE_BUILDER_FEE),
        ActionKind::TokenDelegate => ("HyperliquidTransaction:TokenDelegate", TOKEN_DELEGATE),
        ActionKind::CDeposit => ("HyperliquidTransaction:CDeposit", C_DEPOSIT),
        ActionKind::CWithdraw => ("HyperliquidTransaction:CWithdraw", C_WITHDRAW),
        ActionKind::ConvertToMultiSigUser => (
            "HyperliquidTransaction:ConvertToMultiSigUser",
            CONVERT_TO_MULTI_SIG_USER,
        ),
        other => {
            return Err(Error::invalid_action(format!(
                "'{}' is not a user-signed action",
                other
            )))
        }
    };
    Ok(Eip712Schema::from_static(primary_type, fields))
}

/// Schema the leader signs over a finished multi-sig wrapper.
pub fn send_multi_sig_schema() -> Eip712Schema {
    Eip712Schema::from_static("HyperliquidTransaction:SendMultiSig", SEND_MULTI_SIG)
}

/// Insert `payloadMultiSigUser` and `outerSigner` directly after the
/// chain-identification field. Without a chain field they lead the list.
pub fn extend_types_for_multi_sig(base: &[Eip712Field]) -> Vec<Eip712Field> {
    let insert_at = base
        .iter()
        .position(|f| f.name == CHAIN_FIELD)
        .map(|i| i + 1)
        .unwrap_or(0);

    let mut extended = Vec::with_capacity(base.len() + 2);
    extended.extend_from_slice(&base[..insert_at]);
    extended.push(Eip712Field::new(PAYLOAD_MULTI_SIG_USER_FIELD, "address"));
    extended.push(Eip712Field::new(OUTER_SIGNER_FIELD, "address"));
    extended.extend_from_slice(&base[insert_at..]);
    extended
}

/// A complete EIP-712 request: what a wallet is asked to sign.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedDataDescription {
    pub domain: Eip712Domain,
    pub schema: Eip712Schema,
    pub message: Map<String, Value>,
}

impl TypedDataDescription {
    /// Describe a canonical user-signed action under `schema`.
    ///
    /// Only the fields the schema declares are carried into the message; an
    /// absent `agentName` is signed as the empty string.
    pub fn for_action(action: &Action, schema: &Eip712Schema) -> Result<Self> {
        let chain_id = action
            .signature_chain_id()
            .ok_or_else(|| Error::invalid_action(format!("'{}' carries no signatureChainId", action.kind())))?;
        let domain = Eip712Domain::user_signed(parse_chain_id(chain_id)?);

        let value = serde_json::to_value(action)?;
        let object = value
            .as_object()
            .ok_or_else(|| Error::invalid_action("action did not serialize to an object"))?;

        let mut message = Map::new();
        for field in &schema.fields {
            let entry = match object.get(&field.name) {
                Some(Value::Null) | None if field.ty == "string" && field.name == "agentName" => {
                    Value::String(String::new())
                }
                Some(value) => value.clone(),
                None => {
                    return Err(Error::invalid_action(format!(
                        "'{}' is missing field '{}' required by {}",
                        action.kind(),
                        field.name,
                        schema.primary_type
                    )))
                }
            };
            message.insert(field.name.clone(), entry);
        }

        Ok(Self {
            domain,
            schema: schema.clone(),
            message,
        })
    }

    /// The outer statement a multi-sig leader signs.
    pub fn send_multi_sig(
        signature_chain_id: u64,
        hyperliquid_chain: &str,
        multi_sig_action_hash: B256,
        nonce: u64,
    ) -> Self {
        let mut message = Map::new();
        message.insert("hyperliquidChain".to_string(), json!(hyperliquid_chain));
        message.insert(
            "multiSigActionHash".to_string(),
            json!(format!("{}", multi_sig_action_hash)),
        );
        message.insert("nonce".to_string(), json!(nonce));

        Self {
            domain: Eip712Domain::user_signed(signature_chain_id),
            schema: send_multi_sig_schema(),
            message,
        }
    }

    /// Extend schema and message with the multi-sig context. Returns a new
    /// description; every cosigner derives the identical result.
    pub fn with_multi_sig(&self, multi_sig_user: Address, outer_signer: Address) -> Self {
        let mut message = self.message.clone();
        message.insert(
            PAYLOAD_MULTI_SIG_USER_FIELD.to_string(),
            Value::String(address_to_wire(&multi_sig_user)),
        );
        message.insert(
            OUTER_SIGNER_FIELD.to_string(),
            Value::String(address_to_wire(&outer_signer)),
        );
        Self {
            domain: self.domain.clone(),
            schema: self.schema.for_multi_sig(),
            message,
        }
    }

    /// Standard `eth_signTypedData_v4` JSON.
    pub fn to_json(&self) -> Value {
        let mut types = Map::new();
        types.insert(
            "EIP712Domain".to_string(),
            json!([
                { "name": "name", "type": "string" },
                { "name": "version", "type": "string" },
                { "name": "chainId", "type": "uint256" },
                { "name": "verifyingContract", "type": "address" },
            ]),
        );
        types.insert(self.schema.primary_type.clone(), json!(self.schema.fields));

        json!({
            "types": types,
            "primaryType": self.schema.primary_type,
            "domain": self.domain,
            "message": self.message,
        })
    }

    pub fn to_alloy(&self) -> Result<TypedData> {
        Ok(serde_json::from_value(self.to_json())?)
    }

    /// `keccak256(0x1901 ‖ domainSeparator ‖ hashStruct(message))`.
    pub fn signing_hash(&self) -> Result<B256> {
        self.to_alloy()?
            .eip712_signing_hash()
            .map_err(|e| Error::invalid_action(format!("typed data encoding failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signing::domain::Network;
    use crate::types::{ApproveAgent, UsdSend};

    fn usd_send() -> Action {
        Action::UsdSend(UsdSend {
            signature_chain_id: "0xa4b1".to_string(),
            hyperliquid_chain: Network::Mainnet,
            destination: "0x0D1d9635D0640821d15e323ac8AdADfA9c111414".parse().unwrap(),
            amount: "1".to_string(),
            time: 1690393044548,
        })
    }

    #[test]
    fn test_every_user_signed_kind_has_schema() {
        for kind in ActionKind::ALL {
            let schema = user_signed_schema(kind);
            assert_eq!(schema.is_ok(), kind.is_user_signed(), "{}", kind);
            if let Ok(schema) = schema {
                assert_eq!(schema.fields[0].name, CHAIN_FIELD);
            }
        }
    }

    #[test]
    fn test_multi_sig_fields_follow_chain_field() {
        for kind in ActionKind::ALL.into_iter().filter(|k| k.is_user_signed()) {
            let base = user_signed_schema(kind).unwrap();
            let extended = base.for_multi_sig();
            let names = extended.field_names();

            assert_eq!(names[0], CHAIN_FIELD);
            assert_eq!(names[1], PAYLOAD_MULTI_SIG_USER_FIELD);
            assert_eq!(names[2], OUTER_SIGNER_FIELD);
            assert_eq!(&names[3..], &base.field_names()[1..]);
        }
    }

    #[test]
    fn test_extension_does_not_mutate_base() {
        let base = user_signed_schema(ActionKind::UsdSend).unwrap();
        let before = base.clone();
        let _ = extend_types_for_multi_sig(&base.fields);
        assert_eq!(base, before);
        assert_eq!(user_signed_schema(ActionKind::UsdSend).unwrap(), before);
    }

    #[test]
    fn test_extension_without_chain_field_leads() {
        let fields = vec![Eip712Field::new("nonce", "uint64")];
        let extended = extend_types_for_multi_sig(&fields);
        let names: Vec<_> = extended.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec![PAYLOAD_MULTI_SIG_USER_FIELD, OUTER_SIGNER_FIELD, "nonce"]);
    }

    #[test]
    fn test_message_carries_only_schema_fields() {
        let action = usd_send();
        let schema = user_signed_schema(ActionKind::UsdSend).unwrap();
        let description = TypedDataDescription::for_action(&action, &schema).unwrap();

        assert_eq!(description.domain.chain_id, 42161);
        assert_eq!(description.message.len(), 4);
        assert!(!description.message.contains_key("type"));
        assert!(!description.message.contains_key("signatureChainId"));
        assert_eq!(description.message["hyperliquidChain"], json!("Mainnet"));
    }

    #[test]
    fn test_absent_agent_name_signed_as_empty_string() {
        let action = Action::ApproveAgent(ApproveAgent {
            signature_chain_id: "0xa4b1".to_string(),
            hyperliquid_chain: Network::Mainnet,
            agent_address: "0x0D1d9635D0640821d15e323ac8AdADfA9c111414".parse().unwrap(),
            agent_name: None,
            nonce: 5,
        });
        let schema = user_signed_schema(ActionKind::ApproveAgent).unwrap();
        let description = TypedDataDescription::for_action(&action, &schema).unwrap();
        assert_eq!(description.message["agentName"], json!(""));
        assert!(description.signing_hash().is_ok());
    }

    #[test]
    fn test_multi_sig_changes_hash_but_not_base() {
        let schema = user_signed_schema(ActionKind::UsdSend).unwrap();
        let description = TypedDataDescription::for_action(&usd_send(), &schema).unwrap();
        let user: Address = "0x1111111111111111111111111111111111111111".parse().unwrap();
        let lead: Address = "0x2222222222222222222222222222222222222222".parse().unwrap();

        let extended = description.with_multi_sig(user, lead);
        assert_eq!(description.message.len(), 4);
        assert_eq!(extended.message.len(), 6);
        assert_ne!(
            description.signing_hash().unwrap(),
            extended.signing_hash().unwrap()
        );
        assert_eq!(
            extended.signing_hash().unwrap(),
            description.with_multi_sig(user, lead).signing_hash().unwrap()
        );
    }

    #[test]
    fn test_json_shape() {
        let schema = user_signed_schema(ActionKind::UsdSend).unwrap();
        let json = TypedDataDescription::for_action(&usd_send(), &schema)
            .unwrap()
            .to_json();
        assert_eq!(json["primaryType"], "HyperliquidTransaction:UsdSend");
        assert_eq!(json["domain"]["name"], "HyperliquidSignTransaction");
        assert_eq!(json["types"]["HyperliquidTransaction:UsdSend"][3]["type"], "uint64");
    }
}
