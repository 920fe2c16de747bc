//! L1 action hashing and the phantom-agent statement.
//!
//! The connection id is `keccak256(msgpack(action) ‖ nonce ‖ vault ‖ expiry)`
//! and is signed as `Agent { source, connectionId }` in the `Exchange`
//! domain rather than directly.

use alloy_primitives::{keccak256, Address, B256};
use alloy_sol_types::SolStruct;
use serde::Serialize;
use serde_json::{json, Map};
use tracing::debug;

use super::domain::{Agent, Eip712Domain, Network};
use super::typed_data::{Eip712Field, Eip712Schema, TypedDataDescription};
use crate::types::serde_util::address_to_wire;
use crate::types::{Action, MultiSigAction};
use crate::Result;

/// Connection id of a single-signer L1 action.
pub fn action_hash(
    action: &Action,
    nonce: u64,
    vault_address: Option<Address>,
    expires_after: Option<u64>,
) -> Result<B256> {
    hash_msgpack(action, nonce, vault_address, expires_after)
}

/// Connection id every cosigner signs for a multi-sig L1 action.
///
/// The hash input is the tuple `(multiSigUser, outerSigner, action)` with both
/// addresses as lowercase hex strings.
pub fn multi_sig_l1_hash(
    multi_sig_user: Address,
    outer_signer: Address,
    action: &Action,
    nonce: u64,
    vault_address: Option<Address>,
    expires_after: Option<u64>,
) -> Result<B256> {
    let envelope = (
        address_to_wire(&multi_sig_user),
        address_to_wire(&outer_signer),
        action,
    );
    hash_msgpack(&envelope, nonce, vault_address, expires_after)
}

/// `multiSigActionHash`: the wrapper hashed without its `type` tag.
pub fn multi_sig_action_hash(
    wrapper: &MultiSigAction,
    nonce: u64,
    vault_address: Option<Address>,
    expires_after: Option<u64>,
) -> Result<B256> {
    hash_msgpack(wrapper, nonce, vault_address, expires_after)
}

fn hash_msgpack<T: Serialize + ?Sized>(
    value: &T,
    nonce: u64,
    vault_address: Option<Address>,
    expires_after: Option<u64>,
) -> Result<B256> {
    let mut bytes = rmp_serde::to_vec_named(value)?;
    bytes.extend_from_slice(&nonce.to_be_bytes());

    match vault_address {
        Some(vault) => {
            bytes.push(1);
            bytes.extend_from_slice(vault.as_slice());
        }
        None => bytes.push(0),
    }

    if let Some(expires_after) = expires_after {
        bytes.push(0);
        bytes.extend_from_slice(&expires_after.to_be_bytes());
    }

    let hash = keccak256(&bytes);
    debug!(nonce, len = bytes.len(), connection_id = %hash, "Hashed L1 action");
    Ok(hash)
}

/// EIP-712 digest of the phantom agent for `connection_id`.
pub fn agent_signing_hash(connection_id: B256, network: Network) -> B256 {
    let agent = Agent {
        source: network.agent_source().to_string(),
        connectionId: connection_id,
    };
    agent.eip712_signing_hash(&Eip712Domain::l1_agent().to_alloy())
}

/// The phantom agent as a typed-data request for wallets that cannot sign
/// raw digests.
pub fn agent_typed_data(connection_id: B256, network: Network) -> TypedDataDescription {
    let mut message = Map::new();
    message.insert("source".to_string(), json!(network.agent_source()));
    message.insert("connectionId".to_string(), json!(format!("{}", connection_id)));

    TypedDataDescription {
        domain: Eip712Domain::l1_agent(),
        schema: Eip712Schema {
            primary_type: "Agent".to_string(),
            fields: vec![
                Eip712Field::new("source", "string"),
                Eip712Field::new("connectionId", "bytes32"),
            ],
        },
        message,
    }
}
