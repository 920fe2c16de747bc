//! EIP-712 domains and network constants for venue signatures.
//!
//! L1 actions are authorized by signing a phantom `Agent` struct in the
//! fixed `Exchange` domain. User-signed actions use the
//! `HyperliquidSignTransaction` domain, keyed by the chain id the action
//! itself declares in `signatureChainId`.

use alloy_primitives::{Address, U256};
use alloy_sol_types::{sol, Eip712Domain as AlloyDomain};
use serde::{Deserialize, Serialize, Serializer};
use std::borrow::Cow;

use crate::{Error, Result};

/// Chain id of the phantom-agent domain used by every L1 signature.
pub const L1_AGENT_CHAIN_ID: u64 = 1337;

/// Chain id the venue expects on multi-sig wrapper envelopes.
pub const MULTI_SIG_CHAIN_ID: u64 = 0x66eee;

/// Arbitrum One; the default `signatureChainId` for mainnet user actions.
pub const ARBITRUM_MAINNET_CHAIN_ID: u64 = 42161;

/// Arbitrum Sepolia; the default `signatureChainId` for testnet user actions.
pub const ARBITRUM_TESTNET_CHAIN_ID: u64 = 421614;

pub const L1_DOMAIN_NAME: &str = "Exchange";
pub const USER_SIGNED_DOMAIN_NAME: &str = "HyperliquidSignTransaction";
pub const DOMAIN_VERSION: &str = "1";

sol! {
    /// Phantom agent signed in place of an L1 action.
    #[derive(Debug)]
    struct Agent {
        string source;
        bytes32 connectionId;
    }
}

/// Venue network the signatures are bound to.
///
/// Serializes as the `hyperliquidChain` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Default)]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
}

impl Network {
    /// Phantom agent `source` field.
    pub fn agent_source(&self) -> &'static str {
        match self {
            Network::Mainnet => "a",
            Network::Testnet => "b",
        }
    }

    /// Value of the `hyperliquidChain` field carried by user-signed actions.
    pub fn chain_name(&self) -> &'static str {
        match self {
            Network::Mainnet => "Mainnet",
            Network::Testnet => "Testnet",
        }
    }

    pub fn is_mainnet(&self) -> bool {
        matches!(self, Network::Mainnet)
    }
}

impl Serialize for Network {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.chain_name())
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.chain_name())
    }
}

impl std::str::FromStr for Network {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            other => Err(Error::Config {
                message: format!("unknown network '{}'", other),
            }),
        }
    }
}

/// EIP-712 domain as handed to wallets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Eip712Domain {
    pub name: String,
    pub version: String,
    pub chain_id: u64,
    pub verifying_contract: Address,
}

impl Eip712Domain {
    /// Domain of the phantom agent signed for L1 actions.
    pub fn l1_agent() -> Self {
        Self {
            name: L1_DOMAIN_NAME.to_string(),
            version: DOMAIN_VERSION.to_string(),
            chain_id: L1_AGENT_CHAIN_ID,
            verifying_contract: Address::ZERO,
        }
    }

    /// Domain for user-signed actions declaring `signature_chain_id`.
    pub fn user_signed(signature_chain_id: u64) -> Self {
        Self {
            name: USER_SIGNED_DOMAIN_NAME.to_string(),
            version: DOMAIN_VERSION.to_string(),
            chain_id: signature_chain_id,
            verifying_contract: Address::ZERO,
        }
    }

    pub fn to_alloy(&self) -> AlloyDomain {
        AlloyDomain::new(
            Some(Cow::Owned(self.name.clone())),
            Some(Cow::Owned(self.version.clone())),
            Some(U256::from(self.chain_id)),
            Some(self.verifying_contract),
            None,
        )
    }
}

/// Parse a `signatureChainId` wire value (`"0xa4b1"`) into a chain id.
pub fn parse_chain_id(value: &str) -> Result<u64> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .ok_or_else(|| Error::invalid_action(format!("signatureChainId '{}' is not 0x-prefixed", value)))?;
    u64::from_str_radix(digits, 16)
        .map_err(|e| Error::invalid_action(format!("signatureChainId '{}': {}", value, e)))
}

/// Format a chain id the way `signatureChainId` carries it on the wire.
pub fn format_chain_id(chain_id: u64) -> String {
    format!("0x{:x}", chain_id)
}
