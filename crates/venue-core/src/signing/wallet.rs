//! Signing backends behind a single adapter.
//!
//! A [`Signer`] is either a local private key or one of two external wallet
//! shapes. Callers only ever ask it for its address and for a signature over
//! a typed-data request; the local key additionally signs raw digests.

use alloy_primitives::{Address, B256};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

use super::typed_data::TypedDataDescription;
use crate::config::{Config, SigningConfig};
use crate::types::Signature;
use crate::{Error, Result};

pub const PRIVATE_KEY_KIND: &str = "private_key";

/// External wallet that takes a typed-data JSON document and returns a
/// 65-byte hex signature.
#[async_trait]
pub trait TypedDataWallet: Send + Sync {
    async fn address(&self) -> Result<String>;

    async fn sign_typed_data(&self, typed_data: &Value) -> Result<String>;
}

/// EIP-1193 style provider: a single JSON-RPC `request` entry point.
#[async_trait]
pub trait Eip1193Provider: Send + Sync {
    async fn request(&self, method: &str, params: Value) -> Result<Value>;
}

/// Local secp256k1 key.
#[derive(Clone)]
pub struct LocalWallet {
    signer: PrivateKeySigner,
    address: Address,
}

impl LocalWallet {
    /// Create a wallet from a hex-encoded private key, with or without `0x`.
    pub fn from_private_key(key: &str) -> Result<Self> {
        let key_clean = key.trim().trim_start_matches("0x");

        let signer = PrivateKeySigner::from_str(key_clean).map_err(|_| Error::Config {
            message: "Invalid private key format - expected 64 hex characters".to_string(),
        })?;
        let address = signer.address();

        Ok(Self { signer, address })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Checksummed address string.
    pub fn address_string(&self) -> String {
        self.address.to_checksum(None)
    }

    /// Sign a 32-byte digest without any prefixing.
    pub fn sign_hash(&self, hash: &B256) -> Result<Signature> {
        Ok(self.signer.sign_hash_sync(hash)?.into())
    }
}

impl std::fmt::Debug for LocalWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never expose the private key in debug output
        f.debug_struct("LocalWallet")
            .field("address", &self.address_string())
            .finish()
    }
}

/// Any backend that can authorize venue actions.
#[derive(Clone)]
pub enum Signer {
    PrivateKey(LocalWallet),
    TypedDataWallet(Arc<dyn TypedDataWallet>),
    Eip1193(Arc<dyn Eip1193Provider>),
}

impl Signer {
    pub fn private_key(key: &str) -> Result<Self> {
        Ok(Signer::PrivateKey(LocalWallet::from_private_key(key)?))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Signer::PrivateKey(_) => PRIVATE_KEY_KIND,
            Signer::TypedDataWallet(_) => "typed_data_wallet",
            Signer::Eip1193(_) => "eip1193",
        }
    }

    /// Load the signer named by the `VENUE_*` environment.
    pub fn from_env() -> Result<Self> {
        Self::from_signing_config(&Config::from_env()?.signing)
    }

    pub fn from_signing_config(signing: &SigningConfig) -> Result<Self> {
        let config = signing.signer.as_ref().ok_or_else(|| Error::Config {
            message: "no signer configured - set VENUE_PRIVATE_KEY".to_string(),
        })?;
        Self::from_config(config)
    }

    /// Build a signer from configuration. Only local keys can be configured.
    pub fn from_config(config: &SignerConfig) -> Result<Self> {
        if config.kind != PRIVATE_KEY_KIND {
            return Err(Error::UnsupportedSigner {
                kind: config.kind.clone(),
            });
        }

        let key = config.private_key.as_deref().ok_or_else(|| Error::Config {
            message: "signer of kind 'private_key' requires a private key".to_string(),
        })?;
        let wallet = LocalWallet::from_private_key(key)?;

        if let Some(expected) = config.address {
            if expected != wallet.address() {
                return Err(Error::Config {
                    message: format!(
                        "configured address {} does not match key address {}",
                        expected,
                        wallet.address()
                    ),
                });
            }
        }

        Ok(Signer::PrivateKey(wallet))
    }

    /// The one address this signer acts as.
    pub async fn resolve_address(&self) -> Result<Address> {
        match self {
            Signer::PrivateKey(wallet) => Ok(wallet.address()),
            Signer::TypedDataWallet(wallet) => {
                let raw = wallet.address().await?;
                parse_address(&raw)
            }
            Signer::Eip1193(provider) => {
                let accounts = provider.request("eth_requestAccounts", json!([])).await?;
                let first = accounts
                    .as_array()
                    .and_then(|list| list.first())
                    .and_then(Value::as_str)
                    .ok_or_else(|| Error::AddressUnavailable {
                        message: "provider returned no accounts".to_string(),
                    })?;
                parse_address(first)
            }
        }
    }

    /// Sign a typed-data request.
    pub async fn sign_typed_data(&self, typed_data: &TypedDataDescription) -> Result<Signature> {
        match self {
            Signer::PrivateKey(wallet) => wallet.sign_hash(&typed_data.signing_hash()?),
            Signer::TypedDataWallet(wallet) => {
                let raw = wallet.sign_typed_data(&typed_data.to_json()).await?;
                Signature::from_hex(&raw)
            }
            Signer::Eip1193(provider) => {
                let address = self.resolve_address().await?;
                let document = serde_json::to_string(&typed_data.to_json())?;
                debug!(address = %address, primary_type = %typed_data.schema.primary_type, "Requesting eth_signTypedData_v4");

                let response = provider
                    .request(
                        "eth_signTypedData_v4",
                        json!([address.to_checksum(None), document]),
                    )
                    .await?;
                let raw = response.as_str().ok_or_else(|| {
                    Error::signing(format!("provider returned a non-string signature: {}", response))
                })?;
                Signature::from_hex(raw)
            }
        }
    }

    /// Sign a raw digest. Only local keys expose this.
    pub fn sign_hash(&self, hash: &B256) -> Result<Signature> {
        match self {
            Signer::PrivateKey(wallet) => wallet.sign_hash(hash),
            other => Err(Error::UnsupportedSigner {
                kind: format!("{} cannot sign raw hashes", other.kind()),
            }),
        }
    }

    pub fn can_sign_hash(&self) -> bool {
        matches!(self, Signer::PrivateKey(_))
    }
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Signer::PrivateKey(wallet) => f.debug_tuple("PrivateKey").field(wallet).finish(),
            Signer::TypedDataWallet(_) => f.write_str("TypedDataWallet(..)"),
            Signer::Eip1193(_) => f.write_str("Eip1193(..)"),
        }
    }
}

impl From<LocalWallet> for Signer {
    fn from(value: LocalWallet) -> Self {
        Signer::PrivateKey(value)
    }
}

fn parse_address(raw: &str) -> Result<Address> {
    raw.trim()
        .parse::<Address>()
        .map_err(|e| Error::AddressUnavailable {
            message: format!("unparsable address '{}': {}", raw, e),
        })
}

/// Declarative signer selection.
#[derive(Clone, Deserialize)]
pub struct SignerConfig {
    pub kind: String,
    #[serde(default)]
    pub private_key: Option<String>,
    /// Expected address; checked against the key when present.
    #[serde(default)]
    pub address: Option<Address>,
}

impl SignerConfig {
    pub fn private_key(key: impl Into<String>) -> Self {
        Self {
            kind: PRIVATE_KEY_KIND.to_string(),
            private_key: Some(key.into()),
            address: None,
        }
    }
}

impl std::fmt::Debug for SignerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignerConfig")
            .field("kind", &self.kind)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("address", &self.address)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signing::l1::agent_typed_data;
    use crate::signing::domain::Network;

    // Test private key (DO NOT USE IN PRODUCTION - this is a well-known test key)
    const TEST_PRIVATE_KEY: &str =
        "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const TEST_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    struct FixedAccounts(Value);

    #[async_trait]
    impl Eip1193Provider for FixedAccounts {
        async fn request(&self, method: &str, _params: Value) -> Result<Value> {
            match method {
                "eth_requestAccounts" => Ok(self.0.clone()),
                other => Err(Error::Signing {
                    message: format!("unexpected method {}", other),
                }),
            }
        }
    }

    /// Provider backed by a local key, answering the two methods the adapter uses.
    struct KeyBackedProvider(LocalWallet);

    #[async_trait]
    impl Eip1193Provider for KeyBackedProvider {
        async fn request(&self, method: &str, params: Value) -> Result<Value> {
            match method {
                "eth_requestAccounts" => Ok(json!([self.0.address_string()])),
                "eth_signTypedData_v4" => {
                    let document = params[1].as_str().unwrap_or_default();
                    let typed: alloy_dyn_abi::TypedData = serde_json::from_str(document)?;
                    let hash = typed.eip712_signing_hash().map_err(Error::signing)?;
                    Ok(json!(self.0.sign_hash(&hash)?.to_hex()))
                }
                other => Err(Error::Signing {
                    message: format!("unexpected method {}", other),
                }),
            }
        }
    }

    /// Wallet that returns a fixed address string and signs with a local key.
    struct HexWallet {
        address: String,
        key: LocalWallet,
    }

    #[async_trait]
    impl TypedDataWallet for HexWallet {
        async fn address(&self) -> Result<String> {
            Ok(self.address.clone())
        }

        async fn sign_typed_data(&self, typed_data: &Value) -> Result<String> {
            let typed: alloy_dyn_abi::TypedData = serde_json::from_value(typed_data.clone())?;
            let hash = typed.eip712_signing_hash().map_err(Error::signing)?;
            Ok(self.key.sign_hash(&hash)?.to_hex())
        }
    }

    #[test]
    fn test_typed_data_wallet() {
        let key = LocalWallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let wallet = Signer::TypedDataWallet(Arc::new(HexWallet {
            address: TEST_ADDRESS.to_lowercase(),
            key: key.clone(),
        }));

        let typed = agent_typed_data(B256::repeat_byte(7), Network::Testnet);
        let (address, signature) = tokio_test::block_on(async {
            (
                wallet.resolve_address().await.unwrap(),
                wallet.sign_typed_data(&typed).await.unwrap(),
            )
        });

        assert_eq!(address, key.address());
        assert_eq!(signature, key.sign_hash(&typed.signing_hash().unwrap()).unwrap());
        assert!(!wallet.can_sign_hash());

        let broken = Signer::TypedDataWallet(Arc::new(HexWallet {
            address: "wallet-locked".to_string(),
            key,
        }));
        assert!(matches!(
            tokio_test::block_on(broken.resolve_address()),
            Err(Error::AddressUnavailable { .. })
        ));
    }

    #[test]
    fn test_known_address() {
        let wallet = LocalWallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        assert_eq!(wallet.address_string(), TEST_ADDRESS);

        let no_prefix = LocalWallet::from_private_key(TEST_PRIVATE_KEY.trim_start_matches("0x")).unwrap();
        assert_eq!(no_prefix.address(), wallet.address());
    }

    #[test]
    fn test_invalid_private_key() {
        assert!(matches!(
            LocalWallet::from_private_key("not-a-valid-key"),
            Err(Error::Config { .. })
        ));
        assert!(LocalWallet::from_private_key("0x1234").is_err());
    }

    #[test]
    fn test_debug_hides_key() {
        let wallet = LocalWallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let debug = format!("{:?}", Signer::from(wallet));
        assert!(!debug.contains("ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"));
        assert!(debug.contains(TEST_ADDRESS));

        let config_debug = format!("{:?}", SignerConfig::private_key(TEST_PRIVATE_KEY));
        assert!(!config_debug.contains("ac0974"));
    }

    #[tokio::test]
    async fn test_resolve_address_deterministic() {
        let signer = Signer::private_key(TEST_PRIVATE_KEY).unwrap();
        let first = signer.resolve_address().await.unwrap();
        let second = signer.resolve_address().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first, TEST_ADDRESS.parse::<Address>().unwrap());
    }

    #[test]
    fn test_from_config() {
        let signer = Signer::from_config(&SignerConfig::private_key(TEST_PRIVATE_KEY)).unwrap();
        assert_eq!(signer.kind(), PRIVATE_KEY_KIND);

        let unknown = SignerConfig {
            kind: "hardware".to_string(),
            private_key: None,
            address: None,
        };
        assert!(matches!(
            Signer::from_config(&unknown),
            Err(Error::UnsupportedSigner { kind }) if kind == "hardware"
        ));

        let mismatched = SignerConfig {
            address: Some(Address::ZERO),
            ..SignerConfig::private_key(TEST_PRIVATE_KEY)
        };
        assert!(matches!(Signer::from_config(&mismatched), Err(Error::Config { .. })));
    }

    #[test]
    fn test_from_signing_config() {
        let mut config = Config::test_config();
        assert!(matches!(
            Signer::from_signing_config(&config.signing),
            Err(Error::Config { .. })
        ));

        config.signing.signer = Some(SignerConfig::private_key(TEST_PRIVATE_KEY));
        let signer = Signer::from_signing_config(&config.signing).unwrap();
        let expected: Address = TEST_ADDRESS.parse().unwrap();
        assert_eq!(tokio_test::block_on(signer.resolve_address()).unwrap(), expected);
    }

    #[tokio::test]
    async fn test_eip1193_no_accounts() {
        let signer = Signer::Eip1193(Arc::new(FixedAccounts(json!([]))));
        assert!(matches!(
            signer.resolve_address().await,
            Err(Error::AddressUnavailable { .. })
        ));

        let garbage = Signer::Eip1193(Arc::new(FixedAccounts(json!(["0xnope"]))));
        assert!(matches!(
            garbage.resolve_address().await,
            Err(Error::AddressUnavailable { .. })
        ));
    }

    #[test]
    fn test_external_wallet_cannot_sign_hash() {
        let signer = Signer::Eip1193(Arc::new(FixedAccounts(json!([]))));
        assert!(!signer.can_sign_hash());
        assert!(matches!(
            signer.sign_hash(&B256::ZERO),
            Err(Error::UnsupportedSigner { .. })
        ));
    }

    #[tokio::test]
    async fn test_eip1193_matches_local_signature() {
        let wallet = LocalWallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let local = Signer::from(wallet.clone());
        let provider = Signer::Eip1193(Arc::new(KeyBackedProvider(wallet)));

        let typed = agent_typed_data(B256::repeat_byte(0x42), Network::Mainnet);
        let a = local.sign_typed_data(&typed).await.unwrap();
        let b = provider.sign_typed_data(&typed).await.unwrap();
        assert_eq!(a, b);

        let recovered = b.recover_address(&typed.signing_hash().unwrap()).unwrap();
        assert_eq!(recovered, provider.resolve_address().await.unwrap());
    }
}
