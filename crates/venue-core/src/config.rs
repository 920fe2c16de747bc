//! Configuration management for the venue signer.

use crate::signing::domain::Network;
use crate::signing::wallet::SignerConfig;
use crate::{Error, Result};
use alloy_primitives::Address;
use std::env;
use std::time::Duration;

pub const MAINNET_API_URL: &str = "https://api.hyperliquid.xyz";
pub const TESTNET_API_URL: &str = "https://api.hyperliquid-testnet.xyz";

const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub network: Network,
    pub api: ApiConfig,
    pub signing: SigningConfig,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub request_timeout: Duration,
}

/// Inputs for [`Signer::from_signing_config`](crate::signing::Signer::from_signing_config)
/// and [`SigningContext::from_config`](crate::signing::SigningContext::from_config).
#[derive(Debug, Clone)]
pub struct SigningConfig {
    pub signer: Option<SignerConfig>,
    pub vault_address: Option<Address>,
}

impl Config {
    /// Load configuration from environment variables.
    #[allow(clippy::result_large_err)]
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let network = match env::var("VENUE_NETWORK") {
            Ok(raw) => raw.parse::<Network>()?,
            Err(_) => Network::default(),
        };

        let base_url = env::var("VENUE_API_URL").unwrap_or_else(|_| default_api_url(network).to_string());

        let vault_address = env::var("VENUE_VAULT_ADDRESS")
            .ok()
            .map(|raw| {
                raw.trim().parse::<Address>().map_err(|e| Error::Config {
                    message: format!("VENUE_VAULT_ADDRESS: {}", e),
                })
            })
            .transpose()?;

        let request_timeout_ms = env::var("VENUE_REQUEST_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS);

        Ok(Self {
            network,
            api: ApiConfig {
                base_url,
                request_timeout: Duration::from_millis(request_timeout_ms),
            },
            signing: SigningConfig {
                signer: env::var("VENUE_PRIVATE_KEY").ok().map(SignerConfig::private_key),
                vault_address,
            },
        })
    }

    /// Load configuration for testing (with defaults).
    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            network: Network::Testnet,
            api: ApiConfig {
                base_url: TESTNET_API_URL.to_string(),
                request_timeout: Duration::from_millis(1_000),
            },
            signing: SigningConfig {
                signer: None,
                vault_address: None,
            },
        }
    }
}

pub fn default_api_url(network: Network) -> &'static str {
    match network {
        Network::Mainnet => MAINNET_API_URL,
        Network::Testnet => TESTNET_API_URL,
    }
}
