//! venue-signer: action signing and multi-signature aggregation
//!
//! This is the root crate that ties the workspace together for integration
//! tests and benchmarks. For actual functionality, use the individual crates
//! directly:
//!
//! - `venue-core`: Action model, canonicalization, EIP-712 and L1 signing, wallet adapter
//! - `multisig-engine`: Nonce management, multi-sig coordination, exchange transport

pub use multisig_engine as engine;
pub use venue_core as core;

pub use multisig_engine::{CancelSignal, MultiSigCoordinator, NonceManager, SignerSet};
pub use venue_core::signing::{sign_l1_action, sign_user_signed_action};
pub use venue_core::{Error, Result};

/// Install a `tracing` subscriber honoring `RUST_LOG`, falling back to
/// `default_directive` when it is unset.
///
/// For binaries, benchmarks and tests; libraries never install one themselves.
/// Calling it again is a no-op.
pub fn init_tracing(default_directive: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive)),
        )
        .with_test_writer()
        .try_init();
}
