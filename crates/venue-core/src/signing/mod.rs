//! EIP-712 signing for venue actions.
//!
//! Implements the phantom-agent scheme for L1 actions and typed-data
//! signing for user-signed actions, plus the multi-sig variants of both.

pub mod domain;
pub mod l1;
pub mod signer;
pub mod typed_data;
pub mod wallet;

pub use domain::{Eip712Domain, Network, MULTI_SIG_CHAIN_ID};
pub use signer::{
    sign_action, sign_l1_action, sign_multi_sig_envelope, sign_multi_sig_l1_action,
    sign_multi_sig_user_signed_action, sign_user_signed_action, MultiSigContext, SigningContext,
};
pub use typed_data::{extend_types_for_multi_sig, Eip712Field, Eip712Schema, TypedDataDescription};
pub use wallet::{Eip1193Provider, LocalWallet, Signer, SignerConfig, TypedDataWallet};
