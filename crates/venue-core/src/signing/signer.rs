//! Action signing for both venue signature schemes.
//!
//! L1 actions are MessagePack-hashed and authorized through the phantom
//! agent. User-signed actions are signed as EIP-712 structs over their own
//! fields. Each scheme has a multi-sig variant that binds the signature to
//! the multi-sig account and the submitting leader.

use alloy_primitives::{Address, B256};
use tracing::debug;

use super::domain::{parse_chain_id, Network};
use super::l1::{action_hash, agent_signing_hash, agent_typed_data, multi_sig_action_hash, multi_sig_l1_hash};
use super::typed_data::{user_signed_schema, TypedDataDescription};
use super::wallet::Signer;
use crate::types::{Action, ActionCategory, MultiSigAction, Signature, SignedEnvelope};
use crate::{Config, Error, Result};

/// Request-level parameters shared by every signature over one action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SigningContext {
    pub network: Network,
    pub vault_address: Option<Address>,
    /// Millisecond timestamp after which the venue drops the request.
    pub expires_after: Option<u64>,
}

impl SigningContext {
    pub fn new(network: Network) -> Self {
        Self {
            network,
            ..Default::default()
        }
    }

    /// Network and vault taken from configuration; no expiry.
    pub fn from_config(config: &Config) -> Self {
        Self {
            network: config.network,
            vault_address: config.signing.vault_address,
            expires_after: None,
        }
    }

    pub fn with_vault(mut self, vault_address: Address) -> Self {
        self.vault_address = Some(vault_address);
        self
    }

    pub fn with_expires_after(mut self, expires_after: u64) -> Self {
        self.expires_after = Some(expires_after);
        self
    }
}

/// The multi-sig account an action is signed for, and who submits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultiSigContext {
    pub multi_sig_user: Address,
    pub outer_signer: Address,
}

/// Sign an L1 action as a single signer.
pub async fn sign_l1_action(
    signer: &Signer,
    action: &Action,
    nonce: u64,
    ctx: &SigningContext,
) -> Result<Signature> {
    ensure_category(action, ActionCategory::L1)?;
    let connection_id = action_hash(action, nonce, ctx.vault_address, ctx.expires_after)?;
    sign_connection_id(signer, connection_id, ctx.network).await
}

/// A cosigner's signature over an L1 action on behalf of a multi-sig account.
pub async fn sign_multi_sig_l1_action(
    signer: &Signer,
    multi_sig: &MultiSigContext,
    action: &Action,
    nonce: u64,
    ctx: &SigningContext,
) -> Result<Signature> {
    ensure_category(action, ActionCategory::L1)?;
    let connection_id = multi_sig_l1_hash(
        multi_sig.multi_sig_user,
        multi_sig.outer_signer,
        action,
        nonce,
        ctx.vault_address,
        ctx.expires_after,
    )?;
    sign_connection_id(signer, connection_id, ctx.network).await
}

async fn sign_connection_id(signer: &Signer, connection_id: B256, network: Network) -> Result<Signature> {
    if signer.can_sign_hash() {
        signer.sign_hash(&agent_signing_hash(connection_id, network))
    } else {
        signer
            .sign_typed_data(&agent_typed_data(connection_id, network))
            .await
    }
}

/// Typed-data request for a user-signed action.
pub fn user_signed_typed_data(action: &Action) -> Result<TypedDataDescription> {
    ensure_category(action, ActionCategory::UserSigned)?;
    let schema = user_signed_schema(action.kind())?;
    TypedDataDescription::for_action(action, &schema)
}

/// Typed-data request for a user-signed action signed on behalf of a
/// multi-sig account.
pub fn multi_sig_user_signed_typed_data(
    multi_sig: &MultiSigContext,
    action: &Action,
) -> Result<TypedDataDescription> {
    Ok(user_signed_typed_data(action)?.with_multi_sig(multi_sig.multi_sig_user, multi_sig.outer_signer))
}

pub async fn sign_user_signed_action(signer: &Signer, action: &Action) -> Result<Signature> {
    let typed_data = user_signed_typed_data(action)?;
    debug!(primary_type = %typed_data.schema.primary_type, "Signing user action");
    signer.sign_typed_data(&typed_data).await
}

pub async fn sign_multi_sig_user_signed_action(
    signer: &Signer,
    multi_sig: &MultiSigContext,
    action: &Action,
) -> Result<Signature> {
    let typed_data = multi_sig_user_signed_typed_data(multi_sig, action)?;
    debug!(primary_type = %typed_data.schema.primary_type, "Signing multi-sig user action");
    signer.sign_typed_data(&typed_data).await
}

/// Typed-data statement the leader signs over an assembled wrapper.
pub fn send_multi_sig_typed_data(
    wrapper: &MultiSigAction,
    nonce: u64,
    ctx: &SigningContext,
) -> Result<TypedDataDescription> {
    let hash = multi_sig_action_hash(wrapper, nonce, ctx.vault_address, ctx.expires_after)?;
    Ok(TypedDataDescription::send_multi_sig(
        parse_chain_id(&wrapper.signature_chain_id)?,
        ctx.network.chain_name(),
        hash,
        nonce,
    ))
}

/// The leader's outer signature authorizing submission of a wrapper.
pub async fn sign_multi_sig_envelope(
    leader: &Signer,
    wrapper: &MultiSigAction,
    nonce: u64,
    ctx: &SigningContext,
) -> Result<Signature> {
    let typed_data = send_multi_sig_typed_data(wrapper, nonce, ctx)?;
    leader.sign_typed_data(&typed_data).await
}

/// Sign any single-signer action and build its envelope.
///
/// `l1_nonce` is used for L1 actions. User-signed actions carry their own
/// nonce in their `time`/`nonce` field, and that value is used instead.
pub async fn sign_action(
    signer: &Signer,
    action: Action,
    l1_nonce: u64,
    ctx: &SigningContext,
) -> Result<SignedEnvelope> {
    let (signature, nonce) = match action.category() {
        ActionCategory::L1 => (sign_l1_action(signer, &action, l1_nonce, ctx).await?, l1_nonce),
        ActionCategory::UserSigned => {
            let nonce = action
                .embedded_nonce()
                .ok_or_else(|| Error::invalid_action(format!("'{}' carries no nonce", action.kind())))?;
            (sign_user_signed_action(signer, &action).await?, nonce)
        }
        ActionCategory::MultiSigWrapper => {
            return Err(Error::invalid_action(
                "multi-sig wrappers are assembled by the coordinator",
            ))
        }
    };

    // Only L1 envelopes carry vault and expiry.
    let (vault_address, expires_after) = match action.category() {
        ActionCategory::L1 => (ctx.vault_address, ctx.expires_after),
        _ => (None, None),
    };

    Ok(SignedEnvelope {
        action,
        nonce,
        signature: signature.into(),
        vault_address,
        expires_after,
    })
}

fn ensure_category(action: &Action, expected: ActionCategory) -> Result<()> {
    if action.category() == expected {
        Ok(())
    } else {
        Err(Error::invalid_action(format!(
            "'{}' is {:?}, expected {:?}",
            action.kind(),
            action.category(),
            expected
        )))
    }
}
