//! Multi-sig signing rounds.
//!
//! A round canonicalizes the action once, derives a single nonce, has every
//! authorized signer sign the identical statement concurrently, and wraps
//! the collected signatures in a `multiSig` action the leader then signs.

use alloy_primitives::Address;
use futures_util::future::try_join_all;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, warn};
use venue_core::signing::domain::{format_chain_id, MULTI_SIG_CHAIN_ID};
use venue_core::signing::{
    sign_multi_sig_envelope, sign_multi_sig_l1_action, sign_multi_sig_user_signed_action,
    MultiSigContext, Signer, SigningContext,
};
use venue_core::types::{
    Action, ActionCategory, EnvelopeSignature, MultiSigAction, MultiSigPayload, Signature,
    SignedEnvelope,
};
use venue_core::{canonicalize, canonicalize_action, Error, Result};

use crate::cancel::CancelSignal;
use crate::nonce::NonceManager;
use crate::transport::{ExchangeResponse, Transport};

/// Authorized signers of a multi-sig account, one of which is the leader.
///
/// Signatures are collected in the order signers appear here.
#[derive(Debug, Clone)]
pub struct SignerSet {
    cosigners: Vec<Signer>,
    leader: usize,
}

impl SignerSet {
    /// The first signer leads until [`set_leader`](Self::set_leader) says otherwise.
    pub fn new(cosigners: Vec<Signer>) -> Result<Self> {
        if cosigners.is_empty() {
            return Err(Error::invalid_action("signer set is empty"));
        }
        Ok(Self { cosigners, leader: 0 })
    }

    pub fn with_leader(cosigners: Vec<Signer>, leader: usize) -> Result<Self> {
        let mut set = Self::new(cosigners)?;
        set.set_leader(leader)?;
        Ok(set)
    }

    pub fn leader(&self) -> &Signer {
        &self.cosigners[self.leader]
    }

    pub fn leader_index(&self) -> usize {
        self.leader
    }

    pub fn set_leader(&mut self, index: usize) -> Result<()> {
        if index >= self.cosigners.len() {
            return Err(Error::invalid_action(format!(
                "leader index {} out of range for {} signers",
                index,
                self.cosigners.len()
            )));
        }
        self.leader = index;
        Ok(())
    }

    pub fn cosigners(&self) -> &[Signer] {
        &self.cosigners
    }

    pub fn len(&self) -> usize {
        self.cosigners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cosigners.is_empty()
    }
}

/// Drives signing rounds for multi-sig accounts.
pub struct MultiSigCoordinator {
    nonces: Arc<NonceManager>,
    transport: Arc<dyn Transport>,
}

impl MultiSigCoordinator {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_nonce_manager(transport, Arc::new(NonceManager::new()))
    }

    pub fn with_nonce_manager(transport: Arc<dyn Transport>, nonces: Arc<NonceManager>) -> Self {
        Self { nonces, transport }
    }

    pub fn nonces(&self) -> &NonceManager {
        &self.nonces
    }

    /// Run a round over a raw JSON action.
    pub async fn coordinate_json(
        &self,
        signers: &SignerSet,
        multi_sig_user: Address,
        raw: &Value,
        ctx: &SigningContext,
        cancel: Option<&CancelSignal>,
    ) -> Result<SignedEnvelope> {
        let action = canonicalize(raw)?;
        self.coordinate(signers, multi_sig_user, action, ctx, cancel)
            .await
    }

    /// Run a round and return the envelope without submitting it.
    pub async fn coordinate(
        &self,
        signers: &SignerSet,
        multi_sig_user: Address,
        action: Action,
        ctx: &SigningContext,
        cancel: Option<&CancelSignal>,
    ) -> Result<SignedEnvelope> {
        let action = canonicalize_action(action);

        if let Action::MultiSig(wrapper) = action {
            // Only user-signed payloads record their round nonce.
            let nonce = wrapper.payload.action.embedded_nonce().ok_or_else(|| {
                Error::invalid_action(
                    "an L1 multi-sig wrapper does not carry its nonce; use forward_wrapper",
                )
            })?;
            return self
                .forward_wrapper(signers, wrapper, nonce, ctx, cancel)
                .await;
        }

        let outer_signer = until_cancelled(cancel, signers.leader().resolve_address()).await?;

        let category = action.category();
        let nonce = match category {
            ActionCategory::L1 => self.nonces.next_nonce(outer_signer),
            _ => {
                if action.hyperliquid_chain() != Some(ctx.network) {
                    return Err(Error::invalid_action(format!(
                        "'{}' is bound to {:?}, round is on {}",
                        action.kind(),
                        action.hyperliquid_chain(),
                        ctx.network
                    )));
                }
                action.embedded_nonce().ok_or_else(|| {
                    Error::invalid_action(format!("'{}' carries no nonce", action.kind()))
                })?
            }
        };

        let multi_sig = MultiSigContext {
            multi_sig_user,
            outer_signer,
        };

        info!(
            action = %action.kind(),
            signers = signers.len(),
            multi_sig_user = %multi_sig_user,
            outer_signer = %outer_signer,
            nonce,
            "Starting multi-sig round"
        );

        let signatures = until_cancelled(
            cancel,
            collect_signatures(signers.cosigners(), &multi_sig, &action, category, nonce, ctx),
        )
        .await?;

        let wrapper = MultiSigAction {
            signature_chain_id: format_chain_id(MULTI_SIG_CHAIN_ID),
            signatures,
            payload: MultiSigPayload {
                multi_sig_user,
                outer_signer,
                action: Box::new(action),
            },
        };

        let outer = until_cancelled(
            cancel,
            sign_multi_sig_envelope(signers.leader(), &wrapper, nonce, ctx),
        )
        .await?;

        debug!(nonce, collected = wrapper.signatures.len(), "Multi-sig round complete");

        Ok(SignedEnvelope {
            action: Action::MultiSig(wrapper),
            nonce,
            signature: EnvelopeSignature::Single(outer),
            vault_address: ctx.vault_address,
            expires_after: ctx.expires_after,
        })
    }

    /// Run a round and hand the envelope to the transport.
    pub async fn coordinate_and_submit(
        &self,
        signers: &SignerSet,
        multi_sig_user: Address,
        action: Action,
        ctx: &SigningContext,
        cancel: Option<&CancelSignal>,
    ) -> Result<ExchangeResponse> {
        let envelope = self
            .coordinate(signers, multi_sig_user, action, ctx, cancel)
            .await?;
        self.submit(&envelope, cancel).await
    }

    /// Send an already-signed envelope as-is.
    pub async fn submit(
        &self,
        envelope: &SignedEnvelope,
        cancel: Option<&CancelSignal>,
    ) -> Result<ExchangeResponse> {
        until_cancelled(cancel, self.transport.submit(envelope)).await
    }

    /// Attach the leader's outer signature to an already-assembled wrapper.
    ///
    /// `nonce` must be the nonce the cosigners signed at. The wrapper is not
    /// re-signed or re-wrapped, and no nonce is allocated; the leader's floor
    /// is raised to `nonce` so later rounds stay above it.
    pub async fn forward_wrapper(
        &self,
        signers: &SignerSet,
        wrapper: MultiSigAction,
        nonce: u64,
        ctx: &SigningContext,
        cancel: Option<&CancelSignal>,
    ) -> Result<SignedEnvelope> {
        let leader = until_cancelled(cancel, signers.leader().resolve_address()).await?;
        if leader != wrapper.payload.outer_signer {
            return Err(Error::invalid_action(format!(
                "wrapper names outer signer {}, leader is {}",
                wrapper.payload.outer_signer, leader
            )));
        }

        let inner = &wrapper.payload.action;
        match inner.category() {
            ActionCategory::L1 => {}
            ActionCategory::UserSigned => {
                if inner.embedded_nonce() != Some(nonce) {
                    return Err(Error::invalid_action(format!(
                        "'{}' was signed at {:?}, not {}",
                        inner.kind(),
                        inner.embedded_nonce(),
                        nonce
                    )));
                }
                if inner.hyperliquid_chain() != Some(ctx.network) {
                    return Err(Error::invalid_action(format!(
                        "'{}' is bound to {:?}, round is on {}",
                        inner.kind(),
                        inner.hyperliquid_chain(),
                        ctx.network
                    )));
                }
            }
            ActionCategory::MultiSigWrapper => {
                return Err(Error::invalid_action("nested multi-sig wrappers are not supported"));
            }
        }

        self.nonces.observe(leader, nonce);
        info!(
            action = %inner.kind(),
            signatures = wrapper.signatures.len(),
            outer_signer = %leader,
            nonce,
            "Forwarding pre-assembled multi-sig action"
        );

        let outer = until_cancelled(
            cancel,
            sign_multi_sig_envelope(signers.leader(), &wrapper, nonce, ctx),
        )
        .await?;

        Ok(SignedEnvelope {
            action: Action::MultiSig(wrapper),
            nonce,
            signature: EnvelopeSignature::Single(outer),
            vault_address: ctx.vault_address,
            expires_after: ctx.expires_after,
        })
    }
}

impl std::fmt::Debug for MultiSigCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiSigCoordinator")
            .field("nonces", &self.nonces)
            .finish()
    }
}

/// Every cosigner signs the same input; output order matches `cosigners`.
async fn collect_signatures(
    cosigners: &[Signer],
    multi_sig: &MultiSigContext,
    action: &Action,
    category: ActionCategory,
    nonce: u64,
    ctx: &SigningContext,
) -> Result<Vec<Signature>> {
    try_join_all(cosigners.iter().map(|signer| async move {
        match category {
            ActionCategory::L1 => sign_multi_sig_l1_action(signer, multi_sig, action, nonce, ctx).await,
            _ => sign_multi_sig_user_signed_action(signer, multi_sig, action).await,
        }
    }))
    .await
}

async fn until_cancelled<T>(
    cancel: Option<&CancelSignal>,
    work: impl Future<Output = Result<T>>,
) -> Result<T> {
    let Some(cancel) = cancel else {
        return work.await;
    };

    if cancel.is_cancelled() {
        warn!("Signing round cancelled before start");
        return Err(Error::Cancelled);
    }

    tokio::select! {
        result = work => result,
        _ = cancel.cancelled() => {
            warn!("Signing round cancelled");
            Err(Error::Cancelled)
        }
    }
}
