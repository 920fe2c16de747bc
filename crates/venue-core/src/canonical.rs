//! Canonicalization of caller-supplied actions.
//!
//! Parsing into [`Action`] fixes the key order: every variant re-emits its
//! fields in declaration order no matter how the caller's JSON was laid out.
//! The few value normalizations the venue expects are applied once here so
//! the single-signer and multi-sig paths hash the same bytes.

use serde_json::Value;
use tracing::debug;

use crate::types::{Action, ActionKind};
use crate::{Error, Result};

const MISSING_TAG: &str = "<missing>";

/// Parse and normalize a raw JSON action.
pub fn canonicalize(raw: &Value) -> Result<Action> {
    let tag = raw
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::UnrecognizedActionType {
            tag: MISSING_TAG.to_string(),
        })?;

    if ActionKind::from_tag(tag).is_none() {
        return Err(Error::UnrecognizedActionType {
            tag: tag.to_string(),
        });
    }

    let action: Action = serde_json::from_value(raw.clone())
        .map_err(|e| Error::invalid_action(format!("'{}': {}", tag, e)))?;

    debug!(tag, "Canonicalized action");
    Ok(canonicalize_action(action))
}

/// Apply value normalizations to an already-typed action.
///
/// Idempotent. An empty `agentName` becomes absent, and a multi-sig wrapper's
/// inner action is normalized the same way.
pub fn canonicalize_action(action: Action) -> Action {
    match action {
        Action::ApproveAgent(mut approve) => {
            if approve.agent_name.as_deref().is_some_and(str::is_empty) {
                approve.agent_name = None;
            }
            Action::ApproveAgent(approve)
        }
        Action::MultiSig(mut wrapper) => {
            let inner = std::mem::replace(&mut *wrapper.payload.action, Action::Noop);
            *wrapper.payload.action = canonicalize_action(inner);
            Action::MultiSig(wrapper)
        }
        other => other,
    }
}

/// Serialize an action to its canonical JSON form.
pub fn to_canonical_json(action: &Action) -> Result<Value> {
    Ok(serde_json::to_value(action)?)
}
