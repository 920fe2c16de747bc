//! Wire types: actions, orders, signatures and the signed envelope.

pub mod action;
pub mod envelope;
pub mod order;
pub mod serde_util;
pub mod signature;

pub use action::*;
pub use envelope::{EnvelopeSignature, SignedEnvelope};
pub use order::*;
pub use signature::Signature;
