//! Multi-sig Engine
//!
//! Nonce management, multi-signature signing rounds, and submission of
//! signed envelopes to the exchange.

pub mod cancel;
pub mod coordinator;
pub mod nonce;
pub mod transport;

pub use cancel::CancelSignal;
pub use coordinator::{MultiSigCoordinator, SignerSet};
pub use nonce::NonceManager;
pub use transport::{ExchangeResponse, HttpTransport, Transport};
