//! Venue Core Library
//!
//! Action model, canonicalization, and signing for venue actions.
//! Covers both the MessagePack/phantom-agent path for L1 actions and the
//! EIP-712 path for user-signed actions, including the multi-sig variants
//! of each.

pub mod canonical;
pub mod config;
pub mod error;
pub mod signing;
pub mod types;

pub use canonical::{canonicalize, canonicalize_action};
pub use config::Config;
pub use error::{Error, Result};
pub use signing::domain::Network;
