//! Error types for venue action signing.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("MessagePack encoding error: {0}")]
    MsgPack(#[from] rmp_serde::encode::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The signer value matches no recognized backend shape.
    #[error("Unsupported signer: {kind}")]
    UnsupportedSigner { kind: String },

    /// An external provider returned no usable address.
    #[error("Address unavailable: {message}")]
    AddressUnavailable { message: String },

    /// No canonical field order exists for the action's type tag.
    #[error("Unrecognized action type: {tag}")]
    UnrecognizedActionType { tag: String },

    /// The action is well-tagged but its fields cannot be used for signing.
    #[error("Invalid action: {message}")]
    InvalidAction { message: String },

    /// The backend rejected or failed to produce a signature.
    #[error("Signing error: {message}")]
    Signing { message: String },

    /// Structured rejection returned by the venue, passed through unchanged.
    #[error("API error: {message}")]
    Api { message: String, status: Option<u16> },

    #[error("Transport error: {message}")]
    Transport { message: String },

    #[error("Signing round cancelled")]
    Cancelled,
}

impl Error {
    pub fn signing(err: impl std::fmt::Display) -> Self {
        Self::Signing {
            message: err.to_string(),
        }
    }

    pub fn invalid_action(message: impl Into<String>) -> Self {
        Self::InvalidAction {
            message: message.into(),
        }
    }
}

impl From<alloy_signer::Error> for Error {
    fn from(err: alloy_signer::Error) -> Self {
        Self::signing(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
