use apns_wire::{GatewayResponse, Message, WireError};
use thiserror::Error;

/// Transport and handshake failures reported by a [`crate::Connection`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConnectionError {
    #[error("invalid gateway endpoint <{endpoint}>: {reason}")]
    Endpoint { endpoint: String, reason: String },

    #[error("client identity unusable: {message}")]
    Identity { message: String },

    #[error("tls failure: {message}")]
    Tls { message: String },

    #[error("transport error: {message}")]
    Io { message: String },

    #[error("connection is not open")]
    NotOpen,
}

impl ConnectionError {
    /// Returns `true` for transient faults that may succeed on a fresh
    /// connection attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Tls { .. } | Self::Io { .. })
    }
}

/// Everything `Sender::send` can fail with.
///
/// The first three variants are precondition failures raised before any
/// encoding or I/O. `Rejected` is the only variant with recovery semantics:
/// the connection has already been closed when it surfaces, so the caller
/// must reopen (or let the next send reopen lazily) before retrying.
#[derive(Clone, Debug, PartialEq, Error)]
#[non_exhaustive]
pub enum SendError {
    #[error("no frame encoder configured")]
    EncoderUndefined,

    #[error("no connection configured")]
    ConnectionUndefined,

    #[error("message has no device token")]
    DeviceTokenMissing,

    #[error(transparent)]
    Encode(#[from] WireError),

    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error("gateway rejected notification {}: {}", .response.identifier, .response.status)]
    Rejected { response: GatewayResponse, message: Message },
}

impl SendError {
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Connection(err) => err.is_retryable(),
            _ => false,
        }
    }
}
