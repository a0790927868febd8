use thiserror::Error;

/// Errors produced while turning a [`crate::Message`] into a gateway frame.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum WireError {
    #[error("invalid device token: {reason}")]
    Token { reason: String },

    #[error("payload is {len} bytes, gateway limit is {max}")]
    PayloadTooLarge { len: usize, max: usize },

    #[error("payload encoding failed: {message}")]
    Encode { message: String },
}
