mod error;
mod frame;
mod message;
mod payload;
mod status;

pub use error::WireError;
pub use frame::{
    decode_response, encode_frame, GatewayResponse, DEVICE_TOKEN_LEN, MAX_PAYLOAD_LEN,
    RESPONSE_COMMAND, RESPONSE_LEN, SEND_COMMAND,
};
pub use message::Message;
pub use payload::NotificationPayload;
pub use status::ErrorStatus;
