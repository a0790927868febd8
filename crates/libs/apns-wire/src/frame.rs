use crate::error::WireError;
use crate::message::Message;
use crate::payload::NotificationPayload;
use crate::status::ErrorStatus;

/// Command byte of an outbound notification frame.
pub const SEND_COMMAND: u8 = 1;
/// Command byte the gateway uses for its error response.
pub const RESPONSE_COMMAND: u8 = 8;
/// Error responses are always exactly this long.
pub const RESPONSE_LEN: usize = 6;
/// Device tokens decode to this many raw bytes.
pub const DEVICE_TOKEN_LEN: usize = 32;
/// Gateway limit on the serialized payload section.
pub const MAX_PAYLOAD_LEN: usize = 2048;

/// Encodes a notification into the gateway's binary frame layout:
///
/// `command(1) | identifier(4 BE) | expiry(4 BE) | token_len(2 BE) |
/// token | payload_len(2 BE) | payload`
pub fn encode_frame(message: &Message) -> Result<Vec<u8>, WireError> {
    let token = decode_device_token(&message.device_token)?;
    let payload = NotificationPayload::from_message(message).to_bytes()?;
    if payload.len() > MAX_PAYLOAD_LEN {
        return Err(WireError::PayloadTooLarge { len: payload.len(), max: MAX_PAYLOAD_LEN });
    }

    let mut frame = Vec::with_capacity(11 + token.len() + payload.len());
    frame.push(SEND_COMMAND);
    frame.extend_from_slice(&message.identifier.to_be_bytes());
    frame.extend_from_slice(&message.expiry.to_be_bytes());
    frame.extend_from_slice(&(token.len() as u16).to_be_bytes());
    frame.extend_from_slice(&token);
    frame.extend_from_slice(&(payload.len() as u16).to_be_bytes());
    frame.extend_from_slice(&payload);
    Ok(frame)
}

fn decode_device_token(token: &str) -> Result<Vec<u8>, WireError> {
    let bytes = hex::decode(token)
        .map_err(|err| WireError::Token { reason: format!("not valid hex: {err}") })?;
    if bytes.len() != DEVICE_TOKEN_LEN {
        return Err(WireError::Token {
            reason: format!("expected {DEVICE_TOKEN_LEN} bytes, got {}", bytes.len()),
        });
    }
    Ok(bytes)
}

/// A decoded gateway error response.
///
/// `identifier` echoes the [`Message::identifier`] of the send that failed,
/// which is how a caller correlates the response with its request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GatewayResponse {
    pub command: u8,
    pub status: ErrorStatus,
    pub identifier: u32,
}

/// Decodes the 6-byte error frame. Cannot fail: the fixed-size input
/// carries the length requirement and unknown status codes map to
/// [`ErrorStatus::Unknown`].
pub fn decode_response(frame: [u8; RESPONSE_LEN]) -> GatewayResponse {
    let mut identifier = [0u8; 4];
    identifier.copy_from_slice(&frame[2..6]);
    GatewayResponse {
        command: frame[0],
        status: ErrorStatus::from(frame[1]),
        identifier: u32::from_be_bytes(identifier),
    }
}
