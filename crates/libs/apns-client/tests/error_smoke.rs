use apns_client::SendError;
use apns_wire::{decode_response, Message};

#[test]
fn precondition_errors_format() {
    assert_eq!(SendError::EncoderUndefined.to_string(), "no frame encoder configured");
    assert_eq!(SendError::ConnectionUndefined.to_string(), "no connection configured");
    assert_eq!(SendError::DeviceTokenMissing.to_string(), "message has no device token");
}

#[test]
fn rejection_formats_identifier_and_status() {
    let err = SendError::Rejected {
        response: decode_response([8, 8, 0, 0, 0, 7]),
        message: Message::new("a".repeat(64), "Foo"),
    };
    assert_eq!(err.to_string(), "gateway rejected notification 7: invalid token");
}

#[test]
fn only_connection_errors_are_retryable() {
    let rejected = SendError::Rejected {
        response: decode_response([8, 1, 0, 0, 0, 0]),
        message: Message::new("a".repeat(64), ""),
    };
    assert!(!rejected.is_retryable());
    assert!(!SendError::DeviceTokenMissing.is_retryable());

    let transport = SendError::Connection(apns_client::ConnectionError::Io {
        message: "broken pipe".into(),
    });
    assert!(transport.is_retryable());
}
