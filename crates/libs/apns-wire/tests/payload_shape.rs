use apns_wire::{Message, NotificationPayload};
use serde_json::{json, Value};

fn payload_json(message: &Message) -> Value {
    let bytes = NotificationPayload::from_message(message).to_bytes().unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[test]
fn minimal_payload_has_only_alert() {
    let parsed = payload_json(&Message::new("ab".repeat(32), "Foo"));
    assert_eq!(parsed, json!({ "aps": { "alert": "Foo" } }));
}

#[test]
fn absent_optionals_are_omitted() {
    let parsed = payload_json(&Message::new("ab".repeat(32), "Foo").with_badge(7));
    assert_eq!(parsed["aps"]["badge"], 7);
    assert!(parsed["aps"].get("sound").is_none());
}

#[test]
fn sound_is_carried_when_present() {
    let parsed = payload_json(&Message::new("ab".repeat(32), "Foo").with_sound("chime.aiff"));
    assert_eq!(parsed["aps"]["sound"], "chime.aiff");
}

#[test]
fn extras_sit_next_to_aps() {
    let message = Message::new("ab".repeat(32), "Foo")
        .with_extra("thread", json!("updates"))
        .with_extra("unread", json!(12));
    let parsed = payload_json(&message);
    assert_eq!(parsed["thread"], "updates");
    assert_eq!(parsed["unread"], 12);
    assert_eq!(parsed["aps"]["alert"], "Foo");
}
